//! # Error Types
//!
//! Structured error types for forge_core. Each variant carries enough
//! context for a caller (form, CLI, or another program reading the JSON)
//! to tell "the user hasn't finished typing" apart from "the data is wrong".
//!
//! ## Example
//!
//! ```rust
//! use forge_core::errors::{CalcError, CalcResult};
//!
//! fn validate_height(height_mm: f64) -> CalcResult<()> {
//!     if height_mm <= 0.0 {
//!         return Err(CalcError::insufficient_input("height_mm", height_mm.to_string()));
//!     }
//!     Ok(())
//! }
//!
//! assert!(validate_height(0.0).unwrap_err().is_recoverable());
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type alias for forge_core operations
pub type CalcResult<T> = Result<T, CalcError>;

/// Structured error type for calculation and review operations.
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", content = "details")]
pub enum CalcError {
    /// A required dimension is zero or negative. The computation is not
    /// ready yet; this is not a crash.
    #[error("Insufficient input: '{field}' is {value}, a positive value is required")]
    InsufficientInput { field: String, value: String },

    /// Inner diameter is not strictly less than outer diameter.
    #[error(
        "Invalid geometry: inner diameter {inner_diameter_mm} mm must be smaller than outer diameter {outer_diameter_mm} mm"
    )]
    InvalidGeometry {
        inner_diameter_mm: f64,
        outer_diameter_mm: f64,
    },

    /// An input value is invalid (out of range, not finite, etc.)
    #[error("Invalid input for '{field}': {value} - {reason}")]
    InvalidInput {
        field: String,
        value: String,
        reason: String,
    },

    /// Material not found in the density table
    #[error("Material not found: {material_name}")]
    MaterialNotFound { material_name: String },

    /// Document type the review service cannot accept
    #[error("Unsupported media type for '{file_name}': {media_type}")]
    UnsupportedMediaType {
        file_name: String,
        media_type: String,
    },

    /// Model profile name not present in the configured list
    #[error("Model profile not found: '{name}' (available: {available})")]
    ProfileNotFound { name: String, available: String },

    /// The document-review collaborator failed or returned nothing usable
    #[error("Review failed with profile '{profile}': {reason}")]
    ReviewFailed { profile: String, reason: String },

    /// Configuration could not be loaded or is incomplete
    #[error("Configuration error: {reason}")]
    ConfigError { reason: String },

    /// File I/O error
    #[error("File error: {operation} on '{path}' - {reason}")]
    FileError {
        operation: String,
        path: String,
        reason: String,
    },

    /// JSON serialization/deserialization error
    #[error("Serialization error: {reason}")]
    SerializationError { reason: String },
}

impl CalcError {
    /// Create an InsufficientInput error
    pub fn insufficient_input(field: impl Into<String>, value: impl Into<String>) -> Self {
        CalcError::InsufficientInput {
            field: field.into(),
            value: value.into(),
        }
    }

    /// Create an InvalidGeometry error
    pub fn invalid_geometry(inner_diameter_mm: f64, outer_diameter_mm: f64) -> Self {
        CalcError::InvalidGeometry {
            inner_diameter_mm,
            outer_diameter_mm,
        }
    }

    /// Create an InvalidInput error
    pub fn invalid_input(field: impl Into<String>, value: impl Into<String>, reason: impl Into<String>) -> Self {
        CalcError::InvalidInput {
            field: field.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// Create a MaterialNotFound error
    pub fn material_not_found(material_name: impl Into<String>) -> Self {
        CalcError::MaterialNotFound {
            material_name: material_name.into(),
        }
    }

    /// Create an UnsupportedMediaType error
    pub fn unsupported_media_type(file_name: impl Into<String>, media_type: impl Into<String>) -> Self {
        CalcError::UnsupportedMediaType {
            file_name: file_name.into(),
            media_type: media_type.into(),
        }
    }

    /// Create a ProfileNotFound error
    pub fn profile_not_found(name: impl Into<String>, available: &[&str]) -> Self {
        CalcError::ProfileNotFound {
            name: name.into(),
            available: available.join(", "),
        }
    }

    /// Create a ReviewFailed error
    pub fn review_failed(profile: impl Into<String>, reason: impl Into<String>) -> Self {
        CalcError::ReviewFailed {
            profile: profile.into(),
            reason: reason.into(),
        }
    }

    /// Create a ConfigError
    pub fn config_error(reason: impl Into<String>) -> Self {
        CalcError::ConfigError {
            reason: reason.into(),
        }
    }

    /// Create a FileError
    pub fn file_error(operation: impl Into<String>, path: impl Into<String>, reason: impl Into<String>) -> Self {
        CalcError::FileError {
            operation: operation.into(),
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// True when the caller should treat the result as "not yet ready"
    /// rather than as a failure.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, CalcError::InsufficientInput { .. })
    }

    /// Get a short error code for programmatic handling
    pub fn error_code(&self) -> &'static str {
        match self {
            CalcError::InsufficientInput { .. } => "INSUFFICIENT_INPUT",
            CalcError::InvalidGeometry { .. } => "INVALID_GEOMETRY",
            CalcError::InvalidInput { .. } => "INVALID_INPUT",
            CalcError::MaterialNotFound { .. } => "MATERIAL_NOT_FOUND",
            CalcError::UnsupportedMediaType { .. } => "UNSUPPORTED_MEDIA_TYPE",
            CalcError::ProfileNotFound { .. } => "PROFILE_NOT_FOUND",
            CalcError::ReviewFailed { .. } => "REVIEW_FAILED",
            CalcError::ConfigError { .. } => "CONFIG_ERROR",
            CalcError::FileError { .. } => "FILE_ERROR",
            CalcError::SerializationError { .. } => "SERIALIZATION_ERROR",
        }
    }
}

impl From<serde_json::Error> for CalcError {
    fn from(err: serde_json::Error) -> Self {
        CalcError::SerializationError {
            reason: err.to_string(),
        }
    }
}
