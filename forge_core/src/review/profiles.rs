//! Named model profiles for the review service.
//!
//! Profiles are an ordered list chosen by name from static configuration.
//! There is no probing: if the selected model is unavailable, the review
//! fails and the user picks another profile.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::errors::{CalcError, CalcResult};

/// Default base URL of the generative-language REST API
pub const DEFAULT_ENDPOINT: &str = "https://generativelanguage.googleapis.com/v1beta";

/// A named model configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelProfile {
    /// Profile name used on the command line and in settings
    pub name: String,
    /// Model identifier sent to the service
    pub model: String,
}

impl ModelProfile {
    /// Create a profile
    pub fn new(name: impl Into<String>, model: impl Into<String>) -> Self {
        ModelProfile {
            name: name.into(),
            model: model.into(),
        }
    }
}

/// Review section of the settings file.
///
/// ## JSON Example
///
/// ```json
/// {
///   "active_profile": "flash",
///   "profiles": [
///     { "name": "flash", "model": "gemini-2.5-flash" },
///     { "name": "pro", "model": "gemini-pro" }
///   ],
///   "endpoint": "https://generativelanguage.googleapis.com/v1beta",
///   "timeout_secs": 120,
///   "max_retries": 3
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReviewSettings {
    /// Profile used when none is given on the command line
    pub active_profile: String,

    /// Available profiles, in display order
    pub profiles: Vec<ModelProfile>,

    /// Service base URL
    pub endpoint: String,

    /// Request timeout in seconds
    pub timeout_secs: u64,

    /// Retries on rate limiting and server errors
    pub max_retries: u32,

    /// File holding replacement review instructions
    #[serde(skip_serializing_if = "Option::is_none")]
    pub instructions_path: Option<PathBuf>,
}

impl Default for ReviewSettings {
    fn default() -> Self {
        ReviewSettings {
            active_profile: "flash".to_string(),
            profiles: vec![
                ModelProfile::new("flash", "gemini-2.5-flash"),
                ModelProfile::new("flash-1.5-latest", "gemini-1.5-flash-latest"),
                ModelProfile::new("flash-1.5", "gemini-1.5-flash"),
                ModelProfile::new("pro", "gemini-pro"),
            ],
            endpoint: DEFAULT_ENDPOINT.to_string(),
            timeout_secs: 120,
            max_retries: 3,
            instructions_path: None,
        }
    }
}

impl ReviewSettings {
    /// Profile names in order
    pub fn profile_names(&self) -> Vec<&str> {
        self.profiles.iter().map(|p| p.name.as_str()).collect()
    }

    /// Select a profile by name, falling back to `active_profile`.
    ///
    /// A model identifier is accepted in place of a profile name.
    pub fn select(&self, name: Option<&str>) -> CalcResult<&ModelProfile> {
        let wanted = name.unwrap_or(&self.active_profile);
        self.profiles
            .iter()
            .find(|p| p.name == wanted)
            .or_else(|| self.profiles.iter().find(|p| p.model == wanted))
            .ok_or_else(|| CalcError::profile_not_found(wanted, &self.profile_names()))
    }

    /// Check the settings are usable
    pub fn validate(&self) -> CalcResult<()> {
        if self.profiles.is_empty() {
            return Err(CalcError::config_error("review.profiles is empty"));
        }
        for (i, profile) in self.profiles.iter().enumerate() {
            if profile.name.trim().is_empty() || profile.model.trim().is_empty() {
                return Err(CalcError::config_error(format!(
                    "review.profiles[{}] needs both a name and a model",
                    i
                )));
            }
            if self.profiles[..i].iter().any(|p| p.name == profile.name) {
                return Err(CalcError::config_error(format!(
                    "duplicate profile name '{}'",
                    profile.name
                )));
            }
        }
        if !self.profiles.iter().any(|p| p.name == self.active_profile) {
            return Err(CalcError::config_error(format!(
                "active_profile '{}' is not one of: {}",
                self.active_profile,
                self.profile_names().join(", ")
            )));
        }
        if self.timeout_secs == 0 {
            return Err(CalcError::config_error("review.timeout_secs must be at least 1"));
        }
        Ok(())
    }
}
