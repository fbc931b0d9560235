//! # Document Review
//!
//! Forwards a customer document (drawing, specification, contract) and a
//! block of instructions to an external text-generation service and wraps
//! the free-form reply in a [`ReviewReport`].
//!
//! The service itself sits behind the [`DocumentAnalyzer`] trait so the
//! core stays free of network code. `forge_cli` provides the HTTP
//! implementation.
//!
//! ## Example
//!
//! ```rust
//! use forge_core::review::{review_document, DocumentAnalyzer, DocumentBlob, ModelProfile, ReviewSettings};
//! use forge_core::CalcResult;
//!
//! struct Canned;
//!
//! impl DocumentAnalyzer for Canned {
//!     fn analyze(&self, _: &ModelProfile, _: &str, _: &DocumentBlob) -> CalcResult<String> {
//!         Ok("## Checklist\n- Material: PASS".to_string())
//!     }
//! }
//!
//! let doc = DocumentBlob::from_bytes("spec.pdf", b"%PDF-1.7".to_vec(), None).unwrap();
//! let report = review_document(&Canned, &ReviewSettings::default(), None, "Review this.", &doc).unwrap();
//! assert_eq!(report.model, "gemini-2.5-flash");
//! ```

pub mod document;
pub mod profiles;

pub use document::{DocumentBlob, MediaType, MAX_INLINE_BYTES, MAX_REQUEST_BYTES};
pub use profiles::{ModelProfile, ReviewSettings, DEFAULT_ENDPOINT};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::errors::{CalcError, CalcResult};

/// Built-in review instructions, used when no instructions file is configured.
pub const DEFAULT_INSTRUCTIONS: &str = "\
You are reviewing a customer document (contract, specification, or drawing) for a forging order.
Answer in Markdown with one table row per topic and a short pre-shipment checklist:

1. Material suitability: PASS, FAIL, or WARNING against the specified properties.
2. Witness and hold points required by the customer or a third-party inspector.
3. Required inspections (NDE methods and levels, mechanical tests).
4. Key customer requirements: final dimensions, quantity, delivery date.
5. Pre-shipment checklist: marking, packing and preservation, required documents.

Cite the page or clause each finding comes from. Write \"not stated\" when the document is silent.";

/// The external text-generation collaborator.
///
/// Implementations make one request per call; retry policy is theirs.
pub trait DocumentAnalyzer {
    /// Send instructions and a document to `profile`'s model, returning its text reply.
    fn analyze(&self, profile: &ModelProfile, instructions: &str, document: &DocumentBlob) -> CalcResult<String>;
}

/// A completed document review
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReviewReport {
    /// Profile name used
    pub profile: String,
    /// Model identifier used
    pub model: String,
    /// Reviewed file name
    pub file_name: String,
    /// Reviewed media type
    pub media_type: MediaType,
    /// Free-form report text (Markdown as returned by the service)
    pub text: String,
    /// When the review completed
    pub generated_at: DateTime<Utc>,
}

/// Review a document with the selected profile.
///
/// `profile_override` names a profile (or model) and takes precedence over
/// `settings.active_profile`. An empty reply is a [`CalcError::ReviewFailed`].
pub fn review_document(
    analyzer: &dyn DocumentAnalyzer,
    settings: &ReviewSettings,
    profile_override: Option<&str>,
    instructions: &str,
    document: &DocumentBlob,
) -> CalcResult<ReviewReport> {
    let profile = settings.select(profile_override)?;

    if instructions.trim().is_empty() {
        return Err(CalcError::invalid_input("instructions", "\"\"", "Review instructions are empty"));
    }

    debug!(
        profile = %profile.name,
        model = %profile.model,
        file = %document.file_name,
        media_type = %document.media_type,
        bytes = document.len(),
        "sending document for review"
    );

    let text = analyzer.analyze(profile, instructions, document)?;
    if text.trim().is_empty() {
        return Err(CalcError::review_failed(&profile.name, "service returned no text"));
    }

    info!(profile = %profile.name, chars = text.len(), "review complete");

    Ok(ReviewReport {
        profile: profile.name.clone(),
        model: profile.model.clone(),
        file_name: document.file_name.clone(),
        media_type: document.media_type,
        text,
        generated_at: Utc::now(),
    })
}
