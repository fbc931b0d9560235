//! # Quotes
//!
//! A quote bundles the ring line items of one customer inquiry and totals
//! their weight and material cost. Quotes are read from human-readable JSON.
//!
//! ## Structure
//!
//! ```text
//! Quote
//! ├── label, customer, currency
//! └── items: Vec<RingInput> (one per part number)
//! ```
//!
//! ## Example
//!
//! ```rust
//! use forge_core::calculations::RingInput;
//! use forge_core::quote::{calculate_quote, Quote};
//!
//! let mut quote = Quote::new("Q-25-118", "ACME Valves");
//! quote.items.push(RingInput::new(1000.0, 600.0, 500.0, 7.85, 3, 2500.0).with_label("Body ring"));
//! quote.items.push(RingInput::new(400.0, 0.0, 120.0, 7.85, 2, 2500.0).with_label("Blind disc"));
//!
//! let result = calculate_quote(&quote).unwrap();
//! assert_eq!(result.lines.len(), 2);
//! ```

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::calculations::ring::{self, RingInput, RingResult};
use crate::errors::{CalcError, CalcResult};

/// A set of ring estimates for one inquiry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Quote {
    /// Quote or inquiry number
    pub label: String,

    /// Customer name
    #[serde(default)]
    pub customer: String,

    /// Currency the unit prices are expressed in (display only)
    #[serde(default = "default_currency")]
    pub currency: String,

    /// Line items
    #[serde(default)]
    pub items: Vec<RingInput>,
}

fn default_currency() -> String {
    "KRW".to_string()
}

impl Quote {
    /// Create an empty quote
    pub fn new(label: impl Into<String>, customer: impl Into<String>) -> Self {
        Quote {
            label: label.into(),
            customer: customer.into(),
            currency: default_currency(),
            items: Vec::new(),
        }
    }

    /// Parse a quote from JSON
    pub fn from_json(json: &str) -> CalcResult<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

/// Result for one line of a quote
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuoteLine {
    /// Line label (copied from the input)
    pub label: String,

    /// Ring calculation result
    pub result: RingResult,
}

/// Results for a whole quote
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuoteResult {
    /// Quote label
    pub label: String,

    /// Customer name
    pub customer: String,

    /// Currency for `total_cost`
    pub currency: String,

    /// Per-line results, in input order
    pub lines: Vec<QuoteLine>,

    /// Sum of line total weights (kg)
    pub total_weight_kg: f64,

    /// Sum of line total costs
    pub total_cost: f64,
}

/// Calculate every line of a quote and sum the totals.
///
/// The first failing line fails the quote; the error's field names the
/// line so the user can find it.
pub fn calculate_quote(quote: &Quote) -> CalcResult<QuoteResult> {
    if quote.items.is_empty() {
        return Err(CalcError::insufficient_input("items", "[]"));
    }

    let mut lines = Vec::with_capacity(quote.items.len());
    for (index, item) in quote.items.iter().enumerate() {
        let result = ring::calculate(item).map_err(|e| locate_error(e, index, &item.label))?;
        lines.push(QuoteLine {
            label: item.label.clone(),
            result,
        });
    }

    let total_weight_kg: f64 = lines.iter().map(|l| l.result.total_weight_kg).sum();
    let total_cost: f64 = lines.iter().map(|l| l.result.total_cost).sum();

    for (field, value) in [("total_weight_kg", total_weight_kg), ("total_cost", total_cost)] {
        if !value.is_finite() {
            return Err(CalcError::invalid_input(field, value.to_string(), "Quote total overflows"));
        }
    }

    Ok(QuoteResult {
        label: quote.label.clone(),
        customer: quote.customer.clone(),
        currency: quote.currency.clone(),
        lines,
        total_weight_kg,
        total_cost,
    })
}

/// Prefix field-bearing errors with the line position.
///
/// Geometry errors carry the offending diameters rather than a field, so
/// they pass through unchanged and the line is only logged.
fn locate_error(err: CalcError, index: usize, label: &str) -> CalcError {
    let prefix = if label.is_empty() {
        format!("items[{}]", index)
    } else {
        format!("items[{}] ({})", index, label)
    };

    match err {
        CalcError::InsufficientInput { field, value } => CalcError::InsufficientInput {
            field: format!("{}.{}", prefix, field),
            value,
        },
        CalcError::InvalidInput { field, value, reason } => CalcError::InvalidInput {
            field: format!("{}.{}", prefix, field),
            value,
            reason,
        },
        other => {
            tracing::debug!(line = %prefix, error = %other, "quote line failed");
            other
        }
    }
}

/// Load a quote from a JSON file.
///
/// # Example
///
/// ```rust,no_run
/// use forge_core::quote::load_quote;
/// use std::path::Path;
///
/// let quote = load_quote(Path::new("inquiry.json"))?;
/// println!("Loaded quote: {}", quote.label);
/// # Ok::<(), forge_core::errors::CalcError>(())
/// ```
pub fn load_quote(path: &Path) -> CalcResult<Quote> {
    let contents = fs::read_to_string(path)
        .map_err(|e| CalcError::file_error("read", path.display().to_string(), e.to_string()))?;

    serde_json::from_str(&contents).map_err(|e| CalcError::SerializationError {
        reason: format!("Invalid JSON in {}: {}", path.display(), e),
    })
}
