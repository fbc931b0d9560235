//! # forge_core - Forging Quote Engine
//!
//! `forge_core` is the computational heart of Forgequote, a sales-engineering
//! assistant for a forge shop. It estimates ring and disc stock weight and
//! material cost, and defines the types used to send customer documents to
//! an external review service.
//!
//! ## Design Philosophy
//!
//! - **Stateless**: Pure functions that take input and return results
//! - **JSON-First**: All inputs and results implement Serialize/Deserialize
//! - **Rich Errors**: Structured error types, not just strings
//! - **No I/O in calculations**: Network access lives behind a trait
//!
//! ## Quick Start
//!
//! ```rust
//! use forge_core::calculations::ring::{calculate, RingInput};
//!
//! // OD 1000 mm, ID 600 mm, H 500 mm, steel, 3 pieces at 2500/kg
//! let input = RingInput::new(1000.0, 600.0, 500.0, 7.85, 3, 2500.0);
//! let result = calculate(&input).unwrap();
//!
//! println!("{:.1} kg, cost {:.0}", result.total_weight_kg, result.total_cost);
//! ```
//!
//! ## Modules
//!
//! - [`calculations`] - Ring / disc weight and cost
//! - [`quote`] - Multi-line quotes with totals
//! - [`materials`] - Density table
//! - [`review`] - Document review types and the analyzer trait
//! - [`units`] - Type-safe unit wrappers
//! - [`errors`] - Structured error types

pub mod calculations;
pub mod errors;
pub mod materials;
pub mod quote;
pub mod review;
pub mod units;

// Re-export commonly used types at crate root for convenience
pub use calculations::{RingInput, RingResult};
pub use errors::{CalcError, CalcResult};
pub use materials::{DensitySource, Metal};
pub use quote::{calculate_quote, load_quote, Quote, QuoteResult};
pub use review::{review_document, DocumentAnalyzer, DocumentBlob, ReviewReport, ReviewSettings};
