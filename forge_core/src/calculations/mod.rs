//! # Estimate Calculations
//!
//! Each calculation follows the pattern:
//!
//! - `*Input` - Input parameters (JSON-serializable)
//! - `*Result` - Calculation results (JSON-serializable)
//! - `calculate(input) -> Result<*Result, CalcError>` - Pure calculation function
//!
//! ## Available Calculations
//!
//! - [`ring`] - Annular cylinder (ring / tube / solid disc) weight and material cost

pub mod ring;

// Re-export commonly used types
pub use ring::{RingInput, RingResult};
