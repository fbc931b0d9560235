//! # Materials Database
//!
//! Density lookups for forging stock.
//!
//! A ring estimate needs only one material property: density. It is either
//! taken from the [`Metal`] table or typed in directly for grades the table
//! doesn't cover.
//!
//! ## Example
//!
//! ```rust
//! use forge_core::materials::{DensitySource, Metal};
//!
//! let steel = DensitySource::metal(Metal::CarbonSteel);
//! assert_eq!(steel.density_g_cm3(), 7.85);
//!
//! let custom = DensitySource::custom(8.19);
//! assert_eq!(custom.density_g_cm3(), 8.19);
//! ```
//!
//! ## JSON Serialization
//!
//! ```json
//! { "type": "Metal", "metal": "SS316" }
//! { "type": "Custom", "density_g_cm3": 8.19 }
//! ```

pub mod metals;

pub use metals::Metal;

use serde::{Deserialize, Serialize};

/// Where a density value comes from
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum DensitySource {
    /// Tabulated metal
    Metal {
        metal: Metal,
    },
    /// User-supplied density in g/cm³
    Custom {
        density_g_cm3: f64,
    },
}

impl DensitySource {
    /// Tabulated metal
    pub fn metal(metal: Metal) -> Self {
        DensitySource::Metal { metal }
    }

    /// User-supplied density in g/cm³
    pub fn custom(density_g_cm3: f64) -> Self {
        DensitySource::Custom { density_g_cm3 }
    }

    /// Resolve to a density in g/cm³
    pub fn density_g_cm3(&self) -> f64 {
        match self {
            DensitySource::Metal { metal } => metal.density_g_cm3(),
            DensitySource::Custom { density_g_cm3 } => *density_g_cm3,
        }
    }
}

impl Default for DensitySource {
    fn default() -> Self {
        DensitySource::Metal {
            metal: Metal::CarbonSteel,
        }
    }
}

impl std::fmt::Display for DensitySource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DensitySource::Metal { metal } => write!(f, "{} ({} g/cm³)", metal, metal.density_g_cm3()),
            DensitySource::Custom { density_g_cm3 } => write!(f, "Custom ({} g/cm³)", density_g_cm3),
        }
    }
}
