//! # Unit Types
//!
//! Type-safe wrappers for the metric units used in forging estimates.
//! Each is a plain f64 newtype that serializes as a bare number.
//!
//! ## Units
//!
//! - Volume: cubic millimeters (mm³), cubic centimeters (cm³)
//! - Mass: kilograms (kg), metric tonnes (t)
//! - Density: grams per cubic centimeter (g/cm³)
//!
//! ## Example
//!
//! ```rust
//! use forge_core::units::{CubicMillimeters, GramsPerCc, Kilograms};
//!
//! // One liter of steel
//! let volume = CubicMillimeters(1_000_000.0);
//! let mass = Kilograms::from_volume(volume, GramsPerCc(7.85));
//! assert!((mass.0 - 7.85).abs() < 1e-12);
//! ```

use serde::{Deserialize, Serialize};

// ============================================================================
// Volume
// ============================================================================

/// Volume in cubic millimeters
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CubicMillimeters(pub f64);

/// Volume in cubic centimeters (1 cm³ = 1000 mm³)
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CubicCentimeters(pub f64);

impl From<CubicMillimeters> for CubicCentimeters {
    fn from(mm3: CubicMillimeters) -> Self {
        CubicCentimeters(mm3.0 / 1000.0)
    }
}

// ============================================================================
// Mass / Density
// ============================================================================

/// Mass in kilograms
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Kilograms(pub f64);

/// Mass in metric tonnes (1 t = 1000 kg)
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Tonnes(pub f64);

/// Density in grams per cubic centimeter
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GramsPerCc(pub f64);

/// mm³ · g/cm³ → kg. 1 cm³ = 1000 mm³ and 1 g = 0.001 kg.
pub const MM3_G_PER_CM3_TO_KG: f64 = 1_000_000.0;

impl Kilograms {
    /// Mass of a volume at the given density: `v · ρ / 1_000_000`
    pub fn from_volume(volume: CubicMillimeters, density: GramsPerCc) -> Self {
        Kilograms(volume.0 * density.0 / MM3_G_PER_CM3_TO_KG)
    }
}

impl From<Kilograms> for Tonnes {
    fn from(kg: Kilograms) -> Self {
        Tonnes(kg.0 / 1000.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mm3_to_cm3() {
        let cm3: CubicCentimeters = CubicMillimeters(2500.0).into();
        assert_eq!(cm3.0, 2.5);
    }

    #[test]
    fn test_kg_to_tonnes() {
        let t: Tonnes = Kilograms(3082.69).into();
        assert!((t.0 - 3.08269).abs() < 1e-9);
    }

    #[test]
    fn test_mass_from_volume_matches_formula() {
        let v = CubicMillimeters(392_699_081.698_724_2);
        let kg = Kilograms::from_volume(v, GramsPerCc(7.85));
        assert_eq!(kg.0, v.0 * 7.85 / 1_000_000.0);
    }

    #[test]
    fn test_serialization() {
        let mass = Kilograms(1972.5);
        let json = serde_json::to_string(&mass).unwrap();
        assert_eq!(json, "1972.5");

        let roundtrip: Kilograms = serde_json::from_str(&json).unwrap();
        assert_eq!(mass, roundtrip);
    }
}
