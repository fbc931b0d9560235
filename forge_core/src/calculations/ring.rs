//! # Ring Weight/Cost Calculation
//!
//! Converts an annular cylinder (ring, tube, or shaft stock) into material
//! weight and estimated material cost.
//!
//! ## Formulas
//!
//! ```text
//! volume_mm3         = π · (OD² − ID²) / 4 · H
//! weight_per_unit_kg = volume_mm3 · ρ / 1_000_000
//! total_weight_kg    = weight_per_unit_kg · quantity
//! total_cost         = total_weight_kg · unit_price_per_kg
//! ```
//!
//! With ID = 0 this is a solid disc or bar.
//!
//! ## Example
//!
//! ```rust
//! use forge_core::calculations::ring::{calculate, RingInput};
//!
//! let input = RingInput::new(1000.0, 600.0, 500.0, 7.85, 3, 2500.0);
//! let result = calculate(&input).unwrap();
//!
//! assert!((result.weight_per_unit_kg - 1972.92).abs() < 0.01);
//! assert_eq!(result.total_weight_kg, result.weight_per_unit_kg * 3.0);
//! ```

use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

use crate::errors::{CalcError, CalcResult};
use crate::materials::DensitySource;
use crate::units::{CubicMillimeters, GramsPerCc, Kilograms, Tonnes};

/// Input parameters for a ring (annular cylinder) estimate.
///
/// ## JSON Example
///
/// ```json
/// {
///   "label": "Flange blank",
///   "outer_diameter_mm": 1000.0,
///   "inner_diameter_mm": 600.0,
///   "height_mm": 500.0,
///   "density": { "type": "Metal", "metal": "CS" },
///   "quantity": 3,
///   "unit_price_per_kg": 2500.0
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RingInput {
    /// User label for this part (e.g., "Flange blank", "Shaft #2")
    #[serde(default)]
    pub label: String,

    /// Outer diameter OD in millimeters
    pub outer_diameter_mm: f64,

    /// Inner diameter ID in millimeters (0 for a solid disc)
    #[serde(default)]
    pub inner_diameter_mm: f64,

    /// Height (or length) H in millimeters
    pub height_mm: f64,

    /// Material density
    #[serde(default)]
    pub density: DensitySource,

    /// Number of identical parts. 0 is treated as 1.
    #[serde(default = "default_quantity")]
    pub quantity: u32,

    /// Material price per kilogram. 0 yields zero cost.
    #[serde(default)]
    pub unit_price_per_kg: f64,
}

fn default_quantity() -> u32 {
    1
}

impl RingInput {
    /// Build an unlabeled input from the six raw values.
    pub fn new(
        outer_diameter_mm: f64,
        inner_diameter_mm: f64,
        height_mm: f64,
        density_g_cm3: f64,
        quantity: u32,
        unit_price_per_kg: f64,
    ) -> Self {
        Self {
            label: String::new(),
            outer_diameter_mm,
            inner_diameter_mm,
            height_mm,
            density: DensitySource::custom(density_g_cm3),
            quantity,
            unit_price_per_kg,
        }
    }

    /// Set the label
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    /// Set the density source
    pub fn with_density(mut self, density: DensitySource) -> Self {
        self.density = density;
        self
    }

    /// Density in g/cm³
    pub fn density_g_cm3(&self) -> f64 {
        self.density.density_g_cm3()
    }

    /// Quantity used in totals.
    ///
    /// Form widgets default an empty or zero quantity to one part, so zero
    /// is coerced to 1 rather than rejected.
    pub fn effective_quantity(&self) -> u32 {
        self.quantity.max(1)
    }

    /// Validate input parameters.
    ///
    /// Non-positive OD or height means the form isn't filled in yet and
    /// yields [`CalcError::InsufficientInput`]. An inner diameter at or
    /// above the outer diameter is [`CalcError::InvalidGeometry`].
    pub fn validate(&self) -> CalcResult<()> {
        let density = self.density_g_cm3();

        for (field, value) in [
            ("outer_diameter_mm", self.outer_diameter_mm),
            ("inner_diameter_mm", self.inner_diameter_mm),
            ("height_mm", self.height_mm),
            ("density_g_cm3", density),
            ("unit_price_per_kg", self.unit_price_per_kg),
        ] {
            if !value.is_finite() {
                return Err(CalcError::invalid_input(field, value.to_string(), "Value must be a finite number"));
            }
        }

        if self.outer_diameter_mm <= 0.0 {
            return Err(CalcError::insufficient_input(
                "outer_diameter_mm",
                self.outer_diameter_mm.to_string(),
            ));
        }
        if self.height_mm <= 0.0 {
            return Err(CalcError::insufficient_input("height_mm", self.height_mm.to_string()));
        }
        if self.inner_diameter_mm < 0.0 {
            return Err(CalcError::invalid_input(
                "inner_diameter_mm",
                self.inner_diameter_mm.to_string(),
                "Inner diameter cannot be negative",
            ));
        }
        if self.inner_diameter_mm >= self.outer_diameter_mm {
            return Err(CalcError::invalid_geometry(self.inner_diameter_mm, self.outer_diameter_mm));
        }
        if density <= 0.0 {
            return Err(CalcError::invalid_input(
                "density_g_cm3",
                density.to_string(),
                "Density must be positive",
            ));
        }
        if self.unit_price_per_kg < 0.0 {
            return Err(CalcError::invalid_input(
                "unit_price_per_kg",
                self.unit_price_per_kg.to_string(),
                "Unit price cannot be negative",
            ));
        }
        Ok(())
    }

    /// Wall thickness (OD − ID) / 2 in millimeters
    pub fn wall_thickness_mm(&self) -> f64 {
        (self.outer_diameter_mm - self.inner_diameter_mm) / 2.0
    }

    /// True when there is no bore
    pub fn is_solid(&self) -> bool {
        self.inner_diameter_mm == 0.0
    }
}

/// Results from a ring estimate. Full precision; round only for display.
///
/// ## JSON Example
///
/// ```json
/// {
///   "volume_mm3": 251327412.28718346,
///   "weight_per_unit_kg": 1972.92018645439,
///   "total_weight_kg": 5918.76055936317,
///   "total_cost": 14796901.398407925,
///   "quantity": 3,
///   "density_g_cm3": 7.85
/// }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RingResult {
    /// Volume of one part (mm³)
    pub volume_mm3: f64,

    /// Mass of one part (kg)
    pub weight_per_unit_kg: f64,

    /// Mass of all parts (kg)
    pub total_weight_kg: f64,

    /// Material cost of all parts (currency units)
    pub total_cost: f64,

    /// Quantity the totals were computed with (after coercion)
    pub quantity: u32,

    /// Density used (g/cm³)
    pub density_g_cm3: f64,
}

impl RingResult {
    /// Total weight in metric tonnes
    pub fn total_weight_t(&self) -> f64 {
        Tonnes::from(Kilograms(self.total_weight_kg)).0
    }
}

/// Calculate ring volume, weight and cost.
///
/// Pure function: no I/O, no shared state, identical inputs always give
/// identical outputs.
///
/// # Returns
///
/// * `Ok(RingResult)` - Calculation results
/// * `Err(CalcError::InsufficientInput)` - OD or height not yet positive
/// * `Err(CalcError::InvalidGeometry)` - ID ≥ OD
/// * `Err(CalcError::InvalidInput)` - Negative ID/price, non-positive density, non-finite inputs or results
pub fn calculate(input: &RingInput) -> CalcResult<RingResult> {
    input.validate()?;

    let od = input.outer_diameter_mm;
    let id = input.inner_diameter_mm;
    let density_g_cm3 = input.density_g_cm3();
    let quantity = input.effective_quantity();

    // (OD - ID)(OD + ID) keeps OD² - ID² from cancelling two infinities
    let volume_mm3 = PI * ((od - id) * (od + id)) / 4.0 * input.height_mm;
    let weight_per_unit_kg = Kilograms::from_volume(CubicMillimeters(volume_mm3), GramsPerCc(density_g_cm3)).0;
    let total_weight_kg = weight_per_unit_kg * f64::from(quantity);
    let total_cost = total_weight_kg * input.unit_price_per_kg;

    for (field, value) in [
        ("volume_mm3", volume_mm3),
        ("weight_per_unit_kg", weight_per_unit_kg),
        ("total_weight_kg", total_weight_kg),
        ("total_cost", total_cost),
    ] {
        if !value.is_finite() {
            return Err(CalcError::invalid_input(
                field,
                value.to_string(),
                "Result overflows; dimensions or price are too large",
            ));
        }
    }

    Ok(RingResult {
        volume_mm3,
        weight_per_unit_kg,
        total_weight_kg,
        total_cost,
        quantity,
        density_g_cm3,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::materials::Metal;

    fn solid_disc() -> RingInput {
        RingInput::new(1000.0, 0.0, 500.0, 7.85, 1, 2500.0)
    }

    fn ring() -> RingInput {
        RingInput::new(1000.0, 600.0, 500.0, 7.85, 3, 2500.0)
    }

    #[test]
    fn test_solid_disc_scenario() {
        let result = calculate(&solid_disc()).unwrap();

        // π·1000²/4·500
        assert!((result.volume_mm3 - 392_699_081.7).abs() < 0.1);
        assert!((result.weight_per_unit_kg - 3082.69).abs() < 0.01);
        assert_eq!(result.total_weight_kg, result.weight_per_unit_kg);
        assert!((result.total_cost - 7_706_719.48).abs() < 1.0);
    }

    #[test]
    fn test_ring_scenario() {
        let result = calculate(&ring()).unwrap();

        // π·(1,000,000 − 360,000)/4·500
        assert!((result.volume_mm3 - 251_327_412.3).abs() < 0.1);
        assert!((result.weight_per_unit_kg - 1972.92).abs() < 0.01);
        assert!((result.total_weight_kg - 5918.76).abs() < 0.01);
        assert!((result.total_cost - 14_796_901.4).abs() < 1.0);
    }

    #[test]
    fn test_total_weight_is_unit_weight_times_quantity() {
        let result = calculate(&ring()).unwrap();
        assert_eq!(result.total_weight_kg, result.weight_per_unit_kg * 3.0);
        assert_eq!(result.quantity, 3);
    }

    #[test]
    fn test_exact_unit_conversion() {
        let result = calculate(&ring()).unwrap();
        assert_eq!(result.weight_per_unit_kg, result.volume_mm3 * 7.85 / 1_000_000.0);
    }

    #[test]
    fn test_deterministic() {
        let input = ring();
        assert_eq!(calculate(&input).unwrap(), calculate(&input).unwrap());
    }

    #[test]
    fn test_zero_bore_is_solid_cylinder() {
        let input = RingInput::new(320.0, 0.0, 75.0, 7.85, 1, 0.0);
        let result = calculate(&input).unwrap();
        assert!(input.is_solid());
        assert_eq!(result.volume_mm3, PI * (320.0 * 320.0) / 4.0 * 75.0);
    }

    #[test]
    fn test_zero_outer_diameter_is_insufficient() {
        let mut input = ring();
        input.outer_diameter_mm = 0.0;
        let err = calculate(&input).unwrap_err();
        assert!(matches!(err, CalcError::InsufficientInput { ref field, .. } if field == "outer_diameter_mm"));
        assert!(err.is_recoverable());
    }

    #[test]
    fn test_zero_height_is_insufficient() {
        let mut input = ring();
        input.height_mm = 0.0;
        assert!(matches!(
            calculate(&input),
            Err(CalcError::InsufficientInput { ref field, .. }) if field == "height_mm"
        ));
    }

    #[test]
    fn test_negative_dimensions_are_insufficient() {
        let mut input = ring();
        input.height_mm = -10.0;
        assert_eq!(calculate(&input).unwrap_err().error_code(), "INSUFFICIENT_INPUT");
    }

    #[test]
    fn test_equal_diameters_are_invalid_geometry() {
        let input = RingInput::new(500.0, 500.0, 100.0, 7.85, 1, 2500.0);
        assert_eq!(calculate(&input).unwrap_err(), CalcError::invalid_geometry(500.0, 500.0));
    }

    #[test]
    fn test_bore_larger_than_od_is_invalid_geometry() {
        let input = RingInput::new(500.0, 650.0, 100.0, 7.85, 1, 2500.0);
        let err = calculate(&input).unwrap_err();
        assert_eq!(err.error_code(), "INVALID_GEOMETRY");
        assert!(!err.is_recoverable());
    }

    #[test]
    fn test_insufficient_input_takes_precedence_over_geometry() {
        // OD = 0 with any ID: the form isn't filled in yet
        let input = RingInput::new(0.0, 100.0, 100.0, 7.85, 1, 0.0);
        assert_eq!(calculate(&input).unwrap_err().error_code(), "INSUFFICIENT_INPUT");
    }

    #[test]
    fn test_zero_quantity_coerced_to_one() {
        let mut input = ring();
        input.quantity = 0;
        let result = calculate(&input).unwrap();
        assert_eq!(result.quantity, 1);
        assert_eq!(result.total_weight_kg, result.weight_per_unit_kg);
    }

    #[test]
    fn test_zero_price_yields_zero_cost() {
        let mut input = ring();
        input.unit_price_per_kg = 0.0;
        let result = calculate(&input).unwrap();
        assert_eq!(result.total_cost, 0.0);
        assert!(result.total_weight_kg > 0.0);
    }

    #[test]
    fn test_invalid_density_and_price() {
        let mut input = ring();
        input.density = DensitySource::custom(0.0);
        assert_eq!(calculate(&input).unwrap_err().error_code(), "INVALID_INPUT");

        let mut input = ring();
        input.unit_price_per_kg = -1.0;
        assert_eq!(calculate(&input).unwrap_err().error_code(), "INVALID_INPUT");

        let mut input = ring();
        input.inner_diameter_mm = -5.0;
        assert_eq!(calculate(&input).unwrap_err().error_code(), "INVALID_INPUT");
    }

    #[test]
    fn test_non_finite_rejected() {
        let mut input = ring();
        input.outer_diameter_mm = f64::NAN;
        assert_eq!(calculate(&input).unwrap_err().error_code(), "INVALID_INPUT");

        let mut input = ring();
        input.unit_price_per_kg = f64::INFINITY;
        assert_eq!(calculate(&input).unwrap_err().error_code(), "INVALID_INPUT");
    }

    #[test]
    fn test_overflowing_dimensions_rejected() {
        let err = calculate(&RingInput::new(1e160, 1e156, 10.0, 7.85, 1, 1.0)).unwrap_err();
        match err {
            CalcError::InvalidInput { field, .. } => assert_eq!(field, "volume_mm3"),
            other => panic!("expected InvalidInput, got {:?}", other),
        }

        // Volume fits, cost does not
        let err = calculate(&RingInput::new(1000.0, 0.0, 500.0, 7.85, 1, 1e306)).unwrap_err();
        match err {
            CalcError::InvalidInput { field, .. } => assert_eq!(field, "total_cost"),
            other => panic!("expected InvalidInput, got {:?}", other),
        }
    }

    #[test]
    fn test_material_density() {
        let input = ring().with_density(DensitySource::metal(Metal::TitaniumGr5));
        let result = calculate(&input).unwrap();
        assert_eq!(result.density_g_cm3, 4.43);
        assert!(result.weight_per_unit_kg < calculate(&ring()).unwrap().weight_per_unit_kg);
    }

    #[test]
    fn test_wall_thickness_and_tonnes() {
        let input = ring();
        assert_eq!(input.wall_thickness_mm(), 200.0);
        let result = calculate(&input).unwrap();
        assert!((result.total_weight_t() - 5.91876).abs() < 1e-5);
    }

    #[test]
    fn test_serialization_defaults() {
        let json = r#"{ "outer_diameter_mm": 400.0, "height_mm": 120.0 }"#;
        let input: RingInput = serde_json::from_str(json).unwrap();
        assert_eq!(input.inner_diameter_mm, 0.0);
        assert_eq!(input.quantity, 1);
        assert_eq!(input.density_g_cm3(), 7.85);
        assert_eq!(input.unit_price_per_kg, 0.0);

        let roundtrip: RingInput = serde_json::from_str(&serde_json::to_string(&input).unwrap()).unwrap();
        assert_eq!(input, roundtrip);
    }

    #[test]
    fn test_concurrent_calls() {
        let input = ring();
        let expected = calculate(&input).unwrap();
        let handles: Vec<_> = (0..4)
            .map(|_| {
                let input = input.clone();
                std::thread::spawn(move || calculate(&input).unwrap())
            })
            .collect();
        for handle in handles {
            assert_eq!(handle.join().unwrap(), expected);
        }
    }
}
