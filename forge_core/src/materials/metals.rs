//! Forging Metals
//!
//! Nominal densities for the stock materials a forge shop quotes most often.
//! Values are room-temperature handbook figures in g/cm³; a customer spec
//! calling for a specific heat or grade should use a custom density instead.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::errors::{CalcError, CalcResult};
use crate::units::GramsPerCc;

/// Forging stock materials with tabulated density
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Metal {
    /// Carbon steel (e.g., A105, SA-266)
    #[serde(rename = "CS")]
    CarbonSteel,
    /// Low-alloy steel (e.g., 4130, F22)
    #[serde(rename = "AS")]
    AlloySteel,
    /// Austenitic stainless 304/304L
    #[serde(rename = "SS304")]
    Stainless304,
    /// Austenitic stainless 316/316L
    #[serde(rename = "SS316")]
    Stainless316,
    /// Duplex stainless (e.g., F51)
    #[serde(rename = "DSS")]
    DuplexStainless,
    /// Hot-work tool steel (e.g., H13)
    #[serde(rename = "TS")]
    ToolSteel,
    /// Nickel alloy 625
    #[serde(rename = "IN625")]
    NickelAlloy625,
    /// Titanium Grade 5 (Ti-6Al-4V)
    #[serde(rename = "TI5")]
    TitaniumGr5,
    /// Aluminum 6061
    #[serde(rename = "AL6061")]
    Aluminum6061,
    /// Copper (C11000)
    #[serde(rename = "CU")]
    Copper,
    /// Brass (C36000)
    #[serde(rename = "BR")]
    Brass,
}

impl Metal {
    /// All metals for listing and selection
    pub const ALL: [Metal; 11] = [
        Metal::CarbonSteel,
        Metal::AlloySteel,
        Metal::Stainless304,
        Metal::Stainless316,
        Metal::DuplexStainless,
        Metal::ToolSteel,
        Metal::NickelAlloy625,
        Metal::TitaniumGr5,
        Metal::Aluminum6061,
        Metal::Copper,
        Metal::Brass,
    ];

    /// Short code (matches the JSON representation)
    pub fn code(&self) -> &'static str {
        match self {
            Metal::CarbonSteel => "CS",
            Metal::AlloySteel => "AS",
            Metal::Stainless304 => "SS304",
            Metal::Stainless316 => "SS316",
            Metal::DuplexStainless => "DSS",
            Metal::ToolSteel => "TS",
            Metal::NickelAlloy625 => "IN625",
            Metal::TitaniumGr5 => "TI5",
            Metal::Aluminum6061 => "AL6061",
            Metal::Copper => "CU",
            Metal::Brass => "BR",
        }
    }

    /// Get display name
    pub fn display_name(&self) -> &'static str {
        match self {
            Metal::CarbonSteel => "Carbon Steel",
            Metal::AlloySteel => "Alloy Steel",
            Metal::Stainless304 => "Stainless 304",
            Metal::Stainless316 => "Stainless 316",
            Metal::DuplexStainless => "Duplex Stainless",
            Metal::ToolSteel => "Tool Steel",
            Metal::NickelAlloy625 => "Nickel Alloy 625",
            Metal::TitaniumGr5 => "Titanium Gr.5",
            Metal::Aluminum6061 => "Aluminum 6061",
            Metal::Copper => "Copper",
            Metal::Brass => "Brass",
        }
    }

    /// Nominal density in g/cm³
    pub fn density_g_cm3(&self) -> f64 {
        match self {
            Metal::CarbonSteel => 7.85,
            Metal::AlloySteel => 7.85,
            Metal::Stainless304 => 7.93,
            Metal::Stainless316 => 7.98,
            Metal::DuplexStainless => 7.80,
            Metal::ToolSteel => 7.72,
            Metal::NickelAlloy625 => 8.44,
            Metal::TitaniumGr5 => 4.43,
            Metal::Aluminum6061 => 2.70,
            Metal::Copper => 8.96,
            Metal::Brass => 8.50,
        }
    }

    /// Density as a typed unit
    pub fn density(&self) -> GramsPerCc {
        GramsPerCc(self.density_g_cm3())
    }

    /// Parse from a code or display name, ignoring case, spaces, dots and dashes
    pub fn from_str_flexible(s: &str) -> CalcResult<Self> {
        let key: String = s
            .chars()
            .filter(|c| !matches!(c, ' ' | '-' | '_' | '.'))
            .collect::<String>()
            .to_uppercase();

        Metal::ALL
            .iter()
            .copied()
            .find(|m| {
                let name: String = m
                    .display_name()
                    .chars()
                    .filter(|c| !matches!(c, ' ' | '-' | '_' | '.'))
                    .collect::<String>()
                    .to_uppercase();
                m.code() == key || name == key
            })
            .or(match key.as_str() {
                "STEEL" => Some(Metal::CarbonSteel),
                "STAINLESS" => Some(Metal::Stainless304),
                "INCONEL" | "INCONEL625" => Some(Metal::NickelAlloy625),
                "TI6AL4V" | "TITANIUM" => Some(Metal::TitaniumGr5),
                "ALUMINUM" | "ALUMINIUM" => Some(Metal::Aluminum6061),
                _ => None,
            })
            .ok_or_else(|| CalcError::material_not_found(s))
    }
}

impl FromStr for Metal {
    type Err = CalcError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Metal::from_str_flexible(s)
    }
}

impl std::fmt::Display for Metal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_steel_density() {
        assert_eq!(Metal::CarbonSteel.density_g_cm3(), 7.85);
        assert_eq!(Metal::CarbonSteel.density(), GramsPerCc(7.85));
    }

    #[test]
    fn test_all_densities_positive() {
        for metal in Metal::ALL {
            assert!(metal.density_g_cm3() > 0.0, "{} has no density", metal);
        }
    }

    #[test]
    fn test_parse_code_and_name() {
        assert_eq!("ss316".parse::<Metal>().unwrap(), Metal::Stainless316);
        assert_eq!("Titanium Gr.5".parse::<Metal>().unwrap(), Metal::TitaniumGr5);
        assert_eq!("carbon-steel".parse::<Metal>().unwrap(), Metal::CarbonSteel);
        assert_eq!("Inconel 625".parse::<Metal>().unwrap(), Metal::NickelAlloy625);
    }

    #[test]
    fn test_parse_unknown() {
        let err = "unobtainium".parse::<Metal>().unwrap_err();
        assert_eq!(err, CalcError::material_not_found("unobtainium"));
    }

    #[test]
    fn test_codes_match_serde() {
        for metal in Metal::ALL {
            let json = serde_json::to_string(&metal).unwrap();
            assert_eq!(json, format!("\"{}\"", metal.code()));
        }
    }
}
