//! Settings file loading.
//!
//! Settings are JSON. The file is optional; every field has a default.
//! The review API key is deliberately not part of the file and comes from
//! `GOOGLE_API_KEY` (or a `.env` file) instead.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use directories::ProjectDirs;
use forge_core::review::DEFAULT_INSTRUCTIONS;
use forge_core::{DensitySource, ReviewSettings};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Defaults applied to `forge weight` when a flag is omitted
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EstimateDefaults {
    /// Density used when neither --density nor --material is given
    pub density: DensitySource,
    /// Price per kg used when --price is omitted
    pub unit_price_per_kg: f64,
    /// Currency label for printed costs
    pub currency: String,
}

impl Default for EstimateDefaults {
    fn default() -> Self {
        EstimateDefaults {
            density: DensitySource::default(),
            unit_price_per_kg: 0.0,
            currency: "KRW".to_string(),
        }
    }
}

/// Top-level settings file
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub review: ReviewSettings,
    pub defaults: EstimateDefaults,
}

impl Settings {
    /// Load settings.
    ///
    /// An explicit path must exist. Otherwise the per-user config file is
    /// used when present, and built-in defaults when not.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        let path = match explicit {
            Some(path) => Some(path.to_path_buf()),
            None => default_path().filter(|p| p.exists()),
        };

        let settings = match path {
            Some(path) => {
                debug!(path = %path.display(), "loading settings");
                Self::from_file(&path)?
            }
            None => {
                debug!("no settings file, using defaults");
                Settings::default()
            }
        };

        settings.review.validate().context("Invalid review settings")?;
        Ok(settings)
    }

    /// Parse a settings file
    pub fn from_file(path: &Path) -> Result<Self> {
        let contents =
            fs::read_to_string(path).with_context(|| format!("Failed to read settings file {}", path.display()))?;
        serde_json::from_str(&contents).with_context(|| format!("Invalid JSON in settings file {}", path.display()))
    }

    /// Review instructions: an explicit file, else the configured file, else the built-in text
    pub fn instructions(&self, explicit: Option<&Path>) -> Result<String> {
        match explicit.or(self.review.instructions_path.as_deref()) {
            Some(path) => fs::read_to_string(path)
                .with_context(|| format!("Failed to read instructions file {}", path.display())),
            None => Ok(DEFAULT_INSTRUCTIONS.to_string()),
        }
    }
}

/// `<config dir>/forgequote/settings.json`
pub fn default_path() -> Option<PathBuf> {
    ProjectDirs::from("", "", "forgequote").map(|dirs| dirs.config_dir().join("settings.json"))
}
