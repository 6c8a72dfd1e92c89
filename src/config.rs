//! Settings shared by the sampling and integration helpers.
use crate::palette::{Palette, DEFAULT_SEED};

use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use thiserror::Error;

/// Errors that can occur while loading [`Settings`].
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The settings file could not be read.
    #[error("unable to read settings: {0}")]
    Io(#[from] std::io::Error),

    /// The settings are not valid JSON or have the wrong shape.
    #[error("unable to parse settings: {0}")]
    Json(#[from] serde_json::Error),

    /// Quadrature needs at least one point.
    #[error("evals must be positive")]
    InvalidEvals,
}

/// Run settings. Missing fields take their default values.
///
/// ```json
/// { "concurrency": 4, "evals": 200, "palette_seed": 1 }
/// ```
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    /// Number of worker threads, values up to one mean sequential evaluation.
    pub concurrency: usize,
    /// Number of quadrature points for expected values.
    pub evals: usize,
    /// Seed of the random part of the color palette.
    pub palette_seed: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            concurrency: 1,
            evals: 100,
            palette_seed: DEFAULT_SEED,
        }
    }
}

impl Settings {
    /// Parses and validates settings from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let settings: Self = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Reads and validates settings from a JSON file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let reader = BufReader::new(File::open(path)?);
        let settings: Self = serde_json::from_reader(reader)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Checks that the settings can be used.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.evals == 0 {
            return Err(ConfigError::InvalidEvals);
        }

        Ok(())
    }

    /// Builds the color palette for the configured seed.
    pub fn palette(&self) -> Palette {
        Palette::new(self.palette_seed)
    }
}
