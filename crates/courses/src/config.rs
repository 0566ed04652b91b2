//! Configuration for the `splits` command.

use std::path::Path;

use pacing::config::PacingConfig;
use pacing::models::PacingStrategy;
use pacing::units::DistanceUnit;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config {path}: {source}")]
    Read {
        path: String,
        source: std::io::Error,
    },
    #[error("Invalid config: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Defaults applied when a flag is not given on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RunDefaults {
    pub distance_unit: DistanceUnit,
    pub pace_unit: DistanceUnit,
    pub strategy: PacingStrategy,
}

impl Default for RunDefaults {
    fn default() -> Self {
        Self {
            distance_unit: DistanceUnit::Mi,
            pace_unit: DistanceUnit::Mi,
            strategy: PacingStrategy::EvenPace,
        }
    }
}

/// Contents of a `splits.toml` file.
///
/// ```toml
/// [pacing]
/// natural_variation = 0.2
///
/// [defaults]
/// pace_unit = "km"
/// strategy = "even-effort"
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CliConfig {
    pub pacing: PacingConfig,
    pub defaults: RunDefaults,
}

impl CliConfig {
    pub fn from_toml(text: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(text)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_toml(&text)
    }
}
