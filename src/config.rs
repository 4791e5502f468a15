//! Estimator configuration: threshold table, parameter catalog, request defaults and
//! provider settings.
//!
//! Everything has a default, so an empty TOML file (or no file at all) is a valid
//! configuration:
//!
//! ```toml
//! catalog = ["T2M", "PRECTOTCORR", "WS2M", "RH2M"]
//! default_tolerance_days = 10
//!
//! [default_years]
//! start = 2010
//! end = 2024
//!
//! [thresholds]
//! very_hot = 38.0
//!
//! [provider]
//! timeout_secs = 60
//! ```

use crate::types::parameter::{Condition, ParameterCatalog};
use crate::types::year_range::YearRange;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

pub const DEFAULT_POWER_URL: &str = "https://power.larc.nasa.gov/api/temporal/daily/point";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file '{0}'")]
    Read(PathBuf, #[source] std::io::Error),

    #[error("Failed to parse config file '{0}'")]
    Parse(PathBuf, #[source] toml::de::Error),

    #[error("Parameter catalog is empty")]
    EmptyCatalog,

    #[error("Default year range {start}-{end} is inverted")]
    InvertedYears { start: i32, end: i32 },

    #[error("Provider timeout must be greater than zero")]
    ZeroTimeout,
}

/// Limits for the "very" conditions. Samples strictly beyond a limit count as exceeding it.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Thresholds {
    /// °C, exceeded when above.
    pub very_hot: f64,
    /// °C, exceeded when below.
    pub very_cold: f64,
    /// m/s
    pub very_windy: f64,
    /// mm/day
    pub very_wet: f64,
    /// % relative humidity
    pub very_uncomfortable: f64,
}

impl Thresholds {
    pub fn limit(&self, condition: Condition) -> f64 {
        match condition {
            Condition::VeryHot => self.very_hot,
            Condition::VeryCold => self.very_cold,
            Condition::VeryWindy => self.very_windy,
            Condition::VeryWet => self.very_wet,
            Condition::VeryUncomfortable => self.very_uncomfortable,
        }
    }
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            very_hot: 35.0,
            very_cold: -10.0,
            very_windy: 10.0,
            very_wet: 10.0,
            very_uncomfortable: 80.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ProviderConfig {
    pub base_url: String,
    /// NASA POWER user community tag.
    pub community: String,
    pub timeout_secs: u64,
}

impl ProviderConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_POWER_URL.to_string(),
            community: "RE".to_string(),
            timeout_secs: 30,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EstimatorConfig {
    pub thresholds: Thresholds,
    pub catalog: ParameterCatalog,
    pub default_years: YearRange,
    pub default_tolerance_days: u32,
    pub provider: ProviderConfig,
}

impl Default for EstimatorConfig {
    fn default() -> Self {
        Self {
            thresholds: Thresholds::default(),
            catalog: ParameterCatalog::default(),
            default_years: YearRange {
                start: 2015,
                end: 2024,
            },
            default_tolerance_days: 7,
            provider: ProviderConfig::default(),
        }
    }
}

impl EstimatorConfig {
    /// Parses and validates a TOML document.
    pub fn from_toml_str(source: &str, origin: &Path) -> Result<Self, ConfigError> {
        let config: EstimatorConfig =
            toml::from_str(source).map_err(|e| ConfigError::Parse(origin.to_path_buf(), e))?;
        config.validate()?;
        Ok(config)
    }

    /// Reads, parses and validates a TOML config file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let source = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::Read(path.to_path_buf(), e))?;
        Self::from_toml_str(&source, path)
    }

    /// Loads `path` if given, otherwise returns the defaults.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(path) => Self::from_file(path),
            None => Ok(Self::default()),
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.catalog.is_empty() {
            return Err(ConfigError::EmptyCatalog);
        }
        if self.default_years.start > self.default_years.end {
            return Err(ConfigError::InvertedYears {
                start: self.default_years.start,
                end: self.default_years.end,
            });
        }
        if self.provider.timeout_secs == 0 {
            return Err(ConfigError::ZeroTimeout);
        }
        Ok(())
    }
}
