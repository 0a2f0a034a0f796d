//! Analysis settings — windows, strategy, seed, cycle length.
//!
//! Stored as a TOML file whose keys mirror the JSON settings contract
//! (`historicalWindowSeconds`, `forecastWindowSeconds`, `strategyKey`, ...).
//! Missing keys take their defaults.

use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

use crate::strategies;
use crate::summary::{SummaryConfig, DEFAULT_CYCLE_LENGTH};

pub const SECONDS_PER_DAY: u64 = 86_400;

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("read settings file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("parse settings TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("serialize settings: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("unknown strategy key '{0}'")]
    UnknownStrategy(String),

    #[error("{field} must be greater than zero")]
    NonPositive { field: &'static str },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AnalysisSettings {
    pub historical_window_seconds: u64,
    /// Zero means no forecast.
    pub forecast_window_seconds: u64,
    pub strategy_key: String,
    /// `None` draws from OS entropy.
    pub seed: Option<u64>,
    pub cycle_length: u32,
}

impl Default for AnalysisSettings {
    fn default() -> Self {
        Self {
            historical_window_seconds: SECONDS_PER_DAY,
            forecast_window_seconds: SECONDS_PER_DAY,
            strategy_key: "trend".into(),
            seed: Some(42),
            cycle_length: DEFAULT_CYCLE_LENGTH,
        }
    }
}

impl AnalysisSettings {
    /// Load and validate settings from a TOML file.
    pub fn load(path: &Path) -> Result<Self, SettingsError> {
        let content = std::fs::read_to_string(path).map_err(|source| SettingsError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_toml_str(&content)
    }

    /// Parse and validate settings from a TOML string.
    pub fn from_toml_str(content: &str) -> Result<Self, SettingsError> {
        let settings: Self = toml::from_str(content)?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn to_toml(&self) -> Result<String, SettingsError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Reject unknown strategy keys and empty windows.
    ///
    /// The pipeline itself tolerates an unknown key (it holds); validation is
    /// for settings that come from a file or the command line.
    pub fn validate(&self) -> Result<(), SettingsError> {
        if self.historical_window_seconds == 0 {
            return Err(SettingsError::NonPositive {
                field: "historicalWindowSeconds",
            });
        }
        if self.cycle_length == 0 {
            return Err(SettingsError::NonPositive {
                field: "cycleLength",
            });
        }
        if strategies::lookup(&self.strategy_key).is_none() {
            return Err(SettingsError::UnknownStrategy(self.strategy_key.clone()));
        }
        Ok(())
    }

    pub fn historical_days(&self) -> usize {
        seconds_to_days(self.historical_window_seconds)
    }

    pub fn forecast_days(&self) -> usize {
        seconds_to_days(self.forecast_window_seconds)
    }

    pub fn summary_config(&self) -> SummaryConfig {
        SummaryConfig {
            cycle_length: self.cycle_length,
        }
    }
}

/// Whole days covering `seconds`, rounding up.
pub fn seconds_to_days(seconds: u64) -> usize {
    seconds.div_ceil(SECONDS_PER_DAY) as usize
}
