//! Application Configuration Settings
//!
//! Configuration types for the calculator, loaded from environment variables.

use std::path::PathBuf;
use std::str::FromStr;

use rust_decimal::Decimal;

use crate::domain::position_sizing::PositionSizerConfig;

/// Environment variable naming the settings file.
pub const SETTINGS_PATH_VAR: &str = "POSITION_SIZER_SETTINGS_PATH";

/// Environment variable capping the accepted risk percentage.
pub const MAX_RISK_PCT_VAR: &str = "POSITION_SIZER_MAX_RISK_PCT";

/// Environment variable setting the height of the preview bar.
pub const PREVIEW_ROWS_VAR: &str = "POSITION_SIZER_PREVIEW_ROWS";

/// Preview bar settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PreviewSettings {
    /// Total rows of the rendered bar (take-profit plus stop-loss legs).
    pub rows: usize,
}

impl Default for PreviewSettings {
    fn default() -> Self {
        Self { rows: 12 }
    }
}

/// Complete application configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Location of the persisted settings file.
    pub settings_path: PathBuf,
    /// Sizing rules.
    pub sizer: PositionSizerConfig,
    /// Preview bar settings.
    pub preview: PreviewSettings,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            settings_path: PathBuf::from("./data/settings.json"),
            sizer: PositionSizerConfig::default(),
            preview: PreviewSettings::default(),
        }
    }
}

impl AppConfig {
    /// Create configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if a variable is set to an unusable value.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Create configuration from an arbitrary variable source.
    ///
    /// Unset or blank variables keep their defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if a variable is set to an unusable value.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let lookup = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let settings_path = lookup(SETTINGS_PATH_VAR).map_or(defaults.settings_path, PathBuf::from);

        let max_risk_percentage = match lookup(MAX_RISK_PCT_VAR) {
            Some(raw) => parse_value::<Decimal>(MAX_RISK_PCT_VAR, &raw)?,
            None => defaults.sizer.max_risk_percentage,
        };
        if max_risk_percentage <= Decimal::ZERO || max_risk_percentage > Decimal::ONE_HUNDRED {
            return Err(ConfigError::InvalidValue {
                key: MAX_RISK_PCT_VAR.to_string(),
                value: max_risk_percentage.to_string(),
                reason: "must be greater than 0 and at most 100".to_string(),
            });
        }

        let rows = match lookup(PREVIEW_ROWS_VAR) {
            Some(raw) => parse_value::<usize>(PREVIEW_ROWS_VAR, &raw)?,
            None => defaults.preview.rows,
        };
        if rows < 2 {
            return Err(ConfigError::InvalidValue {
                key: PREVIEW_ROWS_VAR.to_string(),
                value: rows.to_string(),
                reason: "must be at least 2".to_string(),
            });
        }

        Ok(Self {
            settings_path,
            sizer: PositionSizerConfig {
                max_risk_percentage,
            },
            preview: PreviewSettings { rows },
        })
    }
}

/// Configuration error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Environment variable holds a value that cannot be used.
    #[error("invalid value '{value}' for {key}: {reason}")]
    InvalidValue {
        /// Variable name.
        key: String,
        /// Offending value.
        value: String,
        /// Why it was rejected.
        reason: String,
    },
}

fn parse_value<T>(key: &str, raw: &str) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    raw.trim().parse().map_err(|e: T::Err| ConfigError::InvalidValue {
        key: key.to_string(),
        value: raw.to_string(),
        reason: e.to_string(),
    })
}
