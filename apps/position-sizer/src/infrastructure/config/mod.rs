//! Configuration Module
//!
//! Configuration loading for the calculator.

mod settings;

pub use settings::{
    AppConfig, ConfigError, MAX_RISK_PCT_VAR, PREVIEW_ROWS_VAR, PreviewSettings, SETTINGS_PATH_VAR,
};
