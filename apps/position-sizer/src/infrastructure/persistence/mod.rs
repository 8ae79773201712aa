//! Persistence Adapters
//!
//! Storage implementations of the settings port.

pub mod json_file;

pub use json_file::JsonFileSettingsStore;
