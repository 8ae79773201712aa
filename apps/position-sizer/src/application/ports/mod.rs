//! Application Ports (Driver and Driven)
//!
//! Ports define interfaces for interacting with external systems.
//! - **Driven Ports** (Secondary/Outbound): How our application uses external systems

mod settings_store_port;

pub use settings_store_port::{InMemorySettingsStore, SettingKey, SettingsStorePort, StoreError};
