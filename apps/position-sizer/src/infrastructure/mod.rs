//! Infrastructure Layer
//!
//! Adapters around the application: environment configuration, the JSON
//! settings file, tracing setup and the terminal front end.

pub mod cli;
pub mod config;
pub mod persistence;
pub mod telemetry;
