//! Application Layer
//!
//! Orchestrates the domain: resolves form input against stored settings,
//! persists settings after a successful calculation, and keeps the state of
//! the sizing screen.

pub mod dto;
pub mod ports;
pub mod services;
pub mod use_cases;
