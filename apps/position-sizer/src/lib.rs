// Allow unwrap/expect in tests - tests should panic on unexpected errors
#![cfg_attr(
    test,
    allow(
        clippy::unwrap_used,
        clippy::expect_used,
        clippy::too_many_lines,
        clippy::needless_pass_by_value,
        clippy::items_after_statements
    )
)]

//! Position Sizer - Rust Core Library
//!
//! Risk-based position sizing: how many units to trade so that hitting the
//! stop loses a fixed share of the account, and where to take profit for a
//! chosen reward:risk ratio.
//!
//! # Architecture (Clean Architecture + Hexagonal)
//!
//! ## Layers (inside → outside)
//!
//! - **Domain**: Pure sizing rules
//!   - `position_sizing`: `PositionSizer`, trade direction, preview split
//!
//! - **Application**: Use cases and orchestration
//!   - `ports`: `SettingsStorePort` for the remembered settings
//!   - `use_cases`: `CalculatePosition`
//!   - `services`: `SizingSession` (state of the sizing screen)
//!   - `dto`: Display strings of the result panel
//!
//! - **Infrastructure**: Adapters (implementations)
//!   - `config`: Environment configuration
//!   - `persistence`: JSON file settings store
//!   - `telemetry`: Tracing subscriber
//!   - `cli`: Terminal front end

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::pedantic)]

// =============================================================================
// Clean Architecture Layers
// =============================================================================

/// Domain layer - Core business logic with no external dependencies.
pub mod domain;

/// Application layer - Use cases and port definitions.
pub mod application;

/// Infrastructure layer - Adapters and external integrations.
pub mod infrastructure;

// =============================================================================
// Re-exports from Clean Architecture
// =============================================================================

// Domain re-exports
pub use domain::position_sizing::{
    PositionSizer, PositionSizerConfig, PreviewProportions, SizingError, TradeDirection,
    TradeInput, TradeResult,
};

// Application re-exports
pub use application::dto::{PositionReportDto, format_amount, format_ratio};
pub use application::ports::{InMemorySettingsStore, SettingKey, SettingsStorePort, StoreError};
pub use application::services::SizingSession;
pub use application::use_cases::{
    CalculateError, CalculatePositionUseCase, PositionForm, PositionReport, StoredSettings,
};

// Infrastructure re-exports
pub use infrastructure::config::{AppConfig, ConfigError};
pub use infrastructure::persistence::JsonFileSettingsStore;
