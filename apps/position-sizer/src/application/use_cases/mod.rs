//! Application Use Cases
//!
//! Use cases orchestrate domain logic to fulfill application requirements.

mod calculate_position;

pub use calculate_position::{
    CalculateError, CalculatePositionUseCase, PositionForm, PositionReport, StoredSettings,
};
