//! Domain Layer
//!
//! The innermost layer containing business logic with zero infrastructure dependencies.
//!
//! # Bounded Contexts
//!
//! - [`position_sizing`]: Risk-based sizing, take-profit targets, preview split

pub mod position_sizing;
