//! Error types for position sizing calculations.

use rust_decimal::Decimal;
use thiserror::Error;

/// Error during position sizing calculation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SizingError {
    /// Entry and stop are the same price, so risk per unit is zero.
    #[error("Stop-loss price and entry price cannot be equal ({price})")]
    EqualPrices {
        /// The shared price.
        price: Decimal,
    },

    /// The risk budget does not cover the risk of a single unit.
    #[error("Calculated quantity is 0: risk budget {risk_budget} is below risk per unit {risk_per_unit}")]
    ZeroQuantity {
        /// Amount of the balance allowed to be lost.
        risk_budget: Decimal,
        /// Loss per unit if the stop is hit.
        risk_per_unit: Decimal,
    },

    /// A field is outside its allowed range.
    #[error("Invalid {field}: {reason}")]
    InvalidInput {
        /// Name of the offending field.
        field: &'static str,
        /// What is wrong with it.
        reason: String,
    },
}

impl SizingError {
    /// Build an `InvalidInput` error.
    pub fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidInput {
            field,
            reason: reason.into(),
        }
    }
}
