//! Core position sizing logic.

use rust_decimal::Decimal;
use rust_decimal::prelude::*;

use super::error::SizingError;
use super::types::{TradeDirection, TradeInput, TradeResult};

/// Configuration for position sizing behavior.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PositionSizerConfig {
    /// Largest accepted risk percentage (inclusive).
    pub max_risk_percentage: Decimal,
}

impl Default for PositionSizerConfig {
    fn default() -> Self {
        Self {
            max_risk_percentage: Decimal::ONE_HUNDRED,
        }
    }
}

/// Position sizer implementing deterministic risk-based sizing.
#[derive(Debug, Clone, Copy, Default)]
pub struct PositionSizer {
    config: PositionSizerConfig,
}

impl PositionSizer {
    /// Create a new position sizer with custom configuration.
    #[must_use]
    pub const fn with_config(config: PositionSizerConfig) -> Self {
        Self { config }
    }

    /// Size a position so that hitting the stop loses at most the risk budget.
    ///
    /// # Errors
    ///
    /// Returns error if:
    /// - Any input is non-positive, or the risk percentage exceeds the maximum
    /// - Entry and stop are equal
    /// - The risk budget cannot cover a single unit
    /// - The position or its target falls outside the decimal range
    pub fn compute_position(&self, input: &TradeInput) -> Result<TradeResult, SizingError> {
        self.validate_input(input)?;

        if input.entry_price == input.stop_loss {
            return Err(SizingError::EqualPrices {
                price: input.entry_price,
            });
        }

        let direction = TradeDirection::from_prices(input.entry_price, input.stop_loss);
        let risk_per_unit = input.risk_per_unit();
        let risk_budget = input.risk_budget();

        let quantity = Self::floor_quantity(risk_budget, risk_per_unit)?;
        if quantity == 0 {
            tracing::debug!(%risk_budget, %risk_per_unit, "Risk budget below one unit");
            return Err(SizingError::ZeroQuantity {
                risk_budget,
                risk_per_unit,
            });
        }

        let total_risk = Decimal::from(quantity)
            .checked_mul(risk_per_unit)
            .ok_or_else(|| Self::quantity_out_of_range(risk_budget, risk_per_unit))?;
        let expected_profit = input
            .reward_to_risk_ratio
            .checked_mul(total_risk)
            .ok_or_else(Self::ratio_out_of_range)?;

        let target_distance = risk_per_unit
            .checked_mul(input.reward_to_risk_ratio)
            .ok_or_else(Self::ratio_out_of_range)?;
        let take_profit_price = match direction {
            TradeDirection::Long => input.entry_price.checked_add(target_distance),
            TradeDirection::Short => input.entry_price.checked_sub(target_distance),
        }
        .ok_or_else(Self::ratio_out_of_range)?;

        tracing::debug!(
            %direction,
            quantity,
            %total_risk,
            %take_profit_price,
            %expected_profit,
            "Position sized"
        );

        Ok(TradeResult {
            direction,
            risk_per_unit,
            quantity,
            total_risk,
            take_profit_price,
            expected_profit,
        })
    }

    fn validate_input(&self, input: &TradeInput) -> Result<(), SizingError> {
        let positive = [
            ("entry_price", input.entry_price),
            ("stop_loss", input.stop_loss),
            ("account_balance", input.account_balance),
            ("risk_percentage", input.risk_percentage),
            ("reward_to_risk_ratio", input.reward_to_risk_ratio),
        ];

        for (field, value) in positive {
            if value <= Decimal::ZERO {
                return Err(SizingError::invalid(
                    field,
                    format!("must be positive, got {value}"),
                ));
            }
        }

        if input.risk_percentage > self.config.max_risk_percentage {
            return Err(SizingError::invalid(
                "risk_percentage",
                format!(
                    "{}% exceeds maximum of {}%",
                    input.risk_percentage, self.config.max_risk_percentage
                ),
            ));
        }

        Ok(())
    }

    /// Largest whole number of units whose total risk stays within the budget.
    fn floor_quantity(risk_budget: Decimal, risk_per_unit: Decimal) -> Result<u64, SizingError> {
        let mut quantity = risk_budget
            .checked_div(risk_per_unit)
            .and_then(|raw| raw.floor().to_u64())
            .ok_or_else(|| Self::quantity_out_of_range(risk_budget, risk_per_unit))?;

        // The quotient is rounded to 28 significant digits and may land on the
        // next integer up.
        let overshoots = Decimal::from(quantity)
            .checked_mul(risk_per_unit)
            .is_none_or(|total| total > risk_budget);
        if quantity > 0 && overshoots {
            quantity -= 1;
        }
        Ok(quantity)
    }

    fn quantity_out_of_range(risk_budget: Decimal, risk_per_unit: Decimal) -> SizingError {
        SizingError::invalid(
            "account_balance",
            format!(
                "risk budget {risk_budget} buys more units than can be counted at {risk_per_unit} risk per unit"
            ),
        )
    }

    fn ratio_out_of_range() -> SizingError {
        SizingError::invalid("reward_to_risk_ratio", "take-profit target is out of range")
    }
}
