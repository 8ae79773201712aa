//! Core types for risk-based position sizing.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Side of the trade, derived from where the stop sits relative to entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TradeDirection {
    /// Stop below entry: profit as price rises.
    Long,
    /// Stop above entry: profit as price falls.
    Short,
}

impl TradeDirection {
    /// Direction implied by an entry/stop pair.
    ///
    /// `Long` iff the stop is strictly below the entry.
    #[must_use]
    pub fn from_prices(entry_price: Decimal, stop_loss: Decimal) -> Self {
        if stop_loss < entry_price {
            Self::Long
        } else {
            Self::Short
        }
    }

    /// Returns true for long trades.
    #[must_use]
    pub const fn is_long(&self) -> bool {
        matches!(self, Self::Long)
    }

    /// Advisory shown next to the take-profit price.
    #[must_use]
    pub const fn take_profit_hint(&self) -> &'static str {
        match self {
            Self::Long => {
                "The take-profit price may sit above a significant resistance level. \
                 Check that this target makes sense; if not, adjust the reward:risk ratio."
            }
            Self::Short => {
                "The take-profit price may sit below a significant support level. \
                 Check that this target makes sense; if not, adjust the reward:risk ratio."
            }
        }
    }
}

impl fmt::Display for TradeDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Long => write!(f, "Long"),
            Self::Short => write!(f, "Short"),
        }
    }
}

/// Input parameters for one sizing calculation.
///
/// All prices and amounts share the account currency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TradeInput {
    /// Price at which the position is opened.
    pub entry_price: Decimal,
    /// Price at which the position is closed to cap the loss.
    pub stop_loss: Decimal,
    /// Total account balance.
    pub account_balance: Decimal,
    /// Share of the balance to risk, in percentage points (1 = 1%).
    pub risk_percentage: Decimal,
    /// Target reward per unit of risk (2 = 2:1).
    pub reward_to_risk_ratio: Decimal,
}

impl TradeInput {
    /// Amount of the balance the trade may lose.
    #[must_use]
    pub fn risk_budget(&self) -> Decimal {
        self.risk_percentage / Decimal::ONE_HUNDRED * self.account_balance
    }

    /// Distance between entry and stop.
    #[must_use]
    pub fn risk_per_unit(&self) -> Decimal {
        (self.entry_price - self.stop_loss).abs()
    }
}

/// Result of a successful sizing calculation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TradeResult {
    /// Long or short.
    pub direction: TradeDirection,
    /// Loss per unit if the stop is hit.
    pub risk_per_unit: Decimal,
    /// Units to buy (or sell short). Always at least 1.
    pub quantity: u64,
    /// Loss on the whole position if the stop is hit.
    pub total_risk: Decimal,
    /// Exit price for the planned gain.
    pub take_profit_price: Decimal,
    /// Gain on the whole position if take-profit is hit.
    pub expected_profit: Decimal,
}
