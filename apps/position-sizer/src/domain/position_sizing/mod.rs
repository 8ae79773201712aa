//! Risk-based position sizing.
//!
//! Turns an entry price, a stop-loss, an account balance, a risk percentage
//! and a reward:risk ratio into a whole number of units, the capital at risk,
//! a take-profit target and the expected profit.
//!
//! # Example
//!
//! ```rust
//! use position_sizer::domain::position_sizing::{PositionSizer, TradeDirection, TradeInput};
//! use rust_decimal_macros::dec;
//!
//! let input = TradeInput {
//!     entry_price: dec!(100),
//!     stop_loss: dec!(95),
//!     account_balance: dec!(10000),
//!     risk_percentage: dec!(1),
//!     reward_to_risk_ratio: dec!(2),
//! };
//!
//! let result = PositionSizer::default().compute_position(&input).unwrap();
//! assert_eq!(result.direction, TradeDirection::Long);
//! assert_eq!(result.quantity, 20); // 1% of 10k = 100 / 5 per unit
//! assert_eq!(result.take_profit_price, dec!(110));
//! ```

mod error;
mod preview;
mod sizer;
mod types;

pub use error::SizingError;
pub use preview::PreviewProportions;
pub use sizer::{PositionSizer, PositionSizerConfig};
pub use types::{TradeDirection, TradeInput, TradeResult};
