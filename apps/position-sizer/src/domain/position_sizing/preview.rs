//! Risk/reward split of the position preview bar.

use rust_decimal::Decimal;
use rust_decimal::prelude::*;
use serde::{Deserialize, Serialize};

/// Share of the preview bar given to the take-profit and stop-loss legs.
///
/// Both legs are percentages of the bar and always sum to 100.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PreviewProportions {
    /// Height of the take-profit leg, in percent.
    pub take_profit_pct: Decimal,
    /// Height of the stop-loss leg, in percent.
    pub stop_loss_pct: Decimal,
}

impl PreviewProportions {
    /// Split for a reward:risk ratio. `None` when the ratio is not positive.
    #[must_use]
    pub fn from_ratio(ratio: Decimal) -> Option<Self> {
        if ratio <= Decimal::ZERO {
            return None;
        }
        let legs = ratio + Decimal::ONE;
        let stop_loss_pct = Decimal::ONE_HUNDRED.checked_div(legs)?;
        Some(Self {
            take_profit_pct: Decimal::ONE_HUNDRED - stop_loss_pct,
            stop_loss_pct,
        })
    }

    /// Split a bar of `total` rows into (take-profit rows, stop-loss rows).
    ///
    /// Each leg keeps at least one row; `total` below 2 is treated as 2.
    #[must_use]
    pub fn rows(&self, total: usize) -> (usize, usize) {
        let total = total.max(2);
        let scaled = Decimal::from(total) * self.take_profit_pct / Decimal::ONE_HUNDRED;
        let take_profit = scaled
            .round()
            .to_usize()
            .unwrap_or(total)
            .clamp(1, total - 1);
        (take_profit, total - take_profit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn two_to_one_split() {
        let p = PreviewProportions::from_ratio(dec!(2)).unwrap();
        assert_eq!(p.take_profit_pct.round_dp(2), dec!(66.67));
        assert_eq!(p.stop_loss_pct.round_dp(2), dec!(33.33));
        assert_eq!(p.take_profit_pct + p.stop_loss_pct, dec!(100));
    }

    #[test]
    fn even_split_for_one_to_one() {
        let p = PreviewProportions::from_ratio(dec!(1)).unwrap();
        assert_eq!(p.take_profit_pct, dec!(50));
        assert_eq!(p.stop_loss_pct, dec!(50));
        assert_eq!(p.rows(10), (5, 5));
    }

    #[test]
    fn non_positive_ratio_has_no_preview() {
        assert!(PreviewProportions::from_ratio(dec!(0)).is_none());
        assert!(PreviewProportions::from_ratio(dec!(-1)).is_none());
    }

    #[test]
    fn rows_keep_both_legs_visible() {
        let p = PreviewProportions::from_ratio(dec!(100)).unwrap();
        assert_eq!(p.rows(12), (11, 1));

        let p = PreviewProportions::from_ratio(dec!(0.01)).unwrap();
        assert_eq!(p.rows(12), (1, 11));

        assert_eq!(p.rows(0), (1, 1));
    }

    #[test]
    fn rows_follow_ratio() {
        let p = PreviewProportions::from_ratio(dec!(3)).unwrap();
        assert_eq!(p.rows(12), (9, 3));
    }
}
