//! Display values of the result panel.
//!
//! Every field is the exact string a user would copy.

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

use crate::application::use_cases::PositionReport;

/// Format a currency amount as `$` followed by the value rounded to cents.
///
/// Trailing zeros are dropped (`110` -> `$110`, `12.50` -> `$12.5`) and an
/// amount that rounds to zero cents formats as an empty string.
#[must_use]
pub fn format_amount(value: Decimal) -> String {
    let cents = value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    if cents.is_zero() {
        return String::new();
    }
    format!("${}", cents.normalize())
}

/// Format a reward:risk ratio as `<ratio> : 1`.
#[must_use]
pub fn format_ratio(ratio: Decimal) -> String {
    format!("{} : 1", ratio.normalize())
}

/// Format a percentage with at most two decimals.
#[must_use]
pub fn format_percent(value: Decimal) -> String {
    format!("{}%", value.round_dp(2).normalize())
}

/// Copyable values of one report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PositionReportDto {
    /// `Long` or `Short`.
    pub direction: String,
    /// Entry price.
    pub entry_price: String,
    /// Units to buy.
    pub quantity: u64,
    /// Stop-loss price.
    pub stop_loss: String,
    /// Take-profit price.
    pub take_profit: String,
    /// Advisory shown next to the take-profit price.
    pub take_profit_hint: String,
    /// Loss if the stop is hit.
    pub total_risk: String,
    /// Gain if take-profit is hit.
    pub total_profit: String,
    /// Reward:risk ratio.
    pub ratio: String,
    /// Take-profit share of the preview bar.
    pub preview_take_profit: Option<String>,
    /// Stop-loss share of the preview bar.
    pub preview_stop_loss: Option<String>,
}

impl From<&PositionReport> for PositionReportDto {
    fn from(report: &PositionReport) -> Self {
        let result = &report.result;
        Self {
            direction: result.direction.to_string(),
            entry_price: format_amount(report.input.entry_price),
            quantity: result.quantity,
            stop_loss: format_amount(report.input.stop_loss),
            take_profit: format_amount(result.take_profit_price),
            take_profit_hint: result.direction.take_profit_hint().to_string(),
            total_risk: format_amount(result.total_risk),
            total_profit: format_amount(result.expected_profit),
            ratio: format_ratio(report.input.reward_to_risk_ratio),
            preview_take_profit: report.preview.map(|p| format_percent(p.take_profit_pct)),
            preview_stop_loss: report.preview.map(|p| format_percent(p.stop_loss_pct)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::position_sizing::{
        PositionSizer, PreviewProportions, TradeDirection, TradeInput,
    };
    use rust_decimal_macros::dec;
    use test_case::test_case;

    #[test_case(dec!(110), "$110" ; "whole amount")]
    #[test_case(dec!(12.50), "$12.5" ; "trailing zero dropped")]
    #[test_case(dec!(1.005), "$1.01" ; "midpoint rounds up")]
    #[test_case(dec!(99.994), "$99.99" ; "rounds down below midpoint")]
    #[test_case(dec!(10000), "$10000" ; "no thousands separator")]
    #[test_case(dec!(0), "" ; "zero is blank")]
    #[test_case(dec!(0.004), "" ; "sub cent rounds to blank")]
    #[test_case(dec!(0.005), "$0.01" ; "half cent rounds up")]
    fn amount_formatting(value: Decimal, expected: &str) {
        assert_eq!(format_amount(value), expected);
    }

    #[test]
    fn ratio_formatting() {
        assert_eq!(format_ratio(dec!(2)), "2 : 1");
        assert_eq!(format_ratio(dec!(2.50)), "2.5 : 1");
    }

    #[test]
    fn percent_formatting() {
        let p = PreviewProportions::from_ratio(dec!(2)).unwrap();
        assert_eq!(format_percent(p.take_profit_pct), "66.67%");
        assert_eq!(format_percent(p.stop_loss_pct), "33.33%");
    }

    #[test]
    fn dto_from_report() {
        let input = TradeInput {
            entry_price: dec!(50),
            stop_loss: dec!(55),
            account_balance: dec!(10000),
            risk_percentage: dec!(2),
            reward_to_risk_ratio: dec!(3),
        };
        let result = PositionSizer::default().compute_position(&input).unwrap();
        let report = PositionReport {
            input,
            result,
            preview: PreviewProportions::from_ratio(input.reward_to_risk_ratio),
        };

        let dto = PositionReportDto::from(&report);
        assert_eq!(dto.direction, "Short");
        assert_eq!(dto.entry_price, "$50");
        assert_eq!(dto.quantity, 40);
        assert_eq!(dto.stop_loss, "$55");
        assert_eq!(dto.take_profit, "$35");
        assert_eq!(dto.total_risk, "$200");
        assert_eq!(dto.total_profit, "$600");
        assert_eq!(dto.ratio, "3 : 1");
        assert_eq!(dto.preview_take_profit.as_deref(), Some("75%"));
        assert_eq!(dto.preview_stop_loss.as_deref(), Some("25%"));
        assert_eq!(
            dto.take_profit_hint,
            TradeDirection::Short.take_profit_hint()
        );
    }
}
