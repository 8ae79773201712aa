//! Text rendering of the result panel, the preview bar and the settings panel.

use std::fmt::Write as _;

use crate::application::dto::{PositionReportDto, format_amount, format_percent, format_ratio};
use crate::application::use_cases::{PositionReport, StoredSettings};

const BAR_WIDTH: usize = 8;
const TAKE_PROFIT_FILL: char = '+';
const STOP_LOSS_FILL: char = '-';
const NOT_SET: &str = "(not set)";

/// Render the result panel followed by the preview bar.
#[must_use]
pub fn render_report(report: &PositionReport, preview_rows: usize) -> String {
    let dto = PositionReportDto::from(report);
    let arrow = if report.result.direction.is_long() { "↑" } else { "↓" };

    let mut out = String::new();
    let _ = writeln!(out, "Trade type    {} {arrow}", dto.direction);
    let _ = writeln!(out, "Entry price   {}", dto.entry_price);
    let _ = writeln!(out, "Quantity      {}", dto.quantity);
    let _ = writeln!(out, "Stop loss     {}", dto.stop_loss);
    let _ = writeln!(out, "Take profit   {}", dto.take_profit);
    let _ = writeln!(out, "Total risk    {}", dto.total_risk);
    let _ = writeln!(out, "Total profit  {}", dto.total_profit);
    let _ = writeln!(out, "Reward:risk   {}", dto.ratio);
    let _ = writeln!(out);
    let _ = writeln!(out, "Note: {}", dto.take_profit_hint);

    let preview = preview_lines(report, preview_rows);
    if !preview.is_empty() {
        let _ = writeln!(out);
        for line in preview {
            let _ = writeln!(out, "{}", line.trim_end());
        }
    }
    out
}

/// Lines of the preview bar, top to bottom.
///
/// The take-profit leg sits above the entry line for longs and below it for
/// shorts. Empty when the report carries no preview.
#[must_use]
pub fn preview_lines(report: &PositionReport, total_rows: usize) -> Vec<String> {
    let Some(preview) = report.preview else {
        return Vec::new();
    };
    let (tp_rows, sl_rows) = preview.rows(total_rows);
    let result = &report.result;

    let take_profit = Leg {
        fill: TAKE_PROFIT_FILL,
        rows: tp_rows,
        edge_label: format!("Take profit {}", format_amount(result.take_profit_price)),
        inner_label: format!(
            "Total profit {} ({})",
            format_amount(result.expected_profit),
            format_percent(preview.take_profit_pct)
        ),
    };
    let stop_loss = Leg {
        fill: STOP_LOSS_FILL,
        rows: sl_rows,
        edge_label: format!("Stop loss {}", format_amount(report.input.stop_loss)),
        inner_label: format!(
            "Total risk {} ({})",
            format_amount(result.total_risk),
            format_percent(preview.stop_loss_pct)
        ),
    };

    let (upper, lower) = if result.direction.is_long() {
        (take_profit, stop_loss)
    } else {
        (stop_loss, take_profit)
    };

    let mut lines = upper.lines(true);
    lines.push(format!(
        "{} Entry {}",
        "=".repeat(BAR_WIDTH),
        format_amount(report.input.entry_price)
    ));
    lines.extend(lower.lines(false));
    lines
}

/// Render the settings panel.
#[must_use]
pub fn render_settings(settings: &StoredSettings, open: bool) -> String {
    let show = |value: Option<String>| value.unwrap_or_else(|| NOT_SET.to_string());

    let mut out = String::new();
    let state = if open { "incomplete" } else { "saved" };
    let _ = writeln!(out, "Settings ({state})");
    let _ = writeln!(
        out,
        "  Reward:risk ratio  {}",
        show(settings.reward_to_risk_ratio.map(format_ratio))
    );
    let _ = writeln!(
        out,
        "  Risk per trade     {}",
        show(settings.risk_percentage.map(format_percent))
    );
    let _ = writeln!(
        out,
        "  Account balance    {}",
        show(settings.account_balance.map(format_amount))
    );
    out
}

struct Leg {
    fill: char,
    rows: usize,
    edge_label: String,
    inner_label: String,
}

impl Leg {
    /// `edge_first` puts the price label on the first row (leg above entry).
    fn lines(&self, edge_first: bool) -> Vec<String> {
        let bar: String = std::iter::repeat_n(self.fill, BAR_WIDTH).collect();
        let mut lines = vec![bar; self.rows];
        let last = self.rows.saturating_sub(1);
        let (edge, inner) = if edge_first { (0, last) } else { (last, 0) };

        if edge == inner {
            if let Some(line) = lines.get_mut(edge) {
                let _ = write!(line, " {}  {}", self.edge_label, self.inner_label);
            }
            return lines;
        }
        if let Some(line) = lines.get_mut(edge) {
            let _ = write!(line, " {}", self.edge_label);
        }
        if let Some(line) = lines.get_mut(inner) {
            let _ = write!(line, " {}", self.inner_label);
        }
        lines
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::position_sizing::{PositionSizer, PreviewProportions, TradeInput};
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    fn report(entry: Decimal, stop: Decimal, ratio: Decimal) -> PositionReport {
        let input = TradeInput {
            entry_price: entry,
            stop_loss: stop,
            account_balance: dec!(10000),
            risk_percentage: dec!(1),
            reward_to_risk_ratio: ratio,
        };
        PositionReport {
            input,
            result: PositionSizer::default().compute_position(&input).unwrap(),
            preview: PreviewProportions::from_ratio(ratio),
        }
    }

    #[test]
    fn panel_lists_copyable_values() {
        let text = render_report(&report(dec!(100), dec!(95), dec!(2)), 12);
        assert!(text.contains("Trade type    Long ↑"));
        assert!(text.contains("Quantity      20"));
        assert!(text.contains("Take profit   $110"));
        assert!(text.contains("Total risk    $100"));
        assert!(text.contains("Total profit  $200"));
        assert!(text.contains("Reward:risk   2 : 1"));
        assert!(text.contains("resistance"));
    }

    #[test]
    fn long_preview_has_take_profit_on_top() {
        let lines = preview_lines(&report(dec!(100), dec!(95), dec!(2)), 12);
        assert_eq!(lines.len(), 13);
        assert!(lines[0].starts_with("++++++++ Take profit $110"));
        assert!(lines[7].contains("Total profit $200 (66.67%)"));
        assert!(lines[8].starts_with("======== Entry $100"));
        assert!(lines[9].contains("Total risk $100 (33.33%)"));
        assert!(lines[12].contains("Stop loss $95"));
    }

    #[test]
    fn short_preview_is_flipped() {
        let lines = preview_lines(&report(dec!(50), dec!(55), dec!(3)), 8);
        assert_eq!(lines.len(), 9);
        assert!(lines[0].starts_with("-------- Stop loss $55"));
        assert!(lines[1].contains("Total risk $100 (25%)"));
        assert!(lines[2].starts_with("======== Entry $50"));
        assert!(lines[3].contains("Total profit $300 (75%)"));
        assert!(lines[8].contains("Take profit $35"));
    }

    #[test]
    fn single_row_leg_carries_both_labels() {
        let lines = preview_lines(&report(dec!(50), dec!(55), dec!(3)), 4);
        assert!(lines[0].contains("Stop loss $55"));
        assert!(lines[0].contains("Total risk $100"));
    }

    #[test]
    fn settings_panel_marks_missing_values() {
        let settings = StoredSettings {
            reward_to_risk_ratio: Some(dec!(2)),
            risk_percentage: None,
            account_balance: Some(dec!(10000)),
        };
        let text = render_settings(&settings, true);
        assert!(text.contains("Settings (incomplete)"));
        assert!(text.contains("2 : 1"));
        assert!(text.contains("Risk per trade     (not set)"));
        assert!(text.contains("$10000"));
    }
}
