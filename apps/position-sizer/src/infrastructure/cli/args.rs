//! Command line surface.

use std::path::PathBuf;
use std::str::FromStr;

use clap::{Args, Parser, Subcommand};
use rust_decimal::Decimal;

use crate::application::use_cases::PositionForm;

/// Risk-based position sizing calculator.
#[derive(Parser, Debug)]
#[command(name = "position-sizer")]
#[command(version)]
#[command(
    about = "Size a trade from entry, stop, balance, risk % and reward:risk ratio",
    long_about = None
)]
pub struct Cli {
    /// Command to run
    #[command(subcommand)]
    pub command: Commands,

    /// Settings file (overrides POSITION_SIZER_SETTINGS_PATH)
    #[arg(long, global = true)]
    pub settings_path: Option<PathBuf>,
}

/// Available commands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Size one trade and show the result panel
    Calc(CalcArgs),

    /// Inspect or reset the saved settings
    Settings {
        /// What to do with the saved settings
        #[command(subcommand)]
        action: SettingsAction,
    },

    /// Read trades from stdin, one per line: ENTRY STOP [BALANCE RISK RATIO]
    Interactive,
}

/// Saved settings actions.
#[derive(Subcommand, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettingsAction {
    /// Print the saved settings
    Show,
    /// Forget the saved settings
    Reset,
}

/// Arguments of a single calculation.
#[derive(Args, Debug, Clone)]
pub struct CalcArgs {
    /// Entry price
    #[arg(long)]
    pub entry: Decimal,

    /// Stop-loss price
    #[arg(long)]
    pub stop: Decimal,

    /// Account balance (default: saved setting)
    #[arg(long)]
    pub balance: Option<Decimal>,

    /// Risk per trade in percent of the balance (default: saved setting)
    #[arg(long)]
    pub risk: Option<Decimal>,

    /// Reward:risk ratio, e.g. 2 for 2:1 (default: saved setting)
    #[arg(long)]
    pub ratio: Option<Decimal>,

    /// Print the result as JSON
    #[arg(long)]
    pub json: bool,
}

impl CalcArgs {
    /// Form submitted by these arguments.
    #[must_use]
    pub const fn to_form(&self) -> PositionForm {
        PositionForm {
            entry_price: self.entry,
            stop_loss: self.stop,
            account_balance: self.balance,
            risk_percentage: self.risk,
            reward_to_risk_ratio: self.ratio,
        }
    }
}

/// One line of interactive input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionCommand {
    /// Size a trade.
    Submit(PositionForm),
    /// Print the saved settings.
    ShowSettings,
    /// Forget the saved settings.
    ResetSettings,
    /// Print usage.
    Help,
    /// Leave the session.
    Quit,
    /// Blank line.
    Empty,
}

/// Error parsing an interactive line.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LineError {
    /// Wrong number of values.
    #[error("expected ENTRY STOP or ENTRY STOP BALANCE RISK RATIO, got {0} values")]
    Arity(usize),
    /// A value is not a number.
    #[error("'{0}' is not a number")]
    NotANumber(String),
}

impl FromStr for SessionCommand {
    type Err = LineError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let tokens: Vec<&str> = line.split_whitespace().collect();

        match tokens.as_slice() {
            [] => return Ok(Self::Empty),
            ["quit" | "exit" | "q"] => return Ok(Self::Quit),
            ["help" | "?"] => return Ok(Self::Help),
            ["settings"] => return Ok(Self::ShowSettings),
            ["reset"] => return Ok(Self::ResetSettings),
            _ => {}
        }

        match tokens.as_slice() {
            [entry, stop] => Ok(Self::Submit(PositionForm::new(
                parse_number(entry)?,
                parse_number(stop)?,
            ))),
            [entry, stop, balance, risk, ratio] => Ok(Self::Submit(PositionForm {
                entry_price: parse_number(entry)?,
                stop_loss: parse_number(stop)?,
                account_balance: parse_optional(balance)?,
                risk_percentage: parse_optional(risk)?,
                reward_to_risk_ratio: parse_optional(ratio)?,
            })),
            other => Err(LineError::Arity(other.len())),
        }
    }
}

fn parse_number(token: &str) -> Result<Decimal, LineError> {
    Decimal::from_str(token).map_err(|_| LineError::NotANumber(token.to_string()))
}

/// `-` keeps the saved setting.
fn parse_optional(token: &str) -> Result<Option<Decimal>, LineError> {
    if token == "-" {
        Ok(None)
    } else {
        parse_number(token).map(Some)
    }
}
