//! Command runners.
//!
//! Each runner writes its output to the given writer and reports whether the
//! calculation was accepted, so the binary can pick the exit code.

use std::io::{BufRead, Write};

use thiserror::Error;

use super::args::{CalcArgs, SessionCommand, SettingsAction};
use super::render::{render_report, render_settings};
use crate::application::dto::PositionReportDto;
use crate::application::ports::{SettingsStorePort, StoreError};
use crate::application::services::SizingSession;
use crate::application::use_cases::CalculatePositionUseCase;

const INTERACTIVE_HELP: &str = "\
Enter one trade per line:
  ENTRY STOP                      use the saved settings
  ENTRY STOP BALANCE RISK RATIO   '-' keeps a saved value
Commands: settings, reset, help, quit";

/// Result of a command that ran to completion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Everything the user asked for succeeded.
    Completed,
    /// The last calculation was rejected and a warning was printed.
    Rejected,
}

/// Fatal command errors.
#[derive(Debug, Error)]
pub enum CliError {
    /// Writing output or reading input failed.
    #[error("terminal I/O failed: {0}")]
    Io(#[from] std::io::Error),

    /// The report could not be encoded as JSON.
    #[error("failed to encode report: {0}")]
    Json(#[from] serde_json::Error),

    /// The settings store failed.
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Size one trade.
///
/// # Errors
///
/// Returns an error only when output cannot be written.
pub fn run_calc<S, W>(
    use_case: &CalculatePositionUseCase<S>,
    args: &CalcArgs,
    preview_rows: usize,
    out: &mut W,
) -> Result<Outcome, CliError>
where
    S: SettingsStorePort,
    W: Write,
{
    let stored = use_case.load_settings();

    match use_case.execute(&args.to_form(), &stored) {
        Ok(report) => {
            if args.json {
                let dto = PositionReportDto::from(&report);
                writeln!(out, "{}", serde_json::to_string_pretty(&dto)?)?;
            } else {
                write!(out, "{}", render_report(&report, preview_rows))?;
            }
            Ok(Outcome::Completed)
        }
        Err(e) => {
            writeln!(out, "Warning: {e}")?;
            Ok(Outcome::Rejected)
        }
    }
}

/// Show or reset the saved settings.
///
/// # Errors
///
/// Returns an error when the store cannot be cleared or output fails.
pub fn run_settings<S, W>(
    use_case: &CalculatePositionUseCase<S>,
    action: SettingsAction,
    out: &mut W,
) -> Result<Outcome, CliError>
where
    S: SettingsStorePort,
    W: Write,
{
    match action {
        SettingsAction::Show => {
            let settings = use_case.load_settings();
            write!(out, "{}", render_settings(&settings, !settings.is_complete()))?;
        }
        SettingsAction::Reset => {
            use_case.reset_settings()?;
            writeln!(out, "Settings cleared")?;
        }
    }
    Ok(Outcome::Completed)
}

/// Read-eval loop over `input`, one submission per line.
///
/// Rejected lines print a warning and the loop continues; the outcome
/// reflects the last submission.
///
/// # Errors
///
/// Returns an error when reading input, writing output or resetting the
/// store fails.
pub fn run_interactive<S, R, W>(
    session: &mut SizingSession<S>,
    input: R,
    preview_rows: usize,
    out: &mut W,
) -> Result<Outcome, CliError>
where
    S: SettingsStorePort,
    R: BufRead,
    W: Write,
{
    let mut outcome = Outcome::Completed;

    writeln!(out, "{INTERACTIVE_HELP}")?;
    if session.is_settings_open() {
        write!(out, "{}", render_settings(session.settings(), true))?;
    }

    for line in input.lines() {
        let line = line?;
        let command = match line.parse::<SessionCommand>() {
            Ok(command) => command,
            Err(e) => {
                writeln!(out, "Warning: {e}")?;
                outcome = Outcome::Rejected;
                continue;
            }
        };

        match command {
            SessionCommand::Empty => {}
            SessionCommand::Quit => break,
            SessionCommand::Help => writeln!(out, "{INTERACTIVE_HELP}")?,
            SessionCommand::ShowSettings => {
                write!(
                    out,
                    "{}",
                    render_settings(session.settings(), session.is_settings_open())
                )?;
            }
            SessionCommand::ResetSettings => {
                session.reset_settings()?;
                writeln!(out, "Settings cleared")?;
            }
            SessionCommand::Submit(form) => match session.submit(&form) {
                Ok(report) => {
                    write!(out, "{}", render_report(report, preview_rows))?;
                    outcome = Outcome::Completed;
                }
                Err(e) => {
                    writeln!(out, "Warning: {e}")?;
                    if session.is_settings_open() {
                        write!(out, "{}", render_settings(session.settings(), true))?;
                    }
                    outcome = Outcome::Rejected;
                }
            },
        }
    }

    Ok(outcome)
}
