//! Terminal Adapter
//!
//! Argument parsing, rendering of the result and settings panels, and the
//! command runners used by the binary.

mod args;
mod commands;
mod render;

pub use args::{CalcArgs, Cli, Commands, LineError, SessionCommand, SettingsAction};
pub use commands::{CliError, Outcome, run_calc, run_interactive, run_settings};
pub use render::{preview_lines, render_report, render_settings};
