//! Position Sizer Binary
//!
//! Sizes trades from the terminal and remembers the last-used settings.
//!
//! # Usage
//!
//! ```bash
//! position-sizer calc --entry 100 --stop 95 --balance 10000 --risk 1 --ratio 2
//! position-sizer settings show
//! position-sizer interactive
//! ```
//!
//! # Environment Variables
//!
//! ## Optional
//! - `POSITION_SIZER_SETTINGS_PATH`: Settings file (default: ./data/settings.json)
//! - `POSITION_SIZER_MAX_RISK_PCT`: Highest accepted risk per trade (default: 100)
//! - `POSITION_SIZER_PREVIEW_ROWS`: Height of the preview bar (default: 12)
//! - `RUST_LOG`: Log level (default: info)
//!
//! # Exit Codes
//!
//! - `0`: success
//! - `1`: configuration or settings store failure
//! - `2`: the calculation was rejected

use std::io::Write;
use std::process::ExitCode;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use position_sizer::application::services::SizingSession;
use position_sizer::application::use_cases::CalculatePositionUseCase;
use position_sizer::domain::position_sizing::PositionSizer;
use position_sizer::infrastructure::cli::{
    Cli, Commands, Outcome, run_calc, run_interactive, run_settings,
};
use position_sizer::infrastructure::config::AppConfig;
use position_sizer::infrastructure::persistence::JsonFileSettingsStore;
use position_sizer::infrastructure::telemetry;

/// Exit code for a rejected calculation.
const EXIT_REJECTED: u8 = 2;

/// Concrete type alias for the calculate position use case.
type ConcreteCalculatePositionUseCase = CalculatePositionUseCase<JsonFileSettingsStore>;

fn main() -> ExitCode {
    let cli = Cli::parse();

    load_dotenv();
    telemetry::init();

    match run(cli) {
        Ok(Outcome::Completed) => ExitCode::SUCCESS,
        Ok(Outcome::Rejected) => ExitCode::from(EXIT_REJECTED),
        Err(e) => {
            tracing::error!(error = %e, "Position sizer failed");
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> anyhow::Result<Outcome> {
    let mut config = AppConfig::from_env().context("Failed to load configuration")?;
    if let Some(path) = cli.settings_path {
        config.settings_path = path;
    }
    log_config(&config);

    let use_case = create_use_case(&config);
    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    let outcome = match cli.command {
        Commands::Calc(args) => run_calc(&use_case, &args, config.preview.rows, &mut out)
            .context("Failed to size position")?,
        Commands::Settings { action } => {
            run_settings(&use_case, action, &mut out).context("Failed to update settings")?
        }
        Commands::Interactive => {
            let mut session = SizingSession::start(use_case);
            let stdin = std::io::stdin();
            run_interactive(&mut session, stdin.lock(), config.preview.rows, &mut out)
                .context("Interactive session failed")?
        }
    };

    out.flush().context("Failed to flush output")?;
    Ok(outcome)
}

/// Wire the file store into the use case.
fn create_use_case(config: &AppConfig) -> ConcreteCalculatePositionUseCase {
    let store = Arc::new(JsonFileSettingsStore::new(config.settings_path.clone()));
    CalculatePositionUseCase::with_sizer(store, PositionSizer::with_config(config.sizer))
}

fn log_config(config: &AppConfig) {
    tracing::info!(
        settings_path = %config.settings_path.display(),
        max_risk_percentage = %config.sizer.max_risk_percentage,
        preview_rows = config.preview.rows,
        "Configuration loaded"
    );
}

/// Load .env file from current or ancestor directories.
fn load_dotenv() {
    if dotenvy::dotenv().is_err() {
        load_dotenv_from_ancestors();
    }
}

/// Walk up from the working directory to the first `.env` found.
fn load_dotenv_from_ancestors() {
    if let Ok(cwd) = std::env::current_dir() {
        let mut dir = cwd.as_path();
        while let Some(parent) = dir.parent() {
            let env_path = parent.join(".env");
            if env_path.exists() {
                let _ = dotenvy::from_path(&env_path);
                return;
            }
            dir = parent;
        }
    }
}
