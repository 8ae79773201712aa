//! Tracing Initialization
//!
//! Installs a `tracing` subscriber filtered by `RUST_LOG`.
//!
//! Logs go to stderr so the rendered panel on stdout stays clean.
//!
//! # Usage
//!
//! ```ignore
//! use position_sizer::infrastructure::telemetry;
//!
//! telemetry::init();
//! tracing::info!("Calculator started");
//! ```

use tracing_subscriber::EnvFilter;

/// Default directive applied on top of `RUST_LOG`.
const DEFAULT_DIRECTIVE: &str = "position_sizer=info";

/// Build the filter: `RUST_LOG` plus the crate's default level.
#[must_use]
#[allow(clippy::expect_used)]
pub fn env_filter() -> EnvFilter {
    EnvFilter::from_default_env().add_directive(
        DEFAULT_DIRECTIVE
            .parse()
            .expect("static directive 'position_sizer=info' is valid"),
    )
}

/// Initialize the global subscriber.
///
/// Calling it twice is harmless; the second call is ignored.
pub fn init() {
    let result = tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();

    if result.is_err() {
        tracing::debug!("Tracing subscriber already installed");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn init_is_idempotent() {
        init();
        init();
    }

    #[test]
    fn default_directive_parses() {
        let filter = env_filter();
        assert!(filter.to_string().contains("position_sizer=info"));
    }
}
