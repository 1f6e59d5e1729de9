//! Diagnostic logging on stderr.
//!
//! Progress and failure messages are part of the runner's output and are
//! printed directly; tracing carries only diagnostics. `RUST_LOG` overrides
//! the level chosen by the verbosity flags.

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Level implied by `-v` count and `-q`.
pub fn default_level(verbose: u8, quiet: bool) -> &'static str {
    if quiet {
        return "error";
    }
    match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

pub fn init_logging(verbose: u8, quiet: bool) {
    let level = default_level(verbose, quiet);
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let _ = tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr).with_target(false))
        .with(filter)
        .try_init();

    tracing::debug!(level, "logging initialized");
}

/// Logging for tests, captured by the test harness.
pub fn init_test_logging() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter("debug")
        .with_test_writer()
        .try_init();
}
