//! Logging setup for the CLI.
//!
//! Logs go to stderr so stdout carries only command output. `RUST_LOG`
//! takes precedence over the `--verbose` flag.

use tracing_subscriber::EnvFilter;

/// Install the global tracing subscriber.
pub fn init(verbose: bool) {
    let default_level = if verbose { "beatbox=debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    // A subscriber may already be installed when embedded in tests.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
