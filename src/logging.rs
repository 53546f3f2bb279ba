//! Tracing setup.
//!
//! Logs go to stderr so stdout carries only rendered steps or JSON reports.
//! `RUST_LOG` wins when set; otherwise `--verbose` raises this crate to debug.

use tracing_subscriber::EnvFilter;

/// Default filter directive for the given verbosity.
pub fn default_directive(verbose: bool) -> &'static str {
    if verbose { "warn,llm_sim=debug" } else { "warn" }
}

/// Initialize the global subscriber. Safe to call more than once; later
/// calls are no-ops.
pub fn init(verbose: bool, json: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(verbose)));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(verbose);

    let result = if json {
        builder.json().try_init()
    } else {
        builder.try_init()
    };

    if result.is_ok() {
        tracing::debug!(version = env!("CARGO_PKG_VERSION"), "llm-sim started");
    }
}
