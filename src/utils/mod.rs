//! Utilities: logging setup (verbosity flags -> tracing filter) and the
//! per-command runtime.
//!
//! Key items:
//!   derive_level / init_logging
//!   block_on (current-thread tokio runtime)

use std::future::Future;

use anyhow::{Context, Result};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::filter::LevelFilter;

/// Map `-v` / `-q` to a level. Quiet wins over verbose.
pub fn derive_level(verbose: u8, quiet: bool) -> LevelFilter {
    if quiet {
        return LevelFilter::ERROR;
    }
    match verbose {
        0 => LevelFilter::INFO,
        1 => LevelFilter::DEBUG,
        _ => LevelFilter::TRACE,
    }
}

/// Install the global subscriber, writing to stderr so stdout stays clean for
/// command output. `RUST_LOG`, when set and valid, takes precedence.
pub fn init_logging(level: LevelFilter) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("drivecmd={level}")));
    // A second init (e.g. from tests) is harmless.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

/// Run one future to completion on a fresh single-threaded runtime.
pub fn block_on<F: Future>(fut: F) -> Result<F::Output> {
    let rt = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("Failed to create Tokio runtime")?;
    Ok(rt.block_on(fut))
}
