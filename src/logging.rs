//! Diagnostic logging to stderr.
//!
//! Quiet by default (`warn`). `-v` raises the level to `debug`; `RUST_LOG`
//! overrides both.

use anyhow::{Result, anyhow};
use tracing_subscriber::EnvFilter;

/// Filter directive used when `RUST_LOG` is not set.
pub fn default_directive(verbose: bool) -> &'static str {
    if verbose {
        "trip_planner=debug,tripplan=debug,warn"
    } else {
        "warn"
    }
}

pub fn init(verbose: bool) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(verbose)));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init()
        .map_err(|e| anyhow!("failed to initialise logging: {e}"))?;

    tracing::debug!("logging initialised");
    Ok(())
}
