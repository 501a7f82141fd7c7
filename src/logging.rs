//! Leveled logging setup.
//!
//! Log events go through `tracing`. The subscriber writes to stderr so that
//! stdout only ever carries dependency names.

use std::io::{self, IsTerminal};

use tracing_subscriber::EnvFilter;

use crate::config::Verbosity;

/// Builds the filter for `verbosity`, letting `RUST_LOG` override it.
pub fn env_filter(verbosity: Verbosity) -> EnvFilter {
    if verbosity == Verbosity::Silent {
        return EnvFilter::new(verbosity.filter_directive());
    }
    EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(verbosity.filter_directive()))
}

/// Installs the global subscriber.
///
/// Fails if a subscriber is already installed.
pub fn init(verbosity: Verbosity) -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(env_filter(verbosity))
        .with_writer(io::stderr)
        .with_ansi(io::stderr().is_terminal())
        .with_target(false)
        .without_time()
        .try_init()
        .map_err(|e| anyhow::anyhow!("failed to initialise logging: {}", e))
}
