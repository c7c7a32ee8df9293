//! Subscriber setup for the binary.

use crate::config::{LogFormat, LoggingConfig};
use anyhow::{Result, anyhow};
use tracing_subscriber::EnvFilter;

/// Environment variable that overrides the configured filter.
pub const LOG_FILTER_VAR: &str = "PENNYWISE_LOG";

/// Installs the global subscriber. Logs go to stderr so stdout stays
/// reserved for results.
pub fn init_logging(config: &LoggingConfig) -> Result<()> {
    let filter = EnvFilter::try_from_env(LOG_FILTER_VAR)
        .or_else(|_| EnvFilter::try_new(&config.filter))
        .map_err(|e| anyhow!("invalid log filter '{}': {e}", config.filter))?;

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr);

    match config.format {
        LogFormat::Json => builder.json().try_init(),
        LogFormat::Pretty => builder.compact().try_init(),
    }
    .map_err(|e| anyhow!("failed to install log subscriber: {e}"))
}
