//! Tracing subscriber setup

use crate::config::{LogFormat, LoggingConfig};
use crate::utils::error::{IngestError, Result};
use tracing_subscriber::EnvFilter;

/// Build the filter: `RUST_LOG` wins, then the configured level
pub fn build_filter(config: &LoggingConfig) -> Result<EnvFilter> {
    if let Ok(filter) = EnvFilter::try_from_default_env() {
        return Ok(filter);
    }
    EnvFilter::try_new(&config.level)
        .map_err(|e| IngestError::Config(format!("Invalid log level '{}': {}", config.level, e)))
}

/// Initialize the global subscriber, writing to stderr
///
/// Stdout is reserved for console output (progress, alerts, result listings).
pub fn init_logging(config: &LoggingConfig) -> Result<()> {
    let filter = build_filter(config)?;
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_thread_ids(false);

    let installed = match config.format {
        LogFormat::Text => builder.try_init(),
        LogFormat::Json => builder.json().try_init(),
    };

    installed.map_err(|e| IngestError::Config(format!("Failed to initialize logging: {}", e)))
}
