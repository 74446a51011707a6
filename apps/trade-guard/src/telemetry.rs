//! Tracing Setup
//!
//! Installs a `tracing-subscriber` fmt subscriber driven by
//! [`LoggingConfig`]. `RUST_LOG`, when set, overrides the configured level.
//!
//! # Usage
//!
//! ```rust,ignore
//! use trade_guard::config::LoggingConfig;
//! use trade_guard::telemetry::init_tracing;
//!
//! init_tracing(&LoggingConfig::default())?;
//! ```

use tracing_subscriber::EnvFilter;

use crate::config::{LogFormat, LoggingConfig};

/// Error returned when a global subscriber is already installed.
#[derive(Debug, thiserror::Error)]
#[error("failed to install tracing subscriber: {0}")]
pub struct TelemetryError(String);

/// Build the level filter: `RUST_LOG` if set, otherwise the configured level.
fn env_filter(config: &LoggingConfig) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.level))
}

/// Initialize the global tracing subscriber.
///
/// # Errors
///
/// Returns an error if a global subscriber has already been set.
pub fn init_tracing(config: &LoggingConfig) -> Result<(), TelemetryError> {
    let builder = tracing_subscriber::fmt()
        .with_env_filter(env_filter(config))
        .with_target(true);

    let result = match config.format {
        LogFormat::Json => builder
            .json()
            .flatten_event(true)
            .with_current_span(true)
            .try_init(),
        LogFormat::Pretty => builder.pretty().with_ansi(true).try_init(),
    };

    result.map_err(|e| TelemetryError(e.to_string()))?;

    tracing::debug!(
        level = %config.level,
        format = ?config.format,
        "Tracing initialized"
    );
    Ok(())
}
