//! Configuration module for the trade guard.
//!
//! Loads a YAML file, interpolates environment variables and validates the
//! result before anything is constructed from it.
//!
//! # Usage
//!
//! ```rust,ignore
//! use trade_guard::config::load_config;
//!
//! // Load from default path (config.yaml)
//! let config = load_config(None)?;
//!
//! // Load from custom path
//! let config = load_config(Some("custom/config.yaml"))?;
//!
//! let engine_config = config.engine_config()?;
//! ```

mod audit;
mod circuit_breaker;
mod engine;
mod observability;
mod venue;

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use audit::AuditSettings;
pub use circuit_breaker::CircuitBreakerSettings;
pub use engine::EngineSettings;
pub use observability::{LogFormat, LoggingConfig, MetricsSettings, ObservabilityConfig};
pub use venue::PaperVenueSettings;

use crate::application::use_cases::EngineConfig;

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read configuration file.
    #[error("Failed to read config file '{path}': {source}")]
    ReadError {
        /// Path to the config file.
        path: String,
        /// The underlying IO error.
        source: std::io::Error,
    },

    /// Failed to parse YAML configuration.
    #[error("Failed to parse config YAML: {0}")]
    ParseError(#[from] serde_yaml_bw::Error),

    /// Configuration validation failed.
    #[error("Config validation failed: {0}")]
    ValidationError(String),
}

/// Root configuration structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Engine identity, risk limits and pacing.
    pub engine: EngineSettings,
    /// Circuit breaker configuration.
    #[serde(default)]
    pub circuit_breaker: CircuitBreakerSettings,
    /// Audit trail configuration.
    #[serde(default)]
    pub audit: AuditSettings,
    /// Observability configuration.
    #[serde(default)]
    pub observability: ObservabilityConfig,
    /// Paper venue configuration.
    #[serde(default)]
    pub paper_venue: PaperVenueSettings,
}

impl Config {
    /// Runtime engine configuration.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::ValidationError` if a risk limit is not positive.
    pub fn engine_config(&self) -> Result<EngineConfig, ConfigError> {
        self.engine
            .to_engine_config(&self.circuit_breaker)
            .map_err(|e| ConfigError::ValidationError(format!("engine: {e}")))
    }
}

// ============================================
// Configuration Loading
// ============================================

/// Load configuration from a YAML file with environment variable interpolation.
///
/// # Arguments
///
/// * `path` - Optional path to the config file. Defaults to "config.yaml".
///
/// # Errors
///
/// Returns a `ConfigError` if the file cannot be read, parsed, or validated.
pub fn load_config(path: Option<&str>) -> Result<Config, ConfigError> {
    let path = path.unwrap_or("config.yaml");

    let contents = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
        path: path.to_string(),
        source: e,
    })?;

    load_config_from_string(&contents)
}

/// Load configuration from a YAML string (useful for testing).
///
/// # Errors
///
/// Returns a `ConfigError` if the YAML cannot be parsed or validated.
pub fn load_config_from_string(yaml: &str) -> Result<Config, ConfigError> {
    let interpolated = interpolate_env_vars(yaml);
    let config: Config = serde_yaml_bw::from_str(&interpolated)?;
    validate_config(&config)?;
    Ok(config)
}

/// Interpolate environment variables in a string.
///
/// Supports both `${VAR}` and `${VAR:-default}` syntax. Unset or empty
/// variables without a default become the empty string.
#[allow(clippy::expect_used)] // Regex is compile-time constant; expect() is safe here
fn interpolate_env_vars(input: &str) -> String {
    use std::sync::OnceLock;

    static ENV_VAR_REGEX: OnceLock<regex::Regex> = OnceLock::new();

    let re = ENV_VAR_REGEX.get_or_init(|| {
        regex::Regex::new(r"\$\{([A-Za-z_][A-Za-z0-9_]*)(?::-([^}]*))?\}")
            .expect("env var regex is valid")
    });

    re.replace_all(input, |cap: &regex::Captures<'_>| {
        let default_value = cap.get(2).map_or("", |m| m.as_str());
        match std::env::var(&cap[1]) {
            Ok(v) if !v.is_empty() => v,
            _ => default_value.to_string(),
        }
    })
    .into_owned()
}

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// Validate configuration values.
fn validate_config(config: &Config) -> Result<(), ConfigError> {
    if config.engine.name.trim().is_empty() {
        return Err(ConfigError::ValidationError(
            "engine.name must not be empty".to_string(),
        ));
    }

    if config.engine.rate_limit_per_minute == 0 {
        return Err(ConfigError::ValidationError(
            "engine.rate_limit_per_minute must be positive".to_string(),
        ));
    }

    if config.engine.venue_timeout_secs == Some(0) {
        return Err(ConfigError::ValidationError(
            "engine.venue_timeout_secs must be positive when set".to_string(),
        ));
    }

    // Risk limits are checked by building the engine config
    config.engine_config()?;

    config
        .circuit_breaker
        .to_resilience_config()
        .validate()
        .map_err(|e| ConfigError::ValidationError(e.to_string()))?;

    if !config.paper_venue.reference_price.is_positive() {
        return Err(ConfigError::ValidationError(
            "paper_venue.reference_price must be positive".to_string(),
        ));
    }

    let level = config.observability.logging.level.to_lowercase();
    if !LOG_LEVELS.contains(&level.as_str()) {
        return Err(ConfigError::ValidationError(format!(
            "observability.logging.level must be one of: {LOG_LEVELS:?}"
        )));
    }

    Ok(())
}
