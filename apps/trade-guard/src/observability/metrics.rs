//! Prometheus metrics for the execution engine.
//!
//! Every function is a no-op until a recorder is installed, so library users
//! and tests can call them freely.
//!
//! # Example
//!
//! ```ignore
//! use trade_guard::observability::{init_metrics, MetricsConfig};
//!
//! init_metrics(&MetricsConfig::default())?;
//! record_order_outcome("paper", "filled");
//! ```

use metrics::{counter, gauge, histogram};
use metrics_exporter_prometheus::PrometheusBuilder;
use rust_decimal::prelude::ToPrimitive;
use std::net::{Ipv4Addr, SocketAddr};

use crate::domain::shared::Money;
use crate::resilience::CircuitBreakerState;

/// Configuration for the metrics exporter.
#[derive(Debug, Clone)]
pub struct MetricsConfig {
    /// Address to bind the metrics HTTP listener.
    pub listen_addr: SocketAddr,
    /// Histogram buckets for venue latency (in seconds).
    pub latency_buckets: Vec<f64>,
}

impl Default for MetricsConfig {
    fn default() -> Self {
        Self {
            listen_addr: SocketAddr::from((Ipv4Addr::UNSPECIFIED, 9090)),
            // Latency buckets from 1ms to 10s
            latency_buckets: vec![0.001, 0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 10.0],
        }
    }
}

impl MetricsConfig {
    /// Create a new metrics configuration with custom address.
    #[must_use]
    pub fn with_addr(addr: SocketAddr) -> Self {
        Self {
            listen_addr: addr,
            ..Default::default()
        }
    }
}

/// Initialize the Prometheus metrics exporter.
///
/// This starts an HTTP server that exposes metrics at `/metrics`.
///
/// # Errors
///
/// Returns an error if the metrics exporter fails to start (e.g., port already in use).
pub fn init_metrics(config: &MetricsConfig) -> Result<(), MetricsError> {
    PrometheusBuilder::new()
        .with_http_listener(config.listen_addr)
        .set_buckets(&config.latency_buckets)
        .map_err(|e| MetricsError::Configuration(e.to_string()))?
        .install()
        .map_err(|e| MetricsError::Installation(e.to_string()))?;

    tracing::info!(
        addr = %config.listen_addr,
        "Prometheus metrics exporter started"
    );

    Ok(())
}

/// Error type for metrics operations.
#[derive(Debug, thiserror::Error)]
pub enum MetricsError {
    /// Failed to configure metrics exporter.
    #[error("metrics configuration error: {0}")]
    Configuration(String),
    /// Failed to install metrics exporter.
    #[error("metrics installation error: {0}")]
    Installation(String),
}

// ============================================================================
// Order Metrics
// ============================================================================

/// Count one `execute_order` outcome.
///
/// # Arguments
///
/// * `engine` - Engine name
/// * `outcome` - `"filled"`, `"validation"`, `"circuit_open"`, `"venue"` or `"transport"`
pub fn record_order_outcome(engine: &str, outcome: &str) {
    counter!(
        "trade_guard_orders_total",
        "engine" => engine.to_string(),
        "outcome" => outcome.to_string()
    )
    .increment(1);
}

/// Record how long a venue call took.
pub fn record_venue_latency(engine: &str, latency_seconds: f64) {
    histogram!(
        "trade_guard_venue_latency_seconds",
        "engine" => engine.to_string()
    )
    .record(latency_seconds);
}

// ============================================================================
// Risk and Circuit Breaker Metrics
// ============================================================================

/// Publish the daily trade count and cumulative exposure.
///
/// Exposure is converted to `f64` for display only.
pub fn update_risk_gauges(engine: &str, daily_trades: u32, exposure: Money) {
    gauge!("trade_guard_daily_trades", "engine" => engine.to_string())
        .set(f64::from(daily_trades));
    gauge!("trade_guard_exposure", "engine" => engine.to_string())
        .set(exposure.amount().to_f64().unwrap_or(f64::MAX));
}

/// Publish the circuit breaker state (0 closed, 1 half-open, 2 open).
pub fn record_circuit_state(engine: &str, state: CircuitBreakerState) {
    gauge!("trade_guard_circuit_state", "engine" => engine.to_string()).set(state.as_gauge());
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_default_config() {
        let config = MetricsConfig::default();
        assert_eq!(config.listen_addr.port(), 9090);
        assert!(!config.latency_buckets.is_empty());
    }

    #[test]
    fn test_config_with_addr() {
        let addr: SocketAddr = "127.0.0.1:8080".parse().unwrap();
        let config = MetricsConfig::with_addr(addr);
        assert_eq!(config.listen_addr.port(), 8080);
    }

    #[test]
    fn test_latency_buckets_sorted() {
        let config = MetricsConfig::default();
        assert!(config.latency_buckets.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_recording_without_recorder() {
        // No recorder installed; calls must not panic
        record_order_outcome("paper", "filled");
        record_venue_latency("paper", 0.015);
        update_risk_gauges("paper", 3, Money::new(dec!(1250.50)));
        record_circuit_state("paper", CircuitBreakerState::HalfOpen);
    }
}
