//! Observability module for metrics.
//!
//! Prometheus metrics for order outcomes, venue latency, circuit breaker
//! state and risk counters. Logging setup lives in [`crate::telemetry`].

mod metrics;

pub use metrics::{
    MetricsConfig, MetricsError, init_metrics, record_circuit_state, record_order_outcome,
    record_venue_latency, update_risk_gauges,
};
