//! Resilience patterns for venue calls.
//!
//! This module provides the circuit breaker that halts dispatch while a
//! venue keeps failing, and the rate limiter that paces outbound calls.

mod circuit_breaker;
mod rate_limiter;

pub use circuit_breaker::{
    CircuitBreaker, CircuitBreakerConfig, CircuitBreakerMetrics, CircuitBreakerState,
    CircuitRejection,
};
pub use rate_limiter::{RateLimiter, RateLimiterError};
