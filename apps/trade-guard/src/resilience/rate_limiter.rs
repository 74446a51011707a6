//! Minimum-interval rate limiter for venue calls.
//!
//! Derives a minimum spacing from a calls-per-minute budget and suspends
//! each caller until that spacing has elapsed since the previous permit.
//! Uses tokio's monotonic clock, so paused-time tests stay deterministic.

use std::time::Duration;

use thiserror::Error;
use tokio::sync::Mutex;
use tokio::time::{Instant, sleep_until};

/// Rate limiter construction errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum RateLimiterError {
    /// A budget of zero calls per minute can never permit a call.
    #[error("rate_limit_per_minute must be positive")]
    ZeroRate,
}

/// Paces calls to at most `calls_per_minute`.
///
/// Concurrent acquirers queue on an async mutex and are released one
/// interval apart. Dropping an `acquire` future mid-wait leaves the previous
/// permit time unchanged.
#[derive(Debug)]
pub struct RateLimiter {
    calls_per_minute: u32,
    min_interval: Duration,
    /// Instant of the last permitted call.
    last_call: Mutex<Option<Instant>>,
}

impl RateLimiter {
    /// Create a limiter for `calls_per_minute`.
    ///
    /// # Errors
    ///
    /// Returns [`RateLimiterError::ZeroRate`] if `calls_per_minute` is zero.
    pub fn new(calls_per_minute: u32) -> Result<Self, RateLimiterError> {
        if calls_per_minute == 0 {
            return Err(RateLimiterError::ZeroRate);
        }
        Ok(Self {
            calls_per_minute,
            min_interval: Duration::from_secs(60) / calls_per_minute,
            last_call: Mutex::new(None),
        })
    }

    /// Configured budget.
    #[must_use]
    pub const fn calls_per_minute(&self) -> u32 {
        self.calls_per_minute
    }

    /// Minimum spacing between permits.
    #[must_use]
    pub const fn min_interval(&self) -> Duration {
        self.min_interval
    }

    /// Wait until a call is permitted, then record it.
    pub async fn acquire(&self) {
        let mut last = self.last_call.lock().await;

        if let Some(previous) = *last {
            let ready_at = previous + self.min_interval;
            let now = Instant::now();
            if ready_at > now {
                tracing::debug!(
                    wait_ms = (ready_at - now).as_millis() as u64,
                    "Rate limiter pacing call"
                );
                sleep_until(ready_at).await;
            }
        }

        *last = Some(Instant::now());
    }
}
