//! Circuit breaker for venue resilience.
//!
//! Stops sending orders to a venue that keeps failing, then lets a single
//! trial order through after a cooldown.
//!
//! # State Machine
//!
//! ```text
//! CLOSED → OPEN (failures within window >= threshold)
//! OPEN → HALF_OPEN (recovery timeout elapsed, trial permitted)
//! HALF_OPEN → CLOSED (trial succeeds, failure window cleared)
//! HALF_OPEN → OPEN (trial fails, cooldown restarts)
//! ```
//!
//! # Configuration
//!
//! - `failure_threshold`: Open after this many failures in the window (default: 5)
//! - `recovery_timeout`: Time to stay open (default: 300s)
//! - `failure_window`: Trailing window for counting failures (default: 60s)
//! - `max_tracked_failures`: Bound on remembered failure instants (default: 100)
//!
//! # Example
//!
//! ```rust,ignore
//! use trade_guard::resilience::{CircuitBreaker, CircuitBreakerConfig};
//!
//! let mut breaker = CircuitBreaker::new("paper", CircuitBreakerConfig::default());
//!
//! if breaker.can_execute().is_ok() {
//!     match venue.send(&order).await {
//!         Ok(_) => breaker.record_success(),
//!         Err(_) => breaker.record_failure(),
//!     }
//! }
//! ```

use std::collections::VecDeque;
use std::fmt;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tokio::time::Instant;

use crate::domain::shared::DomainError;

/// Circuit breaker state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CircuitBreakerState {
    /// Circuit is closed, calls flow normally.
    Closed,
    /// Circuit is open, calls are rejected.
    Open,
    /// Circuit is testing with a single trial call.
    HalfOpen,
}

impl CircuitBreakerState {
    /// Numeric encoding for gauges (0 closed, 1 half-open, 2 open).
    #[must_use]
    pub const fn as_gauge(&self) -> f64 {
        match self {
            Self::Closed => 0.0,
            Self::HalfOpen => 1.0,
            Self::Open => 2.0,
        }
    }
}

impl fmt::Display for CircuitBreakerState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Closed => write!(f, "CLOSED"),
            Self::Open => write!(f, "OPEN"),
            Self::HalfOpen => write!(f, "HALF_OPEN"),
        }
    }
}

/// Why the breaker refused a call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum CircuitRejection {
    /// Cooling down after repeated failures.
    #[error("circuit breaker OPEN: retry in {:.1}s", .remaining.as_secs_f64())]
    Open {
        /// Time left before a trial is permitted.
        remaining: Duration,
    },

    /// A trial call is already outstanding.
    #[error("circuit breaker HALF_OPEN: trial already in progress")]
    TrialInProgress,
}

/// Circuit breaker configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CircuitBreakerConfig {
    /// Failures within `failure_window` that open the circuit.
    pub failure_threshold: u32,
    /// Duration to stay in `OPEN` state.
    pub recovery_timeout: Duration,
    /// Trailing window in which failures are counted.
    pub failure_window: Duration,
    /// Upper bound on remembered failure instants.
    pub max_tracked_failures: usize,
}

impl Default for CircuitBreakerConfig {
    fn default() -> Self {
        Self {
            failure_threshold: 5,
            recovery_timeout: Duration::from_secs(300),
            failure_window: Duration::from_secs(60),
            max_tracked_failures: 100,
        }
    }
}

impl CircuitBreakerConfig {
    /// Check the configuration is usable.
    ///
    /// # Errors
    ///
    /// Returns the first offending field.
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.failure_threshold == 0 {
            return Err(DomainError::invalid(
                "circuit_failure_threshold",
                "must be positive",
            ));
        }
        if self.recovery_timeout.is_zero() {
            return Err(DomainError::invalid(
                "circuit_recovery_timeout_seconds",
                "must be positive",
            ));
        }
        if self.failure_window.is_zero() {
            return Err(DomainError::invalid(
                "circuit_failure_window_seconds",
                "must be positive",
            ));
        }
        if self.max_tracked_failures < self.failure_threshold as usize {
            return Err(DomainError::invalid(
                "circuit_max_tracked_failures",
                "must be at least the failure threshold",
            ));
        }
        Ok(())
    }
}

/// Circuit breaker for one venue.
///
/// Owned by a single engine and mutated through `&mut self`; the engine's
/// lock serializes access.
#[derive(Debug)]
pub struct CircuitBreaker {
    /// Venue name for logging.
    name: String,
    /// Configuration.
    config: CircuitBreakerConfig,
    /// Current state.
    state: CircuitBreakerState,
    /// Recent failure instants, oldest first.
    failures: VecDeque<Instant>,
    /// When the circuit last opened.
    opened_at: Option<Instant>,
    /// A HALF_OPEN trial has been permitted and not yet reported.
    trial_in_flight: bool,
    /// Total reported outcomes (for metrics).
    total_calls: u64,
    /// Total reported failures (for metrics).
    total_failures: u64,
    /// State transitions counter (for metrics).
    state_transitions: u64,
}

impl CircuitBreaker {
    /// Create a new circuit breaker in the `CLOSED` state.
    #[must_use]
    pub fn new(name: impl Into<String>, config: CircuitBreakerConfig) -> Self {
        Self {
            name: name.into(),
            config,
            state: CircuitBreakerState::Closed,
            failures: VecDeque::new(),
            opened_at: None,
            trial_in_flight: false,
            total_calls: 0,
            total_failures: 0,
            state_transitions: 0,
        }
    }

    /// Get the venue name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Get the configuration.
    #[must_use]
    pub const fn config(&self) -> &CircuitBreakerConfig {
        &self.config
    }

    /// Get the current state.
    ///
    /// An `OPEN` circuit whose cooldown has elapsed still reports `OPEN`
    /// until the next [`can_execute`](Self::can_execute).
    #[must_use]
    pub const fn state(&self) -> CircuitBreakerState {
        self.state
    }

    /// Check whether a call would be permitted, without changing state.
    ///
    /// # Errors
    ///
    /// Returns the [`CircuitRejection`] that [`can_execute`](Self::can_execute)
    /// would return now.
    pub fn would_permit(&self) -> Result<(), CircuitRejection> {
        match self.state {
            CircuitBreakerState::Closed => Ok(()),
            CircuitBreakerState::Open => match self.remaining_cooldown() {
                Some(remaining) => Err(CircuitRejection::Open { remaining }),
                None => Ok(()),
            },
            CircuitBreakerState::HalfOpen if self.trial_in_flight => {
                Err(CircuitRejection::TrialInProgress)
            }
            CircuitBreakerState::HalfOpen => Ok(()),
        }
    }

    /// Take a permit for one call.
    ///
    /// From `OPEN` with the cooldown elapsed this moves to `HALF_OPEN` and
    /// the call becomes the single trial. Every `Ok` must be followed by
    /// exactly one [`record_success`](Self::record_success) or
    /// [`record_failure`](Self::record_failure).
    ///
    /// # Errors
    ///
    /// Returns [`CircuitRejection`] while cooling down or while a trial is
    /// outstanding.
    pub fn can_execute(&mut self) -> Result<(), CircuitRejection> {
        self.would_permit()?;

        match self.state {
            CircuitBreakerState::Closed => {}
            CircuitBreakerState::Open => {
                self.transition_to_half_open();
                self.trial_in_flight = true;
            }
            CircuitBreakerState::HalfOpen => self.trial_in_flight = true,
        }
        Ok(())
    }

    /// Record a successful call.
    pub fn record_success(&mut self) {
        self.total_calls += 1;

        match self.state {
            CircuitBreakerState::Closed => {}
            CircuitBreakerState::HalfOpen => self.transition_to_closed(),
            CircuitBreakerState::Open => {
                // Should not happen - calls are rejected in OPEN state
                tracing::warn!(name = %self.name, "Success recorded while circuit is OPEN");
            }
        }
    }

    /// Record a failed call.
    pub fn record_failure(&mut self) {
        self.total_calls += 1;
        self.total_failures += 1;

        match self.state {
            CircuitBreakerState::Closed => {
                let now = Instant::now();
                self.failures.push_back(now);
                self.prune_failures(now);

                if self.failures.len() >= self.config.failure_threshold as usize {
                    self.transition_to_open(now);
                }
            }
            CircuitBreakerState::HalfOpen => {
                // A single failed trial reopens regardless of history
                self.transition_to_open(Instant::now());
            }
            CircuitBreakerState::Open => {
                tracing::warn!(name = %self.name, "Failure recorded while circuit is OPEN");
            }
        }
    }

    /// Get metrics for this circuit breaker.
    #[must_use]
    pub fn metrics(&self) -> CircuitBreakerMetrics {
        CircuitBreakerMetrics {
            name: self.name.clone(),
            state: self.state,
            total_calls: self.total_calls,
            total_failures: self.total_failures,
            state_transitions: self.state_transitions,
            failures_in_window: self.failures_in_window(Instant::now()),
        }
    }

    /// Cooldown left while `OPEN`, `None` once it has elapsed.
    fn remaining_cooldown(&self) -> Option<Duration> {
        let opened = self.opened_at?;
        let elapsed = opened.elapsed();
        (elapsed < self.config.recovery_timeout).then(|| self.config.recovery_timeout - elapsed)
    }

    fn failures_in_window(&self, now: Instant) -> usize {
        self.failures
            .iter()
            .filter(|at| now.duration_since(**at) <= self.config.failure_window)
            .count()
    }

    /// Drop failures older than the window and enforce the size bound.
    fn prune_failures(&mut self, now: Instant) {
        while let Some(oldest) = self.failures.front() {
            if now.duration_since(*oldest) > self.config.failure_window {
                self.failures.pop_front();
            } else {
                break;
            }
        }
        while self.failures.len() > self.config.max_tracked_failures {
            self.failures.pop_front();
        }
    }

    /// Transition to `OPEN` state with a fresh cooldown.
    fn transition_to_open(&mut self, now: Instant) {
        let previous = self.state;
        self.state = CircuitBreakerState::Open;
        self.opened_at = Some(now);
        self.trial_in_flight = false;
        self.state_transitions += 1;

        tracing::warn!(
            name = %self.name,
            from = %previous,
            to = "OPEN",
            recovery_secs = self.config.recovery_timeout.as_secs(),
            "Circuit breaker opened"
        );
    }

    /// Transition to `HALF_OPEN` state.
    fn transition_to_half_open(&mut self) {
        let previous = self.state;
        self.state = CircuitBreakerState::HalfOpen;
        self.state_transitions += 1;

        tracing::info!(
            name = %self.name,
            from = %previous,
            to = "HALF_OPEN",
            "Circuit breaker testing"
        );
    }

    /// Transition to `CLOSED` state and forget past failures.
    fn transition_to_closed(&mut self) {
        let previous = self.state;
        self.state = CircuitBreakerState::Closed;
        self.failures.clear();
        self.opened_at = None;
        self.trial_in_flight = false;
        self.state_transitions += 1;

        tracing::info!(
            name = %self.name,
            from = %previous,
            to = "CLOSED",
            "Circuit breaker closed"
        );
    }
}

/// Metrics for a circuit breaker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CircuitBreakerMetrics {
    /// Venue name.
    pub name: String,
    /// Current state.
    pub state: CircuitBreakerState,
    /// Total reported outcomes.
    pub total_calls: u64,
    /// Total reported failures.
    pub total_failures: u64,
    /// Number of state transitions.
    pub state_transitions: u64,
    /// Failures inside the trailing window.
    pub failures_in_window: usize,
}
