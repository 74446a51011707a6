//! Circuit breaker configuration for venue failures.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Circuit breaker settings, durations in seconds.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CircuitBreakerSettings {
    /// Failures within the window that open the circuit.
    #[serde(default = "default_failure_threshold")]
    pub failure_threshold: u32,
    /// Time spent open before a trial call is allowed.
    #[serde(default = "default_recovery_timeout")]
    pub recovery_timeout_secs: u64,
    /// Trailing window in which failures are counted.
    #[serde(default = "default_failure_window")]
    pub failure_window_secs: u64,
    /// Upper bound on remembered failure instants.
    #[serde(default = "default_max_tracked_failures")]
    pub max_tracked_failures: usize,
}

impl Default for CircuitBreakerSettings {
    fn default() -> Self {
        Self {
            failure_threshold: default_failure_threshold(),
            recovery_timeout_secs: default_recovery_timeout(),
            failure_window_secs: default_failure_window(),
            max_tracked_failures: default_max_tracked_failures(),
        }
    }
}

impl CircuitBreakerSettings {
    /// Convert config settings to resilience module's `CircuitBreakerConfig`.
    #[must_use]
    pub const fn to_resilience_config(&self) -> crate::resilience::CircuitBreakerConfig {
        crate::resilience::CircuitBreakerConfig {
            failure_threshold: self.failure_threshold,
            recovery_timeout: Duration::from_secs(self.recovery_timeout_secs),
            failure_window: Duration::from_secs(self.failure_window_secs),
            max_tracked_failures: self.max_tracked_failures,
        }
    }
}

const fn default_failure_threshold() -> u32 {
    5
}

const fn default_recovery_timeout() -> u64 {
    300
}

const fn default_failure_window() -> u64 {
    60
}

const fn default_max_tracked_failures() -> usize {
    100
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_resilience_defaults() {
        assert_eq!(
            CircuitBreakerSettings::default().to_resilience_config(),
            crate::resilience::CircuitBreakerConfig::default()
        );
    }
}
