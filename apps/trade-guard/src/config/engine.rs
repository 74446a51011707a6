//! Engine configuration: identity, risk limits and pacing.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::circuit_breaker::CircuitBreakerSettings;
use crate::application::use_cases::EngineConfig;
use crate::domain::risk_management::RiskLimits;
use crate::domain::shared::{DomainError, Money, Quantity};

/// Engine settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineSettings {
    /// Engine name, used in logs and metric labels. Required.
    pub name: String,
    /// Largest accepted order size.
    pub max_position_size: Quantity,
    /// Orders accepted per trading day.
    pub max_daily_trades: u32,
    /// Cap on accumulated filled notional.
    pub max_exposure: Money,
    /// Venue calls per minute.
    pub rate_limit_per_minute: u32,
    /// Upper bound on a single venue call (seconds).
    #[serde(default)]
    pub venue_timeout_secs: Option<u64>,
}

impl EngineSettings {
    /// Runtime configuration for [`ExecutionEngine`](crate::application::use_cases::ExecutionEngine).
    ///
    /// # Errors
    ///
    /// Returns the first non-positive limit.
    pub fn to_engine_config(
        &self,
        circuit_breaker: &CircuitBreakerSettings,
    ) -> Result<EngineConfig, DomainError> {
        let limits = RiskLimits::new(
            self.max_position_size,
            self.max_daily_trades,
            self.max_exposure,
        )?;

        let config = EngineConfig::new(&self.name, limits, self.rate_limit_per_minute)
            .with_circuit_breaker(circuit_breaker.to_resilience_config());

        Ok(match self.venue_timeout_secs {
            Some(secs) => config.with_venue_timeout(Duration::from_secs(secs)),
            None => config,
        })
    }
}
