//! Per-engine risk counters.

use serde::{Deserialize, Serialize};

use super::RiskLimits;
use crate::domain::shared::Money;

/// Daily counters plus the limits they are checked against.
///
/// Only [`RiskState::record_fill`] and [`RiskState::reset_daily`] mutate it.
/// Exposure never decreases between resets.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RiskState {
    daily_trades: u32,
    exposure: Money,
    limits: RiskLimits,
}

impl RiskState {
    /// Fresh state for a new trading day.
    #[must_use]
    pub const fn new(limits: RiskLimits) -> Self {
        Self {
            daily_trades: 0,
            exposure: Money::ZERO,
            limits,
        }
    }

    /// Filled orders so far today.
    #[must_use]
    pub const fn daily_trades(&self) -> u32 {
        self.daily_trades
    }

    /// Cumulative filled notional today.
    #[must_use]
    pub const fn exposure(&self) -> Money {
        self.exposure
    }

    /// Static limits.
    #[must_use]
    pub const fn limits(&self) -> &RiskLimits {
        &self.limits
    }

    /// Count a confirmed fill of `notional`.
    ///
    /// Negative notionals are ignored for exposure; the trade still counts.
    pub fn record_fill(&mut self, notional: Money) {
        self.daily_trades = self.daily_trades.saturating_add(1);
        if notional.is_positive() {
            self.exposure = self.exposure.saturating_add(notional);
        }
    }

    /// Zero the counters at a day boundary.
    pub fn reset_daily(&mut self) {
        self.daily_trades = 0;
        self.exposure = Money::ZERO;
    }
}
