//! Static risk limits.

use serde::{Deserialize, Serialize};

use crate::domain::shared::{DomainError, Money, Quantity};

/// Static caps checked before every dispatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RiskLimits {
    /// Largest size a single order may carry.
    pub max_position_size: Quantity,
    /// Filled orders allowed per trading day.
    pub max_daily_trades: u32,
    /// Cap on cumulative filled notional per day.
    pub max_exposure: Money,
}

impl RiskLimits {
    /// Create validated limits.
    ///
    /// # Errors
    ///
    /// Returns error if any limit is zero or negative.
    pub fn new(
        max_position_size: Quantity,
        max_daily_trades: u32,
        max_exposure: Money,
    ) -> Result<Self, DomainError> {
        let limits = Self {
            max_position_size,
            max_daily_trades,
            max_exposure,
        };
        limits.validate()?;
        Ok(limits)
    }

    /// Check that every limit is strictly positive.
    ///
    /// # Errors
    ///
    /// Returns the first offending field.
    pub fn validate(&self) -> Result<(), DomainError> {
        if !self.max_position_size.is_positive() {
            return Err(DomainError::invalid(
                "max_position_size",
                "must be positive",
            ));
        }
        if self.max_daily_trades == 0 {
            return Err(DomainError::invalid("max_daily_trades", "must be positive"));
        }
        if !self.max_exposure.is_positive() {
            return Err(DomainError::invalid("max_exposure", "must be positive"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn valid_limits() {
        let limits = RiskLimits::new(Quantity::from_i64(100), 10, Money::new(dec!(50000))).unwrap();
        assert_eq!(limits.max_daily_trades, 10);
    }

    #[test]
    fn rejects_non_positive_limits() {
        let err = RiskLimits::new(Quantity::ZERO, 10, Money::new(dec!(1))).unwrap_err();
        assert_eq!(err.field(), "max_position_size");

        let err = RiskLimits::new(Quantity::from_i64(1), 0, Money::new(dec!(1))).unwrap_err();
        assert_eq!(err.field(), "max_daily_trades");

        let err = RiskLimits::new(Quantity::from_i64(1), 1, Money::new(dec!(-1))).unwrap_err();
        assert_eq!(err.field(), "max_exposure");
    }
}
