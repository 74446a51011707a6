//! Core position sizing logic.

use rust_decimal::Decimal;

use crate::domain::shared::Money;

/// Configuration for position sizing behavior.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PositionSizerConfig {
    /// Decimal places of the smallest monetary unit.
    pub unit_scale: u32,
}

impl Default for PositionSizerConfig {
    fn default() -> Self {
        Self { unit_scale: 2 }
    }
}

/// Kelly-scaled position sizer.
#[derive(Debug, Clone, Default)]
pub struct PositionSizer {
    config: PositionSizerConfig,
}

impl PositionSizer {
    /// Create a new position sizer with custom configuration.
    #[must_use]
    pub const fn with_config(config: PositionSizerConfig) -> Self {
        Self { config }
    }

    /// Capital to allocate: `min(bankroll × fraction × multiplier, max_position)`.
    ///
    /// Truncated toward zero to the configured unit so capital is never
    /// overcommitted, and never negative. Overflow falls back to the cap.
    #[must_use]
    pub fn position_size(
        &self,
        bankroll: Money,
        kelly_fraction: Decimal,
        multiplier: Decimal,
        max_position: Money,
    ) -> Money {
        let raw = bankroll
            .amount()
            .checked_mul(kelly_fraction)
            .and_then(|v| v.checked_mul(multiplier))
            .map_or(max_position, Money::new);

        raw.min(max_position)
            .truncate_to(self.config.unit_scale)
            .max(Money::ZERO)
    }
}
