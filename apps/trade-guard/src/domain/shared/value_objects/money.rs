//! Money value object for notional amounts.

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Deserializer, Serialize};
use std::cmp::Ordering;
use std::fmt;

use crate::domain::shared::DomainError;

/// A monetary amount (price, notional, bankroll).
///
/// Represented as a Decimal for exact financial calculations. Binary floating
/// point never enters a `Money` value: it deserializes from decimal strings
/// or integers only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct Money(Decimal);

impl Money {
    /// Create a new Money value from a Decimal.
    #[must_use]
    pub const fn new(amount: Decimal) -> Self {
        Self(amount)
    }

    /// Create a Money value from cents (integer).
    #[must_use]
    pub fn from_cents(cents: i64) -> Self {
        Self(Decimal::new(cents, 2))
    }

    /// Zero amount.
    pub const ZERO: Self = Self(Decimal::ZERO);

    /// One unit, the implicit price of an unpriced market order.
    pub const ONE: Self = Self(Decimal::ONE);

    /// Get the inner Decimal value.
    #[must_use]
    pub const fn amount(&self) -> Decimal {
        self.0
    }

    /// Returns true if this amount is positive.
    #[must_use]
    pub fn is_positive(&self) -> bool {
        self.0 > Decimal::ZERO
    }

    /// Returns true if this amount is negative.
    #[must_use]
    pub fn is_negative(&self) -> bool {
        self.0 < Decimal::ZERO
    }

    /// Returns true if this amount is zero.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.0 == Decimal::ZERO
    }

    /// Truncate toward zero to `scale` decimal places.
    #[must_use]
    pub fn truncate_to(&self, scale: u32) -> Self {
        Self(self.0.round_dp_with_strategy(scale, RoundingStrategy::ToZero))
    }

    /// Checked addition, `None` on overflow.
    #[must_use]
    pub fn checked_add(self, rhs: Self) -> Option<Self> {
        self.0.checked_add(rhs.0).map(Self)
    }

    /// Addition clamped at the Decimal range.
    #[must_use]
    pub fn saturating_add(self, rhs: Self) -> Self {
        Self(self.0.saturating_add(rhs.0))
    }

    /// Validate that this amount is usable as an order price.
    ///
    /// # Errors
    ///
    /// Returns error if the price is zero or negative.
    pub fn validate_as_price(&self) -> Result<(), DomainError> {
        if !self.is_positive() {
            return Err(DomainError::invalid("price", "Price must be positive"));
        }
        Ok(())
    }
}

impl Default for Money {
    fn default() -> Self {
        Self::ZERO
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.normalize())
    }
}

impl PartialOrd for Money {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Money {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.cmp(&other.0)
    }
}

impl<'de> Deserialize<'de> for Money {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        super::exact_decimal::deserialize(deserializer).map(Self)
    }
}

impl From<Decimal> for Money {
    fn from(value: Decimal) -> Self {
        Self(value)
    }
}

impl From<Money> for Decimal {
    fn from(value: Money) -> Self {
        value.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn money_from_cents() {
        let m = Money::from_cents(15050);
        assert_eq!(m.amount(), dec!(150.50));
        assert_eq!(format!("{m}"), "150.5");
    }

    #[test]
    fn money_zero() {
        assert!(Money::ZERO.is_zero());
        assert!(!Money::ZERO.is_positive());
        assert!(!Money::ZERO.is_negative());
    }

    #[test]
    fn money_truncate_rounds_toward_zero() {
        let m = Money::new(dec!(150.559));
        assert_eq!(m.truncate_to(2).amount(), dec!(150.55));

        let neg = Money::new(dec!(-0.019));
        assert_eq!(neg.truncate_to(2).amount(), dec!(-0.01));
    }

    #[test]
    fn money_checked_add_overflow() {
        let max = Money::new(Decimal::MAX);
        assert!(max.checked_add(Money::ONE).is_none());
        assert_eq!(max.saturating_add(Money::ONE), max);
    }

    #[test]
    fn money_addition_is_exact() {
        let a = Money::new(dec!(0.1));
        let b = Money::new(dec!(0.2));
        assert_eq!(a.checked_add(b), Some(Money::new(dec!(0.3))));
        assert_eq!(a.saturating_add(b).amount(), dec!(0.3));
    }

    #[test]
    fn money_validate_as_price() {
        assert!(Money::new(dec!(0.01)).validate_as_price().is_ok());
        assert!(Money::ZERO.validate_as_price().is_err());
        assert!(Money::new(dec!(-5)).validate_as_price().is_err());
    }

    #[test]
    fn money_serde_roundtrip() {
        let m = Money::new(dec!(150.50));
        let json = serde_json::to_string(&m).unwrap();
        let parsed: Money = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, m);
    }

    #[test]
    fn money_deserializes_long_strings_exactly() {
        let parsed: Money = serde_json::from_str("\"12345678.123456789012\"").unwrap();
        assert_eq!(parsed.amount(), dec!(12345678.123456789012));
    }

    #[test]
    fn money_rejects_float_literals() {
        assert!(serde_json::from_str::<Money>("187.123456789012345").is_err());
        assert_eq!(
            serde_json::from_str::<Money>("150").unwrap(),
            Money::new(dec!(150))
        );
    }

    #[test]
    fn money_ordering() {
        assert!(Money::new(dec!(100)) > Money::new(dec!(99.99)));
        assert_eq!(Money::default(), Money::ZERO);
    }
}
