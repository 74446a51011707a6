//! Quantity value object for order and fill sizes.

use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};
use std::cmp::Ordering;
use std::fmt;

use crate::domain::shared::{DomainError, Money};

/// A size for orders and fills (shares, contracts or units).
///
/// Represented as a Decimal to handle fractional sizes and partial fills.
/// Deserializes from decimal strings or integers only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct Quantity(Decimal);

impl Quantity {
    /// Create a new Quantity from a Decimal.
    #[must_use]
    pub const fn new(amount: Decimal) -> Self {
        Self(amount)
    }

    /// Create a Quantity from an integer.
    #[must_use]
    pub fn from_i64(amount: i64) -> Self {
        Self(Decimal::new(amount, 0))
    }

    /// Zero quantity.
    pub const ZERO: Self = Self(Decimal::ZERO);

    /// Get the inner Decimal value.
    #[must_use]
    pub const fn amount(&self) -> Decimal {
        self.0
    }

    /// Returns true if this quantity is positive.
    #[must_use]
    pub fn is_positive(&self) -> bool {
        self.0 > Decimal::ZERO
    }

    /// Returns true if this quantity is zero.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.0 == Decimal::ZERO
    }

    /// Notional value at `price`, `None` on overflow.
    #[must_use]
    pub fn checked_notional(&self, price: Money) -> Option<Money> {
        self.0.checked_mul(price.amount()).map(Money::new)
    }

    /// Validate quantity for order submission.
    ///
    /// # Errors
    ///
    /// Returns error if quantity is zero or negative.
    pub fn validate_for_order(&self) -> Result<(), DomainError> {
        if self.0 <= Decimal::ZERO {
            return Err(DomainError::invalid(
                "size",
                "Order size must be strictly positive",
            ));
        }
        Ok(())
    }
}

impl Default for Quantity {
    fn default() -> Self {
        Self::ZERO
    }
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.normalize())
    }
}

impl PartialOrd for Quantity {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Quantity {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.cmp(&other.0)
    }
}

impl<'de> Deserialize<'de> for Quantity {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        super::exact_decimal::deserialize(deserializer).map(Self)
    }
}

impl From<Decimal> for Quantity {
    fn from(value: Decimal) -> Self {
        Self(value)
    }
}

impl From<i64> for Quantity {
    fn from(value: i64) -> Self {
        Self::from_i64(value)
    }
}

impl From<Quantity> for Decimal {
    fn from(value: Quantity) -> Self {
        value.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn quantity_display_normalizes() {
        assert_eq!(format!("{}", Quantity::new(dec!(100.00))), "100");
        assert_eq!(format!("{}", Quantity::new(dec!(0.50))), "0.5");
    }

    #[test]
    fn quantity_validate_for_order() {
        assert!(Quantity::from_i64(1).validate_for_order().is_ok());
        assert!(Quantity::new(dec!(0.0001)).validate_for_order().is_ok());
        assert!(Quantity::ZERO.validate_for_order().is_err());
        assert!(Quantity::from_i64(-3).validate_for_order().is_err());
    }

    #[test]
    fn quantity_notional_is_exact() {
        let notional = Quantity::new(dec!(2.5)).checked_notional(Money::new(dec!(40.10)));
        assert_eq!(notional, Some(Money::new(dec!(100.25))));
    }

    #[test]
    fn quantity_deserialization_refuses_floats() {
        let parsed: Quantity = serde_json::from_str("\"0.123456789012345678\"").unwrap();
        assert_eq!(parsed.amount(), dec!(0.123456789012345678));
        assert!(serde_json::from_str::<Quantity>("0.5").is_err());
    }

    #[test]
    fn quantity_checked_notional_overflow() {
        let huge = Quantity::new(Decimal::MAX);
        assert!(huge.checked_notional(Money::new(dec!(2))).is_none());
        assert_eq!(
            Quantity::from_i64(3).checked_notional(Money::new(dec!(2))),
            Some(Money::new(dec!(6)))
        );
    }

    #[test]
    fn quantity_ordering() {
        assert!(Quantity::from_i64(5) > Quantity::from_i64(4));
        assert_eq!(Quantity::default(), Quantity::ZERO);
    }
}
