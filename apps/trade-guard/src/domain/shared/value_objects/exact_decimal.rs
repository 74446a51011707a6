//! Exact decimal deserialization for monetary value objects.
//!
//! Accepts decimal strings and integers. Fractional numbers are refused:
//! by the time a visitor sees one it has already been rounded to `f64`.

use rust_decimal::Decimal;
use serde::de::{self, Deserializer, Unexpected, Visitor};
use std::fmt;

struct ExactDecimalVisitor;

impl Visitor<'_> for ExactDecimalVisitor {
    type Value = Decimal;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a decimal string or an integer")
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Decimal, E> {
        Decimal::from_str_exact(v.trim())
            .map_err(|_| E::invalid_value(Unexpected::Str(v), &self))
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<Decimal, E> {
        Ok(Decimal::from(v))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<Decimal, E> {
        Ok(Decimal::from(v))
    }

    fn visit_i128<E: de::Error>(self, v: i128) -> Result<Decimal, E> {
        Decimal::try_from_i128_with_scale(v, 0)
            .map_err(|_| E::custom(format!("integer {v} is out of decimal range")))
    }

    fn visit_u128<E: de::Error>(self, v: u128) -> Result<Decimal, E> {
        i128::try_from(v)
            .map_err(|_| E::custom(format!("integer {v} is out of decimal range")))
            .and_then(|v| self.visit_i128(v))
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<Decimal, E> {
        Err(E::custom(format!(
            "fractional number {v} must be quoted as a string to keep its exact value"
        )))
    }
}

/// Deserialize a [`Decimal`] without passing through binary floating point.
pub(super) fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Decimal, D::Error> {
    deserializer.deserialize_any(ExactDecimalVisitor)
}
