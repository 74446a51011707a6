//! Outcome of an order attempt.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::shared::{Money, Quantity, VenueOrderId};

/// Which stage refused or failed an order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FailureKind {
    /// Rejected by risk validation before dispatch.
    Validation,
    /// Refused by the circuit breaker before dispatch.
    CircuitOpen,
    /// The venue answered but reported the order as not filled.
    Venue,
    /// The venue call faulted (error, timeout, panic or cancellation).
    Transport,
}

impl FailureKind {
    /// Returns true if the order never left the engine.
    #[must_use]
    pub const fn is_local(&self) -> bool {
        matches!(self, Self::Validation | Self::CircuitOpen)
    }

    /// Lowercase label used for metric labels.
    #[must_use]
    pub const fn as_label(&self) -> &'static str {
        match self {
            Self::Validation => "validation",
            Self::CircuitOpen => "circuit_open",
            Self::Venue => "venue",
            Self::Transport => "transport",
        }
    }
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Validation => write!(f, "VALIDATION"),
            Self::CircuitOpen => write!(f, "CIRCUIT_OPEN"),
            Self::Venue => write!(f, "VENUE"),
            Self::Transport => write!(f, "TRANSPORT"),
        }
    }
}

/// Result of an order attempt, returned for every call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderResult {
    /// True only for a confirmed fill.
    pub success: bool,
    /// Venue-assigned identifier, if the venue accepted the order.
    #[serde(default)]
    pub order_id: Option<VenueOrderId>,
    /// Filled size.
    #[serde(default)]
    pub filled_size: Quantity,
    /// Average fill price.
    #[serde(default)]
    pub avg_price: Money,
    /// Human-readable failure reason.
    #[serde(default)]
    pub error: Option<String>,
    /// Failure category; absent on success.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub failure: Option<FailureKind>,
}

impl OrderResult {
    /// A confirmed fill.
    #[must_use]
    pub fn filled(order_id: VenueOrderId, filled_size: Quantity, avg_price: Money) -> Self {
        Self {
            success: true,
            order_id: Some(order_id),
            filled_size,
            avg_price,
            error: None,
            failure: None,
        }
    }

    /// A failed attempt with nothing filled.
    #[must_use]
    pub fn failed(kind: FailureKind, error: impl Into<String>) -> Self {
        Self {
            success: false,
            order_id: None,
            filled_size: Quantity::ZERO,
            avg_price: Money::ZERO,
            error: Some(error.into()),
            failure: Some(kind),
        }
    }

    /// Filled notional (`filled_size × avg_price`), `None` on overflow.
    #[must_use]
    pub fn notional(&self) -> Option<Money> {
        self.filled_size.checked_notional(self.avg_price)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn filled_result() {
        let result = OrderResult::filled(
            VenueOrderId::new("abc"),
            Quantity::new(dec!(4)),
            Money::new(dec!(25.5)),
        );
        assert!(result.success);
        assert!(result.error.is_none());
        assert!(result.failure.is_none());
        assert_eq!(result.notional(), Some(Money::new(dec!(102))));
    }

    #[test]
    fn failed_result_defaults_to_zero_fill() {
        let result = OrderResult::failed(FailureKind::Validation, "size exceeds maximum");
        assert!(!result.success);
        assert!(result.order_id.is_none());
        assert!(result.filled_size.is_zero());
        assert!(result.avg_price.is_zero());
        assert_eq!(result.error.as_deref(), Some("size exceeds maximum"));
        assert_eq!(result.failure, Some(FailureKind::Validation));
    }

    #[test]
    fn failure_kind_is_local() {
        assert!(FailureKind::Validation.is_local());
        assert!(FailureKind::CircuitOpen.is_local());
        assert!(!FailureKind::Venue.is_local());
        assert!(!FailureKind::Transport.is_local());
    }

    #[test]
    fn venue_payload_defaults() {
        let result: OrderResult = serde_json::from_str(r#"{"success":false}"#).unwrap();
        assert!(!result.success);
        assert!(result.filled_size.is_zero());
        assert!(result.failure.is_none());
    }

    #[test]
    fn success_serialization_omits_failure() {
        let result = OrderResult::filled(VenueOrderId::new("x"), Quantity::ZERO, Money::ZERO);
        let value = serde_json::to_value(&result).unwrap();
        assert!(value.get("failure").is_none());
        assert_eq!(value["order_id"], "x");

        let failed = OrderResult::failed(FailureKind::CircuitOpen, "open");
        let value = serde_json::to_value(&failed).unwrap();
        assert_eq!(value["failure"], "CIRCUIT_OPEN");
    }
}
