//! Audit entry types.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value, json};
use std::fmt;

use crate::domain::order_execution::{OrderRequest, OrderResult};
use crate::domain::shared::Timestamp;

/// Kind of audit record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AuditEntryKind {
    /// An order was sent and produced an outcome.
    Order,
    /// The engine decided something about an order.
    Decision,
}

impl fmt::Display for AuditEntryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Order => write!(f, "order"),
            Self::Decision => write!(f, "decision"),
        }
    }
}

/// Engine decision recorded in a `decision` entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Decision {
    /// The order was refused before dispatch.
    Reject,
    /// The order passed every check and is about to be sent.
    Send,
}

/// A single audit record.
///
/// Built only through [`AuditEntry::decision`] and [`AuditEntry::order`], so
/// `kind` always matches the payload shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuditEntry {
    timestamp: Timestamp,
    #[serde(rename = "type")]
    kind: AuditEntryKind,
    payload: Value,
}

impl AuditEntry {
    /// A `decision` record: `{decision, reason, order?}`.
    #[must_use]
    pub fn decision(
        timestamp: Timestamp,
        decision: Decision,
        reason: impl Into<String>,
        order: Option<&OrderRequest>,
    ) -> Self {
        let mut payload = Map::new();
        payload.insert("decision".to_string(), json!(decision));
        payload.insert("reason".to_string(), Value::String(reason.into()));
        if let Some(order) = order {
            payload.insert("order".to_string(), order_summary(order));
        }

        Self {
            timestamp,
            kind: AuditEntryKind::Decision,
            payload: Value::Object(payload),
        }
    }

    /// An `order` record: order fields followed by result fields.
    #[must_use]
    pub fn order(timestamp: Timestamp, order: &OrderRequest, result: &OrderResult) -> Self {
        let payload = json!({
            "symbol": order.symbol(),
            "side": order.side(),
            "order_type": order.order_type(),
            "size": order.size(),
            "price": order.price(),
            "success": result.success,
            "order_id": result.order_id,
            "filled_size": result.filled_size,
            "avg_price": result.avg_price,
            "error": result.error,
            "failure": result.failure,
        });

        Self {
            timestamp,
            kind: AuditEntryKind::Order,
            payload,
        }
    }

    /// When the record was taken.
    #[must_use]
    pub const fn timestamp(&self) -> Timestamp {
        self.timestamp
    }

    /// Record kind.
    #[must_use]
    pub const fn kind(&self) -> AuditEntryKind {
        self.kind
    }

    /// Raw payload object.
    #[must_use]
    pub const fn payload(&self) -> &Value {
        &self.payload
    }

    /// `reason` of a decision record.
    #[must_use]
    pub fn reason(&self) -> Option<&str> {
        self.payload.get("reason").and_then(Value::as_str)
    }

    /// `decision` of a decision record.
    #[must_use]
    pub fn decision_value(&self) -> Option<Decision> {
        self.payload
            .get("decision")
            .and_then(|v| Decision::deserialize(v).ok())
    }

    /// `success` flag of an order record.
    #[must_use]
    pub fn succeeded(&self) -> Option<bool> {
        self.payload.get("success").and_then(Value::as_bool)
    }
}

fn order_summary(order: &OrderRequest) -> Value {
    json!({
        "symbol": order.symbol(),
        "side": order.side(),
        "size": order.size(),
        "price": order.price(),
        "order_type": order.order_type(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::order_execution::{FailureKind, OrderSide};
    use crate::domain::shared::{Money, Quantity, VenueOrderId};
    use rust_decimal_macros::dec;

    fn ts() -> Timestamp {
        Timestamp::parse("2026-01-19T14:30:00Z").unwrap()
    }

    fn order() -> OrderRequest {
        OrderRequest::limit("AAPL", OrderSide::Buy, dec!(10), Money::new(dec!(150.25))).unwrap()
    }

    #[test]
    fn decision_entry_shape() {
        let entry = AuditEntry::decision(ts(), Decision::Send, "dispatching", Some(&order()));
        let value = serde_json::to_value(&entry).unwrap();

        assert_eq!(value["timestamp"], "2026-01-19T14:30:00Z");
        assert_eq!(value["type"], "decision");
        assert_eq!(value["payload"]["decision"], "SEND");
        assert_eq!(value["payload"]["reason"], "dispatching");
        assert_eq!(value["payload"]["order"]["symbol"], "AAPL");
        assert_eq!(value["payload"]["order"]["side"], "BUY");
        assert_eq!(value["payload"]["order"]["size"], "10");
        assert_eq!(value["payload"]["order"]["price"], "150.25");
        assert_eq!(entry.decision_value(), Some(Decision::Send));
    }

    #[test]
    fn decision_entry_without_order() {
        let entry = AuditEntry::decision(ts(), Decision::Reject, "circuit open", None);
        assert!(entry.payload().get("order").is_none());
        assert_eq!(entry.reason(), Some("circuit open"));
        assert_eq!(entry.kind(), AuditEntryKind::Decision);
    }

    #[test]
    fn order_entry_flattens_order_and_result() {
        let result = OrderResult::filled(
            VenueOrderId::new("v-1"),
            Quantity::new(dec!(10)),
            Money::new(dec!(150)),
        );
        let entry = AuditEntry::order(ts(), &order(), &result);
        let payload = entry.payload();

        assert_eq!(entry.kind(), AuditEntryKind::Order);
        assert_eq!(payload["symbol"], "AAPL");
        assert_eq!(payload["order_type"], "LIMIT");
        assert_eq!(payload["success"], true);
        assert_eq!(payload["order_id"], "v-1");
        assert_eq!(payload["filled_size"], "10");
        assert_eq!(payload["avg_price"], "150");
        assert!(payload["error"].is_null());
        assert_eq!(entry.succeeded(), Some(true));
    }

    #[test]
    fn failed_order_entry_carries_failure_kind() {
        let result = OrderResult::failed(FailureKind::Transport, "connection reset");
        let entry = AuditEntry::order(ts(), &order(), &result);
        assert_eq!(entry.payload()["failure"], "TRANSPORT");
        assert_eq!(entry.payload()["error"], "connection reset");
        assert_eq!(entry.succeeded(), Some(false));
    }

    #[test]
    fn entry_roundtrips_through_json_line() {
        let entry = AuditEntry::decision(ts(), Decision::Reject, "size exceeds maximum", None);
        let line = serde_json::to_string(&entry).unwrap();
        assert!(!line.contains('\n'));
        let parsed: AuditEntry = serde_json::from_str(&line).unwrap();
        assert_eq!(parsed, entry);
    }
}
