//! Proposed order, valid by construction.

use serde::{Deserialize, Serialize};

use super::{OrderSide, OrderType};
use crate::domain::order_execution::errors::OrderError;
use crate::domain::shared::{Money, Quantity, Symbol};

/// An immutable order proposal.
///
/// Every constructor enforces:
/// - size is strictly positive
/// - a price, when present, is strictly positive
/// - a LIMIT order carries a price
///
/// Deserialization runs through the same checks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawOrderRequest")]
pub struct OrderRequest {
    symbol: Symbol,
    side: OrderSide,
    order_type: OrderType,
    size: Quantity,
    price: Option<Money>,
}

/// Wire shape before validation.
#[derive(Debug, Deserialize)]
struct RawOrderRequest {
    symbol: String,
    side: OrderSide,
    #[serde(default = "default_order_type", alias = "kind")]
    order_type: OrderType,
    size: Quantity,
    #[serde(default)]
    price: Option<Money>,
}

const fn default_order_type() -> OrderType {
    OrderType::Market
}

impl TryFrom<RawOrderRequest> for OrderRequest {
    type Error = OrderError;

    fn try_from(raw: RawOrderRequest) -> Result<Self, Self::Error> {
        Self::new(raw.symbol, raw.side, raw.order_type, raw.size, raw.price)
    }
}

impl OrderRequest {
    /// Build a validated order.
    ///
    /// # Errors
    ///
    /// Returns [`OrderError`] if the symbol, size or price is invalid, or a
    /// LIMIT order has no price.
    pub fn new(
        symbol: impl AsRef<str>,
        side: OrderSide,
        order_type: OrderType,
        size: impl Into<Quantity>,
        price: Option<Money>,
    ) -> Result<Self, OrderError> {
        let symbol = Symbol::parse(symbol)?;
        let size = size.into();
        size.validate_for_order()?;

        if let Some(price) = price {
            price.validate_as_price()?;
        }
        if order_type.requires_limit_price() && price.is_none() {
            return Err(OrderError::MissingLimitPrice);
        }

        Ok(Self {
            symbol,
            side,
            order_type,
            size,
            price,
        })
    }

    /// Build an unpriced market order.
    ///
    /// # Errors
    ///
    /// Returns [`OrderError`] if the symbol or size is invalid.
    pub fn market(
        symbol: impl AsRef<str>,
        side: OrderSide,
        size: impl Into<Quantity>,
    ) -> Result<Self, OrderError> {
        Self::new(symbol, side, OrderType::Market, size, None)
    }

    /// Build a limit order.
    ///
    /// # Errors
    ///
    /// Returns [`OrderError`] if the symbol, size or price is invalid.
    pub fn limit(
        symbol: impl AsRef<str>,
        side: OrderSide,
        size: impl Into<Quantity>,
        price: impl Into<Money>,
    ) -> Result<Self, OrderError> {
        Self::new(symbol, side, OrderType::Limit, size, Some(price.into()))
    }

    /// Instrument symbol.
    #[must_use]
    pub const fn symbol(&self) -> &Symbol {
        &self.symbol
    }

    /// Buy or sell.
    #[must_use]
    pub const fn side(&self) -> OrderSide {
        self.side
    }

    /// Market or limit.
    #[must_use]
    pub const fn order_type(&self) -> OrderType {
        self.order_type
    }

    /// Requested size.
    #[must_use]
    pub const fn size(&self) -> Quantity {
        self.size
    }

    /// Limit price, or the indicative price of a market order.
    #[must_use]
    pub const fn price(&self) -> Option<Money> {
        self.price
    }

    /// Notional counted against exposure before dispatch.
    ///
    /// An unpriced order is valued at one unit per share. `None` on overflow.
    #[must_use]
    pub fn exposure_notional(&self) -> Option<Money> {
        self.size.checked_notional(self.price.unwrap_or(Money::ONE))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::shared::DomainError;
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    #[test]
    fn market_order_without_price() {
        let order = OrderRequest::market("aapl", OrderSide::Buy, dec!(10)).unwrap();
        assert_eq!(order.symbol().as_str(), "AAPL");
        assert_eq!(order.order_type(), OrderType::Market);
        assert!(order.price().is_none());
        assert_eq!(order.exposure_notional(), Some(Money::new(dec!(10))));
    }

    #[test]
    fn limit_order_notional_uses_price() {
        let order =
            OrderRequest::limit("MSFT", OrderSide::Sell, dec!(2.5), Money::new(dec!(400))).unwrap();
        assert_eq!(order.exposure_notional(), Some(Money::new(dec!(1000))));
    }

    #[test]
    fn rejects_non_positive_size() {
        let err = OrderRequest::market("AAPL", OrderSide::Buy, dec!(0)).unwrap_err();
        assert!(matches!(err, OrderError::InvalidField(ref e) if e.field() == "size"));
        assert!(OrderRequest::market("AAPL", OrderSide::Buy, dec!(-1)).is_err());
    }

    #[test]
    fn rejects_limit_without_price() {
        let err = OrderRequest::new("AAPL", OrderSide::Buy, OrderType::Limit, dec!(1), None).unwrap_err();
        assert_eq!(err, OrderError::MissingLimitPrice);
    }

    #[test]
    fn rejects_non_positive_price() {
        let err = OrderRequest::limit("AAPL", OrderSide::Buy, dec!(1), Money::ZERO).unwrap_err();
        assert_eq!(
            err,
            OrderError::InvalidField(DomainError::invalid("price", "Price must be positive"))
        );
        assert!(
            OrderRequest::new(
                "AAPL",
                OrderSide::Buy,
                OrderType::Market,
                dec!(1),
                Some(Money::new(dec!(-1)))
            )
            .is_err()
        );
    }

    #[test]
    fn rejects_bad_symbol() {
        assert!(OrderRequest::market("", OrderSide::Buy, dec!(1)).is_err());
    }

    #[test]
    fn exposure_notional_overflow_is_none() {
        let order =
            OrderRequest::limit("AAPL", OrderSide::Buy, Decimal::MAX, Money::new(dec!(2))).unwrap();
        assert!(order.exposure_notional().is_none());
    }

    #[test]
    fn deserialize_validates() {
        let order: OrderRequest = serde_json::from_str(
            r#"{"symbol":"btc-usd","side":"BUY","order_type":"LIMIT","size":"0.5","price":"42000"}"#,
        )
        .unwrap();
        assert_eq!(order.symbol().as_str(), "BTC-USD");
        assert_eq!(order.price(), Some(Money::new(dec!(42000))));

        let market: OrderRequest =
            serde_json::from_str(r#"{"symbol":"AAPL","side":"SELL","size":3}"#).unwrap();
        assert_eq!(market.order_type(), OrderType::Market);

        assert!(
            serde_json::from_str::<OrderRequest>(
                r#"{"symbol":"AAPL","side":"BUY","order_type":"LIMIT","size":"1"}"#
            )
            .is_err()
        );
        assert!(
            serde_json::from_str::<OrderRequest>(r#"{"symbol":"AAPL","side":"BUY","size":"0"}"#)
                .is_err()
        );
    }

    #[test]
    fn long_decimal_prices_survive_json_exactly() {
        let order: OrderRequest = serde_json::from_str(
            r#"{"symbol":"AAPL","side":"BUY","order_type":"LIMIT","size":"2","price":"187.123456789012345"}"#,
        )
        .unwrap();
        assert_eq!(order.price(), Some(Money::new(dec!(187.123456789012345))));

        let err = serde_json::from_str::<OrderRequest>(
            r#"{"symbol":"AAPL","side":"BUY","order_type":"LIMIT","size":"2","price":187.123456789012345}"#,
        )
        .unwrap_err();
        assert!(err.to_string().contains("must be quoted"));
    }

    #[test]
    fn serialize_shape() {
        let order = OrderRequest::limit("AAPL", OrderSide::Buy, dec!(5), Money::new(dec!(10.5))).unwrap();
        let value = serde_json::to_value(&order).unwrap();
        assert_eq!(value["symbol"], "AAPL");
        assert_eq!(value["side"], "BUY");
        assert_eq!(value["order_type"], "LIMIT");
        assert_eq!(value["size"], "5");
        assert_eq!(value["price"], "10.5");
    }
}
