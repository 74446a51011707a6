//! Paper trading venue.

use async_trait::async_trait;

use crate::application::ports::{VenueError, VenuePort};
use crate::domain::order_execution::{OrderRequest, OrderResult};
use crate::domain::shared::{Money, VenueOrderId};

/// Simulated venue that fills every order immediately and in full.
///
/// Limit orders fill at their limit price. Market orders fill at their
/// indicative price when one is given, otherwise at the configured
/// reference price.
#[derive(Debug, Clone, Copy)]
pub struct PaperVenue {
    reference_price: Money,
}

impl PaperVenue {
    /// Create a paper venue quoting `reference_price` for unpriced orders.
    #[must_use]
    pub const fn new(reference_price: Money) -> Self {
        Self { reference_price }
    }

    /// Price used for unpriced market orders.
    #[must_use]
    pub const fn reference_price(&self) -> Money {
        self.reference_price
    }

    fn fill_price(&self, order: &OrderRequest) -> Money {
        order.price().unwrap_or(self.reference_price)
    }
}

#[async_trait]
impl VenuePort for PaperVenue {
    async fn send(&self, order: &OrderRequest) -> Result<OrderResult, VenueError> {
        let price = self.fill_price(order);
        let order_id = VenueOrderId::generate();

        tracing::info!(
            order_id = %order_id,
            symbol = %order.symbol(),
            side = %order.side(),
            size = %order.size(),
            price = %price,
            "Paper fill"
        );

        Ok(OrderResult::filled(order_id, order.size(), price))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::order_execution::OrderSide;
    use rust_decimal_macros::dec;

    #[tokio::test]
    async fn limit_order_fills_at_limit_price() {
        let venue = PaperVenue::new(Money::new(dec!(100)));
        let order =
            OrderRequest::limit("AAPL", OrderSide::Buy, dec!(3), Money::new(dec!(187.25))).unwrap();

        let result = venue.send(&order).await.unwrap();

        assert!(result.success);
        assert_eq!(result.filled_size, order.size());
        assert_eq!(result.avg_price, Money::new(dec!(187.25)));
        assert!(result.order_id.is_some());
        assert!(result.error.is_none());
    }

    #[tokio::test]
    async fn unpriced_market_order_fills_at_reference() {
        let venue = PaperVenue::new(Money::new(dec!(42.5)));
        let order = OrderRequest::market("BTC-USD", OrderSide::Sell, dec!(0.25)).unwrap();

        let result = venue.send(&order).await.unwrap();

        assert!(result.success);
        assert_eq!(result.avg_price, Money::new(dec!(42.5)));
    }

    #[tokio::test]
    async fn every_fill_gets_a_fresh_order_id() {
        let venue = PaperVenue::new(Money::ONE);
        let order = OrderRequest::market("ETH", OrderSide::Buy, dec!(1)).unwrap();

        let a = venue.send(&order).await.unwrap().order_id;
        let b = venue.send(&order).await.unwrap().order_id;

        assert_ne!(a, b);
    }
}
