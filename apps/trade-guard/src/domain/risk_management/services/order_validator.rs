//! Order Validator
//!
//! Pre-dispatch checks of a proposed order against the current risk state.

use crate::domain::order_execution::OrderRequest;
use crate::domain::risk_management::errors::ValidationRejection;
use crate::domain::risk_management::value_objects::RiskState;

/// Stateless pre-dispatch validator.
///
/// Checks run in a fixed order and stop at the first failure:
/// 1. daily trade count against `max_daily_trades`
/// 2. order size against `max_position_size`
/// 3. order notional plus current exposure against `max_exposure`
#[derive(Debug, Clone, Copy, Default)]
pub struct OrderValidator;

impl OrderValidator {
    /// Validate `order` against `state`.
    ///
    /// # Errors
    ///
    /// Returns the first [`ValidationRejection`] that applies.
    pub fn validate(order: &OrderRequest, state: &RiskState) -> Result<(), ValidationRejection> {
        let limits = state.limits();

        if state.daily_trades() >= limits.max_daily_trades {
            return Err(ValidationRejection::DailyTradeLimit);
        }

        if order.size() > limits.max_position_size {
            return Err(ValidationRejection::SizeExceedsMaximum);
        }

        // Overflow anywhere counts as a breach.
        let projected = order
            .exposure_notional()
            .and_then(|notional| notional.checked_add(state.exposure()));
        match projected {
            Some(total) if total <= limits.max_exposure => Ok(()),
            _ => Err(ValidationRejection::ExposureLimit),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::order_execution::OrderSide;
    use crate::domain::risk_management::value_objects::RiskLimits;
    use crate::domain::shared::{Money, Quantity};
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;
    use test_case::test_case;

    fn state(max_trades: u32) -> RiskState {
        RiskState::new(
            RiskLimits::new(Quantity::from_i64(100), max_trades, Money::new(dec!(10000))).unwrap(),
        )
    }

    fn limit(size: Decimal, price: Decimal) -> OrderRequest {
        OrderRequest::limit("AAPL", OrderSide::Buy, size, Money::new(price)).unwrap()
    }

    #[test]
    fn accepts_order_within_limits() {
        assert_eq!(
            OrderValidator::validate(&limit(dec!(10), dec!(100)), &state(5)),
            Ok(())
        );
    }

    #[test]
    fn exposure_exactly_at_limit_is_allowed() {
        assert!(OrderValidator::validate(&limit(dec!(100), dec!(100)), &state(5)).is_ok());
    }

    #[test_case(dec!(101), dec!(1), ValidationRejection::SizeExceedsMaximum ; "size over max")]
    #[test_case(dec!(100), dec!(100.01), ValidationRejection::ExposureLimit ; "notional over max")]
    #[test_case(dec!(1), Decimal::MAX, ValidationRejection::ExposureLimit ; "notional overflow")]
    fn rejects(size: Decimal, price: Decimal, expected: ValidationRejection) {
        assert_eq!(
            OrderValidator::validate(&limit(size, price), &state(5)),
            Err(expected)
        );
    }

    #[test]
    fn daily_trade_limit_checked_first() {
        let mut state = state(1);
        state.record_fill(Money::new(dec!(1)));
        // Also oversized; the trade limit wins.
        assert_eq!(
            OrderValidator::validate(&limit(dec!(500), dec!(100)), &state),
            Err(ValidationRejection::DailyTradeLimit)
        );
    }

    #[test]
    fn size_checked_before_exposure() {
        assert_eq!(
            OrderValidator::validate(&limit(dec!(200), dec!(1000)), &state(5)),
            Err(ValidationRejection::SizeExceedsMaximum)
        );
    }

    #[test]
    fn existing_exposure_counts() {
        let mut state = state(5);
        state.record_fill(Money::new(dec!(9500)));
        assert_eq!(
            OrderValidator::validate(&limit(dec!(10), dec!(60)), &state),
            Err(ValidationRejection::ExposureLimit)
        );
        assert!(OrderValidator::validate(&limit(dec!(10), dec!(50)), &state).is_ok());
    }

    #[test]
    fn unpriced_market_order_valued_at_one() {
        let order = OrderRequest::market("AAPL", OrderSide::Sell, dec!(100)).unwrap();
        let mut state = state(5);
        state.record_fill(Money::new(dec!(9900)));
        assert!(OrderValidator::validate(&order, &state).is_ok());
        state.record_fill(Money::new(dec!(1)));
        assert_eq!(
            OrderValidator::validate(&order, &state),
            Err(ValidationRejection::ExposureLimit)
        );
    }

    #[test]
    fn validation_has_no_side_effects() {
        let state = state(5);
        let before = state.clone();
        let _ = OrderValidator::validate(&limit(dec!(10), dec!(100)), &state);
        assert_eq!(state, before);
    }
}
