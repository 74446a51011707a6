//! Order Execution Value Objects
//!
//! Immutable types for order submission.

mod order_request;
mod order_result;
mod order_side;
mod order_type;

pub use order_request::OrderRequest;
pub use order_result::{FailureKind, OrderResult};
pub use order_side::OrderSide;
pub use order_type::OrderType;
