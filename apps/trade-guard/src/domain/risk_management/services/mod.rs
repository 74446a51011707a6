//! Risk Management Domain Services

mod order_validator;

pub use order_validator::OrderValidator;
