//! Risk Management Bounded Context
//!
//! Validates proposed orders against daily and exposure limits before dispatch.
//!
//! # Key Concepts
//!
//! - **Risk Limits**: static caps on position size, daily trades and exposure
//! - **Risk State**: per-engine counters, mutated only after confirmed fills
//! - **Order Validator**: ordered, short-circuiting checks with no side effects

pub mod errors;
pub mod services;
pub mod value_objects;

pub use errors::ValidationRejection;
pub use services::OrderValidator;
pub use value_objects::{RiskLimits, RiskState};
