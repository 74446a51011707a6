//! Order Execution Bounded Context
//!
//! Immutable order requests and the results they produce.
//!
//! # Key Concepts
//!
//! - **OrderRequest**: a proposed order, valid by construction
//! - **OrderResult**: what a venue (or the engine, before dispatch) reports back
//! - **FailureKind**: which part of the pipeline refused or failed an order

pub mod errors;
pub mod value_objects;

pub use errors::OrderError;
pub use value_objects::{FailureKind, OrderRequest, OrderResult, OrderSide, OrderType};
