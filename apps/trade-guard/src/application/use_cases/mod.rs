//! Use Cases
//!
//! Application-specific business rules that orchestrate domain logic.

mod execute_order;

pub use execute_order::{EngineConfig, EngineError, ExecutionEngine};
