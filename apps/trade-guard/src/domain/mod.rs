//! Domain Layer
//!
//! The innermost layer containing business logic with zero infrastructure dependencies.
//! This layer defines:
//!
//! - **Value Objects**: Immutable domain types with equality by value
//! - **Domain Services**: Stateless business logic
//! - **Audit Records**: The durable shape of every engine decision
//!
//! # Bounded Contexts
//!
//! - [`order_execution`]: Order requests and results
//! - [`risk_management`]: Risk limits, daily counters and pre-dispatch validation
//! - [`audit`]: Append-only decision and order records

pub mod audit;
pub mod order_execution;
pub mod risk_management;
pub mod shared;
