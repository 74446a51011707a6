//! Application Layer
//!
//! The application layer orchestrates domain logic through use cases.
//! It defines:
//!
//! - **Ports**: Interfaces for the venue and the audit store
//! - **Use Cases**: The guarded order execution pipeline

pub mod ports;
pub mod use_cases;

pub use ports::*;
pub use use_cases::*;
