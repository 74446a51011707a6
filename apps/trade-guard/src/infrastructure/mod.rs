//! Infrastructure Layer
//!
//! Adapters implementing the ports defined in the application layer:
//!
//! - `audit/`: Audit sinks (daily JSON-lines files, in-memory)
//! - `venue/`: Venue adapters (paper trading)

pub mod audit;
pub mod venue;
