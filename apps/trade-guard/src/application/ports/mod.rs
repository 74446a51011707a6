//! Application Ports (Driven)
//!
//! Ports define how the engine uses external systems:
//! - [`VenuePort`]: sends orders to a market
//! - [`AuditSink`]: stores audit records

mod audit_port;
mod venue_port;

pub use audit_port::{AuditError, AuditSink};
pub use venue_port::{VenueError, VenuePort};
