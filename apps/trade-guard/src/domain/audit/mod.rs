//! Audit Bounded Context
//!
//! Append-only records of engine decisions and order outcomes.
//!
//! # Record Format
//!
//! One JSON object per line, one file per UTC day:
//!
//! ```text
//! {"timestamp":"2026-01-19T14:30:00.000Z","type":"decision","payload":{...}}
//! ```

mod clock;
mod entry;

pub use clock::AuditClock;
pub use entry::{AuditEntry, AuditEntryKind, Decision};
