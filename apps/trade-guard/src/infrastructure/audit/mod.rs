//! Audit Adapters
//!
//! Implementations of [`AuditSink`](crate::application::ports::AuditSink).

mod daily_file;
mod in_memory;

pub use daily_file::DailyFileAuditLog;
pub use in_memory::InMemoryAuditLog;
