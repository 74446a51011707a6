//! Audit Port (Driven Port)
//!
//! Append-only storage for audit records.

use std::path::PathBuf;

use crate::domain::audit::AuditEntry;

/// Audit storage error.
#[derive(Debug, thiserror::Error)]
pub enum AuditError {
    /// Writing or reading the backing file failed.
    #[error("audit I/O error at {}: {source}", .path.display())]
    Io {
        /// File involved.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },

    /// A record could not be encoded or decoded.
    #[error("audit serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Port for appending audit records.
///
/// No update or delete operation exists. Appends from one
/// engine arrive in the order its steps complete.
pub trait AuditSink: Send + Sync {
    /// Append one record.
    fn append(&self, entry: &AuditEntry) -> Result<(), AuditError>;
}
