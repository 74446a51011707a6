//! Audit trail configuration.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Audit settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditSettings {
    /// Directory holding the daily `audit_YYYY-MM-DD.jsonl` files.
    #[serde(default = "default_audit_directory")]
    pub directory: PathBuf,
}

impl Default for AuditSettings {
    fn default() -> Self {
        Self {
            directory: default_audit_directory(),
        }
    }
}

fn default_audit_directory() -> PathBuf {
    PathBuf::from("audit")
}
