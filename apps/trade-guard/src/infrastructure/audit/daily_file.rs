//! Daily JSON-lines audit files.
//!
//! One file per UTC calendar day, named `audit_YYYY-MM-DD.jsonl`, each line
//! a single [`AuditEntry`]. Files are only ever opened for append, and the
//! current day's file stays open between appends.

use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};

use chrono::NaiveDate;

use crate::application::ports::{AuditError, AuditSink};
use crate::domain::audit::AuditEntry;

/// Append-only audit log partitioned by UTC day.
#[derive(Debug)]
pub struct DailyFileAuditLog {
    directory: PathBuf,
    /// Day currently being written. The lock also keeps lines from interleaving.
    current: Mutex<Option<OpenDay>>,
}

#[derive(Debug)]
struct OpenDay {
    date: NaiveDate,
    file: File,
}

impl DailyFileAuditLog {
    /// Open (creating if needed) an audit directory.
    ///
    /// # Errors
    ///
    /// Returns [`AuditError::Io`] if the directory cannot be created.
    pub fn open(directory: impl Into<PathBuf>) -> Result<Self, AuditError> {
        let directory = directory.into();
        fs::create_dir_all(&directory).map_err(|source| AuditError::Io {
            path: directory.clone(),
            source,
        })?;

        Ok(Self {
            directory,
            current: Mutex::new(None),
        })
    }

    /// Audit directory.
    #[must_use]
    pub fn directory(&self) -> &Path {
        &self.directory
    }

    /// File holding the entries for `date`.
    #[must_use]
    pub fn path_for(&self, date: NaiveDate) -> PathBuf {
        self.directory
            .join(format!("audit_{}.jsonl", date.format("%Y-%m-%d")))
    }

    fn open_day(&self, date: NaiveDate) -> io::Result<OpenDay> {
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(self.path_for(date))?;
        tracing::debug!(date = %date, "Opened audit file");
        Ok(OpenDay { date, file })
    }

    /// Read back every entry recorded for `date`, in file order.
    ///
    /// A day with no file yields an empty list.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or a line is not a
    /// valid entry.
    pub fn read_day(&self, date: NaiveDate) -> Result<Vec<AuditEntry>, AuditError> {
        let path = self.path_for(date);
        let contents = match fs::read_to_string(&path) {
            Ok(contents) => contents,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(source) => return Err(AuditError::Io { path, source }),
        };

        contents
            .lines()
            .filter(|line| !line.trim().is_empty())
            .map(|line| serde_json::from_str(line).map_err(AuditError::from))
            .collect()
    }
}

impl AuditSink for DailyFileAuditLog {
    fn append(&self, entry: &AuditEntry) -> Result<(), AuditError> {
        let mut line = serde_json::to_string(entry)?;
        line.push('\n');
        let date = entry.timestamp().utc_date();

        let mut current = self.current.lock().unwrap_or_else(PoisonError::into_inner);
        let io_error = |source| AuditError::Io {
            path: self.path_for(date),
            source,
        };

        // A failed write leaves the slot empty so the next append reopens.
        let mut open = match current.take() {
            Some(open) if open.date == date => open,
            _ => self.open_day(date).map_err(io_error)?,
        };
        open.file.write_all(line.as_bytes()).map_err(io_error)?;
        *current = Some(open);
        Ok(())
    }
}
