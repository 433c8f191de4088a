//! Append-only audit log
//!
//! `audit.log` holds one JSON-encoded [`AuditEntry`] per line. Earlier lines
//! are never rewritten. A torn last line left by an interrupted append is
//! skipped when reading.

use std::fs::{self, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::PathBuf;

use crate::error::{MessbookError, MessbookResult};

use super::event::{AuditEntry, AuditEvent};

/// Handle on the audit log file
pub struct AuditLog {
    path: PathBuf,
}

impl AuditLog {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// Timestamp `event` and append it as one line
    pub fn append(&self, event: AuditEvent) -> MessbookResult<AuditEntry> {
        let entry = AuditEntry::now(event);
        let mut line = serde_json::to_string(&entry)?;
        line.push('\n');

        // One write per line keeps concurrent appends from interleaving
        OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .and_then(|mut file| file.write_all(line.as_bytes()))
            .map_err(|e| {
                MessbookError::Io(format!("Failed to append to {}: {}", self.path.display(), e))
            })?;

        tracing::debug!(event = %entry.event.describe(), "audit");
        Ok(entry)
    }

    /// Every readable entry, oldest first
    pub fn entries(&self) -> MessbookResult<Vec<AuditEntry>> {
        let contents = match fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => {
                return Err(MessbookError::Io(format!(
                    "Failed to read {}: {}",
                    self.path.display(),
                    e
                )))
            }
        };

        let entries = contents
            .lines()
            .enumerate()
            .filter(|(_, line)| !line.trim().is_empty())
            .filter_map(|(index, line)| match serde_json::from_str(line) {
                Ok(entry) => Some(entry),
                Err(e) => {
                    tracing::warn!(line = index + 1, error = %e, "skipping unreadable audit entry");
                    None
                }
            })
            .collect();
        Ok(entries)
    }

    /// The last `count` entries, oldest first
    pub fn latest(&self, count: usize) -> MessbookResult<Vec<AuditEntry>> {
        let mut entries = self.entries()?;
        let skip = entries.len().saturating_sub(count);
        Ok(entries.split_off(skip))
    }
}
