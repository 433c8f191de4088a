//! Storage layer for Messbook
//!
//! Provides JSON file storage with atomic writes and automatic directory
//! creation, plus the audit trail every mutation goes through.

pub mod expenses;
pub mod file_io;
pub mod init;

pub use expenses::ExpenseRepository;
pub use file_io::{read_json, write_json_atomic};
pub use init::initialize_storage;

use crate::audit::{AuditEvent, AuditLog};
use crate::config::MessbookPaths;
use crate::error::MessbookError;

/// Main storage coordinator that provides access to all repositories
pub struct Storage {
    paths: MessbookPaths,
    pub expenses: ExpenseRepository,
    audit: AuditLog,
}

impl Storage {
    /// Create a new Storage instance
    pub fn new(paths: MessbookPaths) -> Result<Self, MessbookError> {
        paths.ensure_directories()?;

        Ok(Self {
            expenses: ExpenseRepository::new(paths.expenses_file()),
            audit: AuditLog::new(paths.audit_log()),
            paths,
        })
    }

    /// Get the paths configuration
    pub fn paths(&self) -> &MessbookPaths {
        &self.paths
    }

    /// Get the audit log
    pub fn audit(&self) -> &AuditLog {
        &self.audit
    }

    /// Load all data from disk
    pub fn load_all(&mut self) -> Result<(), MessbookError> {
        self.expenses.load()
    }

    /// Append a change to the audit log
    pub fn record(&self, event: AuditEvent) -> Result<(), MessbookError> {
        self.audit.append(event).map(|_| ())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_storage_creation() {
        let temp_dir = TempDir::new().unwrap();
        let paths = MessbookPaths::with_base_dir(temp_dir.path().to_path_buf());
        let storage = Storage::new(paths).unwrap();

        assert!(temp_dir.path().join("data").exists());
        assert!(!storage.paths().is_initialized());
    }

    #[test]
    fn test_record_appends_to_audit_log() {
        let temp_dir = TempDir::new().unwrap();
        let paths = MessbookPaths::with_base_dir(temp_dir.path().to_path_buf());
        let storage = Storage::new(paths).unwrap();

        storage
            .record(AuditEvent::ParticipantAdded {
                name: "Akash".into(),
            })
            .unwrap();
        storage
            .record(AuditEvent::ParticipantRemoved {
                name: "Akash".into(),
            })
            .unwrap();

        let entries = storage.audit().entries().unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[1].event.describe(), "removed participant Akash");
        assert!(temp_dir.path().join("audit.log").exists());
    }
}
