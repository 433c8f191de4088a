//! JSON persistence for the expense store and settings
//!
//! Writes go to a sibling `.tmp` file that is synced and then renamed over
//! the target, so `expenses.json` and `config.json` are either the old or
//! the new version after a crash.

use std::fmt::Display;
use std::fs::{self, File};
use std::io::{self, ErrorKind, Write};
use std::path::{Path, PathBuf};

use serde::{de::DeserializeOwned, Serialize};

use crate::error::MessbookError;

fn storage_error(what: &str, path: &Path, err: impl Display) -> MessbookError {
    MessbookError::Storage(format!("Failed to {} {}: {}", what, path.display(), err))
}

/// Load `path`, or `T::default()` when nothing has been written yet
pub fn read_json<T: DeserializeOwned + Default>(path: &Path) -> Result<T, MessbookError> {
    let bytes = match fs::read(path) {
        Ok(bytes) => bytes,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(T::default()),
        Err(e) => return Err(storage_error("read", path, e)),
    };
    serde_json::from_slice(&bytes).map_err(|e| storage_error("parse", path, e))
}

/// Replace `path` with the pretty-printed JSON of `data`
pub fn write_json_atomic<T: Serialize>(path: &Path, data: &T) -> Result<(), MessbookError> {
    let mut bytes = serde_json::to_vec_pretty(data).map_err(|e| storage_error("encode", path, e))?;
    bytes.push(b'\n');

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| storage_error("create directory for", path, e))?;
    }

    let temp = temp_path(path);
    if let Err(e) = write_synced(&temp, &bytes).and_then(|_| fs::rename(&temp, path)) {
        let _ = fs::remove_file(&temp);
        return Err(storage_error("write", path, e));
    }

    tracing::trace!(path = %path.display(), bytes = bytes.len(), "saved");
    Ok(())
}

fn temp_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().unwrap_or_default().to_os_string();
    name.push(".tmp");
    path.with_file_name(name)
}

fn write_synced(path: &Path, bytes: &[u8]) -> io::Result<()> {
    let mut file = File::create(path)?;
    file.write_all(bytes)?;
    file.sync_all()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Expense, Money};
    use crate::storage::expenses::ExpenseData;
    use chrono::NaiveDate;
    use tempfile::TempDir;

    fn rice() -> Expense {
        Expense::new(
            "Akash",
            "Rice",
            Money::from_cents(45000),
            NaiveDate::from_ymd_opt(2025, 1, 15).unwrap(),
        )
    }

    #[test]
    fn test_missing_store_reads_as_empty() {
        let temp_dir = TempDir::new().unwrap();
        let data: ExpenseData = read_json(&temp_dir.path().join("expenses.json")).unwrap();
        assert!(data.expenses.is_empty());
    }

    #[test]
    fn test_save_replaces_previous_store() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("data").join("expenses.json");

        write_json_atomic(&path, &ExpenseData { expenses: vec![rice(), rice()] }).unwrap();
        let only = rice();
        write_json_atomic(&path, &ExpenseData { expenses: vec![only.clone()] }).unwrap();

        let loaded: ExpenseData = read_json(&path).unwrap();
        assert_eq!(loaded.expenses, vec![only]);
        assert!(!temp_dir.path().join("data").join("expenses.json.tmp").exists());
    }

    #[test]
    fn test_corrupt_store_names_the_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("expenses.json");
        fs::write(&path, "{\"expenses\": [").unwrap();

        match read_json::<ExpenseData>(&path) {
            Err(MessbookError::Storage(msg)) => assert!(msg.contains("expenses.json")),
            other => panic!("expected storage error, got {:?}", other.map(|d| d.expenses.len())),
        }
    }

    #[test]
    fn test_failed_write_leaves_no_temp_file() {
        let temp_dir = TempDir::new().unwrap();
        // A directory in the way makes the rename fail
        let path = temp_dir.path().join("expenses.json");
        fs::create_dir(&path).unwrap();
        fs::write(path.join("keep"), "x").unwrap();

        let result = write_json_atomic(&path, &ExpenseData::default());
        assert!(matches!(result, Err(MessbookError::Storage(_))));
        assert!(!temp_dir.path().join("expenses.json.tmp").exists());
    }
}
