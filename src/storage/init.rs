//! Storage initialization
//!
//! Handles first-run setup of the data directory

use crate::config::{MessbookPaths, Settings};
use crate::error::MessbookError;
use crate::models::Roster;

use super::expenses::ExpenseData;
use super::file_io::write_json_atomic;

/// Initialize storage for a fresh installation
///
/// Creates the directories and an empty expense store, and writes
/// `config.json` with `roster` unless a configuration already exists.
/// Existing data is never overwritten.
pub fn initialize_storage(paths: &MessbookPaths, roster: Roster) -> Result<Settings, MessbookError> {
    paths.ensure_directories()?;

    if !paths.expenses_file().exists() {
        write_json_atomic(&paths.expenses_file(), &ExpenseData::default())?;
    }

    if paths.is_initialized() {
        tracing::info!(path = %paths.base_dir().display(), "already initialized");
        return Settings::load_or_create(paths);
    }

    let settings = Settings {
        participants: roster,
        ..Settings::default()
    };
    settings.save(paths)?;

    tracing::info!(
        path = %paths.base_dir().display(),
        participants = settings.participants.len(),
        "initialized data directory"
    );
    Ok(settings)
}
