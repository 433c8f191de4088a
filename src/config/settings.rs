//! User settings for Messbook
//!
//! Holds the participant roster and display preferences, persisted to
//! `config.json` in the base directory.

use serde::{Deserialize, Serialize};

use super::paths::MessbookPaths;
use crate::error::MessbookError;
use crate::models::Roster;
use crate::storage::write_json_atomic;

/// User settings for Messbook
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Schema version for migration support
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    /// Currency symbol used when printing amounts
    #[serde(default = "default_currency")]
    pub currency_symbol: String,

    /// Date format preference (strftime format)
    #[serde(default = "default_date_format")]
    pub date_format: String,

    /// People who share expenses, in display order
    #[serde(default)]
    pub participants: Roster,
}

fn default_schema_version() -> u32 {
    1
}

fn default_currency() -> String {
    "₹".to_string()
}

fn default_date_format() -> String {
    "%Y-%m-%d".to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            currency_symbol: default_currency(),
            date_format: default_date_format(),
            participants: Roster::default(),
        }
    }
}

impl Settings {
    /// The current roster
    pub fn roster(&self) -> &Roster {
        &self.participants
    }

    /// Format an amount with the configured currency symbol
    pub fn format_money(&self, amount: crate::models::Money) -> String {
        amount.format_with_symbol(&self.currency_symbol)
    }

    /// Load settings from disk, or create default settings if file doesn't exist
    pub fn load_or_create(paths: &MessbookPaths) -> Result<Self, MessbookError> {
        let settings_path = paths.settings_file();

        if settings_path.exists() {
            let contents = std::fs::read_to_string(&settings_path).map_err(|e| {
                MessbookError::Io(format!("Failed to read settings file: {}", e))
            })?;

            let settings: Settings = serde_json::from_str(&contents).map_err(|e| {
                MessbookError::Config(format!("Failed to parse settings file: {}", e))
            })?;

            tracing::debug!(path = %settings_path.display(), "loaded settings");
            Ok(settings)
        } else {
            // Not persisted until the caller saves
            Ok(Settings::default())
        }
    }

    /// Save settings to disk, replacing `config.json` atomically
    pub fn save(&self, paths: &MessbookPaths) -> Result<(), MessbookError> {
        paths.ensure_directories()?;
        write_json_atomic(&paths.settings_file(), self)
    }
}
