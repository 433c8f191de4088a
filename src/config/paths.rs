//! Where Messbook keeps its files
//!
//! The base directory is the first of:
//!
//! 1. `MESSBOOK_DATA_DIR`
//! 2. `%APPDATA%\messbook` on Windows
//! 3. `$XDG_CONFIG_HOME/messbook`
//! 4. `$HOME/.config/messbook`
//!
//! ```text
//! <base>/config.json          settings and roster
//! <base>/audit.log            change history
//! <base>/data/expenses.json   expense store
//! ```

use std::ffi::OsString;
use std::path::PathBuf;

use crate::error::MessbookError;

/// Environment variable that overrides the data directory
pub const DATA_DIR_ENV: &str = "MESSBOOK_DATA_DIR";

/// Resolved file locations under one base directory
#[derive(Debug, Clone)]
pub struct MessbookPaths {
    base_dir: PathBuf,
}

impl MessbookPaths {
    /// Resolve the base directory from the process environment
    pub fn new() -> Result<Self, MessbookError> {
        Self::from_env(|key| std::env::var_os(key))
    }

    /// Resolve the base directory using `var` to look up environment values
    pub fn from_env(var: impl Fn(&str) -> Option<OsString>) -> Result<Self, MessbookError> {
        let set = |key: &str| var(key).filter(|value| !value.is_empty()).map(PathBuf::from);

        let base_dir = if let Some(custom) = set(DATA_DIR_ENV) {
            custom
        } else if let Some(appdata) = set("APPDATA").filter(|_| cfg!(windows)) {
            appdata.join("messbook")
        } else if let Some(xdg) = set("XDG_CONFIG_HOME") {
            xdg.join("messbook")
        } else if let Some(home) = set("HOME") {
            home.join(".config").join("messbook")
        } else {
            return Err(MessbookError::Config(format!(
                "Could not determine home directory; set {} instead",
                DATA_DIR_ENV
            )));
        };

        Ok(Self { base_dir })
    }

    pub fn with_base_dir(base_dir: PathBuf) -> Self {
        Self { base_dir }
    }

    pub fn base_dir(&self) -> &PathBuf {
        &self.base_dir
    }

    pub fn data_dir(&self) -> PathBuf {
        self.base_dir.join("data")
    }

    pub fn settings_file(&self) -> PathBuf {
        self.base_dir.join("config.json")
    }

    pub fn audit_log(&self) -> PathBuf {
        self.base_dir.join("audit.log")
    }

    pub fn expenses_file(&self) -> PathBuf {
        self.data_dir().join("expenses.json")
    }

    /// Create the base and data directories
    pub fn ensure_directories(&self) -> Result<(), MessbookError> {
        std::fs::create_dir_all(self.data_dir()).map_err(|e| {
            MessbookError::Io(format!(
                "Failed to create {}: {}",
                self.data_dir().display(),
                e
            ))
        })
    }

    /// Settings have been saved at least once
    pub fn is_initialized(&self) -> bool {
        self.settings_file().exists()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use tempfile::TempDir;

    fn resolve(vars: &[(&str, &str)]) -> Result<MessbookPaths, MessbookError> {
        let vars: HashMap<String, OsString> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), OsString::from(v)))
            .collect();
        MessbookPaths::from_env(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_data_dir_variable_wins() {
        let paths = resolve(&[
            (DATA_DIR_ENV, "/srv/mess"),
            ("XDG_CONFIG_HOME", "/xdg"),
            ("HOME", "/home/akash"),
        ])
        .unwrap();
        assert_eq!(paths.base_dir(), &PathBuf::from("/srv/mess"));
    }

    #[cfg(not(windows))]
    #[test]
    fn test_falls_back_to_xdg_then_home() {
        let xdg = resolve(&[("XDG_CONFIG_HOME", "/xdg"), ("HOME", "/home/akash")]).unwrap();
        assert_eq!(xdg.base_dir(), &PathBuf::from("/xdg/messbook"));

        let home = resolve(&[(DATA_DIR_ENV, ""), ("HOME", "/home/akash")]).unwrap();
        assert_eq!(
            home.base_dir(),
            &PathBuf::from("/home/akash/.config/messbook")
        );
    }

    #[test]
    fn test_no_home_is_config_error() {
        assert!(matches!(resolve(&[]), Err(MessbookError::Config(_))));
    }

    #[test]
    fn test_layout_under_base_dir() {
        let temp_dir = TempDir::new().unwrap();
        let paths = MessbookPaths::with_base_dir(temp_dir.path().join("nested"));

        paths.ensure_directories().unwrap();
        assert!(paths.data_dir().is_dir());
        assert!(!paths.is_initialized());

        assert_eq!(paths.settings_file(), temp_dir.path().join("nested/config.json"));
        assert_eq!(paths.audit_log(), temp_dir.path().join("nested/audit.log"));
        assert_eq!(
            paths.expenses_file(),
            temp_dir.path().join("nested/data/expenses.json")
        );
    }
}
