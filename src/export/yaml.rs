//! YAML Export functionality
//!
//! Human-readable rendering of the full data set and of monthly statements.

use std::io::Write;

use crate::config::Settings;
use crate::error::{MessbookError, MessbookResult};
use crate::export::json::{FullExport, StatementExport};
use crate::reports::MonthlyReport;
use crate::storage::Storage;

fn export_err<E: std::fmt::Display>(e: E) -> MessbookError {
    MessbookError::Export(e.to_string())
}

/// Export all participants and expenses to YAML
pub fn export_full_yaml<W: Write>(
    storage: &Storage,
    settings: &Settings,
    writer: &mut W,
) -> MessbookResult<()> {
    let export = FullExport::from_storage(storage, settings)?;

    writeln!(writer, "# Messbook Full Export").map_err(export_err)?;
    writeln!(writer, "# Generated: {}", export.exported_at).map_err(export_err)?;
    writeln!(writer, "# App Version: {}", export.app_version).map_err(export_err)?;
    writeln!(writer).map_err(export_err)?;

    serde_yaml::to_writer(writer, &export).map_err(export_err)?;

    Ok(())
}

/// Export a monthly statement to YAML
pub fn export_statement_yaml<W: Write>(report: &MonthlyReport, writer: &mut W) -> MessbookResult<()> {
    writeln!(writer, "# Mess Expenses: {}", report.month_title()).map_err(export_err)?;
    writeln!(writer).map_err(export_err)?;

    serde_yaml::to_writer(writer, &StatementExport::from_report(report)).map_err(export_err)?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::MessbookPaths;
    use crate::models::{Expense, Money, Month, Roster};
    use chrono::NaiveDate;
    use tempfile::TempDir;

    fn create_test_storage() -> (TempDir, Storage) {
        let temp_dir = TempDir::new().unwrap();
        let paths = MessbookPaths::with_base_dir(temp_dir.path().to_path_buf());
        let mut storage = Storage::new(paths).unwrap();
        storage.load_all().unwrap();
        (temp_dir, storage)
    }

    fn settings() -> Settings {
        Settings {
            participants: Roster::new(["Akash", "Suman"]).unwrap(),
            ..Settings::default()
        }
    }

    fn seed(storage: &Storage) {
        storage
            .expenses
            .upsert(Expense::new(
                "Akash",
                "Groceries",
                Money::from_cents(5000),
                NaiveDate::from_ymd_opt(2025, 1, 10).unwrap(),
            ))
            .unwrap();
    }

    #[test]
    fn test_yaml_export() {
        let (_temp_dir, storage) = create_test_storage();
        seed(&storage);

        let mut yaml_output = Vec::new();
        export_full_yaml(&storage, &settings(), &mut yaml_output).unwrap();
        let yaml_string = String::from_utf8(yaml_output).unwrap();

        assert!(yaml_string.starts_with("# Messbook Full Export"));
        assert!(yaml_string.contains("Groceries"));
        assert!(yaml_string.contains("Suman"));
    }

    #[test]
    fn test_yaml_roundtrip() {
        let (_temp_dir, storage) = create_test_storage();
        seed(&storage);

        let mut yaml_output = Vec::new();
        export_full_yaml(&storage, &settings(), &mut yaml_output).unwrap();
        let yaml_string = String::from_utf8(yaml_output).unwrap();

        let parsed: FullExport = serde_yaml::from_str(&yaml_string).unwrap();
        assert_eq!(parsed.expenses.len(), 1);
        assert_eq!(parsed.expenses[0].amount, Money::from_cents(5000));
        assert_eq!(parsed.participants, settings().participants);
    }

    #[test]
    fn test_statement_yaml() {
        let (_temp_dir, storage) = create_test_storage();
        seed(&storage);

        let report =
            MonthlyReport::generate(&storage, &settings(), Month::new(2025, 1).unwrap()).unwrap();

        let mut output = Vec::new();
        export_statement_yaml(&report, &mut output).unwrap();
        let text = String::from_utf8(output).unwrap();

        assert!(text.starts_with("# Mess Expenses: January 2025"));
        assert!(text.contains("Suman pays"));
        assert!(text.contains("25.00 to Akash"));
    }
}
