//! JSON Export functionality
//!
//! Exports the complete data set, or a single monthly statement, to JSON.

use std::collections::BTreeMap;
use std::io::Write;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::config::Settings;
use crate::error::{MessbookError, MessbookResult};
use crate::models::{Expense, Money, Roster};
use crate::reports::MonthlyReport;
use crate::storage::Storage;

/// Current export schema version
pub const EXPORT_SCHEMA_VERSION: &str = "1.0.0";

/// Full data export structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FullExport {
    /// Schema version for compatibility checking
    pub schema_version: String,

    pub exported_at: DateTime<Utc>,

    /// Application version that created the export
    pub app_version: String,

    pub currency_symbol: String,

    pub participants: Roster,

    /// All expenses, newest first
    pub expenses: Vec<Expense>,

    pub metadata: ExportMetadata,
}

/// Export metadata for reference
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportMetadata {
    pub participant_count: usize,
    pub expense_count: usize,
    /// Sum of every expense
    pub total_amount: Money,
    pub earliest_expense: Option<NaiveDate>,
    pub latest_expense: Option<NaiveDate>,
}

impl FullExport {
    /// Create a new full export from storage and settings
    pub fn from_storage(storage: &Storage, settings: &Settings) -> MessbookResult<Self> {
        let expenses = storage.expenses.get_all()?;

        let metadata = ExportMetadata {
            participant_count: settings.roster().len(),
            expense_count: expenses.len(),
            total_amount: expenses.iter().map(|e| e.amount).sum(),
            earliest_expense: expenses.iter().map(|e| e.date).min(),
            latest_expense: expenses.iter().map(|e| e.date).max(),
        };

        Ok(Self {
            schema_version: EXPORT_SCHEMA_VERSION.to_string(),
            exported_at: Utc::now(),
            app_version: env!("CARGO_PKG_VERSION").to_string(),
            currency_symbol: settings.currency_symbol.clone(),
            participants: settings.roster().clone(),
            expenses,
            metadata,
        })
    }
}

/// A monthly statement in document form
///
/// Amounts are rendered as decimal strings so the document reads the same
/// as the printed summary.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatementExport {
    /// `YYYY-MM`
    pub month: String,
    pub title: String,
    pub currency_symbol: String,
    pub expenses: Vec<StatementExpense>,
    pub balances: Vec<StatementBalance>,
    pub grand_total: String,
    pub average: String,
    pub settlement: Vec<String>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub unlisted: BTreeMap<String, String>,
}

/// One line of the statement's expense table
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatementExpense {
    pub date: NaiveDate,
    pub participant: String,
    pub item: String,
    pub amount: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub notes: String,
}

/// One participant's line of the statement
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatementBalance {
    pub participant: String,
    pub total: String,
    pub deviation: String,
}

impl StatementExport {
    pub fn from_report(report: &MonthlyReport) -> Self {
        let symbol = report.settings.currency_symbol.as_str();

        Self {
            month: report.month.to_string(),
            title: report.month_title(),
            currency_symbol: symbol.to_string(),
            expenses: report
                .expenses
                .iter()
                .map(|e| StatementExpense {
                    date: e.date,
                    participant: e.participant.clone(),
                    item: e.item.clone(),
                    amount: e.amount.to_string(),
                    notes: e.notes.clone(),
                })
                .collect(),
            balances: report
                .summary
                .balances
                .iter()
                .map(|b| StatementBalance {
                    participant: b.participant.clone(),
                    total: b.total.to_string(),
                    deviation: b.deviation.to_string(),
                })
                .collect(),
            grand_total: report.summary.grand_total.to_string(),
            average: report.summary.average.to_string(),
            settlement: report.summary.settlement_lines(symbol),
            unlisted: report
                .summary
                .unlisted
                .iter()
                .map(|(label, amount)| (label.clone(), amount.to_string()))
                .collect(),
        }
    }
}

fn write_json<W: Write, T: Serialize>(writer: &mut W, value: &T, pretty: bool) -> MessbookResult<()> {
    let result = if pretty {
        serde_json::to_writer_pretty(&mut *writer, value)
    } else {
        serde_json::to_writer(&mut *writer, value)
    };
    result.map_err(|e| MessbookError::Export(e.to_string()))?;

    writeln!(writer).map_err(|e| MessbookError::Export(e.to_string()))?;
    Ok(())
}

/// Export all participants and expenses to JSON
pub fn export_full_json<W: Write>(
    storage: &Storage,
    settings: &Settings,
    writer: &mut W,
    pretty: bool,
) -> MessbookResult<()> {
    let export = FullExport::from_storage(storage, settings)?;
    write_json(writer, &export, pretty)
}

/// Export a monthly statement to JSON
pub fn export_statement_json<W: Write>(report: &MonthlyReport, writer: &mut W) -> MessbookResult<()> {
    write_json(writer, &StatementExport::from_report(report), true)
}
