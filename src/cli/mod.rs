//! CLI command handlers
//!
//! This module contains the implementation of CLI commands,
//! bridging the clap argument parsing with the service layer.

pub mod expense;
pub mod export;
pub mod history;
pub mod participant;
pub mod summary;

pub use expense::{handle_expense_command, ExpenseCommands};
pub use export::{handle_export_command, ExportCommands};
pub use history::handle_history_command;
pub use participant::{handle_participant_command, ParticipantCommands};
pub use summary::{handle_summary_command, SummaryArgs};

use chrono::NaiveDate;

use crate::config::Settings;
use crate::error::{MessbookError, MessbookResult};
use crate::models::{Money, Month};

/// Parse a user-typed amount such as `450`, `450.5` or `₹450.50`
pub(crate) fn parse_amount(input: &str) -> MessbookResult<Money> {
    Money::parse(input).map_err(|e| {
        MessbookError::Validation(format!(
            "Invalid amount: '{}'. Use a number like '450' or '450.50' ({})",
            input, e
        ))
    })
}

/// Parse a `YYYY-MM-DD` date
pub(crate) fn parse_date(input: &str) -> MessbookResult<NaiveDate> {
    NaiveDate::parse_from_str(input.trim(), "%Y-%m-%d").map_err(|_| {
        MessbookError::Validation(format!("Invalid date: '{}'. Use YYYY-MM-DD", input))
    })
}

/// Parse a `YYYY-MM` month
pub(crate) fn parse_month(input: &str) -> MessbookResult<Month> {
    Month::parse(input).map_err(|e| {
        MessbookError::Validation(format!("Invalid month: '{}'. Use YYYY-MM ({})", input, e))
    })
}

/// Parse an optional month, defaulting to the current one
pub(crate) fn parse_month_or_current(input: Option<&str>) -> MessbookResult<Month> {
    input.map_or_else(|| Ok(Month::current()), parse_month)
}

/// Fail early when there is nobody to split expenses between
pub(crate) fn require_roster(settings: &Settings) -> MessbookResult<()> {
    if settings.roster().is_empty() {
        return Err(MessbookError::no_participants());
    }
    Ok(())
}
