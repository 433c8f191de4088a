//! Summary service
//!
//! Feeds a month's stored expenses into the settlement calculator.

use crate::error::MessbookResult;
use crate::models::{Expense, Month, Roster};
use crate::settlement::{self, ExpenseRecord, Summary};
use crate::storage::Storage;

/// Service computing monthly settlement summaries
pub struct SummaryService<'a> {
    storage: &'a Storage,
    roster: &'a Roster,
}

impl<'a> SummaryService<'a> {
    pub fn new(storage: &'a Storage, roster: &'a Roster) -> Self {
        Self { storage, roster }
    }

    /// Expenses dated within `month`, newest first
    pub fn expenses_for(&self, month: Month) -> MessbookResult<Vec<Expense>> {
        self.storage.expenses.get_by_month(month)
    }

    /// Summarize a set of already-selected expenses
    ///
    /// Participants are matched to the roster case-insensitively so that a
    /// hand-edited data file still lands on the right person.
    pub fn summarize(&self, expenses: &[Expense]) -> MessbookResult<Summary> {
        let records: Vec<ExpenseRecord> = expenses
            .iter()
            .map(|e| match self.roster.resolve(&e.participant) {
                Some(label) => ExpenseRecord::new(label, e.amount),
                None => e.to_record(),
            })
            .collect();

        Ok(settlement::compute(&records, self.roster)?)
    }

    /// Expenses and summary for a month
    pub fn for_month(&self, month: Month) -> MessbookResult<(Vec<Expense>, Summary)> {
        let expenses = self.expenses_for(month)?;
        let summary = self.summarize(&expenses)?;

        tracing::debug!(
            month = %month,
            expenses = expenses.len(),
            transfers = summary.settlement.len(),
            "computed monthly summary"
        );
        Ok((expenses, summary))
    }
}
