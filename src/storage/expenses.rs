//! Expense repository for JSON storage
//!
//! Manages loading and saving expenses to expenses.json

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::RwLock;

use chrono::NaiveDate;

use crate::error::MessbookError;
use crate::models::{Expense, ExpenseId, Month};

use super::file_io::{read_json, write_json_atomic};

/// Serializable expense data structure
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
pub(crate) struct ExpenseData {
    pub(crate) expenses: Vec<Expense>,
}

/// Newest purchase first, ties broken by recording time
fn newest_first(a: &Expense, b: &Expense) -> std::cmp::Ordering {
    b.date.cmp(&a.date).then(b.created_at.cmp(&a.created_at))
}

fn index_key(participant: &str) -> String {
    participant.trim().to_ascii_lowercase()
}

/// Repository for expense persistence with a per-participant index
pub struct ExpenseRepository {
    path: PathBuf,
    data: RwLock<HashMap<ExpenseId, Expense>>,
    /// Index: ASCII-lowercased participant -> expense ids
    by_participant: RwLock<HashMap<String, Vec<ExpenseId>>>,
}

impl ExpenseRepository {
    /// Create a new expense repository
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            data: RwLock::new(HashMap::new()),
            by_participant: RwLock::new(HashMap::new()),
        }
    }

    /// Load expenses from disk and build the index
    pub fn load(&self) -> Result<(), MessbookError> {
        let file_data: ExpenseData = read_json(&self.path)?;

        let mut data = self.data.write().map_err(|e| {
            MessbookError::Storage(format!("Failed to acquire write lock: {}", e))
        })?;
        let mut by_participant = self.by_participant.write().map_err(|e| {
            MessbookError::Storage(format!("Failed to acquire write lock: {}", e))
        })?;

        data.clear();
        by_participant.clear();

        for expense in file_data.expenses {
            by_participant
                .entry(index_key(&expense.participant))
                .or_default()
                .push(expense.id);
            data.insert(expense.id, expense);
        }

        tracing::debug!(path = %self.path.display(), count = data.len(), "loaded expenses");
        Ok(())
    }

    /// Save expenses to disk, newest first
    pub fn save(&self) -> Result<(), MessbookError> {
        let data = self.data.read().map_err(|e| {
            MessbookError::Storage(format!("Failed to acquire read lock: {}", e))
        })?;

        let mut expenses: Vec<_> = data.values().cloned().collect();
        expenses.sort_by(newest_first);

        let file_data = ExpenseData { expenses };
        write_json_atomic(&self.path, &file_data)
    }

    /// Get an expense by ID
    pub fn get(&self, id: ExpenseId) -> Result<Option<Expense>, MessbookError> {
        let data = self.data.read().map_err(|e| {
            MessbookError::Storage(format!("Failed to acquire read lock: {}", e))
        })?;

        Ok(data.get(&id).cloned())
    }

    /// Find expenses whose ID matches a user-typed identifier
    ///
    /// Accepts full UUIDs, `exp-` short forms and unambiguous prefixes.
    /// Returns every match so callers can reject ambiguous input.
    pub fn find(&self, identifier: &str) -> Result<Vec<Expense>, MessbookError> {
        let data = self.data.read().map_err(|e| {
            MessbookError::Storage(format!("Failed to acquire read lock: {}", e))
        })?;

        let mut matches: Vec<_> = data
            .values()
            .filter(|e| e.id.matches(identifier))
            .cloned()
            .collect();
        matches.sort_by(newest_first);
        Ok(matches)
    }

    /// Get all expenses, newest first
    pub fn get_all(&self) -> Result<Vec<Expense>, MessbookError> {
        let data = self.data.read().map_err(|e| {
            MessbookError::Storage(format!("Failed to acquire read lock: {}", e))
        })?;

        let mut expenses: Vec<_> = data.values().cloned().collect();
        expenses.sort_by(newest_first);
        Ok(expenses)
    }

    /// Get expenses paid by a participant (case-insensitive)
    pub fn get_by_participant(&self, participant: &str) -> Result<Vec<Expense>, MessbookError> {
        let data = self.data.read().map_err(|e| {
            MessbookError::Storage(format!("Failed to acquire read lock: {}", e))
        })?;
        let by_participant = self.by_participant.read().map_err(|e| {
            MessbookError::Storage(format!("Failed to acquire read lock: {}", e))
        })?;

        let ids = by_participant
            .get(&index_key(participant))
            .map(|v| v.as_slice())
            .unwrap_or(&[]);
        let mut expenses: Vec<_> = ids.iter().filter_map(|id| data.get(id).cloned()).collect();
        expenses.sort_by(newest_first);
        Ok(expenses)
    }

    /// Whether a participant has any recorded expense
    pub fn has_participant(&self, participant: &str) -> Result<bool, MessbookError> {
        let by_participant = self.by_participant.read().map_err(|e| {
            MessbookError::Storage(format!("Failed to acquire read lock: {}", e))
        })?;

        Ok(by_participant
            .get(&index_key(participant))
            .is_some_and(|ids| !ids.is_empty()))
    }

    /// Get expenses in a date range (inclusive)
    pub fn get_by_date_range(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<Expense>, MessbookError> {
        let all = self.get_all()?;
        Ok(all
            .into_iter()
            .filter(|e| e.date >= start && e.date <= end)
            .collect())
    }

    /// Get expenses dated within a calendar month
    pub fn get_by_month(&self, month: Month) -> Result<Vec<Expense>, MessbookError> {
        self.get_by_date_range(month.start_date(), month.end_date())
    }

    /// Insert or update an expense
    pub fn upsert(&self, expense: Expense) -> Result<(), MessbookError> {
        let mut data = self.data.write().map_err(|e| {
            MessbookError::Storage(format!("Failed to acquire write lock: {}", e))
        })?;
        let mut by_participant = self.by_participant.write().map_err(|e| {
            MessbookError::Storage(format!("Failed to acquire write lock: {}", e))
        })?;

        if let Some(old) = data.get(&expense.id) {
            if let Some(ids) = by_participant.get_mut(&index_key(&old.participant)) {
                ids.retain(|&id| id != expense.id);
            }
        }

        by_participant
            .entry(index_key(&expense.participant))
            .or_default()
            .push(expense.id);

        data.insert(expense.id, expense);
        Ok(())
    }

    /// Delete an expense, returning whether it existed
    pub fn delete(&self, id: ExpenseId) -> Result<bool, MessbookError> {
        let mut data = self.data.write().map_err(|e| {
            MessbookError::Storage(format!("Failed to acquire write lock: {}", e))
        })?;
        let mut by_participant = self.by_participant.write().map_err(|e| {
            MessbookError::Storage(format!("Failed to acquire write lock: {}", e))
        })?;

        match data.remove(&id) {
            Some(expense) => {
                if let Some(ids) = by_participant.get_mut(&index_key(&expense.participant)) {
                    ids.retain(|&eid| eid != id);
                }
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Count expenses
    pub fn count(&self) -> Result<usize, MessbookError> {
        let data = self.data.read().map_err(|e| {
            MessbookError::Storage(format!("Failed to acquire read lock: {}", e))
        })?;

        Ok(data.len())
    }
}
