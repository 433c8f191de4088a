//! Expense service
//!
//! Provides business logic for expense management: validation against the
//! roster, CRUD operations and audit logging.

use chrono::{Local, NaiveDate, Utc};

use crate::audit::AuditEvent;
use crate::error::{MessbookError, MessbookResult};
use crate::models::{Expense, ExpenseId, Money, Month, Roster};
use crate::storage::Storage;

/// Service for expense management
pub struct ExpenseService<'a> {
    storage: &'a Storage,
    roster: &'a Roster,
}

/// Options for filtering expenses
#[derive(Debug, Clone, Default)]
pub struct ExpenseFilter {
    /// Filter by calendar month
    pub month: Option<Month>,
    /// Filter by paying participant (case-insensitive)
    pub participant: Option<String>,
    /// Maximum number of expenses to return
    pub limit: Option<usize>,
}

impl ExpenseFilter {
    /// Create a new empty filter
    pub fn new() -> Self {
        Self::default()
    }

    /// Filter by month
    pub fn month(mut self, month: Month) -> Self {
        self.month = Some(month);
        self
    }

    /// Filter by participant
    pub fn participant(mut self, participant: impl Into<String>) -> Self {
        self.participant = Some(participant.into());
        self
    }

    /// Limit results
    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }
}

/// Input for recording a new expense
#[derive(Debug, Clone)]
pub struct CreateExpenseInput {
    pub participant: String,
    pub item: String,
    pub amount: Money,
    /// Defaults to today
    pub date: Option<NaiveDate>,
    pub notes: Option<String>,
}

/// Changes to apply to an existing expense; `None` leaves a field as is
#[derive(Debug, Clone, Default)]
pub struct UpdateExpenseInput {
    pub participant: Option<String>,
    pub item: Option<String>,
    pub amount: Option<Money>,
    pub date: Option<NaiveDate>,
    pub notes: Option<String>,
}

impl UpdateExpenseInput {
    /// Whether any field would change
    pub fn is_empty(&self) -> bool {
        self.participant.is_none()
            && self.item.is_none()
            && self.amount.is_none()
            && self.date.is_none()
            && self.notes.is_none()
    }
}

impl<'a> ExpenseService<'a> {
    /// Create a new expense service validating against `roster`
    pub fn new(storage: &'a Storage, roster: &'a Roster) -> Self {
        Self { storage, roster }
    }

    /// Resolve a typed name to its roster spelling
    fn resolve_participant(&self, name: &str) -> MessbookResult<String> {
        let name = name.trim();
        if self.roster.is_empty() {
            return Err(MessbookError::no_participants());
        }
        self.roster
            .resolve(name)
            .map(str::to_string)
            .ok_or_else(|| {
                MessbookError::Validation(format!(
                    "'{}' is not a participant (known: {})",
                    name, self.roster
                ))
            })
    }

    /// Record a new expense
    pub fn create(&self, input: CreateExpenseInput) -> MessbookResult<Expense> {
        let participant = self.resolve_participant(&input.participant)?;
        let date = input.date.unwrap_or_else(|| Local::now().date_naive());

        let mut expense = Expense::new(participant, input.item.trim(), input.amount, date);
        if let Some(notes) = input.notes {
            expense.notes = notes.trim().to_string();
        }

        expense
            .validate()
            .map_err(|e| MessbookError::Validation(e.to_string()))?;

        self.storage.expenses.upsert(expense.clone())?;
        self.storage.expenses.save()?;

        self.storage.record(AuditEvent::ExpenseRecorded {
            expense: expense.clone(),
        })?;

        tracing::info!(
            id = %expense.id,
            participant = %expense.participant,
            amount = %expense.amount,
            "recorded expense"
        );
        Ok(expense)
    }

    /// Get an expense by ID
    pub fn get(&self, id: ExpenseId) -> MessbookResult<Option<Expense>> {
        self.storage.expenses.get(id)
    }

    /// Find an expense by a typed identifier
    ///
    /// Fails when the identifier is a prefix of more than one expense ID.
    pub fn find(&self, identifier: &str) -> MessbookResult<Option<Expense>> {
        let mut matches = self.storage.expenses.find(identifier)?;
        match matches.len() {
            0 => Ok(None),
            1 => Ok(matches.pop()),
            n => Err(MessbookError::Validation(format!(
                "'{}' matches {} expenses; use more characters of the ID",
                identifier, n
            ))),
        }
    }

    /// Find an expense, failing with NotFound when nothing matches
    pub fn require(&self, identifier: &str) -> MessbookResult<Expense> {
        self.find(identifier)?
            .ok_or_else(|| MessbookError::expense_not_found(identifier))
    }

    /// List expenses, newest first, with optional filtering
    pub fn list(&self, filter: ExpenseFilter) -> MessbookResult<Vec<Expense>> {
        let mut expenses = if let Some(participant) = &filter.participant {
            self.storage.expenses.get_by_participant(participant.trim())?
        } else if let Some(month) = filter.month {
            self.storage.expenses.get_by_month(month)?
        } else {
            self.storage.expenses.get_all()?
        };

        if let Some(month) = filter.month {
            expenses.retain(|e| month.contains(e.date));
        }

        if let Some(limit) = filter.limit {
            expenses.truncate(limit);
        }

        Ok(expenses)
    }

    /// Update an expense
    pub fn update(&self, id: ExpenseId, changes: UpdateExpenseInput) -> MessbookResult<Expense> {
        let mut expense = self
            .storage
            .expenses
            .get(id)?
            .ok_or_else(|| MessbookError::expense_not_found(id.to_string()))?;

        let before = expense.clone();

        if let Some(participant) = changes.participant {
            expense.participant = self.resolve_participant(&participant)?;
        }
        if let Some(item) = changes.item {
            expense.item = item.trim().to_string();
        }
        if let Some(amount) = changes.amount {
            expense.amount = amount;
        }
        if let Some(date) = changes.date {
            expense.date = date;
        }
        if let Some(notes) = changes.notes {
            expense.notes = notes.trim().to_string();
        }

        expense
            .validate()
            .map_err(|e| MessbookError::Validation(e.to_string()))?;

        let mut diff = Vec::new();
        if before.participant != expense.participant {
            diff.push(format!(
                "participant: '{}' -> '{}'",
                before.participant, expense.participant
            ));
        }
        if before.item != expense.item {
            diff.push(format!("item: '{}' -> '{}'", before.item, expense.item));
        }
        if before.amount != expense.amount {
            diff.push(format!("amount: {} -> {}", before.amount, expense.amount));
        }
        if before.date != expense.date {
            diff.push(format!("date: {} -> {}", before.date, expense.date));
        }
        if before.notes != expense.notes {
            diff.push("notes changed".to_string());
        }

        if diff.is_empty() {
            return Ok(expense);
        }

        expense.updated_at = Utc::now();

        self.storage.expenses.upsert(expense.clone())?;
        self.storage.expenses.save()?;

        self.storage.record(AuditEvent::ExpenseEdited {
            before,
            after: expense.clone(),
            changes: diff,
        })?;

        Ok(expense)
    }

    /// Delete an expense, returning what was removed
    pub fn delete(&self, id: ExpenseId) -> MessbookResult<Expense> {
        let expense = self
            .storage
            .expenses
            .get(id)?
            .ok_or_else(|| MessbookError::expense_not_found(id.to_string()))?;

        self.storage.expenses.delete(id)?;
        self.storage.expenses.save()?;

        self.storage.record(AuditEvent::ExpenseDeleted {
            expense: expense.clone(),
        })?;

        tracing::info!(id = %id, "deleted expense");
        Ok(expense)
    }

    /// Count expenses
    pub fn count(&self) -> MessbookResult<usize> {
        self.storage.expenses.count()
    }
}
