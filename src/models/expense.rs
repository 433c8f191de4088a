//! Expense model
//!
//! A single shared purchase paid for by one participant.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::ExpenseId;
use super::money::Money;
use crate::settlement::ExpenseRecord;

/// A recorded household expense
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Expense {
    /// Unique identifier
    pub id: ExpenseId,

    /// Roster label of the participant who paid
    pub participant: String,

    /// What was bought
    pub item: String,

    /// Amount paid (always positive)
    pub amount: Money,

    /// Date of purchase
    pub date: NaiveDate,

    /// Free-form notes
    #[serde(default)]
    pub notes: String,

    /// When the expense was recorded
    pub created_at: DateTime<Utc>,

    /// When the expense was last modified
    pub updated_at: DateTime<Utc>,
}

impl Expense {
    /// Create a new expense
    pub fn new(
        participant: impl Into<String>,
        item: impl Into<String>,
        amount: Money,
        date: NaiveDate,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: ExpenseId::new(),
            participant: participant.into(),
            item: item.into(),
            amount,
            date,
            notes: String::new(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Builder-style notes setter
    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = notes.into();
        self
    }

    /// The settlement-facing view of this expense
    pub fn to_record(&self) -> ExpenseRecord {
        ExpenseRecord::new(self.participant.clone(), self.amount)
    }

    /// Validate the expense
    pub fn validate(&self) -> Result<(), ExpenseValidationError> {
        if self.participant.trim().is_empty() {
            return Err(ExpenseValidationError::MissingParticipant);
        }
        if self.item.trim().is_empty() {
            return Err(ExpenseValidationError::MissingItem);
        }
        if !self.amount.is_positive() {
            return Err(ExpenseValidationError::NonPositiveAmount(self.amount));
        }
        Ok(())
    }
}

impl fmt::Display for Expense {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {} {}",
            self.date.format("%Y-%m-%d"),
            self.participant,
            self.item,
            self.amount
        )
    }
}

/// Validation errors for expenses
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExpenseValidationError {
    MissingParticipant,
    MissingItem,
    NonPositiveAmount(Money),
}

impl fmt::Display for ExpenseValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingParticipant => write!(f, "Expense must name who paid"),
            Self::MissingItem => write!(f, "Expense must describe the item bought"),
            Self::NonPositiveAmount(amount) => {
                write!(f, "Expense amount must be greater than zero (got {})", amount)
            }
        }
    }
}

impl std::error::Error for ExpenseValidationError {}
