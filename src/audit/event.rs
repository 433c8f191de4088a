//! Audit events

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::Expense;

/// Something that changed the ledger or the roster
///
/// Expense events carry whole records, so an edited or deleted expense can
/// be recovered from the log alone.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum AuditEvent {
    ExpenseRecorded {
        expense: Expense,
    },
    ExpenseEdited {
        before: Expense,
        after: Expense,
        /// Field-level changes, e.g. `amount: 450.00 -> 500.00`
        changes: Vec<String>,
    },
    ExpenseDeleted {
        expense: Expense,
    },
    ParticipantAdded {
        name: String,
    },
    ParticipantRemoved {
        name: String,
    },
}

fn paid(expense: &Expense) -> String {
    format!(
        "{} paid {} for {} on {}",
        expense.participant, expense.amount, expense.item, expense.date
    )
}

impl AuditEvent {
    /// One-line description, e.g. `recorded exp-1a2b3c4d: Akash paid 450.00 for Rice on 2025-01-15`
    pub fn describe(&self) -> String {
        match self {
            Self::ExpenseRecorded { expense } => {
                format!("recorded {}: {}", expense.id.short(), paid(expense))
            }
            Self::ExpenseEdited { after, changes, .. } => {
                format!("edited {}: {}", after.id.short(), changes.join(", "))
            }
            Self::ExpenseDeleted { expense } => {
                format!("deleted {}: {}", expense.id.short(), paid(expense))
            }
            Self::ParticipantAdded { name } => format!("added participant {}", name),
            Self::ParticipantRemoved { name } => format!("removed participant {}", name),
        }
    }
}

/// A timestamped line of the audit log
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuditEntry {
    pub at: DateTime<Utc>,
    pub event: AuditEvent,
}

impl AuditEntry {
    pub fn now(event: AuditEvent) -> Self {
        Self {
            at: Utc::now(),
            event,
        }
    }

    /// `2025-01-15 09:30  recorded exp-...`
    pub fn format_line(&self) -> String {
        format!("{}  {}", self.at.format("%Y-%m-%d %H:%M"), self.event.describe())
    }
}
