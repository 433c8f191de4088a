//! Core data models for Messbook
//!
//! This module contains the data structures of the shared-expense domain:
//! expenses, the participant roster, calendar months, and money.

pub mod expense;
pub mod ids;
pub mod money;
pub mod period;
pub mod roster;

pub use expense::{Expense, ExpenseValidationError};
pub use ids::ExpenseId;
pub use money::{Money, MoneyParseError};
pub use period::{Month, PeriodParseError};
pub use roster::{Roster, RosterError};
