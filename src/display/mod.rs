//! Display formatting for terminal output
//!
//! Provides utilities for formatting expenses and settlement summaries as
//! tables and text blocks.

pub mod expense;
pub mod report;
pub mod summary;

pub use expense::{format_expense_details, format_expense_list};
pub use summary::{format_balances, format_settlement, format_unlisted, SETTLED_MESSAGE};
