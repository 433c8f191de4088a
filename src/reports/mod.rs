//! Reports module for Messbook
//!
//! Provides the monthly expense report: the month's expenses, what each
//! participant spent and who pays whom.

pub mod monthly;

pub use monthly::MonthlyReport;
