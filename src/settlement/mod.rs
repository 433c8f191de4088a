//! Settlement core
//!
//! Given the expense records of a period and the roster of participants,
//! computes per-participant totals, the equal share, each participant's
//! deviation from it, and a short list of payer -> payee transfers that
//! settles every deviation.
//!
//! The core does no I/O and keeps no state; the service layer feeds it
//! records read from storage and renders the resulting [`Summary`].
//!
//! # Example
//!
//! ```
//! use messbook::models::{Money, Roster};
//! use messbook::settlement::{compute, ExpenseRecord};
//!
//! let roster = Roster::new(["A", "B", "C", "D"]).unwrap();
//! let expenses = vec![
//!     ExpenseRecord::new("A", Money::from_cents(10000)),
//!     ExpenseRecord::new("B", Money::from_cents(30000)),
//! ];
//!
//! let summary = compute(&expenses, &roster).unwrap();
//! assert_eq!(summary.average, Money::from_cents(10000));
//! assert_eq!(
//!     summary.settlement_lines("$"),
//!     vec!["C pays $100.00 to B", "D pays $100.00 to B"]
//! );
//! ```

mod calculator;
mod summary;

pub use calculator::{compute, settle};
pub use summary::{ExpenseRecord, ParticipantBalance, SettlementInstruction, Summary};

use thiserror::Error;

/// Errors raised by the settlement calculator
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SettlementError {
    /// The equal share is undefined without participants
    #[error("No participants configured; cannot split expenses among an empty roster")]
    EmptyRoster,
}
