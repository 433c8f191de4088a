//! Service layer for Messbook
//!
//! The service layer provides business logic on top of the storage layer,
//! handling validation, roster lookups and audit logging.

pub mod expense;
pub mod participant;
pub mod summary;

pub use expense::{CreateExpenseInput, ExpenseFilter, ExpenseService, UpdateExpenseInput};
pub use participant::ParticipantService;
pub use summary::SummaryService;
