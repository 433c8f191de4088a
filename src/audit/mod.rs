//! Audit trail
//!
//! Every change to the ledger or the roster is appended to `audit.log` as it
//! happens. `messbook history` reads the tail back.

mod event;
mod trail;

pub use event::{AuditEntry, AuditEvent};
pub use trail::AuditLog;
