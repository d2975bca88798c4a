//! Audit Trail Domain
//!
//! Every state-changing action on a claim produces exactly one
//! [`AuditLogEntry`]. Entries are immutable once appended, never removed and
//! never reordered; ids come from a monotonic counter that is independent of
//! the number of entries held.

pub mod entry;
pub mod log;
pub mod error;

pub use entry::{AuditAction, AuditLogEntry, NewAuditEntry};
pub use log::AuditLog;
pub use error::AuditError;
