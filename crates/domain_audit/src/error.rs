//! Audit domain errors

use thiserror::Error;

/// Errors that can occur when writing the audit trail
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuditError {
    #[error("Invalid audit entry: {0}")]
    Validation(String),

    #[error("Duplicate audit entry id: {0}")]
    DuplicateId(String),
}
