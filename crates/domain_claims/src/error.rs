//! Claims domain errors

use thiserror::Error;

use core_kernel::ClaimId;
use domain_access::{AccessError, Permission};
use domain_audit::AuditError;
use crate::claim::ClaimStatus;

/// Errors that can occur in the claims domain
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClaimError {
    #[error("Permission denied: {actor} lacks {permission}")]
    PermissionDenied { actor: String, permission: Permission },

    #[error("Claim not found: {0}")]
    NotFound(ClaimId),

    #[error("Invalid transition: cannot {operation} claim {claim_id} while {status}")]
    InvalidTransition {
        claim_id: ClaimId,
        status: ClaimStatus,
        operation: &'static str,
    },

    #[error("Validation error: {0}")]
    Validation(String),
}

impl ClaimError {
    pub fn invalid_transition(claim_id: ClaimId, status: ClaimStatus, operation: &'static str) -> Self {
        ClaimError::InvalidTransition { claim_id, status, operation }
    }
}

impl From<AccessError> for ClaimError {
    fn from(err: AccessError) -> Self {
        match err {
            AccessError::PermissionDenied { actor, permission } => {
                ClaimError::PermissionDenied { actor, permission }
            }
            other => ClaimError::Validation(other.to_string()),
        }
    }
}

impl From<AuditError> for ClaimError {
    fn from(err: AuditError) -> Self {
        ClaimError::Validation(err.to_string())
    }
}
