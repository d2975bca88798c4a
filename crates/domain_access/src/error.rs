//! Access control errors

use thiserror::Error;

use crate::role::Permission;

/// Errors that can occur in the access domain
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AccessError {
    #[error("Permission denied: {actor} lacks {permission}")]
    PermissionDenied { actor: String, permission: Permission },

    #[error("Unknown role: {0}")]
    UnknownRole(String),

    #[error("User not found: {0}")]
    UserNotFound(String),
}
