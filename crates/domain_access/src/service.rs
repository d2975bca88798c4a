//! Capability checks

use tracing::warn;

use crate::error::AccessError;
use crate::role::{Permission, Role};
use crate::user::Actor;

/// Answers capability queries against the static role table
///
/// Stateless; the engine holds one and calls [`require`](Self::require) at
/// the top of every mutating operation.
#[derive(Debug, Default, Clone, Copy)]
pub struct PermissionService;

impl PermissionService {
    pub fn new() -> Self {
        Self
    }

    /// Permissions granted to a role
    pub fn permissions_for(&self, role: Role) -> &'static [Permission] {
        role.permissions()
    }

    /// Whether the actor holds the permission
    ///
    /// Anonymous and system actors hold nothing.
    pub fn can_perform(&self, actor: &Actor, permission: Permission) -> bool {
        actor.role().is_some_and(|role| role.grants(permission))
    }

    /// Fails closed with `PermissionDenied` unless the actor holds the permission
    pub fn require(&self, actor: &Actor, permission: Permission) -> Result<(), AccessError> {
        if self.can_perform(actor, permission) {
            return Ok(());
        }
        warn!(
            actor = %actor.display_name(),
            role = ?actor.role(),
            permission = %permission,
            "Permission denied"
        );
        Err(AccessError::PermissionDenied {
            actor: actor.display_name().to_string(),
            permission,
        })
    }
}
