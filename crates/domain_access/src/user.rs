//! Users and the actors that drive operations

use serde::{Deserialize, Serialize};

use core_kernel::UserId;
use crate::role::Role;

/// A directory user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub name: String,
    pub role: Role,
    pub email: String,
}

impl User {
    pub fn new(id: u32, name: impl Into<String>, role: Role, email: impl Into<String>) -> Self {
        Self {
            id: UserId::new(id),
            name: name.into(),
            role,
            email: email.into(),
        }
    }
}

/// Who is performing an operation
///
/// `System` is reserved for autonomous work such as the lifecycle scheduler.
/// It holds no permissions; operations it runs skip the capability check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Actor {
    Anonymous,
    User(User),
    System,
}

impl Actor {
    /// Name recorded in the audit trail
    pub fn display_name(&self) -> &str {
        match self {
            Actor::Anonymous => "Unknown",
            Actor::User(user) => &user.name,
            Actor::System => "System",
        }
    }

    pub fn user(&self) -> Option<&User> {
        match self {
            Actor::User(user) => Some(user),
            _ => None,
        }
    }

    pub fn role(&self) -> Option<Role> {
        self.user().map(|u| u.role)
    }
}

impl From<User> for Actor {
    fn from(user: User) -> Self {
        Actor::User(user)
    }
}

impl From<Option<User>> for Actor {
    fn from(user: Option<User>) -> Self {
        user.map_or(Actor::Anonymous, Actor::User)
    }
}
