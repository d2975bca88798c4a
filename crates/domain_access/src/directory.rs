//! In-memory user directory

use core_kernel::UserId;

use crate::error::AccessError;
use crate::role::Role;
use crate::user::User;

/// Lookup of users by id or email
#[derive(Debug, Clone, Default)]
pub struct UserDirectory {
    users: Vec<User>,
}

impl UserDirectory {
    pub fn new(users: Vec<User>) -> Self {
        Self { users }
    }

    /// Directory seeded with one demonstration user per role
    pub fn with_demo_users() -> Self {
        Self::new(vec![
            User::new(1, "Policyholder User", Role::Policyholder, "policy@example.com"),
            User::new(2, "Claims Officer Admin", Role::ClaimsOfficer, "claims@example.com"),
            User::new(3, "Finance Team Lead", Role::FinanceTeam, "finance@example.com"),
            User::new(4, "System Admin", Role::Admin, "admin@example.com"),
        ])
    }

    pub fn find_by_id(&self, id: UserId) -> Result<&User, AccessError> {
        self.users
            .iter()
            .find(|u| u.id == id)
            .ok_or_else(|| AccessError::UserNotFound(id.to_string()))
    }

    /// Finds a user by email, ignoring case
    pub fn find_by_email(&self, email: &str) -> Result<&User, AccessError> {
        let email = email.trim();
        self.users
            .iter()
            .find(|u| u.email.eq_ignore_ascii_case(email))
            .ok_or_else(|| AccessError::UserNotFound(email.to_string()))
    }

    pub fn users(&self) -> &[User] {
        &self.users
    }
}
