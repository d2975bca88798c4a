//! Roles and the permissions they grant

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::AccessError;

/// A named authorization unit
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Permission {
    ViewClaims,
    SubmitClaim,
    UploadDocs,
    ReviewClaim,
    ApproveRejectClaim,
    SettleClaim,
    EditClaimFields,
    ViewAudit,
    ExportData,
    ManageUsers,
}

impl Permission {
    pub fn as_str(&self) -> &'static str {
        match self {
            Permission::ViewClaims => "VIEW_CLAIMS",
            Permission::SubmitClaim => "SUBMIT_CLAIM",
            Permission::UploadDocs => "UPLOAD_DOCS",
            Permission::ReviewClaim => "REVIEW_CLAIM",
            Permission::ApproveRejectClaim => "APPROVE_REJECT_CLAIM",
            Permission::SettleClaim => "SETTLE_CLAIM",
            Permission::EditClaimFields => "EDIT_CLAIM_FIELDS",
            Permission::ViewAudit => "VIEW_AUDIT",
            Permission::ExportData => "EXPORT_DATA",
            Permission::ManageUsers => "MANAGE_USERS",
        }
    }
}

impl fmt::Display for Permission {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Role held by a user
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Role {
    #[serde(rename = "Policyholder")]
    Policyholder,
    #[serde(rename = "Claims Officer")]
    ClaimsOfficer,
    #[serde(rename = "Finance Team")]
    FinanceTeam,
    #[serde(rename = "Admin")]
    Admin,
}

const POLICYHOLDER: &[Permission] = &[
    Permission::ViewClaims,
    Permission::SubmitClaim,
    Permission::UploadDocs,
];

const CLAIMS_OFFICER: &[Permission] = &[
    Permission::ViewClaims,
    Permission::ReviewClaim,
    Permission::ApproveRejectClaim,
    Permission::UploadDocs,
    Permission::ViewAudit,
    Permission::ExportData,
    Permission::EditClaimFields,
];

const FINANCE_TEAM: &[Permission] = &[
    Permission::ViewClaims,
    Permission::SettleClaim,
    Permission::ViewAudit,
    Permission::ExportData,
];

const ADMIN: &[Permission] = &[
    Permission::ViewClaims,
    Permission::ManageUsers,
    Permission::ViewAudit,
    Permission::ApproveRejectClaim,
    Permission::SettleClaim,
    Permission::ExportData,
    Permission::EditClaimFields,
];

impl Role {
    /// All roles, in display order
    pub const ALL: [Role; 4] = [
        Role::Policyholder,
        Role::ClaimsOfficer,
        Role::FinanceTeam,
        Role::Admin,
    ];

    /// Permissions granted to this role
    pub fn permissions(&self) -> &'static [Permission] {
        match self {
            Role::Policyholder => POLICYHOLDER,
            Role::ClaimsOfficer => CLAIMS_OFFICER,
            Role::FinanceTeam => FINANCE_TEAM,
            Role::Admin => ADMIN,
        }
    }

    pub fn grants(&self, permission: Permission) -> bool {
        self.permissions().contains(&permission)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Policyholder => "Policyholder",
            Role::ClaimsOfficer => "Claims Officer",
            Role::FinanceTeam => "Finance Team",
            Role::Admin => "Admin",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = AccessError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Role::ALL
            .into_iter()
            .find(|role| role.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| AccessError::UnknownRole(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_parse_is_case_insensitive() {
        assert_eq!("claims officer".parse::<Role>().unwrap(), Role::ClaimsOfficer);
        assert!("auditor".parse::<Role>().is_err());
    }

    #[test]
    fn test_review_is_officer_only() {
        let reviewers: Vec<Role> = Role::ALL
            .into_iter()
            .filter(|r| r.grants(Permission::ReviewClaim))
            .collect();
        assert_eq!(reviewers, vec![Role::ClaimsOfficer]);
    }
}
