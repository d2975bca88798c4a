//! Audit entry types

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use core_kernel::{AuditEntryId, ClaimId};
use crate::error::AuditError;

/// Kind of action recorded
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AuditAction {
    #[serde(rename = "Submitted Claim")]
    SubmittedClaim,
    #[serde(rename = "Updated Claim Details")]
    UpdatedClaimDetails,
    #[serde(rename = "Updated Claim Status")]
    UpdatedClaimStatus,
    #[serde(rename = "Added Verification Note")]
    AddedVerificationNote,
    #[serde(rename = "Uploaded Document")]
    UploadedDocument,
    #[serde(rename = "Approved Claim")]
    ApprovedClaim,
    #[serde(rename = "Rejected Claim")]
    RejectedClaim,
    #[serde(rename = "Settled Claim")]
    SettledClaim,
}

impl AuditAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            AuditAction::SubmittedClaim => "Submitted Claim",
            AuditAction::UpdatedClaimDetails => "Updated Claim Details",
            AuditAction::UpdatedClaimStatus => "Updated Claim Status",
            AuditAction::AddedVerificationNote => "Added Verification Note",
            AuditAction::UploadedDocument => "Uploaded Document",
            AuditAction::ApprovedClaim => "Approved Claim",
            AuditAction::RejectedClaim => "Rejected Claim",
            AuditAction::SettledClaim => "Settled Claim",
        }
    }
}

impl fmt::Display for AuditAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A recorded action
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuditLogEntry {
    pub id: AuditEntryId,
    pub timestamp: DateTime<Utc>,
    /// Display name of the actor
    pub user: String,
    pub action: AuditAction,
    pub details: String,
    pub related_id: Option<ClaimId>,
}

/// An entry waiting for its id and timestamp
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewAuditEntry {
    pub user: String,
    pub action: AuditAction,
    pub details: String,
    pub related_id: Option<ClaimId>,
}

impl NewAuditEntry {
    pub fn new(user: impl Into<String>, action: AuditAction, details: impl Into<String>) -> Self {
        Self {
            user: user.into(),
            action,
            details: details.into(),
            related_id: None,
        }
    }

    /// Links the entry to a claim
    pub fn for_claim(mut self, claim_id: ClaimId) -> Self {
        self.related_id = Some(claim_id);
        self
    }

    pub fn validate(&self) -> Result<(), AuditError> {
        if self.user.trim().is_empty() {
            return Err(AuditError::Validation("user must not be blank".to_string()));
        }
        if self.details.trim().is_empty() {
            return Err(AuditError::Validation("details must not be blank".to_string()));
        }
        Ok(())
    }
}
