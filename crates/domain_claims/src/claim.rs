//! Claim aggregate

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use core_kernel::ClaimId;
use crate::error::ClaimError;
use crate::workflow::{StageName, StageStatus, StageView, Workflow};

/// Claim status
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ClaimStatus {
    /// Received, nobody has looked at it yet
    Submitted,
    /// Documents being checked against the policy
    PendingVerification,
    /// Verified, waiting for a decision
    PendingApproval,
    /// Held for further investigation
    UnderReview,
    /// Approved for payment
    Approved,
    /// Rejected (terminal)
    Rejected,
    /// Paid out (terminal)
    Settled,
}

impl ClaimStatus {
    pub const ALL: [ClaimStatus; 7] = [
        ClaimStatus::Submitted,
        ClaimStatus::PendingVerification,
        ClaimStatus::PendingApproval,
        ClaimStatus::UnderReview,
        ClaimStatus::Approved,
        ClaimStatus::Rejected,
        ClaimStatus::Settled,
    ];

    /// Rejected and settled claims accept no further mutation
    pub fn is_terminal(&self) -> bool {
        matches!(self, ClaimStatus::Rejected | ClaimStatus::Settled)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ClaimStatus::Submitted => "SUBMITTED",
            ClaimStatus::PendingVerification => "PENDING_VERIFICATION",
            ClaimStatus::PendingApproval => "PENDING_APPROVAL",
            ClaimStatus::UnderReview => "UNDER_REVIEW",
            ClaimStatus::Approved => "APPROVED",
            ClaimStatus::Rejected => "REJECTED",
            ClaimStatus::Settled => "SETTLED",
        }
    }

    /// Checks if an officer may move a claim from this status to `target`
    pub fn can_review_to(&self, target: ClaimStatus) -> bool {
        use ClaimStatus::*;
        matches!(
            (*self, target),
            (Submitted, PendingVerification) |
            (PendingVerification, UnderReview) |
            (PendingVerification, PendingApproval) |
            (UnderReview, PendingApproval)
        )
    }
}

impl fmt::Display for ClaimStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ClaimStatus {
    type Err = ClaimError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        ClaimStatus::ALL
            .into_iter()
            .find(|status| status.as_str().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| ClaimError::Validation(format!("unknown claim status {s:?}")))
    }
}

/// Decision recorded at the approval stage
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ApprovalOutcome {
    Approved,
    Rejected,
}

impl ApprovalOutcome {
    pub fn status(&self) -> ClaimStatus {
        match self {
            ApprovalOutcome::Approved => ClaimStatus::Approved,
            ApprovalOutcome::Rejected => ClaimStatus::Rejected,
        }
    }
}

/// A policyholder's request for compensation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Claim {
    pub id: ClaimId,
    pub policy_number: String,
    pub policyholder: String,
    pub claim_type: String,
    pub amount_requested: Decimal,
    pub status: ClaimStatus,
    pub description: String,
    /// Document references, in upload order
    #[serde(default)]
    pub documents: Vec<String>,
    #[serde(default)]
    pub verification_notes: String,
    #[serde(default)]
    pub approval_notes: String,
    pub settlement_amount: Option<Decimal>,
    pub settlement_date: Option<NaiveDate>,
    pub submission_date: NaiveDate,
    pub last_updated: NaiveDate,
    pub workflow: Workflow,
}

impl Claim {
    /// Builds a freshly submitted claim
    pub fn submitted(id: ClaimId, data: NewClaim, policyholder: String, today: NaiveDate) -> Self {
        Self {
            id,
            policy_number: data.policy_number.trim().to_string(),
            policyholder,
            claim_type: data.claim_type.trim().to_string(),
            amount_requested: data.amount_requested,
            status: ClaimStatus::Submitted,
            description: data.description,
            documents: data.documents,
            verification_notes: String::new(),
            approval_notes: String::new(),
            settlement_amount: None,
            settlement_date: None,
            submission_date: today,
            last_updated: today,
            workflow: Workflow::submitted(today),
        }
    }

    /// Stages with their SLA breach evaluated against `today`
    pub fn workflow_view(&self, today: NaiveDate) -> Vec<StageView> {
        self.workflow.view(today)
    }

    /// Verifies that status, workflow and settlement fields agree
    pub fn check_invariants(&self) -> Result<(), ClaimError> {
        let inconsistent = |reason: &str| -> Result<(), ClaimError> {
            Err(ClaimError::Validation(format!("claim {} is inconsistent: {reason}", self.id)))
        };

        let settled = self.status == ClaimStatus::Settled;
        if settled && self.workflow.stage(StageName::Settlement).status != StageStatus::Completed {
            return inconsistent("settled without a completed settlement stage");
        }
        if matches!(self.status, ClaimStatus::Approved | ClaimStatus::Rejected)
            && self.workflow.stage(StageName::Approval).status == StageStatus::Pending
        {
            return inconsistent("decided while the approval stage is pending");
        }
        if settled != self.settlement_amount.is_some() || settled != self.settlement_date.is_some() {
            return inconsistent("settlement fields must be set exactly when settled");
        }
        if self.amount_requested <= Decimal::ZERO {
            return inconsistent("requested amount must be positive");
        }
        Ok(())
    }
}

/// Input for submitting a claim
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewClaim {
    pub policy_number: String,
    /// Defaults to the submitting user's name
    #[serde(default)]
    pub policyholder: Option<String>,
    pub claim_type: String,
    pub amount_requested: Decimal,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub documents: Vec<String>,
}

impl NewClaim {
    pub fn validate(&self) -> Result<(), ClaimError> {
        require_text("policyNumber", &self.policy_number)?;
        require_text("claimType", &self.claim_type)?;
        require_positive("amountRequested", self.amount_requested)?;
        if self.documents.iter().any(|d| d.trim().is_empty()) {
            return Err(ClaimError::Validation("document references must not be blank".to_string()));
        }
        Ok(())
    }
}

/// Partial update of a claim's editable fields
///
/// Status, workflow, settlement fields and dates are not editable here.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ClaimPatch {
    pub policy_number: Option<String>,
    pub policyholder: Option<String>,
    pub claim_type: Option<String>,
    pub amount_requested: Option<Decimal>,
    pub description: Option<String>,
    pub verification_notes: Option<String>,
    pub approval_notes: Option<String>,
}

impl ClaimPatch {
    pub fn is_empty(&self) -> bool {
        self == &ClaimPatch::default()
    }

    pub fn validate(&self) -> Result<(), ClaimError> {
        if self.is_empty() {
            return Err(ClaimError::Validation("patch contains no changes".to_string()));
        }
        if let Some(policy_number) = &self.policy_number {
            require_text("policyNumber", policy_number)?;
        }
        if let Some(policyholder) = &self.policyholder {
            require_text("policyholder", policyholder)?;
        }
        if let Some(claim_type) = &self.claim_type {
            require_text("claimType", claim_type)?;
        }
        if let Some(amount) = self.amount_requested {
            require_positive("amountRequested", amount)?;
        }
        Ok(())
    }

    /// Merges the patch into a claim
    pub fn apply_to(&self, claim: &mut Claim) {
        if let Some(v) = &self.policy_number {
            claim.policy_number = v.trim().to_string();
        }
        if let Some(v) = &self.policyholder {
            claim.policyholder = v.trim().to_string();
        }
        if let Some(v) = &self.claim_type {
            claim.claim_type = v.trim().to_string();
        }
        if let Some(v) = self.amount_requested {
            claim.amount_requested = v;
        }
        if let Some(v) = &self.description {
            claim.description = v.clone();
        }
        if let Some(v) = &self.verification_notes {
            claim.verification_notes = v.clone();
        }
        if let Some(v) = &self.approval_notes {
            claim.approval_notes = v.clone();
        }
    }

    /// Names of the fields this patch touches
    pub fn changed_fields(&self) -> Vec<&'static str> {
        let mut fields = Vec::new();
        if self.policy_number.is_some() {
            fields.push("policyNumber");
        }
        if self.policyholder.is_some() {
            fields.push("policyholder");
        }
        if self.claim_type.is_some() {
            fields.push("claimType");
        }
        if self.amount_requested.is_some() {
            fields.push("amountRequested");
        }
        if self.description.is_some() {
            fields.push("description");
        }
        if self.verification_notes.is_some() {
            fields.push("verificationNotes");
        }
        if self.approval_notes.is_some() {
            fields.push("approvalNotes");
        }
        fields
    }
}

pub(crate) fn require_text(field: &str, value: &str) -> Result<(), ClaimError> {
    if value.trim().is_empty() {
        return Err(ClaimError::Validation(format!("{field} is required")));
    }
    Ok(())
}

pub(crate) fn require_positive(field: &str, value: Decimal) -> Result<(), ClaimError> {
    if value <= Decimal::ZERO {
        return Err(ClaimError::Validation(format!("{field} must be positive, got {value}")));
    }
    Ok(())
}
