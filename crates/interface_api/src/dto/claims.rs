//! Claims DTOs

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use validator::Validate;

use core_kernel::ClaimId;
use domain_claims::{ApprovalOutcome, Claim, ClaimQuery, ClaimStatus, FieldFilters, NewClaim, StageView};

/// Query string of the claim list and export endpoints
#[derive(Debug, Default, Deserialize)]
pub struct ListClaimsParams {
    pub search: Option<String>,
    /// Comma-separated status names
    pub status: Option<String>,
    #[serde(rename = "type")]
    pub claim_type: Option<String>,
    /// Saved view id
    pub view: Option<String>,
}

impl ListClaimsParams {
    pub fn into_query(self) -> ClaimQuery {
        ClaimQuery {
            filters: FieldFilters::from_raw(self.status.as_deref(), self.claim_type.as_deref()),
            search: self.search,
            saved_view: self.view,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct SuggestionParams {
    #[serde(default)]
    pub q: String,
    pub limit: Option<usize>,
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct SubmitClaimRequest {
    #[validate(length(min = 1, max = 64))]
    pub policy_number: String,
    #[validate(length(min = 1, max = 128))]
    pub policyholder: Option<String>,
    #[validate(length(min = 1, max = 128))]
    pub claim_type: String,
    pub amount_requested: Decimal,
    #[serde(default)]
    #[validate(length(max = 4000))]
    pub description: String,
    #[serde(default)]
    pub documents: Vec<String>,
}

impl From<SubmitClaimRequest> for NewClaim {
    fn from(request: SubmitClaimRequest) -> Self {
        NewClaim {
            policy_number: request.policy_number,
            policyholder: request.policyholder,
            claim_type: request.claim_type,
            amount_requested: request.amount_requested,
            description: request.description,
            documents: request.documents,
        }
    }
}

#[derive(Debug, Deserialize, Validate)]
pub struct DecisionRequest {
    pub outcome: ApprovalOutcome,
    #[serde(default)]
    #[validate(length(max = 4000))]
    pub notes: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SettlementRequest {
    pub settlement_amount: Decimal,
}

#[derive(Debug, Deserialize)]
pub struct ReviewRequest {
    pub status: ClaimStatus,
}

#[derive(Debug, Deserialize, Validate)]
pub struct NoteRequest {
    #[validate(length(min = 1, max = 4000))]
    pub note: String,
}

#[derive(Debug, Deserialize, Validate)]
pub struct DocumentRequest {
    #[validate(length(min = 1, max = 255))]
    pub name: String,
}

/// A claim as served over HTTP, with SLA breaches evaluated
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClaimResponse {
    pub id: ClaimId,
    pub policy_number: String,
    pub policyholder: String,
    pub claim_type: String,
    pub amount_requested: Decimal,
    pub status: ClaimStatus,
    pub description: String,
    pub documents: Vec<String>,
    pub verification_notes: String,
    pub approval_notes: String,
    pub settlement_amount: Option<Decimal>,
    pub settlement_date: Option<NaiveDate>,
    pub submission_date: NaiveDate,
    pub last_updated: NaiveDate,
    pub workflow: Vec<StageView>,
}

impl ClaimResponse {
    pub fn new(claim: Claim, today: NaiveDate) -> Self {
        let workflow = claim.workflow_view(today);
        Self {
            id: claim.id,
            policy_number: claim.policy_number,
            policyholder: claim.policyholder,
            claim_type: claim.claim_type,
            amount_requested: claim.amount_requested,
            status: claim.status,
            description: claim.description,
            documents: claim.documents,
            verification_notes: claim.verification_notes,
            approval_notes: claim.approval_notes,
            settlement_amount: claim.settlement_amount,
            settlement_date: claim.settlement_date,
            submission_date: claim.submission_date,
            last_updated: claim.last_updated,
            workflow,
        }
    }
}

/// Export envelope
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClaimExport {
    pub generated_on: NaiveDate,
    pub count: usize,
    pub claims: Vec<ClaimResponse>,
}
