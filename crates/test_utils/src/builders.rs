//! Test Data Builders
//!
//! Provides builder patterns for constructing test data with sensible defaults.
//! These builders allow tests to specify only the relevant fields while using
//! defaults for everything else.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use domain_claims::{ClaimPatch, NewClaim};

/// Builder for claim submissions
pub struct NewClaimBuilder {
    policy_number: String,
    policyholder: Option<String>,
    claim_type: String,
    amount_requested: Decimal,
    description: String,
    documents: Vec<String>,
}

impl Default for NewClaimBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl NewClaimBuilder {
    /// Creates a new builder with default values
    pub fn new() -> Self {
        Self {
            policy_number: "POL555000".to_string(),
            policyholder: None,
            claim_type: "Travel - Lost Luggage".to_string(),
            amount_requested: dec!(1250),
            description: "Checked bag lost on connecting flight.".to_string(),
            documents: vec!["baggage_receipt.pdf".to_string()],
        }
    }

    /// Sets the policy number
    pub fn with_policy_number(mut self, number: impl Into<String>) -> Self {
        self.policy_number = number.into();
        self
    }

    /// Sets an explicit policyholder
    pub fn with_policyholder(mut self, name: impl Into<String>) -> Self {
        self.policyholder = Some(name.into());
        self
    }

    /// Sets the claim type
    pub fn with_claim_type(mut self, claim_type: impl Into<String>) -> Self {
        self.claim_type = claim_type.into();
        self
    }

    /// Sets the requested amount
    pub fn with_amount(mut self, amount: Decimal) -> Self {
        self.amount_requested = amount;
        self
    }

    /// Sets the description
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Replaces the document list
    pub fn with_documents(mut self, documents: &[&str]) -> Self {
        self.documents = documents.iter().map(|d| d.to_string()).collect();
        self
    }

    pub fn build(self) -> NewClaim {
        NewClaim {
            policy_number: self.policy_number,
            policyholder: self.policyholder,
            claim_type: self.claim_type,
            amount_requested: self.amount_requested,
            description: self.description,
            documents: self.documents,
        }
    }
}

/// Builder for field patches
#[derive(Default)]
pub struct ClaimPatchBuilder {
    patch: ClaimPatch,
}

impl ClaimPatchBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn description(mut self, value: impl Into<String>) -> Self {
        self.patch.description = Some(value.into());
        self
    }

    pub fn claim_type(mut self, value: impl Into<String>) -> Self {
        self.patch.claim_type = Some(value.into());
        self
    }

    pub fn amount(mut self, value: Decimal) -> Self {
        self.patch.amount_requested = Some(value);
        self
    }

    pub fn verification_notes(mut self, value: impl Into<String>) -> Self {
        self.patch.verification_notes = Some(value.into());
        self
    }

    pub fn approval_notes(mut self, value: impl Into<String>) -> Self {
        self.patch.approval_notes = Some(value.into());
        self
    }

    pub fn build(self) -> ClaimPatch {
        self.patch
    }
}
