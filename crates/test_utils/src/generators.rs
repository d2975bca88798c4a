//! Property-Based Test Generators
//!
//! Provides proptest strategies for generating random test data
//! that maintains domain invariants.

use proptest::prelude::*;
use rust_decimal::Decimal;

use domain_claims::{ApprovalOutcome, ClaimStatus, FieldFilters, NewClaim};

/// Strategy for any claim status
pub fn claim_status_strategy() -> impl Strategy<Value = ClaimStatus> {
    proptest::sample::select(ClaimStatus::ALL.to_vec())
}

/// Strategy for approval outcomes
pub fn approval_outcome_strategy() -> impl Strategy<Value = ApprovalOutcome> {
    prop_oneof![Just(ApprovalOutcome::Approved), Just(ApprovalOutcome::Rejected)]
}

/// Strategy for positive amounts with two decimal places
pub fn positive_amount_strategy() -> impl Strategy<Value = Decimal> {
    (1i64..100_000_000i64).prop_map(|cents| Decimal::new(cents, 2))
}

/// Strategy for zero or negative amounts
pub fn non_positive_amount_strategy() -> impl Strategy<Value = Decimal> {
    (-100_000_000i64..=0i64).prop_map(|cents| Decimal::new(cents, 2))
}

/// Strategy for claim types drawn from the demonstration vocabulary
pub fn claim_type_strategy() -> impl Strategy<Value = String> {
    proptest::sample::select(vec![
        "Auto Accident",
        "Home Burglary",
        "Health - Hospitalization",
        "Property Damage - Fire",
        "Auto Theft",
        "Life Insurance",
        "Dental",
    ])
    .prop_map(str::to_string)
}

/// Strategy for valid claim submissions
pub fn new_claim_strategy() -> impl Strategy<Value = NewClaim> {
    ("POL[0-9]{6}", claim_type_strategy(), positive_amount_strategy(), "[a-z ]{0,40}").prop_map(
        |(policy_number, claim_type, amount_requested, description)| NewClaim {
            policy_number,
            policyholder: None,
            claim_type,
            amount_requested,
            description,
            documents: Vec::new(),
        },
    )
}

/// Strategy for field filters, including empty ones
pub fn field_filters_strategy() -> impl Strategy<Value = FieldFilters> {
    (
        proptest::collection::btree_set(claim_status_strategy(), 0..4),
        proptest::option::of(prop_oneof![Just("auto"), Just("HEALTH"), Just("e"), Just("zzz")]),
    )
        .prop_map(|(status, claim_type)| FieldFilters {
            status,
            claim_type: claim_type.map(str::to_string),
        })
}

/// Strategy for free-text search terms, including blank ones
pub fn search_term_strategy() -> impl Strategy<Value = Option<String>> {
    proptest::option::of(prop_oneof![
        Just(String::new()),
        Just("lee".to_string()),
        Just("CLM00".to_string()),
        Just("pol9".to_string()),
        "[a-z]{1,3}",
    ])
}
