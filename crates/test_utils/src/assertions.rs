//! Custom Test Assertions
//!
//! Provides specialized assertion helpers for domain types that give
//! more meaningful error messages than standard assertions.

use core_kernel::ClaimId;
use domain_audit::{AuditAction, AuditLog, AuditLogEntry};
use domain_claims::{Claim, ClaimError, ClaimStatus, StageName, StageStatus};

/// Asserts the status/workflow/settlement invariants of a claim
///
/// # Panics
///
/// Panics if the workflow is not the fixed four-stage layout or the claim
/// fails its own consistency check
pub fn assert_claim_consistent(claim: &Claim) {
    let names: Vec<StageName> = claim.workflow.stages().iter().map(|s| s.stage).collect();
    assert_eq!(
        names,
        StageName::ORDER.to_vec(),
        "Claim {} has workflow stages out of order",
        claim.id
    );
    if let Err(err) = claim.check_invariants() {
        panic!("Claim {} violates its invariants: {}", claim.id, err);
    }
}

/// Asserts the status of a stage
pub fn assert_stage_status(claim: &Claim, stage: StageName, expected: StageStatus) {
    let actual = claim.workflow.stage(stage).status;
    assert_eq!(
        actual, expected,
        "Claim {} stage {} is {:?}, expected {:?}",
        claim.id, stage, actual, expected
    );
}

/// Asserts that an operation failed with `InvalidTransition`
pub fn assert_invalid_transition<T: std::fmt::Debug>(result: Result<T, ClaimError>) {
    match result {
        Err(ClaimError::InvalidTransition { .. }) => {}
        other => panic!("Expected InvalidTransition, got {:?}", other),
    }
}

/// Asserts that an operation failed with `PermissionDenied`
pub fn assert_permission_denied<T: std::fmt::Debug>(result: Result<T, ClaimError>) {
    match result {
        Err(ClaimError::PermissionDenied { .. }) => {}
        other => panic!("Expected PermissionDenied, got {:?}", other),
    }
}

/// Asserts that an operation failed with `Validation`
pub fn assert_validation_error<T: std::fmt::Debug>(result: Result<T, ClaimError>) {
    match result {
        Err(ClaimError::Validation(_)) => {}
        other => panic!("Expected Validation error, got {:?}", other),
    }
}

/// Asserts that exactly one entry was appended since `before` and returns it
///
/// # Arguments
///
/// * `log` - The audit log
/// * `before` - Log length captured before the operation
/// * `claim_id` - Claim the entry must reference
/// * `action` - Expected action kind
pub fn assert_single_new_entry(
    log: &AuditLog,
    before: usize,
    claim_id: ClaimId,
    action: AuditAction,
) -> AuditLogEntry {
    let entries = log.entries();
    assert_eq!(
        entries.len(),
        before + 1,
        "Expected exactly one new audit entry, found {}",
        entries.len() - before
    );
    let entry = entries[before].clone();
    assert_eq!(entry.related_id, Some(claim_id), "Audit entry references the wrong claim");
    assert_eq!(entry.action, action, "Audit entry has the wrong action");
    entry
}

/// Asserts a claim's status
pub fn assert_status(claim: &Claim, expected: ClaimStatus) {
    assert_eq!(claim.status, expected, "Claim {} has status {}, expected {}", claim.id, claim.status, expected);
}
