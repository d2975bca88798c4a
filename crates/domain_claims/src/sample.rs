//! Demonstration data set
//!
//! Seven claims covering every status, plus the audit history that goes with
//! them. The records use the same JSON layout the API serves.

use domain_audit::{AuditLog, AuditLogEntry};
use crate::claim::Claim;
use crate::error::ClaimError;
use crate::store::ClaimStore;

const SAMPLE_CLAIMS: &str = include_str!("../data/sample_claims.json");
const SAMPLE_AUDIT_LOG: &str = include_str!("../data/sample_audit_log.json");

pub fn sample_claims() -> Result<Vec<Claim>, ClaimError> {
    serde_json::from_str(SAMPLE_CLAIMS)
        .map_err(|e| ClaimError::Validation(format!("sample claims are malformed: {e}")))
}

pub fn sample_audit_entries() -> Result<Vec<AuditLogEntry>, ClaimError> {
    serde_json::from_str(SAMPLE_AUDIT_LOG)
        .map_err(|e| ClaimError::Validation(format!("sample audit log is malformed: {e}")))
}

/// Loads the demonstration claims and audit history
pub fn seed_demo_data(store: &ClaimStore, audit: &AuditLog) -> Result<(), ClaimError> {
    store.seed(sample_claims()?)?;
    audit.import(sample_audit_entries()?)?;
    Ok(())
}
