//! Workflow engine
//!
//! The only writer of the claim store. Each operation follows the same
//! sequence:
//!
//! 1. check the actor's permission (fails closed)
//! 2. under the claim's lock, reject the claim's current status if the
//!    operation does not apply to it
//! 3. validate the input
//! 4. compute the next state on a copy
//! 5. append the audit entry
//! 6. commit the copy
//!
//! Submission has no existing claim, so it validates before step 2.
//!
//! A failure at any step leaves both the claim and the audit log unchanged.

use std::sync::Arc;

use rand::Rng;
use rust_decimal::Decimal;
use tracing::{debug, info};

use core_kernel::{ClaimId, SharedClock};
use domain_access::{Actor, Permission, PermissionService};
use domain_audit::{AuditAction, AuditLog, NewAuditEntry};
use crate::claim::{require_positive, require_text, ApprovalOutcome, Claim, ClaimPatch, ClaimStatus, NewClaim};
use crate::error::ClaimError;
use crate::store::ClaimStore;

/// Applies lifecycle transitions to claims
#[derive(Debug, Clone)]
pub struct WorkflowEngine {
    store: Arc<ClaimStore>,
    audit: Arc<AuditLog>,
    permissions: PermissionService,
    clock: SharedClock,
}

impl WorkflowEngine {
    pub fn new(store: Arc<ClaimStore>, audit: Arc<AuditLog>, clock: SharedClock) -> Self {
        Self {
            store,
            audit,
            permissions: PermissionService::new(),
            clock,
        }
    }

    pub fn store(&self) -> &Arc<ClaimStore> {
        &self.store
    }

    pub fn audit(&self) -> &Arc<AuditLog> {
        &self.audit
    }

    pub fn clock(&self) -> &SharedClock {
        &self.clock
    }

    pub fn permissions(&self) -> &PermissionService {
        &self.permissions
    }

    /// Creates a claim in SUBMITTED status
    ///
    /// # Errors
    ///
    /// * `PermissionDenied` without `SUBMIT_CLAIM`
    /// * `Validation` for a blank policy number or claim type, or a
    ///   non-positive amount
    pub fn submit(&self, actor: &Actor, data: NewClaim) -> Result<Claim, ClaimError> {
        self.permissions.require(actor, Permission::SubmitClaim)?;
        data.validate()?;

        let today = self.clock.today();
        let policyholder = data
            .policyholder
            .as_deref()
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .unwrap_or_else(|| actor.display_name())
            .to_string();

        let claim = self.store.create(|id| {
            let claim = Claim::submitted(id, data, policyholder, today);
            self.audit.append(
                NewAuditEntry::new(actor.display_name(), AuditAction::SubmittedClaim, format!("Claim {id} submitted."))
                    .for_claim(id),
            )?;
            Ok((claim.clone(), claim))
        })?;

        info!(claim_id = %claim.id, actor = %actor.display_name(), amount = %claim.amount_requested, "Claim submitted");
        Ok(claim)
    }

    /// Records the approval decision on a claim
    ///
    /// The approval stage is completed today and any earlier stage still open
    /// is closed with it. Approval opens the settlement stage, rejection
    /// skips it.
    ///
    /// # Errors
    ///
    /// * `PermissionDenied` without `APPROVE_REJECT_CLAIM`
    /// * `NotFound` for an unknown claim
    /// * `InvalidTransition` when the claim is rejected or settled
    pub fn transition_approval_outcome(
        &self,
        actor: &Actor,
        claim_id: ClaimId,
        outcome: ApprovalOutcome,
        notes: &str,
    ) -> Result<Claim, ClaimError> {
        self.permissions.require(actor, Permission::ApproveRejectClaim)?;
        let today = self.clock.today();

        let claim = self.store.apply(claim_id, |current| {
            ensure_mutable(current, "record an approval outcome")?;

            let mut next = current.clone();
            next.status = outcome.status();
            next.approval_notes = notes.to_string();
            next.workflow.record_approval(outcome == ApprovalOutcome::Approved, today);
            next.last_updated = today;

            let (action, verb) = match outcome {
                ApprovalOutcome::Approved => (AuditAction::ApprovedClaim, "approved"),
                ApprovalOutcome::Rejected => (AuditAction::RejectedClaim, "rejected"),
            };
            self.audit.append(
                NewAuditEntry::new(actor.display_name(), action, format!("Claim {claim_id} {verb}. Notes: {notes}"))
                    .for_claim(claim_id),
            )?;
            Ok((next.clone(), next))
        })?;

        info!(%claim_id, status = %claim.status, actor = %actor.display_name(), "Approval outcome recorded");
        Ok(claim)
    }

    /// Settles an approved claim
    ///
    /// # Errors
    ///
    /// * `PermissionDenied` without `SETTLE_CLAIM`
    /// * `NotFound` for an unknown claim
    /// * `InvalidTransition` unless the claim is APPROVED
    /// * `Validation` for a non-positive amount
    pub fn settle(&self, actor: &Actor, claim_id: ClaimId, settlement_amount: Decimal) -> Result<Claim, ClaimError> {
        self.permissions.require(actor, Permission::SettleClaim)?;
        let today = self.clock.today();

        let claim = self.store.apply(claim_id, |current| {
            if current.status != ClaimStatus::Approved {
                return Err(ClaimError::invalid_transition(claim_id, current.status, "settle"));
            }
            require_positive("settlementAmount", settlement_amount)?;

            let mut next = current.clone();
            next.status = ClaimStatus::Settled;
            next.settlement_amount = Some(settlement_amount);
            next.settlement_date = Some(today);
            next.workflow.record_settlement(today);
            next.last_updated = today;

            self.audit.append(
                NewAuditEntry::new(
                    actor.display_name(),
                    AuditAction::SettledClaim,
                    format!("Claim {claim_id} settled for {settlement_amount}."),
                )
                .for_claim(claim_id),
            )?;
            Ok((next.clone(), next))
        })?;

        info!(%claim_id, amount = %settlement_amount, actor = %actor.display_name(), "Claim settled");
        Ok(claim)
    }

    /// Merges editable fields into a claim
    ///
    /// # Errors
    ///
    /// * `PermissionDenied` without `EDIT_CLAIM_FIELDS`
    /// * `NotFound` for an unknown claim
    /// * `InvalidTransition` when the claim is rejected or settled
    /// * `Validation` for an empty patch or invalid values
    pub fn edit_fields(&self, actor: &Actor, claim_id: ClaimId, patch: ClaimPatch) -> Result<Claim, ClaimError> {
        self.permissions.require(actor, Permission::EditClaimFields)?;
        let today = self.clock.today();

        let claim = self.store.apply(claim_id, |current| {
            ensure_mutable(current, "edit")?;
            patch.validate()?;

            let mut next = current.clone();
            patch.apply_to(&mut next);
            next.last_updated = today;

            self.audit.append(
                NewAuditEntry::new(
                    actor.display_name(),
                    AuditAction::UpdatedClaimDetails,
                    format!("Claim {claim_id} details updated: {}.", patch.changed_fields().join(", ")),
                )
                .for_claim(claim_id),
            )?;
            Ok((next.clone(), next))
        })?;

        info!(%claim_id, fields = ?patch.changed_fields(), actor = %actor.display_name(), "Claim details updated");
        Ok(claim)
    }

    /// Moves a claim through the verification part of the pipeline
    ///
    /// Allowed moves: SUBMITTED to PENDING_VERIFICATION, PENDING_VERIFICATION
    /// to UNDER_REVIEW, and PENDING_VERIFICATION or UNDER_REVIEW to
    /// PENDING_APPROVAL.
    pub fn review_transition(&self, actor: &Actor, claim_id: ClaimId, target: ClaimStatus) -> Result<Claim, ClaimError> {
        self.permissions.require(actor, Permission::ReviewClaim)?;
        let today = self.clock.today();

        let claim = self.store.apply(claim_id, |current| {
            ensure_mutable(current, "review")?;
            if !current.status.can_review_to(target) {
                return Err(ClaimError::invalid_transition(claim_id, current.status, "move to the requested status"));
            }

            let mut next = current.clone();
            next.status = target;
            match target {
                ClaimStatus::PendingVerification => next.workflow.start_verification(today),
                ClaimStatus::PendingApproval => next.workflow.finish_verification(today),
                _ => {}
            }
            next.last_updated = today;

            self.audit.append(status_entry(actor.display_name(), claim_id, target))?;
            Ok((next.clone(), next))
        })?;

        info!(%claim_id, status = %claim.status, actor = %actor.display_name(), "Claim status updated");
        Ok(claim)
    }

    /// Appends a note to the claim's verification notes
    pub fn add_verification_note(&self, actor: &Actor, claim_id: ClaimId, note: &str) -> Result<Claim, ClaimError> {
        self.permissions.require(actor, Permission::ReviewClaim)?;
        let note = note.trim();
        let today = self.clock.today();

        self.store.apply(claim_id, |current| {
            ensure_mutable(current, "annotate")?;
            require_text("note", note)?;

            let mut next = current.clone();
            if next.verification_notes.is_empty() {
                next.verification_notes = note.to_string();
            } else {
                next.verification_notes = format!("{}\n{}", next.verification_notes, note);
            }
            next.last_updated = today;

            self.audit.append(
                NewAuditEntry::new(
                    actor.display_name(),
                    AuditAction::AddedVerificationNote,
                    format!("Added note to {claim_id}: {note}"),
                )
                .for_claim(claim_id),
            )?;
            Ok((next.clone(), next))
        })
    }

    /// Attaches a document reference to a claim
    pub fn attach_document(&self, actor: &Actor, claim_id: ClaimId, document: &str) -> Result<Claim, ClaimError> {
        self.permissions.require(actor, Permission::UploadDocs)?;
        let document = document.trim();
        let today = self.clock.today();

        self.store.apply(claim_id, |current| {
            ensure_mutable(current, "attach documents to")?;
            require_text("document", document)?;
            if current.documents.iter().any(|d| d == document) {
                return Err(ClaimError::Validation(format!("{document} is already attached to {claim_id}")));
            }

            let mut next = current.clone();
            next.documents.push(document.to_string());
            next.last_updated = today;

            self.audit.append(
                NewAuditEntry::new(
                    actor.display_name(),
                    AuditAction::UploadedDocument,
                    format!("Document {document} attached to claim {claim_id}."),
                )
                .for_claim(claim_id),
            )?;
            Ok((next.clone(), next))
        })
    }

    /// Scheduler hook: may move an UNDER_REVIEW claim to PENDING_APPROVAL
    ///
    /// Runs as the system actor without a permission check. The roll happens
    /// under the claim's lock; claims in any other status are left alone and
    /// nothing is audited. Returns the updated claim when it advanced.
    pub fn auto_advance<R>(&self, claim_id: ClaimId, probability: f64, rng: &mut R) -> Result<Option<Claim>, ClaimError>
    where
        R: Rng + ?Sized,
    {
        let probability = if probability.is_nan() { 0.0 } else { probability.clamp(0.0, 1.0) };
        let today = self.clock.today();

        let advanced = self.store.apply(claim_id, |current| {
            if current.status != ClaimStatus::UnderReview || !rng.gen_bool(probability) {
                return Ok((current.clone(), None));
            }

            let mut next = current.clone();
            next.status = ClaimStatus::PendingApproval;
            next.workflow.finish_verification(today);
            next.last_updated = today;

            self.audit.append(status_entry(Actor::System.display_name(), claim_id, next.status))?;
            Ok((next.clone(), Some(next)))
        })?;

        match &advanced {
            Some(claim) => info!(%claim_id, status = %claim.status, "Claim advanced automatically"),
            None => debug!(%claim_id, "Claim not advanced"),
        }
        Ok(advanced)
    }
}

fn ensure_mutable(claim: &Claim, operation: &'static str) -> Result<(), ClaimError> {
    if claim.status.is_terminal() {
        return Err(ClaimError::invalid_transition(claim.id, claim.status, operation));
    }
    Ok(())
}

fn status_entry(user: &str, claim_id: ClaimId, status: ClaimStatus) -> NewAuditEntry {
    NewAuditEntry::new(
        user,
        AuditAction::UpdatedClaimStatus,
        format!("Claim {claim_id} status changed to {status}."),
    )
    .for_claim(claim_id)
}
