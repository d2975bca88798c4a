//! Comprehensive tests for domain_claims

use std::sync::Arc;
use std::time::Duration;

use chrono::NaiveDate;
use proptest::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;
use rust_decimal_macros::dec;

use core_kernel::ClaimId;
use domain_access::Role;
use domain_audit::AuditAction;
use domain_claims::sample::sample_claims;
use domain_claims::{
    search_suggestions, summarize, visible_claims, ApprovalOutcome, ClaimError, ClaimQuery,
    ClaimStatus, ClaimStore, FieldFilters, LifecycleScheduler, SavedViewCatalog, SchedulerConfig,
    StageName, StageStatus, Workflow,
};
use test_utils::*;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

// ============================================================================
// Workflow Shape Tests
// ============================================================================

mod workflow_shape_tests {
    use super::*;

    #[test]
    fn test_sample_claims_have_four_ordered_stages() {
        for claim in sample_claims().unwrap() {
            assert_eq!(claim.workflow.len(), 4);
            assert_claim_consistent(&claim);
        }
    }

    #[test]
    fn test_workflow_rejects_wrong_length() {
        let json = r#"[{"stage":"Submission","status":"completed"}]"#;
        let result: Result<Workflow, _> = serde_json::from_str(json);
        assert!(result.is_err());
    }

    #[test]
    fn test_workflow_rejects_wrong_order() {
        let json = r#"[
            {"stage":"Verification","status":"pending"},
            {"stage":"Submission","status":"completed"},
            {"stage":"Approval","status":"pending"},
            {"stage":"Settlement","status":"pending"}
        ]"#;
        let result: Result<Workflow, _> = serde_json::from_str(json);
        assert!(result.is_err());
    }

    #[test]
    fn test_submitted_claim_sla_dates() {
        let harness = TestHarness::empty();
        let claim = harness
            .engine
            .submit(&ActorFixtures::policyholder(), NewClaimBuilder::new().build())
            .unwrap();

        let dues: Vec<Option<NaiveDate>> = claim.workflow.stages().iter().map(|s| s.sla_due).collect();
        assert_eq!(
            dues,
            vec![
                Some(date(2023, 11, 17)),
                Some(date(2023, 11, 22)),
                Some(date(2023, 11, 24)),
                Some(date(2023, 11, 30)),
            ]
        );
        assert_stage_status(&claim, StageName::Submission, StageStatus::Completed);
        assert_stage_status(&claim, StageName::Verification, StageStatus::Pending);
    }
}

// ============================================================================
// Submission Tests
// ============================================================================

mod submission_tests {
    use super::*;

    #[test]
    fn test_submit_creates_submitted_claim() {
        let harness = TestHarness::with_sample_data();
        let actor = ActorFixtures::policyholder();

        let before = harness.audit.len();
        let claim = harness.engine.submit(&actor, NewClaimBuilder::new().build()).unwrap();

        assert_eq!(claim.id, ClaimId::from_sequence(8));
        assert_status(&claim, ClaimStatus::Submitted);
        assert_eq!(claim.policyholder, "Policyholder User");
        assert_eq!(claim.submission_date, TemporalFixtures::reference_date());
        assert_eq!(claim.settlement_amount, None);
        assert_claim_consistent(&claim);

        let entry = assert_single_new_entry(&harness.audit, before, claim.id, AuditAction::SubmittedClaim);
        assert_eq!(entry.details, "Claim CLM008 submitted.");
        assert_eq!(entry.user, "Policyholder User");
    }

    #[test]
    fn test_submit_keeps_explicit_policyholder() {
        let harness = TestHarness::empty();
        let claim = harness
            .engine
            .submit(
                &ActorFixtures::policyholder(),
                NewClaimBuilder::new().with_policyholder("Hana Park").build(),
            )
            .unwrap();
        assert_eq!(claim.policyholder, "Hana Park");
        assert_eq!(claim.id, ClaimId::from_sequence(1));
    }

    #[test]
    fn test_submit_rejects_non_positive_amount() {
        let harness = TestHarness::empty();
        let result = harness.engine.submit(
            &ActorFixtures::policyholder(),
            NewClaimBuilder::new().with_amount(dec!(0)).build(),
        );
        assert_validation_error(result);
        assert!(harness.store.is_empty());
        assert!(harness.audit.is_empty());
    }

    #[test]
    fn test_submit_rejects_blank_policy_number() {
        let harness = TestHarness::empty();
        let result = harness.engine.submit(
            &ActorFixtures::policyholder(),
            NewClaimBuilder::new().with_policy_number("   ").build(),
        );
        assert_validation_error(result);
    }

    #[test]
    fn test_finance_cannot_submit() {
        let harness = TestHarness::empty();
        let result = harness.engine.submit(&ActorFixtures::finance_team(), NewClaimBuilder::new().build());
        assert_permission_denied(result);
    }

    #[test]
    fn test_failed_submit_does_not_consume_id() {
        let harness = TestHarness::empty();
        let _ = harness.engine.submit(
            &ActorFixtures::policyholder(),
            NewClaimBuilder::new().with_amount(dec!(-5)).build(),
        );
        let claim = harness
            .engine
            .submit(&ActorFixtures::policyholder(), NewClaimBuilder::new().build())
            .unwrap();
        assert_eq!(claim.id.to_string(), "CLM001");
    }
}

// ============================================================================
// Approval Tests
// ============================================================================

mod approval_tests {
    use super::*;

    #[test]
    fn test_officer_approves_pending_verification_claim() {
        let harness = TestHarness::with_sample_data();
        let id = IdFixtures::pending_verification();
        let before = harness.audit.len();

        let claim = harness
            .engine
            .transition_approval_outcome(&ActorFixtures::claims_officer(), id, ApprovalOutcome::Approved, "ok")
            .unwrap();

        assert_status(&claim, ClaimStatus::Approved);
        assert_eq!(claim.approval_notes, "ok");
        assert_stage_status(&claim, StageName::Verification, StageStatus::Completed);
        assert_stage_status(&claim, StageName::Approval, StageStatus::Completed);
        assert_stage_status(&claim, StageName::Settlement, StageStatus::Active);
        assert_eq!(
            claim.workflow.stage(StageName::Approval).date,
            Some(TemporalFixtures::reference_date())
        );
        assert_claim_consistent(&claim);

        let entry = assert_single_new_entry(&harness.audit, before, id, AuditAction::ApprovedClaim);
        assert_eq!(entry.details, "Claim CLM002 approved. Notes: ok");
        assert_eq!(entry.user, "Claims Officer Admin");
    }

    #[test]
    fn test_rejection_skips_settlement() {
        let harness = TestHarness::with_sample_data();
        let id = IdFixtures::pending_approval();

        let claim = harness
            .engine
            .transition_approval_outcome(&ActorFixtures::admin(), id, ApprovalOutcome::Rejected, "not covered")
            .unwrap();

        assert_status(&claim, ClaimStatus::Rejected);
        assert_stage_status(&claim, StageName::Settlement, StageStatus::Skipped);
        assert_eq!(claim.workflow.stage(StageName::Settlement).sla_due, None);
        assert_eq!(harness.audit.recent(1)[0].action, AuditAction::RejectedClaim);
    }

    #[test]
    fn test_policyholder_cannot_approve() {
        let harness = TestHarness::with_sample_data();
        let before = harness.store.get(IdFixtures::pending_approval()).unwrap();
        let audit_len = harness.audit.len();

        let result = harness.engine.transition_approval_outcome(
            &ActorFixtures::policyholder(),
            IdFixtures::pending_approval(),
            ApprovalOutcome::Approved,
            "",
        );

        assert_permission_denied(result);
        assert_eq!(harness.store.get(IdFixtures::pending_approval()).unwrap(), before);
        assert_eq!(harness.audit.len(), audit_len);
    }

    #[test]
    fn test_anonymous_actor_is_denied() {
        let harness = TestHarness::with_sample_data();
        let result = harness.engine.transition_approval_outcome(
            &ActorFixtures::anonymous(),
            IdFixtures::pending_approval(),
            ApprovalOutcome::Approved,
            "",
        );
        assert_permission_denied(result);
    }

    #[test]
    fn test_unknown_claim_is_not_found() {
        let harness = TestHarness::with_sample_data();
        let result = harness.engine.transition_approval_outcome(
            &ActorFixtures::admin(),
            IdFixtures::unknown(),
            ApprovalOutcome::Approved,
            "",
        );
        assert_eq!(result, Err(ClaimError::NotFound(IdFixtures::unknown())));
    }
}

// ============================================================================
// Settlement Tests
// ============================================================================

mod settlement_tests {
    use super::*;

    #[test]
    fn test_finance_settles_approved_claim() {
        let harness = TestHarness::with_sample_data();
        let id = IdFixtures::approved();
        let before = harness.audit.len();

        let claim = harness
            .engine
            .settle(&ActorFixtures::finance_team(), id, dec!(4800))
            .unwrap();

        assert_status(&claim, ClaimStatus::Settled);
        assert_eq!(claim.settlement_amount, Some(dec!(4800)));
        assert_eq!(claim.settlement_date, Some(TemporalFixtures::reference_date()));
        assert_stage_status(&claim, StageName::Settlement, StageStatus::Completed);
        assert_claim_consistent(&claim);

        let entry = assert_single_new_entry(&harness.audit, before, id, AuditAction::SettledClaim);
        assert_eq!(entry.details, "Claim CLM001 settled for 4800.");
        assert_eq!(entry.user, "Finance Team Lead");
    }

    #[test]
    fn test_settle_requires_approved_status() {
        let harness = TestHarness::with_sample_data();
        let result = harness
            .engine
            .settle(&ActorFixtures::finance_team(), IdFixtures::submitted(), dec!(100));
        assert_invalid_transition(result);
        assert_status(&harness.store.get(IdFixtures::submitted()).unwrap(), ClaimStatus::Submitted);
    }

    #[test]
    fn test_settle_rejects_non_positive_amount() {
        let harness = TestHarness::with_sample_data();
        let result = harness
            .engine
            .settle(&ActorFixtures::finance_team(), IdFixtures::approved(), dec!(0));
        assert_validation_error(result);
    }

    #[test]
    fn test_settle_unapproved_claim_with_bad_amount_is_invalid_transition() {
        let harness = TestHarness::with_sample_data();
        let result = harness
            .engine
            .settle(&ActorFixtures::finance_team(), IdFixtures::pending_approval(), dec!(-5));
        assert_invalid_transition(result);
    }

    #[test]
    fn test_officer_cannot_settle() {
        let harness = TestHarness::with_sample_data();
        let result = harness
            .engine
            .settle(&ActorFixtures::claims_officer(), IdFixtures::approved(), dec!(100));
        assert_permission_denied(result);
    }
}

// ============================================================================
// Terminal Status Tests
// ============================================================================

mod terminal_tests {
    use super::*;

    fn assert_frozen(id: ClaimId) {
        let harness = TestHarness::with_sample_data();
        let officer = ActorFixtures::claims_officer();
        let snapshot = harness.store.get(id).unwrap();
        let audit_len = harness.audit.len();

        assert_invalid_transition(harness.engine.transition_approval_outcome(
            &officer,
            id,
            ApprovalOutcome::Approved,
            "",
        ));
        assert_invalid_transition(harness.engine.settle(&ActorFixtures::finance_team(), id, dec!(10)));
        assert_invalid_transition(
            harness
                .engine
                .edit_fields(&officer, id, ClaimPatchBuilder::new().description("x").build()),
        );
        assert_invalid_transition(harness.engine.review_transition(&officer, id, ClaimStatus::PendingApproval));
        assert_invalid_transition(harness.engine.add_verification_note(&officer, id, "note"));
        assert_invalid_transition(harness.engine.attach_document(&officer, id, "late.pdf"));

        // Status is checked before the input itself
        assert_invalid_transition(harness.engine.settle(&ActorFixtures::finance_team(), id, dec!(0)));
        assert_invalid_transition(harness.engine.edit_fields(&officer, id, ClaimPatchBuilder::new().build()));
        assert_invalid_transition(harness.engine.add_verification_note(&officer, id, "  "));
        assert_invalid_transition(harness.engine.attach_document(&officer, id, ""));

        let mut rng = StdRng::seed_from_u64(1);
        assert_eq!(harness.engine.auto_advance(id, 1.0, &mut rng), Ok(None));

        assert_eq!(harness.store.get(id).unwrap(), snapshot);
        assert_eq!(harness.audit.len(), audit_len);
    }

    #[test]
    fn test_rejected_claim_is_frozen() {
        assert_frozen(IdFixtures::rejected());
    }

    #[test]
    fn test_settled_claim_is_frozen() {
        assert_frozen(IdFixtures::settled());
    }
}

// ============================================================================
// Edit And Review Tests
// ============================================================================

mod edit_tests {
    use super::*;

    #[test]
    fn test_edit_fields_merges_patch() {
        let harness = TestHarness::with_sample_data();
        let id = IdFixtures::submitted();
        let before = harness.audit.len();

        let claim = harness
            .engine
            .edit_fields(
                &ActorFixtures::claims_officer(),
                id,
                ClaimPatchBuilder::new()
                    .description("Updated description")
                    .amount(dec!(3600))
                    .build(),
            )
            .unwrap();

        assert_eq!(claim.description, "Updated description");
        assert_eq!(claim.amount_requested, dec!(3600));
        assert_eq!(claim.policyholder, "Carol White");
        assert_status(&claim, ClaimStatus::Submitted);

        let entry = assert_single_new_entry(&harness.audit, before, id, AuditAction::UpdatedClaimDetails);
        assert!(entry.details.contains("amountRequested"));
        assert!(entry.details.contains("description"));
    }

    #[test]
    fn test_empty_patch_is_rejected() {
        let harness = TestHarness::with_sample_data();
        let result = harness.engine.edit_fields(
            &ActorFixtures::claims_officer(),
            IdFixtures::submitted(),
            ClaimPatchBuilder::new().build(),
        );
        assert_validation_error(result);
    }

    #[test]
    fn test_finance_cannot_edit() {
        let harness = TestHarness::with_sample_data();
        let result = harness.engine.edit_fields(
            &ActorFixtures::finance_team(),
            IdFixtures::submitted(),
            ClaimPatchBuilder::new().description("x").build(),
        );
        assert_permission_denied(result);
    }

    #[test]
    fn test_review_walks_verification_pipeline() {
        let harness = TestHarness::with_sample_data();
        let officer = ActorFixtures::claims_officer();
        let id = IdFixtures::submitted();

        let claim = harness
            .engine
            .review_transition(&officer, id, ClaimStatus::PendingVerification)
            .unwrap();
        assert_stage_status(&claim, StageName::Verification, StageStatus::Active);

        let claim = harness
            .engine
            .review_transition(&officer, id, ClaimStatus::UnderReview)
            .unwrap();
        assert_status(&claim, ClaimStatus::UnderReview);

        let claim = harness
            .engine
            .review_transition(&officer, id, ClaimStatus::PendingApproval)
            .unwrap();
        assert_stage_status(&claim, StageName::Verification, StageStatus::Completed);
        assert_stage_status(&claim, StageName::Approval, StageStatus::Active);
        assert_eq!(harness.audit_count_for(id), 3);
        assert_claim_consistent(&claim);
    }

    #[test]
    fn test_review_cannot_skip_ahead() {
        let harness = TestHarness::with_sample_data();
        let result = harness.engine.review_transition(
            &ActorFixtures::claims_officer(),
            IdFixtures::submitted(),
            ClaimStatus::PendingApproval,
        );
        assert_invalid_transition(result);
    }

    #[test]
    fn test_review_cannot_reach_decisions() {
        let harness = TestHarness::with_sample_data();
        let result = harness.engine.review_transition(
            &ActorFixtures::claims_officer(),
            IdFixtures::pending_approval(),
            ClaimStatus::Approved,
        );
        assert_invalid_transition(result);
    }

    #[test]
    fn test_verification_notes_accumulate() {
        let harness = TestHarness::with_sample_data();
        let officer = ActorFixtures::claims_officer();
        let id = IdFixtures::under_review();

        harness.engine.add_verification_note(&officer, id, "first").unwrap();
        let claim = harness.engine.add_verification_note(&officer, id, "  second ").unwrap();

        assert_eq!(claim.verification_notes, "first\nsecond");
        assert_eq!(harness.audit.recent(1)[0].action, AuditAction::AddedVerificationNote);
    }

    #[test]
    fn test_blank_note_is_rejected() {
        let harness = TestHarness::with_sample_data();
        let result = harness.engine.add_verification_note(
            &ActorFixtures::claims_officer(),
            IdFixtures::under_review(),
            "   ",
        );
        assert_validation_error(result);
    }

    #[test]
    fn test_policyholder_attaches_document() {
        let harness = TestHarness::with_sample_data();
        let id = IdFixtures::submitted();
        let claim = harness
            .engine
            .attach_document(&ActorFixtures::policyholder(), id, "receipt.pdf")
            .unwrap();
        assert_eq!(claim.documents.last().map(String::as_str), Some("receipt.pdf"));

        let duplicate = harness
            .engine
            .attach_document(&ActorFixtures::policyholder(), id, "receipt.pdf");
        assert_validation_error(duplicate);
    }
}

// ============================================================================
// Policyholder Permission Tests
// ============================================================================

mod policyholder_tests {
    use super::*;

    #[test]
    fn test_policyholder_is_denied_every_officer_operation() {
        let harness = TestHarness::with_sample_data();
        let actor = ActorFixtures::policyholder();
        let audit_len = harness.audit.len();

        for id in harness.store.ids() {
            assert_permission_denied(harness.engine.transition_approval_outcome(
                &actor,
                id,
                ApprovalOutcome::Approved,
                "",
            ));
            assert_permission_denied(harness.engine.settle(&actor, id, dec!(1)));
            assert_permission_denied(harness.engine.edit_fields(
                &actor,
                id,
                ClaimPatchBuilder::new().description("x").build(),
            ));
            assert_permission_denied(harness.engine.review_transition(&actor, id, ClaimStatus::UnderReview));
        }
        assert_eq!(harness.audit.len(), audit_len);
    }

    #[test]
    fn test_unknown_user_role_is_checked() {
        let harness = TestHarness::with_sample_data();
        let outsider = ActorFixtures::user("Temp Staff", Role::FinanceTeam);
        assert!(harness.engine.settle(&outsider, IdFixtures::approved(), dec!(10)).is_ok());
    }
}

// ============================================================================
// SLA Tests
// ============================================================================

mod sla_tests {
    use super::*;

    #[test]
    fn test_breaches_on_reference_date() {
        let harness = TestHarness::with_sample_data();
        let today = TemporalFixtures::reference_date();

        let clm002 = harness.store.get(IdFixtures::pending_verification()).unwrap();
        assert_eq!(
            clm002.workflow.breached_stages(today),
            vec![StageName::Verification, StageName::Approval]
        );

        // Due today is not yet a breach.
        let clm005 = harness.store.get(IdFixtures::under_review()).unwrap();
        assert!(clm005.workflow.breached_stages(today).is_empty());

        let clm006 = harness.store.get(IdFixtures::settled()).unwrap();
        assert!(clm006.workflow.breached_stages(today).is_empty());
    }

    #[test]
    fn test_breach_follows_the_clock() {
        let harness = TestHarness::with_sample_data();
        let claim = harness.store.get(IdFixtures::under_review()).unwrap();

        let today = harness.engine.clock().today();
        assert!(!claim.workflow_view(today).iter().any(|s| s.sla_breach));

        harness.clock.advance(chrono::Duration::days(1));
        let today = harness.engine.clock().today();
        let view = claim.workflow_view(today);
        assert!(view[1].sla_breach);
        assert!(!view[0].sla_breach);
    }

    #[test]
    fn test_skipped_stage_never_breaches() {
        let harness = TestHarness::with_sample_data();
        let claim = harness.store.get(IdFixtures::rejected()).unwrap();
        assert!(!claim.workflow.stage(StageName::Settlement).is_sla_breached(date(2030, 1, 1)));
    }

    proptest! {
        #[test]
        fn prop_breach_is_monotonic_in_time(offset in 0i64..60, extra in 0i64..60) {
            let claims = sample_claims().unwrap();
            let base = date(2023, 10, 1);
            let earlier = base + chrono::Duration::days(offset);
            let later = earlier + chrono::Duration::days(extra);
            for claim in &claims {
                for stage in claim.workflow.stages() {
                    if stage.is_sla_breached(earlier) {
                        prop_assert!(stage.is_sla_breached(later));
                    }
                }
            }
        }
    }
}

// ============================================================================
// Filter Tests
// ============================================================================

mod filter_tests {
    use super::*;

    #[test]
    fn test_search_lee_finds_only_clm007() {
        let claims = sample_claims().unwrap();
        let result = visible_claims(&claims, Some("Lee"), &FieldFilters::default(), None);
        let ids: Vec<String> = result.iter().map(|c| c.id.to_string()).collect();
        assert_eq!(ids, vec!["CLM007"]);
    }

    #[test]
    fn test_search_matches_policy_number_case_insensitively() {
        let claims = sample_claims().unwrap();
        let result = visible_claims(&claims, Some("pol987"), &FieldFilters::default(), None);
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].id, IdFixtures::approved());
    }

    #[test]
    fn test_blank_search_returns_everything_in_order() {
        let claims = sample_claims().unwrap();
        let result = visible_claims(&claims, Some("   "), &FieldFilters::default(), None);
        assert_eq!(result, claims);
    }

    #[test]
    fn test_type_filter_is_substring() {
        let claims = sample_claims().unwrap();
        let filters = FieldFilters::from_raw(None, Some("auto"));
        let ids: Vec<String> = visible_claims(&claims, None, &filters, None)
            .iter()
            .map(|c| c.id.to_string())
            .collect();
        assert_eq!(ids, vec!["CLM001", "CLM005"]);
    }

    #[test]
    fn test_saved_view_is_anded_with_filters() {
        let claims = sample_claims().unwrap();
        let views = SavedViewCatalog::with_defaults();
        let open = views.resolve(Some("sv1"));
        assert!(open.is_some());

        let all_open = visible_claims(&claims, None, &FieldFilters::default(), open);
        assert_eq!(all_open.len(), 4);

        let filters = FieldFilters::from_raw(Some("APPROVED"), None);
        let contradiction = visible_claims(&claims, None, &filters, open);
        assert!(contradiction.is_empty());
    }

    #[test]
    fn test_unknown_saved_view_is_ignored() {
        let harness = TestHarness::with_sample_data();
        let query = ClaimQuery {
            saved_view: Some("sv99".to_string()),
            ..ClaimQuery::default()
        };
        assert_eq!(query.run(&harness.store, &harness.views).len(), 7);
    }

    #[test]
    fn test_query_against_store() {
        let harness = TestHarness::with_sample_data();
        let query = ClaimQuery {
            search: None,
            filters: FieldFilters::default(),
            saved_view: Some("sv2".to_string()),
        };
        let ids: Vec<String> = query
            .run(&harness.store, &harness.views)
            .iter()
            .map(|c| c.id.to_string())
            .collect();
        assert_eq!(ids, vec!["CLM001", "CLM006"]);
    }

    #[test]
    fn test_suggestions_are_limited_and_labelled() {
        let claims = sample_claims().unwrap();
        let suggestions = search_suggestions(&claims, "clm", 5);
        assert_eq!(suggestions.len(), 5);
        assert_eq!(suggestions[0].id, "CLM001");
        assert_eq!(suggestions[0].label, "CLM001 - Alice Smith (Auto Accident)");
        assert!(search_suggestions(&claims, "", 5).is_empty());
    }

    #[test]
    fn test_summary_counts_every_status() {
        let claims = sample_claims().unwrap();
        let summary = summarize(&claims);
        assert_eq!(summary.total, 7);
        assert_eq!(summary.by_status.len(), ClaimStatus::ALL.len());
        for status in ClaimStatus::ALL {
            assert_eq!(summary.by_status[&status], 1, "{status}");
        }
    }

    proptest! {
        #[test]
        fn prop_visible_claims_is_idempotent(
            term in search_term_strategy(),
            filters in field_filters_strategy(),
            view in proptest::option::of(prop_oneof![Just("sv1"), Just("sv2")]),
        ) {
            let claims = sample_claims().unwrap();
            let views = SavedViewCatalog::with_defaults();
            let active = views.resolve(view);

            let once = visible_claims(&claims, term.as_deref(), &filters, active);
            let twice = visible_claims(&once, term.as_deref(), &filters, active);
            prop_assert_eq!(&once, &twice);
            prop_assert!(once.len() <= claims.len());
        }
    }
}

// ============================================================================
// Store Tests
// ============================================================================

mod store_tests {
    use super::*;

    #[test]
    fn test_seed_rejects_duplicates_atomically() {
        let store = ClaimStore::new();
        let mut claims = sample_claims().unwrap();
        claims.push(claims[0].clone());
        assert_validation_error(store.seed(claims));
        assert!(store.is_empty());
    }

    #[test]
    fn test_seed_rejects_inconsistent_claim() {
        let store = ClaimStore::new();
        let mut claims = sample_claims().unwrap();
        claims[0].settlement_amount = Some(dec!(4800));
        assert_validation_error(store.seed(claims));
    }

    #[test]
    fn test_next_id_follows_seed() {
        let harness = TestHarness::with_sample_data();
        assert_eq!(harness.store.len(), 7);
        let claim = harness
            .engine
            .submit(&ActorFixtures::policyholder(), NewClaimBuilder::new().build())
            .unwrap();
        assert_eq!(claim.id.to_string(), "CLM008");
    }

    #[test]
    fn test_concurrent_mutations_are_serialized() {
        let harness = TestHarness::with_sample_data();
        let engine = harness.engine.clone();
        let id = IdFixtures::under_review();

        let handles: Vec<_> = (0..8)
            .map(|n| {
                let engine = engine.clone();
                std::thread::spawn(move || {
                    engine
                        .add_verification_note(&ActorFixtures::claims_officer(), id, &format!("note {n}"))
                        .unwrap();
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        let claim = harness.store.get(id).unwrap();
        assert_eq!(claim.verification_notes.lines().count(), 8);
        // One seeded entry plus one per note.
        assert_eq!(harness.audit_count_for(id), 9);

        let ids: Vec<_> = harness.audit.entries().iter().map(|e| e.id).collect();
        let mut sorted = ids.clone();
        sorted.sort();
        sorted.dedup();
        assert_eq!(sorted.len(), ids.len());
    }

    proptest! {
        #[test]
        fn prop_submissions_satisfy_invariants(inputs in proptest::collection::vec(new_claim_strategy(), 1..10)) {
            let harness = TestHarness::empty();
            let actor = ActorFixtures::policyholder();
            for input in inputs {
                let before = harness.audit.len();
                let claim = harness.engine.submit(&actor, input).unwrap();
                prop_assert!(claim.check_invariants().is_ok());
                prop_assert_eq!(harness.audit.len(), before + 1);
                prop_assert_eq!(harness.audit.recent(1)[0].related_id, Some(claim.id));
            }
        }
    }
}

// ============================================================================
// Scheduler Tests
// ============================================================================

mod scheduler_tests {
    use super::*;

    fn scheduler(harness: &TestHarness, probability: f64) -> LifecycleScheduler {
        LifecycleScheduler::with_rng(
            harness.engine.clone(),
            SchedulerConfig {
                interval: Duration::from_millis(10),
                advance_probability: probability,
            },
            StdRng::seed_from_u64(7),
        )
        .unwrap()
    }

    #[test]
    fn test_zero_interval_is_rejected() {
        let harness = TestHarness::empty();
        let config = SchedulerConfig {
            interval: Duration::ZERO,
            advance_probability: 0.5,
        };
        assert_validation_error(LifecycleScheduler::new(harness.engine.clone(), config));
        assert!(LifecycleScheduler::new(harness.engine.clone(), SchedulerConfig::default()).is_ok());
    }

    #[test]
    fn test_certain_tick_advances_under_review_only() {
        let harness = TestHarness::with_sample_data();
        let before = harness.audit.len();

        let report = scheduler(&harness, 1.0).run_tick();

        assert!(!report.skipped);
        assert_eq!(report.evaluated, 7);
        assert_eq!(report.advanced, vec![IdFixtures::under_review()]);

        let claim = harness.store.get(IdFixtures::under_review()).unwrap();
        assert_status(&claim, ClaimStatus::PendingApproval);
        assert_stage_status(&claim, StageName::Approval, StageStatus::Active);

        let entry = assert_single_new_entry(
            &harness.audit,
            before,
            IdFixtures::under_review(),
            AuditAction::UpdatedClaimStatus,
        );
        assert_eq!(entry.user, "System");
        assert_eq!(entry.details, "Claim CLM005 status changed to PENDING_APPROVAL.");
    }

    #[test]
    fn test_zero_probability_never_advances() {
        let harness = TestHarness::with_sample_data();
        let before = harness.audit.len();
        let scheduler = scheduler(&harness, 0.0);
        for _ in 0..20 {
            assert!(scheduler.run_tick().advanced.is_empty());
        }
        assert_eq!(harness.audit.len(), before);
    }

    #[test]
    fn test_out_of_range_probability_is_clamped() {
        let harness = TestHarness::with_sample_data();
        let mut rng = StdRng::seed_from_u64(3);
        let id = IdFixtures::under_review();
        assert_eq!(harness.engine.auto_advance(id, f64::NAN, &mut rng), Ok(None));
        assert!(harness.engine.auto_advance(id, 5.0, &mut rng).unwrap().is_some());
    }

    #[test]
    fn test_advanced_claim_is_not_advanced_again() {
        let harness = TestHarness::with_sample_data();
        let scheduler = scheduler(&harness, 1.0);
        assert_eq!(scheduler.run_tick().advanced.len(), 1);
        assert!(scheduler.run_tick().advanced.is_empty());
    }

    #[tokio::test]
    async fn test_spawned_scheduler_ticks_and_stops() {
        let harness = TestHarness::with_sample_data();
        let handle = Arc::new(scheduler(&harness, 1.0)).spawn();

        let id = IdFixtures::under_review();
        let mut advanced = false;
        for _ in 0..100 {
            tokio::time::sleep(Duration::from_millis(10)).await;
            if harness.store.get(id).unwrap().status == ClaimStatus::PendingApproval {
                advanced = true;
                break;
            }
        }
        assert!(advanced, "scheduler never advanced {id}");

        handle.shutdown().await.unwrap();
        assert_eq!(harness.audit_count_for(id), 2);
    }
}
