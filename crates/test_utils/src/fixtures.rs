//! Pre-built Test Fixtures
//!
//! Provides ready-to-use actors, clocks, and a fully wired engine so tests
//! exercise the same object graph the API server builds.

use std::sync::Arc;

use chrono::NaiveDate;
use core_kernel::{ClaimId, ManualClock, SharedClock};
use domain_access::{Actor, Role, User, UserDirectory};
use domain_audit::AuditLog;
use domain_claims::sample::seed_demo_data;
use domain_claims::{ClaimStore, SavedViewCatalog, WorkflowEngine};

/// Fixture for temporal test data
pub struct TemporalFixtures;

impl TemporalFixtures {
    /// Reference "today" for the demonstration data set
    pub fn reference_date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2023, 11, 15).unwrap()
    }

    /// Clock pinned to noon on the reference date
    pub fn clock() -> Arc<ManualClock> {
        Arc::new(ManualClock::at_date(2023, 11, 15).unwrap())
    }
}

/// Fixture for actors, one per role plus the non-user actors
pub struct ActorFixtures;

impl ActorFixtures {
    fn demo(role: Role) -> Actor {
        let directory = UserDirectory::with_demo_users();
        let user = directory
            .users()
            .iter()
            .find(|u| u.role == role)
            .cloned()
            .expect("demo directory has every role");
        Actor::User(user)
    }

    pub fn policyholder() -> Actor {
        Self::demo(Role::Policyholder)
    }

    pub fn claims_officer() -> Actor {
        Self::demo(Role::ClaimsOfficer)
    }

    pub fn finance_team() -> Actor {
        Self::demo(Role::FinanceTeam)
    }

    pub fn admin() -> Actor {
        Self::demo(Role::Admin)
    }

    pub fn anonymous() -> Actor {
        Actor::Anonymous
    }

    /// A user outside the demo directory
    pub fn user(name: &str, role: Role) -> Actor {
        Actor::User(User::new(99, name, role, "someone@example.com"))
    }

    /// Every demo user, in role order
    pub fn all_users() -> Vec<Actor> {
        Role::ALL.into_iter().map(Self::demo).collect()
    }
}

/// Fixture for claim ids from the demonstration data set
pub struct IdFixtures;

impl IdFixtures {
    /// APPROVED, settlement stage active
    pub fn approved() -> ClaimId {
        ClaimId::from_sequence(1)
    }

    /// PENDING_VERIFICATION
    pub fn pending_verification() -> ClaimId {
        ClaimId::from_sequence(2)
    }

    /// SUBMITTED
    pub fn submitted() -> ClaimId {
        ClaimId::from_sequence(3)
    }

    /// REJECTED
    pub fn rejected() -> ClaimId {
        ClaimId::from_sequence(4)
    }

    /// UNDER_REVIEW
    pub fn under_review() -> ClaimId {
        ClaimId::from_sequence(5)
    }

    /// SETTLED
    pub fn settled() -> ClaimId {
        ClaimId::from_sequence(6)
    }

    /// PENDING_APPROVAL
    pub fn pending_approval() -> ClaimId {
        ClaimId::from_sequence(7)
    }

    pub fn unknown() -> ClaimId {
        ClaimId::from_sequence(999)
    }
}

/// An engine wired to its own store, audit log and manual clock
pub struct TestHarness {
    pub clock: Arc<ManualClock>,
    pub store: Arc<ClaimStore>,
    pub audit: Arc<AuditLog>,
    pub engine: Arc<WorkflowEngine>,
    pub views: SavedViewCatalog,
}

impl TestHarness {
    /// Empty store and audit log
    pub fn empty() -> Self {
        let clock = TemporalFixtures::clock();
        let shared: SharedClock = clock.clone();
        let store = Arc::new(ClaimStore::new());
        let audit = Arc::new(AuditLog::new(shared.clone()));
        let engine = Arc::new(WorkflowEngine::new(store.clone(), audit.clone(), shared));
        Self {
            clock,
            store,
            audit,
            engine,
            views: SavedViewCatalog::with_defaults(),
        }
    }

    /// Store seeded with the seven demonstration claims and their history
    pub fn with_sample_data() -> Self {
        let harness = Self::empty();
        seed_demo_data(&harness.store, &harness.audit).expect("demo data is valid");
        harness
    }

    /// Number of audit entries that reference `claim_id`
    pub fn audit_count_for(&self, claim_id: ClaimId) -> usize {
        self.audit.query_by_related_id(claim_id).len()
    }
}
