//! Claims Lifecycle Domain
//!
//! This crate implements the claim lifecycle engine: the status state
//! machine, the four-stage workflow with live SLA evaluation, the claim
//! store with per-claim serialization, read-side filtering and saved views,
//! and the scheduler that advances claims automatically.
//!
//! # Claim Lifecycle
//!
//! ```text
//! SUBMITTED -> PENDING_VERIFICATION -> UNDER_REVIEW -> PENDING_APPROVAL
//!                        \_________________________/        |
//!                                                  APPROVED / REJECTED
//!                                                      |
//!                                                   SETTLED
//! ```
//!
//! REJECTED and SETTLED are terminal.

pub mod claim;
pub mod workflow;
pub mod store;
pub mod engine;
pub mod filter;
pub mod saved_view;
pub mod scheduler;
pub mod sample;
pub mod error;

pub use claim::{Claim, ClaimStatus, ApprovalOutcome, NewClaim, ClaimPatch};
pub use workflow::{Workflow, WorkflowStage, StageName, StageStatus, StageView};
pub use store::ClaimStore;
pub use engine::WorkflowEngine;
pub use filter::{visible_claims, search_suggestions, summarize, FieldFilters, ClaimQuery, ClaimSummary, SearchSuggestion};
pub use saved_view::{SavedView, SavedViewCatalog, SavedViewCriteria};
pub use scheduler::{LifecycleScheduler, SchedulerConfig, SchedulerHandle, TickReport};
pub use error::ClaimError;
