//! Core Kernel - Foundational types for the claims lifecycle system
//!
//! This crate provides the building blocks shared by every domain crate:
//! - Prefixed sequence identifiers for claims and audit entries
//! - An injectable clock so SLA evaluation and date stamping are testable

pub mod temporal;
pub mod identifiers;

pub use temporal::{Clock, SharedClock, SystemClock, ManualClock, TemporalError};
pub use identifiers::{ClaimId, AuditEntryId, UserId, SavedViewId, IdentifierError};
