//! Test Utilities Crate
//!
//! Provides shared test infrastructure, fixtures, and helpers for the
//! claims lifecycle test suite.
//!
//! # Modules
//!
//! - `fixtures`: Pinned clock, demo actors, and a wired engine harness
//! - `builders`: Builder patterns for claim input construction
//! - `assertions`: Invariant and audit-trail assertion helpers
//! - `generators`: Property-based test data generators

pub mod fixtures;
pub mod builders;
pub mod assertions;
pub mod generators;

pub use fixtures::*;
pub use builders::*;
pub use assertions::*;
pub use generators::*;
