//! Access Control Domain
//!
//! This crate answers one question for the rest of the system: may this actor
//! perform this action? Roles map to fixed permission sets and every mutating
//! claim operation asks [`PermissionService::require`] before touching state.
//!
//! # Roles
//!
//! ```text
//! Policyholder    -> submit claims, upload documents
//! Claims Officer  -> review, approve/reject, edit fields, audit, export
//! Finance Team    -> settle, audit, export
//! Admin           -> everything except review and upload
//! ```

pub mod role;
pub mod user;
pub mod directory;
pub mod service;
pub mod error;

pub use role::{Role, Permission};
pub use user::{User, Actor};
pub use directory::UserDirectory;
pub use service::PermissionService;
pub use error::AccessError;
