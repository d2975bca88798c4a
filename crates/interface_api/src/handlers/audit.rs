//! Audit trail handlers

use axum::{
    extract::{Query, State},
    Extension, Json,
};

use domain_access::{Actor, Permission};
use domain_audit::AuditLogEntry;

use crate::dto::audit::AuditParams;
use crate::{error::ApiError, AppState};

/// Full audit trail in insertion order, or the newest `limit` entries
/// newest first
pub async fn list_audit_entries(
    State(state): State<AppState>,
    Extension(actor): Extension<Actor>,
    Query(params): Query<AuditParams>,
) -> Result<Json<Vec<AuditLogEntry>>, ApiError> {
    state.engine.permissions().require(&actor, Permission::ViewAudit)?;
    let audit = state.engine.audit();
    let entries = match params.limit {
        Some(limit) => audit.recent(limit),
        None => audit.entries(),
    };
    Ok(Json(entries))
}
