//! Saved view handlers

use axum::{extract::State, Extension, Json};

use domain_access::{Actor, Permission};
use domain_claims::SavedView;

use crate::{error::ApiError, AppState};

pub async fn list_views(
    State(state): State<AppState>,
    Extension(actor): Extension<Actor>,
) -> Result<Json<Vec<SavedView>>, ApiError> {
    state.engine.permissions().require(&actor, Permission::ViewClaims)?;
    Ok(Json(state.views.views().to_vec()))
}
