//! Login and identity handlers

use axum::{extract::State, Extension, Json};
use tracing::info;

use domain_access::Actor;

use crate::auth::create_token;
use crate::dto::auth::{LoginRequest, LoginResponse, MeResponse};
use crate::dto::validated;
use crate::{error::ApiError, AppState};

/// Exchanges a directory email for a bearer token
pub async fn login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, ApiError> {
    let request = validated(request)?;
    let user = state.directory.find_by_email(&request.email)?.clone();
    let token = create_token(&user, &state.config.jwt_secret, state.config.jwt_expiration_secs)?;

    info!(user_id = %user.id, role = %user.role, "User logged in");
    Ok(Json(LoginResponse {
        token,
        token_type: "Bearer",
        expires_in: state.config.jwt_expiration_secs,
        user,
    }))
}

/// The authenticated user and the permissions of their role
pub async fn me(
    State(state): State<AppState>,
    Extension(actor): Extension<Actor>,
) -> Result<Json<MeResponse>, ApiError> {
    let user = actor.user().cloned().ok_or(ApiError::Unauthorized)?;
    let permissions = state.engine.permissions().permissions_for(user.role).to_vec();
    Ok(Json(MeResponse { user, permissions }))
}
