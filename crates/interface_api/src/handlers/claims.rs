//! Claims handlers

use axum::{
    extract::{Path, Query, State},
    http::{header, StatusCode},
    response::IntoResponse,
    Extension, Json,
};

use core_kernel::ClaimId;
use domain_access::{Actor, Permission};
use domain_audit::AuditLogEntry;
use domain_claims::{search_suggestions, summarize, ClaimPatch, ClaimSummary, SearchSuggestion};
use domain_claims::filter::DEFAULT_SUGGESTION_LIMIT;

use crate::dto::claims::*;
use crate::dto::validated;
use crate::{error::ApiError, AppState};

fn parse_claim_id(raw: &str) -> Result<ClaimId, ApiError> {
    raw.parse()
        .map_err(|_| ApiError::NotFound(format!("Claim not found: {raw}")))
}

fn respond(state: &AppState, claim: domain_claims::Claim) -> Json<ClaimResponse> {
    Json(ClaimResponse::new(claim, state.engine.clock().today()))
}

/// Lists the claims visible under the given search, filters and saved view
pub async fn list_claims(
    State(state): State<AppState>,
    Extension(actor): Extension<Actor>,
    Query(params): Query<ListClaimsParams>,
) -> Result<Json<Vec<ClaimResponse>>, ApiError> {
    state.engine.permissions().require(&actor, Permission::ViewClaims)?;
    let today = state.engine.clock().today();
    let claims = params
        .into_query()
        .run(state.engine.store(), &state.views)
        .into_iter()
        .map(|claim| ClaimResponse::new(claim, today))
        .collect();
    Ok(Json(claims))
}

/// Submits a new claim
pub async fn submit_claim(
    State(state): State<AppState>,
    Extension(actor): Extension<Actor>,
    Json(request): Json<SubmitClaimRequest>,
) -> Result<(StatusCode, Json<ClaimResponse>), ApiError> {
    let request = validated(request)?;
    let claim = state.engine.submit(&actor, request.into())?;
    Ok((StatusCode::CREATED, respond(&state, claim)))
}

/// Claim counts per status
pub async fn claim_summary(
    State(state): State<AppState>,
    Extension(actor): Extension<Actor>,
) -> Result<Json<ClaimSummary>, ApiError> {
    state.engine.permissions().require(&actor, Permission::ViewClaims)?;
    Ok(Json(summarize(&state.engine.store().list())))
}

/// Quick-search suggestions
pub async fn claim_suggestions(
    State(state): State<AppState>,
    Extension(actor): Extension<Actor>,
    Query(params): Query<SuggestionParams>,
) -> Result<Json<Vec<SearchSuggestion>>, ApiError> {
    state.engine.permissions().require(&actor, Permission::ViewClaims)?;
    let limit = params.limit.unwrap_or(DEFAULT_SUGGESTION_LIMIT);
    Ok(Json(search_suggestions(&state.engine.store().list(), &params.q, limit)))
}

/// Downloads the visible claims as a JSON document
pub async fn export_claims(
    State(state): State<AppState>,
    Extension(actor): Extension<Actor>,
    Query(params): Query<ListClaimsParams>,
) -> Result<impl IntoResponse, ApiError> {
    state.engine.permissions().require(&actor, Permission::ExportData)?;
    let today = state.engine.clock().today();
    let claims: Vec<ClaimResponse> = params
        .into_query()
        .run(state.engine.store(), &state.views)
        .into_iter()
        .map(|claim| ClaimResponse::new(claim, today))
        .collect();

    let export = ClaimExport {
        generated_on: today,
        count: claims.len(),
        claims,
    };
    let disposition = format!("attachment; filename=\"claims_export_{today}.json\"");
    Ok(([(header::CONTENT_DISPOSITION, disposition)], Json(export)))
}

/// Gets a claim by ID
pub async fn get_claim(
    State(state): State<AppState>,
    Extension(actor): Extension<Actor>,
    Path(id): Path<String>,
) -> Result<Json<ClaimResponse>, ApiError> {
    state.engine.permissions().require(&actor, Permission::ViewClaims)?;
    let claim = state.engine.store().get(parse_claim_id(&id)?)?;
    Ok(respond(&state, claim))
}

/// Edits a claim's non-workflow fields
pub async fn edit_claim(
    State(state): State<AppState>,
    Extension(actor): Extension<Actor>,
    Path(id): Path<String>,
    Json(patch): Json<ClaimPatch>,
) -> Result<Json<ClaimResponse>, ApiError> {
    let claim = state.engine.edit_fields(&actor, parse_claim_id(&id)?, patch)?;
    Ok(respond(&state, claim))
}

/// Records an approval or rejection
pub async fn record_decision(
    State(state): State<AppState>,
    Extension(actor): Extension<Actor>,
    Path(id): Path<String>,
    Json(request): Json<DecisionRequest>,
) -> Result<Json<ClaimResponse>, ApiError> {
    let request = validated(request)?;
    let claim = state.engine.transition_approval_outcome(
        &actor,
        parse_claim_id(&id)?,
        request.outcome,
        &request.notes,
    )?;
    Ok(respond(&state, claim))
}

/// Settles an approved claim
pub async fn settle_claim(
    State(state): State<AppState>,
    Extension(actor): Extension<Actor>,
    Path(id): Path<String>,
    Json(request): Json<SettlementRequest>,
) -> Result<Json<ClaimResponse>, ApiError> {
    let claim = state
        .engine
        .settle(&actor, parse_claim_id(&id)?, request.settlement_amount)?;
    Ok(respond(&state, claim))
}

/// Moves a claim through verification
pub async fn review_claim(
    State(state): State<AppState>,
    Extension(actor): Extension<Actor>,
    Path(id): Path<String>,
    Json(request): Json<ReviewRequest>,
) -> Result<Json<ClaimResponse>, ApiError> {
    let claim = state
        .engine
        .review_transition(&actor, parse_claim_id(&id)?, request.status)?;
    Ok(respond(&state, claim))
}

pub async fn add_note(
    State(state): State<AppState>,
    Extension(actor): Extension<Actor>,
    Path(id): Path<String>,
    Json(request): Json<NoteRequest>,
) -> Result<Json<ClaimResponse>, ApiError> {
    let request = validated(request)?;
    let claim = state
        .engine
        .add_verification_note(&actor, parse_claim_id(&id)?, &request.note)?;
    Ok(respond(&state, claim))
}

pub async fn attach_document(
    State(state): State<AppState>,
    Extension(actor): Extension<Actor>,
    Path(id): Path<String>,
    Json(request): Json<DocumentRequest>,
) -> Result<(StatusCode, Json<ClaimResponse>), ApiError> {
    let request = validated(request)?;
    let claim = state
        .engine
        .attach_document(&actor, parse_claim_id(&id)?, &request.name)?;
    Ok((StatusCode::CREATED, respond(&state, claim)))
}

/// Audit trail of one claim, oldest first
pub async fn claim_audit_trail(
    State(state): State<AppState>,
    Extension(actor): Extension<Actor>,
    Path(id): Path<String>,
) -> Result<Json<Vec<AuditLogEntry>>, ApiError> {
    state.engine.permissions().require(&actor, Permission::ViewAudit)?;
    let id = parse_claim_id(&id)?;
    state.engine.store().get(id)?;
    Ok(Json(state.engine.audit().query_by_related_id(id)))
}
