//! HTTP API Layer
//!
//! This crate provides the REST API for the claims lifecycle engine using Axum.
//!
//! # Architecture
//!
//! - **Handlers**: Request handlers for claims, audit, saved views and login
//! - **Middleware**: Bearer authentication and request logging
//! - **DTOs**: Request/Response data transfer objects
//! - **Error Handling**: Consistent error responses
//!
//! # Example
//!
//! ```rust,ignore
//! use interface_api::{create_router, AppState};
//!
//! let state = AppState::in_memory(config, SystemClock::shared())?;
//! let app = create_router(state);
//! axum::serve(listener, app).await?;
//! ```

pub mod config;
pub mod error;
pub mod middleware;
pub mod handlers;
pub mod dto;
pub mod auth;

use std::sync::Arc;

use axum::{
    Router,
    routing::{get, post},
    middleware as axum_middleware,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::trace::TraceLayer;

use core_kernel::SharedClock;
use domain_access::UserDirectory;
use domain_audit::AuditLog;
use domain_claims::sample::seed_demo_data;
use domain_claims::{ClaimError, ClaimStore, SavedViewCatalog, WorkflowEngine};

use crate::config::ApiConfig;
use crate::handlers::{audit, claims, health, session, views};
use crate::middleware::{auth_middleware, request_log_middleware};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub engine: Arc<WorkflowEngine>,
    pub views: Arc<SavedViewCatalog>,
    pub directory: Arc<UserDirectory>,
    pub config: ApiConfig,
}

impl AppState {
    /// State around an existing engine, with the built-in views and users
    pub fn new(engine: Arc<WorkflowEngine>, config: ApiConfig) -> Self {
        Self {
            engine,
            views: Arc::new(SavedViewCatalog::with_defaults()),
            directory: Arc::new(UserDirectory::with_demo_users()),
            config,
        }
    }

    /// Builds a fresh in-memory store and audit log
    ///
    /// Loads the demonstration data when `config.seed_demo_data` is set.
    pub fn in_memory(config: ApiConfig, clock: SharedClock) -> Result<Self, ClaimError> {
        let store = Arc::new(ClaimStore::new());
        let audit = Arc::new(AuditLog::new(clock.clone()));
        if config.seed_demo_data {
            seed_demo_data(&store, &audit)?;
        }
        let engine = Arc::new(WorkflowEngine::new(store, audit, clock));
        Ok(Self::new(engine, config))
    }
}

/// Creates the main API router
///
/// # Arguments
///
/// * `state` - Engine, catalogs and configuration shared by all handlers
///
/// # Returns
///
/// Configured Axum router with all routes and middleware
pub fn create_router(state: AppState) -> Router {
    // Public routes (no auth required)
    let public_routes = Router::new()
        .route("/health", get(health::health_check))
        .route("/health/ready", get(health::readiness_check))
        .route("/auth/login", post(session::login));

    // Claims routes
    let claims_routes = Router::new()
        .route("/", get(claims::list_claims).post(claims::submit_claim))
        .route("/summary", get(claims::claim_summary))
        .route("/suggestions", get(claims::claim_suggestions))
        .route("/export", get(claims::export_claims))
        .route("/:id", get(claims::get_claim).patch(claims::edit_claim))
        .route("/:id/decision", post(claims::record_decision))
        .route("/:id/settlement", post(claims::settle_claim))
        .route("/:id/review", post(claims::review_claim))
        .route("/:id/notes", post(claims::add_note))
        .route("/:id/documents", post(claims::attach_document))
        .route("/:id/audit", get(claims::claim_audit_trail));

    // Protected API routes
    let api_routes = Router::new()
        .nest("/claims", claims_routes)
        .route("/audit", get(audit::list_audit_entries))
        .route("/views", get(views::list_views))
        .route("/me", get(session::me))
        .layer(axum_middleware::from_fn(request_log_middleware))
        .layer(axum_middleware::from_fn_with_state(state.clone(), auth_middleware));

    // Combine all routes
    Router::new()
        .merge(public_routes)
        .nest("/api/v1", api_routes)
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(TraceLayer::new_for_http())
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}
