//! Router configuration for the HTTP API.
//!
//! This module sets up all routes, middleware (CORS, compression, tracing),
//! and creates the axum router ready for serving.

use axum::{
    routing::{delete, get, post, put},
    Router,
};
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::handlers;
use super::state::AppState;

/// Create the main application router with all routes and middleware.
pub fn create_router(state: AppState) -> Router {
    // CORS configuration - permissive for development, should be restricted in production
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // Build the API router with versioned endpoints
    let api_v1 = Router::new()
        // Session lifecycle
        .route("/sessions", post(handlers::open_session))
        .route("/sessions/{session_id}", get(handlers::get_draft))
        .route("/sessions/{session_id}", delete(handlers::discard_session))
        // Wizard steps
        .route("/sessions/{session_id}/config", put(handlers::update_config))
        .route("/sessions/{session_id}/assigning", post(handlers::begin_assigning))
        .route(
            "/sessions/{session_id}/slots/{slot}/candidates",
            get(handlers::list_candidates),
        )
        .route("/sessions/{session_id}/assignments", post(handlers::assign_team))
        .route(
            "/sessions/{session_id}/slots/{slot}/{side}",
            delete(handlers::remove_team),
        )
        .route("/sessions/{session_id}/review", post(handlers::begin_review))
        .route("/sessions/{session_id}/back", post(handlers::back_to_assigning))
        .route("/sessions/{session_id}/validate", post(handlers::validate_draft))
        .route("/sessions/{session_id}/commit", post(handlers::commit));

    // Combine all routes
    Router::new()
        .route("/health", get(handlers::health_check))
        .nest("/v1", api_v1)
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
