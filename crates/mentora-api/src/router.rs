//! Application router builder.
//!
//! One function builds the full route table and middleware stack so the
//! production binary and any test harness serve the exact same app.

use std::time::Duration;

use axum::http::header::{AUTHORIZATION, CONTENT_TYPE};
use axum::http::Method;
use axum::routing::{delete, get, post};
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

use crate::config::ServerConfig;
use crate::handlers;
use crate::state::AppState;

/// Build the full application [`Router`] with all middleware layers.
pub fn build_router(state: AppState, config: &ServerConfig) -> Router {
    let cors = build_cors_layer(config);

    Router::new()
        // Health check at root level (not under /api).
        .merge(handlers::health::router())
        // Auth.
        .route("/api/auth/register", post(handlers::auth::register))
        .route("/api/auth/login", post(handlers::auth::login))
        // Public catalog.
        .route("/api/lessons", get(handlers::lessons::list_lessons))
        .route("/api/lessons/{id}", get(handlers::lessons::get_lesson))
        .route("/api/models", get(handlers::models::list_models))
        .route("/api/models/{id}", get(handlers::models::get_model))
        .route("/api/tutorials", get(handlers::tutorials::list_tutorials))
        .route("/api/tutorials/{id}", get(handlers::tutorials::get_tutorial))
        // Generative-AI proxy.
        .route("/api/gemini", post(handlers::generate::generate))
        // Authenticated user data.
        .route("/api/progress", get(handlers::progress::get_progress))
        .route(
            "/api/progress/lesson/{lesson_id}",
            post(handlers::progress::record_completion),
        )
        .route(
            "/api/prompts",
            get(handlers::prompts::list_prompts).post(handlers::prompts::save_prompt),
        )
        .route("/api/prompts/{id}", delete(handlers::prompts::delete_prompt))
        .route(
            "/api/notes/{lesson_id}",
            get(handlers::notes::get_note).post(handlers::notes::put_note),
        )
        // Bulk import.
        .route("/api/import-data", post(handlers::import::import_data))
        // -- Middleware stack (applied bottom-up) --
        // Structured request/response tracing.
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        // CORS.
        .layer(cors)
        // Shared state.
        .with_state(state)
}

/// Build the CORS middleware layer from server configuration.
///
/// Panics at startup if any configured origin is invalid; misconfiguration
/// should fail fast.
fn build_cors_layer(config: &ServerConfig) -> CorsLayer {
    let origins: Vec<_> = config
        .cors_origins
        .iter()
        .map(|o| {
            o.parse()
                .unwrap_or_else(|e| panic!("Invalid CORS origin '{o}': {e}"))
        })
        .collect();

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([Method::GET, Method::POST, Method::DELETE])
        .allow_headers([CONTENT_TYPE, AUTHORIZATION])
        .max_age(Duration::from_secs(3600))
}
