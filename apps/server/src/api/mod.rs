//! API layer - routes, handlers, and middleware

pub mod handlers;
pub mod middleware;
pub mod routes;

use crate::state::AppState;
use axum::{
    extract::DefaultBodyLimit,
    http::StatusCode,
    response::{IntoResponse, Json},
    routing::{get, post},
    Router,
};
use serde_json::json;

/// Create the main application router
pub fn create_router(state: AppState) -> Router {
    let max_body_size = state.config.server.max_request_body_size;
    let cors_origins = state.config.server.cors_origins.clone();
    let auth_state = state.clone();

    // Bearer-gated surface: record CRUD plus the private-data example route.
    let protected = Router::new()
        .route("/private-data", get(handlers::token::private_data))
        .nest("/patient", routes::patient::patient_routes())
        .layer(axum::middleware::from_fn_with_state(
            auth_state,
            crate::auth::auth_middleware,
        ));

    Router::new()
        // Health check
        .route("/health", get(health_check))
        // Root endpoint
        .route("/", get(root))
        // Favicon handler (returns 204 to prevent 404 logs)
        .route("/favicon.ico", get(favicon))
        // Public endpoints
        .route("/token", post(handlers::token::issue_token))
        .route("/process_image", post(handlers::image::process_image))
        .route("/calculate_bmi", post(handlers::bmi::calculate_bmi))
        .merge(protected)
        // Add state
        .with_state(state)
        // Add middleware (applied in reverse order)
        .layer(axum::middleware::from_fn(
            middleware::security_headers_middleware,
        ))
        .layer(axum::middleware::from_fn(middleware::request_id_middleware))
        .layer(middleware::compression())
        .layer(middleware::cors(&cors_origins))
        .layer(middleware::trace())
        // Limit request body size to prevent DoS via large payloads
        .layer(DefaultBodyLimit::max(max_body_size))
}

async fn health_check() -> impl IntoResponse {
    Json(json!({
        "status": "ok",
        "service": "medrec-server"
    }))
}

async fn root() -> impl IntoResponse {
    let scopes: serde_json::Map<String, serde_json::Value> = crate::auth::KNOWN_SCOPES
        .iter()
        .map(|(scope, description)| (scope.to_string(), json!(description)))
        .collect();

    (
        StatusCode::OK,
        Json(json!({
            "server": "Patient Records Service (Rust)",
            "version": env!("CARGO_PKG_VERSION"),
            "status": "running",
            "scopes": scopes
        })),
    )
}

async fn favicon() -> impl IntoResponse {
    // Return 204 No Content to indicate no favicon is available
    StatusCode::NO_CONTENT
}
