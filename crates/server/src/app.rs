//! Application router assembly.

use axum::{Json, Router, extract::State, routing::get};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use axum::http::{HeaderValue, Method, header};

use crate::config::ServerConfig;
use crate::routes;
use crate::state::AppState;

/// Build the full application router, with CORS and request tracing.
pub fn build(state: AppState) -> Router {
    let cors = cors_layer(state.config());
    Router::new()
        .route("/", get(health))
        .merge(routes::routes())
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// CORS for the demo frontend: the configured origin plus the common
/// localhost variants.
fn cors_layer(config: &ServerConfig) -> CorsLayer {
    let origins: Vec<HeaderValue> = [
        config.frontend_origin.as_str(),
        "http://localhost:3000",
        "http://127.0.0.1:3000",
    ]
    .iter()
    .filter_map(|origin| origin.parse().ok())
    .collect();

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::PATCH,
            Method::OPTIONS,
        ])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION])
        .allow_credentials(true)
}

/// Liveness health check endpoint.
async fn health(State(state): State<AppState>) -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "ok",
        "service": "driftline",
        "storage": state.store().mode().as_str(),
    }))
}
