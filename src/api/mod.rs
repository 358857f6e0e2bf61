//! API module
//!
//! HTTP handlers and the router that wires them together.

pub mod generate;
pub mod middleware;
pub mod page;
pub mod streaming;
pub mod system;

use crate::state::SharedState;
use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

/// Build the application router
pub fn router(state: SharedState) -> Router {
    Router::new()
        .route("/", get(page::index))
        .route("/api/health", get(system::health_check))
        .route("/api/config", get(system::get_config))
        .route("/api/generate", post(generate::generate))
        .route("/api/generate/stream", post(streaming::generate_stream))
        // Middleware (order matters - request_id should be first)
        .layer(axum::middleware::from_fn(middleware::request_id_middleware))
        .layer(
            TraceLayer::new_for_http().make_span_with(|request: &axum::http::Request<_>| {
                tracing::info_span!(
                    "http_request",
                    method = %request.method(),
                    uri = %request.uri(),
                )
            }),
        )
        .layer(CorsLayer::permissive()) // Allow CORS for development
        .with_state(state)
}
