//! Health and configuration endpoints

use crate::pipeline::PipelineConfig;
use crate::state::SharedState;
use axum::{extract::State, Json};
use serde::Serialize;

#[allow(missing_docs)]
#[derive(Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub message: String,
}

/// GET /api/health
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        message: "RAG pipeline is healthy".to_string(),
    })
}

/// GET /api/config - Effective pipeline configuration
pub async fn get_config(State(state): State<SharedState>) -> Json<PipelineConfig> {
    Json(state.pipeline_config.clone())
}
