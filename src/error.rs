//! Error types and error handling for the application
//!
//! This module defines the error type returned by HTTP handlers.
//! All errors implement `IntoResponse` to provide consistent error formatting.

use crate::pipeline::PipelineError;
use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::{json, Value};
use thiserror::Error;

/// Application-level error types
#[derive(Error, Debug)]
pub enum AppError {
    /// A pipeline run failed
    #[error(transparent)]
    Pipeline(#[from] PipelineError),

    /// Request body could not be read as the expected JSON
    #[error("Invalid request body: {0}")]
    InvalidRequest(String),

    /// Internal server error (catch-all for unexpected errors)
    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    /// HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::Pipeline(PipelineError::Validation(_)) | AppError::InvalidRequest(_) => {
                StatusCode::BAD_REQUEST
            }
            AppError::Pipeline(PipelineError::Retrieval(_))
            | AppError::Pipeline(PipelineError::Generation(_))
            | AppError::Pipeline(PipelineError::ImageDecode(_)) => StatusCode::BAD_GATEWAY,
            AppError::Pipeline(PipelineError::InvalidConfig(_)) | AppError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Short machine-readable name of the error kind
    pub fn kind(&self) -> &'static str {
        match self {
            AppError::Pipeline(e) => e.kind(),
            AppError::InvalidRequest(_) => "invalid_request",
            AppError::Internal(_) => "internal",
        }
    }

    /// JSON error body: `{"error", "kind", "status"}`
    pub fn to_json(&self) -> Value {
        json!({
            "error": self.to_string(),
            "kind": self.kind(),
            "status": self.status_code().as_u16(),
        })
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::InvalidRequest(rejection.body_text())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(kind = self.kind(), error = %self, "Request failed");
        } else {
            tracing::warn!(kind = self.kind(), error = %self, "Request rejected");
        }

        (status, Json(self.to_json())).into_response()
    }
}
