//! Pipeline error types
//!
//! Errors raised while validating a prompt or calling one of the remote services.

use thiserror::Error;

/// Warning shown when the prompt is empty
pub const EMPTY_PROMPT_MESSAGE: &str = "Please enter a prompt to generate a response.";

/// Errors that can occur during a pipeline run
///
/// Each remote step fails with its own variant; none of them are recovered
/// inside the pipeline.
#[derive(Error, Debug)]
pub enum PipelineError {
    /// Prompt was empty or whitespace-only; no request was sent
    #[error("{0}")]
    Validation(String),

    /// Document retrieval failed (transport, status or body)
    #[error("Retrieval failed: {0}")]
    Retrieval(String),

    /// Text or image generation failed (transport, status or body)
    #[error("Generation failed: {0}")]
    Generation(String),

    /// Image service returned bytes that are not a decodable image
    #[error("Image decode failed: {0}")]
    ImageDecode(String),

    /// Pipeline configuration is unusable
    #[error("Invalid pipeline configuration: {0}")]
    InvalidConfig(String),
}

impl PipelineError {
    /// Short machine-readable name of the error kind
    pub fn kind(&self) -> &'static str {
        match self {
            PipelineError::Validation(_) => "validation",
            PipelineError::Retrieval(_) => "retrieval",
            PipelineError::Generation(_) => "generation",
            PipelineError::ImageDecode(_) => "image_decode",
            PipelineError::InvalidConfig(_) => "config",
        }
    }
}

impl From<image::ImageError> for PipelineError {
    fn from(err: image::ImageError) -> Self {
        PipelineError::ImageDecode(err.to_string())
    }
}
