//! Pipeline orchestrator
//!
//! Runs retrieve -> generate text -> generate image for one prompt. The
//! three calls are awaited one after another; a failure at any step ends
//! the run with no partial output.

use super::config::PipelineConfig;
use super::context::build_context;
use super::error::EMPTY_PROMPT_MESSAGE;
use super::image::GeneratedImage;
use super::services::{HttpServices, PipelineServices};
use super::PipelineError;
use serde::Serialize;
use std::time::Instant;

/// Step a run is about to start
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PipelineStage {
    /// Calling the retrieval service
    Retrieving,
    /// Calling the text generation service
    GeneratingText,
    /// Calling the image generation service
    GeneratingImage,
}

impl PipelineStage {
    /// Progress message shown to the user while the stage runs
    pub fn message(&self) -> &'static str {
        match self {
            PipelineStage::Retrieving => "Retrieving relevant documents...",
            PipelineStage::GeneratingText => "Generating text response...",
            PipelineStage::GeneratingImage => "Generating relevant images...",
        }
    }
}

/// Result of a successful run
#[derive(Debug, Clone)]
pub struct PipelineOutput {
    /// Text answer from the generation service
    pub answer: String,
    /// Decoded image from the image service
    pub image: GeneratedImage,
}

/// Three-stage pipeline bound to one set of services
#[derive(Debug)]
pub struct Pipeline<S = HttpServices> {
    services: S,
    top_k: u32,
    max_length: u32,
}

impl Pipeline<HttpServices> {
    /// Build a pipeline talking HTTP to the endpoints in `config`
    ///
    /// # Errors
    /// * Returns `PipelineError::InvalidConfig` if the config fails validation
    ///   or the HTTP client cannot be built.
    pub fn from_config(config: &PipelineConfig) -> Result<Self, PipelineError> {
        config.validate()?;
        let services = HttpServices::new(config)?;
        Ok(Self::new(services, config))
    }
}

impl<S: PipelineServices> Pipeline<S> {
    /// Create a pipeline over arbitrary services
    pub fn new(services: S, config: &PipelineConfig) -> Self {
        Self {
            services,
            top_k: config.top_k,
            max_length: config.max_length,
        }
    }

    /// The underlying services
    pub fn services(&self) -> &S {
        &self.services
    }

    /// Run the pipeline for `prompt`
    ///
    /// # Errors
    /// * `PipelineError::Validation` for an empty or whitespace-only prompt;
    ///   no service is called.
    /// * `PipelineError::Retrieval`, `PipelineError::Generation` or
    ///   `PipelineError::ImageDecode` from the failing step.
    pub async fn run(&self, prompt: &str) -> Result<PipelineOutput, PipelineError> {
        self.run_with_progress(prompt, &|_| {}).await
    }

    /// Run the pipeline, calling `progress` right before each remote step
    ///
    /// `progress` is never called for a prompt that fails validation.
    pub async fn run_with_progress(
        &self,
        prompt: &str,
        progress: &(dyn Fn(PipelineStage) + Send + Sync),
    ) -> Result<PipelineOutput, PipelineError> {
        validate_prompt(prompt)?;
        let start = Instant::now();

        progress(PipelineStage::Retrieving);
        let documents = self.services.retrieve(prompt, self.top_k).await?;
        tracing::debug!(documents = documents.len(), "Retrieved documents");

        let context = build_context(&documents);

        progress(PipelineStage::GeneratingText);
        let answer = self
            .services
            .generate_text(prompt, &context, self.max_length)
            .await?;
        tracing::debug!(answer_len = answer.len(), "Generated text answer");

        progress(PipelineStage::GeneratingImage);
        let bytes = self.services.generate_image(prompt).await?;
        let image = tokio::task::spawn_blocking(move || GeneratedImage::decode(&bytes))
            .await
            .map_err(|e| PipelineError::ImageDecode(format!("Decode task failed: {}", e)))??;
        tracing::debug!(format = ?image.source_format(), "Decoded generated image");

        tracing::info!(
            documents = documents.len(),
            context_len = context.len(),
            answer_len = answer.len(),
            image_width = image.width(),
            image_height = image.height(),
            duration_ms = start.elapsed().as_millis(),
            "Pipeline run completed"
        );

        Ok(PipelineOutput { answer, image })
    }
}

/// Reject empty or whitespace-only prompts
pub fn validate_prompt(prompt: &str) -> Result<(), PipelineError> {
    if prompt.trim().is_empty() {
        return Err(PipelineError::Validation(EMPTY_PROMPT_MESSAGE.to_string()));
    }
    Ok(())
}
