//! Shared application state
//!
//! Built once at startup and read-only afterwards; every request runs the
//! pipeline independently.

use crate::config::Config;
use crate::pipeline::{Pipeline, PipelineConfig, PipelineError};
use std::sync::Arc;

/// Application state handed to every handler
#[derive(Debug)]
pub struct AppState {
    /// Effective pipeline configuration (served by `/api/config`)
    pub pipeline_config: PipelineConfig,
    /// The pipeline, holding the pooled HTTP client
    pub pipeline: Pipeline,
}

/// State type used by the router
pub type SharedState = Arc<AppState>;

impl AppState {
    /// Build state from a pipeline configuration
    ///
    /// # Errors
    /// * Returns `PipelineError::InvalidConfig` if the configuration is invalid.
    pub fn new(pipeline_config: PipelineConfig) -> Result<Self, PipelineError> {
        let pipeline = Pipeline::from_config(&pipeline_config)?;
        Ok(Self {
            pipeline_config,
            pipeline,
        })
    }

    /// Build shared state from the application configuration
    pub fn shared(config: &Config) -> Result<SharedState, PipelineError> {
        Ok(Arc::new(Self::new(config.pipeline.clone())?))
    }
}
