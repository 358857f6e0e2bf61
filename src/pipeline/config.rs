//! Pipeline configuration
//!
//! Endpoints and request parameters for the three remote services.

use super::PipelineError;
use serde::Serialize;

/// Default number of documents requested from the retrieval service
pub const DEFAULT_TOP_K: u32 = 3;

/// Default generation length passed to the text service
pub const DEFAULT_MAX_LENGTH: u32 = 200;

/// Pipeline configuration
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct PipelineConfig {
    /// Document retrieval endpoint
    pub retrieval_endpoint: String,
    /// Text generation endpoint
    pub generation_endpoint: String,
    /// Image generation endpoint
    pub image_endpoint: String,
    /// Number of documents to retrieve
    pub top_k: u32,
    /// Maximum length of the generated answer
    pub max_length: u32,
    /// Per-request timeout in seconds; `None` leaves the transport default
    pub request_timeout_secs: Option<u64>,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            retrieval_endpoint: "https://api.groq.com/vector-search".to_string(),
            generation_endpoint: "https://api.groq.com/text-gen".to_string(),
            image_endpoint: "https://api.groq.com/image-gen".to_string(),
            top_k: DEFAULT_TOP_K,
            max_length: DEFAULT_MAX_LENGTH,
            request_timeout_secs: None,
        }
    }
}

impl PipelineConfig {
    /// Point all three services at one base URL (`{base}/retrieve`, `{base}/generate`,
    /// `{base}/image`). Mostly useful for mock servers.
    pub fn with_base_url(base_url: &str) -> Self {
        let base = base_url.trim_end_matches('/');
        Self {
            retrieval_endpoint: format!("{}/retrieve", base),
            generation_endpoint: format!("{}/generate", base),
            image_endpoint: format!("{}/image", base),
            ..Self::default()
        }
    }

    /// Override the retrieval endpoint
    pub fn retrieval_endpoint(mut self, url: impl Into<String>) -> Self {
        self.retrieval_endpoint = url.into();
        self
    }

    /// Override the text generation endpoint
    pub fn generation_endpoint(mut self, url: impl Into<String>) -> Self {
        self.generation_endpoint = url.into();
        self
    }

    /// Override the image generation endpoint
    pub fn image_endpoint(mut self, url: impl Into<String>) -> Self {
        self.image_endpoint = url.into();
        self
    }

    /// Override the number of retrieved documents
    pub fn top_k(mut self, top_k: u32) -> Self {
        self.top_k = top_k;
        self
    }

    /// Override the generation length
    pub fn max_length(mut self, max_length: u32) -> Self {
        self.max_length = max_length;
        self
    }

    /// Check the configuration before the service starts
    ///
    /// # Errors
    /// * Returns `PipelineError::InvalidConfig` for an empty endpoint or a zero
    ///   `top_k`/`max_length`.
    pub fn validate(&self) -> Result<(), PipelineError> {
        let endpoints = [
            ("retrieval_endpoint", &self.retrieval_endpoint),
            ("generation_endpoint", &self.generation_endpoint),
            ("image_endpoint", &self.image_endpoint),
        ];
        for (name, url) in endpoints {
            if url.trim().is_empty() {
                return Err(PipelineError::InvalidConfig(format!("{} cannot be empty", name)));
            }
        }
        if self.top_k == 0 {
            return Err(PipelineError::InvalidConfig("top_k must be > 0".to_string()));
        }
        if self.max_length == 0 {
            return Err(PipelineError::InvalidConfig(
                "max_length must be > 0".to_string(),
            ));
        }
        Ok(())
    }
}
