//! Remote service clients
//!
//! The three capabilities the pipeline depends on, behind one trait so the
//! orchestrator can be exercised without a network.

use super::config::PipelineConfig;
use super::types::{
    GenerationRequest, GenerationResponse, ImageRequest, RetrievalRequest, RetrievalResponse,
    RetrievedDocument,
};
use super::PipelineError;
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::time::Duration;

/// The remote capabilities used by a pipeline run
#[async_trait]
pub trait PipelineServices: Send + Sync {
    /// Retrieve up to `top_k` documents for `query`
    async fn retrieve(
        &self,
        query: &str,
        top_k: u32,
    ) -> Result<Vec<RetrievedDocument>, PipelineError>;

    /// Generate an answer for `prompt` grounded on `context`
    async fn generate_text(
        &self,
        prompt: &str,
        context: &str,
        max_length: u32,
    ) -> Result<String, PipelineError>;

    /// Generate an image for `prompt`, returning the raw response body
    async fn generate_image(&self, prompt: &str) -> Result<Vec<u8>, PipelineError>;
}

/// HTTP implementation of [`PipelineServices`]
///
/// Holds a single `reqwest::Client` so connections are pooled across runs.
#[derive(Debug, Clone)]
pub struct HttpServices {
    client: reqwest::Client,
    retrieval_endpoint: String,
    generation_endpoint: String,
    image_endpoint: String,
}

impl HttpServices {
    /// Build a client for the endpoints in `config`
    ///
    /// # Errors
    /// * Returns `PipelineError::InvalidConfig` if the HTTP client cannot be built.
    pub fn new(config: &PipelineConfig) -> Result<Self, PipelineError> {
        let mut builder = reqwest::Client::builder();
        if let Some(secs) = config.request_timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let client = builder.build().map_err(|e| {
            PipelineError::InvalidConfig(format!("Failed to build HTTP client: {}", e))
        })?;
        Ok(Self::with_client(client, config))
    }

    /// Use an existing client for the endpoints in `config`
    pub fn with_client(client: reqwest::Client, config: &PipelineConfig) -> Self {
        Self {
            client,
            retrieval_endpoint: config.retrieval_endpoint.clone(),
            generation_endpoint: config.generation_endpoint.clone(),
            image_endpoint: config.image_endpoint.clone(),
        }
    }

    /// POST `body` as JSON and return the response if its status is a success.
    ///
    /// `fail` builds the step-specific error.
    async fn post<B: Serialize + ?Sized>(
        &self,
        url: &str,
        body: &B,
        service: &str,
        fail: fn(String) -> PipelineError,
    ) -> Result<reqwest::Response, PipelineError> {
        let response = self
            .client
            .post(url)
            .json(body)
            .send()
            .await
            .map_err(|e| fail(format!("Failed to send HTTP request to {}: {}", service, e)))?;

        let status = response.status();
        if !status.is_success() {
            let status_code = status.as_u16();
            let error_body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unable to read error body".to_string());

            tracing::error!(
                service = service,
                status_code = status_code,
                error_body = %error_body,
                "Remote service returned error status"
            );

            return Err(fail(format!(
                "{} returned error status {}: {}",
                service, status_code, error_body
            )));
        }

        Ok(response)
    }

    /// Read a response body and parse it as JSON
    async fn parse_json<T: DeserializeOwned>(
        response: reqwest::Response,
        service: &str,
        fail: fn(String) -> PipelineError,
    ) -> Result<T, PipelineError> {
        let body = response.text().await.map_err(|e| {
            fail(format!("Failed to read response body from {}: {}", service, e))
        })?;

        serde_json::from_str(&body).map_err(|e| {
            fail(format!(
                "Failed to parse JSON response from {}: {} - Response body: {}",
                service, e, body
            ))
        })
    }
}

#[async_trait]
impl PipelineServices for HttpServices {
    async fn retrieve(
        &self,
        query: &str,
        top_k: u32,
    ) -> Result<Vec<RetrievedDocument>, PipelineError> {
        let request = RetrievalRequest {
            query: query.to_string(),
            top_k,
        };

        tracing::debug!(
            url = %self.retrieval_endpoint,
            top_k = top_k,
            query_len = query.len(),
            "Calling retrieval service"
        );

        let response = self
            .post(
                &self.retrieval_endpoint,
                &request,
                "retrieval service",
                PipelineError::Retrieval,
            )
            .await?;
        let parsed: RetrievalResponse =
            Self::parse_json(response, "retrieval service", PipelineError::Retrieval).await?;

        Ok(parsed.documents)
    }

    async fn generate_text(
        &self,
        prompt: &str,
        context: &str,
        max_length: u32,
    ) -> Result<String, PipelineError> {
        let request = GenerationRequest {
            prompt: prompt.to_string(),
            context: context.to_string(),
            max_length,
        };

        tracing::debug!(
            url = %self.generation_endpoint,
            prompt_len = prompt.len(),
            context_len = context.len(),
            max_length = max_length,
            "Calling text generation service"
        );

        let response = self
            .post(
                &self.generation_endpoint,
                &request,
                "text generation service",
                PipelineError::Generation,
            )
            .await?;
        let parsed: GenerationResponse =
            Self::parse_json(response, "text generation service", PipelineError::Generation)
                .await?;

        if parsed.text.is_none() {
            tracing::warn!("Text generation response has no text field, using fallback");
        }

        Ok(parsed.into_answer())
    }

    async fn generate_image(&self, prompt: &str) -> Result<Vec<u8>, PipelineError> {
        let request = ImageRequest {
            prompt: prompt.to_string(),
        };

        tracing::debug!(
            url = %self.image_endpoint,
            prompt_len = prompt.len(),
            "Calling image generation service"
        );

        let response = self
            .post(
                &self.image_endpoint,
                &request,
                "image generation service",
                PipelineError::Generation,
            )
            .await?;

        let bytes = response.bytes().await.map_err(|e| {
            PipelineError::Generation(format!(
                "Failed to read response body from image generation service: {}",
                e
            ))
        })?;

        Ok(bytes.to_vec())
    }
}
