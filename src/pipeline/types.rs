//! Remote service request/response types
//!
//! Structs that mirror the JSON bodies exchanged with the retrieval,
//! generation and image services.

use serde::{Deserialize, Serialize};

/// Answer used when the generation service omits its `text` field
pub const FALLBACK_ANSWER: &str = "No response";

/// Request body for the retrieval service
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct RetrievalRequest {
    /// The user prompt, used verbatim as the search query
    pub query: String,
    /// Number of documents to return
    pub top_k: u32,
}

/// Response body of the retrieval service
#[derive(Deserialize, Debug, Default)]
pub struct RetrievalResponse {
    /// Retrieved documents, in service order
    #[serde(default)]
    pub documents: Vec<RetrievedDocument>,
}

/// A single retrieved document
///
/// Only `content` is used; any other fields the service sends are kept
/// but never interpreted.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct RetrievedDocument {
    /// Document text
    pub content: String,
    /// Remaining fields (ids, scores, metadata)
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl RetrievedDocument {
    /// Create a document with only a `content` field
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            extra: serde_json::Map::new(),
        }
    }
}

/// Request body for the text generation service
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct GenerationRequest {
    /// The user prompt
    pub prompt: String,
    /// Context built from the retrieved documents (may be empty)
    pub context: String,
    /// Maximum answer length
    pub max_length: u32,
}

/// Response body of the text generation service
#[derive(Deserialize, Debug, Default)]
pub struct GenerationResponse {
    /// Generated text, if the service returned one
    #[serde(default)]
    pub text: Option<String>,
}

impl GenerationResponse {
    /// The generated text, or [`FALLBACK_ANSWER`] when the field is absent
    pub fn into_answer(self) -> String {
        self.text.unwrap_or_else(|| FALLBACK_ANSWER.to_string())
    }
}

/// Request body for the image generation service
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct ImageRequest {
    /// The user prompt; retrieved context is never sent here
    pub prompt: String,
}
