//! Pipeline module
//!
//! Retrieve documents, generate a text answer grounded on them, and generate
//! an image for the same prompt. Each step is a single call to a remote
//! service; this module only sequences the calls and shapes their payloads.

pub mod config;
pub mod context;
pub mod error;
pub mod image;
pub mod orchestrator;
pub mod services;
pub mod types;

pub use config::PipelineConfig;
pub use context::build_context;
pub use error::PipelineError;
pub use self::image::GeneratedImage;
pub use orchestrator::{validate_prompt, Pipeline, PipelineOutput, PipelineStage};
pub use services::{HttpServices, PipelineServices};
