//! Application configuration
//!
//! Centralized configuration management with environment variable support
//! and sensible defaults.

use crate::pipeline::PipelineConfig;
use std::env;

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Server configuration
    pub server: ServerConfig,
    /// Remote service endpoints and request parameters
    pub pipeline: PipelineConfig,
}

/// Server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Port to bind the server to
    pub port: u16,
    /// Host address to bind to
    pub host: String,
}

impl Config {
    /// Load configuration from environment variables with defaults
    pub fn from_env() -> Self {
        let defaults = PipelineConfig::default();
        Self {
            server: ServerConfig {
                port: parse_var("PORT").unwrap_or(8080),
                host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            },
            pipeline: PipelineConfig {
                retrieval_endpoint: env::var("RETRIEVAL_URL")
                    .unwrap_or(defaults.retrieval_endpoint),
                generation_endpoint: env::var("GENERATION_URL")
                    .unwrap_or(defaults.generation_endpoint),
                image_endpoint: env::var("IMAGE_URL").unwrap_or(defaults.image_endpoint),
                top_k: parse_var("RETRIEVAL_TOP_K").unwrap_or(defaults.top_k),
                max_length: parse_var("GENERATION_MAX_LENGTH").unwrap_or(defaults.max_length),
                request_timeout_secs: parse_var("HTTP_TIMEOUT_SECS"),
            },
        }
    }

    /// Get the server address as a string
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

/// Read and parse an environment variable, ignoring unparseable values
fn parse_var<T: std::str::FromStr>(name: &str) -> Option<T> {
    env::var(name).ok().and_then(|v| v.trim().parse().ok())
}
