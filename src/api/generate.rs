//! Generate API
//!
//! `POST /api/generate` runs the pipeline once for the submitted prompt and
//! returns the answer together with the image, or an error and nothing else.

use crate::error::AppError;
use crate::pipeline::image::IMAGE_CAPTION;
use crate::pipeline::{GeneratedImage, PipelineOutput};
use crate::state::SharedState;
use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use serde::{Deserialize, Serialize};

/// Generate request
#[derive(Deserialize, Debug)]
pub struct GenerateRequest {
    /// The user prompt
    #[serde(default)]
    pub prompt: String,
}

/// Generated image as sent to the browser
#[derive(Serialize, Debug)]
pub struct ImagePayload {
    /// PNG re-encoding of the image as a data URL
    pub data_url: String,
    /// MIME type of `data_url`
    pub mime_type: &'static str,
    /// Width in pixels
    pub width: u32,
    /// Height in pixels
    pub height: u32,
    /// Fixed caption
    pub caption: &'static str,
}

impl ImagePayload {
    fn from_image(image: &GeneratedImage) -> Result<Self, AppError> {
        Ok(Self {
            data_url: image.to_png_data_url()?,
            mime_type: "image/png",
            width: image.width(),
            height: image.height(),
            caption: IMAGE_CAPTION,
        })
    }
}

/// Generate response
#[derive(Serialize, Debug)]
pub struct GenerateResponse {
    /// Text answer
    pub answer: String,
    /// Generated image
    pub image: ImagePayload,
}

impl GenerateResponse {
    /// Shape a pipeline result for the browser
    pub fn from_output(output: PipelineOutput) -> Result<Self, AppError> {
        let image = ImagePayload::from_image(&output.image)?;
        Ok(Self {
            answer: output.answer,
            image,
        })
    }
}

/// POST /api/generate - Run the pipeline for one prompt
///
/// # Returns
/// * `Ok(Json<GenerateResponse>)` - Answer and image
/// * `Err(AppError)` - 400 for an empty prompt or malformed body, 502 when a
///   remote step fails
pub async fn generate(
    State(state): State<SharedState>,
    payload: Result<Json<GenerateRequest>, JsonRejection>,
) -> Result<Json<GenerateResponse>, AppError> {
    let Json(request) = payload?;
    tracing::info!(prompt_len = request.prompt.len(), "Generate request received");

    let output = state.pipeline.run(&request.prompt).await?;
    let response = GenerateResponse::from_output(output)?;

    Ok(Json(response))
}
