//! Generated image handling
//!
//! Decodes the raw image service body and re-encodes it for display.

use super::PipelineError;
use base64::{engine::general_purpose::STANDARD as BASE64_STANDARD, Engine};
use image::{DynamicImage, ImageFormat};
use std::io::Cursor;

/// Caption shown under every generated image
pub const IMAGE_CAPTION: &str = "Generated Visual";

/// A decoded image returned by the image service
#[derive(Debug, Clone)]
pub struct GeneratedImage {
    image: DynamicImage,
    source_format: ImageFormat,
}

impl GeneratedImage {
    /// Decode raw image bytes
    ///
    /// # Errors
    /// * Returns `PipelineError::ImageDecode` if the format is unknown or the
    ///   data is corrupt.
    pub fn decode(bytes: &[u8]) -> Result<Self, PipelineError> {
        if bytes.is_empty() {
            return Err(PipelineError::ImageDecode(
                "image service returned an empty body".to_string(),
            ));
        }
        let source_format = image::guess_format(bytes)?;
        let image = image::load_from_memory_with_format(bytes, source_format)?;
        Ok(Self {
            image,
            source_format,
        })
    }

    /// Width in pixels
    pub fn width(&self) -> u32 {
        self.image.width()
    }

    /// Height in pixels
    pub fn height(&self) -> u32 {
        self.image.height()
    }

    /// Format the service sent the image in
    pub fn source_format(&self) -> ImageFormat {
        self.source_format
    }

    /// Encode the image as PNG
    ///
    /// # Errors
    /// * Returns `PipelineError::ImageDecode` if the pixel layout cannot be
    ///   written as PNG.
    pub fn to_png(&self) -> Result<Vec<u8>, PipelineError> {
        let mut buffer = Cursor::new(Vec::new());
        self.image.write_to(&mut buffer, ImageFormat::Png)?;
        Ok(buffer.into_inner())
    }

    /// Encode the image as a `data:image/png;base64,...` URL for an `<img>` tag
    pub fn to_png_data_url(&self) -> Result<String, PipelineError> {
        let png = self.to_png()?;
        Ok(format!("data:image/png;base64,{}", BASE64_STANDARD.encode(png)))
    }
}
