//! Image decoder adapter backed by the `image` crate.

use image::DynamicImage;

use crate::domain::errors::DecodeError;
use crate::domain::ports::ImageDecoderPort;

/// Decodes PNG, JPEG and WebP bytes, guessing the format from the content.
#[derive(Debug, Clone, Copy, Default)]
pub struct ImageCrateDecoder;

impl ImageDecoderPort for ImageCrateDecoder {
    fn decode(&self, bytes: &[u8]) -> Result<DynamicImage, DecodeError> {
        if bytes.is_empty() {
            return Err(DecodeError::new("empty body"));
        }
        image::load_from_memory(bytes)
            .map_err(|e| DecodeError::new(format!("Failed to decode image: {e}")))
    }
}
