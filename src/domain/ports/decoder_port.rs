//! Port for decoding image bytes.

use image::DynamicImage;

use crate::domain::errors::DecodeError;

/// Port for the image decoder.
///
/// Decoding is CPU-bound; callers run it on a blocking thread.
pub trait ImageDecoderPort: Send + Sync {
    /// Decodes bytes into an image.
    fn decode(&self, bytes: &[u8]) -> Result<DynamicImage, DecodeError>;
}
