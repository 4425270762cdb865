//! Domain types for image resolution.

use std::sync::Arc;

use image::{DynamicImage, Rgba, RgbaImage};
use reqwest::Url;

/// Logical asset name of the image delivered when a fetch fails.
pub const PLACEHOLDER_ASSET: &str = "placeholder";

/// Cache key: the string form of a resource locator.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey(String);

impl CacheKey {
    /// Creates a key from any string-like input.
    #[must_use]
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    /// Returns the inner string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&Url> for CacheKey {
    fn from(url: &Url) -> Self {
        Self(url.as_str().to_owned())
    }
}

impl From<&str> for CacheKey {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl std::fmt::Display for CacheKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Where a delivered image came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageOrigin {
    /// Served from the in-memory cache without I/O.
    Cache,
    /// Fetched, validated and decoded from the network.
    Network,
    /// Fetch or decode failed; the placeholder asset was delivered.
    Placeholder,
}

impl std::fmt::Display for ImageOrigin {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Cache => write!(f, "cache"),
            Self::Network => write!(f, "network"),
            Self::Placeholder => write!(f, "placeholder"),
        }
    }
}

/// Image handed to a sink.
#[derive(Debug, Clone)]
pub struct ResolvedImage {
    /// The decoded image.
    pub image: Arc<DynamicImage>,
    /// Where it came from.
    pub origin: ImageOrigin,
}

impl ResolvedImage {
    /// Returns true if this is the fallback placeholder.
    #[must_use]
    pub const fn is_placeholder(&self) -> bool {
        matches!(self.origin, ImageOrigin::Placeholder)
    }

    /// Returns `(width, height)` of the image.
    #[must_use]
    pub fn dimensions(&self) -> (u32, u32) {
        (self.image.width(), self.image.height())
    }
}

/// Built-in placeholder used when no asset named [`PLACEHOLDER_ASSET`] exists.
#[must_use]
pub fn builtin_placeholder() -> Arc<DynamicImage> {
    let pixel = Rgba([0xC8, 0xC8, 0xC8, 0xFF]);
    Arc::new(DynamicImage::ImageRgba8(RgbaImage::from_pixel(1, 1, pixel)))
}

/// Returns true if a declared content type names an image.
///
/// Parameters after `;` are ignored and the comparison is case-insensitive.
#[must_use]
pub fn is_image_content_type(content_type: &str) -> bool {
    content_type
        .split(';')
        .next()
        .map(str::trim)
        .is_some_and(|mime| mime.to_ascii_lowercase().starts_with("image/"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cache_key_from_url() {
        let url = Url::parse("https://x/a.png").unwrap();
        let key = CacheKey::from(&url);
        assert_eq!(key.as_str(), "https://x/a.png");
    }

    #[test]
    fn test_same_string_form_same_key() {
        let a = Url::parse("HTTPS://X/a.png").unwrap();
        let b = Url::parse("https://x/a.png").unwrap();
        assert_eq!(CacheKey::from(&a), CacheKey::from(&b));
    }

    #[test]
    fn test_content_type_detection() {
        assert!(is_image_content_type("image/png"));
        assert!(is_image_content_type("Image/JPEG; charset=binary"));
        assert!(!is_image_content_type("text/html; charset=utf-8"));
        assert!(!is_image_content_type("application/octet-stream"));
        assert!(!is_image_content_type(""));
    }

    #[test]
    fn test_builtin_placeholder_is_one_pixel() {
        let img = builtin_placeholder();
        assert_eq!((img.width(), img.height()), (1, 1));
    }
}
