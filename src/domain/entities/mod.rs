//! Domain entities.

mod image;

pub use self::image::{
    CacheKey, ImageOrigin, PLACEHOLDER_ASSET, ResolvedImage, builtin_placeholder,
    is_image_content_type,
};
