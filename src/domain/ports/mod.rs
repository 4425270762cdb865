mod asset_port;
mod decoder_port;
mod fetch_port;
mod image_cache_port;

pub use asset_port::AssetPort;
pub use decoder_port::ImageDecoderPort;
pub use fetch_port::{FetchedResource, ImageFetchPort};
pub use image_cache_port::ImageCachePort;
