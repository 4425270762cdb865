//! Infrastructure layer with external service adapters.

/// Application configuration.
pub mod config;
/// Image handling (store, fetch, decode, assets).
pub mod image;

pub use config::{AppConfig, CliArgs, ConfigError, LogLevel, StorageManager};
pub use self::image::{
    AssetCatalog, AssetError, HttpFetcherConfig, HttpImageFetcher, ImageCrateDecoder,
    MemoryImageCache,
};
