//! Image handling infrastructure.
//!
//! This module provides:
//! - In-memory decoded-image store with optional LRU bound
//! - HTTP(S) fetch adapter
//! - Decoder adapter
//! - Named asset lookup for the placeholder

pub mod assets;
pub mod decoder;
pub mod http_fetcher;
pub mod memory_cache;

pub use assets::{AssetCatalog, AssetError};
pub use decoder::ImageCrateDecoder;
pub use http_fetcher::{HttpFetcherConfig, HttpImageFetcher};
pub use memory_cache::MemoryImageCache;
