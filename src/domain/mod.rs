//! Domain layer with core entities, errors, and port definitions.

/// Entity definitions.
pub mod entities;
/// Error types.
pub mod errors;
/// Port definitions.
pub mod ports;
/// Null-safe lookups on server JSON payloads.
pub mod serde_utils;

pub use entities::{CacheKey, ImageOrigin, ResolvedImage};
pub use errors::{FailureKind, ResolveFailure};
pub use ports::{AssetPort, ImageCachePort, ImageDecoderPort, ImageFetchPort};
