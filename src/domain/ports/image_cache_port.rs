//! Port definition for the decoded-image store.

use std::sync::Arc;

use image::DynamicImage;

use crate::domain::entities::CacheKey;

/// Store of decoded images keyed by locator.
///
/// Every method is synchronous so that a cache hit can be served without
/// scheduling any I/O. Implementations must be thread-safe.
pub trait ImageCachePort: Send + Sync {
    /// Looks up an image, marking it as recently used.
    fn get(&self, key: &CacheKey) -> Option<Arc<DynamicImage>>;

    /// Looks up an image without touching recency.
    fn peek(&self, key: &CacheKey) -> Option<Arc<DynamicImage>>;

    /// Stores an image, replacing any previous entry for the key.
    fn put(&self, key: CacheKey, image: Arc<DynamicImage>);

    /// Removes an entry. Returns true if one existed.
    fn evict(&self, key: &CacheKey) -> bool;

    /// Returns the current number of cached images.
    fn len(&self) -> usize;

    /// Returns true if the cache is empty.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Clears all images from the cache.
    fn clear(&self);
}
