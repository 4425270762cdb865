//! In-memory image cache implementation.

use std::num::NonZeroUsize;
use std::sync::Arc;

use image::DynamicImage;
use lru::LruCache;
use parking_lot::Mutex;
use tracing::{debug, trace};

use crate::domain::entities::CacheKey;
use crate::domain::ports::ImageCachePort;

/// In-memory cache for decoded images.
///
/// Unbounded unless a capacity is given, in which case the least recently
/// used entry is evicted first.
pub struct MemoryImageCache {
    cache: Mutex<LruCache<CacheKey, Arc<DynamicImage>>>,
}

impl MemoryImageCache {
    /// Creates a cache with no entry limit.
    #[must_use]
    pub fn unbounded() -> Self {
        Self::from_lru(LruCache::unbounded())
    }

    /// Creates a cache holding at most `capacity` images (minimum 1).
    #[must_use]
    pub fn bounded(capacity: usize) -> Self {
        let cap = NonZeroUsize::new(capacity).unwrap_or(NonZeroUsize::MIN);
        Self::from_lru(LruCache::new(cap))
    }

    /// Creates a cache from an optional capacity.
    #[must_use]
    pub fn with_capacity(capacity: Option<usize>) -> Self {
        capacity.map_or_else(Self::unbounded, Self::bounded)
    }

    fn from_lru(cache: LruCache<CacheKey, Arc<DynamicImage>>) -> Self {
        Self {
            cache: Mutex::new(cache),
        }
    }
}

impl Default for MemoryImageCache {
    fn default() -> Self {
        Self::unbounded()
    }
}

impl ImageCachePort for MemoryImageCache {
    fn get(&self, key: &CacheKey) -> Option<Arc<DynamicImage>> {
        let mut cache = self.cache.lock();
        if let Some(img) = cache.get(key) {
            trace!(url = %key, "Memory cache hit");
            Some(img.clone())
        } else {
            trace!(url = %key, "Memory cache miss");
            None
        }
    }

    fn peek(&self, key: &CacheKey) -> Option<Arc<DynamicImage>> {
        self.cache.lock().peek(key).cloned()
    }

    fn put(&self, key: CacheKey, image: Arc<DynamicImage>) {
        let mut cache = self.cache.lock();
        debug!(url = %key, "Storing image in memory cache");
        if let Some((evicted, _)) = cache.push(key.clone(), image)
            && evicted != key
        {
            debug!(url = %evicted, "Evicted least recently used image");
        }
    }

    fn evict(&self, key: &CacheKey) -> bool {
        let removed = self.cache.lock().pop(key).is_some();
        if removed {
            debug!(url = %key, "Evicted image from memory cache");
        }
        removed
    }

    fn len(&self) -> usize {
        self.cache.lock().len()
    }

    fn clear(&self) {
        self.cache.lock().clear();
        debug!("Cleared memory image cache");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn img(w: u32) -> Arc<DynamicImage> {
        Arc::new(DynamicImage::new_rgb8(w, w))
    }

    #[test]
    fn test_cache_put_and_get() {
        let cache = MemoryImageCache::unbounded();
        let key = CacheKey::new("https://x/a.png");

        cache.put(key.clone(), img(100));
        let retrieved = cache.get(&key);

        assert_eq!(retrieved.map(|i| i.width()), Some(100));
    }

    #[test]
    fn test_cache_miss() {
        let cache = MemoryImageCache::unbounded();
        assert!(cache.get(&CacheKey::new("https://x/none.png")).is_none());
    }

    #[test]
    fn test_put_overwrites_existing_key() {
        let cache = MemoryImageCache::unbounded();
        let key = CacheKey::new("https://x/a.png");

        cache.put(key.clone(), img(10));
        cache.put(key.clone(), img(20));

        assert_eq!(cache.len(), 1);
        assert_eq!(cache.peek(&key).map(|i| i.width()), Some(20));
    }

    #[test]
    fn test_unbounded_keeps_everything() {
        let cache = MemoryImageCache::unbounded();
        for i in 0..500 {
            cache.put(CacheKey::new(format!("https://x/{i}.png")), img(1));
        }
        assert_eq!(cache.len(), 500);
    }

    #[test]
    fn test_bounded_eviction() {
        let cache = MemoryImageCache::bounded(2);

        let k1 = CacheKey::new("k1");
        let k2 = CacheKey::new("k2");
        let k3 = CacheKey::new("k3");

        cache.put(k1.clone(), img(1));
        cache.put(k2.clone(), img(1));
        cache.put(k3.clone(), img(1));

        // k1 should be evicted (LRU)
        assert!(cache.get(&k1).is_none());
        assert!(cache.get(&k2).is_some());
        assert!(cache.get(&k3).is_some());
    }

    #[test]
    fn test_peek_does_not_promote() {
        let cache = MemoryImageCache::bounded(2);

        let k1 = CacheKey::new("k1");
        let k2 = CacheKey::new("k2");

        cache.put(k1.clone(), img(1));
        cache.put(k2.clone(), img(1));

        let _ = cache.peek(&k1);
        cache.put(CacheKey::new("k3"), img(1));

        assert!(cache.peek(&k1).is_none());
        assert!(cache.peek(&k2).is_some());
    }

    #[test]
    fn test_evict_and_clear() {
        let cache = MemoryImageCache::unbounded();
        let key = CacheKey::new("k1");
        cache.put(key.clone(), img(1));
        cache.put(CacheKey::new("k2"), img(1));

        assert!(cache.evict(&key));
        assert!(!cache.evict(&key));
        assert_eq!(cache.len(), 1);

        cache.clear();
        assert!(cache.is_empty());
    }
}
