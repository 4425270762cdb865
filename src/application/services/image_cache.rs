//! Keyed image cache with network fallback.
//!
//! A lookup hits the store synchronously. On a miss a worker task fetches,
//! validates and decodes the resource, stores it, and hands the result to
//! the caller's sink on the UI context. Every failure delivers the
//! placeholder instead and leaves the store untouched.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};

use image::DynamicImage;
use reqwest::Url;
use tokio::runtime::Handle;
use tokio::sync::{Semaphore, oneshot};
use tokio::task::JoinHandle;
use tracing::{debug, error, trace, warn};

use crate::domain::entities::{
    CacheKey, ImageOrigin, PLACEHOLDER_ASSET, ResolvedImage, builtin_placeholder,
    is_image_content_type,
};
use crate::domain::errors::{DecodeError, FailureKind, ResolveFailure};
use crate::domain::ports::{AssetPort, ImageCachePort, ImageDecoderPort, ImageFetchPort};

use super::ui_context::UiHandle;

/// Tuning for [`ImageCache`].
#[derive(Debug, Clone, Default)]
pub struct ImageCacheConfig {
    /// Upper bound on simultaneous fetches. `None` means unbounded.
    pub max_concurrent_fetches: Option<usize>,
}

/// Synchronous outcome of a resolve call.
#[derive(Debug)]
pub enum Resolution {
    /// Served from the store; the sink has already been called.
    Hit,
    /// A fetch is running; the sink will be called on the UI context.
    Pending(JoinHandle<()>),
    /// The link did not parse as a URL; the sink was dropped uncalled.
    InvalidLocator,
}

impl Resolution {
    /// Returns true for a synchronous cache hit.
    #[must_use]
    pub const fn is_hit(&self) -> bool {
        matches!(self, Self::Hit)
    }

    /// Waits for the worker task, if any, to finish.
    ///
    /// The sink itself runs later, on the UI context.
    pub async fn completed(self) {
        if let Self::Pending(handle) = self
            && let Err(e) = handle.await
        {
            error!(error = %e, "Image fetch task failed");
        }
    }
}

/// Snapshot of resolver counters.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResolverStats {
    /// Resolves served from the store.
    pub hits: u64,
    /// Resolves that required a fetch.
    pub misses: u64,
    /// Fetches issued.
    pub fetches: u64,
    /// Placeholder deliveries.
    pub placeholders: u64,
    /// Transport failures, including non-200 statuses.
    pub transport_failures: u64,
    /// Responses not declared as images.
    pub content_type_failures: u64,
    /// Bodies that failed to decode.
    pub decode_failures: u64,
    /// Fetches currently running.
    pub in_flight: usize,
    /// Entries currently stored.
    pub size: usize,
}

impl std::fmt::Display for ResolverStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} cached, {} hits, {} misses, {} fetches, {} placeholders \
             (transport {}, content-type {}, decode {}), {} in flight",
            self.size,
            self.hits,
            self.misses,
            self.fetches,
            self.placeholders,
            self.transport_failures,
            self.content_type_failures,
            self.decode_failures,
            self.in_flight
        )
    }
}

#[derive(Default)]
struct Counters {
    hits: AtomicU64,
    misses: AtomicU64,
    fetches: AtomicU64,
    placeholders: AtomicU64,
    transport: AtomicU64,
    content_type: AtomicU64,
    decode: AtomicU64,
    in_flight: AtomicUsize,
}

impl Counters {
    fn record_failure(&self, kind: FailureKind) {
        let counter = match kind {
            FailureKind::Transport => &self.transport,
            FailureKind::ContentType => &self.content_type,
            FailureKind::Decode => &self.decode,
        };
        counter.fetch_add(1, Ordering::Relaxed);
        self.placeholders.fetch_add(1, Ordering::Relaxed);
    }
}

/// Decrements the in-flight counter when a fetch ends, however it ends.
struct InFlightGuard(Arc<Counters>);

impl InFlightGuard {
    fn enter(counters: &Arc<Counters>) -> Self {
        counters.in_flight.fetch_add(1, Ordering::Relaxed);
        Self(counters.clone())
    }
}

impl Drop for InFlightGuard {
    fn drop(&mut self) {
        self.0.in_flight.fetch_sub(1, Ordering::Relaxed);
    }
}

/// Shared image cache. Construct once and share through `Arc`.
pub struct ImageCache {
    store: Arc<dyn ImageCachePort>,
    fetcher: Arc<dyn ImageFetchPort>,
    decoder: Arc<dyn ImageDecoderPort>,
    placeholder: Arc<DynamicImage>,
    ui: UiHandle,
    limiter: Option<Arc<Semaphore>>,
    counters: Arc<Counters>,
    runtime: Handle,
}

impl std::fmt::Debug for ImageCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ImageCache")
            .field("stats", &self.stats())
            .finish_non_exhaustive()
    }
}

impl ImageCache {
    /// Creates a cache wired to its collaborators.
    ///
    /// The placeholder is resolved from `assets` once, here; if no asset is
    /// registered under [`PLACEHOLDER_ASSET`] a built-in image is used.
    ///
    /// # Panics
    /// Panics if called outside a Tokio runtime. Later calls to
    /// [`resolve`](Self::resolve) may come from any thread.
    pub fn new(
        store: Arc<dyn ImageCachePort>,
        fetcher: Arc<dyn ImageFetchPort>,
        decoder: Arc<dyn ImageDecoderPort>,
        assets: &dyn AssetPort,
        ui: UiHandle,
        config: &ImageCacheConfig,
    ) -> Self {
        let placeholder = assets.image(PLACEHOLDER_ASSET).unwrap_or_else(|| {
            debug!(asset = PLACEHOLDER_ASSET, "Using built-in placeholder");
            builtin_placeholder()
        });

        Self {
            store,
            fetcher,
            decoder,
            placeholder,
            ui,
            limiter: config
                .max_concurrent_fetches
                .map(|n| Arc::new(Semaphore::new(n.max(1)))),
            counters: Arc::new(Counters::default()),
            runtime: Handle::current(),
        }
    }

    /// Resolves `locator` and hands the image to `sink`.
    ///
    /// On a hit the sink runs before this returns, on the calling thread.
    /// On a miss the fetch runs on a worker task and the sink runs on the
    /// UI context. Concurrent resolves of the same locator each fetch.
    pub fn resolve<F>(&self, locator: &Url, sink: F) -> Resolution
    where
        F: FnOnce(ResolvedImage) + Send + 'static,
    {
        let key = CacheKey::from(locator);

        if let Some(image) = self.store.get(&key) {
            self.counters.hits.fetch_add(1, Ordering::Relaxed);
            trace!(url = %key, "Resolved from cache");
            sink(ResolvedImage {
                image,
                origin: ImageOrigin::Cache,
            });
            return Resolution::Hit;
        }

        self.counters.misses.fetch_add(1, Ordering::Relaxed);

        let task = FetchTask {
            store: self.store.clone(),
            fetcher: self.fetcher.clone(),
            decoder: self.decoder.clone(),
            placeholder: self.placeholder.clone(),
            ui: self.ui.clone(),
            limiter: self.limiter.clone(),
            counters: self.counters.clone(),
        };
        let url = locator.clone();

        Resolution::Pending(self.runtime.spawn(task.run(url, key, sink)))
    }

    /// Parses `link` and resolves it.
    ///
    /// An unparseable link is ignored: nothing is fetched and the sink is
    /// dropped without being called.
    pub fn resolve_link<F>(&self, link: &str, sink: F) -> Resolution
    where
        F: FnOnce(ResolvedImage) + Send + 'static,
    {
        match Url::parse(link) {
            Ok(url) => self.resolve(&url, sink),
            Err(e) => {
                debug!(link, error = %e, "Ignoring invalid image link");
                Resolution::InvalidLocator
            }
        }
    }

    /// Resolves `locator` and waits for the delivered image.
    ///
    /// Delivery still goes through the UI context, so it must be running.
    /// If it has shut down the placeholder is returned.
    pub async fn resolve_now(&self, locator: &Url) -> ResolvedImage {
        let (tx, rx) = oneshot::channel();
        self.resolve(locator, move |resolved| {
            let _ = tx.send(resolved);
        });
        rx.await.unwrap_or_else(|_| ResolvedImage {
            image: self.placeholder.clone(),
            origin: ImageOrigin::Placeholder,
        })
    }

    /// Returns the cached image for `locator` without counting a hit.
    #[must_use]
    pub fn cached(&self, locator: &Url) -> Option<Arc<DynamicImage>> {
        self.store.peek(&CacheKey::from(locator))
    }

    /// Drops every cached image. The next resolve of any key refetches.
    pub fn clear(&self) {
        self.store.clear();
        debug!("Cleared image cache");
    }

    /// Returns the placeholder delivered on failures.
    #[must_use]
    pub fn placeholder(&self) -> Arc<DynamicImage> {
        self.placeholder.clone()
    }

    /// Returns the number of fetches currently running.
    #[must_use]
    pub fn in_flight(&self) -> usize {
        self.counters.in_flight.load(Ordering::Relaxed)
    }

    /// Returns a snapshot of the counters.
    #[must_use]
    pub fn stats(&self) -> ResolverStats {
        let c = &self.counters;
        ResolverStats {
            hits: c.hits.load(Ordering::Relaxed),
            misses: c.misses.load(Ordering::Relaxed),
            fetches: c.fetches.load(Ordering::Relaxed),
            placeholders: c.placeholders.load(Ordering::Relaxed),
            transport_failures: c.transport.load(Ordering::Relaxed),
            content_type_failures: c.content_type.load(Ordering::Relaxed),
            decode_failures: c.decode.load(Ordering::Relaxed),
            in_flight: c.in_flight.load(Ordering::Relaxed),
            size: self.store.len(),
        }
    }
}

/// Everything a worker needs, detached from the cache handle.
struct FetchTask {
    store: Arc<dyn ImageCachePort>,
    fetcher: Arc<dyn ImageFetchPort>,
    decoder: Arc<dyn ImageDecoderPort>,
    placeholder: Arc<DynamicImage>,
    ui: UiHandle,
    limiter: Option<Arc<Semaphore>>,
    counters: Arc<Counters>,
}

impl FetchTask {
    async fn run<F>(self, url: Url, key: CacheKey, sink: F)
    where
        F: FnOnce(ResolvedImage) + Send + 'static,
    {
        let permit = match &self.limiter {
            Some(limiter) => limiter.clone().acquire_owned().await.ok(),
            None => None,
        };
        let guard = InFlightGuard::enter(&self.counters);
        self.counters.fetches.fetch_add(1, Ordering::Relaxed);
        debug!(url = %key, "Cache miss, fetching");

        let resolved = match self.fetch_image(&url).await {
            Ok(image) => {
                let image = Arc::new(image);
                self.store.put(key.clone(), image.clone());
                debug!(url = %key, width = image.width(), height = image.height(), "Image cached");
                ResolvedImage {
                    image,
                    origin: ImageOrigin::Network,
                }
            }
            Err(failure) => {
                self.counters.record_failure(failure.kind());
                warn!(url = %key, kind = %failure.kind(), error = %failure, "Delivering placeholder");
                ResolvedImage {
                    image: self.placeholder.clone(),
                    origin: ImageOrigin::Placeholder,
                }
            }
        };

        drop(guard);
        drop(permit);

        if !self.ui.dispatch(move || sink(resolved)) {
            trace!(url = %key, "UI context closed, dropping delivery");
        }
    }

    /// Fetches, validates and decodes. All three checks must pass.
    async fn fetch_image(&self, url: &Url) -> Result<DynamicImage, ResolveFailure> {
        let resource = self.fetcher.fetch(url).await?;

        if resource.status != 200 {
            return Err(ResolveFailure::Status(resource.status));
        }

        if !resource
            .content_type
            .as_deref()
            .is_some_and(is_image_content_type)
        {
            return Err(ResolveFailure::ContentType(resource.content_type));
        }

        let decoder = self.decoder.clone();
        let body = resource.body;
        let image = tokio::task::spawn_blocking(move || decoder.decode(&body))
            .await
            .map_err(|e| DecodeError::new(format!("Decode task panicked: {e}")))??;

        Ok(image)
    }
}
