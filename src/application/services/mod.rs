/// Keyed image cache with network fallback.
pub mod image_cache;
/// Relative and display formatting of timestamps.
pub mod relative_time;
/// Single UI-affinity execution context.
pub mod ui_context;
/// URL query-string helpers.
pub mod url_query;

pub use image_cache::{ImageCache, ImageCacheConfig, Resolution, ResolverStats};
pub use ui_context::{UiContext, UiHandle, UiTask, ui_channel};
pub use url_query::query_parameters;
