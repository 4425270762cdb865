//! Application layer with the image resolution service and payload helpers.

/// Application services.
pub mod services;

pub use services::{
    ImageCache, ImageCacheConfig, Resolution, ResolverStats, UiContext, UiHandle, ui_channel,
};
