//! Port for resolving bundled image assets by logical name.

use std::sync::Arc;

use image::DynamicImage;

/// Port for the host's asset-resolution mechanism.
#[cfg_attr(test, mockall::automock)]
pub trait AssetPort: Send + Sync {
    /// Returns the image registered under `name`, if any.
    fn image(&self, name: &str) -> Option<Arc<DynamicImage>>;
}
