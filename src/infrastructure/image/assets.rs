//! Named image assets loaded from an optional directory.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use image::DynamicImage;
use parking_lot::Mutex;
use thiserror::Error;
use tracing::{debug, warn};

use crate::domain::ports::AssetPort;

/// Errors raised while loading an asset file.
#[derive(Debug, Error)]
pub enum AssetError {
    /// Asset file could not be read.
    #[error("failed to read asset {path}: {source}")]
    Io {
        /// File that was read.
        path: PathBuf,
        /// Underlying error.
        source: std::io::Error,
    },
    /// Asset file is not a decodable image.
    #[error("failed to decode asset {path}: {source}")]
    Decode {
        /// File that was decoded.
        path: PathBuf,
        /// Underlying error.
        source: image::ImageError,
    },
}

/// Resolves assets by logical name.
///
/// Registered images win over files. Files are looked up as `<dir>/<name>.png`
/// and memoised after the first successful load.
pub struct AssetCatalog {
    dir: Option<PathBuf>,
    loaded: Mutex<HashMap<String, Arc<DynamicImage>>>,
}

impl AssetCatalog {
    /// Creates a catalog backed by an optional assets directory.
    #[must_use]
    pub fn new(dir: Option<PathBuf>) -> Self {
        Self {
            dir,
            loaded: Mutex::new(HashMap::new()),
        }
    }

    /// Creates a catalog with no directory and no assets.
    #[must_use]
    pub fn empty() -> Self {
        Self::new(None)
    }

    /// Registers an in-memory asset under `name`.
    pub fn register(&self, name: impl Into<String>, image: Arc<DynamicImage>) {
        self.loaded.lock().insert(name.into(), image);
    }

    /// Returns the assets directory, if any.
    #[must_use]
    pub fn dir(&self) -> Option<&Path> {
        self.dir.as_deref()
    }

    fn load_file(path: &Path) -> Result<DynamicImage, AssetError> {
        let bytes = std::fs::read(path).map_err(|source| AssetError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        image::load_from_memory(&bytes).map_err(|source| AssetError::Decode {
            path: path.to_path_buf(),
            source,
        })
    }
}

impl Default for AssetCatalog {
    fn default() -> Self {
        Self::empty()
    }
}

impl AssetPort for AssetCatalog {
    fn image(&self, name: &str) -> Option<Arc<DynamicImage>> {
        if let Some(img) = self.loaded.lock().get(name) {
            return Some(img.clone());
        }

        let path = self.dir.as_ref()?.join(format!("{name}.png"));
        if !path.exists() {
            debug!(asset = name, path = %path.display(), "Asset not found");
            return None;
        }

        match Self::load_file(&path) {
            Ok(img) => {
                let img = Arc::new(img);
                self.loaded.lock().insert(name.to_string(), img.clone());
                debug!(asset = name, path = %path.display(), "Loaded asset");
                Some(img)
            }
            Err(e) => {
                warn!(asset = name, error = %e, "Failed to load asset");
                None
            }
        }
    }
}
