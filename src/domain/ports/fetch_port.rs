//! Port for fetching remote image resources.

use async_trait::async_trait;
use bytes::Bytes;
use reqwest::Url;

use crate::domain::errors::TransportError;

/// Raw response of a fetch, before any validation.
#[derive(Debug, Clone)]
pub struct FetchedResource {
    /// HTTP status code.
    pub status: u16,
    /// Declared content type, if any.
    pub content_type: Option<String>,
    /// Response body.
    pub body: Bytes,
}

impl FetchedResource {
    /// Creates a fetched resource.
    #[must_use]
    pub fn new(status: u16, content_type: Option<&str>, body: impl Into<Bytes>) -> Self {
        Self {
            status,
            content_type: content_type.map(String::from),
            body: body.into(),
        }
    }
}

/// Port for the HTTP(S) fetch capability.
///
/// Implementations report whatever the server sent; status and content-type
/// policy belong to the caller.
#[async_trait]
pub trait ImageFetchPort: Send + Sync {
    /// Fetches a resource.
    async fn fetch(&self, url: &Url) -> Result<FetchedResource, TransportError>;
}
