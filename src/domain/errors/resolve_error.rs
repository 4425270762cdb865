//! Image resolution error types.
//!
//! None of these reach a sink. They are classified for logs and statistics
//! and then collapse to the placeholder image.

use thiserror::Error;

/// Transport-level failure reported by a fetch collaborator.
#[derive(Debug, Clone, Error)]
#[error("transport error: {message}")]
pub struct TransportError {
    /// Human-readable cause.
    pub message: String,
}

impl TransportError {
    /// Creates a transport error.
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Failure reported by an image decoder.
#[derive(Debug, Clone, Error)]
#[error("decode error: {message}")]
pub struct DecodeError {
    /// Human-readable cause.
    pub message: String,
}

impl DecodeError {
    /// Creates a decode error.
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Why a fetched resource was rejected.
#[derive(Debug, Clone, Error)]
#[allow(missing_docs)]
pub enum ResolveFailure {
    #[error(transparent)]
    Transport(#[from] TransportError),

    #[error("unexpected status {0}")]
    Status(u16),

    #[error("not an image: {}", .0.as_deref().unwrap_or("<no content type>"))]
    ContentType(Option<String>),

    #[error(transparent)]
    Decode(#[from] DecodeError),
}

impl ResolveFailure {
    /// Returns the failure category.
    #[must_use]
    pub const fn kind(&self) -> FailureKind {
        match self {
            Self::Transport(_) | Self::Status(_) => FailureKind::Transport,
            Self::ContentType(_) => FailureKind::ContentType,
            Self::Decode(_) => FailureKind::Decode,
        }
    }
}

/// Coarse failure category used for counters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// Network unreachable, timeout, or a non-200 status.
    Transport,
    /// Response was not declared as an image.
    ContentType,
    /// Bytes did not form a valid image.
    Decode,
}

impl std::fmt::Display for FailureKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Transport => write!(f, "transport"),
            Self::ContentType => write!(f, "content_type"),
            Self::Decode => write!(f, "decode"),
        }
    }
}
