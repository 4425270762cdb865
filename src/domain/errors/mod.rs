//! Domain error types.

mod resolve_error;

pub use resolve_error::{DecodeError, FailureKind, ResolveFailure, TransportError};
