//! Teleview - the image layer of the telemedicine client.
//!
//! This crate provides a shared, keyed image cache that fetches on a miss,
//! delivers on a single UI context, and falls back to a placeholder on any
//! failure, plus the payload and date helpers the client screens rely on.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

/// Application layer containing services.
pub mod application;
/// Domain layer containing entities, errors, and port definitions.
pub mod domain;
/// Infrastructure layer containing adapters for external services.
pub mod infrastructure;

/// Current version of the application.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Application name.
pub const NAME: &str = "teleview";
