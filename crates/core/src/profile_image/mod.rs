//! Profile image handling on top of the storage backends.
//!
//! This module provides:
//! - Image validation (content type, extension, size)
//! - Storage key generation per user
//! - Upload, replace, and best-effort removal of profile images

mod error;
mod service;
mod types;

pub use error::ProfileImageError;
pub use service::{IMAGE_KEY_PREFIX, ProfileImageService, image_key};
pub use types::{ImagePolicy, NewImage};
