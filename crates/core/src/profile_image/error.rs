//! Profile image error types.

use stowage_shared::AppError;
use thiserror::Error;

use crate::storage::StorageError;

/// Profile image operation errors.
#[derive(Debug, Error)]
pub enum ProfileImageError {
    /// Content type or file extension is not an accepted image format.
    #[error("invalid image: {0}")]
    InvalidImage(String),

    /// Image exceeds the configured size limit.
    #[error("image too large: {size} bytes exceeds maximum {max} bytes")]
    FileTooLarge {
        /// Actual image size.
        size: u64,
        /// Maximum allowed size.
        max: u64,
    },

    /// Storage operation failed.
    #[error("storage error: {0}")]
    Storage(#[from] StorageError),
}

impl ProfileImageError {
    /// Create an invalid image error.
    #[must_use]
    pub fn invalid_image(msg: impl Into<String>) -> Self {
        Self::InvalidImage(msg.into())
    }

    /// Create a file too large error.
    #[must_use]
    pub fn file_too_large(size: u64, max: u64) -> Self {
        Self::FileTooLarge { size, max }
    }
}

impl From<ProfileImageError> for AppError {
    fn from(err: ProfileImageError) -> Self {
        match err {
            ProfileImageError::InvalidImage(_) => Self::Validation(err.to_string()),
            ProfileImageError::FileTooLarge { .. } => Self::PayloadTooLarge(err.to_string()),
            ProfileImageError::Storage(
                StorageError::MalformedUrl { .. } | StorageError::InvalidPath { .. },
            ) => {
                Self::Validation(err.to_string())
            }
            ProfileImageError::Storage(StorageError::Configuration(_)) => {
                Self::Internal(err.to_string())
            }
            ProfileImageError::Storage(StorageError::Backend(_)) => {
                Self::ExternalService(err.to_string())
            }
        }
    }
}
