//! Storage error types.

use thiserror::Error;

/// Storage operation errors.
#[derive(Debug, Error)]
pub enum StorageError {
    /// URL does not belong to the backend it was handed to.
    #[error("malformed object URL: {url}")]
    MalformedUrl {
        /// The rejected URL.
        url: String,
    },

    /// Object path cannot be stored or addressed by URL.
    #[error("invalid object path: '{path}'")]
    InvalidPath {
        /// The rejected path.
        path: String,
    },

    /// Storage provider configuration error.
    #[error("storage configuration error: {0}")]
    Configuration(String),

    /// Failure reported by the OpenDAL client, passed through unchanged.
    #[error("object store request failed: {0}")]
    Backend(#[from] opendal::Error),
}

impl StorageError {
    /// Create a malformed URL error.
    #[must_use]
    pub fn malformed_url(url: impl Into<String>) -> Self {
        Self::MalformedUrl { url: url.into() }
    }

    /// Create an invalid path error.
    #[must_use]
    pub fn invalid_path(path: impl Into<String>) -> Self {
        Self::InvalidPath { path: path.into() }
    }

    /// Create a configuration error.
    #[must_use]
    pub fn configuration(msg: impl Into<String>) -> Self {
        Self::Configuration(msg.into())
    }

    /// Returns the OpenDAL error kind when the client produced this error.
    #[must_use]
    pub fn backend_kind(&self) -> Option<opendal::ErrorKind> {
        match self {
            Self::Backend(err) => Some(err.kind()),
            _ => None,
        }
    }
}
