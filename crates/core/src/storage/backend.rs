//! The contract shared by every storage backend.

use async_trait::async_trait;
use bytes::Bytes;
use tracing::warn;

use super::error::StorageError;

/// Which backend the selector settled on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackendKind {
    /// S3 through OpenDAL.
    Remote,
    /// Process-local map.
    InMemory,
}

impl BackendKind {
    /// Short name used in logs and health output.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Remote => "s3",
            Self::InMemory => "memory",
        }
    }
}

impl std::fmt::Display for BackendKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Upload/delete capability implemented identically by every backend.
///
/// URLs returned by `upload` are only meaningful to the backend that produced
/// them; callers must not assume a format.
#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// Which backend this is.
    fn kind(&self) -> BackendKind;

    /// Stores `content` under `path` tagged with `content_type` and returns its URL.
    ///
    /// Client failures are returned to the caller as-is.
    async fn upload(
        &self,
        content: Bytes,
        path: &str,
        content_type: &str,
    ) -> Result<String, StorageError>;

    /// Deletes the object behind `url`.
    ///
    /// `Ok(false)` means the backend knows the object was absent.
    async fn try_delete(&self, url: &str) -> Result<bool, StorageError>;

    /// Best-effort delete: every failure is logged and reported as `false`.
    async fn delete(&self, url: &str) -> bool {
        match self.try_delete(url).await {
            Ok(deleted) => deleted,
            Err(e) => {
                warn!(backend = %self.kind(), url, error = %e, "Failed to delete object");
                false
            }
        }
    }
}

/// Rejects paths that would produce a URL `path_from_url` cannot read back.
pub(crate) fn check_upload_path(path: &str) -> Result<(), StorageError> {
    if path.is_empty() {
        return Err(StorageError::invalid_path(path));
    }
    Ok(())
}

/// Extracts the object path from `url`, which must start with `prefix` and
/// name a non-empty key.
pub(crate) fn path_from_url<'a>(url: &'a str, prefix: &str) -> Result<&'a str, StorageError> {
    match url.strip_prefix(prefix) {
        Some(path) if !path.is_empty() => Ok(path),
        _ => Err(StorageError::malformed_url(url)),
    }
}
