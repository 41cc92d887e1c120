//! Process-local backend used when no object store credentials are configured.

use async_trait::async_trait;
use bytes::Bytes;
use dashmap::DashMap;
use tracing::debug;

use super::backend::{BackendKind, ObjectStore, check_upload_path, path_from_url};
use super::error::StorageError;

/// Prefix of every URL handed out by [`InMemoryBackend`].
pub const MOCK_URL_PREFIX: &str = "https://mock-storage.local/";

/// An object held by [`InMemoryBackend`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredObject {
    /// Raw bytes as uploaded.
    pub content: Bytes,
    /// Content type given at upload.
    pub content_type: String,
}

/// Stores objects in a concurrent map keyed by path.
///
/// Nothing is persisted; contents live as long as the value. Racing writes to
/// the same path resolve as last-writer-wins.
#[derive(Debug, Default)]
pub struct InMemoryBackend {
    objects: DashMap<String, StoredObject>,
}

impl InMemoryBackend {
    /// Create an empty backend.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// URL for an object stored at `path`.
    #[must_use]
    pub fn url_for(path: &str) -> String {
        format!("{MOCK_URL_PREFIX}{path}")
    }

    /// Returns a copy of the object at `path`, if any.
    #[must_use]
    pub fn get(&self, path: &str) -> Option<StoredObject> {
        self.objects.get(path).map(|entry| entry.value().clone())
    }

    /// Number of stored objects.
    #[must_use]
    pub fn len(&self) -> usize {
        self.objects.len()
    }

    /// Whether no objects are stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }
}

#[async_trait]
impl ObjectStore for InMemoryBackend {
    fn kind(&self) -> BackendKind {
        BackendKind::InMemory
    }

    async fn upload(
        &self,
        content: Bytes,
        path: &str,
        content_type: &str,
    ) -> Result<String, StorageError> {
        check_upload_path(path)?;

        debug!(
            path,
            content_type,
            size = content.len(),
            "Storing object in memory"
        );

        self.objects.insert(
            path.to_string(),
            StoredObject {
                content,
                content_type: content_type.to_string(),
            },
        );

        Ok(Self::url_for(path))
    }

    async fn try_delete(&self, url: &str) -> Result<bool, StorageError> {
        let path = path_from_url(url, MOCK_URL_PREFIX)?;
        let removed = self.objects.remove(path).is_some();
        debug!(path, removed, "Deleting object from memory");
        Ok(removed)
    }
}


#[cfg(test)]
mod property_tests {
    use super::*;
    use proptest::prelude::*;

    fn runtime() -> tokio::runtime::Runtime {
        tokio::runtime::Builder::new_current_thread()
            .build()
            .expect("runtime should build")
    }

    // Upload followed by a lookup under the URL's path yields the original object.
    proptest! {
        #[test]
        fn prop_upload_then_lookup(
            content in proptest::collection::vec(any::<u8>(), 0..256),
            path in "[a-z0-9_-]{1,12}(/[a-z0-9_.-]{1,12}){0,3}",
            content_type in "[a-z]+/[a-z0-9.+-]+",
        ) {
            let backend = InMemoryBackend::new();
            let url = runtime()
                .block_on(backend.upload(Bytes::from(content.clone()), &path, &content_type))
                .expect("upload should succeed");

            let derived = url.strip_prefix(MOCK_URL_PREFIX).expect("url carries prefix");
            prop_assert_eq!(derived, path.as_str());

            let stored = backend.get(derived).expect("object should exist");
            prop_assert_eq!(stored.content.as_ref(), content.as_slice());
            prop_assert_eq!(stored.content_type, content_type);
        }
    }

    // Deleting an uploaded object leaves no entry behind.
    proptest! {
        #[test]
        fn prop_delete_after_upload_removes_entry(
            path in "[a-z0-9]{1,16}\\.(png|jpg)",
        ) {
            let backend = InMemoryBackend::new();
            let rt = runtime();
            let url = rt
                .block_on(backend.upload(Bytes::from_static(b"x"), &path, "image/png"))
                .expect("upload should succeed");

            prop_assert!(rt.block_on(backend.delete(&url)));
            prop_assert!(backend.get(&path).is_none());
        }
    }
}
