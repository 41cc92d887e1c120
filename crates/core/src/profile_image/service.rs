//! Profile image service implementation.

use std::sync::Arc;

use stowage_shared::types::{ImageId, UserId};
use tracing::{info, warn};

use super::error::ProfileImageError;
use super::types::{ImagePolicy, NewImage, file_extension};
use crate::storage::{BackendKind, ObjectStore};

/// Top-level folder for profile images.
pub const IMAGE_KEY_PREFIX: &str = "profile-images";

/// Extension used when the filename carries none.
const FALLBACK_EXTENSION: &str = ".jpg";

/// Generate the storage key for a profile image.
///
/// Format: `profile-images/{user_id}/{image_id}{ext}`
#[must_use]
pub fn image_key(user_id: UserId, image_id: ImageId, filename: Option<&str>) -> String {
    let extension = filename
        .and_then(file_extension)
        .unwrap_or_else(|| FALLBACK_EXTENSION.to_string());
    format!("{IMAGE_KEY_PREFIX}/{user_id}/{image_id}{extension}")
}

/// Uploads and removes user profile images through the selected backend.
pub struct ProfileImageService {
    storage: Arc<dyn ObjectStore>,
    policy: ImagePolicy,
}

impl ProfileImageService {
    /// Create a service with the default image policy.
    #[must_use]
    pub fn new(storage: Arc<dyn ObjectStore>) -> Self {
        Self {
            storage,
            policy: ImagePolicy::default(),
        }
    }

    /// Replace the image policy.
    #[must_use]
    pub fn with_policy(mut self, policy: ImagePolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Get the image policy.
    #[must_use]
    pub fn policy(&self) -> &ImagePolicy {
        &self.policy
    }

    /// Which backend images go to.
    #[must_use]
    pub fn backend_kind(&self) -> BackendKind {
        self.storage.kind()
    }

    /// Validate and store a new profile image, returning its URL.
    ///
    /// # Errors
    ///
    /// Returns an error if the image fails validation or the upload fails.
    pub async fn upload(
        &self,
        user_id: UserId,
        image: NewImage,
    ) -> Result<String, ProfileImageError> {
        self.policy.validate(&image)?;
        self.store(user_id, image).await
    }

    /// Store a new profile image and drop the previous one.
    ///
    /// The previous image is deleted only after validation passes. Its
    /// deletion is best-effort: a failure is logged and the upload proceeds.
    ///
    /// # Errors
    ///
    /// Returns an error if the image fails validation or the upload fails.
    pub async fn replace(
        &self,
        user_id: UserId,
        previous_url: Option<&str>,
        image: NewImage,
    ) -> Result<String, ProfileImageError> {
        self.policy.validate(&image)?;

        if let Some(previous_url) = previous_url
            && !self.storage.delete(previous_url).await
        {
            warn!(
                user_id = %user_id,
                url = previous_url,
                "Previous profile image was not deleted"
            );
        }

        self.store(user_id, image).await
    }

    /// Best-effort removal of a stored image.
    pub async fn remove(&self, url: &str) -> bool {
        let deleted = self.storage.delete(url).await;
        info!(url, deleted, backend = %self.storage.kind(), "Profile image removal");
        deleted
    }

    async fn store(&self, user_id: UserId, image: NewImage) -> Result<String, ProfileImageError> {
        let key = image_key(user_id, ImageId::new(), image.filename.as_deref());
        let url = self
            .storage
            .upload(image.data, &key, &image.content_type)
            .await?;

        info!(
            user_id = %user_id,
            key = %key,
            backend = %self.storage.kind(),
            "Profile image uploaded"
        );
        Ok(url)
    }
}

#[cfg(test)]
#[path = "service_tests.rs"]
mod tests;
