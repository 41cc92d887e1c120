//! S3 backend built on an OpenDAL operator.

use async_trait::async_trait;
use bytes::Bytes;
use opendal::{ErrorKind, Operator, services};
use tracing::debug;

use super::backend::{BackendKind, ObjectStore, check_upload_path, path_from_url};
use super::config::StorageSettings;
use super::error::StorageError;

/// Host suffix of public object URLs: `https://<bucket>.<S3_DOMAIN>/<path>`.
pub const S3_DOMAIN: &str = "s3.amazonaws.com";

/// Stores objects in a bucket through OpenDAL.
///
/// Uploads are fail-fast: any client error reaches the caller. Deletes go
/// through [`ObjectStore::delete`] and are best-effort.
#[derive(Debug, Clone)]
pub struct RemoteBackend {
    operator: Operator,
    bucket: String,
    url_prefix: String,
}

impl RemoteBackend {
    /// Create an S3 backend from settings.
    ///
    /// No request is made here; credentials are first used by the first upload or delete.
    ///
    /// # Errors
    ///
    /// Returns an error if the S3 operator cannot be built.
    pub fn from_settings(settings: &StorageSettings) -> Result<Self, StorageError> {
        let builder = services::S3::default()
            .bucket(&settings.bucket_name)
            .region(&settings.region)
            .access_key_id(&settings.access_key_id)
            .secret_access_key(&settings.secret_access_key);

        let operator = Operator::new(builder)
            .map_err(|e| StorageError::configuration(e.to_string()))?
            .finish();

        Ok(Self::with_operator(operator, &settings.bucket_name))
    }

    /// Wrap an existing operator. URLs are still built from `bucket`.
    #[must_use]
    pub fn with_operator(operator: Operator, bucket: impl Into<String>) -> Self {
        let bucket = bucket.into();
        let url_prefix = format!("https://{bucket}.{S3_DOMAIN}/");
        Self {
            operator,
            bucket,
            url_prefix,
        }
    }

    /// Get the bucket name.
    #[must_use]
    pub fn bucket(&self) -> &str {
        &self.bucket
    }

    /// Public URL of the object at `path`.
    #[must_use]
    pub fn url_for(&self, path: &str) -> String {
        format!("{}{path}", self.url_prefix)
    }

    /// Check if an object exists at `path`.
    ///
    /// # Errors
    ///
    /// Returns an error for any client failure other than "not found".
    pub async fn exists(&self, path: &str) -> Result<bool, StorageError> {
        match self.operator.stat(path).await {
            Ok(_) => Ok(true),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
            Err(e) => Err(e.into()),
        }
    }
}

#[async_trait]
impl ObjectStore for RemoteBackend {
    fn kind(&self) -> BackendKind {
        BackendKind::Remote
    }

    async fn upload(
        &self,
        content: Bytes,
        path: &str,
        content_type: &str,
    ) -> Result<String, StorageError> {
        check_upload_path(path)?;
        let size = content.len();

        // Services without content-type support would reject the write outright.
        if self
            .operator
            .info()
            .full_capability()
            .write_with_content_type
        {
            self.operator
                .write_with(path, content)
                .content_type(content_type)
                .await?;
        } else {
            self.operator.write(path, content).await?;
        }

        debug!(bucket = %self.bucket, path, content_type, size, "Uploaded object");
        Ok(self.url_for(path))
    }

    async fn try_delete(&self, url: &str) -> Result<bool, StorageError> {
        let path = path_from_url(url, &self.url_prefix)?;
        self.operator.delete(path).await?;
        debug!(bucket = %self.bucket, path, "Deleted object");
        Ok(true)
    }
}
