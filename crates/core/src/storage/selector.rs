//! Startup-time choice between the S3 and in-memory backends.

use std::sync::Arc;

use tracing::{info, warn};

use super::backend::ObjectStore;
use super::config::StorageSettings;
use super::error::StorageError;
use super::memory::InMemoryBackend;
use super::remote::RemoteBackend;

/// Returns the backend matching `settings`.
///
/// S3 when both credentials are non-empty, in-memory otherwise. Call once at
/// startup and share the handle.
///
/// # Errors
///
/// Returns an error if credentials are present but the S3 operator cannot be built.
pub fn select_backend(settings: &StorageSettings) -> Result<Arc<dyn ObjectStore>, StorageError> {
    if settings.has_credentials() {
        let backend = RemoteBackend::from_settings(settings)?;
        info!(
            bucket = %settings.bucket_name,
            region = %settings.region,
            "Using S3 object storage"
        );
        Ok(Arc::new(backend))
    } else {
        warn!("Object store credentials not configured, using in-memory storage");
        Ok(Arc::new(InMemoryBackend::new()))
    }
}

/// Loads [`StorageSettings`] from the environment and selects a backend.
///
/// # Errors
///
/// Returns an error if settings cannot be loaded or the S3 operator cannot be built.
pub fn select_backend_from_env() -> Result<Arc<dyn ObjectStore>, StorageError> {
    let settings =
        StorageSettings::load().map_err(|e| StorageError::configuration(e.to_string()))?;
    select_backend(&settings)
}
