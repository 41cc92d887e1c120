//! HTTP API layer with Axum routes.
//!
//! This crate provides:
//! - Profile image upload and delete routes
//! - Health check with the selected storage backend
//! - JSON error responses built from `AppError`

pub mod error;
pub mod routes;

use std::sync::Arc;

use axum::Router;
use axum::extract::DefaultBodyLimit;
use stowage_core::profile_image::{ImagePolicy, ProfileImageService};
use stowage_core::storage::ObjectStore;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

/// Room for multipart boundaries and headers on top of the image itself.
const MULTIPART_OVERHEAD: u64 = 1024 * 1024;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    /// Storage backend selected at startup.
    pub storage: Arc<dyn ObjectStore>,
    /// Profile image service backed by `storage`.
    pub images: Arc<ProfileImageService>,
}

impl AppState {
    /// Build state around the backend chosen at startup.
    #[must_use]
    pub fn new(storage: Arc<dyn ObjectStore>) -> Self {
        let images = Arc::new(ProfileImageService::new(storage.clone()));
        Self { storage, images }
    }

    /// Build state whose image service applies `policy` instead of the default.
    #[must_use]
    pub fn with_policy(storage: Arc<dyn ObjectStore>, policy: ImagePolicy) -> Self {
        let images = Arc::new(ProfileImageService::new(storage.clone()).with_policy(policy));
        Self { storage, images }
    }
}

/// Creates the main application router.
pub fn create_router(state: AppState) -> Router {
    let body_limit = state
        .images
        .policy()
        .max_size
        .saturating_add(MULTIPART_OVERHEAD);

    Router::new()
        .nest("/api/v1", routes::api_routes())
        .layer(DefaultBodyLimit::max(
            usize::try_from(body_limit).unwrap_or(usize::MAX),
        ))
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}
