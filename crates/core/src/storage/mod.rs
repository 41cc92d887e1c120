//! Object storage for user uploads using Apache OpenDAL.
//!
//! Two interchangeable backends implement [`ObjectStore`]:
//! - [`RemoteBackend`]: S3 through an OpenDAL operator
//! - [`InMemoryBackend`]: process-local map, used when no credentials are configured
//!
//! [`select_backend`] picks one of them from [`StorageSettings`]. It is meant to be
//! called once at startup; the returned handle is shared with every consumer.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                 Arc<dyn ObjectStore>                          │
//! │   upload(content, path, type) -> url  │  delete(url) -> bool  │
//! ├──────────────────────────────┬───────────────────────────────┤
//! │ RemoteBackend (S3/OpenDAL)   │ InMemoryBackend (DashMap)     │
//! │ https://<bucket>.s3...com/.. │ https://mock-storage.local/.. │
//! └──────────────────────────────┴───────────────────────────────┘
//! ```

mod backend;
mod config;
mod error;
mod memory;
mod remote;
mod selector;

pub use backend::{BackendKind, ObjectStore};
pub use config::{DEFAULT_BUCKET, DEFAULT_REGION, StorageSettings};
pub use error::StorageError;
pub use memory::{InMemoryBackend, MOCK_URL_PREFIX, StoredObject};
pub use remote::{RemoteBackend, S3_DOMAIN};
pub use selector::{select_backend, select_backend_from_env};
