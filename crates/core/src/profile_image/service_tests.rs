use std::sync::Arc;

use bytes::Bytes;
use proptest::prelude::*;
use stowage_shared::types::{ImageId, UserId};

use super::*;
use crate::storage::{InMemoryBackend, MOCK_URL_PREFIX, StorageError};

fn png(name: &str) -> NewImage {
    NewImage::new(Some(name), "image/png", Bytes::from_static(b"\x89PNG\r\n"))
}

fn service_with_backend() -> (ProfileImageService, Arc<InMemoryBackend>) {
    let backend = Arc::new(InMemoryBackend::new());
    let service = ProfileImageService::new(backend.clone());
    (service, backend)
}

fn key_of(url: &str) -> &str {
    url.strip_prefix(MOCK_URL_PREFIX).expect("mock url")
}

#[test]
fn test_image_key_format() {
    let user_id = UserId::new();
    let image_id = ImageId::new();

    let key = image_key(user_id, image_id, Some("Me.PNG"));
    assert_eq!(key, format!("profile-images/{user_id}/{image_id}.png"));
}

#[test]
fn test_image_key_without_extension_falls_back_to_jpg() {
    let user_id = UserId::new();
    let image_id = ImageId::new();

    assert!(image_key(user_id, image_id, None).ends_with(".jpg"));
    assert!(image_key(user_id, image_id, Some("photo")).ends_with(".jpg"));
}

#[tokio::test]
async fn test_upload_stores_under_user_folder() {
    let (service, backend) = service_with_backend();
    let user_id = UserId::new();

    let url = service.upload(user_id, png("me.png")).await.expect("upload");

    let key = key_of(&url);
    assert!(key.starts_with(&format!("profile-images/{user_id}/")));
    assert!(key.ends_with(".png"));
    let stored = backend.get(key).expect("stored");
    assert_eq!(stored.content_type, "image/png");
}

#[tokio::test]
async fn test_upload_rejects_invalid_image_without_storing() {
    let (service, backend) = service_with_backend();
    let gif = NewImage::new(Some("me.gif"), "image/gif", Bytes::from_static(b"GIF89a"));

    let err = service.upload(UserId::new(), gif).await.unwrap_err();

    assert!(matches!(err, ProfileImageError::InvalidImage(_)));
    assert!(backend.is_empty());
}

#[tokio::test]
async fn test_replace_deletes_previous_image() {
    let (service, backend) = service_with_backend();
    let user_id = UserId::new();

    let first = service.upload(user_id, png("a.png")).await.expect("upload");
    let second = service
        .replace(user_id, Some(&first), png("b.png"))
        .await
        .expect("replace");

    assert_ne!(first, second);
    assert!(backend.get(key_of(&first)).is_none());
    assert!(backend.get(key_of(&second)).is_some());
    assert_eq!(backend.len(), 1);
}

#[tokio::test]
async fn test_replace_ignores_unknown_previous_url() {
    let (service, backend) = service_with_backend();

    let url = service
        .replace(UserId::new(), Some("not-a-valid-url"), png("a.png"))
        .await
        .expect("replace should still upload");

    assert!(backend.get(key_of(&url)).is_some());
}

#[tokio::test]
async fn test_replace_keeps_previous_when_new_image_invalid() {
    let (service, backend) = service_with_backend();
    let user_id = UserId::new();
    let first = service.upload(user_id, png("a.png")).await.expect("upload");

    let oversized = NewImage::new(Some("b.png"), "image/png", vec![0u8; 16]);
    let service = service.with_policy(ImagePolicy::default().with_max_size(8));
    let err = service
        .replace(user_id, Some(&first), oversized)
        .await
        .unwrap_err();

    assert!(matches!(err, ProfileImageError::FileTooLarge { .. }));
    assert!(backend.get(key_of(&first)).is_some());
}

#[tokio::test]
async fn test_remove_twice() {
    let (service, _backend) = service_with_backend();
    let url = service.upload(UserId::new(), png("a.png")).await.expect("upload");

    assert!(service.remove(&url).await);
    assert!(!service.remove(&url).await);
    assert!(!service.remove("not-a-valid-url").await);
}

#[test]
fn test_backend_kind_is_reported() {
    let (service, _backend) = service_with_backend();
    assert_eq!(service.backend_kind(), BackendKind::InMemory);
}

#[test]
fn test_storage_error_converts() {
    let err: ProfileImageError = StorageError::malformed_url("x").into();
    assert!(matches!(err, ProfileImageError::Storage(_)));
}

// Keys always live under the owner's folder and keep an allowed extension.
proptest! {
    #[test]
    fn prop_image_key_layout(stem in "[a-zA-Z0-9_-]{1,20}", ext in "(png|PNG|jpg|JPEG)") {
        let user_id = UserId::new();
        let image_id = ImageId::new();
        let key = image_key(user_id, image_id, Some(&format!("{stem}.{ext}")));

        let parts: Vec<&str> = key.split('/').collect();
        prop_assert_eq!(parts.len(), 3);
        prop_assert_eq!(parts[0], IMAGE_KEY_PREFIX);
        prop_assert_eq!(parts[1], user_id.to_string());
        let expected_file = format!("{image_id}.{}", ext.to_ascii_lowercase());
        prop_assert_eq!(parts[2], expected_file.as_str());
    }
}
