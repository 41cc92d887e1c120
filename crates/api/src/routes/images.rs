//! Profile image endpoints.

use axum::extract::multipart::MultipartError;
use axum::extract::{Multipart, Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::{delete, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use stowage_core::profile_image::NewImage;
use stowage_shared::AppError;
use stowage_shared::types::UserId;
use tracing::info;

use crate::AppState;
use crate::error::ApiError;

/// Multipart field carrying the image.
const FILE_FIELD: &str = "file";
/// Optional multipart field naming the image to replace.
const PREVIOUS_URL_FIELD: &str = "previous_url";

/// Response after a successful upload.
#[derive(Debug, Serialize, Deserialize)]
pub struct UploadImageResponse {
    /// URL of the stored image.
    pub url: String,
}

/// Request to delete an image.
#[derive(Debug, Serialize, Deserialize)]
pub struct DeleteImageRequest {
    /// URL returned by a previous upload.
    pub url: String,
}

/// Outcome of a delete.
#[derive(Debug, Serialize, Deserialize)]
pub struct DeleteImageResponse {
    /// Whether an object was removed.
    pub deleted: bool,
}

/// Fields pulled out of an upload form.
struct UploadForm {
    image: NewImage,
    previous_url: Option<String>,
}

/// Over-limit bodies surface while reading parts; keep them distinct from malformed forms.
fn multipart_error(err: &MultipartError) -> AppError {
    if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
        AppError::PayloadTooLarge(err.body_text())
    } else {
        AppError::Validation(err.body_text())
    }
}

async fn read_upload_form(mut multipart: Multipart) -> Result<UploadForm, AppError> {
    let mut image = None;
    let mut previous_url = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| multipart_error(&e))?
    {
        let name = field.name().map(str::to_string);
        match name.as_deref() {
            Some(FILE_FIELD) => {
                let filename = field.file_name().map(str::to_string);
                let content_type = field.content_type().unwrap_or_default().to_string();
                let data = field
                    .bytes()
                    .await
                    .map_err(|e| multipart_error(&e))?;
                image = Some(NewImage::new(filename, content_type, data));
            }
            Some(PREVIOUS_URL_FIELD) => {
                let url = field
                    .text()
                    .await
                    .map_err(|e| multipart_error(&e))?;
                previous_url = Some(url).filter(|u| !u.is_empty());
            }
            _ => {}
        }
    }

    let image =
        image.ok_or_else(|| AppError::Validation(format!("missing '{FILE_FIELD}' field")))?;
    Ok(UploadForm {
        image,
        previous_url,
    })
}

/// POST `/users/{user_id}/image`
/// Upload a profile image, replacing `previous_url` when given.
async fn upload_image(
    State(state): State<AppState>,
    Path(user_id): Path<UserId>,
    multipart: Multipart,
) -> Result<impl IntoResponse, ApiError> {
    let form = read_upload_form(multipart).await?;

    let url = state
        .images
        .replace(user_id, form.previous_url.as_deref(), form.image)
        .await?;

    info!(user_id = %user_id, url = %url, "Profile image stored");
    Ok((StatusCode::CREATED, Json(UploadImageResponse { url })))
}

/// DELETE `/images`
/// Best-effort delete of a previously uploaded image.
async fn delete_image(
    State(state): State<AppState>,
    Json(payload): Json<DeleteImageRequest>,
) -> Json<DeleteImageResponse> {
    let deleted = state.images.remove(&payload.url).await;
    Json(DeleteImageResponse { deleted })
}

/// Creates image routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/users/{user_id}/image", post(upload_image))
        .route("/images", delete(delete_image))
}

#[cfg(test)]
#[path = "images_tests.rs"]
mod tests;
