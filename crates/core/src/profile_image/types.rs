//! Profile image types and validation rules.

use std::path::Path;

use bytes::Bytes;

use super::error::ProfileImageError;

/// An image received from a client, not yet stored.
#[derive(Debug, Clone)]
pub struct NewImage {
    /// Original filename, if the client sent one.
    pub filename: Option<String>,
    /// Declared content type (MIME type).
    pub content_type: String,
    /// Image bytes.
    pub data: Bytes,
}

impl NewImage {
    /// Create a new image payload.
    #[must_use]
    pub fn new(
        filename: Option<impl Into<String>>,
        content_type: impl Into<String>,
        data: impl Into<Bytes>,
    ) -> Self {
        Self {
            filename: filename.map(Into::into),
            content_type: content_type.into(),
            data: data.into(),
        }
    }

    /// Size in bytes.
    #[must_use]
    pub fn size(&self) -> u64 {
        u64::try_from(self.data.len()).unwrap_or(u64::MAX)
    }

    /// Lowercased extension of the filename including the dot, e.g. `.png`.
    #[must_use]
    pub fn extension(&self) -> Option<String> {
        file_extension(self.filename.as_deref()?)
    }
}

pub(crate) fn file_extension(filename: &str) -> Option<String> {
    Path::new(filename)
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| format!(".{}", ext.to_ascii_lowercase()))
}

/// Accepted image formats and size.
#[derive(Debug, Clone)]
pub struct ImagePolicy {
    /// Allowed content types.
    pub allowed_content_types: Vec<String>,
    /// Allowed lowercased extensions including the dot.
    pub allowed_extensions: Vec<String>,
    /// Maximum image size in bytes.
    pub max_size: u64,
}

impl Default for ImagePolicy {
    fn default() -> Self {
        Self {
            allowed_content_types: vec!["image/jpeg".to_string(), "image/png".to_string()],
            allowed_extensions: vec![".jpeg".to_string(), ".jpg".to_string(), ".png".to_string()],
            max_size: Self::DEFAULT_MAX_SIZE,
        }
    }
}

impl ImagePolicy {
    /// Default max image size: 10MB.
    pub const DEFAULT_MAX_SIZE: u64 = 10 * 1024 * 1024;

    /// Set maximum image size.
    #[must_use]
    pub fn with_max_size(mut self, size: u64) -> Self {
        self.max_size = size;
        self
    }

    /// Check an image against the policy.
    ///
    /// # Errors
    ///
    /// Returns `InvalidImage` for a disallowed content type or extension
    /// (a missing filename has no extension) and `FileTooLarge` past `max_size`.
    pub fn validate(&self, image: &NewImage) -> Result<(), ProfileImageError> {
        if !self
            .allowed_content_types
            .iter()
            .any(|t| t == &image.content_type)
        {
            return Err(ProfileImageError::invalid_image(format!(
                "content type '{}' is not allowed; only JPEG and PNG are accepted",
                image.content_type
            )));
        }

        let extension = image.extension().unwrap_or_default();
        if !self.allowed_extensions.iter().any(|e| e == &extension) {
            return Err(ProfileImageError::invalid_image(format!(
                "file extension '{extension}' is not allowed; only JPEG and PNG are accepted"
            )));
        }

        let size = image.size();
        if size > self.max_size {
            return Err(ProfileImageError::file_too_large(size, self.max_size));
        }

        Ok(())
    }
}
