//! Image upload endpoint for featured images and team photos.
//!
//! Files are type-checked by magic bytes, size-capped, and stored under
//! random names; the stored directory is served statically at /uploads.

use axum::extract::{Multipart, State};
use serde::Serialize;
use uuid::Uuid;

use super::{created, ApiResult};
use crate::errors::AppError;
use crate::AppState;

/// Upper bound enforced by the handler; the route's body limit sits just
/// above it so oversize files reach the friendlier validation error.
pub const MAX_FILE_SIZE: usize = 5 * 1024 * 1024; // 5MB

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadedFile {
    pub url: String,
    pub filename: String,
    pub size: usize,
    pub mime_type: String,
}

fn sniff_image_type(bytes: &[u8]) -> Option<(&'static str, &'static str)> {
    match bytes {
        [0xFF, 0xD8, 0xFF, ..] => Some(("image/jpeg", "jpg")),
        [0x89, 0x50, 0x4E, 0x47, ..] => Some(("image/png", "png")),
        [0x47, 0x49, 0x46, 0x38, ..] => Some(("image/gif", "gif")),
        [0x52, 0x49, 0x46, 0x46, _, _, _, _, 0x57, 0x45, 0x42, 0x50, ..] => {
            Some(("image/webp", "webp"))
        }
        _ => None,
    }
}

/// POST /api/uploads - Store an image from a multipart form.
pub async fn upload_image(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> ApiResult<UploadedFile> {
    let field = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(format!("Invalid multipart body: {}", e)))?
        .ok_or_else(|| AppError::BadRequest("No file field in request".to_string()))?;

    let bytes = field
        .bytes()
        .await
        .map_err(|e| AppError::BadRequest(format!("Failed to read file: {}", e)))?;

    if bytes.len() > MAX_FILE_SIZE {
        return Err(AppError::Validation(vec![crate::errors::FieldViolation::new(
            "file",
            "File exceeds the 5MB size limit",
        )]));
    }

    let (mime_type, extension) = sniff_image_type(&bytes).ok_or_else(|| {
        AppError::Validation(vec![crate::errors::FieldViolation::new(
            "file",
            "File must be a JPEG, PNG, GIF, or WebP image",
        )])
    })?;

    let filename = format!("{}.{}", Uuid::new_v4(), extension);
    let uploads_dir = &state.config.uploads_path;

    tokio::fs::create_dir_all(uploads_dir)
        .await
        .map_err(|e| AppError::Internal(format!("Failed to create uploads directory: {}", e)))?;
    tokio::fs::write(uploads_dir.join(&filename), &bytes)
        .await
        .map_err(|e| AppError::Internal(format!("Failed to store file: {}", e)))?;

    created(UploadedFile {
        url: format!("/uploads/{}", filename),
        size: bytes.len(),
        mime_type: mime_type.to_string(),
        filename,
    })
}

/// DELETE /api/uploads/{filename} - Remove a stored image.
pub async fn delete_upload(
    State(state): State<AppState>,
    axum::extract::Path(filename): axum::extract::Path<String>,
) -> ApiResult<()> {
    // Stored names are uuid.ext; anything else is not ours
    if filename.contains("..") || filename.contains('/') || filename.contains('\\') {
        return Err(AppError::BadRequest("Invalid filename".to_string()));
    }

    let path = state.config.uploads_path.join(&filename);
    match tokio::fs::remove_file(&path).await {
        Ok(()) => super::success_msg((), "File deleted"),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Err(AppError::NotFound(format!(
            "File '{}' not found",
            filename
        ))),
        Err(e) => Err(AppError::Internal(format!("Failed to delete file: {}", e))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sniffs_common_image_types() {
        assert_eq!(
            sniff_image_type(&[0xFF, 0xD8, 0xFF, 0xE0]),
            Some(("image/jpeg", "jpg"))
        );
        assert_eq!(
            sniff_image_type(&[0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A]),
            Some(("image/png", "png"))
        );
        assert_eq!(sniff_image_type(b"GIF89a"), Some(("image/gif", "gif")));
        assert_eq!(
            sniff_image_type(b"RIFF\x00\x00\x00\x00WEBPVP8 "),
            Some(("image/webp", "webp"))
        );
        assert_eq!(sniff_image_type(b"plain text"), None);
    }
}
