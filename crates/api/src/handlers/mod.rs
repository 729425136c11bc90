//! HTTP handlers, one module per resource.
//!
//! Handlers run the derive-based form validations, call into the
//! service layer, and translate the resulting envelope with
//! [`respond`](crate::error::respond).

pub mod address;
pub mod auth;
pub mod client;
pub mod member;
pub mod notification;
pub mod profile;
pub mod project;
pub mod role;
pub mod status;

use axum::body::Bytes;
use axum::extract::Multipart;

use atelier_service::storage::StorageError;

use crate::error::AppError;

/// Pull the first file field out of a multipart image upload.
///
/// Returns the raw bytes and the client-supplied file name (only its
/// extension survives into storage). Rejects uploads with no file field.
pub(crate) async fn image_upload(multipart: &mut Multipart) -> Result<(Bytes, String), AppError> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(e.to_string()))?
    {
        let Some(file_name) = field.file_name().map(str::to_string) else {
            continue;
        };
        let bytes = field
            .bytes()
            .await
            .map_err(|e| AppError::BadRequest(e.to_string()))?;
        return Ok((bytes, file_name));
    }

    Err(AppError::BadRequest(
        "No file received in multipart upload".to_string(),
    ))
}

/// Map a storage failure onto the HTTP error taxonomy.
pub(crate) fn storage_error(err: StorageError) -> AppError {
    match err {
        StorageError::UnsupportedExtension(_) => AppError::BadRequest(err.to_string()),
        StorageError::Io(e) => AppError::InternalError(format!("Failed to store upload: {e}")),
    }
}
