//! Multipart upload endpoints, for API clients and for the HTML form.

use axum::{
    body::Bytes,
    extract::{multipart::MultipartRejection, Multipart, State},
    http::StatusCode,
    response::{IntoResponse, Redirect},
    Json,
};
use tracing::warn;

use super::api_error::ApiError;
use crate::upload::UploadHandler;

/// Multipart field carrying the uploaded file.
pub const FILE_FIELD: &str = "file";

/// Pulls the `file` field out of the form. Other fields are ignored.
async fn read_file_field(multipart: &mut Multipart) -> Result<(String, Bytes), ApiError> {
    while let Some(field) = multipart.next_field().await? {
        if field.name() != Some(FILE_FIELD) {
            continue;
        }
        let filename = match field.file_name() {
            Some(name) if !name.is_empty() => name.to_string(),
            _ => return Err(ApiError::BadRequest("No filename provided".to_string())),
        };
        let data = field.bytes().await.map_err(|e| {
            warn!("Failed to read upload '{}': {}", filename, e);
            e
        })?;
        return Ok((filename, data));
    }
    Err(ApiError::BadRequest(format!(
        "Missing '{}' field",
        FILE_FIELD
    )))
}

/// POST /v1/catalog/tracks/upload
pub async fn upload_track(
    State(uploads): State<UploadHandler>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let mut multipart = multipart?;
    let (filename, data) = read_file_field(&mut multipart).await?;
    let track = uploads.upload(&filename, &data).await?;
    Ok((StatusCode::CREATED, Json(track)))
}

/// POST /tracks/upload, sends the browser back to the listing.
pub async fn upload_track_form(
    State(uploads): State<UploadHandler>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Redirect, ApiError> {
    let mut multipart = multipart?;
    let (filename, data) = read_file_field(&mut multipart).await?;
    uploads.upload(&filename, &data).await?;
    Ok(Redirect::to("/"))
}
