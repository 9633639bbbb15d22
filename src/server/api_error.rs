//! Mapping of catalog, media and upload failures to HTTP responses.

use crate::catalog_store::CatalogError;
use crate::media::MediaError;
use crate::upload::UploadError;
use axum::{
    extract::{
        multipart::{MultipartError, MultipartRejection},
        rejection::{JsonRejection, PathRejection, QueryRejection},
    },
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;
use tracing::error;

#[derive(Serialize, Debug)]
pub struct ErrorResponse {
    pub error: String,
    pub kind: &'static str,
}

#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Catalog(#[from] CatalogError),

    #[error(transparent)]
    Media(#[from] MediaError),

    #[error("Invalid upload: {}", .0.body_text())]
    Multipart(#[from] MultipartError),

    #[error("{0}")]
    BadRequest(String),

    /// A request that axum could not parse into the handler's arguments.
    #[error("{message}")]
    Rejected { status: StatusCode, message: String },
}

macro_rules! impl_from_rejection {
    ($($rejection:ty),+) => {
        $(
            impl From<$rejection> for ApiError {
                fn from(rejection: $rejection) -> Self {
                    ApiError::Rejected {
                        status: rejection.status(),
                        message: rejection.body_text(),
                    }
                }
            }
        )+
    };
}

impl_from_rejection!(JsonRejection, PathRejection, QueryRejection, MultipartRejection);

impl From<UploadError> for ApiError {
    fn from(err: UploadError) -> Self {
        match err {
            UploadError::Catalog(e) => ApiError::Catalog(e),
            UploadError::Media(e) => ApiError::Media(e),
        }
    }
}

impl ApiError {
    pub fn status_and_kind(&self) -> (StatusCode, &'static str) {
        match self {
            ApiError::Catalog(CatalogError::NotFound { .. })
            | ApiError::Catalog(CatalogError::NoSearchResults { .. }) => {
                (StatusCode::NOT_FOUND, "not_found")
            }
            ApiError::Catalog(CatalogError::Validation(_)) => {
                (StatusCode::UNPROCESSABLE_ENTITY, "validation")
            }
            ApiError::Catalog(CatalogError::Conflict(_)) => (StatusCode::CONFLICT, "conflict"),
            ApiError::Media(MediaError::InvalidFilename(_)) | ApiError::BadRequest(_) => {
                (StatusCode::BAD_REQUEST, "bad_request")
            }
            ApiError::Multipart(e) => (e.status(), "bad_request"),
            ApiError::Rejected { status, .. } => (*status, "bad_request"),
            ApiError::Catalog(CatalogError::Storage(_)) | ApiError::Media(MediaError::Io(_)) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "internal")
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, kind) = self.status_and_kind();
        let message = if status == StatusCode::INTERNAL_SERVER_ERROR {
            error!("Request failed: {:#}", self);
            "Internal server error".to_string()
        } else {
            self.to_string()
        };
        (
            status,
            Json(ErrorResponse {
                error: message,
                kind,
            }),
        )
            .into_response()
    }
}
