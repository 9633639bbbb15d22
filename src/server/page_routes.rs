//! HTML pages: the track listing and the playback page.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};

use super::api_error::ApiError;
use super::state::GuardedPageRenderer;
use crate::catalog::CatalogService;
use crate::catalog_store::CatalogError;

/// GET /
pub async fn home(
    State(catalog): State<CatalogService>,
    State(renderer): State<GuardedPageRenderer>,
) -> Result<Html<String>, ApiError> {
    let tracks = catalog.list_tracks()?;
    Ok(Html(renderer.render_index(&tracks)))
}

/// GET /tracks/{id}
pub async fn track_page(
    State(catalog): State<CatalogService>,
    State(renderer): State<GuardedPageRenderer>,
    Path(id): Path<i64>,
) -> Response {
    match catalog.get_track(id) {
        Ok(track) => Html(renderer.render_track(&track)).into_response(),
        Err(CatalogError::NotFound { .. }) => {
            (StatusCode::NOT_FOUND, Html(renderer.render_not_found())).into_response()
        }
        Err(err) => ApiError::from(err).into_response(),
    }
}
