//! JSON API over the catalog, mounted under `/v1/catalog`.

use axum::{
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    routing::{get, put},
    Json, Router,
};
use serde::{Deserialize, Serialize};

use super::api_error::ApiError;
use super::extract::{ApiJson, ApiPath, ApiQuery};
use super::state::ServerState;
use crate::catalog::CatalogService;
use crate::catalog_store::*;

type ApiResult<T> = Result<T, ApiError>;

#[derive(Serialize, Deserialize, Debug)]
pub struct MessageResponse {
    pub message: String,
}

fn message(text: &str) -> Json<MessageResponse> {
    Json(MessageResponse {
        message: text.to_string(),
    })
}

#[derive(Deserialize, Debug)]
struct SearchParams {
    query: String,
}

// =============================================================================
// Tracks
// =============================================================================

async fn list_tracks(State(catalog): State<CatalogService>) -> ApiResult<Json<Vec<Track>>> {
    Ok(Json(catalog.list_tracks()?))
}

async fn get_track(
    State(catalog): State<CatalogService>,
    ApiPath(id): ApiPath<i64>,
) -> ApiResult<Json<Track>> {
    Ok(Json(catalog.get_track(id)?))
}

async fn search_tracks(
    State(catalog): State<CatalogService>,
    ApiQuery(params): ApiQuery<SearchParams>,
) -> ApiResult<Json<Vec<Track>>> {
    Ok(Json(catalog.search_tracks(&params.query)?))
}

async fn create_track(
    State(catalog): State<CatalogService>,
    ApiJson(body): ApiJson<NewTrack>,
) -> ApiResult<impl IntoResponse> {
    let track = catalog.create_track(body)?;
    Ok((StatusCode::CREATED, Json(track)))
}

async fn update_track(
    State(catalog): State<CatalogService>,
    ApiPath(id): ApiPath<i64>,
    ApiJson(body): ApiJson<TrackUpdate>,
) -> ApiResult<Json<MessageResponse>> {
    catalog.update_track(id, body)?;
    Ok(message("Track updated"))
}

async fn delete_track(
    State(catalog): State<CatalogService>,
    ApiPath(id): ApiPath<i64>,
) -> ApiResult<Json<MessageResponse>> {
    catalog.delete_track(id)?;
    Ok(message("Track deleted"))
}

// =============================================================================
// Authors
// =============================================================================

async fn list_authors(State(catalog): State<CatalogService>) -> ApiResult<Json<Vec<Author>>> {
    Ok(Json(catalog.list_authors()?))
}

async fn get_author(
    State(catalog): State<CatalogService>,
    ApiPath(id): ApiPath<i64>,
) -> ApiResult<Json<Author>> {
    Ok(Json(catalog.get_author(id)?))
}

async fn create_author(
    State(catalog): State<CatalogService>,
    ApiJson(body): ApiJson<NewAuthor>,
) -> ApiResult<impl IntoResponse> {
    let author = catalog.create_author(body)?;
    Ok((StatusCode::CREATED, Json(author)))
}

async fn update_author(
    State(catalog): State<CatalogService>,
    ApiPath(id): ApiPath<i64>,
    ApiJson(body): ApiJson<AuthorUpdate>,
) -> ApiResult<Json<MessageResponse>> {
    catalog.update_author(id, body)?;
    Ok(message("Author updated"))
}

async fn delete_author(
    State(catalog): State<CatalogService>,
    ApiPath(id): ApiPath<i64>,
) -> ApiResult<Json<MessageResponse>> {
    catalog.delete_author(id)?;
    Ok(message("Author deleted"))
}

async fn list_author_tracks(
    State(catalog): State<CatalogService>,
    ApiPath(id): ApiPath<i64>,
) -> ApiResult<Json<Vec<Track>>> {
    Ok(Json(catalog.list_author_tracks(id)?))
}

// =============================================================================
// Users
// =============================================================================

async fn list_users(State(catalog): State<CatalogService>) -> ApiResult<Json<Vec<User>>> {
    Ok(Json(catalog.list_users()?))
}

async fn get_user(
    State(catalog): State<CatalogService>,
    ApiPath(id): ApiPath<i64>,
) -> ApiResult<Json<User>> {
    Ok(Json(catalog.get_user(id)?))
}

async fn create_user(
    State(catalog): State<CatalogService>,
    ApiJson(body): ApiJson<NewUser>,
) -> ApiResult<impl IntoResponse> {
    let user = catalog.create_user(body)?;
    Ok((StatusCode::CREATED, Json(user)))
}

async fn update_user(
    State(catalog): State<CatalogService>,
    ApiPath(id): ApiPath<i64>,
    ApiJson(body): ApiJson<UserUpdate>,
) -> ApiResult<Json<MessageResponse>> {
    catalog.update_user(id, body)?;
    Ok(message("User updated"))
}

async fn delete_user(
    State(catalog): State<CatalogService>,
    ApiPath(id): ApiPath<i64>,
) -> ApiResult<Json<MessageResponse>> {
    catalog.delete_user(id)?;
    Ok(message("User deleted"))
}

async fn list_user_playlists(
    State(catalog): State<CatalogService>,
    ApiPath(id): ApiPath<i64>,
) -> ApiResult<Json<Vec<Playlist>>> {
    Ok(Json(catalog.list_user_playlists(id)?))
}

// =============================================================================
// Playlists
// =============================================================================

async fn list_playlists(State(catalog): State<CatalogService>) -> ApiResult<Json<Vec<Playlist>>> {
    Ok(Json(catalog.list_playlists()?))
}

async fn get_playlist(
    State(catalog): State<CatalogService>,
    ApiPath(id): ApiPath<i64>,
) -> ApiResult<Json<Playlist>> {
    Ok(Json(catalog.get_playlist(id)?))
}

async fn create_playlist(
    State(catalog): State<CatalogService>,
    ApiJson(body): ApiJson<NewPlaylist>,
) -> ApiResult<impl IntoResponse> {
    let playlist = catalog.create_playlist(body)?;
    Ok((StatusCode::CREATED, Json(playlist)))
}

async fn update_playlist(
    State(catalog): State<CatalogService>,
    ApiPath(id): ApiPath<i64>,
    ApiJson(body): ApiJson<PlaylistUpdate>,
) -> ApiResult<Json<MessageResponse>> {
    catalog.update_playlist(id, body)?;
    Ok(message("Playlist updated"))
}

async fn delete_playlist(
    State(catalog): State<CatalogService>,
    ApiPath(id): ApiPath<i64>,
) -> ApiResult<Json<MessageResponse>> {
    catalog.delete_playlist(id)?;
    Ok(message("Playlist deleted"))
}

async fn list_playlist_tracks(
    State(catalog): State<CatalogService>,
    ApiPath(id): ApiPath<i64>,
) -> ApiResult<Json<Vec<Track>>> {
    Ok(Json(catalog.list_playlist_tracks(id)?))
}

async fn add_playlist_track(
    State(catalog): State<CatalogService>,
    ApiPath((id, track_id)): ApiPath<(i64, i64)>,
) -> ApiResult<Json<MessageResponse>> {
    catalog.add_playlist_track(id, track_id)?;
    Ok(message("Track added to playlist"))
}

async fn remove_playlist_track(
    State(catalog): State<CatalogService>,
    ApiPath((id, track_id)): ApiPath<(i64, i64)>,
) -> ApiResult<Json<MessageResponse>> {
    catalog.remove_playlist_track(id, track_id)?;
    Ok(message("Track removed from playlist"))
}

/// Catalog JSON routes. The upload endpoint is added by the caller since it
/// carries its own body limit.
pub fn make_catalog_routes(state: ServerState) -> Router {
    Router::new()
        .route("/tracks", get(list_tracks).post(create_track))
        .route("/tracks/search", get(search_tracks))
        .route(
            "/tracks/{id}",
            get(get_track).put(update_track).delete(delete_track),
        )
        .route("/authors", get(list_authors).post(create_author))
        .route(
            "/authors/{id}",
            get(get_author).put(update_author).delete(delete_author),
        )
        .route("/authors/{id}/tracks", get(list_author_tracks))
        .route("/users", get(list_users).post(create_user))
        .route(
            "/users/{id}",
            get(get_user).put(update_user).delete(delete_user),
        )
        .route("/users/{id}/playlists", get(list_user_playlists))
        .route("/playlists", get(list_playlists).post(create_playlist))
        .route(
            "/playlists/{id}",
            get(get_playlist).put(update_playlist).delete(delete_playlist),
        )
        .route("/playlists/{id}/tracks", get(list_playlist_tracks))
        .route(
            "/playlists/{id}/tracks/{track_id}",
            put(add_playlist_track).delete(remove_playlist_track),
        )
        .with_state(state)
}
