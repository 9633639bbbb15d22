//! HTTP client for end-to-end tests
//!
//! Wraps reqwest with one method per server endpoint. When routes or request
//! formats change, update only this file.

use super::constants::*;
use reqwest::multipart::{Form, Part};
use reqwest::Response;
use serde_json::Value;
use std::time::Duration;

pub struct TestClient {
    /// The underlying reqwest client (public for custom requests in tests)
    pub client: reqwest::Client,
    pub base_url: String,
}

impl TestClient {
    /// Redirects are not followed so tests can assert on them.
    pub fn new(base_url: String) -> Self {
        let client = reqwest::Client::builder()
            .redirect(reqwest::redirect::Policy::none())
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .expect("Failed to build reqwest client");

        Self { client, base_url }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn get(&self, path: &str) -> Response {
        self.client
            .get(self.url(path))
            .send()
            .await
            .expect("Request failed")
    }

    async fn post_json(&self, path: &str, body: &Value) -> Response {
        self.client
            .post(self.url(path))
            .json(body)
            .send()
            .await
            .expect("Request failed")
    }

    async fn put_json(&self, path: &str, body: &Value) -> Response {
        self.client
            .put(self.url(path))
            .json(body)
            .send()
            .await
            .expect("Request failed")
    }

    async fn delete(&self, path: &str) -> Response {
        self.client
            .delete(self.url(path))
            .send()
            .await
            .expect("Request failed")
    }

    fn file_form(filename: &str, data: &[u8]) -> Form {
        Form::new().part("file", Part::bytes(data.to_vec()).file_name(filename.to_string()))
    }

    // ========================================================================
    // HTML pages and static media
    // ========================================================================

    pub async fn get_home(&self) -> Response {
        self.get("/").await
    }

    pub async fn get_track_page(&self, id: i64) -> Response {
        self.get(&format!("/tracks/{}", id)).await
    }

    pub async fn upload_form(&self, filename: &str, data: &[u8]) -> Response {
        self.client
            .post(self.url("/tracks/upload"))
            .multipart(Self::file_form(filename, data))
            .send()
            .await
            .expect("Request failed")
    }

    /// GET a public path such as `/static/uploads/a.mp3`.
    pub async fn get_static(&self, public_path: &str) -> Response {
        self.get(public_path).await
    }

    pub async fn get_stats(&self) -> Response {
        self.get("/v1/").await
    }

    // ========================================================================
    // Tracks
    // ========================================================================

    pub async fn list_tracks(&self) -> Response {
        self.get("/v1/catalog/tracks").await
    }

    pub async fn get_track(&self, id: i64) -> Response {
        self.get(&format!("/v1/catalog/tracks/{}", id)).await
    }

    pub async fn search_tracks(&self, query: &str) -> Response {
        self.client
            .get(self.url("/v1/catalog/tracks/search"))
            .query(&[("query", query)])
            .send()
            .await
            .expect("Request failed")
    }

    pub async fn create_track(&self, body: &Value) -> Response {
        self.post_json("/v1/catalog/tracks", body).await
    }

    pub async fn update_track(&self, id: i64, body: &Value) -> Response {
        self.put_json(&format!("/v1/catalog/tracks/{}", id), body)
            .await
    }

    pub async fn delete_track(&self, id: i64) -> Response {
        self.delete(&format!("/v1/catalog/tracks/{}", id)).await
    }

    pub async fn upload_track(&self, filename: &str, data: &[u8]) -> Response {
        self.client
            .post(self.url("/v1/catalog/tracks/upload"))
            .multipart(Self::file_form(filename, data))
            .send()
            .await
            .expect("Request failed")
    }

    // ========================================================================
    // Authors
    // ========================================================================

    pub async fn list_authors(&self) -> Response {
        self.get("/v1/catalog/authors").await
    }

    pub async fn create_author(&self, body: &Value) -> Response {
        self.post_json("/v1/catalog/authors", body).await
    }

    pub async fn delete_author(&self, id: i64) -> Response {
        self.delete(&format!("/v1/catalog/authors/{}", id)).await
    }

    pub async fn list_author_tracks(&self, id: i64) -> Response {
        self.get(&format!("/v1/catalog/authors/{}/tracks", id))
            .await
    }

    // ========================================================================
    // Users
    // ========================================================================

    pub async fn get_user(&self, id: i64) -> Response {
        self.get(&format!("/v1/catalog/users/{}", id)).await
    }

    pub async fn create_user(&self, body: &Value) -> Response {
        self.post_json("/v1/catalog/users", body).await
    }

    pub async fn update_user(&self, id: i64, body: &Value) -> Response {
        self.put_json(&format!("/v1/catalog/users/{}", id), body)
            .await
    }

    pub async fn delete_user(&self, id: i64) -> Response {
        self.delete(&format!("/v1/catalog/users/{}", id)).await
    }

    pub async fn list_user_playlists(&self, id: i64) -> Response {
        self.get(&format!("/v1/catalog/users/{}/playlists", id))
            .await
    }

    // ========================================================================
    // Playlists
    // ========================================================================

    pub async fn list_playlists(&self) -> Response {
        self.get("/v1/catalog/playlists").await
    }

    pub async fn get_playlist(&self, id: i64) -> Response {
        self.get(&format!("/v1/catalog/playlists/{}", id)).await
    }

    pub async fn create_playlist(&self, body: &Value) -> Response {
        self.post_json("/v1/catalog/playlists", body).await
    }

    pub async fn update_playlist(&self, id: i64, body: &Value) -> Response {
        self.put_json(&format!("/v1/catalog/playlists/{}", id), body)
            .await
    }

    pub async fn delete_playlist(&self, id: i64) -> Response {
        self.delete(&format!("/v1/catalog/playlists/{}", id)).await
    }

    pub async fn list_playlist_tracks(&self, id: i64) -> Response {
        self.get(&format!("/v1/catalog/playlists/{}/tracks", id))
            .await
    }

    pub async fn add_playlist_track(&self, id: i64, track_id: i64) -> Response {
        self.client
            .put(self.url(&format!("/v1/catalog/playlists/{}/tracks/{}", id, track_id)))
            .send()
            .await
            .expect("Request failed")
    }

    pub async fn remove_playlist_track(&self, id: i64, track_id: i64) -> Response {
        self.delete(&format!("/v1/catalog/playlists/{}/tracks/{}", id, track_id))
            .await
    }
}
