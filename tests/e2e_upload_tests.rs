//! End-to-end tests for file uploads

mod common;

use common::*;
use reqwest::StatusCode;
use serde_json::Value;

#[tokio::test]
async fn test_api_upload_creates_track_and_serves_file() {
    let server = TestServer::spawn().await;
    let client = TestClient::new(server.base_url.clone());

    let response = client.upload_track("evening.mp3", b"ID3 audio bytes").await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let track: Value = response.json().await.unwrap();
    assert_eq!(track["title"], "evening.mp3");
    assert_eq!(track["artist"], "Unknown");
    assert_eq!(track["path"], "/static/uploads/evening.mp3");

    assert!(server.uploads_dir().join("evening.mp3").exists());

    let response = client.get_static("/static/uploads/evening.mp3").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.bytes().await.unwrap().as_ref(), b"ID3 audio bytes");
}

#[tokio::test]
async fn test_form_upload_redirects_to_listing() {
    let server = TestServer::spawn().await;
    let client = TestClient::new(server.base_url.clone());

    let response = client.upload_form("lullaby.m4a", b"ftyp").await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(response.headers()["location"], "/");

    let page = client.get_home().await.text().await.unwrap();
    assert!(page.contains("lullaby.m4a - Unknown"));
}

#[tokio::test]
async fn test_upload_is_validated_before_writing() {
    let server = TestServer::spawn().await;
    let client = TestClient::new(server.base_url.clone());

    let response = client.upload_track("readme.txt", b"hello").await;
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    assert!(!server.uploads_dir().join("readme.txt").exists());

    let tracks = server.catalog.list_tracks().unwrap();
    assert_eq!(tracks.len(), 2);
}

#[tokio::test]
async fn test_upload_overwrites_same_filename() {
    let server = TestServer::spawn().await;
    let client = TestClient::new(server.base_url.clone());

    client.upload_track("repeat.ogg", b"first").await;
    client.upload_track("repeat.ogg", b"second").await;

    let stored = std::fs::read(server.uploads_dir().join("repeat.ogg")).unwrap();
    assert_eq!(stored, b"second");
    assert_eq!(server.catalog.search_tracks("repeat").unwrap().len(), 2);
}

#[tokio::test]
async fn test_upload_without_file_field() {
    let server = TestServer::spawn().await;
    let client = TestClient::new(server.base_url.clone());

    let form = reqwest::multipart::Form::new().text("note", "no file here");
    let response = client
        .client
        .post(format!("{}/v1/catalog/tracks/upload", server.base_url))
        .multipart(form)
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let error: Value = response.json().await.unwrap();
    assert_eq!(error["kind"], "bad_request");
}

#[tokio::test]
async fn test_upload_over_limit() {
    let server = TestServer::spawn_with_upload_limit(1024).await;
    let client = TestClient::new(server.base_url.clone());

    let response = client.upload_track("huge.wav", &vec![0u8; 8 * 1024]).await;
    assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
    assert_eq!(server.catalog.list_tracks().unwrap().len(), 2);
}
