//! End-to-end tests for authors, users and playlists

mod common;

use common::*;
use reqwest::StatusCode;
use serde_json::{json, Value};

#[tokio::test]
async fn test_duplicate_user_fields_conflict() {
    let server = TestServer::spawn().await;
    let client = TestClient::new(server.base_url.clone());

    let response = client
        .create_user(&json!({"username": USER_1_NAME, "email": "other@example.com"}))
        .await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
    let error: Value = response.json().await.unwrap();
    assert_eq!(error["kind"], "conflict");

    let response = client
        .create_user(&json!({"username": "bob", "email": "bob@example.com"}))
        .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let bob: Value = response.json().await.unwrap();

    let response = client
        .update_user(bob["id"].as_i64().unwrap(), &json!({"email": USER_1_EMAIL}))
        .await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_playlist_lifecycle() {
    let server = TestServer::spawn().await;
    let client = TestClient::new(server.base_url.clone());

    let response = client
        .create_playlist(&json!({"name": "Commute", "owner_id": USER_1_ID}))
        .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let playlist: Value = response.json().await.unwrap();
    let playlist_id = playlist["id"].as_i64().unwrap();

    for track_id in [TRACK_1_ID, TRACK_2_ID, TRACK_1_ID] {
        let response = client.add_playlist_track(playlist_id, track_id).await;
        assert_eq!(response.status(), StatusCode::OK);
    }
    let tracks: Vec<Value> = client
        .list_playlist_tracks(playlist_id)
        .await
        .json()
        .await
        .unwrap();
    assert_eq!(tracks.len(), 2);

    let response = client.remove_playlist_track(playlist_id, TRACK_1_ID).await;
    assert_eq!(response.status(), StatusCode::OK);
    let response = client.remove_playlist_track(playlist_id, TRACK_1_ID).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = client
        .update_playlist(playlist_id, &json!({"name": "Evening Commute"}))
        .await;
    assert_eq!(response.status(), StatusCode::OK);
    let renamed: Value = client.get_playlist(playlist_id).await.json().await.unwrap();
    assert_eq!(renamed["name"], "Evening Commute");
    assert_eq!(renamed["owner_id"], USER_1_ID);

    let owned: Vec<Value> = client
        .list_user_playlists(USER_1_ID)
        .await
        .json()
        .await
        .unwrap();
    assert_eq!(owned.len(), 1);

    assert_eq!(
        client.delete_playlist(playlist_id).await.status(),
        StatusCode::OK
    );
    assert_eq!(
        client.get_playlist(playlist_id).await.status(),
        StatusCode::NOT_FOUND
    );
}

#[tokio::test]
async fn test_playlist_requires_existing_owner_and_track() {
    let server = TestServer::spawn().await;
    let client = TestClient::new(server.base_url.clone());

    let response = client
        .create_playlist(&json!({"name": "Orphan", "owner_id": 42}))
        .await;
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let playlist: Value = client
        .create_playlist(&json!({"name": "Mix", "owner_id": USER_1_ID}))
        .await
        .json()
        .await
        .unwrap();
    let response = client
        .add_playlist_track(playlist["id"].as_i64().unwrap(), 999)
        .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_delete_user_removes_playlists() {
    let server = TestServer::spawn().await;
    let client = TestClient::new(server.base_url.clone());

    client
        .create_playlist(&json!({"name": "Mix", "owner_id": USER_1_ID}))
        .await;
    assert_eq!(client.delete_user(USER_1_ID).await.status(), StatusCode::OK);

    let playlists: Vec<Value> = client.list_playlists().await.json().await.unwrap();
    assert!(playlists.is_empty());
    assert_eq!(
        client.get_user(USER_1_ID).await.status(),
        StatusCode::NOT_FOUND
    );
    assert_eq!(
        client.list_user_playlists(USER_1_ID).await.status(),
        StatusCode::NOT_FOUND
    );
}

#[tokio::test]
async fn test_delete_author_detaches_tracks() {
    let server = TestServer::spawn().await;
    let client = TestClient::new(server.base_url.clone());

    let tracks: Vec<Value> = client
        .list_author_tracks(AUTHOR_1_ID)
        .await
        .json()
        .await
        .unwrap();
    assert_eq!(tracks.len(), 1);

    assert_eq!(
        client.delete_author(AUTHOR_1_ID).await.status(),
        StatusCode::OK
    );
    let track: Value = client.get_track(TRACK_1_ID).await.json().await.unwrap();
    assert_eq!(track["author_id"], Value::Null);

    let authors: Vec<Value> = client.list_authors().await.json().await.unwrap();
    assert!(authors.is_empty());
    assert_eq!(
        client.delete_author(AUTHOR_1_ID).await.status(),
        StatusCode::NOT_FOUND
    );
}

#[tokio::test]
async fn test_create_author_validates_name() {
    let server = TestServer::spawn().await;
    let client = TestClient::new(server.base_url.clone());

    let response = client.create_author(&json!({"name": "  "})).await;
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let response = client.create_author(&json!({"name": "Boreal"})).await;
    assert_eq!(response.status(), StatusCode::CREATED);
}
