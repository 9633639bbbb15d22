//! CatalogStore trait definition.
//!
//! Lookups return `Ok(None)` for absent ids and deletes report whether a row
//! was removed, leaving the not-found policy to the caller.

use super::models::*;
use anyhow::Result;

pub trait CatalogStore: Send + Sync {
    // =========================================================================
    // Tracks
    // =========================================================================

    fn list_tracks(&self) -> Result<Vec<Track>>;

    fn get_track(&self, id: i64) -> Result<Option<Track>>;

    /// Tracks whose title contains `query`, ignoring ASCII case.
    fn search_tracks_by_title(&self, query: &str) -> Result<Vec<Track>>;

    fn list_tracks_by_author(&self, author_id: i64) -> Result<Vec<Track>>;

    fn insert_track(&self, track: &NewTrack) -> Result<Track>;

    fn update_track(&self, id: i64, update: &TrackUpdate) -> Result<Option<Track>>;

    fn delete_track(&self, id: i64) -> Result<bool>;

    // =========================================================================
    // Authors
    // =========================================================================

    fn list_authors(&self) -> Result<Vec<Author>>;

    fn get_author(&self, id: i64) -> Result<Option<Author>>;

    fn insert_author(&self, author: &NewAuthor) -> Result<Author>;

    fn update_author(&self, id: i64, update: &AuthorUpdate) -> Result<Option<Author>>;

    fn delete_author(&self, id: i64) -> Result<bool>;

    // =========================================================================
    // Users
    // =========================================================================

    fn list_users(&self) -> Result<Vec<User>>;

    fn get_user(&self, id: i64) -> Result<Option<User>>;

    /// Fails with a `CatalogError::Conflict` if username or email is taken.
    fn insert_user(&self, user: &NewUser) -> Result<User>;

    /// Fails with a `CatalogError::Conflict` if username or email is taken.
    fn update_user(&self, id: i64, update: &UserUpdate) -> Result<Option<User>>;

    fn delete_user(&self, id: i64) -> Result<bool>;

    // =========================================================================
    // Playlists
    // =========================================================================

    fn list_playlists(&self) -> Result<Vec<Playlist>>;

    fn get_playlist(&self, id: i64) -> Result<Option<Playlist>>;

    fn list_playlists_by_owner(&self, owner_id: i64) -> Result<Vec<Playlist>>;

    fn insert_playlist(&self, playlist: &NewPlaylist) -> Result<Playlist>;

    fn update_playlist(&self, id: i64, update: &PlaylistUpdate) -> Result<Option<Playlist>>;

    fn delete_playlist(&self, id: i64) -> Result<bool>;

    fn list_playlist_tracks(&self, playlist_id: i64) -> Result<Vec<Track>>;

    /// Adding a pair that is already linked is a no-op.
    fn add_playlist_track(&self, playlist_id: i64, track_id: i64) -> Result<()>;

    /// Returns false if the pair was not linked.
    fn remove_playlist_track(&self, playlist_id: i64, track_id: i64) -> Result<bool>;
}
