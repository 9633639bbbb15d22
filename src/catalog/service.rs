//! Catalog Service: CRUD and search over the catalog entities.
//!
//! Every mutating operation looks its target up first, so absent ids surface
//! as `CatalogError::NotFound` and input is validated before any write.

use crate::catalog_store::validation::{
    validate_author_update, validate_new_author, validate_new_playlist, validate_new_track,
    validate_new_user, validate_playlist_update, validate_track_update, validate_user_update,
};
use crate::catalog_store::*;
use std::sync::Arc;
use tracing::{debug, info};

#[derive(Clone)]
pub struct CatalogService {
    store: Arc<dyn CatalogStore>,
}

impl CatalogService {
    pub fn new(store: Arc<dyn CatalogStore>) -> Self {
        CatalogService { store }
    }

    fn require_author(&self, id: i64) -> CatalogResult<Author> {
        self.store
            .get_author(id)?
            .ok_or(CatalogError::not_found("Author", id))
    }

    fn require_user(&self, id: i64) -> CatalogResult<User> {
        self.store
            .get_user(id)?
            .ok_or(CatalogError::not_found("User", id))
    }

    fn require_playlist(&self, id: i64) -> CatalogResult<Playlist> {
        self.store
            .get_playlist(id)?
            .ok_or(CatalogError::not_found("Playlist", id))
    }

    fn check_author_reference(&self, author_id: Option<i64>) -> CatalogResult<()> {
        if let Some(id) = author_id {
            if self.store.get_author(id)?.is_none() {
                return Err(ValidationError::ForeignKeyViolation {
                    entity_type: "Author",
                    id,
                }
                .into());
            }
        }
        Ok(())
    }

    // =========================================================================
    // Tracks
    // =========================================================================

    pub fn list_tracks(&self) -> CatalogResult<Vec<Track>> {
        Ok(self.store.list_tracks()?)
    }

    pub fn get_track(&self, id: i64) -> CatalogResult<Track> {
        self.store
            .get_track(id)?
            .ok_or(CatalogError::not_found("Track", id))
    }

    /// Tracks whose title contains `query`, case-insensitively.
    ///
    /// An empty result is reported as `CatalogError::NoSearchResults` rather
    /// than an empty list.
    pub fn search_tracks(&self, query: &str) -> CatalogResult<Vec<Track>> {
        let tracks = self.store.search_tracks_by_title(query)?;
        debug!("Search '{}' matched {} tracks", query, tracks.len());
        if tracks.is_empty() {
            return Err(CatalogError::NoSearchResults {
                query: query.to_string(),
            });
        }
        Ok(tracks)
    }

    pub fn create_track(&self, track: NewTrack) -> CatalogResult<Track> {
        validate_new_track(&track)?;
        self.check_author_reference(track.author_id)?;
        let created = self.store.insert_track(&track)?;
        info!("Created track {} '{}'", created.id, created.title);
        Ok(created)
    }

    pub fn update_track(&self, id: i64, update: TrackUpdate) -> CatalogResult<Track> {
        self.get_track(id)?;
        validate_track_update(&update)?;
        self.check_author_reference(update.author_id)?;
        self.store
            .update_track(id, &update)?
            .ok_or(CatalogError::not_found("Track", id))
    }

    pub fn delete_track(&self, id: i64) -> CatalogResult<()> {
        self.get_track(id)?;
        if !self.store.delete_track(id)? {
            return Err(CatalogError::not_found("Track", id));
        }
        info!("Deleted track {}", id);
        Ok(())
    }

    // =========================================================================
    // Authors
    // =========================================================================

    pub fn list_authors(&self) -> CatalogResult<Vec<Author>> {
        Ok(self.store.list_authors()?)
    }

    pub fn get_author(&self, id: i64) -> CatalogResult<Author> {
        self.require_author(id)
    }

    pub fn create_author(&self, author: NewAuthor) -> CatalogResult<Author> {
        validate_new_author(&author)?;
        Ok(self.store.insert_author(&author)?)
    }

    pub fn update_author(&self, id: i64, update: AuthorUpdate) -> CatalogResult<Author> {
        self.require_author(id)?;
        validate_author_update(&update)?;
        self.store
            .update_author(id, &update)?
            .ok_or(CatalogError::not_found("Author", id))
    }

    /// Tracks by the author are kept with their author cleared.
    pub fn delete_author(&self, id: i64) -> CatalogResult<()> {
        self.require_author(id)?;
        if !self.store.delete_author(id)? {
            return Err(CatalogError::not_found("Author", id));
        }
        info!("Deleted author {}", id);
        Ok(())
    }

    pub fn list_author_tracks(&self, author_id: i64) -> CatalogResult<Vec<Track>> {
        self.require_author(author_id)?;
        Ok(self.store.list_tracks_by_author(author_id)?)
    }

    // =========================================================================
    // Users
    // =========================================================================

    pub fn list_users(&self) -> CatalogResult<Vec<User>> {
        Ok(self.store.list_users()?)
    }

    pub fn get_user(&self, id: i64) -> CatalogResult<User> {
        self.require_user(id)
    }

    pub fn create_user(&self, user: NewUser) -> CatalogResult<User> {
        validate_new_user(&user)?;
        let created = self.store.insert_user(&user)?;
        info!("Created user {} '{}'", created.id, created.username);
        Ok(created)
    }

    pub fn update_user(&self, id: i64, update: UserUpdate) -> CatalogResult<User> {
        self.require_user(id)?;
        validate_user_update(&update)?;
        self.store
            .update_user(id, &update)?
            .ok_or(CatalogError::not_found("User", id))
    }

    /// Playlists owned by the user are deleted with it.
    pub fn delete_user(&self, id: i64) -> CatalogResult<()> {
        self.require_user(id)?;
        if !self.store.delete_user(id)? {
            return Err(CatalogError::not_found("User", id));
        }
        info!("Deleted user {}", id);
        Ok(())
    }

    pub fn list_user_playlists(&self, user_id: i64) -> CatalogResult<Vec<Playlist>> {
        self.require_user(user_id)?;
        Ok(self.store.list_playlists_by_owner(user_id)?)
    }

    // =========================================================================
    // Playlists
    // =========================================================================

    pub fn list_playlists(&self) -> CatalogResult<Vec<Playlist>> {
        Ok(self.store.list_playlists()?)
    }

    pub fn get_playlist(&self, id: i64) -> CatalogResult<Playlist> {
        self.require_playlist(id)
    }

    pub fn create_playlist(&self, playlist: NewPlaylist) -> CatalogResult<Playlist> {
        validate_new_playlist(&playlist)?;
        if self.store.get_user(playlist.owner_id)?.is_none() {
            return Err(ValidationError::ForeignKeyViolation {
                entity_type: "User",
                id: playlist.owner_id,
            }
            .into());
        }
        Ok(self.store.insert_playlist(&playlist)?)
    }

    pub fn update_playlist(&self, id: i64, update: PlaylistUpdate) -> CatalogResult<Playlist> {
        self.require_playlist(id)?;
        validate_playlist_update(&update)?;
        self.store
            .update_playlist(id, &update)?
            .ok_or(CatalogError::not_found("Playlist", id))
    }

    pub fn delete_playlist(&self, id: i64) -> CatalogResult<()> {
        self.require_playlist(id)?;
        if !self.store.delete_playlist(id)? {
            return Err(CatalogError::not_found("Playlist", id));
        }
        info!("Deleted playlist {}", id);
        Ok(())
    }

    pub fn list_playlist_tracks(&self, playlist_id: i64) -> CatalogResult<Vec<Track>> {
        self.require_playlist(playlist_id)?;
        Ok(self.store.list_playlist_tracks(playlist_id)?)
    }

    pub fn add_playlist_track(&self, playlist_id: i64, track_id: i64) -> CatalogResult<()> {
        self.require_playlist(playlist_id)?;
        self.get_track(track_id)?;
        Ok(self.store.add_playlist_track(playlist_id, track_id)?)
    }

    pub fn remove_playlist_track(&self, playlist_id: i64, track_id: i64) -> CatalogResult<()> {
        self.require_playlist(playlist_id)?;
        self.get_track(track_id)?;
        if !self.store.remove_playlist_track(playlist_id, track_id)? {
            return Err(CatalogError::NotFound {
                entity: "Playlist track",
                id: track_id,
            });
        }
        Ok(())
    }
}
