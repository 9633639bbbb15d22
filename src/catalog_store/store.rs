//! SQLite-backed catalog store.

use super::error::CatalogError;
use super::models::*;
use super::schema::CATALOG_VERSIONED_SCHEMAS;
use super::trait_def::CatalogStore;
use super::validation::ValidationError;
use crate::sqlite_persistence::open_versioned;
use anyhow::{Context, Result};
use rusqlite::{params, Connection, Row};
use std::path::Path;
use std::sync::{Arc, Mutex};
use tracing::info;

const TRACK_COLUMNS: &str = "id, title, artist, path, author_id";

#[derive(Clone)]
pub struct SqliteCatalogStore {
    conn: Arc<Mutex<Connection>>,
}

impl SqliteCatalogStore {
    /// Opens (or creates) the catalog database at `db_path`.
    pub fn new<P: AsRef<Path>>(db_path: P) -> Result<Self> {
        let db_path = db_path.as_ref();
        let mut conn = Connection::open(db_path)
            .with_context(|| format!("Failed to open catalog database {:?}", db_path))?;
        conn.pragma_update(None, "journal_mode", "WAL")?;
        Self::init(&mut conn)?;
        info!("Opened catalog database at {:?}", db_path);
        Ok(SqliteCatalogStore {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    pub fn in_memory() -> Result<Self> {
        let mut conn = Connection::open_in_memory()?;
        Self::init(&mut conn)?;
        Ok(SqliteCatalogStore {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    fn init(conn: &mut Connection) -> Result<()> {
        conn.execute("PRAGMA foreign_keys = ON;", [])?;
        open_versioned(conn, CATALOG_VERSIONED_SCHEMAS).context("Catalog schema check failed")?;

        let track_count: i64 = conn.query_row("SELECT COUNT(*) FROM tracks", [], |r| r.get(0))?;
        info!("Catalog holds {} tracks", track_count);
        Ok(())
    }

    fn parse_track_row(row: &Row) -> rusqlite::Result<Track> {
        Ok(Track {
            id: row.get(0)?,
            title: row.get(1)?,
            artist: row.get(2)?,
            path: row.get(3)?,
            author_id: row.get(4)?,
        })
    }

    fn parse_author_row(row: &Row) -> rusqlite::Result<Author> {
        Ok(Author {
            id: row.get(0)?,
            name: row.get(1)?,
        })
    }

    fn parse_user_row(row: &Row) -> rusqlite::Result<User> {
        Ok(User {
            id: row.get(0)?,
            username: row.get(1)?,
            email: row.get(2)?,
        })
    }

    fn parse_playlist_row(row: &Row) -> rusqlite::Result<Playlist> {
        Ok(Playlist {
            id: row.get(0)?,
            name: row.get(1)?,
            owner_id: row.get(2)?,
        })
    }

    fn query_one<T>(
        conn: &Connection,
        sql: &str,
        id: i64,
        parse: fn(&Row) -> rusqlite::Result<T>,
    ) -> Result<Option<T>> {
        let mut stmt = conn.prepare_cached(sql)?;
        match stmt.query_row(params![id], parse) {
            Ok(value) => Ok(Some(value)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn query_all<T, P: rusqlite::Params>(
        conn: &Connection,
        sql: &str,
        params: P,
        parse: fn(&Row) -> rusqlite::Result<T>,
    ) -> Result<Vec<T>> {
        let mut stmt = conn.prepare_cached(sql)?;
        let rows = stmt
            .query_map(params, parse)?
            .collect::<Result<Vec<T>, _>>()?;
        Ok(rows)
    }

    fn get_track_locked(conn: &Connection, id: i64) -> Result<Option<Track>> {
        Self::query_one(
            conn,
            &format!("SELECT {} FROM tracks WHERE id = ?1", TRACK_COLUMNS),
            id,
            Self::parse_track_row,
        )
    }

    fn get_author_locked(conn: &Connection, id: i64) -> Result<Option<Author>> {
        Self::query_one(
            conn,
            "SELECT id, name FROM authors WHERE id = ?1",
            id,
            Self::parse_author_row,
        )
    }

    fn get_user_locked(conn: &Connection, id: i64) -> Result<Option<User>> {
        Self::query_one(
            conn,
            "SELECT id, username, email FROM users WHERE id = ?1",
            id,
            Self::parse_user_row,
        )
    }

    fn get_playlist_locked(conn: &Connection, id: i64) -> Result<Option<Playlist>> {
        Self::query_one(
            conn,
            "SELECT id, name, owner_id FROM playlists WHERE id = ?1",
            id,
            Self::parse_playlist_row,
        )
    }

    fn delete_by_id(&self, table: &str, id: i64) -> Result<bool> {
        let conn = self.conn.lock().unwrap();
        let removed = conn
            .execute(&format!("DELETE FROM {} WHERE id = ?1", table), params![id])
            .with_context(|| format!("Failed to delete from {}", table))?;
        Ok(removed > 0)
    }
}

/// Turns a UNIQUE constraint failure into a `CatalogError::Conflict` carried
/// by anyhow, leaving every other error untouched.
fn map_unique_violation(err: rusqlite::Error) -> anyhow::Error {
    match &err {
        rusqlite::Error::SqliteFailure(e, msg)
            if e.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_UNIQUE =>
        {
            let detail = msg.clone().unwrap_or_else(|| "unique constraint".to_string());
            let field = if detail.contains("users.username") {
                "username"
            } else if detail.contains("users.email") {
                "email"
            } else {
                return anyhow::Error::new(CatalogError::Conflict(detail));
            };
            anyhow::Error::new(CatalogError::Conflict(format!(
                "A user with this {} already exists",
                field
            )))
        }
        _ => err.into(),
    }
}

/// Maps a foreign key failure on a reference to `entity_type` `id` to a
/// validation error. The reference can vanish between the service's
/// existence check and the write.
fn map_foreign_key_violation(
    err: rusqlite::Error,
    entity_type: &'static str,
    id: i64,
    context: &'static str,
) -> anyhow::Error {
    match &err {
        rusqlite::Error::SqliteFailure(e, _)
            if e.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_FOREIGNKEY =>
        {
            anyhow::Error::new(CatalogError::Validation(
                ValidationError::ForeignKeyViolation { entity_type, id },
            ))
        }
        _ => anyhow::Error::new(err).context(context),
    }
}

/// Builds a LIKE pattern matching `query` anywhere, with `%`, `_` and `\`
/// matched literally. Use with `ESCAPE '\'`.
fn contains_pattern(query: &str) -> String {
    let mut pattern = String::with_capacity(query.len() + 2);
    pattern.push('%');
    for c in query.chars() {
        if matches!(c, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}

impl CatalogStore for SqliteCatalogStore {
    fn list_tracks(&self) -> Result<Vec<Track>> {
        let conn = self.conn.lock().unwrap();
        Self::query_all(
            &conn,
            &format!("SELECT {} FROM tracks ORDER BY id", TRACK_COLUMNS),
            [],
            Self::parse_track_row,
        )
    }

    fn get_track(&self, id: i64) -> Result<Option<Track>> {
        let conn = self.conn.lock().unwrap();
        Self::get_track_locked(&conn, id)
    }

    fn search_tracks_by_title(&self, query: &str) -> Result<Vec<Track>> {
        let conn = self.conn.lock().unwrap();
        Self::query_all(
            &conn,
            &format!(
                "SELECT {} FROM tracks WHERE title LIKE ?1 ESCAPE '\\' ORDER BY id",
                TRACK_COLUMNS
            ),
            params![contains_pattern(query)],
            Self::parse_track_row,
        )
    }

    fn list_tracks_by_author(&self, author_id: i64) -> Result<Vec<Track>> {
        let conn = self.conn.lock().unwrap();
        Self::query_all(
            &conn,
            &format!(
                "SELECT {} FROM tracks WHERE author_id = ?1 ORDER BY id",
                TRACK_COLUMNS
            ),
            params![author_id],
            Self::parse_track_row,
        )
    }

    fn insert_track(&self, track: &NewTrack) -> Result<Track> {
        let conn = self.conn.lock().unwrap();
        conn.execute(
            "INSERT INTO tracks (title, artist, path, author_id) VALUES (?1, ?2, ?3, ?4)",
            params![track.title, track.artist, track.path, track.author_id],
        )
        .map_err(|e| {
            map_foreign_key_violation(
                e,
                "Author",
                track.author_id.unwrap_or_default(),
                "Failed to insert track",
            )
        })?;
        Ok(Track {
            id: conn.last_insert_rowid(),
            title: track.title.clone(),
            artist: track.artist.clone(),
            path: track.path.clone(),
            author_id: track.author_id,
        })
    }

    fn update_track(&self, id: i64, update: &TrackUpdate) -> Result<Option<Track>> {
        let conn = self.conn.lock().unwrap();
        let changed = conn
            .execute(
                "UPDATE tracks SET
                    title = COALESCE(?1, title),
                    artist = COALESCE(?2, artist),
                    path = COALESCE(?3, path),
                    author_id = COALESCE(?4, author_id)
                 WHERE id = ?5",
                params![update.title, update.artist, update.path, update.author_id, id],
            )
            .map_err(|e| {
                map_foreign_key_violation(
                    e,
                    "Author",
                    update.author_id.unwrap_or_default(),
                    "Failed to update track",
                )
            })?;
        if changed == 0 {
            return Ok(None);
        }
        Self::get_track_locked(&conn, id)
    }

    fn delete_track(&self, id: i64) -> Result<bool> {
        self.delete_by_id("tracks", id)
    }

    fn list_authors(&self) -> Result<Vec<Author>> {
        let conn = self.conn.lock().unwrap();
        Self::query_all(
            &conn,
            "SELECT id, name FROM authors ORDER BY id",
            [],
            Self::parse_author_row,
        )
    }

    fn get_author(&self, id: i64) -> Result<Option<Author>> {
        let conn = self.conn.lock().unwrap();
        Self::get_author_locked(&conn, id)
    }

    fn insert_author(&self, author: &NewAuthor) -> Result<Author> {
        let conn = self.conn.lock().unwrap();
        conn.execute("INSERT INTO authors (name) VALUES (?1)", params![author.name])
            .context("Failed to insert author")?;
        Ok(Author {
            id: conn.last_insert_rowid(),
            name: author.name.clone(),
        })
    }

    fn update_author(&self, id: i64, update: &AuthorUpdate) -> Result<Option<Author>> {
        let conn = self.conn.lock().unwrap();
        let changed = conn
            .execute(
                "UPDATE authors SET name = COALESCE(?1, name) WHERE id = ?2",
                params![update.name, id],
            )
            .context("Failed to update author")?;
        if changed == 0 {
            return Ok(None);
        }
        Self::get_author_locked(&conn, id)
    }

    fn delete_author(&self, id: i64) -> Result<bool> {
        self.delete_by_id("authors", id)
    }

    fn list_users(&self) -> Result<Vec<User>> {
        let conn = self.conn.lock().unwrap();
        Self::query_all(
            &conn,
            "SELECT id, username, email FROM users ORDER BY id",
            [],
            Self::parse_user_row,
        )
    }

    fn get_user(&self, id: i64) -> Result<Option<User>> {
        let conn = self.conn.lock().unwrap();
        Self::get_user_locked(&conn, id)
    }

    fn insert_user(&self, user: &NewUser) -> Result<User> {
        let conn = self.conn.lock().unwrap();
        conn.execute(
            "INSERT INTO users (username, email) VALUES (?1, ?2)",
            params![user.username, user.email],
        )
        .map_err(map_unique_violation)?;
        Ok(User {
            id: conn.last_insert_rowid(),
            username: user.username.clone(),
            email: user.email.clone(),
        })
    }

    fn update_user(&self, id: i64, update: &UserUpdate) -> Result<Option<User>> {
        let conn = self.conn.lock().unwrap();
        let changed = conn
            .execute(
                "UPDATE users SET
                    username = COALESCE(?1, username),
                    email = COALESCE(?2, email)
                 WHERE id = ?3",
                params![update.username, update.email, id],
            )
            .map_err(map_unique_violation)?;
        if changed == 0 {
            return Ok(None);
        }
        Self::get_user_locked(&conn, id)
    }

    fn delete_user(&self, id: i64) -> Result<bool> {
        self.delete_by_id("users", id)
    }

    fn list_playlists(&self) -> Result<Vec<Playlist>> {
        let conn = self.conn.lock().unwrap();
        Self::query_all(
            &conn,
            "SELECT id, name, owner_id FROM playlists ORDER BY id",
            [],
            Self::parse_playlist_row,
        )
    }

    fn get_playlist(&self, id: i64) -> Result<Option<Playlist>> {
        let conn = self.conn.lock().unwrap();
        Self::get_playlist_locked(&conn, id)
    }

    fn list_playlists_by_owner(&self, owner_id: i64) -> Result<Vec<Playlist>> {
        let conn = self.conn.lock().unwrap();
        Self::query_all(
            &conn,
            "SELECT id, name, owner_id FROM playlists WHERE owner_id = ?1 ORDER BY id",
            params![owner_id],
            Self::parse_playlist_row,
        )
    }

    fn insert_playlist(&self, playlist: &NewPlaylist) -> Result<Playlist> {
        let conn = self.conn.lock().unwrap();
        conn.execute(
            "INSERT INTO playlists (name, owner_id) VALUES (?1, ?2)",
            params![playlist.name, playlist.owner_id],
        )
        .map_err(|e| {
            map_foreign_key_violation(e, "User", playlist.owner_id, "Failed to insert playlist")
        })?;
        Ok(Playlist {
            id: conn.last_insert_rowid(),
            name: playlist.name.clone(),
            owner_id: playlist.owner_id,
        })
    }

    fn update_playlist(&self, id: i64, update: &PlaylistUpdate) -> Result<Option<Playlist>> {
        let conn = self.conn.lock().unwrap();
        let changed = conn
            .execute(
                "UPDATE playlists SET name = COALESCE(?1, name) WHERE id = ?2",
                params![update.name, id],
            )
            .context("Failed to update playlist")?;
        if changed == 0 {
            return Ok(None);
        }
        Self::get_playlist_locked(&conn, id)
    }

    fn delete_playlist(&self, id: i64) -> Result<bool> {
        self.delete_by_id("playlists", id)
    }

    fn list_playlist_tracks(&self, playlist_id: i64) -> Result<Vec<Track>> {
        let conn = self.conn.lock().unwrap();
        Self::query_all(
            &conn,
            "SELECT t.id, t.title, t.artist, t.path, t.author_id
             FROM tracks t
             INNER JOIN playlist_track pt ON pt.track_id = t.id
             WHERE pt.playlist_id = ?1
             ORDER BY t.id",
            params![playlist_id],
            Self::parse_track_row,
        )
    }

    fn add_playlist_track(&self, playlist_id: i64, track_id: i64) -> Result<()> {
        let conn = self.conn.lock().unwrap();
        conn.execute(
            "INSERT OR IGNORE INTO playlist_track (playlist_id, track_id) VALUES (?1, ?2)",
            params![playlist_id, track_id],
        )
        .context("Failed to link track to playlist")?;
        Ok(())
    }

    fn remove_playlist_track(&self, playlist_id: i64, track_id: i64) -> Result<bool> {
        let conn = self.conn.lock().unwrap();
        let removed = conn
            .execute(
                "DELETE FROM playlist_track WHERE playlist_id = ?1 AND track_id = ?2",
                params![playlist_id, track_id],
            )
            .context("Failed to unlink track from playlist")?;
        Ok(removed > 0)
    }
}
