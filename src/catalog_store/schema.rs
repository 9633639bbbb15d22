//! SQLite schema for the audio catalog.
//!
//! Deleting an author detaches its tracks, deleting a user removes the
//! playlists they own, and deleting a track or playlist removes its
//! association rows.

use crate::sqlite_column;
use crate::sqlite_persistence::{
    Column, ForeignKey, ForeignKeyOnChange, SqlType, Table, VersionedSchema,
};

const AUTHORS_TABLE: Table = Table {
    name: "authors",
    columns: &[
        sqlite_column!("id", &SqlType::Integer, is_primary_key = true),
        sqlite_column!("name", &SqlType::Text, non_null = true),
    ],
    composite_primary_key: &[],
    indices: &[],
    unique_constraints: &[],
};

const TRACK_AUTHOR_FK: ForeignKey = ForeignKey {
    foreign_table: "authors",
    foreign_column: "id",
    on_delete: ForeignKeyOnChange::SetNull,
};

const TRACKS_TABLE: Table = Table {
    name: "tracks",
    columns: &[
        sqlite_column!("id", &SqlType::Integer, is_primary_key = true),
        sqlite_column!("title", &SqlType::Text, non_null = true),
        sqlite_column!("artist", &SqlType::Text, non_null = true),
        sqlite_column!("path", &SqlType::Text, non_null = true),
        sqlite_column!(
            "author_id",
            &SqlType::Integer,
            foreign_key = Some(&TRACK_AUTHOR_FK)
        ),
    ],
    composite_primary_key: &[],
    indices: &[("idx_tracks_author", "author_id")],
    unique_constraints: &[],
};

const USERS_TABLE: Table = Table {
    name: "users",
    columns: &[
        sqlite_column!("id", &SqlType::Integer, is_primary_key = true),
        sqlite_column!("username", &SqlType::Text, non_null = true),
        sqlite_column!("email", &SqlType::Text, non_null = true),
    ],
    composite_primary_key: &[],
    indices: &[],
    unique_constraints: &[&["username"], &["email"]],
};

const PLAYLIST_OWNER_FK: ForeignKey = ForeignKey {
    foreign_table: "users",
    foreign_column: "id",
    on_delete: ForeignKeyOnChange::Cascade,
};

const PLAYLISTS_TABLE: Table = Table {
    name: "playlists",
    columns: &[
        sqlite_column!("id", &SqlType::Integer, is_primary_key = true),
        sqlite_column!("name", &SqlType::Text, non_null = true),
        sqlite_column!(
            "owner_id",
            &SqlType::Integer,
            non_null = true,
            foreign_key = Some(&PLAYLIST_OWNER_FK)
        ),
    ],
    composite_primary_key: &[],
    indices: &[("idx_playlists_owner", "owner_id")],
    unique_constraints: &[],
};

const LINK_PLAYLIST_FK: ForeignKey = ForeignKey {
    foreign_table: "playlists",
    foreign_column: "id",
    on_delete: ForeignKeyOnChange::Cascade,
};

const LINK_TRACK_FK: ForeignKey = ForeignKey {
    foreign_table: "tracks",
    foreign_column: "id",
    on_delete: ForeignKeyOnChange::Cascade,
};

/// Pure association between playlists and tracks, one row per pair.
const PLAYLIST_TRACK_TABLE: Table = Table {
    name: "playlist_track",
    columns: &[
        sqlite_column!(
            "playlist_id",
            &SqlType::Integer,
            non_null = true,
            foreign_key = Some(&LINK_PLAYLIST_FK)
        ),
        sqlite_column!(
            "track_id",
            &SqlType::Integer,
            non_null = true,
            foreign_key = Some(&LINK_TRACK_FK)
        ),
    ],
    composite_primary_key: &["playlist_id", "track_id"],
    indices: &[("idx_playlist_track_track", "track_id")],
    unique_constraints: &[],
};

pub const CATALOG_VERSIONED_SCHEMAS: &[VersionedSchema] = &[VersionedSchema {
    version: 0,
    tables: &[
        AUTHORS_TABLE,
        TRACKS_TABLE,
        USERS_TABLE,
        PLAYLISTS_TABLE,
        PLAYLIST_TRACK_TABLE,
    ],
    migration: None,
}];
