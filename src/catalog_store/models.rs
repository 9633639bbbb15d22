//! Catalog entity records and their create/update payloads.

use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Author {
    pub id: i64,
    pub name: String,
}

#[derive(Clone, Debug, Deserialize)]
pub struct NewAuthor {
    pub name: String,
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct AuthorUpdate {
    pub name: Option<String>,
}

/// An audio file's metadata. `path` is the public URL the file is served from.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Track {
    pub id: i64,
    pub title: String,
    pub artist: String,
    pub path: String,
    pub author_id: Option<i64>,
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct NewTrack {
    pub title: String,
    pub artist: String,
    pub path: String,
    #[serde(default)]
    pub author_id: Option<i64>,
}

/// Partial track update. `None` fields keep their stored value.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct TrackUpdate {
    pub title: Option<String>,
    pub artist: Option<String>,
    pub path: Option<String>,
    pub author_id: Option<i64>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub username: String,
    pub email: String,
}

#[derive(Clone, Debug, Deserialize)]
pub struct NewUser {
    pub username: String,
    pub email: String,
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct UserUpdate {
    pub username: Option<String>,
    pub email: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Playlist {
    pub id: i64,
    pub name: String,
    pub owner_id: i64,
}

#[derive(Clone, Debug, Deserialize)]
pub struct NewPlaylist {
    pub name: String,
    pub owner_id: i64,
}

/// The owner of a playlist cannot change, only its name.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct PlaylistUpdate {
    pub name: Option<String>,
}
