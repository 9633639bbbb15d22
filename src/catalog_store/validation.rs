//! Field-level checks applied to catalog input before anything is written.
//!
//! Foreign key checks need a store lookup, so the service performs them and
//! reports failures through [`ValidationError::ForeignKeyViolation`]. The
//! store reports the same error when the database constraint fires.

use super::models::{AuthorUpdate, NewAuthor, NewPlaylist, NewTrack, NewUser, PlaylistUpdate, TrackUpdate, UserUpdate};
use thiserror::Error;

pub const MIN_TITLE_LEN: usize = 5;
pub const MAX_TITLE_LEN: usize = 50;

/// Accepted audio file suffixes. Matched literally, case included.
pub const ALLOWED_EXTENSIONS: [&str; 4] = [".mp3", ".ogg", ".wav", ".m4a"];

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Title must be between 5 and 50 characters, got {len}")]
    TitleLength { len: usize },

    #[error("Unsupported file extension for '{path}', allowed: .mp3, .ogg, .wav, .m4a")]
    UnsupportedExtension { path: String },

    #[error("Field '{field}' is required but was empty")]
    EmptyField { field: &'static str },

    #[error("Referenced {entity_type} {id} does not exist")]
    ForeignKeyViolation { entity_type: &'static str, id: i64 },
}

pub type ValidationResult<T> = Result<T, ValidationError>;

pub fn validate_title(title: &str) -> ValidationResult<()> {
    let len = title.chars().count();
    if !(MIN_TITLE_LEN..=MAX_TITLE_LEN).contains(&len) {
        return Err(ValidationError::TitleLength { len });
    }
    Ok(())
}

pub fn validate_path(path: &str) -> ValidationResult<()> {
    if ALLOWED_EXTENSIONS.iter().any(|ext| path.ends_with(ext)) {
        Ok(())
    } else {
        Err(ValidationError::UnsupportedExtension {
            path: path.to_string(),
        })
    }
}

fn require_non_empty(field: &'static str, value: &str) -> ValidationResult<()> {
    if value.trim().is_empty() {
        return Err(ValidationError::EmptyField { field });
    }
    Ok(())
}

pub fn validate_new_track(track: &NewTrack) -> ValidationResult<()> {
    validate_title(&track.title)?;
    validate_path(&track.path)
}

/// Only the fields present in the update are checked.
pub fn validate_track_update(update: &TrackUpdate) -> ValidationResult<()> {
    if let Some(title) = &update.title {
        validate_title(title)?;
    }
    if let Some(path) = &update.path {
        validate_path(path)?;
    }
    Ok(())
}

pub fn validate_new_author(author: &NewAuthor) -> ValidationResult<()> {
    require_non_empty("name", &author.name)
}

pub fn validate_author_update(update: &AuthorUpdate) -> ValidationResult<()> {
    match &update.name {
        Some(name) => require_non_empty("name", name),
        None => Ok(()),
    }
}

pub fn validate_new_user(user: &NewUser) -> ValidationResult<()> {
    require_non_empty("username", &user.username)?;
    require_non_empty("email", &user.email)
}

pub fn validate_user_update(update: &UserUpdate) -> ValidationResult<()> {
    if let Some(username) = &update.username {
        require_non_empty("username", username)?;
    }
    if let Some(email) = &update.email {
        require_non_empty("email", email)?;
    }
    Ok(())
}

pub fn validate_new_playlist(playlist: &NewPlaylist) -> ValidationResult<()> {
    require_non_empty("name", &playlist.name)
}

pub fn validate_playlist_update(update: &PlaylistUpdate) -> ValidationResult<()> {
    match &update.name {
        Some(name) => require_non_empty("name", name),
        None => Ok(()),
    }
}
