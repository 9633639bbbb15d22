//! Test data for end-to-end tests

use super::constants::*;
use audiopage_server::catalog_store::{NewAuthor, NewTrack, NewUser};
use audiopage_server::CatalogService;

/// Seeds one author, two tracks (only the first attributed) and one user.
pub fn seed_catalog(catalog: &CatalogService) -> anyhow::Result<()> {
    let author = catalog.create_author(NewAuthor {
        name: AUTHOR_1_NAME.to_string(),
    })?;
    assert_eq!(author.id, AUTHOR_1_ID);

    let track = catalog.create_track(NewTrack {
        title: TRACK_1_TITLE.to_string(),
        artist: AUTHOR_1_NAME.to_string(),
        path: TRACK_1_PATH.to_string(),
        author_id: Some(author.id),
    })?;
    assert_eq!(track.id, TRACK_1_ID);

    let track = catalog.create_track(NewTrack {
        title: TRACK_2_TITLE.to_string(),
        artist: "Unknown".to_string(),
        path: TRACK_2_PATH.to_string(),
        author_id: None,
    })?;
    assert_eq!(track.id, TRACK_2_ID);

    let user = catalog.create_user(NewUser {
        username: USER_1_NAME.to_string(),
        email: USER_1_EMAIL.to_string(),
    })?;
    assert_eq!(user.id, USER_1_ID);

    Ok(())
}
