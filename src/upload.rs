//! Upload Handler: turns an uploaded file into a stored file plus a track.

use crate::catalog::CatalogService;
use crate::catalog_store::{validation::validate_new_track, CatalogError, NewTrack, Track};
use crate::media::{check_filename, MediaError, MediaStore};
use thiserror::Error;
use tracing::{info, warn};

/// Artist recorded for uploaded tracks.
pub const UNKNOWN_ARTIST: &str = "Unknown";

#[derive(Debug, Error)]
pub enum UploadError {
    #[error(transparent)]
    Catalog(#[from] CatalogError),

    #[error(transparent)]
    Media(#[from] MediaError),
}

#[derive(Clone)]
pub struct UploadHandler {
    catalog: CatalogService,
    media: MediaStore,
}

impl UploadHandler {
    pub fn new(catalog: CatalogService, media: MediaStore) -> Self {
        Self { catalog, media }
    }

    /// Stores `data` under `filename` and registers a track titled after the
    /// file. The track is validated before any byte is written.
    pub async fn upload(&self, filename: &str, data: &[u8]) -> Result<Track, UploadError> {
        check_filename(filename)?;

        let new_track = NewTrack {
            title: filename.to_string(),
            artist: UNKNOWN_ARTIST.to_string(),
            path: self.media.public_path(filename),
            author_id: None,
        };
        validate_new_track(&new_track).map_err(CatalogError::from)?;

        let replaced = self.media.exists(filename).await;
        self.media.save(filename, data).await?;

        let track = match self.catalog.create_track(new_track) {
            Ok(track) => track,
            Err(e) => {
                warn!("Registering upload '{}' failed: {}", filename, e);
                if !replaced {
                    self.media.remove(filename).await;
                }
                return Err(e.into());
            }
        };
        info!(
            "Uploaded '{}' ({} bytes) as track {}",
            filename,
            data.len(),
            track.id
        );
        Ok(track)
    }
}
