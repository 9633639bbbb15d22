//! Public media storage for uploaded audio files.

use std::path::{Path, PathBuf};
use thiserror::Error;
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tracing::{debug, warn};

/// URL prefix under which the media root is served.
pub const PUBLIC_PREFIX: &str = "/static";

const UPLOADS_DIR: &str = "uploads";

#[derive(Debug, Error)]
pub enum MediaError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid filename: {0:?}")]
    InvalidFilename(String),
}

/// Writes uploaded bytes under `<root>/uploads/` and maps them to
/// `/static/uploads/<name>`.
#[derive(Clone, Debug)]
pub struct MediaStore {
    root: PathBuf,
}

/// Rejects names that would escape the uploads directory or are not a
/// plain file name.
pub fn check_filename(filename: &str) -> Result<(), MediaError> {
    let invalid = filename.is_empty()
        || filename == "."
        || filename == ".."
        || filename.contains(['/', '\\', '\0']);
    if invalid {
        return Err(MediaError::InvalidFilename(filename.to_string()));
    }
    Ok(())
}

impl MediaStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub async fn init(&self) -> Result<(), MediaError> {
        fs::create_dir_all(self.root.join(UPLOADS_DIR)).await?;
        Ok(())
    }

    /// URL of a stored file. The name is percent-encoded as a single path
    /// segment.
    pub fn public_path(&self, filename: &str) -> String {
        format!(
            "{}/{}/{}",
            PUBLIC_PREFIX,
            UPLOADS_DIR,
            urlencoding::encode(filename)
        )
    }

    pub async fn exists(&self, filename: &str) -> bool {
        fs::try_exists(self.root.join(UPLOADS_DIR).join(filename))
            .await
            .unwrap_or(false)
    }

    /// Stores `data` as `filename`. An existing file with the same name is
    /// overwritten.
    pub async fn save(&self, filename: &str, data: &[u8]) -> Result<String, MediaError> {
        check_filename(filename)?;

        let dir = self.root.join(UPLOADS_DIR);
        fs::create_dir_all(&dir).await?;

        let file_path = dir.join(filename);
        let mut file = fs::File::create(&file_path).await?;
        file.write_all(data).await?;
        file.flush().await?;
        debug!("Wrote {} bytes to {:?}", data.len(), file_path);

        Ok(self.public_path(filename))
    }

    /// Best-effort removal of a stored file. Failures are only logged.
    pub async fn remove(&self, filename: &str) {
        if check_filename(filename).is_err() {
            return;
        }
        let file_path = self.root.join(UPLOADS_DIR).join(filename);
        match fs::remove_file(&file_path).await {
            Ok(()) => debug!("Removed {:?}", file_path),
            Err(e) => warn!("Failed to remove {:?}: {}", file_path, e),
        }
    }
}
