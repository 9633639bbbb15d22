use super::validation::ValidationError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("{entity} {id} not found")]
    NotFound { entity: &'static str, id: i64 },

    #[error("No tracks found matching '{query}'")]
    NoSearchResults { query: String },

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Storage error: {0:#}")]
    Storage(anyhow::Error),
}

impl CatalogError {
    pub fn not_found(entity: &'static str, id: i64) -> Self {
        CatalogError::NotFound { entity, id }
    }
}

/// Store errors travel as `anyhow::Error`; a `CatalogError` raised inside the
/// store (e.g. a uniqueness conflict) is recovered here instead of being
/// wrapped as a generic storage failure.
impl From<anyhow::Error> for CatalogError {
    fn from(err: anyhow::Error) -> Self {
        match err.downcast::<CatalogError>() {
            Ok(catalog_err) => catalog_err,
            Err(err) => CatalogError::Storage(err),
        }
    }
}

pub type CatalogResult<T> = Result<T, CatalogError>;
