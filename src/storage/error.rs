use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("{field} is required and must be non-empty")]
    Validation { field: &'static str },

    #[error("favorite {0} not found")]
    FavoriteNotFound(u64),

    #[error("album {0} not found")]
    AlbumNotFound(u64),

    #[error("failed to persist favorites to {}: {source}", .path.display())]
    Persistence {
        path: PathBuf,
        #[source]
        source: anyhow::Error,
    },

    #[error("favorites file {} is malformed: {source}", .path.display())]
    Malformed {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to load album source {}: {source}", .path.display())]
    CatalogSource {
        path: PathBuf,
        #[source]
        source: anyhow::Error,
    },

    #[error("filesystem error: {0}")]
    Fs(#[from] std::io::Error),

    #[error("internal error: {0}")]
    Internal(#[from] anyhow::Error),
}
