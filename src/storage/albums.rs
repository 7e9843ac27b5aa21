use std::{fs::File, io::BufReader, path::PathBuf};

use anyhow::Context;

use crate::{
    domain::album::{Album, RawAlbum},
    storage::error::StorageError,
};

/// Read-only view over the static album source file. The file is operator
/// data that the server never writes, so no lock is needed; each call
/// re-reads the source and re-derives positional ids.
pub struct AlbumCatalog {
    path: PathBuf,
}

impl AlbumCatalog {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn list(&self) -> Result<Vec<Album>, StorageError> {
        let raw = self.load_raw().map_err(|source| StorageError::CatalogSource {
            path: self.path.clone(),
            source,
        })?;

        Ok(raw
            .into_iter()
            .enumerate()
            .map(|(i, entry)| Album::from_raw(i as u64 + 1, entry))
            .collect())
    }

    pub fn get(&self, id: u64) -> Result<Album, StorageError> {
        self.list()?
            .into_iter()
            .find(|a| a.id == id)
            .ok_or(StorageError::AlbumNotFound(id))
    }

    fn load_raw(&self) -> Result<Vec<RawAlbum>, anyhow::Error> {
        let file = File::open(&self.path)
            .with_context(|| format!("open {}", self.path.to_string_lossy()))?;
        serde_json::from_reader(BufReader::new(file)).context("parse album source")
    }
}
