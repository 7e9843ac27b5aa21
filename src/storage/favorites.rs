use std::{
    path::PathBuf,
    sync::{Mutex, MutexGuard},
};

use anyhow::anyhow;
use chrono::Utc;
use log::debug;

use crate::{
    config::MalformedPolicy,
    domain::favorite::{Favorite, FavoriteDraft, FavoritePatch, next_id},
    storage::{atomic, error::StorageError},
};

/// Owns the mutable favorites collection. Every operation reloads the
/// document from disk, mutates in memory, and persists atomically, all
/// under one lock, so the process can restart (or the file change
/// out-of-band) between calls without serving stale state.
pub struct FavoriteStore {
    path: PathBuf,
    on_malformed: MalformedPolicy,
    lock: Mutex<()>,
}

impl FavoriteStore {
    pub fn new(path: PathBuf, on_malformed: MalformedPolicy) -> Self {
        Self {
            path,
            on_malformed,
            lock: Mutex::new(()),
        }
    }

    pub fn list(&self) -> Result<Vec<Favorite>, StorageError> {
        let _guard = self.acquire()?;
        self.load()
    }

    pub fn create(&self, draft: FavoriteDraft) -> Result<Favorite, StorageError> {
        let name = required_trimmed(draft.name.as_deref(), "name")?;
        let artist = required_trimmed(draft.artist.as_deref(), "artist")?;

        let _guard = self.acquire()?;
        let mut records = self.load()?;

        let record = Favorite {
            id: next_id(&records),
            name,
            artist,
            date_added: Utc::now(),
            favorite_song: draft.favorite_song,
            listen_completed: draft.listen_completed.unwrap_or(false),
            commented: draft.commented.unwrap_or(false),
            comment: draft.comment,
        };
        debug!("creating favorite {} ({})", record.id, record.name);

        records.push(record.clone());
        atomic::write_collection(&self.path, &records)?;
        Ok(record)
    }

    pub fn update(&self, id: u64, patch: FavoritePatch) -> Result<Favorite, StorageError> {
        let _guard = self.acquire()?;
        let mut records = self.load()?;

        let record = records
            .iter_mut()
            .find(|r| r.id == id)
            .ok_or(StorageError::FavoriteNotFound(id))?;

        apply_patch(record, patch);
        let updated = record.clone();

        atomic::write_collection(&self.path, &records)?;
        Ok(updated)
    }

    pub fn delete(&self, id: u64) -> Result<u64, StorageError> {
        let _guard = self.acquire()?;
        let mut records = self.load()?;

        let before = records.len();
        records.retain(|r| r.id != id);
        if records.len() == before {
            return Err(StorageError::FavoriteNotFound(id));
        }

        debug!("deleting favorite {id}");
        atomic::write_collection(&self.path, &records)?;
        Ok(id)
    }

    fn load(&self) -> Result<Vec<Favorite>, StorageError> {
        atomic::read_collection(&self.path, self.on_malformed)
    }

    fn acquire(&self) -> Result<MutexGuard<'_, ()>, StorageError> {
        self.lock
            .lock()
            .map_err(|e| StorageError::Internal(anyhow!("favorites lock poisoned: {e}")))
    }
}

fn required_trimmed(value: Option<&str>, field: &'static str) -> Result<String, StorageError> {
    match value.map(str::trim) {
        Some(trimmed) if !trimmed.is_empty() => Ok(trimmed.to_string()),
        _ => Err(StorageError::Validation { field }),
    }
}

fn apply_patch(record: &mut Favorite, patch: FavoritePatch) {
    // A present-but-blank name/artist is ignored, not an error.
    if let Some(name) = patch.name {
        let trimmed = name.trim();
        if !trimmed.is_empty() {
            record.name = trimmed.to_string();
        }
    }
    if let Some(artist) = patch.artist {
        let trimmed = artist.trim();
        if !trimmed.is_empty() {
            record.artist = trimmed.to_string();
        }
    }
    // Double option: outer Some means the field appeared in the payload,
    // inner None means an explicit null cleared it.
    if let Some(song) = patch.favorite_song {
        record.favorite_song = song;
    }
    if let Some(comment) = patch.comment {
        record.comment = comment;
    }
    if let Some(listened) = patch.listen_completed {
        record.listen_completed = listened;
    }
    if let Some(commented) = patch.commented {
        record.commented = commented;
    }
}
