//! Crash-safe persistence of the favorites document.
//!
//! Writes go to a staging file in the destination's directory, get synced,
//! and are moved over the destination in a single rename. A reader sees
//! either the old document or the new one, never a partial write, and a
//! failure anywhere before the rename leaves the destination untouched.

use std::{fs::File, io::BufReader, path::Path};

use anyhow::Context;
use log::warn;
use tempfile::NamedTempFile;

use crate::{config::MalformedPolicy, domain::favorite::Favorite, storage::error::StorageError};

pub fn write_collection(path: &Path, records: &[Favorite]) -> Result<(), StorageError> {
    try_write(path, records).map_err(|source| StorageError::Persistence {
        path: path.to_path_buf(),
        source,
    })
}

fn try_write(path: &Path, records: &[Favorite]) -> Result<(), anyhow::Error> {
    // A bare file name has an empty parent; that means the current directory.
    let dir = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };

    // Same directory as the destination, so the rename stays on one
    // filesystem. The staging file is removed on drop if anything fails.
    let staging = NamedTempFile::new_in(dir)
        .with_context(|| format!("staging file in {}", dir.to_string_lossy()))?;

    serde_json::to_writer_pretty(staging.as_file(), records).context("serialize favorites")?;
    staging.as_file().sync_all().context("sync staging file")?;

    staging
        .persist(path)
        .with_context(|| format!("replace {}", path.to_string_lossy()))?;
    Ok(())
}

pub fn read_collection(
    path: &Path,
    policy: MalformedPolicy,
) -> Result<Vec<Favorite>, StorageError> {
    // A fresh deployment starts empty; absence is not an error.
    if !path.exists() {
        return Ok(vec![]);
    }

    let file = File::open(path)?;
    match serde_json::from_reader(BufReader::new(file)) {
        Ok(records) => Ok(records),
        Err(source) => match policy {
            MalformedPolicy::Reset => {
                warn!(
                    "favorites file {} is malformed ({source}), treating as empty",
                    path.to_string_lossy()
                );
                Ok(vec![])
            }
            MalformedPolicy::Error => Err(StorageError::Malformed {
                path: path.to_path_buf(),
                source,
            }),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    fn favorite(id: u64, name: &str) -> Favorite {
        Favorite {
            id,
            name: name.to_string(),
            artist: "Taylor Swift".to_string(),
            date_added: chrono::Utc::now(),
            favorite_song: None,
            listen_completed: false,
            commented: false,
            comment: None,
        }
    }

    #[test]
    fn read_missing_file_yields_empty_collection() -> anyhow::Result<()> {
        let dir = tempdir()?;
        let records = read_collection(&dir.path().join("favorites.json"), MalformedPolicy::Error)?;
        assert!(records.is_empty());
        Ok(())
    }

    #[test]
    fn write_then_read_preserves_order() -> anyhow::Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("favorites.json");

        let records = vec![favorite(1, "Red"), favorite(2, "1989")];
        write_collection(&path, &records)?;

        let loaded = read_collection(&path, MalformedPolicy::Error)?;
        assert_eq!(loaded, records);
        Ok(())
    }

    #[test]
    fn malformed_file_resets_to_empty_under_reset_policy() -> anyhow::Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("favorites.json");
        fs::write(&path, b"{ not json")?;

        let records = read_collection(&path, MalformedPolicy::Reset)?;
        assert!(records.is_empty());
        Ok(())
    }

    #[test]
    fn malformed_file_errors_under_error_policy() -> anyhow::Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("favorites.json");
        fs::write(&path, b"{ not json")?;

        let err = read_collection(&path, MalformedPolicy::Error).unwrap_err();
        assert!(matches!(err, StorageError::Malformed { .. }));
        Ok(())
    }

    #[test]
    #[cfg(unix)]
    fn failed_write_leaves_previous_file_untouched() -> anyhow::Result<()> {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempdir()?;
        let path = dir.path().join("favorites.json");
        let original = vec![favorite(1, "Red")];
        write_collection(&path, &original)?;
        let before = fs::read(&path)?;

        // Read-only directory: staging file creation fails before the
        // destination is ever touched.
        fs::set_permissions(dir.path(), fs::Permissions::from_mode(0o555))?;
        let result = write_collection(&path, &[favorite(2, "1989")]);
        fs::set_permissions(dir.path(), fs::Permissions::from_mode(0o755))?;

        assert!(matches!(result, Err(StorageError::Persistence { .. })));
        assert_eq!(fs::read(&path)?, before);

        let loaded = read_collection(&path, MalformedPolicy::Error)?;
        assert_eq!(loaded, original, "previous content still parseable");
        Ok(())
    }

    #[test]
    fn leftover_staging_file_does_not_affect_reads() -> anyhow::Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("favorites.json");
        let records = vec![favorite(1, "Red")];
        write_collection(&path, &records)?;

        // Simulates a crash between staging-file creation and the rename.
        fs::write(dir.path().join(".tmpXYZ123"), b"[{\"id\":")?;

        let loaded = read_collection(&path, MalformedPolicy::Error)?;
        assert_eq!(loaded, records);
        Ok(())
    }
}
