//! File-backed history storage.

use std::path::{Path, PathBuf};

use crate::config::Paths;
use crate::error::PomoError;

use super::{atomic_write, HistoryStorage};

/// Stores the history document in a single file.
#[derive(Debug, Clone)]
pub struct FileStorage {
    path: PathBuf,
}

impl FileStorage {
    /// Storage at the default history location.
    #[must_use]
    pub fn new(paths: &Paths) -> Self {
        Self::at(paths.history_file.clone())
    }

    /// Storage at a specific file (useful for testing).
    #[must_use]
    pub const fn at(path: PathBuf) -> Self {
        Self { path }
    }

    /// Path of the backing file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl HistoryStorage for FileStorage {
    fn load(&self) -> Result<Option<Vec<u8>>, PomoError> {
        match std::fs::read(&self.path) {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(PomoError::Storage(format!(
                "Failed to read {}: {e}",
                self.path.display()
            ))),
        }
    }

    fn save(&self, bytes: &[u8]) -> Result<(), PomoError> {
        atomic_write(&self.path, bytes).map_err(|e| {
            PomoError::Storage(format!("Failed to write {}: {e}", self.path.display()))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_loads_none() {
        let temp_dir = TempDir::new().unwrap();
        let storage = FileStorage::at(temp_dir.path().join("history.json"));

        assert!(storage.load().unwrap().is_none());
    }

    #[test]
    fn test_save_then_load() {
        let temp_dir = TempDir::new().unwrap();
        let storage = FileStorage::at(temp_dir.path().join("data/history.json"));

        storage.save(b"{\"total_work_time\": 5}").unwrap();

        let bytes = storage.load().unwrap().unwrap();
        assert_eq!(bytes, b"{\"total_work_time\": 5}");
    }

    #[test]
    fn test_save_into_unwritable_location_fails() {
        let temp_dir = TempDir::new().unwrap();
        // A regular file where a directory is expected
        let blocker = temp_dir.path().join("blocker");
        std::fs::write(&blocker, b"x").unwrap();
        let storage = FileStorage::at(blocker.join("history.json"));

        assert!(matches!(storage.save(b"{}"), Err(PomoError::Storage(_))));
    }
}
