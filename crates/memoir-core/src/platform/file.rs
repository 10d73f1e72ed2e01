//! Directory-backed platform storage, one file per key

use crate::error::Result;
use crate::ports::PlatformStorage;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::debug;

pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    /// Entries are created lazily; the directory need not exist yet
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", urlencoding::encode(key)))
    }
}

impl PlatformStorage for FileStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>> {
        match std::fs::read_to_string(self.path_for(key)) {
            Ok(raw) => Ok(Some(raw)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn set_item(&self, key: &str, value: &str) -> Result<()> {
        std::fs::create_dir_all(&self.dir)?;

        // Write then rename so a crash never leaves a half-written entry
        let path = self.path_for(key);
        let tmp = path.with_extension("json.tmp");
        std::fs::write(&tmp, value)?;
        std::fs::rename(&tmp, &path)?;

        debug!("Stored {} bytes at {}", value.len(), path.display());
        Ok(())
    }

    fn remove_item(&self, key: &str) -> Result<()> {
        match std::fs::remove_file(self.path_for(key)) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_trip_on_disk() {
        let dir = tempfile::tempdir().unwrap();
        let storage = FileStorage::new(dir.path().join("cache"));

        assert_eq!(storage.get_item("memoir_todos").unwrap(), None);

        storage.set_item("memoir_todos", "[]").unwrap();
        assert_eq!(storage.get_item("memoir_todos").unwrap().as_deref(), Some("[]"));
        assert!(dir.path().join("cache/memoir_todos.json").exists());

        storage.remove_item("memoir_todos").unwrap();
        storage.remove_item("memoir_todos").unwrap();
        assert_eq!(storage.get_item("memoir_todos").unwrap(), None);
    }

    #[test]
    fn test_keys_are_path_safe() {
        let dir = tempfile::tempdir().unwrap();
        let storage = FileStorage::new(dir.path());

        storage.set_item("../escape/key", "1").unwrap();
        assert_eq!(storage.get_item("../escape/key").unwrap().as_deref(), Some("1"));
        assert!(!dir.path().join("../escape").exists());
    }
}
