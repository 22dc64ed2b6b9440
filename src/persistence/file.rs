//! Directory-backed store: one `<key>.json` file per key

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use super::{PersistenceError, ProfileStore};

#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

impl ProfileStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, PersistenceError> {
        match std::fs::read_to_string(self.path_for(key)) {
            Ok(value) => Ok(Some(value)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), PersistenceError> {
        std::fs::create_dir_all(&self.dir)?;
        // Write-then-rename so a crash never leaves a half-written value
        let tmp = self.dir.join(format!("{key}.json.tmp"));
        std::fs::write(&tmp, value)?;
        std::fs::rename(&tmp, self.path_for(key))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scratch_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("dune-dash-{}-{}", name, std::process::id()));
        let _ = std::fs::remove_dir_all(&dir);
        dir
    }

    #[test]
    fn test_missing_key_is_none() {
        let store = FileStore::new(scratch_dir("missing"));
        assert_eq!(store.get("high_score").unwrap(), None);
    }

    #[test]
    fn test_set_creates_directory() {
        let dir = scratch_dir("create");
        let mut store = FileStore::new(&dir);
        store.set("high_score", "42").unwrap();
        assert_eq!(store.get("high_score").unwrap().as_deref(), Some("42"));
        assert!(dir.join("high_score.json").exists());
        assert!(!dir.join("high_score.json.tmp").exists());
        let _ = std::fs::remove_dir_all(&dir);
    }
}
