//! In-memory store for tests and storage-less platforms

use std::collections::HashMap;

use super::{PersistenceError, ProfileStore};

/// HashMap-backed store that records every successful write
#[derive(Debug, Default)]
pub struct MemoryStore {
    values: HashMap<String, String>,
    writes: Vec<(String, String)>,
    available: bool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            available: true,
            ..Default::default()
        }
    }

    /// A store whose every operation fails, like blocked browser storage
    pub fn unavailable() -> Self {
        Self {
            available: false,
            ..Default::default()
        }
    }

    pub fn set_available(&mut self, available: bool) {
        self.available = available;
    }

    /// Successful writes in order, as (key, value)
    pub fn writes(&self) -> &[(String, String)] {
        &self.writes
    }

    /// Number of successful writes to `key`
    pub fn write_count(&self, key: &str) -> usize {
        self.writes.iter().filter(|(k, _)| k == key).count()
    }

    fn check(&self) -> Result<(), PersistenceError> {
        if self.available {
            Ok(())
        } else {
            Err(PersistenceError::Unavailable("memory store disabled".into()))
        }
    }
}

impl ProfileStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, PersistenceError> {
        self.check()?;
        Ok(self.values.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), PersistenceError> {
        self.check()?;
        self.values.insert(key.to_string(), value.to_string());
        self.writes.push((key.to_string(), value.to_string()));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_after_set() {
        let mut store = MemoryStore::new();
        assert_eq!(store.get("k").unwrap(), None);
        store.set("k", "1").unwrap();
        store.set("k", "2").unwrap();
        assert_eq!(store.get("k").unwrap().as_deref(), Some("2"));
        assert_eq!(store.write_count("k"), 2);
    }

    #[test]
    fn test_unavailable_rejects_everything() {
        let mut store = MemoryStore::unavailable();
        assert!(matches!(store.get("k"), Err(PersistenceError::Unavailable(_))));
        assert!(store.set("k", "1").is_err());

        store.set_available(true);
        assert!(store.set("k", "1").is_ok());
    }
}
