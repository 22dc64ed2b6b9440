//! Profile persistence over an abstract key-value store
//!
//! Features:
//! - JSON-encoded values under fixed keys
//! - Pluggable backends (in-memory, one-file-per-key directory)
//! - Failures are logged and swallowed; gameplay never depends on storage

pub mod file;
pub mod memory;

pub use file::FileStore;
pub use memory::MemoryStore;

use std::collections::BTreeSet;

use serde::Serialize;
use serde::de::DeserializeOwned;
use thiserror::Error;

use crate::profile::{PersistentProfile, SkinId};

/// Storage backend failure
#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("storage I/O failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("stored value is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("storage unavailable: {0}")]
    Unavailable(String),
}

/// Minimal key-value store the profile is written to
pub trait ProfileStore {
    fn get(&self, key: &str) -> Result<Option<String>, PersistenceError>;
    fn set(&mut self, key: &str, value: &str) -> Result<(), PersistenceError>;
}

/// Reads and writes the player profile, swallowing storage failures
#[derive(Debug)]
pub struct PersistenceAdapter<S> {
    store: S,
}

impl<S: ProfileStore> PersistenceAdapter<S> {
    pub const HIGH_SCORE_KEY: &'static str = "high_score";
    pub const UNLOCKED_SKINS_KEY: &'static str = "unlocked_skins";
    pub const CURRENT_SKIN_KEY: &'static str = "current_skin";

    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    /// Load the profile; any missing or unreadable field keeps its default
    pub fn load_profile(&self) -> PersistentProfile {
        let mut profile = PersistentProfile::default();

        if let Some(high_score) = self.read::<u64>(Self::HIGH_SCORE_KEY) {
            profile.high_score = high_score;
        }
        if let Some(skins) = self.read::<BTreeSet<SkinId>>(Self::UNLOCKED_SKINS_KEY) {
            profile.unlocked_skins.extend(skins);
        }
        if let Some(skin) = self.read::<SkinId>(Self::CURRENT_SKIN_KEY) {
            if profile.is_unlocked(&skin) {
                profile.current_skin = skin;
            } else {
                log::warn!(
                    "Stored skin '{}' is not unlocked, using {}",
                    skin, profile.current_skin
                );
            }
        }

        log::info!(
            "Loaded profile: high score {}, {} skins",
            profile.high_score,
            profile.unlocked_skins.len()
        );
        profile
    }

    pub fn save_high_score(&mut self, high_score: u64) {
        self.write(Self::HIGH_SCORE_KEY, &high_score);
    }

    pub fn save_unlocked_skins(&mut self, skins: &BTreeSet<SkinId>) {
        self.write(Self::UNLOCKED_SKINS_KEY, skins);
    }

    pub fn save_current_skin(&mut self, skin: &SkinId) {
        self.write(Self::CURRENT_SKIN_KEY, skin);
    }

    fn read<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let result = self
            .store
            .get(key)
            .and_then(|raw| {
                raw.map(|json| serde_json::from_str(&json))
                    .transpose()
                    .map_err(Into::into)
            });
        match result {
            Ok(value) => value,
            Err(e) => {
                log::warn!("Could not read '{}': {}", key, e);
                None
            }
        }
    }

    fn write<T: Serialize + ?Sized>(&mut self, key: &str, value: &T) {
        let result = serde_json::to_string(value)
            .map_err(PersistenceError::from)
            .and_then(|json| self.store.set(key, &json));
        match result {
            Ok(()) => log::debug!("Saved '{}'", key),
            Err(e) => log::warn!("Could not save '{}': {}", key, e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    type Adapter = PersistenceAdapter<MemoryStore>;

    #[test]
    fn test_empty_store_gives_default_profile() {
        let adapter = Adapter::new(MemoryStore::new());
        assert_eq!(adapter.load_profile(), PersistentProfile::default());
    }

    #[test]
    fn test_profile_survives_a_save_cycle() {
        let mut adapter = Adapter::new(MemoryStore::new());
        let skins = BTreeSet::from([SkinId::classic(), SkinId::golden()]);
        adapter.save_high_score(640);
        adapter.save_unlocked_skins(&skins);
        adapter.save_current_skin(&SkinId::golden());

        let profile = adapter.load_profile();
        assert_eq!(profile.high_score, 640);
        assert_eq!(profile.unlocked_skins, skins);
        assert_eq!(profile.current_skin, SkinId::golden());
    }

    #[test]
    fn test_corrupt_values_fall_back_to_defaults() {
        let mut store = MemoryStore::new();
        store.set(Adapter::HIGH_SCORE_KEY, "\"lots\"").unwrap();
        store.set(Adapter::CURRENT_SKIN_KEY, "\"golden\"").unwrap();
        let adapter = Adapter::new(store);

        let profile = adapter.load_profile();
        assert_eq!(profile.high_score, 0);
        // golden was never unlocked
        assert_eq!(profile.current_skin, SkinId::classic());
    }

    #[test]
    fn test_unavailable_store_is_swallowed() {
        let mut adapter = Adapter::new(MemoryStore::unavailable());
        adapter.save_high_score(10);
        assert!(adapter.store().writes().is_empty());
        assert_eq!(adapter.load_profile(), PersistentProfile::default());
    }
}
