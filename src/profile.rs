//! Player profile: high score and skins
//!
//! Lives across runs. Loaded once at startup through the persistence
//! adapter and written back whenever the high score or skin set changes.

use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::settings::SkinUnlock;

/// Identifier of a player skin
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SkinId(pub String);

impl SkinId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Skin every profile starts with
    pub fn classic() -> Self {
        Self::new("classic")
    }

    pub fn golden() -> Self {
        Self::new("golden")
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SkinId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Long-lived player profile
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersistentProfile {
    pub high_score: u64,
    pub unlocked_skins: BTreeSet<SkinId>,
    pub current_skin: SkinId,
}

impl Default for PersistentProfile {
    fn default() -> Self {
        Self {
            high_score: 0,
            unlocked_skins: BTreeSet::from([SkinId::classic()]),
            current_skin: SkinId::classic(),
        }
    }
}

impl PersistentProfile {
    /// Record a finished run. Returns true if it set a new high score.
    pub fn record_score(&mut self, score: u64) -> bool {
        if score > self.high_score {
            self.high_score = score;
            true
        } else {
            false
        }
    }

    /// Unlock every skin whose threshold the high score has reached.
    /// Returns the newly unlocked skins in table order.
    pub fn apply_unlocks(&mut self, unlocks: &[SkinUnlock]) -> Vec<SkinId> {
        let mut unlocked = Vec::new();
        for unlock in unlocks {
            if self.high_score >= unlock.high_score
                && self.unlocked_skins.insert(unlock.skin.clone())
            {
                unlocked.push(unlock.skin.clone());
            }
        }
        unlocked
    }

    pub fn is_unlocked(&self, skin: &SkinId) -> bool {
        self.unlocked_skins.contains(skin)
    }

    /// Switch to an unlocked skin. Returns true if the selection changed.
    pub fn select_skin(&mut self, skin: &SkinId) -> bool {
        if !self.is_unlocked(skin) || &self.current_skin == skin {
            return false;
        }
        self.current_skin = skin.clone();
        true
    }
}
