//! Game balance and tuning
//!
//! Every gameplay constant lives here so runs can be rebalanced from a JSON
//! file without recompiling. Missing fields fall back to [`crate::consts`].

use std::io::ErrorKind;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::profile::SkinId;

/// A skin that unlocks once the high score reaches a threshold
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkinUnlock {
    pub skin: SkinId,
    pub high_score: u64,
}

/// Tunable gameplay parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Playfield ===
    pub field_width: f32,
    pub left_margin: f32,
    /// Upper bound on one frame's catch-up work (ms)
    pub max_frame_ms: u64,

    // === Collision ===
    pub near_field_width: f32,
    pub ground_clearance: f32,
    pub flying_clearance_margin: f32,
    pub pickup_reach: f32,

    // === Jump ===
    pub jump_step_ms: u64,
    pub apex_height: f32,
    pub ascent_rate: f32,
    pub ascent_decay: f32,
    pub min_ascent_rate: f32,
    pub initial_fall_rate: f32,
    pub fall_acceleration: f32,
    pub terminal_fall_rate: f32,

    // === Obstacles ===
    pub base_obstacle_speed: f32,
    pub flying_heights: [f32; 3],
    pub first_spawn_delay_ms: u64,
    /// Shortest spawn delay at difficulty 1 (divided by difficulty)
    pub spawn_delay_min_ms: f32,
    /// Width of the random spawn delay range at difficulty 1
    pub spawn_delay_span_ms: f32,

    // === Shield pickups ===
    pub power_up_interval_ms: u64,
    /// Probability that a power-up roll spawns a pickup
    pub power_up_chance: f64,
    pub power_up_speed_factor: f32,
    pub power_up_heights: [f32; 3],
    pub shield_duration_secs: i32,

    // === Score & difficulty ===
    pub score_interval_ms: u64,
    pub score_threshold: u64,
    pub difficulty_increment: f32,
    pub difficulty_cap: f32,
    pub base_tick_interval_ms: u64,
    pub min_tick_interval_ms: u64,

    // === Skins ===
    pub skin_unlocks: Vec<SkinUnlock>,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            field_width: FIELD_WIDTH,
            left_margin: LEFT_MARGIN,
            max_frame_ms: MAX_FRAME_MS,

            near_field_width: NEAR_FIELD_WIDTH,
            ground_clearance: GROUND_CLEARANCE,
            flying_clearance_margin: FLYING_CLEARANCE_MARGIN,
            pickup_reach: PICKUP_REACH,

            jump_step_ms: JUMP_STEP_MS,
            apex_height: APEX_HEIGHT,
            ascent_rate: ASCENT_RATE,
            ascent_decay: ASCENT_DECAY,
            min_ascent_rate: MIN_ASCENT_RATE,
            initial_fall_rate: INITIAL_FALL_RATE,
            fall_acceleration: FALL_ACCELERATION,
            terminal_fall_rate: TERMINAL_FALL_RATE,

            base_obstacle_speed: BASE_OBSTACLE_SPEED,
            flying_heights: FLYING_HEIGHTS,
            first_spawn_delay_ms: FIRST_SPAWN_DELAY_MS,
            spawn_delay_min_ms: SPAWN_DELAY_MIN_MS,
            spawn_delay_span_ms: SPAWN_DELAY_SPAN_MS,

            power_up_interval_ms: POWER_UP_INTERVAL_MS,
            power_up_chance: POWER_UP_CHANCE,
            power_up_speed_factor: POWER_UP_SPEED_FACTOR,
            power_up_heights: POWER_UP_HEIGHTS,
            shield_duration_secs: SHIELD_DURATION_SECS,

            score_interval_ms: SCORE_INTERVAL_MS,
            score_threshold: SCORE_THRESHOLD,
            difficulty_increment: DIFFICULTY_INCREMENT,
            difficulty_cap: DIFFICULTY_CAP,
            base_tick_interval_ms: BASE_TICK_INTERVAL_MS,
            min_tick_interval_ms: MIN_TICK_INTERVAL_MS,

            skin_unlocks: vec![SkinUnlock {
                skin: SkinId::golden(),
                high_score: GOLDEN_SKIN_SCORE,
            }],
        }
    }
}

impl Tuning {
    /// Parse tuning from JSON; absent fields keep their defaults
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str::<Self>(json).map(Self::sanitized)
    }

    /// Load tuning from a JSON file, falling back to defaults
    pub fn load(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        match std::fs::read_to_string(path) {
            Ok(json) => match Self::from_json(&json) {
                Ok(tuning) => {
                    log::info!("Loaded tuning from {}", path.display());
                    tuning
                }
                Err(e) => {
                    log::warn!("Invalid tuning file {}: {}", path.display(), e);
                    Self::default()
                }
            },
            Err(e) if e.kind() == ErrorKind::NotFound => {
                log::info!("No tuning file at {}, using defaults", path.display());
                Self::default()
            }
            Err(e) => {
                log::warn!("Could not read tuning file {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    /// Write tuning as pretty JSON
    pub fn save(&self, path: impl AsRef<Path>) -> std::io::Result<()> {
        let json = serde_json::to_string_pretty(self).map_err(std::io::Error::other)?;
        std::fs::write(path, json)
    }

    /// Clamp values that would break simulation invariants
    fn sanitized(mut self) -> Self {
        self.difficulty_cap = self.difficulty_cap.max(1.0);
        self.difficulty_increment = self.difficulty_increment.max(0.0);
        self.max_frame_ms = self.max_frame_ms.max(1);
        self.jump_step_ms = self.jump_step_ms.max(1);
        self.score_interval_ms = self.score_interval_ms.max(1);
        self.power_up_interval_ms = self.power_up_interval_ms.max(1);
        self.min_tick_interval_ms = self.min_tick_interval_ms.max(1);
        self.base_tick_interval_ms = self.base_tick_interval_ms.max(self.min_tick_interval_ms);
        self.score_threshold = self.score_threshold.max(1);
        self.power_up_chance = self.power_up_chance.clamp(0.0, 1.0);
        self.min_ascent_rate = self.min_ascent_rate.max(f32::EPSILON);
        self.ascent_rate = self.ascent_rate.max(self.min_ascent_rate);
        self.initial_fall_rate = self.initial_fall_rate.max(f32::EPSILON);
        self.terminal_fall_rate = self.terminal_fall_rate.max(self.initial_fall_rate);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_json_keeps_defaults() {
        let tuning = Tuning::from_json(r#"{ "field_width": 1200.0, "difficulty_cap": 4.0 }"#)
            .unwrap();
        assert_eq!(tuning.field_width, 1200.0);
        assert_eq!(tuning.difficulty_cap, 4.0);
        assert_eq!(tuning.apex_height, APEX_HEIGHT);
        assert_eq!(tuning.skin_unlocks.len(), 1);
    }

    #[test]
    fn test_sanitize_rejects_broken_values() {
        let json = r#"{
            "difficulty_cap": 0.5,
            "min_tick_interval_ms": 0,
            "base_tick_interval_ms": 0,
            "power_up_chance": 7.0
        }"#;
        let tuning = Tuning::from_json(json).unwrap();
        assert_eq!(tuning.difficulty_cap, 1.0);
        assert_eq!(tuning.min_tick_interval_ms, 1);
        assert_eq!(tuning.base_tick_interval_ms, 1);
        assert_eq!(tuning.power_up_chance, 1.0);
    }

    #[test]
    fn test_zero_frame_budget_is_clamped() {
        let tuning = Tuning::from_json(r#"{ "max_frame_ms": 0 }"#).unwrap();
        assert_eq!(tuning.max_frame_ms, 1);
    }

    #[test]
    fn test_load_unreadable_path_uses_defaults() {
        // a directory exists but cannot be read as a file
        let dir = std::env::temp_dir().join(format!("dune-dash-tuning-dir-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        assert_eq!(Tuning::load(&dir), Tuning::default());
        let _ = std::fs::remove_dir(&dir);
    }

    #[test]
    fn test_invalid_json_is_an_error() {
        assert!(Tuning::from_json("{ not json").is_err());
    }

    #[test]
    fn test_load_missing_file_uses_defaults() {
        let path = std::env::temp_dir().join("dune-dash-missing-tuning.json");
        let _ = std::fs::remove_file(&path);
        assert_eq!(Tuning::load(&path), Tuning::default());
    }

    #[test]
    fn test_save_then_load() {
        let name = format!("dune-dash-tuning-{}.json", std::process::id());
        let path = std::env::temp_dir().join(name);
        let mut tuning = Tuning::default();
        tuning.shield_duration_secs = 9;
        tuning.save(&path).unwrap();
        assert_eq!(Tuning::load(&path).shield_duration_secs, 9);
        let _ = std::fs::remove_file(&path);
    }
}
