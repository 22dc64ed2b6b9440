//! Dune Dash - an endless side-scrolling runner core
//!
//! Core modules:
//! - `sim`: Deterministic simulation (scheduler, jump physics, spawning, collisions, game state)
//! - `persistence`: Profile storage over an abstract key-value store
//! - `profile`: High score and skin unlock bookkeeping
//! - `settings`: Data-driven game balance

pub mod persistence;
pub mod profile;
pub mod settings;
pub mod sim;

pub use persistence::{FileStore, MemoryStore, PersistenceAdapter, PersistenceError, ProfileStore};
pub use profile::{PersistentProfile, SkinId};
pub use settings::Tuning;
pub use sim::{Game, GameEvent, GamePhase, TickInput};

/// Game configuration constants (defaults for [`Tuning`])
pub mod consts {
    /// Upper bound on one frame's catch-up work (ms)
    pub const MAX_FRAME_MS: u64 = 100;

    /// Playfield: obstacles enter at the right edge and leave past the left margin
    pub const FIELD_WIDTH: f32 = 800.0;
    pub const LEFT_MARGIN: f32 = -20.0;

    /// Collision window in front of the player
    pub const NEAR_FIELD_WIDTH: f32 = 60.0;
    /// Height needed to clear a ground-based obstacle
    pub const GROUND_CLEARANCE: f32 = 60.0;
    /// Extra height above a flying obstacle's offset that still collides
    pub const FLYING_CLEARANCE_MARGIN: f32 = 20.0;
    /// Vertical reach for grabbing a pickup
    pub const PICKUP_REACH: f32 = 50.0;

    /// Jump physics (units per physics step)
    pub const JUMP_STEP_MS: u64 = 20;
    pub const APEX_HEIGHT: f32 = 150.0;
    pub const ASCENT_RATE: f32 = 8.0;
    pub const ASCENT_DECAY: f32 = 0.3;
    pub const MIN_ASCENT_RATE: f32 = 4.0;
    pub const INITIAL_FALL_RATE: f32 = 5.0;
    pub const FALL_ACCELERATION: f32 = 0.2;
    pub const TERMINAL_FALL_RATE: f32 = 10.0;

    /// Obstacles
    pub const BASE_OBSTACLE_SPEED: f32 = 10.0;
    pub const FLYING_HEIGHTS: [f32; 3] = [40.0, 80.0, 120.0];
    pub const FIRST_SPAWN_DELAY_MS: u64 = 1000;
    pub const SPAWN_DELAY_MIN_MS: f32 = 1000.0;
    pub const SPAWN_DELAY_SPAN_MS: f32 = 4000.0;

    /// Shield pickups
    pub const POWER_UP_INTERVAL_MS: u64 = 1000;
    pub const POWER_UP_CHANCE: f64 = 0.15;
    pub const POWER_UP_SPEED_FACTOR: f32 = 0.6;
    pub const POWER_UP_HEIGHTS: [f32; 3] = [40.0, 80.0, 120.0];
    pub const SHIELD_DURATION_SECS: i32 = 5;

    /// Score and difficulty
    pub const SCORE_INTERVAL_MS: u64 = 100;
    pub const SCORE_THRESHOLD: u64 = 100;
    pub const DIFFICULTY_INCREMENT: f32 = 0.5;
    pub const DIFFICULTY_CAP: f32 = 3.0;
    pub const BASE_TICK_INTERVAL_MS: u64 = 20;
    pub const MIN_TICK_INTERVAL_MS: u64 = 10;

    /// High score at which the golden skin unlocks
    pub const GOLDEN_SKIN_SCORE: u64 = 500;
}
