//! Game state and core simulation types
//!
//! Everything a run mutates lives in [`GameState`]; there are no globals.

use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::physics::PlayerBody;
use crate::profile::SkinId;
use crate::settings::Tuning;

/// Current phase of the run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Before the first start
    Idle,
    /// Active gameplay
    Running,
    /// Run ended on a fatal collision
    GameOver,
}

/// Obstacle types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ObstacleKind {
    /// Short ground obstacle
    Ground,
    /// Tall ground obstacle
    Tall,
    /// Airborne obstacle at one of three heights
    Flying,
}

impl ObstacleKind {
    pub const ALL: [ObstacleKind; 3] =
        [ObstacleKind::Ground, ObstacleKind::Tall, ObstacleKind::Flying];

    /// Ground-based kinds share a single clearance height
    pub fn is_ground_based(&self) -> bool {
        !matches!(self, ObstacleKind::Flying)
    }
}

/// An obstacle scrolling toward the player
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Obstacle {
    pub id: u32,
    pub kind: ObstacleKind,
    /// Horizontal distance from the player
    pub x: f32,
    /// Height above ground (0 for ground-based kinds)
    pub height_offset: f32,
    /// Distance moved per field advance, fixed at spawn
    pub speed: f32,
}

/// A shield pickup scrolling toward the player
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PowerUp {
    pub id: u32,
    pub x: f32,
    pub height_offset: f32,
    pub speed: f32,
}

/// Why an obstacle left the field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RemovalReason {
    /// Scrolled past the left margin
    Passed,
    /// Absorbed by an active shield
    Deflected,
    /// Hit the unshielded player
    Collided,
    /// Field cleared at game over
    Cleared,
}

/// Shield granted by a pickup
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShieldState {
    pub active: bool,
    pub seconds_remaining: i32,
}

impl ShieldState {
    pub fn activate(&mut self, seconds: i32) {
        self.active = seconds > 0;
        self.seconds_remaining = seconds.max(0);
    }

    /// One second elapsed. Returns true if the shield just ran out.
    pub fn count_down(&mut self) -> bool {
        if !self.active {
            return false;
        }
        self.seconds_remaining -= 1;
        if self.seconds_remaining <= 0 {
            self.active = false;
            self.seconds_remaining = 0;
            return true;
        }
        false
    }
}

/// Per-run counters and pacing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunState {
    pub score: u64,
    /// 1.0 at start, rises with score up to the cap
    pub difficulty_level: f32,
    /// Speed given to the next obstacle spawned
    pub obstacle_speed_scale: f32,
    /// Period of the field advance task
    pub tick_interval_ms: u64,
    pub phase: GamePhase,
}

impl RunState {
    pub fn new(tuning: &Tuning) -> Self {
        Self {
            score: 0,
            difficulty_level: 1.0,
            obstacle_speed_scale: tuning.base_obstacle_speed,
            tick_interval_ms: tuning.base_tick_interval_ms,
            phase: GamePhase::Idle,
        }
    }

    /// Back to baseline pacing, keeping the phase
    pub fn reset(&mut self, tuning: &Tuning) {
        let phase = self.phase;
        *self = Self::new(tuning);
        self.phase = phase;
    }
}

/// Output events for the presentation layer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    ScoreChanged(u64),
    PhaseChanged(GamePhase),
    ShieldChanged { active: bool, seconds_remaining: i32 },
    ObstacleSpawned(Obstacle),
    ObstacleRemoved { obstacle: Obstacle, reason: RemovalReason },
    /// Shield absorbed a hit (brief visual acknowledgment)
    ObstacleDeflected(Obstacle),
    PowerUpSpawned(PowerUp),
    PowerUpCollected(PowerUp),
    /// Pickup scrolled away or was cleared uncollected
    PowerUpRemoved(PowerUp),
    DifficultyChanged(f32),
    MilestoneReached(u64),
    NewHighScore(u64),
    SkinUnlocked(SkinId),
    SkinSelected(SkinId),
    Jumped,
    Landed,
}

/// Complete simulation state of one game session
#[derive(Debug, Clone)]
pub struct GameState {
    /// Session seed for reproducibility
    pub seed: u64,
    pub rng: Pcg32,
    pub run: RunState,
    pub body: PlayerBody,
    pub shield: ShieldState,
    /// Active obstacles (sorted by id)
    pub obstacles: Vec<Obstacle>,
    /// Active pickups (sorted by id)
    pub power_ups: Vec<PowerUp>,
    /// Pending output events, oldest first
    pub events: Vec<GameEvent>,
    next_id: u32,
}

impl GameState {
    pub fn new(seed: u64, tuning: &Tuning) -> Self {
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            run: RunState::new(tuning),
            body: PlayerBody::default(),
            shield: ShieldState::default(),
            obstacles: Vec::new(),
            power_ups: Vec::new(),
            events: Vec::new(),
            next_id: 1,
        }
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    pub fn emit(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Add an obstacle to the field and announce it
    pub fn insert_obstacle(
        &mut self,
        kind: ObstacleKind,
        x: f32,
        height_offset: f32,
        speed: f32,
    ) -> u32 {
        let id = self.next_entity_id();
        let obstacle = Obstacle {
            id,
            kind,
            x,
            height_offset,
            speed,
        };
        self.emit(GameEvent::ObstacleSpawned(obstacle.clone()));
        self.obstacles.push(obstacle);
        id
    }

    /// Add a pickup to the field and announce it
    pub fn insert_power_up(&mut self, x: f32, height_offset: f32, speed: f32) -> u32 {
        let id = self.next_entity_id();
        let power_up = PowerUp {
            id,
            x,
            height_offset,
            speed,
        };
        self.emit(GameEvent::PowerUpSpawned(power_up.clone()));
        self.power_ups.push(power_up);
        id
    }

    pub fn remove_obstacle(&mut self, id: u32, reason: RemovalReason) -> Option<Obstacle> {
        let idx = self.obstacles.iter().position(|o| o.id == id)?;
        let obstacle = self.obstacles.remove(idx);
        self.emit(GameEvent::ObstacleRemoved {
            obstacle: obstacle.clone(),
            reason,
        });
        Some(obstacle)
    }

    /// Remove everything on the field
    pub fn clear_field(&mut self) {
        for obstacle in std::mem::take(&mut self.obstacles) {
            self.emit(GameEvent::ObstacleRemoved {
                obstacle,
                reason: RemovalReason::Cleared,
            });
        }
        for power_up in std::mem::take(&mut self.power_ups) {
            self.emit(GameEvent::PowerUpRemoved(power_up));
        }
    }

    /// Fresh run: baseline pacing, grounded player, no shield, empty field
    pub fn reset_run(&mut self, tuning: &Tuning) {
        self.clear_field();
        self.run.reset(tuning);
        self.body = PlayerBody::default();
        if self.shield.active {
            self.shield = ShieldState::default();
            self.emit(GameEvent::ShieldChanged {
                active: false,
                seconds_remaining: 0,
            });
        }
    }
}
