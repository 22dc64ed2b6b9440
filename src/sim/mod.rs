//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Logical clock only, advanced by the host
//! - Seeded RNG only
//! - Stable iteration order (by entity ID)
//! - No rendering or platform dependencies

pub mod collision;
pub mod difficulty;
pub mod game;
pub mod physics;
pub mod scheduler;
pub mod spawn;
pub mod state;
pub mod tick;

pub use collision::{CollisionReport, evaluate};
pub use game::Game;
pub use physics::{JumpPhase, PlayerBody, StepOutcome};
pub use scheduler::{Scheduler, TaskKind};
pub use state::{
    GameEvent, GamePhase, GameState, Obstacle, ObstacleKind, PowerUp, RemovalReason, RunState,
    ShieldState,
};
pub use tick::TickInput;
