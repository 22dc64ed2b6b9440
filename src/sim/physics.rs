//! Jump and fall integration for the player
//!
//! Ascent decelerates toward a floor so it never reverses mid-rise, the body
//! hangs for one step at the apex, then falls with capped acceleration.

use serde::{Deserialize, Serialize};

use crate::settings::Tuning;

/// Where the body is in its jump
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum JumpPhase {
    #[default]
    Grounded,
    Ascending,
    Descending,
}

/// Result of one physics step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    /// Nothing to integrate
    Idle,
    Moved,
    /// Touched the ground this step
    Landed,
}

/// The player's vertical state
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct PlayerBody {
    /// Height above ground, within [0, apex]
    pub height: f32,
    /// Positive while rising, negative (fall rate) while falling
    pub velocity: f32,
    pub phase: JumpPhase,
}

impl PlayerBody {
    pub fn is_airborne(&self) -> bool {
        self.phase != JumpPhase::Grounded
    }

    /// Begin a jump. Returns false (and does nothing) if already airborne.
    pub fn start_jump(&mut self, tuning: &Tuning) -> bool {
        if self.is_airborne() {
            return false;
        }
        self.phase = JumpPhase::Ascending;
        self.velocity = tuning.ascent_rate;
        true
    }

    /// Advance one physics step
    pub fn step(&mut self, tuning: &Tuning) -> StepOutcome {
        match self.phase {
            JumpPhase::Grounded => StepOutcome::Idle,
            JumpPhase::Ascending => {
                if self.height >= tuning.apex_height {
                    self.phase = JumpPhase::Descending;
                    self.velocity = -tuning.initial_fall_rate;
                } else {
                    self.velocity =
                        (self.velocity - tuning.ascent_decay).max(tuning.min_ascent_rate);
                    self.height = (self.height + self.velocity).min(tuning.apex_height);
                }
                StepOutcome::Moved
            }
            JumpPhase::Descending => {
                let fall =
                    (-self.velocity + tuning.fall_acceleration).min(tuning.terminal_fall_rate);
                self.height = (self.height - fall).max(0.0);
                if self.height <= 0.0 {
                    self.land();
                    StepOutcome::Landed
                } else {
                    self.velocity = -fall;
                    StepOutcome::Moved
                }
            }
        }
    }

    fn land(&mut self) {
        self.height = 0.0;
        self.velocity = 0.0;
        self.phase = JumpPhase::Grounded;
    }
}
