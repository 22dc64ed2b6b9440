//! Collision evaluation between the player and the field
//!
//! Only things inside the near-field window in front of the player are
//! tested. Obstacles use a directional clearance test; pickups use a looser
//! vertical distance check so they are easy to grab.

use super::state::{Obstacle, PowerUp, ShieldState};
use crate::settings::Tuning;

/// Result of one evaluation pass
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CollisionReport {
    /// Obstacle that ended the run; nothing after it was evaluated
    pub fatal: Option<u32>,
    /// Obstacles absorbed by the shield
    pub deflected: Vec<u32>,
    /// Pickups the player grabbed
    pub collected: Vec<u32>,
}

impl CollisionReport {
    pub fn is_fatal(&self) -> bool {
        self.fatal.is_some()
    }
}

/// Whether `x` lies in the near-field window [0, width)
#[inline]
pub fn in_near_field(x: f32, tuning: &Tuning) -> bool {
    (0.0..tuning.near_field_width).contains(&x)
}

/// Check an obstacle against the player's current height
pub fn obstacle_hits_player(obstacle: &Obstacle, height: f32, tuning: &Tuning) -> bool {
    if !in_near_field(obstacle.x, tuning) {
        return false;
    }
    if obstacle.kind.is_ground_based() {
        height < tuning.ground_clearance
    } else {
        height < obstacle.height_offset + tuning.flying_clearance_margin
    }
}

/// Check a pickup against the player's current height
pub fn power_up_reached(power_up: &PowerUp, height: f32, tuning: &Tuning) -> bool {
    in_near_field(power_up.x, tuning)
        && (height - power_up.height_offset).abs() < tuning.pickup_reach
}

/// Evaluate every obstacle, then every pickup, for one tick.
///
/// An unshielded hit is fatal and stops evaluation immediately, so no pickup
/// is resolved in the tick the run ends. With a shield up every hit is
/// deflected and pickups are still collected.
pub fn evaluate(
    height: f32,
    shield: &ShieldState,
    obstacles: &[Obstacle],
    power_ups: &[PowerUp],
    tuning: &Tuning,
) -> CollisionReport {
    let mut report = CollisionReport::default();

    for obstacle in obstacles {
        if !obstacle_hits_player(obstacle, height, tuning) {
            continue;
        }
        if shield.active {
            report.deflected.push(obstacle.id);
        } else {
            report.fatal = Some(obstacle.id);
            return report;
        }
    }

    report.collected = power_ups
        .iter()
        .filter(|p| power_up_reached(p, height, tuning))
        .map(|p| p.id)
        .collect();
    report
}
