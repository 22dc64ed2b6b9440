//! Procedural obstacle and shield pickup generation
//!
//! Spawns draw from the state's seeded RNG so a session replays exactly.

use rand::Rng;

use super::state::{GameEvent, GameState, ObstacleKind, RemovalReason};
use crate::settings::Tuning;

/// Spawn one obstacle at the right edge and return the delay (ms) until the
/// next spawn. Higher difficulty means faster obstacles and shorter delays.
pub fn spawn_next(state: &mut GameState, tuning: &Tuning) -> u64 {
    let difficulty = state.run.difficulty_level.max(1.0);

    let kind = ObstacleKind::ALL[state.rng.random_range(0..ObstacleKind::ALL.len())];
    let height_offset = match kind {
        ObstacleKind::Flying => {
            let slot = state.rng.random_range(0..tuning.flying_heights.len());
            tuning.flying_heights[slot]
        }
        _ => 0.0,
    };
    let speed = tuning.base_obstacle_speed * difficulty;
    let id = state.insert_obstacle(kind, tuning.field_width, height_offset, speed);

    let min_delay = tuning.spawn_delay_min_ms / difficulty;
    let span = tuning.spawn_delay_span_ms.max(0.0) / difficulty;
    let delay = min_delay + state.rng.random::<f32>() * span;
    log::debug!("Obstacle {} ({:?}) spawned, next in {:.0}ms", id, kind, delay);
    delay.round().max(1.0) as u64
}

/// Roll for a shield pickup. Returns the new pickup's id if one spawned.
pub fn maybe_spawn(state: &mut GameState, tuning: &Tuning) -> Option<u32> {
    if !state.rng.random_bool(tuning.power_up_chance.clamp(0.0, 1.0)) {
        return None;
    }
    let slot = state.rng.random_range(0..tuning.power_up_heights.len());
    let height_offset = tuning.power_up_heights[slot];
    let difficulty = state.run.difficulty_level.max(1.0);
    let speed = tuning.base_obstacle_speed * difficulty * tuning.power_up_speed_factor;
    let id = state.insert_power_up(tuning.field_width, height_offset, speed);
    log::debug!("Shield pickup {} spawned at height {}", id, height_offset);
    Some(id)
}

/// Scroll everything left by its speed and drop what passed the left margin
pub fn advance_field(state: &mut GameState, tuning: &Tuning) {
    for obstacle in &mut state.obstacles {
        obstacle.x -= obstacle.speed;
    }
    for power_up in &mut state.power_ups {
        power_up.x -= power_up.speed;
    }

    let (passed, kept): (Vec<_>, Vec<_>) = std::mem::take(&mut state.obstacles)
        .into_iter()
        .partition(|o| o.x < tuning.left_margin);
    state.obstacles = kept;
    for obstacle in passed {
        state.emit(GameEvent::ObstacleRemoved {
            obstacle,
            reason: RemovalReason::Passed,
        });
    }

    let (gone, kept): (Vec<_>, Vec<_>) = std::mem::take(&mut state.power_ups)
        .into_iter()
        .partition(|p| p.x < tuning.left_margin);
    state.power_ups = kept;
    for power_up in gone {
        state.emit(GameEvent::PowerUpRemoved(power_up));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spawn_places_at_right_edge() {
        let tuning = Tuning::default();
        let mut state = GameState::new(7, &tuning);
        for _ in 0..50 {
            spawn_next(&mut state, &tuning);
        }
        for obstacle in &state.obstacles {
            assert_eq!(obstacle.x, tuning.field_width);
            assert_eq!(obstacle.speed, 10.0);
            if obstacle.kind == ObstacleKind::Flying {
                assert!(tuning.flying_heights.contains(&obstacle.height_offset));
            } else {
                assert_eq!(obstacle.height_offset, 0.0);
            }
        }
        // 50 uniform draws over three kinds hit all of them
        for kind in ObstacleKind::ALL {
            assert!(state.obstacles.iter().any(|o| o.kind == kind));
        }
    }

    #[test]
    fn test_spawn_delay_shrinks_with_difficulty() {
        let tuning = Tuning::default();
        let mut state = GameState::new(11, &tuning);
        for _ in 0..100 {
            let delay = spawn_next(&mut state, &tuning);
            assert!((1000..=5000).contains(&delay));
        }

        state.run.difficulty_level = 2.0;
        for _ in 0..100 {
            let delay = spawn_next(&mut state, &tuning);
            assert!((500..=2500).contains(&delay));
        }
        assert_eq!(state.obstacles.last().map(|o| o.speed), Some(20.0));
    }

    #[test]
    fn test_power_up_chance_extremes() {
        let mut tuning = Tuning::default();
        let mut state = GameState::new(3, &tuning);

        tuning.power_up_chance = 0.0;
        assert!((0..100).all(|_| maybe_spawn(&mut state, &tuning).is_none()));

        tuning.power_up_chance = 1.0;
        let id = maybe_spawn(&mut state, &tuning).unwrap();
        let power_up = state.power_ups.iter().find(|p| p.id == id).unwrap();
        assert!((power_up.speed - 6.0).abs() < 1e-4);
        assert!(tuning.power_up_heights.contains(&power_up.height_offset));
    }

    #[test]
    fn test_passed_obstacles_are_removed() {
        let tuning = Tuning::default();
        let mut state = GameState::new(1, &tuning);
        let gone = state.insert_obstacle(ObstacleKind::Ground, -15.0, 0.0, 10.0);
        let stays = state.insert_obstacle(ObstacleKind::Ground, -5.0, 0.0, 10.0);
        state.insert_power_up(-18.0, 40.0, 6.0);
        state.events.clear();

        advance_field(&mut state, &tuning);
        assert_eq!(state.obstacles.len(), 1);
        assert_eq!(state.obstacles[0].id, stays);
        assert_eq!(state.obstacles[0].x, -15.0);
        assert!(state.power_ups.is_empty());
        assert!(state.events.iter().any(|e| match e {
            GameEvent::ObstacleRemoved { obstacle, reason } => {
                obstacle.id == gone && *reason == RemovalReason::Passed
            }
            _ => false,
        }));
    }

    #[test]
    fn test_same_seed_same_spawns() {
        let tuning = Tuning::default();
        let mut a = GameState::new(99, &tuning);
        let mut b = GameState::new(99, &tuning);
        for _ in 0..20 {
            assert_eq!(spawn_next(&mut a, &tuning), spawn_next(&mut b, &tuning));
        }
        assert_eq!(a.obstacles, b.obstacles);
    }
}
