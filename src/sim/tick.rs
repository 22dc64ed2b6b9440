//! Per-task simulation steps
//!
//! Each scheduled task of a run maps to one function here. They mutate the
//! [`GameState`] and queue events; the game state machine decides what to
//! schedule or cancel based on what they return.

use super::collision::{self, CollisionReport};
use super::difficulty::{self, DifficultyChange};
use super::physics::StepOutcome;
use super::spawn;
use super::state::{GameEvent, GameState, RemovalReason};
use crate::settings::Tuning;

/// Intents gathered for one frame
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Jump (space/tap)
    pub jump: bool,
    /// Start a new run after game over
    pub restart: bool,
}

/// Integrate the jump by one step
pub fn physics_step(state: &mut GameState, tuning: &Tuning) -> StepOutcome {
    let outcome = state.body.step(tuning);
    if outcome == StepOutcome::Landed {
        state.emit(GameEvent::Landed);
    }
    outcome
}

/// Scroll the field, then resolve collisions at the player's current height.
///
/// A fatal hit removes only the obstacle that caused it; everything else is
/// left for the game-over handler to clear.
pub fn advance(state: &mut GameState, tuning: &Tuning) -> CollisionReport {
    spawn::advance_field(state, tuning);

    let report = collision::evaluate(
        state.body.height,
        &state.shield,
        &state.obstacles,
        &state.power_ups,
        tuning,
    );

    if let Some(id) = report.fatal {
        state.remove_obstacle(id, RemovalReason::Collided);
        return report;
    }

    for &id in &report.deflected {
        if let Some(obstacle) = state.remove_obstacle(id, RemovalReason::Deflected) {
            state.emit(GameEvent::ObstacleDeflected(obstacle));
        }
    }

    for &id in &report.collected {
        if let Some(idx) = state.power_ups.iter().position(|p| p.id == id) {
            let power_up = state.power_ups.remove(idx);
            state.emit(GameEvent::PowerUpCollected(power_up));
            state.shield.activate(tuning.shield_duration_secs);
            state.emit(GameEvent::ShieldChanged {
                active: state.shield.active,
                seconds_remaining: state.shield.seconds_remaining,
            });
        }
    }

    report
}

/// Add a point and escalate difficulty on threshold scores
pub fn score_tick(state: &mut GameState, tuning: &Tuning) -> DifficultyChange {
    state.run.score += 1;
    let score = state.run.score;
    state.emit(GameEvent::ScoreChanged(score));

    if !difficulty::is_milestone(score, tuning) {
        return DifficultyChange::default();
    }
    state.emit(GameEvent::MilestoneReached(score));

    let change = difficulty::on_score(&mut state.run, tuning);
    if change.level_raised {
        log::info!("Difficulty {} at score {}", state.run.difficulty_level, score);
        state.emit(GameEvent::DifficultyChanged(state.run.difficulty_level));
    }
    change
}

/// One second of shield time. Returns true once the shield has run out.
pub fn shield_tick(state: &mut GameState) -> bool {
    if !state.shield.active {
        return true;
    }
    let expired = state.shield.count_down();
    state.emit(GameEvent::ShieldChanged {
        active: state.shield.active,
        seconds_remaining: state.shield.seconds_remaining,
    });
    expired
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::ObstacleKind;

    #[test]
    fn test_score_tick_events() {
        let tuning = Tuning::default();
        let mut state = GameState::new(1, &tuning);
        state.run.score = 98;

        score_tick(&mut state, &tuning);
        assert_eq!(state.events, vec![GameEvent::ScoreChanged(99)]);
        state.events.clear();

        let change = score_tick(&mut state, &tuning);
        assert!(change.interval_shortened);
        assert_eq!(
            state.events,
            vec![
                GameEvent::ScoreChanged(100),
                GameEvent::MilestoneReached(100),
                GameEvent::DifficultyChanged(1.5),
            ]
        );
    }

    #[test]
    fn test_collecting_raises_shield() {
        let tuning = Tuning::default();
        let mut state = GameState::new(1, &tuning);
        state.insert_power_up(30.0, 40.0, 6.0);
        state.events.clear();

        let report = advance(&mut state, &tuning);
        assert_eq!(report.collected.len(), 1);
        assert!(state.power_ups.is_empty());
        assert!(state.shield.active);
        assert_eq!(state.shield.seconds_remaining, tuning.shield_duration_secs);
        assert!(matches!(state.events[0], GameEvent::PowerUpCollected(_)));
    }

    #[test]
    fn test_deflect_removes_obstacle() {
        let tuning = Tuning::default();
        let mut state = GameState::new(1, &tuning);
        state.shield.activate(3);
        let id = state.insert_obstacle(ObstacleKind::Tall, 30.0, 0.0, 10.0);
        state.events.clear();

        let report = advance(&mut state, &tuning);
        assert_eq!(report.deflected, vec![id]);
        assert!(state.obstacles.is_empty());
        let deflected = |e: &GameEvent| matches!(e, GameEvent::ObstacleDeflected(o) if o.id == id);
        assert!(state.events.iter().any(deflected));
    }

    #[test]
    fn test_fatal_hit_leaves_rest_of_field() {
        let tuning = Tuning::default();
        let mut state = GameState::new(1, &tuning);
        let fatal = state.insert_obstacle(ObstacleKind::Ground, 30.0, 0.0, 10.0);
        state.insert_obstacle(ObstacleKind::Ground, 400.0, 0.0, 10.0);
        state.insert_power_up(30.0, 40.0, 6.0);

        let report = advance(&mut state, &tuning);
        assert_eq!(report.fatal, Some(fatal));
        assert_eq!(state.obstacles.len(), 1);
        assert_eq!(state.power_ups.len(), 1);
        assert!(!state.shield.active);
    }

    #[test]
    fn test_shield_tick_expires() {
        let tuning = Tuning::default();
        let mut state = GameState::new(1, &tuning);
        state.shield.activate(2);
        assert!(!shield_tick(&mut state));
        assert!(shield_tick(&mut state));
        assert_eq!(
            state.events.last(),
            Some(&GameEvent::ShieldChanged {
                active: false,
                seconds_remaining: 0
            })
        );
    }
}
