//! Score-driven difficulty escalation
//!
//! Both knobs only move one way within a run and saturate; only a new run
//! resets them.

use super::state::RunState;
use crate::settings::Tuning;

/// What a threshold crossing changed
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DifficultyChange {
    pub level_raised: bool,
    pub interval_shortened: bool,
}

/// True when `score` is a positive multiple of the escalation threshold
pub fn is_milestone(score: u64, tuning: &Tuning) -> bool {
    score > 0 && score % tuning.score_threshold.max(1) == 0
}

/// Apply one escalation step if `run.score` sits on a threshold
pub fn on_score(run: &mut RunState, tuning: &Tuning) -> DifficultyChange {
    let mut change = DifficultyChange::default();
    if !is_milestone(run.score, tuning) {
        return change;
    }

    if run.difficulty_level < tuning.difficulty_cap {
        run.difficulty_level =
            (run.difficulty_level + tuning.difficulty_increment).min(tuning.difficulty_cap);
        run.obstacle_speed_scale = tuning.base_obstacle_speed * run.difficulty_level;
        change.level_raised = true;
    }
    if run.tick_interval_ms > tuning.min_tick_interval_ms {
        run.tick_interval_ms -= 1;
        change.interval_shortened = true;
    }
    change
}
