//! Run state machine
//!
//! `Idle --start--> Running --fatal hit--> GameOver --restart--> Running`.
//!
//! [`Game`] owns the scheduler, the simulation state, the player profile and
//! the persistence adapter. Intents that make no sense in the current phase
//! are ignored. Entering GameOver cancels every task before anything else
//! happens, and every run starts from a freshly registered task set.

use super::physics::StepOutcome;
use super::scheduler::{Scheduler, TaskKind};
use super::state::{GameEvent, GamePhase, GameState};
use super::tick::{self, TickInput};
use super::spawn;
use crate::persistence::{PersistenceAdapter, ProfileStore};
use crate::profile::{PersistentProfile, SkinId};
use crate::settings::Tuning;

/// Shield countdown cadence
const SHIELD_TICK_MS: u64 = 1000;

pub struct Game<S> {
    tuning: Tuning,
    state: GameState,
    scheduler: Scheduler,
    profile: PersistentProfile,
    persistence: PersistenceAdapter<S>,
}

impl<S: ProfileStore> Game<S> {
    /// Create an idle game, loading the profile from `store`
    pub fn new(tuning: Tuning, store: S, seed: u64) -> Self {
        let persistence = PersistenceAdapter::new(store);
        let profile = persistence.load_profile();
        Self {
            state: GameState::new(seed, &tuning),
            tuning,
            scheduler: Scheduler::new(),
            profile,
            persistence,
        }
    }

    pub fn tuning(&self) -> &Tuning {
        &self.tuning
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn phase(&self) -> GamePhase {
        self.state.run.phase
    }

    pub fn score(&self) -> u64 {
        self.state.run.score
    }

    pub fn profile(&self) -> &PersistentProfile {
        &self.profile
    }

    pub fn scheduler(&self) -> &Scheduler {
        &self.scheduler
    }

    pub fn persistence(&self) -> &PersistenceAdapter<S> {
        &self.persistence
    }

    /// Take all events queued since the last call
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.state.events)
    }

    /// First run. Only valid while idle.
    pub fn start(&mut self) {
        if self.phase() != GamePhase::Idle {
            log::debug!("start ignored in {:?}", self.phase());
            return;
        }
        self.begin_run();
    }

    /// New run after game over. Only valid in GameOver.
    pub fn restart(&mut self) {
        if self.phase() != GamePhase::GameOver {
            log::debug!("restart ignored in {:?}", self.phase());
            return;
        }
        self.begin_run();
    }

    /// Jump intent; ignored unless running and grounded
    pub fn jump(&mut self) {
        if self.phase() != GamePhase::Running {
            log::debug!("jump ignored in {:?}", self.phase());
            return;
        }
        if self.state.body.start_jump(&self.tuning) {
            self.state.emit(GameEvent::Jumped);
            self.scheduler.every(TaskKind::Physics, self.tuning.jump_step_ms);
        }
    }

    /// Switch to an unlocked skin
    pub fn select_skin(&mut self, skin: &SkinId) {
        if self.profile.select_skin(skin) {
            log::info!("Skin selected: {}", skin);
            self.state.emit(GameEvent::SkinSelected(skin.clone()));
            self.persistence.save_current_skin(skin);
        } else {
            log::debug!("select_skin ignored for '{}'", skin);
        }
    }

    /// Apply one frame's intents, then run the clock forward.
    /// Long frames are clamped so a stalled host cannot queue unbounded work.
    pub fn frame(&mut self, input: &TickInput, elapsed_ms: u64) {
        if input.restart {
            self.restart();
        }
        if input.jump {
            self.jump();
        }
        self.advance(elapsed_ms.min(self.tuning.max_frame_ms));
    }

    /// Run every task that falls due within the next `elapsed_ms`
    pub fn advance(&mut self, elapsed_ms: u64) {
        let until = self.scheduler.now() + elapsed_ms;
        while let Some(kind) = self.scheduler.pop_due(until) {
            self.run_task(kind);
        }
        self.scheduler.advance_to(until);
    }

    fn run_task(&mut self, kind: TaskKind) {
        match kind {
            TaskKind::Physics => {
                if tick::physics_step(&mut self.state, &self.tuning) != StepOutcome::Moved {
                    self.scheduler.cancel(TaskKind::Physics);
                }
            }
            TaskKind::Advance => {
                let report = tick::advance(&mut self.state, &self.tuning);
                if report.is_fatal() {
                    self.game_over();
                } else if !report.collected.is_empty() {
                    self.scheduler.every(TaskKind::ShieldCountdown, SHIELD_TICK_MS);
                }
            }
            TaskKind::SpawnObstacle => {
                let delay = spawn::spawn_next(&mut self.state, &self.tuning);
                self.scheduler.once(TaskKind::SpawnObstacle, delay);
            }
            TaskKind::SpawnPowerUp => {
                spawn::maybe_spawn(&mut self.state, &self.tuning);
            }
            TaskKind::Score => {
                let change = tick::score_tick(&mut self.state, &self.tuning);
                if change.interval_shortened {
                    self.scheduler.set_period(TaskKind::Advance, self.state.run.tick_interval_ms);
                }
            }
            TaskKind::ShieldCountdown => {
                if tick::shield_tick(&mut self.state) {
                    self.scheduler.cancel(TaskKind::ShieldCountdown);
                }
            }
        }
    }

    fn begin_run(&mut self) {
        self.scheduler.cancel_all();
        self.state.reset_run(&self.tuning);
        self.state.run.phase = GamePhase::Running;

        let tuning = &self.tuning;
        self.scheduler.every(TaskKind::Score, tuning.score_interval_ms);
        self.scheduler.every(TaskKind::Advance, self.state.run.tick_interval_ms);
        self.scheduler.once(TaskKind::SpawnObstacle, tuning.first_spawn_delay_ms);
        self.scheduler.every(TaskKind::SpawnPowerUp, tuning.power_up_interval_ms);

        self.state.emit(GameEvent::PhaseChanged(GamePhase::Running));
        self.state.emit(GameEvent::ScoreChanged(0));
        self.state.emit(GameEvent::DifficultyChanged(self.state.run.difficulty_level));
        log::info!("Run started (high score {})", self.profile.high_score);
    }

    fn game_over(&mut self) {
        // Halt first: nothing may touch the run after the phase flips
        self.scheduler.cancel_all();
        self.state.run.phase = GamePhase::GameOver;
        self.state.emit(GameEvent::PhaseChanged(GamePhase::GameOver));
        self.state.clear_field();

        let score = self.state.run.score;
        if self.profile.record_score(score) {
            log::info!("Game over - new high score: {}", score);
            self.state.emit(GameEvent::NewHighScore(score));
            self.persistence.save_high_score(score);
        } else {
            log::info!("Game over - score: {} (high score {})", score, self.profile.high_score);
        }

        let unlocked = self.profile.apply_unlocks(&self.tuning.skin_unlocks);
        if !unlocked.is_empty() {
            for skin in unlocked {
                log::info!("Skin unlocked: {}", skin);
                self.state.emit(GameEvent::SkinUnlocked(skin));
            }
            self.persistence.save_unlocked_skins(&self.profile.unlocked_skins);
        }
    }
}
