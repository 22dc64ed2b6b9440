//! Dune Dash headless runner
//!
//! Drives the simulation core with a simple autopilot and logs each run.
//! Usage: `dune-dash [tuning.json]` (profile kept in `$DUNE_DASH_PROFILE_DIR`,
//! default `./dune-dash-profile`). Set `RUST_LOG=debug` for spawn detail.

use std::time::{SystemTime, UNIX_EPOCH};

use dune_dash::sim::{Game, GameEvent, GamePhase, GameState, TickInput};
use dune_dash::{FileStore, Tuning};

/// Frame length the host pretends to render at
const FRAME_MS: u64 = 16;
/// Give up on a run after this much simulated time
const MAX_RUN_MS: u64 = 10 * 60 * 1000;
const RUNS: u32 = 3;

fn main() {
    env_logger::init();
    log::info!("Dune Dash (headless) starting...");

    let tuning = match std::env::args().nth(1) {
        Some(path) => Tuning::load(path),
        None => Tuning::default(),
    };
    let profile_dir =
        std::env::var("DUNE_DASH_PROFILE_DIR").unwrap_or_else(|_| "dune-dash-profile".to_string());
    let seed = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(0);
    log::info!("Session seed: {}", seed);

    let mut game = Game::new(tuning, FileStore::new(profile_dir), seed);
    game.start();

    for run in 1..=RUNS {
        if run > 1 {
            game.frame(
                &TickInput {
                    restart: true,
                    ..Default::default()
                },
                0,
            );
        }

        let mut elapsed = 0;
        while game.phase() == GamePhase::Running && elapsed < MAX_RUN_MS {
            let input = TickInput {
                jump: should_jump(game.state(), game.tuning()),
                ..Default::default()
            };
            game.frame(&input, FRAME_MS);
            elapsed += FRAME_MS;

            for event in game.drain_events() {
                report(&event);
            }
        }

        log::info!(
            "Run {} finished: score {} in {:.1}s (high score {})",
            run,
            game.score(),
            elapsed as f64 / 1000.0,
            game.profile().high_score
        );
    }
}

/// Jump when something is about to enter the collision window
fn should_jump(state: &GameState, tuning: &Tuning) -> bool {
    if state.body.is_airborne() {
        return false;
    }
    state.obstacles.iter().any(|o| {
        let lead = tuning.near_field_width + o.speed * 4.0;
        o.x >= tuning.near_field_width && o.x < lead
    })
}

fn report(event: &GameEvent) {
    match event {
        GameEvent::MilestoneReached(score) => log::info!("Milestone: {}", score),
        GameEvent::ObstacleDeflected(o) => log::info!("Shield deflected {:?}", o.kind),
        GameEvent::ShieldChanged { active, seconds_remaining } => {
            log::info!("Shield {} ({}s)", if *active { "up" } else { "down" }, seconds_remaining)
        }
        GameEvent::NewHighScore(score) => log::info!("New high score: {}!", score),
        GameEvent::SkinUnlocked(skin) => log::info!("Unlocked skin: {}", skin),
        other => log::trace!("{:?}", other),
    }
}
