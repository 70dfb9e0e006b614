//! Astro Dash entry point
//!
//! Runs the simulation headless at a fixed 60 FPS with a scripted
//! autopilot standing in for a real input device, logging state
//! transitions and the final outcome. Frames that overrun their budget
//! simply run late; there is no catch-up.
//!
//! Usage: `astro-dash [seed] [tuning.json]`

use std::thread;
use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

use astro_dash::consts::{FRAME_DT, FRAME_RATE};
use astro_dash::render::scene;
use astro_dash::{FrameInput, Game, GamePhase, Tuning};

/// Hard stop for the demo run (ten minutes of frames).
const MAX_FRAMES: u64 = FRAME_RATE as u64 * 60 * 10;

/// Scripted stand-in for a player: start the run, hold right, hop and
/// fire on a steady rhythm, confirm through level breaks.
fn autopilot(frame: u64, phase: GamePhase) -> FrameInput {
    let mut input = FrameInput::default();
    match phase {
        GamePhase::Menu | GamePhase::LevelComplete => input.confirm = true,
        GamePhase::Playing => {
            input.right = true;
            input.jump = frame % 24 == 0;
            input.shoot = frame % 10 == 0;
        }
        GamePhase::GameOver | GamePhase::Victory => {}
    }
    input
}

fn main() {
    env_logger::init();

    let mut args = std::env::args().skip(1);
    let seed = args
        .next()
        .and_then(|arg| arg.parse().ok())
        .unwrap_or_else(|| {
            SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .map(|elapsed| elapsed.as_secs())
                .unwrap_or(0)
        });
    let tuning = match args.next() {
        Some(path) => match std::fs::read_to_string(&path) {
            Ok(json) => Tuning::from_json_or_default(&json),
            Err(err) => {
                log::warn!("could not read {path}: {err}, using default tuning");
                Tuning::default()
            }
        },
        None => Tuning::default(),
    };

    let mut game = Game::new(tuning, seed);
    let frame_budget = Duration::from_secs_f32(FRAME_DT);
    let mut last_phase = game.phase;

    log::info!("astro-dash demo, seed {seed}");

    for frame in 0..MAX_FRAMES {
        let frame_start = Instant::now();

        let input = autopilot(frame, game.phase);
        game.update(&input);

        for event in game.take_events() {
            log::debug!("{event:?}");
        }

        if game.phase != last_phase {
            let snapshot = scene(&game);
            log::info!(
                "{:?} -> {:?} (score {}, {} sprites in view)",
                last_phase,
                game.phase,
                snapshot.score,
                snapshot.sprites.len(),
            );
            last_phase = game.phase;
        }

        match game.phase {
            GamePhase::GameOver => {
                println!("game over at level {} with score {}", game.level_number, game.score);
                return;
            }
            GamePhase::Victory => {
                println!("victory! final score {}", game.score);
                return;
            }
            _ => {}
        }

        if let Some(rest) = frame_budget.checked_sub(frame_start.elapsed()) {
            thread::sleep(rest);
        }
    }

    println!(
        "demo frame cap reached in {:?} with score {}",
        game.phase, game.score
    );
}
