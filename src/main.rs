//! Headless entry point
//!
//! Runs the simulation without any presentation layer: a small scripted bot
//! chases the ball and fires, which exercises the whole engine end to end.
//! Useful as a smoke run and as a reference for how a real frontend drives
//! the core (fixed-timestep ticks, event draining, high score persistence).

use std::path::Path;

use anyhow::Result;

use crt_breakout::consts::{MAX_SUBSTEPS, SIM_DT};
use crt_breakout::sim::{GameEvent, GamePhase, GameState, TickInput, tick};
use crt_breakout::{Config, HighScore, highscore};

fn main() -> Result<()> {
    env_logger::init();

    let seed = std::env::args()
        .nth(1)
        .map(|s| s.parse::<u64>())
        .transpose()?
        .unwrap_or(0xC0FFEE);

    let config = Config::default();
    config.validate()?;

    let score_path = Path::new(highscore::DEFAULT_PATH);
    let mut best = HighScore::load(score_path);

    let mut state = GameState::new(config, seed);
    state.high_score = best.0;
    log::info!("headless run starting, seed {seed}");

    // Two minutes of simulated play at 60 rendered frames/second, or until
    // the bot runs out of hearts. The accumulator/substep shape is the same
    // one a real frontend would use against a wall clock.
    let frame_dt = 1.0 / 60.0;
    let max_frames = 60 * 120;
    let mut accumulator: f32 = 0.0;
    let mut t: u32 = 0;

    for _ in 0..max_frames {
        accumulator += frame_dt;
        let mut substeps = 0;
        while accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
            let input = bot_input(&state, t);
            tick(&mut state, &input, SIM_DT);
            accumulator -= SIM_DT;
            substeps += 1;
            t += 1;
        }

        for event in state.take_events() {
            match event {
                GameEvent::LevelCleared { level } => log::info!("reached level {level}"),
                GameEvent::GameOver { score } => best.record(score, score_path),
                _ => {}
            }
        }

        if state.phase == GamePhase::GameOver {
            break;
        }
    }

    println!(
        "finished: level {}, score {}, projectile kills {}, high score {}",
        state.level, state.score, state.projectile_kills, state.high_score
    );
    Ok(())
}

/// Minimal autoplayer: keep the paddle under the ball, launch and fire on a
/// steady cadence.
fn bot_input(state: &GameState, t: u32) -> TickInput {
    let paddle_x = state.paddle.rect.center().x;
    let ball_x = state.ball.rect.center().x;
    TickInput {
        move_left: ball_x < paddle_x - 5.0,
        move_right: ball_x > paddle_x + 5.0,
        fire: t % 90 == 0,
        ..Default::default()
    }
}
