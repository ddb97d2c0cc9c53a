//! Pendulum Drone headless runner
//!
//! Flies the simulation with a scripted pilot and prints a JSON summary.
//!
//! # Usage
//!
//! ```bash
//! pendulum-drone --seed 7 --rounds 3
//! pendulum-drone --tuning balance.json --ticks 20000
//! RUST_LOG=debug pendulum-drone --width 1600 --height 900
//! ```

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use serde::Serialize;

use pendulum_drone::consts::TICKS_PER_SECOND;
use pendulum_drone::sim::{
    FrameView, GameEvent, GamePhase, GameState, RoundResult, TickInput, TickStatus, tick,
};
use pendulum_drone::{HighScores, Tuning, Viewport};

#[derive(Parser)]
#[command(name = "pendulum-drone")]
#[command(author, version, about = "Pendulum Drone - headless simulation runner")]
struct Args {
    /// RNG seed for the run
    #[arg(long, short = 's', default_value = "1")]
    seed: u64,

    /// Stop after this many ticks
    #[arg(long, short = 't', default_value = "36000")]
    ticks: u64,

    /// Stop after this many finished rounds
    #[arg(long, short = 'r', default_value = "5")]
    rounds: usize,

    /// JSON file with tuning overrides
    #[arg(long)]
    tuning: Option<PathBuf>,

    /// Viewport width
    #[arg(long, default_value = "1280")]
    width: f32,

    /// Viewport height
    #[arg(long, default_value = "720")]
    height: f32,
}

#[derive(Serialize)]
struct Summary {
    seed: u64,
    ticks: u64,
    rounds: Vec<RoundResult>,
    leaderboard: HighScores,
    final_frame: FrameView,
}

/// Hold the drone on the centre of the next gap ahead, mid-screen otherwise
fn pilot(state: &GameState) -> TickInput {
    let drone = &state.drone;
    let left = drone.rect().left();
    let target = state
        .field
        .obstacles
        .iter()
        .filter_map(|o| o.as_pillar())
        .find(|p| !p.passed && p.right() >= left)
        .map(|p| p.gap_y + p.gap_size / 2.0)
        .unwrap_or(state.viewport.height / 2.0);

    // Look a few ticks ahead so the drone doesn't overshoot
    let predicted = drone.position.y + drone.velocity.y * 8.0;
    TickInput {
        thrust_up: predicted > target,
        thrust_down: predicted < target - 60.0,
        ..Default::default()
    }
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let tuning = match &args.tuning {
        Some(path) => {
            let json = std::fs::read_to_string(path)
                .with_context(|| format!("reading tuning from {}", path.display()))?;
            Tuning::from_json(&json)?
        }
        None => Tuning::default(),
    };
    let viewport = Viewport::new(args.width, args.height);
    let mut state = GameState::new(tuning, viewport, args.seed)?;
    log::info!("Pendulum Drone starting with seed {}", args.seed);

    let mut leaderboard = HighScores::new();
    let mut rounds = Vec::new();

    while state.time_ticks < args.ticks && rounds.len() < args.rounds {
        let input = match state.phase {
            GamePhase::Playing => pilot(&state),
            GamePhase::Start | GamePhase::GameOver => TickInput {
                confirm: true,
                ..Default::default()
            },
        };
        if tick(&mut state, &input) == TickStatus::Quit {
            break;
        }

        for event in &state.events {
            if let Some(cue) = event.sound() {
                log::debug!("Sound: {:?}", cue);
            }
            match event {
                GameEvent::GameOver { result } => {
                    if let Some(rank) = leaderboard.record(result, state.round) {
                        log::info!("New high score! Rank #{}", rank);
                    }
                    rounds.push(*result);
                }
                GameEvent::WindChanged { wind, scroll_speed } => {
                    log::debug!("Wind {:?}, scrolling at {}", wind, scroll_speed);
                }
                other => log::trace!("{:?}", other),
            }
        }
    }

    log::info!(
        "Finished {} rounds in {:.1}s of game time",
        rounds.len(),
        state.time_ticks as f32 / TICKS_PER_SECOND as f32
    );

    let summary = Summary {
        seed: args.seed,
        ticks: state.time_ticks,
        rounds,
        leaderboard,
        final_frame: FrameView::capture(&state),
    };
    println!("{}", serde_json::to_string_pretty(&summary)?);
    Ok(())
}
