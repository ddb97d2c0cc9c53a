//! Round state and core simulation types
//!
//! `GameState` is the single owned context every tick phase works on: the
//! drone, the environment, the obstacle field, the score, the RNG and the
//! round phase. Nothing in the simulation lives outside of it.

use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::collision::CrashCause;
use super::drone::Drone;
use super::field::{ObstacleField, ObstacleKind};
use super::wind::{Environment, Wind};
use crate::error::ConfigError;
use crate::highscores::Medal;
use crate::tuning::{Tuning, Viewport};

/// Current phase of the round
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Title screen, waiting for confirm
    Start,
    /// Simulation running
    Playing,
    /// Round ended, everything frozen until restart
    GameOver,
}

/// Score for the current round
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreState {
    pub score: u32,
    pub stars: u32,
}

/// Final numbers of a finished round
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundResult {
    pub score: u32,
    pub stars: u32,
    /// Ticks spent in PLAYING
    pub ticks: u64,
    pub cause: CrashCause,
    pub medal: Option<Medal>,
}

/// Sound the host should play
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SoundCue {
    RoundStart,
    Crash,
    StarPickup,
}

/// Discrete things that happened during a tick, for audio and HUD adapters
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    RoundStarted { round: u32 },
    Spawned { id: u32, kind: ObstacleKind },
    ObstaclePassed { id: u32, score: u32 },
    StarCollected { id: u32, score: u32, stars: u32 },
    WindChanged { wind: Wind, scroll_speed: f32 },
    /// The pendulum bob bounced off an obstacle
    BobStruck { obstacle: u32 },
    GameOver { result: RoundResult },
    ReturnedToTitle,
}

impl GameEvent {
    pub fn sound(&self) -> Option<SoundCue> {
        match self {
            GameEvent::RoundStarted { .. } => Some(SoundCue::RoundStart),
            GameEvent::StarCollected { .. } => Some(SoundCue::StarPickup),
            GameEvent::GameOver { .. } => Some(SoundCue::Crash),
            _ => None,
        }
    }
}

/// Complete simulation state (deterministic for a given seed and input stream)
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    pub rng: Pcg32,
    pub tuning: Tuning,
    /// World size used by the current round
    pub viewport: Viewport,
    /// Viewport to switch to at the next round reset
    pending_viewport: Option<Viewport>,
    pub phase: GamePhase,
    pub drone: Drone,
    pub environment: Environment,
    pub field: ObstacleField,
    pub score: ScoreState,
    /// Ticks since the state was created
    pub time_ticks: u64,
    /// Ticks spent in PLAYING this round
    pub round_ticks: u64,
    /// Rounds started so far
    pub round: u32,
    /// Bob was touching an obstacle on the previous tick
    pub bob_touching: bool,
    /// Events raised by the most recent tick
    pub events: Vec<GameEvent>,
    /// Result of the most recently finished round
    pub last_result: Option<RoundResult>,
}

impl GameState {
    /// Create a state on the title screen; fails on an unusable configuration
    pub fn new(tuning: Tuning, viewport: Viewport, seed: u64) -> Result<Self, ConfigError> {
        tuning.validate_for(viewport)?;
        let mut rng = Pcg32::seed_from_u64(seed);

        let drone = Drone::new(&tuning, viewport);
        let mut environment = Environment::new(&tuning.wind);
        environment.reset(&mut rng);
        let mut field = ObstacleField::new(&tuning.spawn);
        field.reset(&mut rng);

        Ok(Self {
            seed,
            rng,
            tuning,
            viewport,
            pending_viewport: None,
            phase: GamePhase::Start,
            drone,
            environment,
            field,
            score: ScoreState::default(),
            time_ticks: 0,
            round_ticks: 0,
            round: 0,
            bob_touching: false,
            events: Vec::new(),
            last_result: None,
        })
    }

    /// Queue a new viewport; it takes effect at the next round reset
    pub fn set_viewport(&mut self, viewport: Viewport) -> Result<(), ConfigError> {
        self.tuning.validate_for(viewport)?;
        self.pending_viewport = Some(viewport);
        Ok(())
    }

    /// Fresh drone, score, field, timers and wind, then start playing
    pub fn start_round(&mut self) {
        if let Some(viewport) = self.pending_viewport.take() {
            log::info!("Viewport {}x{}", viewport.width, viewport.height);
            self.viewport = viewport;
        }
        self.drone.reset(self.viewport);
        self.score = ScoreState::default();
        self.field.reset(&mut self.rng);
        self.environment.reset(&mut self.rng);
        self.round_ticks = 0;
        self.bob_touching = false;
        self.round += 1;
        self.phase = GamePhase::Playing;
        self.events.push(GameEvent::RoundStarted { round: self.round });
        log::info!("Round {} started", self.round);
    }

    /// Freeze the round after a crash
    pub fn end_round(&mut self, cause: CrashCause) {
        let result = RoundResult {
            score: self.score.score,
            stars: self.score.stars,
            ticks: self.round_ticks,
            cause,
            medal: Medal::for_score(self.score.score),
        };
        self.phase = GamePhase::GameOver;
        self.last_result = Some(result);
        self.events.push(GameEvent::GameOver { result });
        log::info!(
            "Round {} over ({:?}): score {}, stars {}, {} ticks",
            self.round,
            cause,
            result.score,
            result.stars,
            result.ticks
        );
    }

    /// Go back to the title screen without starting a round
    pub fn return_to_title(&mut self) {
        self.phase = GamePhase::Start;
        self.events.push(GameEvent::ReturnedToTitle);
    }
}
