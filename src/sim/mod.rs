//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only (one tick per frame)
//! - Seeded RNG only
//! - Stable iteration order (spawn order)
//! - No rendering, audio or platform dependencies

pub mod collision;
pub mod drone;
pub mod field;
pub mod pendulum;
pub mod rect;
pub mod state;
pub mod tick;
pub mod view;
pub mod wind;

pub use collision::{CollisionReport, CrashCause};
pub use drone::Drone;
pub use field::{Obstacle, ObstacleBody, ObstacleField, ObstacleKind, Pillar, SpawnTier, Star};
pub use pendulum::Pendulum;
pub use rect::Rect;
pub use state::{GameEvent, GamePhase, GameState, RoundResult, ScoreState, SoundCue};
pub use tick::{TickInput, TickStatus, tick};
pub use view::FrameView;
pub use wind::{Environment, Wind};
