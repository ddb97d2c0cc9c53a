//! Pendulum Drone - a side-scrolling arcade flyer
//!
//! Core modules:
//! - `sim`: Deterministic simulation (drone physics, obstacle field, collisions, round state)
//! - `tuning`: Data-driven game balance
//! - `highscores`: In-memory session leaderboard and medals
//! - `error`: Fatal configuration errors

pub mod error;
pub mod highscores;
pub mod sim;
pub mod tuning;

pub use error::ConfigError;
pub use highscores::{HighScores, Medal};
pub use tuning::{Tuning, Viewport};

/// Game configuration constants
pub mod consts {
    /// Fixed simulation rate (one tick per rendered frame)
    pub const TICKS_PER_SECOND: u32 = 60;

    /// Default viewport
    pub const DEFAULT_WIDTH: f32 = 1280.0;
    pub const DEFAULT_HEIGHT: f32 = 720.0;
    /// Height of the ground strip at the bottom of the viewport
    pub const GROUND_HEIGHT: f32 = 71.0;
    /// Width of one ground tile (wrap period of the ground layer)
    pub const GROUND_TILE_WIDTH: f32 = 808.0;

    /// Drone sprite footprint
    pub const DRONE_WIDTH: f32 = 60.0;
    pub const DRONE_HEIGHT: f32 = 45.0;
    pub const DRONE_MASS: f32 = 1.0;
    /// Downward gravity per unit mass (units/tick²)
    pub const GRAVITY: f32 = 0.2;
    pub const THRUST_UP: f32 = -0.5;
    pub const THRUST_DOWN: f32 = 0.3;
    /// Per-tick velocity multiplier (air resistance)
    pub const DRAG: f32 = 0.985;
    pub const MAX_VERTICAL_VELOCITY: f32 = 8.0;
    /// Rotation limit in degrees
    pub const MAX_ROTATION: f32 = 30.0;
    pub const ROTATION_DAMPING: f32 = 0.95;

    /// Pendulum defaults
    pub const ROPE_LENGTH: f32 = 70.0;
    pub const PENDULUM_GRAVITY: f32 = -0.005;
    pub const PENDULUM_COUPLING: f32 = 0.1;
    pub const PENDULUM_DAMPING: f32 = 0.99;
    pub const PENDULUM_PULL: f32 = 0.05;
    /// Degrees/tick² of rotational acceleration per radian of swing
    pub const PENDULUM_TORQUE: f32 = 0.4;
    pub const PENDULUM_RESTITUTION: f32 = 0.8;
    pub const BOB_RADIUS: f32 = 8.0;

    /// Scroll speed with no wind (units/tick)
    pub const BASE_SCROLL_SPEED: f32 = 5.0;
    pub const TAILWIND: f32 = 1.0;
    pub const HEADWIND: f32 = -0.5;

    /// Pillar geometry
    pub const PILLAR_WIDTH: f32 = 80.0;
    pub const PILLAR_CAP_HEIGHT: f32 = 50.0;
    pub const GAP_MARGIN: f32 = 100.0;

    /// Hazard / collectible geometry
    pub const ROCK_SIZE: f32 = 100.0;
    pub const PUFF_LARGE_SIZE: f32 = 80.0;
    pub const PUFF_SMALL_SIZE: f32 = 50.0;
    pub const STAR_SIZE: f32 = 35.0;
    /// Horizontal distance past the right edge where hazards and stars appear
    pub const SPAWN_LEAD: f32 = 100.0;
    pub const HAZARD_MIN_Y: f32 = 150.0;
    /// Hazards stay this far above the bottom of the viewport
    pub const HAZARD_BOTTOM_MARGIN: f32 = 250.0;
    pub const STAR_PADDING: f32 = 40.0;
    pub const MAX_LIVE_STARS: usize = 3;
    pub const STAR_BONUS: u32 = 5;

    /// Score thresholds for the spawn tiers
    pub const MIXED_TIER_SCORE: u32 = 15;
    pub const CHAOS_TIER_SCORE: u32 = 30;
}

/// Clamp the magnitude of `value` to `limit`, keeping its sign
#[inline]
pub fn clamp_magnitude(value: f32, limit: f32) -> f32 {
    if value.abs() > limit {
        limit.copysign(value)
    } else {
        value
    }
}

/// Wrap a scrolling layer offset back into `(-period, 0]`
#[inline]
pub fn wrap_offset(offset: f32, period: f32) -> f32 {
    if period <= 0.0 {
        return 0.0;
    }
    let wrapped = offset % period;
    if wrapped > 0.0 { wrapped - period } else { wrapped }
}
