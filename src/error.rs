//! Fatal configuration errors
//!
//! The simulation itself has no recoverable failures. Anything that would make
//! the spawn arithmetic or the physics ill-defined is rejected up front.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("Viewport must be positive and finite, got {width}x{height}")]
    InvalidViewport { width: f32, height: f32 },

    #[error("Invalid range for {name}: [{min}, {max}]")]
    InvalidRange { name: &'static str, min: f32, max: f32 },

    #[error(
        "Gap range [{gap_min}, {gap_max}] does not fit a {height}-unit viewport with {margin}-unit margins"
    )]
    GapDoesNotFit {
        gap_min: f32,
        gap_max: f32,
        margin: f32,
        height: f32,
    },

    #[error("Star padding {padding} leaves no room inside a {gap}-unit gap")]
    StarPaddingTooLarge { padding: f32, gap: f32 },

    #[error("{name} must be positive and finite, got {value}")]
    NotPositive { name: &'static str, value: f32 },

    #[error("{name} must lie in (0, 1], got {value}")]
    NotAFactor { name: &'static str, value: f32 },

    #[error("Failed to parse tuning: {0}")]
    Parse(String),
}

impl From<serde_json::Error> for ConfigError {
    fn from(err: serde_json::Error) -> Self {
        ConfigError::Parse(err.to_string())
    }
}
