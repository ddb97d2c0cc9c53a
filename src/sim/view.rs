//! Read-only snapshot of a tick for renderers and HUDs

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::field::ObstacleKind;
use super::rect::Rect;
use super::state::{GamePhase, GameState, RoundResult};
use super::wind::Wind;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DroneView {
    pub position: Vec2,
    /// Degrees
    pub rotation: f32,
    pub bob: Vec2,
    pub bob_radius: f32,
    pub bounds: Rect,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObstacleView {
    pub id: u32,
    pub kind: ObstacleKind,
    /// Pillar: top, bottom, top cap, bottom cap. Hazards: a single sprite rect.
    pub shapes: Vec<Rect>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FrameView {
    pub phase: GamePhase,
    pub tick: u64,
    pub score: u32,
    pub stars_collected: u32,
    pub drone: DroneView,
    pub obstacles: Vec<ObstacleView>,
    pub stars: Vec<Rect>,
    pub wind: Wind,
    pub background_offset: f32,
    pub ground_offset: f32,
    pub ground_y: f32,
    /// Set while the game-over overlay is showing
    pub result: Option<RoundResult>,
}

impl FrameView {
    pub fn capture(state: &GameState) -> Self {
        let drone = &state.drone;
        Self {
            phase: state.phase,
            tick: state.time_ticks,
            score: state.score.score,
            stars_collected: state.score.stars,
            drone: DroneView {
                position: drone.position,
                rotation: drone.rotation,
                bob: drone.pendulum.bob,
                bob_radius: state.tuning.pendulum.bob_radius,
                bounds: drone.rect(),
            },
            obstacles: state
                .field
                .obstacles
                .iter()
                .map(|o| ObstacleView {
                    id: o.id,
                    kind: o.kind(),
                    shapes: o.bounding_shapes(),
                })
                .collect(),
            stars: state.field.stars.iter().map(|s| s.rect).collect(),
            wind: state.environment.wind,
            background_offset: state.environment.background_offset,
            ground_offset: state.environment.ground_offset,
            ground_y: state.viewport.height - state.tuning.hitbox.ground_height,
            result: match state.phase {
                GamePhase::GameOver => state.last_result,
                _ => None,
            },
        }
    }
}
