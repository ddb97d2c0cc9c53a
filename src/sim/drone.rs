//! The player's drone
//!
//! Forces accumulate into `acceleration` between updates (thrust, gusts, the
//! payload's pull) and are integrated once per tick in a fixed order.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::pendulum::Pendulum;
use super::rect::Rect;
use crate::clamp_magnitude;
use crate::consts::{DRONE_HEIGHT, DRONE_WIDTH};
use crate::tuning::{PhysicsTuning, Tuning, Viewport};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Drone {
    /// Center of the sprite
    pub position: Vec2,
    pub velocity: Vec2,
    /// Forces applied since the last update, divided by mass
    pub acceleration: Vec2,
    pub mass: f32,
    /// Tilt in degrees, always within the configured limit
    pub rotation: f32,
    pub rotational_velocity: f32,
    pub rotational_acceleration: f32,
    /// Torque applied since the last update
    pub torque: f32,
    pub pendulum: Pendulum,
    physics: PhysicsTuning,
}

impl Drone {
    pub fn new(tuning: &Tuning, viewport: Viewport) -> Self {
        let mut drone = Self {
            position: Vec2::ZERO,
            velocity: Vec2::ZERO,
            acceleration: Vec2::ZERO,
            mass: tuning.physics.mass,
            rotation: 0.0,
            rotational_velocity: 0.0,
            rotational_acceleration: 0.0,
            torque: 0.0,
            pendulum: Pendulum::new(&tuning.pendulum),
            physics: tuning.physics.clone(),
        };
        drone.reset(viewport);
        drone
    }

    /// Put the drone back at its launch point, at rest
    pub fn reset(&mut self, viewport: Viewport) {
        self.position = Vec2::new(viewport.width / 4.0, viewport.height / 2.0);
        self.velocity = Vec2::ZERO;
        self.acceleration = Vec2::ZERO;
        self.mass = self.physics.mass;
        self.rotation = 0.0;
        self.rotational_velocity = 0.0;
        self.rotational_acceleration = 0.0;
        self.torque = 0.0;
        self.pendulum.reset(self.position);
    }

    /// Add a force for this tick (a = F / m)
    pub fn apply_force(&mut self, force: Vec2) {
        self.acceleration += force / self.mass;
    }

    /// Add a rotational torque for this tick
    pub fn apply_torque(&mut self, torque: f32) {
        self.torque += torque;
    }

    /// Upward thrust; call once per tick while held
    pub fn thrust_up(&mut self) {
        self.apply_force(Vec2::new(0.0, self.physics.thrust_up));
    }

    /// Downward thrust; call once per tick while held
    pub fn thrust_down(&mut self) {
        self.apply_force(Vec2::new(0.0, self.physics.thrust_down));
    }

    /// Integrate one tick
    pub fn update(&mut self) {
        // Payload reacts to the forces applied since the last update. Its own
        // pull is added afterwards and never feeds back into it.
        let bob_offset = self.pendulum.update(self.acceleration.x);
        self.apply_force(Vec2::new(self.pendulum.lateral_force(), 0.0));
        self.apply_torque(self.pendulum.torque());

        let limit = self.physics.max_rotation;
        self.rotational_acceleration += self.torque;
        self.rotational_velocity += self.rotational_acceleration;
        self.rotation = (self.rotation + self.rotational_velocity).clamp(-limit, limit);
        self.rotational_velocity *= self.physics.rotation_damping;
        self.rotational_acceleration = 0.0;
        self.torque = 0.0;

        self.apply_force(Vec2::new(0.0, self.physics.gravity * self.mass));

        self.velocity += self.acceleration;
        self.velocity *= self.physics.drag;
        self.velocity.y = clamp_magnitude(self.velocity.y, self.physics.max_vertical_velocity);

        self.position += self.velocity;
        self.acceleration = Vec2::ZERO;

        self.pendulum.bob = self.position + bob_offset;

        assert!(
            self.position.is_finite() && self.velocity.is_finite() && self.rotation.is_finite(),
            "drone physics diverged: pos={:?} vel={:?} rot={}",
            self.position,
            self.velocity,
            self.rotation
        );
    }

    /// Sprite bounds
    pub fn rect(&self) -> Rect {
        Rect::from_center(self.position, DRONE_WIDTH, DRONE_HEIGHT)
    }
}
