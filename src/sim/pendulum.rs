//! Payload swinging on a rope below the drone
//!
//! The swing is driven by the drone's horizontal acceleration and pushes back
//! on the drone with a lateral pull and a rotational torque, both proportional
//! to the swing angle.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::tuning::PendulumTuning;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Pendulum {
    /// Swing angle (radians, 0 = hanging straight down)
    pub angle: f32,
    pub angular_velocity: f32,
    pub angular_acceleration: f32,
    pub rope_length: f32,
    /// World position of the bob
    pub bob: Vec2,
    gravity: f32,
    coupling: f32,
    damping: f32,
    pull_strength: f32,
    torque: f32,
    restitution: f32,
}

impl Pendulum {
    pub fn new(tuning: &PendulumTuning) -> Self {
        Self {
            angle: 0.0,
            angular_velocity: 0.0,
            angular_acceleration: 0.0,
            rope_length: tuning.rope_length,
            bob: Vec2::ZERO,
            gravity: tuning.gravity,
            coupling: tuning.coupling,
            damping: tuning.damping,
            pull_strength: tuning.pull_strength,
            torque: tuning.torque,
            restitution: tuning.restitution,
        }
    }

    /// Bring the bob to rest hanging under `anchor`
    pub fn reset(&mut self, anchor: Vec2) {
        self.angle = 0.0;
        self.angular_velocity = 0.0;
        self.angular_acceleration = 0.0;
        self.bob = anchor + self.bob_offset();
    }

    /// Advance one tick given the drone's horizontal acceleration.
    ///
    /// Returns the bob offset from the rope anchor.
    pub fn update(&mut self, horizontal_acceleration: f32) -> Vec2 {
        let restoring = self.gravity * self.angle.sin();
        let driven = horizontal_acceleration * self.coupling * self.angle.cos();
        self.integrate(restoring + driven);
        self.bob_offset()
    }

    /// Apply one tick of angular motion with the given angular acceleration
    pub fn integrate(&mut self, angular_acceleration: f32) {
        self.angular_acceleration = angular_acceleration;
        self.angular_velocity += angular_acceleration;
        self.angle += self.angular_velocity;
        self.angular_velocity *= self.damping;
    }

    /// Offset of the bob from the anchor at the current angle
    pub fn bob_offset(&self) -> Vec2 {
        Vec2::new(self.angle.sin(), self.angle.cos()) * self.rope_length
    }

    /// Horizontal force the swinging mass exerts on the drone
    pub fn lateral_force(&self) -> f32 {
        self.angle * self.pull_strength
    }

    /// Rotational torque the swinging mass exerts on the drone (degrees/tick²)
    pub fn torque(&self) -> f32 {
        self.angle * self.torque
    }

    /// Bounce the swing back after the bob strikes something
    pub fn collide(&mut self) {
        self.angular_velocity = -self.angular_velocity * self.restitution;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pendulum() -> Pendulum {
        let mut p = Pendulum::new(&PendulumTuning::default());
        p.reset(Vec2::new(320.0, 360.0));
        p
    }

    #[test]
    fn test_rest_hangs_straight_down() {
        let p = pendulum();
        assert_eq!(p.bob, Vec2::new(320.0, 430.0));
        assert_eq!(p.bob_offset(), Vec2::new(0.0, 70.0));
    }

    #[test]
    fn test_no_acceleration_stays_at_rest() {
        let mut p = pendulum();
        for _ in 0..100 {
            let offset = p.update(0.0);
            assert_eq!(offset, Vec2::new(0.0, 70.0));
        }
        assert_eq!(p.lateral_force(), 0.0);
        assert_eq!(p.torque(), 0.0);
    }

    #[test]
    fn test_acceleration_swings_bob_along_push() {
        let mut p = pendulum();
        p.update(0.5);
        assert!(p.angle > 0.0);
        assert!(p.bob_offset().x > 0.0);
        assert!(p.lateral_force() > 0.0);
        assert!(p.torque() > 0.0);
    }

    #[test]
    fn test_damping_strictly_shrinks_angular_velocity() {
        let mut p = pendulum();
        p.angular_velocity = 0.3;
        let mut last = p.angular_velocity.abs();
        for _ in 0..200 {
            p.integrate(0.0);
            let now = p.angular_velocity.abs();
            assert!(now < last, "{now} should be below {last}");
            last = now;
        }
    }

    #[test]
    fn test_collide_inverts_with_energy_loss() {
        let mut p = pendulum();
        p.angular_velocity = 0.2;
        p.collide();
        assert!((p.angular_velocity - (-0.16)).abs() < 1e-6);
    }

    #[test]
    fn test_swing_settles_back() {
        let mut p = pendulum();
        p.angle = 0.5;
        for _ in 0..3000 {
            p.update(0.0);
        }
        assert!(p.angle.abs() < 0.5);
        assert!(p.angular_velocity.abs() < 0.01);
    }
}
