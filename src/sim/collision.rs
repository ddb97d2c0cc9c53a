//! Collision detection between the drone and the obstacle field
//!
//! Obstacles and the drone are tested with inset hitboxes; stars use the raw
//! sprite bounds so pickups feel generous. Nothing here changes the score; the
//! caller turns the report into score changes and a phase transition.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::field::{Obstacle, ObstacleField, ObstacleKind, Star};
use super::rect::Rect;
use crate::tuning::{HitboxTuning, Viewport};

/// What ended the round
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CrashCause {
    Obstacle { id: u32, kind: ObstacleKind },
    Ceiling,
    Ground,
}

/// Everything the drone touched this tick
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CollisionReport {
    /// First crash found, if any
    pub crash: Option<CrashCause>,
    /// Pillars passed for the first time
    pub passed: Vec<u32>,
    /// Stars picked up (already removed from the field)
    pub stars: Vec<u32>,
}

/// Inset applied to the drone and to the obstacle for one obstacle kind
fn insets(kind: ObstacleKind, hitbox: &HitboxTuning) -> (f32, f32) {
    match kind {
        ObstacleKind::Pillar => (hitbox.drone, hitbox.pillar),
        ObstacleKind::Rock => (hitbox.drone_vs_rock, hitbox.rock),
        ObstacleKind::Puff => (hitbox.drone, hitbox.puff),
    }
}

/// Check the drone sprite bounds against every piece of an obstacle
pub fn drone_hits_obstacle(drone: &Rect, obstacle: &Obstacle, hitbox: &HitboxTuning) -> bool {
    let (drone_inset, obstacle_inset) = insets(obstacle.kind(), hitbox);
    let drone_box = drone.inset(drone_inset);
    obstacle
        .bounding_shapes()
        .iter()
        .any(|piece| drone_box.intersects(&piece.inset(obstacle_inset)))
}

/// Check the drone against the top of the world and the ground line
pub fn boundary_crash(drone: &Rect, viewport: Viewport, hitbox: &HitboxTuning) -> Option<CrashCause> {
    let ground_line = viewport.height - hitbox.ground_height;
    if drone.top() <= 0.0 {
        Some(CrashCause::Ceiling)
    } else if drone.bottom() >= ground_line + hitbox.ground_slack {
        Some(CrashCause::Ground)
    } else {
        None
    }
}

/// Remove and return every star overlapping the drone
pub fn collect_stars(drone: &Rect, stars: &mut Vec<Star>) -> Vec<u32> {
    let mut collected = Vec::new();
    stars.retain(|star| {
        if drone.intersects(&star.rect) {
            collected.push(star.id);
            false
        } else {
            true
        }
    });
    collected
}

/// Latch and return pillars whose trailing edge is now behind the drone
pub fn detect_passes(drone: &Rect, obstacles: &mut [Obstacle]) -> Vec<u32> {
    let mut passed = Vec::new();
    for obstacle in obstacles.iter_mut() {
        let id = obstacle.id;
        if let Some(pillar) = obstacle.as_pillar_mut() {
            if !pillar.passed && pillar.right() < drone.left() {
                pillar.passed = true;
                passed.push(id);
            }
        }
    }
    passed
}

/// First obstacle the pendulum bob is touching, if any
pub fn bob_contact(bob: Vec2, radius: f32, obstacles: &[Obstacle]) -> Option<u32> {
    obstacles
        .iter()
        .find(|o| {
            o.bounding_shapes()
                .iter()
                .any(|piece| piece.intersects_circle(bob, radius))
        })
        .map(|o| o.id)
}

/// Run every drone-vs-world test for one tick
pub fn resolve(
    drone: &Rect,
    field: &mut ObstacleField,
    viewport: Viewport,
    hitbox: &HitboxTuning,
) -> CollisionReport {
    let stars = collect_stars(drone, &mut field.stars);
    let passed = detect_passes(drone, &mut field.obstacles);

    let crash = field
        .obstacles
        .iter()
        .find(|o| drone_hits_obstacle(drone, o, hitbox))
        .map(|o| CrashCause::Obstacle {
            id: o.id,
            kind: o.kind(),
        })
        .or_else(|| boundary_crash(drone, viewport, hitbox));

    CollisionReport {
        crash,
        passed,
        stars,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::field::{ObstacleBody, Pillar};

    fn pillar(id: u32, x: f32) -> Obstacle {
        Obstacle {
            id,
            speed: 5.0,
            body: ObstacleBody::Pillar(Pillar {
                x,
                width: 80.0,
                gap_y: 200.0,
                gap_size: 300.0,
                cap_height: 50.0,
                depth: 720.0,
                passed: false,
            }),
        }
    }

    fn rock(id: u32, center: Vec2) -> Obstacle {
        Obstacle {
            id,
            speed: 5.0,
            body: ObstacleBody::Rock {
                rect: Rect::from_center(center, 100.0, 100.0),
            },
        }
    }

    fn puff(id: u32, center: Vec2) -> Obstacle {
        Obstacle {
            id,
            speed: 5.0,
            body: ObstacleBody::Puff {
                rect: Rect::from_center(center, 50.0, 50.0),
                large: false,
            },
        }
    }

    fn drone_at(x: f32, y: f32) -> Rect {
        Rect::from_center(Vec2::new(x, y), 60.0, 45.0)
    }

    #[test]
    fn test_drone_in_gap_is_safe() {
        let hitbox = HitboxTuning::default();
        // Gap 200..500, caps cover 200..250 and 450..500
        assert!(!drone_hits_obstacle(&drone_at(340.0, 350.0), &pillar(1, 300.0), &hitbox));
    }

    #[test]
    fn test_drone_hits_cap() {
        let hitbox = HitboxTuning::default();
        // Drone inset box spans y 225..255 at y=240; cap inset spans 207.5..242.5
        assert!(drone_hits_obstacle(&drone_at(340.0, 240.0), &pillar(1, 300.0), &hitbox));
    }

    #[test]
    fn test_inset_forgives_grazing() {
        let hitbox = HitboxTuning::default();
        // Raw sprite overlaps the top cap by a few units but the inset boxes do not
        let drone = drone_at(340.0, 270.0);
        let p = pillar(1, 300.0);
        assert!(drone.intersects(&p.as_pillar().unwrap().top_cap_rect()));
        assert!(!drone_hits_obstacle(&drone, &p, &hitbox));
    }

    #[test]
    fn test_rock_uses_larger_inset_than_puff() {
        let hitbox = HitboxTuning::default();
        // Horizontal distance between centers where only the puff inset would still hit
        let drone = drone_at(300.0, 300.0);
        // Rock: drone half-width 20, rock half-width 35 -> hit below 55
        assert!(!drone_hits_obstacle(&drone, &rock(1, Vec2::new(357.0, 300.0)), &hitbox));
        assert!(drone_hits_obstacle(&drone, &rock(1, Vec2::new(353.0, 300.0)), &hitbox));
        // Puff: drone half-width 22.5, puff half-width 17.5 -> hit below 40
        assert!(drone_hits_obstacle(&drone, &puff(2, Vec2::new(338.0, 300.0)), &hitbox));
        assert!(!drone_hits_obstacle(&drone, &puff(2, Vec2::new(342.0, 300.0)), &hitbox));
    }

    #[test]
    fn test_boundaries() {
        let hitbox = HitboxTuning::default();
        let viewport = Viewport::default();
        assert_eq!(boundary_crash(&drone_at(320.0, 360.0), viewport, &hitbox), None);
        assert_eq!(
            boundary_crash(&drone_at(320.0, 22.0), viewport, &hitbox),
            Some(CrashCause::Ceiling)
        );
        // Ground line at 649, crash once the bottom reaches 659
        assert_eq!(boundary_crash(&drone_at(320.0, 636.0), viewport, &hitbox), None);
        assert_eq!(
            boundary_crash(&drone_at(320.0, 636.5), viewport, &hitbox),
            Some(CrashCause::Ground)
        );
    }

    #[test]
    fn test_pass_is_latched() {
        let drone = drone_at(320.0, 360.0);
        let mut obstacles = vec![pillar(1, 300.0)];
        assert!(detect_passes(&drone, &mut obstacles).is_empty());

        // Trailing edge at 289 < drone left edge 290
        obstacles[0].update(91.0);
        assert_eq!(detect_passes(&drone, &mut obstacles), vec![1]);
        obstacles[0].update(5.0);
        assert!(detect_passes(&drone, &mut obstacles).is_empty());
    }

    #[test]
    fn test_hazards_never_score_passes() {
        let drone = drone_at(320.0, 360.0);
        let mut obstacles = vec![rock(1, Vec2::new(0.0, 300.0))];
        assert!(detect_passes(&drone, &mut obstacles).is_empty());
    }

    #[test]
    fn test_star_pickup_removes_star() {
        let drone = drone_at(320.0, 360.0);
        let mut stars = vec![
            Star {
                id: 7,
                rect: Rect::from_center(Vec2::new(340.0, 370.0), 35.0, 35.0),
                speed: 5.0,
            },
            Star {
                id: 8,
                rect: Rect::from_center(Vec2::new(900.0, 370.0), 35.0, 35.0),
                speed: 5.0,
            },
        ];
        assert_eq!(collect_stars(&drone, &mut stars), vec![7]);
        assert_eq!(stars.len(), 1);
        assert_eq!(stars[0].id, 8);
        assert!(collect_stars(&drone, &mut stars).is_empty());
    }

    #[test]
    fn test_bob_contact() {
        let obstacles = vec![pillar(3, 300.0)];
        assert_eq!(bob_contact(Vec2::new(340.0, 350.0), 8.0, &obstacles), None);
        assert_eq!(bob_contact(Vec2::new(340.0, 455.0), 8.0, &obstacles), Some(3));
    }
}
