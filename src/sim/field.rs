//! Obstacle field: pillars, floating hazards and stars
//!
//! Entities enter at the right edge, scroll left at the current scroll speed
//! and are retired once fully past the left edge. What spawns next depends on
//! the score.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::rect::Rect;
use crate::consts::{PUFF_LARGE_SIZE, PUFF_SMALL_SIZE, ROCK_SIZE, STAR_SIZE};
use crate::tuning::{Span, SpawnTuning, Viewport};

/// What an obstacle is, for spawning, hitbox insets and rendering
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ObstacleKind {
    Pillar,
    Rock,
    Puff,
}

/// Difficulty band selected by score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SpawnTier {
    /// Pillars only
    Opening,
    /// Pillars alternating with rocks
    Mixed,
    /// Pillar, rock, puff rotation
    Chaos,
}

impl SpawnTier {
    pub fn for_score(score: u32, tuning: &SpawnTuning) -> Self {
        if score < tuning.mixed_tier_score {
            SpawnTier::Opening
        } else if score < tuning.chaos_tier_score {
            SpawnTier::Mixed
        } else {
            SpawnTier::Chaos
        }
    }

    /// Gap sizes a pillar may be given in this tier
    pub fn gap_range(self, tuning: &SpawnTuning) -> Span<f32> {
        match self {
            SpawnTier::Opening => tuning.gap_easy,
            SpawnTier::Mixed => tuning.gap_mixed,
            SpawnTier::Chaos => tuning.gap_chaos,
        }
    }
}

/// A top/bottom pillar pair with a gap to fly through
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Pillar {
    /// Left edge
    pub x: f32,
    pub width: f32,
    /// Top of the gap
    pub gap_y: f32,
    pub gap_size: f32,
    pub cap_height: f32,
    /// Bottom pillar extends this far (viewport height)
    pub depth: f32,
    /// Latched once the drone has flown past
    pub passed: bool,
}

impl Pillar {
    pub fn gap_bottom(&self) -> f32 {
        self.gap_y + self.gap_size
    }

    /// Trailing (right) edge
    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    pub fn top_rect(&self) -> Rect {
        Rect::new(self.x, 0.0, self.width, self.gap_y)
    }

    pub fn bottom_rect(&self) -> Rect {
        Rect::new(self.x, self.gap_bottom(), self.width, self.depth)
    }

    /// Decoration hanging below the top pillar
    pub fn top_cap_rect(&self) -> Rect {
        Rect::new(self.x, self.gap_y, self.width, self.cap_height)
    }

    /// Decoration sitting on top of the bottom pillar
    pub fn bottom_cap_rect(&self) -> Rect {
        Rect::new(self.x, self.gap_bottom() - self.cap_height, self.width, self.cap_height)
    }
}

/// Shape-specific data of an obstacle
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ObstacleBody {
    Pillar(Pillar),
    Rock { rect: Rect },
    Puff { rect: Rect, large: bool },
}

/// Anything in the field the drone must avoid
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Obstacle {
    pub id: u32,
    /// Mirrors the scroll speed, refreshed every tick
    pub speed: f32,
    pub body: ObstacleBody,
}

impl Obstacle {
    pub fn kind(&self) -> ObstacleKind {
        match self.body {
            ObstacleBody::Pillar(_) => ObstacleKind::Pillar,
            ObstacleBody::Rock { .. } => ObstacleKind::Rock,
            ObstacleBody::Puff { .. } => ObstacleKind::Puff,
        }
    }

    /// Scroll left at `speed`
    pub fn update(&mut self, speed: f32) {
        self.speed = speed;
        match &mut self.body {
            ObstacleBody::Pillar(pillar) => pillar.x -= speed,
            ObstacleBody::Rock { rect } | ObstacleBody::Puff { rect, .. } => rect.shift_x(-speed),
        }
    }

    /// Raw (un-inset) collision pieces
    pub fn bounding_shapes(&self) -> Vec<Rect> {
        match &self.body {
            ObstacleBody::Pillar(p) => vec![
                p.top_rect(),
                p.bottom_rect(),
                p.top_cap_rect(),
                p.bottom_cap_rect(),
            ],
            ObstacleBody::Rock { rect } | ObstacleBody::Puff { rect, .. } => vec![*rect],
        }
    }

    pub fn right(&self) -> f32 {
        match &self.body {
            ObstacleBody::Pillar(p) => p.right(),
            ObstacleBody::Rock { rect } | ObstacleBody::Puff { rect, .. } => rect.right(),
        }
    }

    pub fn as_pillar(&self) -> Option<&Pillar> {
        match &self.body {
            ObstacleBody::Pillar(p) => Some(p),
            _ => None,
        }
    }

    pub fn as_pillar_mut(&mut self) -> Option<&mut Pillar> {
        match &mut self.body {
            ObstacleBody::Pillar(p) => Some(p),
            _ => None,
        }
    }
}

/// Collectible worth a score bonus
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Star {
    pub id: u32,
    pub rect: Rect,
    pub speed: f32,
}

impl Star {
    pub fn update(&mut self, speed: f32) {
        self.speed = speed;
        self.rect.shift_x(-speed);
    }
}

/// Result of a spawn event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Spawned {
    pub id: u32,
    pub kind: ObstacleKind,
    /// Star that came with a pillar
    pub star: Option<u32>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ObstacleField {
    /// Live obstacles, in spawn order
    pub obstacles: Vec<Obstacle>,
    /// Live stars, in spawn order
    pub stars: Vec<Star>,
    /// Ticks until the next spawn
    pub spawn_countdown: u32,
    /// Pillar spawns until the next star attempt
    pub star_countdown: u32,
    /// Mixed tier: whether the next spawn is a pillar
    pub pillar_next: bool,
    /// Chaos tier rotation counter
    pub cycle: u32,
    next_id: u32,
    tuning: SpawnTuning,
}

impl ObstacleField {
    pub fn new(tuning: &SpawnTuning) -> Self {
        Self {
            obstacles: Vec::new(),
            stars: Vec::new(),
            spawn_countdown: tuning.interval.min,
            star_countdown: tuning.star_countdown.min,
            pillar_next: true,
            cycle: 0,
            next_id: 1,
            tuning: tuning.clone(),
        }
    }

    /// Empty field and fresh timers for a new round
    pub fn reset<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.obstacles.clear();
        self.stars.clear();
        self.spawn_countdown = self.tuning.interval.sample(rng);
        self.star_countdown = self.tuning.star_countdown.sample(rng);
        self.pillar_next = true;
        self.cycle = 0;
        self.next_id = 1;
    }

    fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Move everything one tick at the given scroll speed
    pub fn advance(&mut self, speed: f32) {
        for obstacle in &mut self.obstacles {
            obstacle.update(speed);
        }
        for star in &mut self.stars {
            star.update(speed);
        }
    }

    /// Count down the spawn timer and spawn when it expires
    pub fn update_spawner<R: Rng + ?Sized>(
        &mut self,
        score: u32,
        speed: f32,
        viewport: Viewport,
        rng: &mut R,
    ) -> Option<Spawned> {
        self.spawn_countdown = self.spawn_countdown.saturating_sub(1);
        if self.spawn_countdown > 0 {
            return None;
        }
        self.spawn_countdown = self.tuning.interval.sample(rng);
        Some(self.spawn(score, speed, viewport, rng))
    }

    /// Pick the next obstacle kind for the given score, advancing the rotation
    pub fn next_kind(&mut self, score: u32) -> ObstacleKind {
        match SpawnTier::for_score(score, &self.tuning) {
            SpawnTier::Opening => ObstacleKind::Pillar,
            SpawnTier::Mixed => {
                let kind = if self.pillar_next {
                    ObstacleKind::Pillar
                } else {
                    ObstacleKind::Rock
                };
                self.pillar_next = !self.pillar_next;
                kind
            }
            SpawnTier::Chaos => {
                let kind = match self.cycle % 3 {
                    0 => ObstacleKind::Pillar,
                    1 => ObstacleKind::Rock,
                    _ => ObstacleKind::Puff,
                };
                self.cycle += 1;
                kind
            }
        }
    }

    /// Spawn one obstacle at the right edge
    pub fn spawn<R: Rng + ?Sized>(
        &mut self,
        score: u32,
        speed: f32,
        viewport: Viewport,
        rng: &mut R,
    ) -> Spawned {
        let kind = self.next_kind(score);
        let id = self.next_entity_id();
        let mut star = None;

        let body = match kind {
            ObstacleKind::Pillar => {
                let tier = SpawnTier::for_score(score, &self.tuning);
                let pillar = self.roll_pillar(tier, viewport, rng);
                star = self.try_spawn_star(&pillar, speed, viewport, rng);
                ObstacleBody::Pillar(pillar)
            }
            ObstacleKind::Rock => ObstacleBody::Rock {
                rect: Rect::from_center(self.hazard_center(viewport, rng), ROCK_SIZE, ROCK_SIZE),
            },
            ObstacleKind::Puff => {
                let large = rng.random_bool(0.5);
                let size = if large { PUFF_LARGE_SIZE } else { PUFF_SMALL_SIZE };
                ObstacleBody::Puff {
                    rect: Rect::from_center(self.hazard_center(viewport, rng), size, size),
                    large,
                }
            }
        };

        self.obstacles.push(Obstacle { id, speed, body });
        log::debug!("Spawned {:?} #{} at score {}", kind, id, score);
        Spawned { id, kind, star }
    }

    fn roll_pillar<R: Rng + ?Sized>(
        &self,
        tier: SpawnTier,
        viewport: Viewport,
        rng: &mut R,
    ) -> Pillar {
        let gap_size = tier.gap_range(&self.tuning).sample(rng);
        let margin = self.tuning.gap_margin;
        let gap_y = Span::new(margin, viewport.height - margin - gap_size).sample(rng);
        Pillar {
            x: viewport.width,
            width: self.tuning.pillar_width,
            gap_y,
            gap_size,
            cap_height: self.tuning.cap_height,
            depth: viewport.height,
            passed: false,
        }
    }

    fn hazard_center<R: Rng + ?Sized>(&self, viewport: Viewport, rng: &mut R) -> Vec2 {
        let y = Span::new(
            self.tuning.hazard_min_y,
            viewport.height - self.tuning.hazard_bottom_margin,
        )
        .sample(rng);
        Vec2::new(viewport.width + self.tuning.spawn_lead, y)
    }

    /// Count down towards a star and place one inside `pillar`'s gap when due
    pub fn try_spawn_star<R: Rng + ?Sized>(
        &mut self,
        pillar: &Pillar,
        speed: f32,
        viewport: Viewport,
        rng: &mut R,
    ) -> Option<u32> {
        self.star_countdown = self.star_countdown.saturating_sub(1);
        if self.star_countdown > 0 {
            return None;
        }
        self.star_countdown = self.tuning.star_countdown.sample(rng);
        if self.stars.len() >= self.tuning.max_live_stars {
            return None;
        }

        let padding = self.tuning.star_padding;
        let y = Span::new(pillar.gap_y + padding, pillar.gap_bottom() - padding).sample(rng);
        let center = Vec2::new(viewport.width + self.tuning.spawn_lead, y);
        let id = self.next_entity_id();
        self.stars.push(Star {
            id,
            rect: Rect::from_center(center, STAR_SIZE, STAR_SIZE),
            speed,
        });
        Some(id)
    }

    /// Drop everything that has fully left the viewport on the left
    pub fn retire_offscreen(&mut self) {
        self.obstacles.retain(|o| o.right() > 0.0);
        self.stars.retain(|s| s.rect.right() > 0.0);
    }
}
