//! Data-driven game balance
//!
//! Every gameplay constant lives here so a round can be replayed or rebalanced
//! from a JSON override without touching the simulation code.

use rand::Rng;
use rand::distr::uniform::SampleUniform;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::ConfigError;

/// World dimensions, injected by the host and applied at round reset
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
        }
    }
}

impl Viewport {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let ok = |v: f32| v.is_finite() && v > 0.0;
        if ok(self.width) && ok(self.height) {
            Ok(())
        } else {
            Err(ConfigError::InvalidViewport {
                width: self.width,
                height: self.height,
            })
        }
    }
}

/// Inclusive range that values are drawn from uniformly
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Span<T> {
    pub min: T,
    pub max: T,
}

impl<T: SampleUniform + PartialOrd + Copy> Span<T> {
    pub const fn new(min: T, max: T) -> Self {
        Self { min, max }
    }

    /// Draw a value uniformly from `[min, max]`
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> T {
        rng.random_range(self.min..=self.max)
    }
}

/// Drone flight model
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PhysicsTuning {
    pub mass: f32,
    /// Downward gravity per unit mass
    pub gravity: f32,
    pub thrust_up: f32,
    pub thrust_down: f32,
    pub drag: f32,
    pub max_vertical_velocity: f32,
    /// Rotation limit (degrees, symmetric)
    pub max_rotation: f32,
    pub rotation_damping: f32,
}

impl Default for PhysicsTuning {
    fn default() -> Self {
        Self {
            mass: DRONE_MASS,
            gravity: GRAVITY,
            thrust_up: THRUST_UP,
            thrust_down: THRUST_DOWN,
            drag: DRAG,
            max_vertical_velocity: MAX_VERTICAL_VELOCITY,
            max_rotation: MAX_ROTATION,
            rotation_damping: ROTATION_DAMPING,
        }
    }
}

/// Suspended payload
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PendulumTuning {
    pub rope_length: f32,
    pub gravity: f32,
    pub coupling: f32,
    pub damping: f32,
    pub pull_strength: f32,
    pub torque: f32,
    pub restitution: f32,
    pub bob_radius: f32,
    /// Bounce the bob off obstacles it touches
    pub bob_strikes: bool,
}

impl Default for PendulumTuning {
    fn default() -> Self {
        Self {
            rope_length: ROPE_LENGTH,
            gravity: PENDULUM_GRAVITY,
            coupling: PENDULUM_COUPLING,
            damping: PENDULUM_DAMPING,
            pull_strength: PENDULUM_PULL,
            torque: PENDULUM_TORQUE,
            restitution: PENDULUM_RESTITUTION,
            bob_radius: BOB_RADIUS,
            bob_strikes: true,
        }
    }
}

/// Wind, scrolling and gusts
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WindTuning {
    pub base_scroll_speed: f32,
    pub tailwind: f32,
    pub headwind: f32,
    /// When false the wind stays calm for the whole round
    pub enabled: bool,
    /// Ticks between wind changes
    pub interval: Span<u32>,
    /// Lateral gusts pushing the drone itself
    pub gusts_enabled: bool,
    pub gust_interval: Span<u32>,
    pub gust_duration: Span<u32>,
    pub gust_strength: Span<f32>,
}

impl Default for WindTuning {
    fn default() -> Self {
        Self {
            base_scroll_speed: BASE_SCROLL_SPEED,
            tailwind: TAILWIND,
            headwind: HEADWIND,
            enabled: true,
            interval: Span::new(240, 480),
            gusts_enabled: false,
            gust_interval: Span::new(180, 360),
            gust_duration: Span::new(60, 150),
            gust_strength: Span::new(0.1, 0.25),
        }
    }
}

/// Obstacle schedule and geometry
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SpawnTuning {
    /// Ticks between spawns
    pub interval: Span<u32>,
    /// Pillar spawns between star attempts
    pub star_countdown: Span<u32>,
    pub max_live_stars: usize,
    pub star_bonus: u32,
    pub star_padding: f32,
    pub mixed_tier_score: u32,
    pub chaos_tier_score: u32,
    /// Gap sizes per tier
    pub gap_easy: Span<f32>,
    pub gap_mixed: Span<f32>,
    pub gap_chaos: Span<f32>,
    /// Minimum distance between a gap and the top/bottom of the viewport
    pub gap_margin: f32,
    pub pillar_width: f32,
    pub cap_height: f32,
    pub hazard_min_y: f32,
    pub hazard_bottom_margin: f32,
    pub spawn_lead: f32,
}

impl Default for SpawnTuning {
    fn default() -> Self {
        Self {
            interval: Span::new(90, 150),
            star_countdown: Span::new(1, 5),
            max_live_stars: MAX_LIVE_STARS,
            star_bonus: STAR_BONUS,
            star_padding: STAR_PADDING,
            mixed_tier_score: MIXED_TIER_SCORE,
            chaos_tier_score: CHAOS_TIER_SCORE,
            gap_easy: Span::new(250.0, 350.0),
            gap_mixed: Span::new(230.0, 400.0),
            gap_chaos: Span::new(210.0, 420.0),
            gap_margin: GAP_MARGIN,
            pillar_width: PILLAR_WIDTH,
            cap_height: PILLAR_CAP_HEIGHT,
            hazard_min_y: HAZARD_MIN_Y,
            hazard_bottom_margin: HAZARD_BOTTOM_MARGIN,
            spawn_lead: SPAWN_LEAD,
        }
    }
}

/// Hitbox shrink amounts (total, split evenly between both sides)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HitboxTuning {
    pub drone: f32,
    pub pillar: f32,
    /// Drone inset used against rocks
    pub drone_vs_rock: f32,
    pub rock: f32,
    pub puff: f32,
    pub ground_height: f32,
    /// How far below the ground line the drone may sink before crashing
    pub ground_slack: f32,
}

impl Default for HitboxTuning {
    fn default() -> Self {
        Self {
            drone: 15.0,
            pillar: 15.0,
            drone_vs_rock: 20.0,
            rock: 30.0,
            puff: 15.0,
            ground_height: GROUND_HEIGHT,
            ground_slack: 10.0,
        }
    }
}

/// Complete game balance
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    pub physics: PhysicsTuning,
    pub pendulum: PendulumTuning,
    pub wind: WindTuning,
    pub spawn: SpawnTuning,
    pub hitbox: HitboxTuning,
    /// Restart from GAME_OVER goes back to the title screen instead of straight into play
    pub restart_to_title: bool,
}

fn positive(name: &'static str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::NotPositive { name, value })
    }
}

fn factor(name: &'static str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 && value <= 1.0 {
        Ok(())
    } else {
        Err(ConfigError::NotAFactor { name, value })
    }
}

fn tick_span(name: &'static str, span: Span<u32>) -> Result<(), ConfigError> {
    if span.min >= 1 && span.min <= span.max {
        Ok(())
    } else {
        Err(ConfigError::InvalidRange {
            name,
            min: span.min as f32,
            max: span.max as f32,
        })
    }
}

fn float_span(name: &'static str, span: Span<f32>) -> Result<(), ConfigError> {
    if span.min.is_finite() && span.max.is_finite() && span.min > 0.0 && span.min <= span.max {
        Ok(())
    } else {
        Err(ConfigError::InvalidRange {
            name,
            min: span.min,
            max: span.max,
        })
    }
}

impl Tuning {
    /// Parse a JSON override (missing fields keep their defaults) and validate it
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Check everything that does not depend on the viewport
    pub fn validate(&self) -> Result<(), ConfigError> {
        let p = &self.physics;
        positive("mass", p.mass)?;
        factor("drag", p.drag)?;
        positive("max_vertical_velocity", p.max_vertical_velocity)?;
        positive("max_rotation", p.max_rotation)?;
        factor("rotation_damping", p.rotation_damping)?;

        let pend = &self.pendulum;
        positive("rope_length", pend.rope_length)?;
        factor("pendulum damping", pend.damping)?;
        factor("restitution", pend.restitution)?;
        positive("bob_radius", pend.bob_radius)?;

        let w = &self.wind;
        positive("base_scroll_speed", w.base_scroll_speed)?;
        positive("scroll speed under headwind", w.base_scroll_speed + w.headwind.min(0.0))?;
        positive("scroll speed under tailwind", w.base_scroll_speed + w.tailwind.min(0.0))?;
        tick_span("wind interval", w.interval)?;
        if w.gusts_enabled {
            tick_span("gust interval", w.gust_interval)?;
            tick_span("gust duration", w.gust_duration)?;
            float_span("gust strength", w.gust_strength)?;
        }

        let s = &self.spawn;
        tick_span("spawn interval", s.interval)?;
        tick_span("star countdown", s.star_countdown)?;
        positive("pillar_width", s.pillar_width)?;
        positive("cap_height", s.cap_height)?;
        for (name, gap) in [
            ("easy gap", s.gap_easy),
            ("mixed gap", s.gap_mixed),
            ("chaos gap", s.gap_chaos),
        ] {
            float_span(name, gap)?;
            if gap.min < 2.0 * s.star_padding {
                return Err(ConfigError::StarPaddingTooLarge {
                    padding: s.star_padding,
                    gap: gap.min,
                });
            }
        }
        if s.mixed_tier_score > s.chaos_tier_score {
            return Err(ConfigError::InvalidRange {
                name: "tier scores",
                min: s.mixed_tier_score as f32,
                max: s.chaos_tier_score as f32,
            });
        }

        let h = &self.hitbox;
        positive("ground_height", h.ground_height)?;
        for (name, inset) in [
            ("drone inset", h.drone),
            ("pillar inset", h.pillar),
            ("drone-vs-rock inset", h.drone_vs_rock),
            ("rock inset", h.rock),
            ("puff inset", h.puff),
        ] {
            if !inset.is_finite() || inset < 0.0 {
                return Err(ConfigError::NotPositive { name, value: inset });
            }
        }
        Ok(())
    }

    /// Check the tuning against a concrete viewport
    pub fn validate_for(&self, viewport: Viewport) -> Result<(), ConfigError> {
        viewport.validate()?;
        self.validate()?;

        let s = &self.spawn;
        for gap in [s.gap_easy, s.gap_mixed, s.gap_chaos] {
            if 2.0 * s.gap_margin + gap.max > viewport.height || s.gap_margin < 0.0 {
                return Err(ConfigError::GapDoesNotFit {
                    gap_min: gap.min,
                    gap_max: gap.max,
                    margin: s.gap_margin,
                    height: viewport.height,
                });
            }
        }

        let hazard_max_y = viewport.height - s.hazard_bottom_margin;
        if s.hazard_min_y > hazard_max_y {
            return Err(ConfigError::InvalidRange {
                name: "hazard height",
                min: s.hazard_min_y,
                max: hazard_max_y,
            });
        }

        if self.hitbox.ground_height >= viewport.height {
            return Err(ConfigError::InvalidRange {
                name: "ground height",
                min: self.hitbox.ground_height,
                max: viewport.height,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_default_tuning_is_valid() {
        let tuning = Tuning::default();
        assert_eq!(tuning.validate_for(Viewport::default()), Ok(()));
    }

    #[test]
    fn test_gap_that_cannot_fit_is_rejected() {
        let tuning = Tuning::default();
        // 2 * 100 margin + 420 widest gap > 500
        let err = tuning.validate_for(Viewport::new(1280.0, 500.0)).unwrap_err();
        assert!(matches!(err, ConfigError::GapDoesNotFit { .. }));
    }

    #[test]
    fn test_inverted_gap_range_is_rejected() {
        let mut tuning = Tuning::default();
        tuning.spawn.gap_easy = Span::new(300.0, 200.0);
        assert!(matches!(
            tuning.validate(),
            Err(ConfigError::InvalidRange { name: "easy gap", .. })
        ));
    }

    #[test]
    fn test_star_padding_must_fit_gap() {
        let mut tuning = Tuning::default();
        tuning.spawn.star_padding = 150.0;
        assert!(matches!(
            tuning.validate(),
            Err(ConfigError::StarPaddingTooLarge { .. })
        ));
    }

    #[test]
    fn test_zero_mass_is_rejected() {
        let mut tuning = Tuning::default();
        tuning.physics.mass = 0.0;
        assert_eq!(
            tuning.validate(),
            Err(ConfigError::NotPositive {
                name: "mass",
                value: 0.0
            })
        );
    }

    #[test]
    fn test_bad_viewport_is_rejected() {
        let tuning = Tuning::default();
        assert!(matches!(
            tuning.validate_for(Viewport::new(0.0, 720.0)),
            Err(ConfigError::InvalidViewport { .. })
        ));
    }

    #[test]
    fn test_from_json_keeps_defaults_for_missing_fields() {
        let tuning = Tuning::from_json(r#"{ "wind": { "enabled": false }, "restart_to_title": true }"#)
            .unwrap();
        assert!(!tuning.wind.enabled);
        assert!(tuning.restart_to_title);
        assert_eq!(tuning.wind.base_scroll_speed, BASE_SCROLL_SPEED);
        assert_eq!(tuning.spawn.interval, Span::new(90, 150));
    }

    #[test]
    fn test_from_json_reports_parse_errors() {
        assert!(matches!(
            Tuning::from_json("{ not json"),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn test_span_sample_stays_inside() {
        let mut rng = Pcg32::seed_from_u64(7);
        let span = Span::new(90u32, 150u32);
        for _ in 0..1000 {
            let v = span.sample(&mut rng);
            assert!((90..=150).contains(&v));
        }
    }
}
