//! Environment: wind, scroll speed and parallax layers
//!
//! Wind biases the global scroll speed. Everything that scrolls (obstacles,
//! hazards, stars, ground) moves at the effective speed; the background moves
//! at half of it.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::consts::GROUND_TILE_WIDTH;
use crate::tuning::WindTuning;
use crate::wrap_offset;

/// Current wind condition
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Wind {
    Calm,
    Tailwind,
    Headwind,
}

impl Wind {
    /// Candidates for a re-roll; calm is listed twice so it is twice as likely
    const TABLE: [Wind; 4] = [Wind::Tailwind, Wind::Headwind, Wind::Calm, Wind::Calm];
}

/// A lateral push on the drone itself
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Gust {
    /// Ticks until the next gust starts
    pub countdown: u32,
    /// Ticks left in the current gust
    pub remaining: u32,
    /// Horizontal force while the gust blows
    pub force: f32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Environment {
    pub wind: Wind,
    /// Ticks until the wind is re-rolled
    pub wind_countdown: u32,
    pub gust: Gust,
    /// Background layer offset, wraps every viewport width
    pub background_offset: f32,
    /// Ground layer offset, wraps every ground tile
    pub ground_offset: f32,
    tuning: WindTuning,
}

impl Environment {
    pub fn new(tuning: &WindTuning) -> Self {
        Self {
            wind: Wind::Calm,
            wind_countdown: tuning.interval.min,
            gust: Gust::default(),
            background_offset: 0.0,
            ground_offset: 0.0,
            tuning: tuning.clone(),
        }
    }

    /// Calm air and fresh timers for a new round
    pub fn reset<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.wind = Wind::Calm;
        self.wind_countdown = self.tuning.interval.sample(rng);
        self.gust = Gust::default();
        if self.tuning.gusts_enabled {
            self.gust.countdown = self.tuning.gust_interval.sample(rng);
        }
    }

    /// Wind strength added to the base scroll speed
    pub fn wind_strength(&self) -> f32 {
        match self.wind {
            Wind::Calm => 0.0,
            Wind::Tailwind => self.tuning.tailwind,
            Wind::Headwind => self.tuning.headwind,
        }
    }

    /// Foreground scroll speed (units/tick)
    pub fn scroll_speed(&self) -> f32 {
        self.tuning.base_scroll_speed + self.wind_strength()
    }

    pub fn background_speed(&self) -> f32 {
        self.scroll_speed() / 2.0
    }

    /// Count down to the next wind change.
    ///
    /// Returns the new wind when a re-roll changed it.
    pub fn update_wind<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Option<Wind> {
        if !self.tuning.enabled {
            return None;
        }
        self.wind_countdown = self.wind_countdown.saturating_sub(1);
        if self.wind_countdown > 0 {
            return None;
        }

        let previous = self.wind;
        self.wind = Wind::TABLE[rng.random_range(0..Wind::TABLE.len())];
        self.wind_countdown = self.tuning.interval.sample(rng);
        log::debug!(
            "Wind {:?} -> {:?} (scroll {:.1}, next change in {} ticks)",
            previous,
            self.wind,
            self.scroll_speed(),
            self.wind_countdown
        );
        (self.wind != previous).then_some(self.wind)
    }

    /// Advance the gust cycle, returning the lateral force to apply this tick
    pub fn update_gust<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Option<f32> {
        if !self.tuning.gusts_enabled {
            return None;
        }
        let gust = &mut self.gust;
        if gust.remaining > 0 {
            gust.remaining -= 1;
            if gust.remaining == 0 {
                gust.countdown = self.tuning.gust_interval.sample(rng);
            }
            return Some(gust.force);
        }
        if gust.countdown > 0 {
            gust.countdown -= 1;
            return None;
        }

        gust.remaining = self.tuning.gust_duration.sample(rng);
        let direction = if rng.random_bool(0.5) { 1.0 } else { -1.0 };
        gust.force = self.tuning.gust_strength.sample(rng) * direction;
        log::debug!("Gust {:.2} for {} ticks", gust.force, gust.remaining);
        None
    }

    /// Move the parallax layers one tick
    pub fn scroll_layers(&mut self, viewport_width: f32) {
        self.background_offset =
            wrap_offset(self.background_offset - self.background_speed(), viewport_width);
        self.ground_offset = wrap_offset(self.ground_offset - self.scroll_speed(), GROUND_TILE_WIDTH);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn env(tuning: WindTuning) -> (Environment, Pcg32) {
        let mut rng = Pcg32::seed_from_u64(42);
        let mut env = Environment::new(&tuning);
        env.reset(&mut rng);
        (env, rng)
    }

    #[test]
    fn test_calm_scroll_speed() {
        let (env, _) = env(WindTuning::default());
        assert_eq!(env.scroll_speed(), 5.0);
        assert_eq!(env.background_speed(), 2.5);
    }

    #[test]
    fn test_wind_strengths() {
        let (mut env, _) = env(WindTuning::default());
        env.wind = Wind::Tailwind;
        assert_eq!(env.scroll_speed(), 6.0);
        env.wind = Wind::Headwind;
        assert_eq!(env.scroll_speed(), 4.5);
    }

    #[test]
    fn test_reset_rolls_countdown_in_range() {
        for seed in 0..50 {
            let mut rng = Pcg32::seed_from_u64(seed);
            let mut env = Environment::new(&WindTuning::default());
            env.reset(&mut rng);
            assert!((240..=480).contains(&env.wind_countdown));
            assert_eq!(env.wind, Wind::Calm);
        }
    }

    #[test]
    fn test_disabled_wind_stays_calm() {
        let tuning = WindTuning {
            enabled: false,
            ..Default::default()
        };
        let (mut env, mut rng) = env(tuning);
        for _ in 0..5000 {
            assert_eq!(env.update_wind(&mut rng), None);
            assert_eq!(env.scroll_speed(), 5.0);
        }
    }

    #[test]
    fn test_wind_distribution_favors_calm() {
        let (mut env, mut rng) = env(WindTuning::default());
        let mut counts = [0u32; 3];
        for _ in 0..4000 {
            env.wind_countdown = 1;
            env.update_wind(&mut rng);
            match env.wind {
                Wind::Calm => counts[0] += 1,
                Wind::Tailwind => counts[1] += 1,
                Wind::Headwind => counts[2] += 1,
            }
            assert!((240..=480).contains(&env.wind_countdown));
        }
        // Expect ~2000 / ~1000 / ~1000
        assert!(counts[0] > counts[1] && counts[0] > counts[2]);
        assert!(counts[1] > 700 && counts[2] > 700);
    }

    #[test]
    fn test_wind_changes_only_when_countdown_expires() {
        let (mut env, mut rng) = env(WindTuning::default());
        let countdown = env.wind_countdown;
        for _ in 0..countdown - 1 {
            env.update_wind(&mut rng);
            assert_eq!(env.wind, Wind::Calm);
        }
        env.update_wind(&mut rng);
        assert!((240..=480).contains(&env.wind_countdown));
    }

    #[test]
    fn test_gusts_disabled_by_default() {
        let (mut env, mut rng) = env(WindTuning::default());
        for _ in 0..1000 {
            assert_eq!(env.update_gust(&mut rng), None);
        }
    }

    #[test]
    fn test_gust_cycle() {
        let tuning = WindTuning {
            gusts_enabled: true,
            ..Default::default()
        };
        let (mut env, mut rng) = env(tuning);
        let mut pushed = 0;
        for _ in 0..2000 {
            if let Some(force) = env.update_gust(&mut rng) {
                assert!((0.1..=0.25).contains(&force.abs()));
                pushed += 1;
            }
        }
        assert!(pushed > 0);
    }

    #[test]
    fn test_layers_wrap() {
        let (mut env, _) = env(WindTuning::default());
        for _ in 0..1000 {
            env.scroll_layers(1280.0);
            assert!(env.background_offset <= 0.0 && env.background_offset > -1280.0);
            assert!(env.ground_offset <= 0.0 && env.ground_offset > -GROUND_TILE_WIDTH);
        }
    }
}
