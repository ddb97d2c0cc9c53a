//! Fixed timestep simulation tick
//!
//! One tick is one rendered frame. While playing, the phases run in a fixed
//! order: environment, drone physics, obstacle field, collisions, cleanup.

use glam::Vec2;

use super::collision;
use super::state::{GameEvent, GamePhase, GameState};

/// Input for a single tick
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Held: thrust up this tick
    pub thrust_up: bool,
    /// Held: thrust down this tick
    pub thrust_down: bool,
    /// Pressed this tick: start / restart
    pub confirm: bool,
    /// Pressed this tick: leave the game
    pub quit: bool,
}

/// Whether the host loop should keep running
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickStatus {
    Continue,
    Quit,
}

/// Advance the game state by one tick
pub fn tick(state: &mut GameState, input: &TickInput) -> TickStatus {
    state.events.clear();

    if input.quit {
        log::info!("Quit requested after {} ticks", state.time_ticks);
        return TickStatus::Quit;
    }

    state.time_ticks += 1;
    state.environment.scroll_layers(state.viewport.width);

    match state.phase {
        GamePhase::Start => {
            if input.confirm {
                state.start_round();
            }
        }
        GamePhase::Playing => step_round(state, input),
        GamePhase::GameOver => {
            if input.confirm {
                if state.tuning.restart_to_title {
                    state.return_to_title();
                } else {
                    state.start_round();
                }
            }
        }
    }

    TickStatus::Continue
}

fn step_round(state: &mut GameState, input: &TickInput) {
    state.round_ticks += 1;

    // Environment
    if let Some(wind) = state.environment.update_wind(&mut state.rng) {
        state.events.push(GameEvent::WindChanged {
            wind,
            scroll_speed: state.environment.scroll_speed(),
        });
    }
    if let Some(force) = state.environment.update_gust(&mut state.rng) {
        state.drone.apply_force(Vec2::new(force, 0.0));
    }
    let speed = state.environment.scroll_speed();

    // Drone physics
    if input.thrust_up {
        state.drone.thrust_up();
    }
    if input.thrust_down {
        state.drone.thrust_down();
    }
    state.drone.update();

    // Obstacle field
    state.field.advance(speed);
    if let Some(spawned) =
        state
            .field
            .update_spawner(state.score.score, speed, state.viewport, &mut state.rng)
    {
        state.events.push(GameEvent::Spawned {
            id: spawned.id,
            kind: spawned.kind,
        });
    }

    // Collisions
    let drone_rect = state.drone.rect();
    let report = collision::resolve(
        &drone_rect,
        &mut state.field,
        state.viewport,
        &state.tuning.hitbox,
    );

    for id in report.stars {
        state.score.score += state.tuning.spawn.star_bonus;
        state.score.stars += 1;
        state.events.push(GameEvent::StarCollected {
            id,
            score: state.score.score,
            stars: state.score.stars,
        });
    }
    for id in report.passed {
        state.score.score += 1;
        state.events.push(GameEvent::ObstaclePassed {
            id,
            score: state.score.score,
        });
    }

    if state.tuning.pendulum.bob_strikes {
        let contact = collision::bob_contact(
            state.drone.pendulum.bob,
            state.tuning.pendulum.bob_radius,
            &state.field.obstacles,
        );
        match contact {
            Some(obstacle) if !state.bob_touching => {
                state.drone.pendulum.collide();
                state.bob_touching = true;
                state.events.push(GameEvent::BobStruck { obstacle });
            }
            Some(_) => {}
            None => state.bob_touching = false,
        }
    }

    if let Some(cause) = report.crash {
        state.end_round(cause);
        return;
    }

    // Cleanup
    state.field.retire_offscreen();
}
