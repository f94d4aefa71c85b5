//! Idle/demo mode - a simple pilot that plays the game
//!
//! Produces an ordinary `TickInput` from the current state, so the
//! simulation cannot tell it apart from a human.

use super::kinematics::{heading_delta, heading_towards};
use super::state::{GamePhase, GameState};
use super::tick::TickInput;
use crate::consts::*;

/// Fire when the nose is within this many degrees of the target
const AIM_TOLERANCE: f32 = 8.0;
/// Manual shots are spaced this many ticks apart
const FIRE_INTERVAL: u64 = 10;
/// Close in on targets farther than this
const THRUST_DISTANCE: f32 = 250.0;
/// Never thrust above this speed
const CRUISE_SPEED: f32 = 3.0;
/// Powerups are only worth chasing when nothing is closer than this
const SAFE_RADIUS: f32 = 150.0;

/// Build this tick's input by looking at the field.
///
/// Pause, reset and debug requests from `input` pass through untouched.
pub fn pilot(state: &GameState, input: &TickInput) -> TickInput {
    let mut out = TickInput {
        pause: input.pause,
        toggle_invincible: input.toggle_invincible,
        skip_level: input.skip_level,
        previous_level: input.previous_level,
        grant_spread_shot: input.grant_spread_shot,
        grant_shield: input.grant_shield,
        autopilot: true,
        ..Default::default()
    };

    match state.phase {
        GamePhase::LevelComplete => out.advance_level = true,
        GamePhase::GameOver => out.reset = true,
        GamePhase::Active => fly(state, &mut out),
        GamePhase::Paused => {}
    }
    out
}

fn fly(state: &GameState, out: &mut TickInput) {
    let player = &state.player;

    // Nearest threat: asteroids and enemies alike
    let threat = state
        .asteroids
        .iter()
        .map(|a| a.pos)
        .chain(state.enemies.iter().map(|e| e.pos))
        .min_by(|a, b| {
            a.distance_squared(player.pos)
                .partial_cmp(&b.distance_squared(player.pos))
                .unwrap_or(std::cmp::Ordering::Equal)
        });
    let threat_distance = threat.map_or(f32::INFINITY, |t| t.distance(player.pos));

    // If it's quiet, go grab the nearest powerup instead
    let pickup = if threat_distance > SAFE_RADIUS {
        state
            .powerups
            .iter()
            .map(|p| p.pos)
            .min_by(|a, b| {
                a.distance_squared(player.pos)
                    .partial_cmp(&b.distance_squared(player.pos))
                    .unwrap_or(std::cmp::Ordering::Equal)
            })
    } else {
        None
    };

    let Some(target) = pickup.or(threat) else {
        return;
    };

    let delta = heading_delta(player.heading, heading_towards(player.pos, target));
    if delta > PLAYER_ROTATION_SPEED / 2.0 {
        out.rotate_right = true;
    } else if delta < -PLAYER_ROTATION_SPEED / 2.0 {
        out.rotate_left = true;
    }

    let aligned = delta.abs() < AIM_TOLERANCE;
    if pickup.is_none() && aligned {
        out.fire = state.time_ticks % FIRE_INTERVAL == 0;
        out.fire_held = true;
    }

    let distance = target.distance(player.pos);
    let chasing = pickup.is_some() || distance > THRUST_DISTANCE;
    out.thrust = aligned && chasing && player.vel.length() < CRUISE_SPEED;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::tick;
    use glam::Vec2;

    fn lone_target(at: Vec2) -> GameState {
        let mut state = GameState::new(1);
        state.asteroids.truncate(1);
        state.asteroids[0].pos = at;
        state
    }

    #[test]
    fn test_turns_toward_target() {
        // Target to the right of a ship pointing up: turn clockwise
        let state = lone_target(Vec2::new(700.0, 300.0));
        let input = pilot(&state, &TickInput::default());
        assert!(input.rotate_right && !input.rotate_left);
        assert!(!input.fire);
    }

    #[test]
    fn test_fires_when_aligned() {
        let mut state = lone_target(Vec2::new(400.0, 100.0));
        state.time_ticks = 0;
        let input = pilot(&state, &TickInput::default());
        assert!(!input.rotate_left && !input.rotate_right);
        assert!(input.fire && input.fire_held);
    }

    #[test]
    fn test_advances_and_resets_on_its_own() {
        let mut state = GameState::new(2);
        state.phase = GamePhase::LevelComplete;
        assert!(pilot(&state, &TickInput::default()).advance_level);
        state.phase = GamePhase::GameOver;
        assert!(pilot(&state, &TickInput::default()).reset);
    }

    #[test]
    fn test_chases_powerup_when_clear() {
        let mut state = lone_target(Vec2::new(20.0, 20.0));
        state.add_powerup(crate::sim::PowerupKind::Shield, Vec2::new(400.0, 250.0));
        let input = pilot(&state, &TickInput::default());
        // Straight ahead: no turning, no shooting at a pickup
        assert!(!input.fire && !input.rotate_left && !input.rotate_right);
        assert!(input.thrust);
    }

    #[test]
    fn test_demo_run_makes_progress() {
        let mut state = GameState::new(3);
        // Keep the run alive so the score cannot be reset
        state.debug_invincible = true;
        let input = TickInput {
            autopilot: true,
            ..Default::default()
        };
        for _ in 0..TICKS_PER_SECOND * 30 {
            tick::tick(&mut state, &input);
        }
        assert!(state.score > 0);
    }
}
