//! The player's ship

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::kinematics::{advance, clamp_speed, heading_to_direction, normalize_degrees};
use super::pickup::Pulse;
use crate::consts::*;

/// Rotation direction for a single tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Turn {
    Left,
    Right,
}

/// Player-controlled ship
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub pos: Vec2,
    pub vel: Vec2,
    /// Heading in degrees, 0 = up, clockwise
    pub heading: f32,
    pub acceleration: f32,
    pub friction: f32,
    pub max_speed: f32,
    pub size: f32,
    /// Shield charges, each absorbs one hit
    pub shields: u8,
    pub spread_shot: bool,
    pub spread_shot_ticks: u32,
    pub rapid_fire: bool,
    pub rapid_fire_ticks: u32,
    pub invulnerable: bool,
    pub invulnerable_ticks: u32,
    /// Ticks until the next rapid-fire volley
    pub fire_cooldown: u32,
    /// Visual shield shimmer (only advances while shields are up)
    pub shield_pulse: Pulse,
}

impl Player {
    pub fn new(pos: Vec2) -> Self {
        Self {
            pos,
            vel: Vec2::ZERO,
            heading: 0.0,
            acceleration: PLAYER_ACCELERATION,
            friction: PLAYER_FRICTION,
            max_speed: PLAYER_MAX_SPEED,
            size: SHIP_SIZE,
            shields: 0,
            spread_shot: false,
            spread_shot_ticks: 0,
            rapid_fire: false,
            rapid_fire_ticks: 0,
            invulnerable: false,
            invulnerable_ticks: 0,
            fire_cooldown: 0,
            shield_pulse: Pulse::default(),
        }
    }

    /// Collision half-extent of the ship's bounding box
    #[inline]
    pub fn half_extent(&self) -> f32 {
        self.size / 2.0
    }

    pub fn rotate(&mut self, turn: Turn) {
        let step = match turn {
            Turn::Left => -PLAYER_ROTATION_SPEED,
            Turn::Right => PLAYER_ROTATION_SPEED,
        };
        self.heading = normalize_degrees(self.heading + step);
    }

    /// Accelerate along the heading, capped at max speed
    pub fn thrust(&mut self) {
        self.vel += heading_to_direction(self.heading) * self.acceleration;
        self.vel = clamp_speed(self.vel, self.max_speed);
    }

    /// World position one ship length ahead of center (bullet spawn point)
    pub fn nose_position(&self) -> Vec2 {
        self.pos + heading_to_direction(self.heading) * self.size
    }

    /// Friction, integration and effect timers for one tick
    pub fn tick(&mut self, bounds: Vec2) {
        self.vel *= self.friction;
        self.pos = advance(self.pos, self.vel, bounds);

        tick_effect(&mut self.spread_shot, &mut self.spread_shot_ticks);
        tick_effect(&mut self.rapid_fire, &mut self.rapid_fire_ticks);
        tick_effect(&mut self.invulnerable, &mut self.invulnerable_ticks);
        self.fire_cooldown = self.fire_cooldown.saturating_sub(1);

        if self.shields > 0 {
            self.shield_pulse.advance(SHIELD_PULSE_SPEED);
        }
    }

    pub fn add_shield(&mut self) {
        self.shields = (self.shields + 1).min(MAX_SHIELDS);
    }

    pub fn remove_shield(&mut self) {
        self.shields = self.shields.saturating_sub(1);
    }

    /// Re-collecting refreshes the duration (no stacking)
    pub fn activate_spread_shot(&mut self) {
        self.spread_shot = true;
        self.spread_shot_ticks = POWERUP_EFFECT_TICKS;
    }

    pub fn activate_rapid_fire(&mut self) {
        self.rapid_fire = true;
        self.rapid_fire_ticks = POWERUP_EFFECT_TICKS;
        self.fire_cooldown = 0;
    }

    /// Start an invulnerability window, never shortening one already running
    pub fn make_invulnerable(&mut self, ticks: u32) {
        self.invulnerable = true;
        self.invulnerable_ticks = self.invulnerable_ticks.max(ticks);
    }

    /// Headings (degrees) for one trigger pull
    pub fn volley_headings(&self) -> Vec<f32> {
        if self.spread_shot {
            SPREAD_ANGLES
                .iter()
                .map(|offset| normalize_degrees(self.heading + offset))
                .collect()
        } else {
            vec![self.heading]
        }
    }
}

/// Count an effect timer down, clearing the flag on the tick it hits zero
fn tick_effect(active: &mut bool, ticks: &mut u32) {
    if *active {
        *ticks = ticks.saturating_sub(1);
        if *ticks == 0 {
            *active = false;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const BOUNDS: Vec2 = Vec2::new(WORLD_WIDTH, WORLD_HEIGHT);

    #[test]
    fn test_rotate_wraps() {
        let mut p = Player::new(Vec2::new(400.0, 300.0));
        p.rotate(Turn::Left);
        assert_eq!(p.heading, 355.0);
        p.rotate(Turn::Right);
        p.rotate(Turn::Right);
        assert_eq!(p.heading, 5.0);
    }

    #[test]
    fn test_thrust_points_up_and_caps_speed() {
        let mut p = Player::new(Vec2::new(400.0, 300.0));
        p.thrust();
        assert!(p.vel.x.abs() < 1e-6);
        assert!((p.vel.y + PLAYER_ACCELERATION).abs() < 1e-6);

        for _ in 0..100 {
            p.thrust();
        }
        assert!(p.vel.length() <= PLAYER_MAX_SPEED + 1e-4);
    }

    #[test]
    fn test_tick_applies_friction_then_moves() {
        let mut p = Player::new(Vec2::new(400.0, 300.0));
        p.vel = Vec2::new(10.0, 0.0);
        p.tick(BOUNDS);
        assert!((p.vel.x - 9.8).abs() < 1e-4);
        assert!((p.pos.x - 409.8).abs() < 1e-3);
    }

    #[test]
    fn test_nose_position() {
        let mut p = Player::new(Vec2::new(100.0, 100.0));
        assert!((p.nose_position() - Vec2::new(100.0, 80.0)).length() < 1e-4);
        p.heading = 90.0;
        assert!((p.nose_position() - Vec2::new(120.0, 100.0)).length() < 1e-4);
    }

    #[test]
    fn test_shield_saturates_both_ways() {
        let mut p = Player::new(Vec2::ZERO);
        p.remove_shield();
        assert_eq!(p.shields, 0);
        for _ in 0..10 {
            p.add_shield();
        }
        assert_eq!(p.shields, MAX_SHIELDS);
    }

    #[test]
    fn test_spread_shot_refreshes_not_stacks() {
        let mut p = Player::new(Vec2::new(400.0, 300.0));
        p.activate_spread_shot();
        for _ in 0..100 {
            p.tick(BOUNDS);
        }
        assert_eq!(p.spread_shot_ticks, POWERUP_EFFECT_TICKS - 100);
        p.activate_spread_shot();
        assert_eq!(p.spread_shot_ticks, POWERUP_EFFECT_TICKS);
        assert_eq!(p.volley_headings().len(), 3);
    }

    #[test]
    fn test_invulnerability_clears_exactly_at_zero() {
        let mut p = Player::new(Vec2::new(400.0, 300.0));
        p.make_invulnerable(3);
        p.tick(BOUNDS);
        p.tick(BOUNDS);
        assert!(p.invulnerable);
        assert_eq!(p.invulnerable_ticks, 1);
        p.tick(BOUNDS);
        assert!(!p.invulnerable);
        assert_eq!(p.invulnerable_ticks, 0);
        p.tick(BOUNDS);
        assert_eq!(p.invulnerable_ticks, 0);
    }

    proptest! {
        #[test]
        fn prop_shields_never_negative(ops in proptest::collection::vec(any::<bool>(), 0..64)) {
            let mut p = Player::new(Vec2::ZERO);
            for add in ops {
                if add { p.add_shield() } else { p.remove_shield() }
                prop_assert!(p.shields <= MAX_SHIELDS);
            }
        }

        #[test]
        fn prop_player_stays_in_bounds(
            turns in proptest::collection::vec(0u8..4, 1..200),
        ) {
            let mut p = Player::new(Vec2::new(400.0, 300.0));
            for t in turns {
                match t {
                    0 => p.rotate(Turn::Left),
                    1 => p.rotate(Turn::Right),
                    _ => p.thrust(),
                }
                p.tick(BOUNDS);
                prop_assert!(p.pos.x >= 0.0 && p.pos.x < BOUNDS.x);
                prop_assert!(p.pos.y >= 0.0 && p.pos.y < BOUNDS.y);
            }
        }
    }
}
