//! Enemy saucers
//!
//! Regular enemies wander on a random heading that changes every 60-180
//! ticks. The boss variant steers relative to the player, holding a firing
//! range instead of ramming.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::kinematics::{advance, angle_to_direction};
use crate::consts::*;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Enemy {
    pub id: u32,
    pub pos: Vec2,
    /// Movement heading in radians (`atan2` convention)
    pub heading: f32,
    pub speed: f32,
    pub size: f32,
    pub health: u32,
    pub turn_ticks: u32,
    pub shoot_ticks: u32,
    pub boss: bool,
    pub dead: bool,
}

impl Enemy {
    /// Spawn on a random screen edge
    pub fn spawn<R: Rng>(boss: bool, bounds: Vec2, rng: &mut R) -> Self {
        let pos = if rng.random_bool(0.5) {
            let x = if rng.random_bool(0.5) { 0.0 } else { bounds.x };
            Vec2::new(x, rng.random_range(0.0..bounds.y))
        } else {
            let y = if rng.random_bool(0.5) { 0.0 } else { bounds.y };
            Vec2::new(rng.random_range(0.0..bounds.x), y)
        };
        Self::new(super::kinematics::wrap(pos, bounds), boss, rng)
    }

    pub fn new<R: Rng>(pos: Vec2, boss: bool, rng: &mut R) -> Self {
        let (speed, size, health) = if boss {
            (BOSS_SPEED, BOSS_SIZE, BOSS_HEALTH)
        } else {
            (ENEMY_SPEED, ENEMY_SIZE, ENEMY_HEALTH)
        };
        let mut enemy = Self {
            id: 0,
            pos,
            heading: rng.random_range(0.0..std::f32::consts::TAU),
            speed,
            size,
            health,
            turn_ticks: rng.random_range(ENEMY_TURN_TICKS_MIN..=ENEMY_TURN_TICKS_MAX),
            shoot_ticks: 0,
            boss,
            dead: false,
        };
        enemy.shoot_ticks = enemy.roll_shoot_delay(rng);
        enemy
    }

    #[inline]
    pub fn radius(&self) -> f32 {
        self.size
    }

    pub fn score(&self) -> u64 {
        if self.boss { BOSS_SCORE } else { ENEMY_SCORE }
    }

    fn roll_shoot_delay<R: Rng>(&self, rng: &mut R) -> u32 {
        if self.boss {
            rng.random_range(BOSS_SHOOT_TICKS_MIN..=BOSS_SHOOT_TICKS_MAX)
        } else {
            rng.random_range(ENEMY_SHOOT_TICKS_MIN..=ENEMY_SHOOT_TICKS_MAX)
        }
    }

    /// Steer, move, and count down the shot timer
    pub fn tick<R: Rng>(&mut self, player_pos: Vec2, bounds: Vec2, rng: &mut R) {
        if self.boss {
            self.heading = boss_heading(self.pos, player_pos);
        } else {
            self.turn_ticks = self.turn_ticks.saturating_sub(1);
            if self.turn_ticks == 0 {
                self.heading = rng.random_range(0.0..std::f32::consts::TAU);
                self.turn_ticks = rng.random_range(ENEMY_TURN_TICKS_MIN..=ENEMY_TURN_TICKS_MAX);
            }
        }

        self.pos = advance(self.pos, angle_to_direction(self.heading) * self.speed, bounds);
        self.shoot_ticks = self.shoot_ticks.saturating_sub(1);
    }

    /// True once per elapsed cooldown; re-rolls the next interval
    pub fn should_shoot<R: Rng>(&mut self, rng: &mut R) -> bool {
        if self.shoot_ticks == 0 {
            self.shoot_ticks = self.roll_shoot_delay(rng);
            true
        } else {
            false
        }
    }

    /// Firing angle (radians) toward `target`
    pub fn aim_at(&self, target: Vec2) -> f32 {
        (target.y - self.pos.y).atan2(target.x - self.pos.x)
    }

    pub fn take_damage(&mut self) {
        self.health = self.health.saturating_sub(1);
        if self.health == 0 {
            self.dead = true;
        }
    }
}

/// Close in when far, back off when near, circle when in range
fn boss_heading(pos: Vec2, player_pos: Vec2) -> f32 {
    let to_player = player_pos - pos;
    let dist = to_player.length();
    let toward = to_player.y.atan2(to_player.x);
    if dist < BOSS_MIN_RANGE {
        toward + std::f32::consts::PI
    } else if dist > BOSS_MAX_RANGE {
        toward
    } else {
        toward + std::f32::consts::FRAC_PI_2
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    const BOUNDS: Vec2 = Vec2::new(WORLD_WIDTH, WORLD_HEIGHT);

    #[test]
    fn test_spawns_on_an_edge() {
        let mut rng = Pcg32::seed_from_u64(1);
        for _ in 0..50 {
            let e = Enemy::spawn(false, BOUNDS, &mut rng);
            let on_edge = e.pos.x == 0.0 || e.pos.y == 0.0;
            assert!(on_edge, "{:?}", e.pos);
            assert_eq!(e.health, ENEMY_HEALTH);
        }
    }

    #[test]
    fn test_take_damage_kills_at_zero() {
        let mut rng = Pcg32::seed_from_u64(2);
        let mut e = Enemy::new(Vec2::new(100.0, 100.0), false, &mut rng);
        e.take_damage();
        assert!(!e.dead);
        e.take_damage();
        assert!(e.dead);
        e.take_damage();
        assert_eq!(e.health, 0);
    }

    #[test]
    fn test_should_shoot_fires_once_per_cooldown() {
        let mut rng = Pcg32::seed_from_u64(3);
        let mut e = Enemy::new(Vec2::new(100.0, 100.0), false, &mut rng);
        let mut shots = 0;
        for _ in 0..ENEMY_SHOOT_TICKS_MAX + 1 {
            e.tick(Vec2::new(400.0, 300.0), BOUNDS, &mut rng);
            if e.should_shoot(&mut rng) {
                shots += 1;
                assert!(e.shoot_ticks >= ENEMY_SHOOT_TICKS_MIN);
            }
        }
        assert!(shots >= 1);
    }

    #[test]
    fn test_aim_uses_atan2() {
        let mut rng = Pcg32::seed_from_u64(4);
        let e = Enemy::new(Vec2::new(100.0, 100.0), false, &mut rng);
        let angle = e.aim_at(Vec2::new(100.0, 200.0));
        assert!((angle - std::f32::consts::FRAC_PI_2).abs() < 1e-6);
    }

    #[test]
    fn test_boss_keeps_its_distance() {
        let player = Vec2::new(400.0, 300.0);

        // Too close: heads away
        let away = angle_to_direction(boss_heading(Vec2::new(450.0, 300.0), player));
        assert!(away.x > 0.9);

        // Too far: heads toward
        let toward = angle_to_direction(boss_heading(Vec2::new(750.0, 300.0), player));
        assert!(toward.x < -0.9);

        // In range: moves tangentially
        let orbit = angle_to_direction(boss_heading(Vec2::new(650.0, 300.0), player));
        assert!(orbit.x.abs() < 1e-3);
    }

    #[test]
    fn test_boss_is_tougher() {
        let mut rng = Pcg32::seed_from_u64(5);
        let boss = Enemy::new(Vec2::ZERO, true, &mut rng);
        assert!(boss.health > ENEMY_HEALTH);
        assert!(boss.radius() > ENEMY_SIZE);
        assert!(boss.shoot_ticks <= BOSS_SHOOT_TICKS_MAX);
        assert_eq!(boss.score(), BOSS_SCORE);
    }
}
