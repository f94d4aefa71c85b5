//! Spawn policy: level asteroids, powerup drops and enemy arrivals

use glam::Vec2;
use rand::Rng;

use super::asteroid::{Asteroid, AsteroidSize, level_speed_scale};
use super::enemy::Enemy;
use super::pickup::PowerupKind;
use super::state::GameState;
use crate::Tuning;
use crate::consts::*;

/// Rejection-sampling budget before falling back to the farthest corner
pub const SAFE_SPAWN_ATTEMPTS: u32 = 100;

/// Random point farther than `min_distance` from `player_pos`.
///
/// Gives up after `SAFE_SPAWN_ATTEMPTS` and returns the world corner farthest
/// from the player.
pub fn safe_spawn_position<R: Rng>(
    player_pos: Vec2,
    min_distance: f32,
    bounds: Vec2,
    rng: &mut R,
) -> Vec2 {
    for _ in 0..SAFE_SPAWN_ATTEMPTS {
        let candidate = Vec2::new(
            rng.random_range(0.0..bounds.x),
            rng.random_range(0.0..bounds.y),
        );
        if candidate.distance(player_pos) > min_distance {
            return candidate;
        }
    }
    far_corner(player_pos, bounds)
}

/// Corner of the world farthest from `pos`, kept just inside the bounds
fn far_corner(pos: Vec2, bounds: Vec2) -> Vec2 {
    let edge = |p: f32, extent: f32| if p < extent / 2.0 { (extent - 1.0).max(0.0) } else { 0.0 };
    Vec2::new(edge(pos.x, bounds.x), edge(pos.y, bounds.y))
}

/// Fill the field with the current level's large asteroids
pub fn spawn_level_asteroids(state: &mut GameState) {
    let bounds = state.bounds();
    let player_pos = state.player.pos;
    let count = state.tuning.asteroid_count(state.level);
    let scale = level_speed_scale(state.level, state.tuning.level_speed_step);
    let safe = state.tuning.asteroid_safe_distance;

    for _ in 0..count {
        let pos = safe_spawn_position(player_pos, safe, bounds, &mut state.rng);
        let asteroid = Asteroid::new(AsteroidSize::Large, Some(pos), scale, bounds, &mut state.rng);
        state.add_asteroid(asteroid);
    }
}

/// Spawn asteroids and arm the enemy timer for `state.level`
pub fn begin_level(state: &mut GameState) {
    spawn_level_asteroids(state);
    state.enemy_spawn_ticks = state
        .rng
        .random_range(ENEMY_SPAWN_TICKS_MIN..=ENEMY_SPAWN_TICKS_MAX);
    state.boss_spawned = false;
    log::info!(
        "Level {} started with {} asteroids",
        state.level,
        state.asteroids.len()
    );
}

/// One Bernoulli drop trial for a destroyed asteroid or enemy
pub fn roll_powerup<R: Rng>(tuning: &Tuning, player_shields: u8, rng: &mut R) -> Option<PowerupKind> {
    if tuning.powerup_drops.is_empty() || rng.random::<f64>() >= tuning.powerup_drop_chance {
        return None;
    }
    let kind = tuning.powerup_drops[rng.random_range(0..tuning.powerup_drops.len())];
    if kind == PowerupKind::Shield && tuning.shield_drop_requires_no_shields && player_shields > 0 {
        return None;
    }
    Some(kind)
}

/// Roll a drop and place it at `pos`
pub fn drop_powerup(state: &mut GameState, pos: Vec2) {
    if let Some(kind) = roll_powerup(&state.tuning, state.player.shields, &mut state.rng) {
        log::debug!("Dropped {} at ({:.0}, {:.0})", kind.as_str(), pos.x, pos.y);
        state.add_powerup(kind, pos);
    }
}

/// Count down the enemy timer and spawn when it elapses
pub fn update_enemy_spawner(state: &mut GameState) {
    if state.level < state.tuning.enemies_from_level
        || state.enemies.len() >= state.tuning.max_enemies
    {
        return;
    }

    state.enemy_spawn_ticks = state.enemy_spawn_ticks.saturating_sub(1);
    if state.enemy_spawn_ticks > 0 {
        return;
    }

    let boss = !state.boss_spawned && state.tuning.is_boss_level(state.level);
    let enemy = Enemy::spawn(boss, state.bounds(), &mut state.rng);
    log::debug!(
        "{} spawned at ({:.0}, {:.0})",
        if boss { "Boss" } else { "Enemy" },
        enemy.pos.x,
        enemy.pos.y
    );
    state.add_enemy(enemy);
    if boss {
        state.boss_spawned = true;
    }
    state.enemy_spawn_ticks = state
        .rng
        .random_range(ENEMY_RESPAWN_TICKS_MIN..=ENEMY_RESPAWN_TICKS_MAX);
}
