//! Fixed timestep simulation tick
//!
//! Per tick: input, entity updates, collision resolution, spawning, then
//! phase transitions. Nothing is reordered and nothing reads the wall clock.

use glam::Vec2;

use super::asteroid::Asteroid;
use super::autopilot;
use super::collision::{boxes_overlap, circles_overlap, resolve_asteroid_pair};
use super::kinematics::wrap;
use super::pickup::PowerupKind;
use super::player::{Player, Turn};
use super::projectile::Bullet;
use super::spawn;
use super::state::{GameEvent, GamePhase, GameState};
use crate::consts::*;

/// Input commands for a single tick (deterministic)
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TickInput {
    pub rotate_left: bool,
    pub rotate_right: bool,
    pub thrust: bool,
    /// Fire pressed this tick
    pub fire: bool,
    /// Fire held down (drives rapid fire)
    pub fire_held: bool,
    /// Pause toggle
    pub pause: bool,
    /// Skip the level-complete delay
    pub advance_level: bool,
    /// Start over after game over
    pub reset: bool,
    /// Debug: destroy threats instead of taking damage
    pub toggle_invincible: bool,
    /// Debug: blow up everything on the field
    pub skip_level: bool,
    /// Debug: restart one level back
    pub previous_level: bool,
    pub grant_spread_shot: bool,
    pub grant_shield: bool,
    /// Idle/demo mode - the autopilot flies the ship
    pub autopilot: bool,
}

/// How the damage policy handled a contact with the player
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Hit {
    /// Debug invincibility, the threat is destroyed
    Invincible,
    /// A shield charge soaked it up
    Shielded,
    /// Invulnerability window or already dead
    Ignored,
    Fatal,
}

/// Advance the game state by one fixed timestep
pub fn tick(state: &mut GameState, input: &TickInput) {
    state.events.clear();

    if input.pause {
        match state.phase {
            GamePhase::Paused => {
                state.phase = state.resume_phase;
                log::debug!("Resumed");
            }
            phase => {
                state.resume_phase = phase;
                state.phase = GamePhase::Paused;
                log::debug!("Paused");
            }
        }
    }

    let input = if input.autopilot && state.phase != GamePhase::Paused {
        autopilot::pilot(state, input)
    } else {
        input.clone()
    };

    match state.phase {
        GamePhase::Paused => fade_explosions(state),
        GamePhase::GameOver => {
            if input.reset {
                reset_game(state);
            } else {
                fade_explosions(state);
            }
        }
        GamePhase::LevelComplete => {
            apply_debug_commands(state, &input);
            if state.phase == GamePhase::LevelComplete {
                update_entities(state, &input);
                collect_powerups(state);

                state.level_transition_ticks = state.level_transition_ticks.saturating_sub(1);
                if input.advance_level || state.level_transition_ticks == 0 {
                    start_next_level(state);
                }
            }
        }
        GamePhase::Active => {
            apply_debug_commands(state, &input);
            if state.phase == GamePhase::Active {
                update_entities(state, &input);
                resolve_collisions(state);
            }
            if state.phase == GamePhase::Active {
                spawn::update_enemy_spawner(state);
                check_level_complete(state);
            }
        }
    }

    if state.phase != GamePhase::Paused {
        state.time_ticks += 1;
    }
    state.normalize_order();
}

fn fade_explosions(state: &mut GameState) {
    let bounds = state.bounds();
    for explosion in &mut state.explosions {
        explosion.tick(bounds, &mut state.fx_rng);
    }
    state.explosions.retain(|e| !e.finished());
}

fn apply_debug_commands(state: &mut GameState, input: &TickInput) {
    if input.toggle_invincible {
        state.debug_invincible = !state.debug_invincible;
        log::debug!("Debug invincibility {}", if state.debug_invincible { "on" } else { "off" });
    }
    if input.grant_spread_shot {
        state.player.activate_spread_shot();
        log::debug!("Debug: spread shot granted");
    }
    if input.grant_shield {
        state.player.add_shield();
        log::debug!("Debug: shield granted ({})", state.player.shields);
    }
    if input.skip_level && state.phase == GamePhase::Active {
        log::debug!("Debug: skipping level {}", state.level);
        skip_level(state);
    }
    if input.previous_level && state.level > 1 {
        let level = state.level - 1;
        log::debug!("Debug: back to level {}", level);
        enter_level(state, level);
    }
}

/// Explode every asteroid and enemy on the field, scoring each one
fn skip_level(state: &mut GameState) {
    let asteroids = std::mem::take(&mut state.asteroids);
    for asteroid in &asteroids {
        state.score += asteroid.points();
        state.add_explosion(asteroid.pos);
    }
    let enemies = std::mem::take(&mut state.enemies);
    for enemy in &enemies {
        state.score += enemy.score();
        state.add_explosion(enemy.pos);
    }
}

// === Entity updates ===

fn update_entities(state: &mut GameState, input: &TickInput) {
    let bounds = state.bounds();

    if input.rotate_left {
        state.player.rotate(Turn::Left);
    }
    if input.rotate_right {
        state.player.rotate(Turn::Right);
    }
    if input.thrust {
        state.player.thrust();
    }
    fire_player_weapons(state, input);
    state.player.tick(bounds);

    for asteroid in &mut state.asteroids {
        asteroid.tick(bounds);
    }

    for bullet in &mut state.bullets {
        bullet.tick(bounds);
    }
    state.bullets.retain(|b| !b.expired());

    // Enemies steer and decide to shoot; shots are added after the scan
    let player_pos = state.player.pos;
    let mut shots = Vec::new();
    for enemy in &mut state.enemies {
        enemy.tick(player_pos, bounds, &mut state.rng);
        if enemy.should_shoot(&mut state.rng) {
            shots.push(Bullet::hostile(enemy.pos, enemy.aim_at(player_pos)));
        }
    }
    for shot in shots {
        state.add_bullet(shot);
        state.events.push(GameEvent::EnemyShoot);
    }

    for powerup in &mut state.powerups {
        powerup.tick(bounds);
    }
    state.powerups.retain(|p| !p.expired());

    fade_explosions(state);
}

fn fire_player_weapons(state: &mut GameState, input: &TickInput) {
    let player = &state.player;
    let auto_fire = player.rapid_fire && input.fire_held && player.fire_cooldown == 0;
    if !input.fire && !auto_fire {
        return;
    }

    let nose = wrap(player.nose_position(), state.bounds());
    for heading in player.volley_headings() {
        state.add_bullet(Bullet::friendly(nose, heading));
    }
    if state.player.rapid_fire {
        state.player.fire_cooldown = RAPID_FIRE_DELAY;
    }
    state.events.push(GameEvent::Shoot);
}

// === Collision resolution ===

/// All collision categories in their fixed order
fn resolve_collisions(state: &mut GameState) {
    resolve_asteroid_collisions(state);
    resolve_bullet_asteroid_hits(state);
    resolve_player_asteroid_contacts(state);
    collect_powerups(state);
    resolve_enemy_collisions(state);
    resolve_enemy_bullet_hits(state);
}

/// Drop entries whose flag is set (lengths match by construction)
fn remove_flagged<T>(items: &mut Vec<T>, flags: &[bool]) {
    let mut flags = flags.iter();
    items.retain(|_| !flags.next().copied().unwrap_or(false));
}

/// Take the flagged entries out, preserving order
fn take_flagged<T>(items: &mut Vec<T>, flags: &[bool]) -> Vec<T> {
    let mut taken = Vec::new();
    let mut kept = Vec::with_capacity(items.len());
    for (item, flagged) in items.drain(..).zip(flags.iter().copied().chain(std::iter::repeat(false))) {
        if flagged {
            taken.push(item);
        } else {
            kept.push(item);
        }
    }
    *items = kept;
    taken
}

/// Pairwise bounce between every overlapping pair of asteroids
fn resolve_asteroid_collisions(state: &mut GameState) {
    let bounds = state.bounds();
    let count = state.asteroids.len();
    for i in 0..count {
        for j in (i + 1)..count {
            let (head, tail) = state.asteroids.split_at_mut(j);
            let (a, b) = (&mut head[i], &mut tail[0]);
            if boxes_overlap(&*a, &*b) {
                resolve_asteroid_pair(a, b, bounds);
            }
        }
    }
}

/// Score, explosion and drop roll for a destroyed asteroid.
///
/// Returns the split children, or nothing when `split` is false.
fn asteroid_destroyed(state: &mut GameState, asteroid: &Asteroid, split: bool) -> Vec<Asteroid> {
    state.score += asteroid.points();
    state.add_explosion(asteroid.pos);
    let children = if split {
        asteroid.split(state.bounds(), &mut state.rng)
    } else {
        Vec::new()
    };
    spawn::drop_powerup(state, asteroid.pos);
    children
}

fn resolve_bullet_asteroid_hits(state: &mut GameState) {
    let mut spent = vec![false; state.bullets.len()];
    let mut destroyed = vec![false; state.asteroids.len()];

    for (bi, bullet) in state.bullets.iter().enumerate() {
        if bullet.hostile {
            continue;
        }
        let hit = state
            .asteroids
            .iter()
            .enumerate()
            .find(|(ai, asteroid)| !destroyed[*ai] && boxes_overlap(bullet, *asteroid));
        if let Some((ai, _)) = hit {
            destroyed[ai] = true;
            spent[bi] = true;
        }
    }

    remove_flagged(&mut state.bullets, &spent);
    let shattered = take_flagged(&mut state.asteroids, &destroyed);
    let mut fragments = Vec::new();
    for asteroid in &shattered {
        fragments.extend(asteroid_destroyed(state, asteroid, true));
    }
    for fragment in fragments {
        state.add_asteroid(fragment);
    }
}

/// Apply the damage policy to one contact with the player
fn damage_player(state: &mut GameState) -> Hit {
    if state.phase == GamePhase::GameOver {
        return Hit::Ignored;
    }
    if state.debug_invincible {
        return Hit::Invincible;
    }
    if state.player.invulnerable {
        return Hit::Ignored;
    }
    if state.player.shields > 0 {
        state.player.remove_shield();
        state.player.make_invulnerable(INVULNERABILITY_TICKS);
        state.events.push(GameEvent::ShieldHit);
        state.add_explosion(state.player.pos);
        log::debug!("Shield absorbed a hit ({} left)", state.player.shields);
        return Hit::Shielded;
    }

    state.phase = GamePhase::GameOver;
    state.add_explosion(state.player.pos);
    state.events.push(GameEvent::GameOver);
    log::info!("Game over on level {} with score {}", state.level, state.score);
    Hit::Fatal
}

fn resolve_player_asteroid_contacts(state: &mut GameState) {
    let contacts: Vec<usize> = state
        .asteroids
        .iter()
        .enumerate()
        .filter(|(_, asteroid)| boxes_overlap(&state.player, *asteroid))
        .map(|(i, _)| i)
        .collect();

    let mut destroyed = vec![false; state.asteroids.len()];
    for i in contacts {
        match damage_player(state) {
            Hit::Invincible | Hit::Shielded => destroyed[i] = true,
            Hit::Ignored => {}
            Hit::Fatal => break,
        }
    }

    // Absorbed rocks are destroyed outright, without splitting
    for asteroid in take_flagged(&mut state.asteroids, &destroyed) {
        asteroid_destroyed(state, &asteroid, false);
    }
}

fn apply_powerup(player: &mut Player, kind: PowerupKind) {
    match kind {
        PowerupKind::Shield => player.add_shield(),
        PowerupKind::SpreadShot => player.activate_spread_shot(),
        PowerupKind::RapidFire => player.activate_rapid_fire(),
        PowerupKind::Invincibility => player.make_invulnerable(POWERUP_EFFECT_TICKS),
    }
}

fn collect_powerups(state: &mut GameState) {
    if state.phase == GamePhase::GameOver {
        return;
    }
    let touched: Vec<bool> = state
        .powerups
        .iter()
        .map(|p| circles_overlap(&state.player, p))
        .collect();

    for powerup in take_flagged(&mut state.powerups, &touched) {
        apply_powerup(&mut state.player, powerup.kind);
        state.events.push(GameEvent::PowerupCollected(powerup.kind));
        log::debug!("Collected {}", powerup.kind.as_str());
    }
}

/// Player contact first, then player bullets, then rewards for the dead
fn resolve_enemy_collisions(state: &mut GameState) {
    let contacts: Vec<usize> = state
        .enemies
        .iter()
        .enumerate()
        .filter(|(_, enemy)| !enemy.dead && circles_overlap(&state.player, *enemy))
        .map(|(i, _)| i)
        .collect();

    // An enemy that rammed the ship this tick is not also hit by bullets
    let mut rammed = vec![false; state.enemies.len()];
    for i in contacts {
        match damage_player(state) {
            Hit::Invincible => state.enemies[i].dead = true,
            Hit::Shielded => {
                state.enemies[i].take_damage();
                rammed[i] = true;
            }
            Hit::Ignored => {}
            Hit::Fatal => break,
        }
    }

    let mut spent = vec![false; state.bullets.len()];
    let mut damage = vec![0u32; state.enemies.len()];
    for (bi, bullet) in state.bullets.iter().enumerate() {
        if bullet.hostile {
            continue;
        }
        let hit = state.enemies.iter().enumerate().find(|(ei, enemy)| {
            !enemy.dead
                && !rammed[*ei]
                && damage[*ei] < enemy.health
                && circles_overlap(bullet, *enemy)
        });
        if let Some((ei, _)) = hit {
            damage[ei] += 1;
            spent[bi] = true;
        }
    }
    remove_flagged(&mut state.bullets, &spent);
    for (enemy, hits) in state.enemies.iter_mut().zip(damage) {
        for _ in 0..hits {
            enemy.take_damage();
        }
    }

    let dead: Vec<bool> = state.enemies.iter().map(|e| e.dead).collect();
    for enemy in take_flagged(&mut state.enemies, &dead) {
        state.score += enemy.score();
        state.add_explosion(enemy.pos);
        spawn::drop_powerup(state, enemy.pos);
        log::debug!("{} destroyed", if enemy.boss { "Boss" } else { "Enemy" });
    }
}

fn resolve_enemy_bullet_hits(state: &mut GameState) {
    let hits: Vec<bool> = state
        .bullets
        .iter()
        .map(|b| b.hostile && boxes_overlap(b, &state.player))
        .collect();

    // Enemy bullets are consumed on contact whatever the outcome
    let count = hits.iter().filter(|h| **h).count();
    remove_flagged(&mut state.bullets, &hits);
    for _ in 0..count {
        if damage_player(state) == Hit::Fatal {
            break;
        }
    }
}

// === Level flow ===

fn check_level_complete(state: &mut GameState) {
    if state.phase != GamePhase::Active || !state.asteroids.is_empty() || !state.enemies.is_empty() {
        return;
    }
    state.phase = GamePhase::LevelComplete;
    state.score += state.tuning.level_complete_bonus;
    state.level_transition_ticks = state.tuning.level_transition_ticks;
    state.events.push(GameEvent::LevelComplete { level: state.level });
    log::info!("Level {} complete, score {}", state.level, state.score);
}

/// Move on from a completed level
pub fn start_next_level(state: &mut GameState) {
    let level = state.level + 1;
    enter_level(state, level);
}

/// Clear transient entities and set up `level` from scratch
fn enter_level(state: &mut GameState, level: u32) {
    state.level = level;
    state.asteroids.clear();
    state.bullets.clear();
    state.enemies.clear();
    state.powerups.clear();
    state.explosions.clear();

    state.player.pos = state.center();
    state.player.vel = Vec2::ZERO;
    state.player.make_invulnerable(INVULNERABILITY_TICKS);

    state.phase = GamePhase::Active;
    state.resume_phase = GamePhase::Active;
    state.level_transition_ticks = 0;
    spawn::begin_level(state);
}

/// Start a fresh run, keeping tuning and both RNG streams
pub fn reset_game(state: &mut GameState) {
    let rng = state.rng.clone();
    let fx_rng = state.fx_rng.clone();
    let tuning = state.tuning.clone();
    *state = GameState::empty(state.seed, tuning, rng, fx_rng);
    log::info!("Game reset");
    spawn::begin_level(state);
}
