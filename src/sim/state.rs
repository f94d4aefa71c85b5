//! Game state and core simulation types
//!
//! Everything the simulation needs between ticks lives in `GameState`,
//! including the RNG, so a cloned state replays identically.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::asteroid::Asteroid;
use super::enemy::Enemy;
use super::explosion::Explosion;
use super::pickup::{Powerup, PowerupKind};
use super::player::Player;
use super::projectile::Bullet;
use super::spawn;
use crate::Tuning;

/// Mixed into the run seed for the particle stream
const FX_STREAM_SALT: u64 = 0x9e37_79b9_7f4a_7c15;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Normal play
    Active,
    /// Field cleared, waiting out the transition delay
    LevelComplete,
    /// Player destroyed, waiting for reset
    GameOver,
    /// Frozen; only explosions keep fading
    Paused,
}

/// Discrete things that happened during a tick (sound triggers, UI flashes)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    Shoot,
    EnemyShoot,
    Explosion { pos: Vec2 },
    PowerupCollected(PowerupKind),
    ShieldHit,
    LevelComplete { level: u32 },
    GameOver,
}

impl GameEvent {
    /// Stable trigger name for event consumers
    pub fn name(&self) -> &'static str {
        match self {
            GameEvent::Shoot => "shoot",
            GameEvent::EnemyShoot => "enemy_shoot",
            GameEvent::Explosion { .. } => "explosion",
            GameEvent::PowerupCollected(_) => "powerup",
            GameEvent::ShieldHit => "shield_hit",
            GameEvent::LevelComplete { .. } => "level_complete",
            GameEvent::GameOver => "game_over",
        }
    }
}

/// Read-only snapshot for the HUD / debug overlay
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Hud {
    pub score: u64,
    pub level: u32,
    pub shields: u8,
    pub spread_shot: bool,
    pub rapid_fire: bool,
    pub invulnerable: bool,
    pub debug_invincible: bool,
    pub phase: GamePhase,
    pub asteroids: usize,
    pub enemies: usize,
    pub bullets: usize,
    pub powerups: usize,
}

/// Complete game state (deterministic, serializable)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    pub rng: Pcg32,
    /// Particle stream, never drawn from by gameplay
    pub fx_rng: Pcg32,
    pub tuning: Tuning,
    /// Current level (1-based)
    pub level: u32,
    pub score: u64,
    /// Simulation tick counter (does not advance while paused)
    pub time_ticks: u64,
    pub phase: GamePhase,
    /// Phase to return to when unpausing
    pub resume_phase: GamePhase,
    /// Ticks left in the level-complete transition
    pub level_transition_ticks: u32,
    /// Ticks until the next enemy may spawn
    pub enemy_spawn_ticks: u32,
    pub boss_spawned: bool,
    /// Debug: threats are destroyed instead of hurting the player
    pub debug_invincible: bool,
    pub player: Player,
    /// Entity collections (sorted by id for determinism)
    pub asteroids: Vec<Asteroid>,
    pub bullets: Vec<Bullet>,
    pub enemies: Vec<Enemy>,
    pub powerups: Vec<Powerup>,
    /// Cosmetic only
    pub explosions: Vec<Explosion>,
    /// Events raised by the most recent tick
    #[serde(skip)]
    pub events: Vec<GameEvent>,
    next_id: u32,
}

impl GameState {
    /// Create a new game with default tuning
    pub fn new(seed: u64) -> Self {
        Self::with_tuning(seed, Tuning::default())
    }

    /// Create a new game and spawn level 1
    pub fn with_tuning(seed: u64, tuning: Tuning) -> Self {
        let mut state = Self::empty(
            seed,
            tuning.sanitized(),
            Pcg32::seed_from_u64(seed),
            Pcg32::seed_from_u64(seed ^ FX_STREAM_SALT),
        );
        spawn::begin_level(&mut state);
        state
    }

    /// Level 1 with nothing spawned yet
    pub(crate) fn empty(seed: u64, tuning: Tuning, rng: Pcg32, fx_rng: Pcg32) -> Self {
        let bounds = Vec2::new(tuning.world_width, tuning.world_height);
        Self {
            seed,
            rng,
            fx_rng,
            tuning,
            level: 1,
            score: 0,
            time_ticks: 0,
            phase: GamePhase::Active,
            resume_phase: GamePhase::Active,
            level_transition_ticks: 0,
            enemy_spawn_ticks: 0,
            boss_spawned: false,
            debug_invincible: false,
            player: Player::new(bounds / 2.0),
            asteroids: Vec::new(),
            bullets: Vec::new(),
            enemies: Vec::new(),
            powerups: Vec::new(),
            explosions: Vec::new(),
            events: Vec::new(),
            next_id: 1,
        }
    }

    /// World size
    #[inline]
    pub fn bounds(&self) -> Vec2 {
        Vec2::new(self.tuning.world_width, self.tuning.world_height)
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        self.bounds() / 2.0
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    pub fn add_asteroid(&mut self, mut asteroid: Asteroid) {
        asteroid.id = self.next_entity_id();
        self.asteroids.push(asteroid);
    }

    pub fn add_bullet(&mut self, mut bullet: Bullet) {
        bullet.id = self.next_entity_id();
        self.bullets.push(bullet);
    }

    pub fn add_enemy(&mut self, mut enemy: Enemy) {
        enemy.id = self.next_entity_id();
        self.enemies.push(enemy);
    }

    pub fn add_powerup(&mut self, kind: PowerupKind, pos: Vec2) {
        let mut powerup = Powerup::new(kind, pos);
        powerup.id = self.next_entity_id();
        self.powerups.push(powerup);
    }

    /// Spawn a particle burst and raise the matching event
    pub fn add_explosion(&mut self, pos: Vec2) {
        let explosion = Explosion::new(pos, &mut self.fx_rng);
        self.explosions.push(explosion);
        self.events.push(GameEvent::Explosion { pos });
    }

    /// Ensure collections are sorted by ID for deterministic iteration
    pub fn normalize_order(&mut self) {
        self.asteroids.sort_by_key(|a| a.id);
        self.bullets.sort_by_key(|b| b.id);
        self.enemies.sort_by_key(|e| e.id);
        self.powerups.sort_by_key(|p| p.id);
    }

    /// Phase ignoring a pause overlay
    pub fn effective_phase(&self) -> GamePhase {
        match self.phase {
            GamePhase::Paused => self.resume_phase,
            phase => phase,
        }
    }

    pub fn is_game_over(&self) -> bool {
        self.effective_phase() == GamePhase::GameOver
    }

    pub fn is_level_complete(&self) -> bool {
        self.effective_phase() == GamePhase::LevelComplete
    }

    pub fn is_paused(&self) -> bool {
        self.phase == GamePhase::Paused
    }

    pub fn hud(&self) -> Hud {
        Hud {
            score: self.score,
            level: self.level,
            shields: self.player.shields,
            spread_shot: self.player.spread_shot,
            rapid_fire: self.player.rapid_fire,
            invulnerable: self.player.invulnerable,
            debug_invincible: self.debug_invincible,
            phase: self.phase,
            asteroids: self.asteroids.len(),
            enemies: self.enemies.len(),
            bullets: self.bullets.len(),
            powerups: self.powerups.len(),
        }
    }
}
