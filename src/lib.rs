//! Asteroid Field - a wrapped-plane space shooter simulation
//!
//! Core modules:
//! - `sim`: Deterministic simulation (entities, collisions, level state machine)
//! - `tuning`: Data-driven game balance
//! - `settings`: Player preferences (audio, debug overlay)
//! - `audio`: Maps simulation events to sound cues

pub mod audio;
pub mod settings;
pub mod sim;
pub mod tuning;

pub use settings::Settings;
pub use tuning::Tuning;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation rate (one tick per rendered frame)
    pub const TICKS_PER_SECOND: u32 = 60;

    /// Default world dimensions
    pub const WORLD_WIDTH: f32 = 800.0;
    pub const WORLD_HEIGHT: f32 = 600.0;

    /// Player ship
    pub const SHIP_SIZE: f32 = 20.0;
    pub const PLAYER_ACCELERATION: f32 = 0.5;
    pub const PLAYER_MAX_SPEED: f32 = 10.0;
    pub const PLAYER_FRICTION: f32 = 0.98;
    /// Degrees per tick
    pub const PLAYER_ROTATION_SPEED: f32 = 5.0;
    pub const INVULNERABILITY_TICKS: u32 = 180; // 3 seconds
    pub const MAX_SHIELDS: u8 = 3;
    /// Spread shot fan, degrees relative to heading
    pub const SPREAD_ANGLES: [f32; 3] = [-15.0, 0.0, 15.0];
    /// Auto-fire interval while rapid fire is active and fire is held
    pub const RAPID_FIRE_DELAY: u32 = 5;

    /// Bullets
    pub const BULLET_SIZE: f32 = 4.0;
    pub const BULLET_SPEED: f32 = 10.0;
    pub const ENEMY_BULLET_SPEED: f32 = 7.0; // Slower than player bullets
    pub const BULLET_LIFETIME: u32 = 60;

    /// Asteroids
    pub const ASTEROID_SPEED_MIN: f32 = 1.0;
    pub const ASTEROID_SPEED_MAX: f32 = 3.0;
    pub const ASTEROID_SPIN_MAX: f32 = 2.0;
    pub const ASTEROID_VERTICES_MIN: usize = 8;
    pub const ASTEROID_VERTICES_MAX: usize = 12;
    pub const ASTEROID_RESTITUTION: f32 = 0.8;

    /// Enemies
    pub const ENEMY_SIZE: f32 = 20.0;
    pub const ENEMY_SPEED: f32 = 3.0;
    pub const ENEMY_HEALTH: u32 = 2;
    pub const ENEMY_SCORE: u64 = 500;
    pub const ENEMY_SPAWN_TICKS_MIN: u32 = 300;
    pub const ENEMY_SPAWN_TICKS_MAX: u32 = 600;
    /// Delay before the next enemy once one has spawned
    pub const ENEMY_RESPAWN_TICKS_MIN: u32 = 600;
    pub const ENEMY_RESPAWN_TICKS_MAX: u32 = 1200;
    pub const ENEMY_SHOOT_TICKS_MIN: u32 = 30;
    pub const ENEMY_SHOOT_TICKS_MAX: u32 = 90;
    pub const ENEMY_TURN_TICKS_MIN: u32 = 60;
    pub const ENEMY_TURN_TICKS_MAX: u32 = 180;

    /// Boss variant
    pub const BOSS_SIZE: f32 = 40.0;
    pub const BOSS_SPEED: f32 = 2.0;
    pub const BOSS_HEALTH: u32 = 10;
    pub const BOSS_SCORE: u64 = 2000;
    pub const BOSS_SHOOT_TICKS_MIN: u32 = 15;
    pub const BOSS_SHOOT_TICKS_MAX: u32 = 45;
    /// Range band the boss tries to hold around the player
    pub const BOSS_MIN_RANGE: f32 = 200.0;
    pub const BOSS_MAX_RANGE: f32 = 300.0;

    /// Powerups
    pub const POWERUP_SIZE: f32 = 20.0;
    /// Degrees per tick around the drift circle
    pub const POWERUP_DRIFT_SPEED: f32 = 1.0;
    pub const POWERUP_DRIFT_RADIUS: f32 = 2.0;
    pub const POWERUP_LIFETIME: u32 = 600; // 10 seconds
    /// Duration of timed effects (spread shot, rapid fire, invincibility)
    pub const POWERUP_EFFECT_TICKS: u32 = 600;
    pub const POWERUP_PULSE_SPEED: f32 = 0.01;
    pub const SHIELD_PULSE_SPEED: f32 = 0.1;

    /// Explosions
    pub const EXPLOSION_LIFETIME: u32 = 60;
    pub const EXPLOSION_PARTICLE_COUNT: usize = 20;
    pub const EXPLOSION_PARTICLE_SPEED: f32 = 5.0;
    pub const EXPLOSION_PARTICLE_DRAG: f32 = 0.95;
    pub const EXPLOSION_PARTICLE_JITTER: f32 = 0.1;
}
