//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Stable iteration order (by entity ID)
//! - No rendering, audio or platform dependencies

pub mod asteroid;
pub mod autopilot;
pub mod collision;
pub mod enemy;
pub mod explosion;
pub mod kinematics;
pub mod pickup;
pub mod player;
pub mod projectile;
pub mod spawn;
pub mod state;
pub mod tick;

pub use asteroid::{Asteroid, AsteroidSize, level_speed_scale};
pub use collision::{Body, CollisionResult, boxes_overlap, circle_contact, circles_overlap};
pub use enemy::Enemy;
pub use explosion::{Explosion, Particle};
pub use kinematics::{advance, heading_to_direction, wrap};
pub use pickup::{Powerup, PowerupKind, Pulse};
pub use player::{Player, Turn};
pub use projectile::Bullet;
pub use state::{GameEvent, GamePhase, GameState, Hud};
pub use tick::{TickInput, reset_game, start_next_level, tick};
