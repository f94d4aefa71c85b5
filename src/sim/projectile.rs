//! Bullets fired by the player and by enemies

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::kinematics::{advance, angle_to_direction, heading_to_direction};
use crate::consts::*;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bullet {
    pub id: u32,
    pub pos: Vec2,
    /// Fixed at creation, never recomputed
    pub vel: Vec2,
    pub ttl_ticks: u32,
    /// Fired by an enemy (hurts the player, ignores asteroids)
    pub hostile: bool,
}

impl Bullet {
    /// Player bullet along a ship heading in degrees
    pub fn friendly(pos: Vec2, heading: f32) -> Self {
        Self {
            id: 0,
            pos,
            vel: heading_to_direction(heading) * BULLET_SPEED,
            ttl_ticks: BULLET_LIFETIME,
            hostile: false,
        }
    }

    /// Enemy bullet along an `atan2` angle in radians
    pub fn hostile(pos: Vec2, angle: f32) -> Self {
        Self {
            id: 0,
            pos,
            vel: angle_to_direction(angle) * ENEMY_BULLET_SPEED,
            ttl_ticks: BULLET_LIFETIME,
            hostile: true,
        }
    }

    #[inline]
    pub fn half_extent(&self) -> f32 {
        BULLET_SIZE / 2.0
    }

    pub fn tick(&mut self, bounds: Vec2) {
        self.pos = advance(self.pos, self.vel, bounds);
        self.ttl_ticks = self.ttl_ticks.saturating_sub(1);
    }

    pub fn expired(&self) -> bool {
        self.ttl_ticks == 0
    }
}
