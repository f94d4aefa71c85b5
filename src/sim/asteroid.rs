//! Asteroids and their size classes

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::kinematics::{advance, angle_to_direction};
use crate::consts::*;

/// Asteroid size class
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AsteroidSize {
    Large,
    Medium,
    Small,
}

impl AsteroidSize {
    pub fn radius(&self) -> f32 {
        match self {
            AsteroidSize::Large => 40.0,
            AsteroidSize::Medium => 20.0,
            AsteroidSize::Small => 10.0,
        }
    }

    pub fn points(&self) -> u64 {
        match self {
            AsteroidSize::Large => 20,
            AsteroidSize::Medium => 50,
            AsteroidSize::Small => 100,
        }
    }

    /// Next size down, `None` for the smallest
    pub fn smaller(&self) -> Option<AsteroidSize> {
        match self {
            AsteroidSize::Large => Some(AsteroidSize::Medium),
            AsteroidSize::Medium => Some(AsteroidSize::Small),
            AsteroidSize::Small => None,
        }
    }
}

/// Speed multiplier for asteroids spawned on `level` (1-based)
pub fn level_speed_scale(level: u32, step: f32) -> f32 {
    1.0 + level.saturating_sub(1) as f32 * step
}

/// A drifting space rock
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Asteroid {
    pub id: u32,
    pub size: AsteroidSize,
    pub pos: Vec2,
    pub vel: Vec2,
    /// Speed multiplier captured at spawn and handed down to split children
    pub speed_scale: f32,
    /// Render rotation (degrees) and spin per tick
    pub rotation: f32,
    pub spin: f32,
    /// Outline vertices relative to center
    pub vertices: Vec<Vec2>,
}

impl Asteroid {
    /// Create an asteroid; `pos = None` places it uniformly at random
    pub fn new<R: Rng>(
        size: AsteroidSize,
        pos: Option<Vec2>,
        speed_scale: f32,
        bounds: Vec2,
        rng: &mut R,
    ) -> Self {
        let pos = pos.unwrap_or_else(|| {
            Vec2::new(
                rng.random_range(0.0..bounds.x),
                rng.random_range(0.0..bounds.y),
            )
        });

        let angle = rng.random_range(0.0..std::f32::consts::TAU);
        let speed = rng.random_range(ASTEROID_SPEED_MIN..=ASTEROID_SPEED_MAX) * speed_scale;
        let spin = rng.random_range(-ASTEROID_SPIN_MAX..=ASTEROID_SPIN_MAX);

        Self {
            id: 0,
            size,
            pos,
            vel: angle_to_direction(angle) * speed,
            speed_scale,
            rotation: 0.0,
            spin,
            vertices: generate_outline(size.radius(), rng),
        }
    }

    #[inline]
    pub fn radius(&self) -> f32 {
        self.size.radius()
    }

    pub fn points(&self) -> u64 {
        self.size.points()
    }

    pub fn tick(&mut self, bounds: Vec2) {
        self.pos = advance(self.pos, self.vel, bounds);
        self.rotation = (self.rotation + self.spin).rem_euclid(360.0);
    }

    /// Two children of the next size at this position (empty when smallest).
    ///
    /// Does not touch `self`; removing the parent is the caller's job.
    pub fn split<R: Rng>(&self, bounds: Vec2, rng: &mut R) -> Vec<Asteroid> {
        match self.size.smaller() {
            Some(size) => (0..2)
                .map(|_| Asteroid::new(size, Some(self.pos), self.speed_scale, bounds, rng))
                .collect(),
            None => Vec::new(),
        }
    }
}

/// Jagged polygon: evenly spaced spokes at 80-120% of the radius
fn generate_outline<R: Rng>(radius: f32, rng: &mut R) -> Vec<Vec2> {
    let count = rng.random_range(ASTEROID_VERTICES_MIN..=ASTEROID_VERTICES_MAX);
    (0..count)
        .map(|i| {
            let angle = i as f32 / count as f32 * std::f32::consts::TAU;
            angle_to_direction(angle) * radius * rng.random_range(0.8..=1.2)
        })
        .collect()
}
