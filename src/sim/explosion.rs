//! Cosmetic particle bursts (no collision footprint)

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::kinematics::{advance, angle_to_direction};
use crate::consts::*;

/// Number of explosion colors; `Particle::color` indexes into them
pub const EXPLOSION_PALETTE_SIZE: u8 = 4;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    pub color: u8,
    pub size: f32,
    /// Opacity in [0, 1]
    pub alpha: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Explosion {
    pub pos: Vec2,
    pub particles: Vec<Particle>,
    pub ttl_ticks: u32,
}

impl Explosion {
    pub fn new<R: Rng>(pos: Vec2, rng: &mut R) -> Self {
        let particles = (0..EXPLOSION_PARTICLE_COUNT)
            .map(|_| {
                let angle = rng.random_range(0.0..std::f32::consts::TAU);
                let speed = rng.random_range(1.0..=EXPLOSION_PARTICLE_SPEED);
                Particle {
                    pos,
                    vel: angle_to_direction(angle) * speed,
                    color: rng.random_range(0..EXPLOSION_PALETTE_SIZE),
                    size: rng.random_range(2.0..=4.0),
                    alpha: 1.0,
                }
            })
            .collect();

        Self {
            pos,
            particles,
            ttl_ticks: EXPLOSION_LIFETIME,
        }
    }

    pub fn tick<R: Rng>(&mut self, bounds: Vec2, rng: &mut R) {
        self.ttl_ticks = self.ttl_ticks.saturating_sub(1);
        if self.finished() {
            return;
        }

        let fade = self.ttl_ticks as f32 / EXPLOSION_LIFETIME as f32;
        for p in &mut self.particles {
            p.pos = advance(p.pos, p.vel, bounds);
            p.vel *= EXPLOSION_PARTICLE_DRAG;
            p.vel += Vec2::new(
                rng.random_range(-EXPLOSION_PARTICLE_JITTER..=EXPLOSION_PARTICLE_JITTER),
                rng.random_range(-EXPLOSION_PARTICLE_JITTER..=EXPLOSION_PARTICLE_JITTER),
            );
            p.alpha = fade;
        }
    }

    pub fn finished(&self) -> bool {
        self.ttl_ticks == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_explosion_fades_then_finishes() {
        let bounds = Vec2::new(WORLD_WIDTH, WORLD_HEIGHT);
        let mut rng = Pcg32::seed_from_u64(9);
        let mut e = Explosion::new(Vec2::new(10.0, 10.0), &mut rng);
        assert_eq!(e.particles.len(), EXPLOSION_PARTICLE_COUNT);

        let mut last_alpha = 1.0;
        for _ in 0..EXPLOSION_LIFETIME - 1 {
            e.tick(bounds, &mut rng);
            let alpha = e.particles[0].alpha;
            assert!(alpha < last_alpha);
            last_alpha = alpha;
            for p in &e.particles {
                assert!(p.pos.x >= 0.0 && p.pos.x < bounds.x);
                assert!(p.pos.y >= 0.0 && p.pos.y < bounds.y);
            }
        }
        assert!(!e.finished());
        e.tick(bounds, &mut rng);
        assert!(e.finished());
    }
}
