//! Collision detection and response
//!
//! Two proximity tests: circles (center distance against summed radii) and
//! axis-aligned squares built from each body's radius. Asteroid pairs also
//! get an equal-mass elastic impulse plus positional correction so they
//! bounce apart instead of sinking into each other.

use glam::Vec2;

use super::asteroid::Asteroid;
use super::enemy::Enemy;
use super::kinematics::wrap;
use super::pickup::Powerup;
use super::player::Player;
use super::projectile::Bullet;
use crate::consts::ASTEROID_RESTITUTION;

/// Anything with a center and a collision radius / half-extent
pub trait Body {
    fn center(&self) -> Vec2;
    fn extent(&self) -> f32;
}

impl Body for Player {
    fn center(&self) -> Vec2 {
        self.pos
    }
    fn extent(&self) -> f32 {
        self.half_extent()
    }
}

impl Body for Asteroid {
    fn center(&self) -> Vec2 {
        self.pos
    }
    fn extent(&self) -> f32 {
        self.radius()
    }
}

impl Body for Bullet {
    fn center(&self) -> Vec2 {
        self.pos
    }
    fn extent(&self) -> f32 {
        self.half_extent()
    }
}

impl Body for Enemy {
    fn center(&self) -> Vec2 {
        self.pos
    }
    fn extent(&self) -> f32 {
        self.radius()
    }
}

impl Body for Powerup {
    fn center(&self) -> Vec2 {
        self.pos
    }
    fn extent(&self) -> f32 {
        self.half_extent()
    }
}

/// Circle test: center distance strictly less than the summed radii
#[inline]
pub fn circles_overlap(a: &impl Body, b: &impl Body) -> bool {
    let reach = a.extent() + b.extent();
    a.center().distance_squared(b.center()) < reach * reach
}

/// Box test on square extents; touching edges do not count
#[inline]
pub fn boxes_overlap(a: &impl Body, b: &impl Body) -> bool {
    let d = (a.center() - b.center()).abs();
    let reach = a.extent() + b.extent();
    d.x < reach && d.y < reach
}

/// Result of a contact query between two circles
#[derive(Debug, Clone)]
pub struct CollisionResult {
    /// Whether the circles overlap
    pub hit: bool,
    /// Unit normal from the first body toward the second
    pub normal: Vec2,
    /// Center distance
    pub distance: f32,
    /// Overlap depth (negative when apart)
    pub penetration: f32,
}

/// Contact between two circles; `None` when the centers coincide
pub fn circle_contact(a_pos: Vec2, a_radius: f32, b_pos: Vec2, b_radius: f32) -> Option<CollisionResult> {
    let delta = b_pos - a_pos;
    let distance = delta.length();
    if distance == 0.0 {
        return None;
    }
    let penetration = a_radius + b_radius - distance;
    Some(CollisionResult {
        hit: penetration > 0.0,
        normal: delta / distance,
        distance,
        penetration,
    })
}

/// Equal-mass impulse scalar along `normal`, or `None` if already separating
///
/// `j = -(1 + e) * (v_rel · n) / 2`
#[inline]
pub fn elastic_impulse(a_vel: Vec2, b_vel: Vec2, normal: Vec2, restitution: f32) -> Option<f32> {
    let rv_normal = (b_vel - a_vel).dot(normal);
    if rv_normal >= 0.0 {
        return None;
    }
    Some(-(1.0 + restitution) * rv_normal / 2.0)
}

/// Bounce two overlapping asteroids off each other.
///
/// Geometry and impulse come from the circles; the caller decides when the
/// pair is close enough (the box test) to call this. Returns the contact
/// (or `None` for coincident centers, which are skipped).
pub fn resolve_asteroid_pair(a: &mut Asteroid, b: &mut Asteroid, bounds: Vec2) -> Option<CollisionResult> {
    let contact = circle_contact(a.pos, a.radius(), b.pos, b.radius())?;
    let n = contact.normal;

    if let Some(j) = elastic_impulse(a.vel, b.vel, n, ASTEROID_RESTITUTION) {
        a.vel -= n * j;
        b.vel += n * j;
    }

    // Push apart so the pair cannot stay stuck together
    if contact.penetration > 0.0 {
        let push = n * contact.penetration * 0.5;
        a.pos = wrap(a.pos - push, bounds);
        b.pos = wrap(b.pos + push, bounds);
    }

    Some(contact)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::*;
    use crate::sim::asteroid::AsteroidSize;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    const BOUNDS: Vec2 = Vec2::new(WORLD_WIDTH, WORLD_HEIGHT);

    fn rock(size: AsteroidSize, pos: Vec2, vel: Vec2) -> Asteroid {
        let mut rng = Pcg32::seed_from_u64(1);
        let mut a = Asteroid::new(size, Some(pos), 1.0, BOUNDS, &mut rng);
        a.vel = vel;
        a
    }

    #[test]
    fn test_box_and_circle_tests_differ_on_diagonals() {
        let a = rock(AsteroidSize::Medium, Vec2::new(100.0, 100.0), Vec2::ZERO);
        // Diagonal offset: inside the boxes, outside the circles
        let b = rock(AsteroidSize::Medium, Vec2::new(135.0, 135.0), Vec2::ZERO);
        assert!(boxes_overlap(&a, &b));
        assert!(!circles_overlap(&a, &b));

        let c = rock(AsteroidSize::Medium, Vec2::new(139.0, 100.0), Vec2::ZERO);
        assert!(boxes_overlap(&a, &c));
        assert!(circles_overlap(&a, &c));

        // Exactly touching is not an overlap
        let d = rock(AsteroidSize::Medium, Vec2::new(140.0, 100.0), Vec2::ZERO);
        assert!(!boxes_overlap(&a, &d));
        assert!(!circles_overlap(&a, &d));
    }

    #[test]
    fn test_elastic_impulse_skips_separating_pairs() {
        let n = Vec2::X;
        assert!(elastic_impulse(Vec2::new(-1.0, 0.0), Vec2::new(1.0, 0.0), n, 0.8).is_none());
        assert!(elastic_impulse(Vec2::ZERO, Vec2::new(0.0, 3.0), n, 0.8).is_none());

        let j = elastic_impulse(Vec2::new(2.0, 0.0), Vec2::new(-2.0, 0.0), n, 0.8).unwrap();
        assert!((j - 3.6).abs() < 1e-5);
    }

    #[test]
    fn test_closing_asteroids_bounce_and_separate() {
        let mut a = rock(AsteroidSize::Large, Vec2::new(300.0, 300.0), Vec2::new(2.0, 0.5));
        let mut b = rock(AsteroidSize::Medium, Vec2::new(350.0, 300.0), Vec2::new(-1.0, 0.0));
        assert!(boxes_overlap(&a, &b));

        let (va, vb) = (a.vel, b.vel);
        let contact = resolve_asteroid_pair(&mut a, &mut b, BOUNDS).unwrap();
        let n = contact.normal;
        assert!((n - Vec2::X).length() < 1e-6);

        // j = -(1 + e) * rv·n / 2 with rv·n = -3
        let j = -(1.0 + ASTEROID_RESTITUTION) * (vb - va).dot(n) / 2.0;
        assert!((a.vel - (va - n * j)).length() < 1e-5);
        assert!((b.vel - (vb + n * j)).length() < 1e-5);
        // Tangential components untouched
        assert_eq!(a.vel.y, 0.5);

        let gap = a.pos.distance(b.pos);
        assert!(gap >= a.radius() + b.radius() - 1e-3, "gap {gap}");
    }

    #[test]
    fn test_separating_overlap_is_corrected_without_impulse() {
        let mut a = rock(AsteroidSize::Small, Vec2::new(100.0, 100.0), Vec2::new(-1.0, 0.0));
        let mut b = rock(AsteroidSize::Small, Vec2::new(110.0, 100.0), Vec2::new(1.0, 0.0));
        resolve_asteroid_pair(&mut a, &mut b, BOUNDS).unwrap();
        assert_eq!(a.vel, Vec2::new(-1.0, 0.0));
        assert_eq!(b.vel, Vec2::new(1.0, 0.0));
        assert!(a.pos.distance(b.pos) >= 20.0 - 1e-3);
    }

    #[test]
    fn test_coincident_asteroids_are_skipped() {
        let mut a = rock(AsteroidSize::Small, Vec2::new(50.0, 50.0), Vec2::X);
        let mut b = rock(AsteroidSize::Small, Vec2::new(50.0, 50.0), -Vec2::X);
        assert!(resolve_asteroid_pair(&mut a, &mut b, BOUNDS).is_none());
        assert_eq!(a.vel, Vec2::X);
        assert_eq!(b.pos, Vec2::new(50.0, 50.0));
    }
}
