//! Vector kinematics on a toroidal plane
//!
//! Headings are in degrees with 0° pointing screen-up and positive angles
//! turning clockwise. Screen y grows downward, so "up" is `-y`.

use glam::Vec2;

/// Wrap a position component-wise into `[0, bounds.x) × [0, bounds.y)`
#[inline]
pub fn wrap(pos: Vec2, bounds: Vec2) -> Vec2 {
    Vec2::new(wrap_axis(pos.x, bounds.x), wrap_axis(pos.y, bounds.y))
}

#[inline]
fn wrap_axis(v: f32, extent: f32) -> f32 {
    let w = v.rem_euclid(extent);
    // rem_euclid can round up to `extent` for tiny negative inputs
    if w >= extent { 0.0 } else { w }
}

/// Advance one tick: `wrap(pos + vel)`
#[inline]
pub fn advance(pos: Vec2, vel: Vec2, bounds: Vec2) -> Vec2 {
    wrap(pos + vel, bounds)
}

/// Normalize an angle in degrees to `[0, 360)`
#[inline]
pub fn normalize_degrees(deg: f32) -> f32 {
    let d = deg.rem_euclid(360.0);
    if d >= 360.0 { 0.0 } else { d }
}

/// Unit direction for a heading in degrees (0° = up, clockwise)
#[inline]
pub fn heading_to_direction(deg: f32) -> Vec2 {
    let rad = deg.to_radians();
    Vec2::new(rad.sin(), -rad.cos())
}

/// Heading in degrees that points from `from` toward `to`
pub fn heading_towards(from: Vec2, to: Vec2) -> f32 {
    let d = to - from;
    normalize_degrees(d.x.atan2(-d.y).to_degrees())
}

/// Signed shortest rotation from `current` to `target`, in `(-180, 180]`
pub fn heading_delta(current: f32, target: f32) -> f32 {
    let mut delta = normalize_degrees(target - current);
    if delta > 180.0 {
        delta -= 360.0;
    }
    delta
}

/// Unit vector for a standard math angle in radians (`atan2` convention)
#[inline]
pub fn angle_to_direction(rad: f32) -> Vec2 {
    Vec2::new(rad.cos(), rad.sin())
}

/// Scale `vel` down uniformly so its length does not exceed `max`
#[inline]
pub fn clamp_speed(vel: Vec2, max: f32) -> Vec2 {
    let speed = vel.length();
    if speed > max { vel * (max / speed) } else { vel }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const BOUNDS: Vec2 = Vec2::new(800.0, 600.0);

    #[test]
    fn test_wrap_crosses_edges() {
        let p = advance(Vec2::new(799.0, 10.0), Vec2::new(3.0, 0.0), BOUNDS);
        assert!((p.x - 2.0).abs() < 1e-4);
        assert_eq!(p.y, 10.0);

        let p = advance(Vec2::new(5.0, 1.0), Vec2::new(0.0, -3.0), BOUNDS);
        assert_eq!(p.x, 5.0);
        assert!((p.y - 598.0).abs() < 1e-4);
    }

    #[test]
    fn test_wrap_exact_edge_is_zero() {
        let p = wrap(Vec2::new(800.0, 600.0), BOUNDS);
        assert_eq!(p, Vec2::ZERO);
    }

    #[test]
    fn test_heading_convention() {
        let up = heading_to_direction(0.0);
        assert!(up.x.abs() < 1e-6 && (up.y + 1.0).abs() < 1e-6);

        // Clockwise: 90° points right on screen
        let right = heading_to_direction(90.0);
        assert!((right.x - 1.0).abs() < 1e-6 && right.y.abs() < 1e-6);

        let down = heading_to_direction(180.0);
        assert!((down.y - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_heading_towards_inverts_direction() {
        let from = Vec2::new(100.0, 100.0);
        for deg in [0.0, 45.0, 90.0, 135.0, 200.0, 315.0] {
            let to = from + heading_to_direction(deg) * 50.0;
            let back = heading_towards(from, to);
            assert!(heading_delta(back, deg).abs() < 1e-3, "{deg} -> {back}");
        }
    }

    #[test]
    fn test_heading_delta_takes_short_way() {
        assert_eq!(heading_delta(350.0, 10.0), 20.0);
        assert_eq!(heading_delta(10.0, 350.0), -20.0);
        assert_eq!(heading_delta(0.0, 180.0), 180.0);
    }

    #[test]
    fn test_clamp_speed() {
        let v = clamp_speed(Vec2::new(30.0, 40.0), 10.0);
        assert!((v.length() - 10.0).abs() < 1e-4);
        assert!((v.x / v.y - 0.75).abs() < 1e-4);

        let slow = Vec2::new(1.0, 2.0);
        assert_eq!(clamp_speed(slow, 10.0), slow);
    }

    proptest! {
        #[test]
        fn prop_wrap_stays_in_bounds(
            x in -1.0e5f32..1.0e5,
            y in -1.0e5f32..1.0e5,
            vx in -50.0f32..50.0,
            vy in -50.0f32..50.0,
        ) {
            let p = advance(Vec2::new(x, y), Vec2::new(vx, vy), BOUNDS);
            prop_assert!(p.x >= 0.0 && p.x < BOUNDS.x);
            prop_assert!(p.y >= 0.0 && p.y < BOUNDS.y);
        }

        #[test]
        fn prop_normalize_degrees_range(deg in -1.0e4f32..1.0e4) {
            let d = normalize_degrees(deg);
            prop_assert!((0.0..360.0).contains(&d));
        }
    }
}
