//! Circular orbit of a satellite around its parent body.

use bevy::math::Vec3;

/// Parameters of a circular orbit in the parent's XZ plane.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CircularOrbit {
    /// Orbit radius in scene units.
    pub radius: f32,
    /// Angular velocity in rad/s.
    pub angular_velocity: f32,
}

impl CircularOrbit {
    pub const fn new(radius: f32, angular_velocity: f32) -> Self {
        Self {
            radius,
            angular_velocity,
        }
    }

    /// Offset from the parent after `elapsed_secs`: `(sin(ωt)·r, 0, cos(ωt)·r)`.
    pub fn position(&self, elapsed_secs: f32) -> Vec3 {
        let angle = elapsed_secs * self.angular_velocity;
        Vec3::new(angle.sin() * self.radius, 0.0, angle.cos() * self.radius)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::PI;

    #[test]
    fn test_position_at_zero_is_on_z_axis() {
        let orbit = CircularOrbit::new(8.0, 0.5);
        let p = orbit.position(0.0);
        assert!(p.x.abs() < 1e-6);
        assert!((p.z - 8.0).abs() < 1e-6);
        assert_eq!(p.y, 0.0);
    }

    #[test]
    fn test_radius_is_constant() {
        let orbit = CircularOrbit::new(8.0, 0.3);
        for i in 0..50 {
            let p = orbit.position(i as f32 * 0.77);
            assert!((p.length() - 8.0).abs() < 1e-4, "radius drifted at step {}", i);
        }
    }

    #[test]
    fn test_quarter_turn() {
        let orbit = CircularOrbit::new(2.0, 1.0);
        let p = orbit.position(PI / 2.0);
        assert!((p.x - 2.0).abs() < 1e-5);
        assert!(p.z.abs() < 1e-5);
    }
}
