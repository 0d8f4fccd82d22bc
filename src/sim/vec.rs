//! Vector helpers on top of `glam::Vec2`
//!
//! glam already covers add/sub/scale/length and `ZERO`; this adds the
//! degree-based rotation and the "up"-relative direction vectors the game
//! uses for every spawn offset and bullet velocity.

use glam::Vec2;

/// Straight up in screen space (y grows downward)
pub const UP: Vec2 = Vec2::new(0.0, -1.0);

/// Extra vector operations used by the simulation
pub trait VecExt {
    /// Rotate by `deg` degrees (standard 2D rotation matrix)
    fn rotate_deg(self, deg: f32) -> Vec2;
    /// Perpendicular vector `(y, -x)`
    fn ortho(self) -> Vec2;
}

impl VecExt for Vec2 {
    #[inline]
    fn rotate_deg(self, deg: f32) -> Vec2 {
        let (sin, cos) = deg.to_radians().sin_cos();
        Vec2::new(self.x * cos - self.y * sin, self.x * sin + self.y * cos)
    }

    #[inline]
    fn ortho(self) -> Vec2 {
        Vec2::new(self.y, -self.x)
    }
}

/// Unit vector pointing `deg` degrees clockwise from up
#[inline]
pub fn unit_vec_in_direction(deg: f32) -> Vec2 {
    UP.rotate_deg(deg)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: Vec2, b: Vec2) -> bool {
        (a - b).length() < 1e-5
    }

    #[test]
    fn test_unit_vec_up_is_exact() {
        assert_eq!(unit_vec_in_direction(0.0), Vec2::new(0.0, -1.0));
    }

    #[test]
    fn test_rotate_quarter_turn() {
        assert!(approx(UP.rotate_deg(90.0), Vec2::new(1.0, 0.0)));
        assert!(approx(Vec2::X.rotate_deg(180.0), Vec2::new(-1.0, 0.0)));
    }

    #[test]
    fn test_rotation_preserves_length() {
        let v = Vec2::new(3.0, 4.0);
        assert!((v.rotate_deg(33.0).length() - 5.0).abs() < 1e-4);
    }

    #[test]
    fn test_ortho() {
        let v = Vec2::new(2.0, 5.0);
        assert_eq!(v.ortho(), Vec2::new(5.0, -2.0));
        assert_eq!(v.dot(v.ortho()), 0.0);
    }

    #[test]
    fn test_sub_is_add_of_negated_scale() {
        let a = Vec2::new(1.5, -2.0);
        let b = Vec2::new(0.5, 4.0);
        assert_eq!(a - b, a + b * -1.0);
    }
}
