//! Vector, color and interval math shared by the GHD crates.
//!
//! Everything runs in double precision: the accumulation buffer sums
//! radiance across an unbounded number of iterations, and keeping the
//! whole transport path in `f64` avoids mixing precisions on the way in.

// Re-export glam for convenience
pub use glam::*;

mod interval;
mod vector;

pub use interval::Interval;
pub use vector::{near_zero, reflect, refract, try_unit_vector, NEAR_ZERO_EPSILON};

/// The 3-component vector used for points, directions and colors.
pub type Vec3 = glam::DVec3;

/// RGB color with linear radiance components.
pub type Color = Vec3;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vec3_creation() {
        let v = Vec3::new(1.0, 2.0, 3.0);
        assert_eq!(v.x, 1.0);
        assert_eq!(v.y, 2.0);
        assert_eq!(v.z, 3.0);
    }

    #[test]
    fn test_vec3_operations() {
        let a = Vec3::new(1.0, 2.0, 3.0);
        let b = Vec3::new(4.0, 5.0, 6.0);
        assert_eq!(a + b, Vec3::new(5.0, 7.0, 9.0));
        assert_eq!(2.0 * a, Vec3::new(2.0, 4.0, 6.0));
        assert_eq!(a * b, Vec3::new(4.0, 10.0, 18.0));
        assert_eq!(a.dot(b), 32.0);
        assert_eq!(Vec3::X.cross(Vec3::Y), Vec3::Z);
    }
}
