//! Lattice math - vector, ray and interval types shared by the renderer
//! and the isosurface extractor.
//!
//! All geometry is double precision. `Vec3` doubles as a point and as an
//! RGB color; the `Point3` and `Color` aliases only document intent.

// Re-export glam for convenience
pub use glam::DVec3;

mod interval;
mod ray;
pub mod sampling;

pub use interval::Interval;
pub use ray::Ray;
pub use sampling::{random_f64, random_range, random_unit_vector};

/// Double precision 3-vector.
pub type Vec3 = DVec3;

/// A position in world space.
pub type Point3 = Vec3;

/// Linear RGB color (components nominally in 0-1).
pub type Color = Vec3;

/// Threshold below which every component counts as zero.
pub const NEAR_ZERO: f64 = 1.0e-8;

/// Returns true if every component of `v` is within [`NEAR_ZERO`] of zero.
#[inline]
pub fn near_zero(v: Vec3) -> bool {
    v.x.abs() < NEAR_ZERO && v.y.abs() < NEAR_ZERO && v.z.abs() < NEAR_ZERO
}

/// Reflect `v` about the unit normal `n`.
#[inline]
pub fn reflect(v: Vec3, n: Vec3) -> Vec3 {
    v - 2.0 * v.dot(n) * n
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vec3_operations() {
        let a = Vec3::new(1.0, 2.0, 3.0);
        let b = Vec3::new(4.0, 5.0, 6.0);
        assert_eq!(a + b, Vec3::new(5.0, 7.0, 9.0));
        assert_eq!(a.dot(b), 32.0);
        assert_eq!(a.cross(b), Vec3::new(-3.0, 6.0, -3.0));
    }

    #[test]
    fn test_reflect() {
        // Straight down onto a floor bounces straight up
        let r = reflect(Vec3::new(0.0, -1.0, 0.0), Vec3::Y);
        assert_eq!(r, Vec3::Y);

        // 45 degree incidence keeps the tangential component
        let r = reflect(Vec3::new(1.0, -1.0, 0.0), Vec3::Y);
        assert_eq!(r, Vec3::new(1.0, 1.0, 0.0));
    }

    #[test]
    fn test_near_zero() {
        assert!(near_zero(Vec3::ZERO));
        assert!(near_zero(Vec3::splat(1.0e-9)));
        assert!(!near_zero(Vec3::new(0.0, 1.0e-7, 0.0)));
    }
}
