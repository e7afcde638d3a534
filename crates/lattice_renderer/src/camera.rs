//! Pinhole camera for ray generation.

use lattice_math::{Point3, Ray, Vec3};

/// Pinhole camera with an image plane at distance 1 from the eye.
///
/// Immutable once built; `get_ray` depends only on its arguments.
#[derive(Debug, Clone)]
pub struct Camera {
    origin: Point3,
    lower_left_corner: Point3,
    horizontal: Vec3,
    vertical: Vec3,
    // Orthonormal basis: u right, v up, w backwards (camera looks along -w)
    u: Vec3,
    v: Vec3,
    w: Vec3,
}

impl Camera {
    /// Create a camera.
    ///
    /// - `look_from`: eye position
    /// - `look_at`: point the camera faces
    /// - `vup`: world up, used to roll the frame
    /// - `vfov`: vertical field of view in degrees
    /// - `aspect_ratio`: viewport width / height
    pub fn new(look_from: Point3, look_at: Point3, vup: Vec3, vfov: f64, aspect_ratio: f64) -> Self {
        const FOCAL_LENGTH: f64 = 1.0;

        // Calculate viewport dimensions
        let theta = vfov.to_radians();
        let h = (theta / 2.0).tan();
        let viewport_height = 2.0 * h * FOCAL_LENGTH;
        let viewport_width = aspect_ratio * viewport_height;

        // Calculate camera basis vectors
        let w = (look_from - look_at).try_normalize().unwrap_or_else(|| {
            log::warn!("Camera look_from equals look_at, looking down -Z");
            Vec3::Z
        });
        let u = vup.cross(w).try_normalize().unwrap_or_else(|| {
            log::warn!("Camera vup {vup} is parallel to the view direction, picking another up axis");
            fallback_up(w).cross(w).normalize()
        });
        let v = w.cross(u);

        let horizontal = viewport_width * u;
        let vertical = viewport_height * v;
        let lower_left_corner = look_from - horizontal / 2.0 - vertical / 2.0 - FOCAL_LENGTH * w;

        Self {
            origin: look_from,
            lower_left_corner,
            horizontal,
            vertical,
            u,
            v,
            w,
        }
    }

    /// Ray from the eye through image-plane point (s, t).
    ///
    /// (0, 0) is the lower-left corner of the viewport and (1, 1) the
    /// upper-right.
    pub fn get_ray(&self, s: f64, t: f64) -> Ray {
        let target = self.lower_left_corner + s * self.horizontal + t * self.vertical;
        Ray::new(self.origin, target - self.origin)
    }

    /// Eye position.
    pub fn origin(&self) -> Point3 {
        self.origin
    }

    /// Camera frame as (right, up, backwards).
    pub fn basis(&self) -> (Vec3, Vec3, Vec3) {
        (self.u, self.v, self.w)
    }
}

/// World axis least aligned with `w`, so its cross product with `w` is never zero.
fn fallback_up(w: Vec3) -> Vec3 {
    let a = w.abs();
    if a.x <= a.y && a.x <= a.z {
        Vec3::X
    } else if a.y <= a.z {
        Vec3::Y
    } else {
        Vec3::Z
    }
}

impl Default for Camera {
    /// Looking at the origin from (-1, 1, 1), 90 degree FOV, 16:9.
    fn default() -> Self {
        Self::new(
            Vec3::new(-1.0, 1.0, 1.0),
            Vec3::ZERO,
            Vec3::Y,
            90.0,
            16.0 / 9.0,
        )
    }
}
