//! Triangle primitive for ray tracing.
//!
//! Intersects the supporting plane first, then keeps the hit only if it lies
//! on the inner side of all three edges.

use crate::{
    hittable::{HitRecord, Hittable},
    Material,
};
use lattice_math::{Interval, Point3, Ray, Vec3};
use std::sync::Arc;

/// Relative tolerance for rejecting rays parallel to the triangle's plane.
///
/// Compared against `|N·D| / (|N| |D|)`, i.e. the cosine between the ray
/// and the plane normal. Rays grazing closer than this count as misses.
pub const PARALLEL_EPSILON: f64 = 1.0e-12;

/// A triangle primitive.
pub struct Triangle {
    /// Vertices
    v0: Point3,
    v1: Point3,
    v2: Point3,
    /// Pre-computed face normal (unit length, zero for degenerate triangles)
    normal: Vec3,
    /// Material
    material: Arc<dyn Material>,
}

impl Triangle {
    /// Create a new triangle from three vertices.
    ///
    /// The outward side follows the right-hand rule on `v0, v1, v2`.
    pub fn new(v0: Point3, v1: Point3, v2: Point3, material: Arc<dyn Material>) -> Self {
        let normal = (v1 - v0).cross(v2 - v0).normalize_or_zero();

        Self {
            v0,
            v1,
            v2,
            normal,
            material,
        }
    }

    /// The three corners in construction order.
    pub fn vertices(&self) -> [Point3; 3] {
        [self.v0, self.v1, self.v2]
    }

    /// Outward unit normal (zero for a degenerate triangle).
    pub fn normal(&self) -> Vec3 {
        self.normal
    }

    pub fn material(&self) -> &Arc<dyn Material> {
        &self.material
    }

    /// Move all three vertices by `offset`. The normal is unchanged.
    pub fn translate(&mut self, offset: Vec3) {
        self.v0 += offset;
        self.v1 += offset;
        self.v2 += offset;
    }
}

impl Clone for Triangle {
    fn clone(&self) -> Self {
        Self {
            v0: self.v0,
            v1: self.v1,
            v2: self.v2,
            normal: self.normal,
            material: Arc::clone(&self.material),
        }
    }
}

impl Hittable for Triangle {
    fn hit<'a>(&'a self, ray: &Ray, ray_t: Interval) -> Option<HitRecord<'a>> {
        let n = (self.v1 - self.v0).cross(self.v2 - self.v0);
        let n_dot_dir = n.dot(ray.direction());

        // Ray is parallel to the plane (or the triangle has no area)
        if n_dot_dir.abs() <= PARALLEL_EPSILON * n.length() * ray.direction().length() {
            return None;
        }

        // Plane: N·P + D = 0 with D = -N·v0
        let d = -n.dot(self.v0);
        let t = -(n.dot(ray.origin()) + d) / n_dot_dir;
        if !ray_t.contains(t) {
            return None;
        }

        let p = ray.at(t);

        // Inside-outside test against each edge
        let edges = [(self.v0, self.v1), (self.v1, self.v2), (self.v2, self.v0)];
        for (from, to) in edges {
            let c = (to - from).cross(p - from);
            if n.dot(c) < 0.0 {
                return None;
            }
        }

        Some(HitRecord::new(ray, t, self.normal, self.material.as_ref()))
    }

    fn normal_at(&self, _point: Point3) -> Option<Vec3> {
        Some(self.normal)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::material::Uniform;
    use crate::Color;

    fn grey() -> Arc<dyn Material> {
        Arc::new(Uniform::new(Color::splat(0.5), 0.5, 0.5))
    }

    fn xy_triangle() -> Triangle {
        // Triangle in XY plane at z=-1
        Triangle::new(
            Vec3::new(-1.0, -1.0, -1.0),
            Vec3::new(1.0, -1.0, -1.0),
            Vec3::new(0.0, 1.0, -1.0),
            grey(),
        )
    }

    #[test]
    fn test_triangle_hit() {
        let tri = xy_triangle();

        // Ray pointing at triangle center
        let ray = Ray::new(Vec3::ZERO, Vec3::new(0.0, 0.0, -1.0));
        let rec = tri.hit(&ray, Interval::new(0.001, f64::INFINITY)).unwrap();

        assert!((rec.t - 1.0).abs() < 1e-12);
        assert!(rec.front_face);
        assert!((rec.normal - Vec3::Z).length() < 1e-12);
    }

    #[test]
    fn test_triangle_back_face_normal_flips() {
        let tri = xy_triangle();

        // Coming from behind
        let ray = Ray::new(Vec3::new(0.0, 0.0, -2.0), Vec3::Z);
        let rec = tri.hit(&ray, Interval::new(0.001, f64::INFINITY)).unwrap();

        assert!(!rec.front_face);
        assert!((rec.normal + Vec3::Z).length() < 1e-12);
    }

    #[test]
    fn test_triangle_miss() {
        let tri = xy_triangle();

        // Ray pointing away
        let ray = Ray::new(Vec3::ZERO, Vec3::new(0.0, 0.0, 1.0));
        assert!(tri.hit(&ray, Interval::new(0.001, f64::INFINITY)).is_none());

        // Ray passing outside an edge
        let ray = Ray::new(Vec3::new(0.9, 0.9, 0.0), Vec3::NEG_Z);
        assert!(tri.hit(&ray, Interval::new(0.001, f64::INFINITY)).is_none());
    }

    #[test]
    fn test_triangle_parallel_ray_misses() {
        let tri = xy_triangle();
        let ray = Ray::new(Vec3::new(-5.0, 0.0, -1.0), Vec3::X);
        assert!(tri.hit(&ray, Interval::new(0.001, f64::INFINITY)).is_none());
    }

    #[test]
    fn test_triangle_respects_interval() {
        let tri = xy_triangle();
        let ray = Ray::new(Vec3::ZERO, Vec3::NEG_Z);
        assert!(tri.hit(&ray, Interval::new(0.001, 0.5)).is_none());
        assert!(tri.hit(&ray, Interval::new(1.0, 1.0)).is_some());
    }

    #[test]
    fn test_degenerate_triangle_never_hits() {
        let p = Vec3::new(0.0, 0.0, -1.0);
        let tri = Triangle::new(p, p, p, grey());
        let ray = Ray::new(Vec3::ZERO, Vec3::NEG_Z);

        assert_eq!(tri.normal(), Vec3::ZERO);
        assert!(tri.hit(&ray, Interval::new(0.001, f64::INFINITY)).is_none());
    }

    #[test]
    fn test_translate_keeps_normal() {
        let mut tri = xy_triangle();
        let before = tri.normal();
        tri.translate(Vec3::new(0.5, 2.0, -4.0));

        assert_eq!(tri.normal(), before);
        assert_eq!(tri.vertices()[0], Vec3::new(-0.5, 1.0, -5.0));
    }
}
