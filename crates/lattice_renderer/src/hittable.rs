//! Hittable trait and HitRecord for ray-object intersection.

use crate::Material;
use lattice_math::{Interval, Point3, Ray, Vec3};

/// Record of a ray-object intersection.
///
/// Built fresh for every query and borrowed from the object that was hit.
#[derive(Clone, Copy)]
pub struct HitRecord<'a> {
    /// Point of intersection
    pub p: Point3,
    /// Unit surface normal at intersection (always points against ray)
    pub normal: Vec3,
    /// Parameter t where the intersection occurs
    pub t: f64,
    /// Whether the ray hit the front face (outside) of the surface
    pub front_face: bool,
    /// Material at the intersection point
    pub material: &'a dyn Material,
}

impl<'a> HitRecord<'a> {
    /// Build a record at parameter `t`, orienting `outward_normal` against the ray.
    pub fn new(ray: &Ray, t: f64, outward_normal: Vec3, material: &'a dyn Material) -> Self {
        let mut rec = Self {
            p: ray.at(t),
            normal: outward_normal,
            t,
            front_face: true,
            material,
        };
        rec.set_face_normal(ray, outward_normal);
        rec
    }

    /// Set the face normal based on ray direction and outward normal.
    ///
    /// The normal is always stored pointing against the ray direction,
    /// so we need to track whether we hit the front or back face.
    pub fn set_face_normal(&mut self, ray: &Ray, outward_normal: Vec3) {
        // If the ray and normal point in the same direction, we're inside
        self.front_face = ray.direction().dot(outward_normal) < 0.0;

        // Normal always points against the ray
        self.normal = if self.front_face {
            outward_normal
        } else {
            -outward_normal
        };
    }
}

/// Trait for objects that can be hit by rays.
///
/// Composites (meshes, scenes) implement it too, so whole groups of
/// primitives can be traced, shadow-tested or nested like a single object.
pub trait Hittable: Send + Sync {
    /// Closest intersection with `ray` whose parameter lies in `ray_t` (inclusive).
    fn hit<'a>(&'a self, ray: &Ray, ray_t: Interval) -> Option<HitRecord<'a>>;

    /// Outward unit normal at a point on the surface.
    ///
    /// Composites have no single surface to answer for and return `None`.
    fn normal_at(&self, _point: Point3) -> Option<Vec3> {
        None
    }
}

/// Closest hit among `objects`.
///
/// Each accepted hit becomes the new upper bound for the remaining objects,
/// so only the nearest surface along the ray survives.
pub(crate) fn closest_hit<'a, T, I>(objects: I, ray: &Ray, ray_t: Interval) -> Option<HitRecord<'a>>
where
    T: Hittable + ?Sized + 'a,
    I: IntoIterator<Item = &'a T>,
{
    let mut closest_so_far = ray_t.max;
    let mut closest = None;

    for object in objects {
        if let Some(rec) = object.hit(ray, ray_t.with_max(closest_so_far)) {
            closest_so_far = rec.t;
            closest = Some(rec);
        }
    }

    closest
}
