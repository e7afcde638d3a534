//! Scene: everything the integrator needs to trace a frame.

use crate::hittable::{closest_hit, HitRecord, Hittable};
use crate::{Camera, Light};
use lattice_math::{Interval, Ray};

/// Objects, lights and the camera that views them.
///
/// A scene is itself [`Hittable`] with closest-hit semantics, so primary and
/// shadow rays go through the same query, and scenes can be nested.
pub struct Scene {
    objects: Vec<Box<dyn Hittable>>,
    lights: Vec<Box<dyn Light>>,
    camera: Camera,
}

impl Scene {
    /// Create an empty scene viewed through `camera`.
    pub fn new(camera: Camera) -> Self {
        Self {
            objects: Vec::new(),
            lights: Vec::new(),
            camera,
        }
    }

    /// Add an object to the scene.
    pub fn add_object(&mut self, object: Box<dyn Hittable>) {
        self.objects.push(object);
    }

    /// Add a light to the scene.
    pub fn add_light(&mut self, light: Box<dyn Light>) {
        self.lights.push(light);
    }

    /// Remove all objects.
    pub fn clear_objects(&mut self) {
        self.objects.clear();
    }

    /// Remove all lights.
    pub fn clear_lights(&mut self) {
        self.lights.clear();
    }

    pub fn objects(&self) -> &[Box<dyn Hittable>] {
        &self.objects
    }

    pub fn lights(&self) -> &[Box<dyn Light>] {
        &self.lights
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    /// True if anything blocks `ray` within `ray_t`.
    pub fn is_occluded(&self, ray: &Ray, ray_t: Interval) -> bool {
        self.objects
            .iter()
            .any(|object| object.hit(ray, ray_t).is_some())
    }
}

impl Default for Scene {
    fn default() -> Self {
        Self::new(Camera::default())
    }
}

impl Hittable for Scene {
    fn hit<'a>(&'a self, ray: &Ray, ray_t: Interval) -> Option<HitRecord<'a>> {
        closest_hit(self.objects.iter().map(|object| object.as_ref()), ray, ray_t)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::material::Uniform;
    use crate::{Color, DirectionalLight, Material, Sphere, Vec3};
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};
    use std::sync::Arc;

    fn grey() -> Arc<dyn Material> {
        Arc::new(Uniform::new(Color::splat(0.5), 0.5, 0.5))
    }

    /// Three spheres strung along -Z, added out of depth order.
    fn row_of_spheres() -> Scene {
        let mut scene = Scene::default();
        for z in [-6.0, -2.0, -4.0] {
            scene.add_object(Box::new(Sphere::new(Vec3::new(0.0, 0.0, z), 0.5, grey())));
        }
        scene
    }

    #[test]
    fn test_scene_reports_nearest_object() {
        let scene = row_of_spheres();
        let ray = Ray::new(Vec3::ZERO, Vec3::NEG_Z);

        let rec = scene.hit(&ray, Interval::new(0.001, f64::INFINITY)).unwrap();
        assert!((rec.t - 1.5).abs() < 1e-12);
    }

    #[test]
    fn test_scene_matches_minimum_child_hit() {
        let scene = row_of_spheres();
        let mut rng = StdRng::seed_from_u64(99);

        for _ in 0..200 {
            let dir = Vec3::new(rng.gen_range(-0.1..0.1), rng.gen_range(-0.1..0.1), -1.0);
            let ray = Ray::new(Vec3::ZERO, dir);
            let ray_t = Interval::new(0.001, f64::INFINITY);

            let expected = scene
                .objects()
                .iter()
                .filter_map(|o| o.hit(&ray, ray_t).map(|rec| rec.t))
                .fold(None, |best: Option<f64>, t| Some(best.map_or(t, |b| b.min(t))));
            let actual = scene.hit(&ray, ray_t).map(|rec| rec.t);
            assert_eq!(actual, expected);
        }
    }

    #[test]
    fn test_tightening_t_max_never_increases_t() {
        let scene = row_of_spheres();
        let ray = Ray::new(Vec3::ZERO, Vec3::NEG_Z);

        let mut last = f64::INFINITY;
        for t_max in [100.0, 6.0, 4.0, 3.0, 1.6, 1.0] {
            if let Some(rec) = scene.hit(&ray, Interval::new(0.001, t_max)) {
                assert!(rec.t <= last);
                assert!(rec.t <= t_max);
                last = rec.t;
            }
        }
        assert!(scene.hit(&ray, Interval::new(0.001, 1.0)).is_none());
    }

    #[test]
    fn test_scene_nests_inside_scene() {
        let mut outer = Scene::default();
        outer.add_object(Box::new(row_of_spheres()));

        let ray = Ray::new(Vec3::ZERO, Vec3::NEG_Z);
        let rec = outer.hit(&ray, Interval::new(0.001, f64::INFINITY)).unwrap();
        assert!((rec.t - 1.5).abs() < 1e-12);
        assert!(outer.normal_at(rec.p).is_none());
    }

    #[test]
    fn test_occlusion_respects_distance() {
        let scene = row_of_spheres();
        let ray = Ray::new(Vec3::ZERO, Vec3::NEG_Z);

        assert!(scene.is_occluded(&ray, Interval::new(0.001, 10.0)));
        // Light sits in front of the first sphere
        assert!(!scene.is_occluded(&ray, Interval::new(0.001, 1.0)));
    }

    #[test]
    fn test_add_and_clear() {
        let mut scene = row_of_spheres();
        scene.add_light(Box::new(DirectionalLight::new(Vec3::Y, Color::ONE, 1.0)));
        assert_eq!(scene.objects().len(), 3);
        assert_eq!(scene.lights().len(), 1);

        scene.clear_objects();
        scene.clear_lights();
        assert!(scene.objects().is_empty());
        assert!(scene.lights().is_empty());

        let ray = Ray::new(Vec3::ZERO, Vec3::NEG_Z);
        assert!(scene.hit(&ray, Interval::new(0.001, f64::INFINITY)).is_none());
    }
}
