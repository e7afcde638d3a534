//! Material trait for surface scattering.

use crate::hittable::HitRecord;
use lattice_math::{near_zero, random_unit_vector, reflect, Color, Ray};
use rand::RngCore;

/// Outcome of a successful scatter.
#[derive(Debug, Clone, Copy)]
pub struct ScatterResult {
    /// Surface color; the base of the direct-lighting sum at this bounce
    pub attenuation: Color,
    /// Ray continuing the path
    pub scattered: Ray,
    /// Weight of the Lambert term for each visible light
    pub diffuse: f64,
    /// Weight of the Phong highlight for each visible light
    pub specular: f64,
}

/// Trait for materials that describe how light interacts with surfaces.
pub trait Material: Send + Sync {
    /// Scatter an incoming ray.
    ///
    /// Returns `Some(result)` if the ray scatters, or `None` if the ray is
    /// absorbed.
    fn scatter(&self, ray_in: &Ray, rec: &HitRecord, rng: &mut dyn RngCore)
        -> Option<ScatterResult>;
}

/// Diffuse material with fixed Lambert and highlight weights.
#[derive(Debug, Clone)]
pub struct Uniform {
    color: Color,
    diffuse: f64,
    specular: f64,
}

impl Uniform {
    /// Create a diffuse material.
    ///
    /// - `color`: base color of the surface
    /// - `diffuse`: weight of the per-light Lambert term
    /// - `specular`: weight of the per-light highlight
    pub fn new(color: Color, diffuse: f64, specular: f64) -> Self {
        Self {
            color,
            diffuse,
            specular,
        }
    }

    pub fn color(&self) -> Color {
        self.color
    }
}

impl Material for Uniform {
    fn scatter(
        &self,
        _ray_in: &Ray,
        rec: &HitRecord,
        rng: &mut dyn RngCore,
    ) -> Option<ScatterResult> {
        let mut scatter_direction = rec.normal + random_unit_vector(rng);

        // Catch degenerate scatter direction
        if near_zero(scatter_direction) {
            scatter_direction = rec.normal;
        }

        Some(ScatterResult {
            attenuation: self.color,
            scattered: Ray::new(rec.p, scatter_direction),
            diffuse: self.diffuse,
            specular: self.specular,
        })
    }
}

/// Perfect mirror. Tints reflections with its color and takes no direct light.
#[derive(Debug, Clone)]
pub struct Mirror {
    color: Color,
}

impl Mirror {
    pub fn new(color: Color) -> Self {
        Self { color }
    }
}

impl Material for Mirror {
    fn scatter(
        &self,
        ray_in: &Ray,
        rec: &HitRecord,
        _rng: &mut dyn RngCore,
    ) -> Option<ScatterResult> {
        let reflected = reflect(ray_in.direction().normalize(), rec.normal);

        Some(ScatterResult {
            attenuation: self.color,
            scattered: Ray::new(rec.p, reflected),
            diffuse: 0.0,
            specular: 0.0,
        })
    }
}

/// Metal (fuzzed specular) material.
#[derive(Debug, Clone)]
pub struct Metal {
    color: Color,
    fuzz: f64,
}

impl Metal {
    /// Create a new Metal material.
    ///
    /// - `color`: The color of the metal
    /// - `fuzz`: Roughness, 0.0 = perfect mirror, 1.0 = very rough
    pub fn new(color: Color, fuzz: f64) -> Self {
        Self {
            color,
            fuzz: fuzz.clamp(0.0, 1.0),
        }
    }

    pub fn fuzz(&self) -> f64 {
        self.fuzz
    }
}

impl Material for Metal {
    fn scatter(
        &self,
        ray_in: &Ray,
        rec: &HitRecord,
        rng: &mut dyn RngCore,
    ) -> Option<ScatterResult> {
        let reflected = reflect(ray_in.direction().normalize(), rec.normal);
        let scattered_dir = reflected + self.fuzz * random_unit_vector(rng);

        // Fuzz pushed the ray below the surface: absorbed
        if scattered_dir.dot(rec.normal) <= 0.0 {
            return None;
        }

        Some(ScatterResult {
            attenuation: self.color,
            scattered: Ray::new(rec.p, scattered_dir),
            diffuse: 0.0,
            specular: 0.0,
        })
    }
}
