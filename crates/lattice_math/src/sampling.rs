//! Random sampling helpers.
//!
//! Every helper takes the generator explicitly so that callers can give each
//! pixel or worker its own reproducible stream.

use crate::Vec3;
use rand::{Rng, RngCore};

/// Uniform random value in [0, 1).
#[inline]
pub fn random_f64(rng: &mut dyn RngCore) -> f64 {
    rng.gen()
}

/// Uniform random value in [min, max).
#[inline]
pub fn random_range(rng: &mut dyn RngCore, min: f64, max: f64) -> f64 {
    min + (max - min) * random_f64(rng)
}

/// Random unit vector, uniformly distributed on the sphere.
///
/// Rejection samples the unit ball and normalizes the accepted point.
pub fn random_unit_vector(rng: &mut dyn RngCore) -> Vec3 {
    loop {
        let p = Vec3::new(
            random_range(rng, -1.0, 1.0),
            random_range(rng, -1.0, 1.0),
            random_range(rng, -1.0, 1.0),
        );
        let len_sq = p.length_squared();
        // Tiny vectors would blow up when normalized
        if len_sq > 1e-160 && len_sq < 1.0 {
            return p / len_sq.sqrt();
        }
    }
}
