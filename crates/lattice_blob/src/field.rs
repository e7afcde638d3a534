//! Scalar potential fields sampled by the lattice scan.

use lattice_math::{Point3, Vec3};
use serde::{Deserialize, Serialize};

/// Smallest distance used when evaluating an inverse-distance source.
pub const MIN_SOURCE_DISTANCE: f64 = 1.0e-9;

/// A scalar function over space whose level set is the extracted surface.
pub trait PotentialField: Send + Sync {
    fn potential(&self, point: Point3) -> f64;
}

impl<F> PotentialField for F
where
    F: Fn(Point3) -> f64 + Send + Sync,
{
    fn potential(&self, point: Point3) -> f64 {
        self(point)
    }
}

/// A radial source of strength `intensity`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PointSource {
    pub position: Point3,
    pub intensity: f64,
}

/// Sum of `intensity / distance` over a set of sources (metaballs).
///
/// Distances are clamped to [`MIN_SOURCE_DISTANCE`] so sampling exactly on
/// a source stays finite.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PointSources {
    sources: Vec<PointSource>,
}

impl PointSources {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, position: Point3, intensity: f64) {
        self.sources.push(PointSource {
            position,
            intensity,
        });
    }

    pub fn with_source(mut self, position: Point3, intensity: f64) -> Self {
        self.add(position, intensity);
        self
    }

    pub fn sources(&self) -> &[PointSource] {
        &self.sources
    }

    pub fn len(&self) -> usize {
        self.sources.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sources.is_empty()
    }
}

impl FromIterator<PointSource> for PointSources {
    fn from_iter<I: IntoIterator<Item = PointSource>>(iter: I) -> Self {
        Self {
            sources: iter.into_iter().collect(),
        }
    }
}

impl PotentialField for PointSources {
    fn potential(&self, point: Point3) -> f64 {
        self.sources
            .iter()
            .map(|source| {
                let distance = (point - source.position).length().max(MIN_SOURCE_DISTANCE);
                source.intensity / distance
            })
            .sum()
    }
}

/// Distance to a sphere surface: negative inside, positive outside.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SphereDistance {
    pub center: Point3,
    pub radius: f64,
}

impl SphereDistance {
    pub fn new(center: Point3, radius: f64) -> Self {
        Self { center, radius }
    }
}

impl PotentialField for SphereDistance {
    fn potential(&self, point: Point3) -> f64 {
        (point - self.center).length() - self.radius
    }
}

impl Default for SphereDistance {
    fn default() -> Self {
        Self::new(Vec3::ZERO, 1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_point_sources_sum() {
        let field = PointSources::new()
            .with_source(Vec3::ZERO, 1.0)
            .with_source(Vec3::new(4.0, 0.0, 0.0), 2.0);

        // 1/2 + 2/2
        let p = Vec3::new(2.0, 0.0, 0.0);
        assert!((field.potential(p) - 1.5).abs() < 1e-12);
        assert_eq!(field.len(), 2);
    }

    #[test]
    fn test_point_source_singularity_is_finite() {
        let field = PointSources::new().with_source(Vec3::ONE, 1.0);
        let at_source = field.potential(Vec3::ONE);
        assert!(at_source.is_finite());
        assert_eq!(at_source, 1.0 / MIN_SOURCE_DISTANCE);
    }

    #[test]
    fn test_empty_sources_are_zero() {
        assert_eq!(PointSources::new().potential(Vec3::ONE), 0.0);
    }

    #[test]
    fn test_sphere_distance_sign() {
        let field = SphereDistance::new(Vec3::new(2.0, 2.0, 2.0), 1.0);
        assert_eq!(field.potential(Vec3::new(2.0, 2.0, 2.0)), -1.0);
        assert_eq!(field.potential(Vec3::new(2.0, 3.0, 2.0)), 0.0);
        assert_eq!(field.potential(Vec3::new(2.0, 2.0, 5.0)), 2.0);
    }

    #[test]
    fn test_closure_field() {
        let plane = |p: Point3| p.y - 0.5;
        assert_eq!(plane.potential(Vec3::new(9.0, 1.0, -3.0)), 0.5);
    }
}
