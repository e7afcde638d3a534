//! Triangle mesh: an ordered list of triangles traced as one object.
//!
//! Meshes are what the isosurface extractor produces. They implement
//! [`Hittable`] with closest-hit semantics, so a mesh can be added to a
//! scene (or nested inside another composite) like any primitive.

use crate::hittable::{closest_hit, HitRecord, Hittable};
use crate::{Material, Triangle};
use lattice_math::{Interval, Point3, Ray, Vec3};
use std::sync::Arc;

/// An ordered collection of triangles.
#[derive(Clone, Default)]
pub struct Mesh {
    triangles: Vec<Triangle>,
}

impl Mesh {
    /// Create an empty mesh.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty mesh with room for `capacity` triangles.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            triangles: Vec::with_capacity(capacity),
        }
    }

    /// Axis-aligned unit cube spanning [0, 1] on every axis, two triangles per face.
    pub fn unit_cube(material: Arc<dyn Material>) -> Self {
        const FACES: [[[f64; 3]; 4]; 6] = [
            // South (z = 0)
            [[0.0, 0.0, 0.0], [0.0, 1.0, 0.0], [1.0, 1.0, 0.0], [1.0, 0.0, 0.0]],
            // East (x = 1)
            [[1.0, 0.0, 0.0], [1.0, 1.0, 0.0], [1.0, 1.0, 1.0], [1.0, 0.0, 1.0]],
            // North (z = 1)
            [[1.0, 0.0, 1.0], [1.0, 1.0, 1.0], [0.0, 1.0, 1.0], [0.0, 0.0, 1.0]],
            // West (x = 0)
            [[0.0, 0.0, 1.0], [0.0, 1.0, 1.0], [0.0, 1.0, 0.0], [0.0, 0.0, 0.0]],
            // Top (y = 1)
            [[0.0, 1.0, 0.0], [0.0, 1.0, 1.0], [1.0, 1.0, 1.0], [1.0, 1.0, 0.0]],
            // Bottom (y = 0)
            [[1.0, 0.0, 1.0], [0.0, 0.0, 1.0], [0.0, 0.0, 0.0], [1.0, 0.0, 0.0]],
        ];

        let mut mesh = Self::with_capacity(12);
        for [a, b, c, d] in FACES {
            let (a, b, c, d) = (
                Vec3::from(a),
                Vec3::from(b),
                Vec3::from(c),
                Vec3::from(d),
            );
            mesh.add_triangle(Triangle::new(a, b, c, Arc::clone(&material)));
            mesh.add_triangle(Triangle::new(a, c, d, Arc::clone(&material)));
        }
        mesh
    }

    /// Append one triangle.
    pub fn add_triangle(&mut self, triangle: Triangle) {
        self.triangles.push(triangle);
    }

    /// Move every triangle of `other` to the end of this mesh.
    pub fn append(&mut self, other: &mut Mesh) {
        self.triangles.append(&mut other.triangles);
    }

    /// Move every vertex of every triangle by `offset`.
    pub fn translate(&mut self, offset: Vec3) {
        for triangle in &mut self.triangles {
            triangle.translate(offset);
        }
    }

    /// Triangles in insertion order.
    pub fn triangles(&self) -> &[Triangle] {
        &self.triangles
    }

    /// Get the number of triangles in the mesh.
    pub fn len(&self) -> usize {
        self.triangles.len()
    }

    /// Check if the mesh is empty.
    pub fn is_empty(&self) -> bool {
        self.triangles.is_empty()
    }

    /// Axis-aligned bounds as `(min, max)`, or `None` for an empty mesh.
    pub fn bounds(&self) -> Option<(Point3, Point3)> {
        let mut vertices = self.triangles.iter().flat_map(|t| t.vertices());
        let first = vertices.next()?;
        Some(vertices.fold((first, first), |(min, max), v| (min.min(v), max.max(v))))
    }
}

impl Extend<Triangle> for Mesh {
    fn extend<I: IntoIterator<Item = Triangle>>(&mut self, iter: I) {
        self.triangles.extend(iter);
    }
}

impl FromIterator<Triangle> for Mesh {
    fn from_iter<I: IntoIterator<Item = Triangle>>(iter: I) -> Self {
        Self {
            triangles: iter.into_iter().collect(),
        }
    }
}

impl Hittable for Mesh {
    fn hit<'a>(&'a self, ray: &Ray, ray_t: Interval) -> Option<HitRecord<'a>> {
        closest_hit(&self.triangles, ray, ray_t)
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

    fn quad_at(z: f64) -> [Triangle; 2] {
        let m = grey();
        [
            Triangle::new(
                Vec3::new(-1.0, -1.0, z),
                Vec3::new(1.0, -1.0, z),
                Vec3::new(1.0, 1.0, z),
                Arc::clone(&m),
            ),
            Triangle::new(
                Vec3::new(-1.0, -1.0, z),
                Vec3::new(1.0, 1.0, z),
                Vec3::new(-1.0, 1.0, z),
                m,
            ),
        ]
    }

    #[test]
    fn test_mesh_reports_closest_layer() {
        let mut mesh = Mesh::new();
        // Far layer first so insertion order cannot decide the winner
        mesh.extend(quad_at(-3.0));
        mesh.extend(quad_at(-2.0));
        assert_eq!(mesh.len(), 4);

        let ray = Ray::new(Vec3::new(0.25, 0.5, 0.0), Vec3::NEG_Z);
        let rec = mesh.hit(&ray, Interval::new(0.001, f64::INFINITY)).unwrap();
        assert!((rec.t - 2.0).abs() < 1e-12);

        // Tightening t_max below the near layer leaves nothing
        assert!(mesh.hit(&ray, Interval::new(0.001, 1.5)).is_none());
    }

    #[test]
    fn test_translate_roundtrip() {
        let mut mesh = Mesh::unit_cube(grey());
        let original: Vec<[Vec3; 3]> = mesh.triangles().iter().map(|t| t.vertices()).collect();

        let offset = Vec3::new(1.5, -0.25, 8.0);
        mesh.translate(offset);
        assert_eq!(mesh.triangles()[0].vertices()[0], original[0][0] + offset);

        mesh.translate(-offset);
        let restored: Vec<[Vec3; 3]> = mesh.triangles().iter().map(|t| t.vertices()).collect();
        assert_eq!(restored, original);
    }

    #[test]
    fn test_unit_cube() {
        let cube = Mesh::unit_cube(grey());
        assert_eq!(cube.len(), 12);
        assert_eq!(cube.bounds(), Some((Vec3::ZERO, Vec3::ONE)));

        // Enters through the south face at z = 0
        let ray = Ray::new(Vec3::new(0.3, 0.6, -1.0), Vec3::Z);
        let rec = cube.hit(&ray, Interval::new(0.001, f64::INFINITY)).unwrap();
        assert!((rec.t - 1.0).abs() < 1e-12);
        assert!((rec.normal + Vec3::Z).length() < 1e-12);
    }

    #[test]
    fn test_append_moves_triangles() {
        let mut a: Mesh = quad_at(0.0).into_iter().collect();
        let mut b: Mesh = quad_at(1.0).into_iter().collect();

        a.append(&mut b);
        assert_eq!(a.len(), 4);
        assert!(b.is_empty());
        assert_eq!(Mesh::new().bounds(), None);
    }
}
