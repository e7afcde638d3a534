//! Lattice scan: marching cubes over a regular grid of cells.

use crate::case_table::{case_edges, edge_corners, CORNER_OFFSETS, EDGE_TABLE};
use crate::error::{BlobError, Result};
use crate::field::PotentialField;
use lattice_math::{Point3, Vec3};
use lattice_renderer::{Material, Mesh, Triangle};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Where a surface vertex is placed along a crossing edge.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VertexPlacement {
    /// Halfway between the two corners.
    #[default]
    Midpoint,
    /// Linear interpolation of the corner potentials at the threshold.
    Interpolated,
}

/// A triangle as three positions, before a material is attached.
pub type Facet = [Point3; 3];

/// Axis-aligned lattice of cubic cells covering `[origin, extent)`.
///
/// A corner is inside the surface when its potential is below `threshold`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Blob {
    origin: Point3,
    extent: Point3,
    cell_size: f64,
    threshold: f64,
    placement: VertexPlacement,
}

impl Blob {
    /// Cells start at `origin + i * cell_size` for every `i` whose start is
    /// below `extent` on that axis.
    pub fn new(origin: Point3, extent: Point3, cell_size: f64, threshold: f64) -> Result<Self> {
        if !cell_size.is_finite() || cell_size <= 0.0 {
            return Err(BlobError::InvalidCellSize(cell_size));
        }
        if !origin.is_finite() || !extent.is_finite() {
            return Err(BlobError::InvalidBounds);
        }

        Ok(Self {
            origin,
            extent,
            cell_size,
            threshold,
            placement: VertexPlacement::default(),
        })
    }

    pub fn with_placement(mut self, placement: VertexPlacement) -> Self {
        self.placement = placement;
        self
    }

    pub fn origin(&self) -> Point3 {
        self.origin
    }

    pub fn extent(&self) -> Point3 {
        self.extent
    }

    pub fn cell_size(&self) -> f64 {
        self.cell_size
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    pub fn placement(&self) -> VertexPlacement {
        self.placement
    }

    /// Number of cells along x, y and z.
    pub fn cell_counts(&self) -> [usize; 3] {
        [0, 1, 2].map(|axis| self.axis_count(self.origin[axis], self.extent[axis]))
    }

    fn axis_count(&self, start: f64, end: f64) -> usize {
        if end <= start {
            return 0;
        }
        let starts_below_end = |n: usize| start + n as f64 * self.cell_size < end;

        // Estimate, then settle rounding at the boundary
        let mut count = ((end - start) / self.cell_size).ceil() as usize;
        while count > 0 && !starts_below_end(count - 1) {
            count -= 1;
        }
        while starts_below_end(count) {
            count += 1;
        }
        count
    }

    /// Corner positions of cell `(i, j, k)`, computed from integer indices
    /// so neighbouring cells agree exactly on shared corners.
    fn cell_corners(&self, i: usize, j: usize, k: usize) -> [Point3; 8] {
        CORNER_OFFSETS.map(|[dx, dy, dz]| {
            let index = Vec3::new(
                (i + dx as usize) as f64,
                (j + dy as usize) as f64,
                (k + dz as usize) as f64,
            );
            self.origin + index * self.cell_size
        })
    }

    /// Triangulate the single cell whose minimum corner is `corner`.
    pub fn march_cell(&self, corner: Point3, field: &dyn PotentialField) -> Result<Vec<Facet>> {
        let corners = CORNER_OFFSETS.map(|[dx, dy, dz]| {
            corner + Vec3::new(dx as f64, dy as f64, dz as f64) * self.cell_size
        });
        self.march_corners(&corners, field)
    }

    fn march_corners(&self, corners: &[Point3; 8], field: &dyn PotentialField) -> Result<Vec<Facet>> {
        let potentials = corners.map(|p| field.potential(p));

        let case = potentials
            .iter()
            .enumerate()
            .filter(|(_, potential)| **potential < self.threshold)
            .fold(0u8, |case, (corner, _)| case | 1 << corner);

        // Fully inside or fully outside
        if EDGE_TABLE[case as usize] == 0 {
            return Ok(Vec::new());
        }

        self.row_facets(case, case_edges(case), corners, &potentials)
    }

    /// Build one facet per edge triple of a case-table row.
    fn row_facets(
        &self,
        case: u8,
        edges: &[i8],
        corners: &[Point3; 8],
        potentials: &[f64; 8],
    ) -> Result<Vec<Facet>> {
        if edges.len() % 3 != 0 {
            return Err(BlobError::IncompleteTriangle { case });
        }

        let mut facets = Vec::with_capacity(edges.len() / 3);
        for triangle in edges.chunks_exact(3) {
            let mut facet = [Point3::ZERO; 3];
            for (vertex, &edge) in facet.iter_mut().zip(triangle) {
                let [a, b] = edge_corners(edge).ok_or(BlobError::InvalidEdge { case, edge })?;
                *vertex = self.edge_vertex(corners[a], corners[b], potentials[a], potentials[b]);
            }
            facets.push(facet);
        }

        Ok(facets)
    }

    fn edge_vertex(&self, a: Point3, b: Point3, potential_a: f64, potential_b: f64) -> Point3 {
        match self.placement {
            VertexPlacement::Midpoint => (a + b) * 0.5,
            VertexPlacement::Interpolated => {
                let delta = potential_b - potential_a;
                if delta.abs() < f64::EPSILON {
                    return (a + b) * 0.5;
                }
                let t = ((self.threshold - potential_a) / delta).clamp(0.0, 1.0);
                a + (b - a) * t
            }
        }
    }

    /// Triangulate the whole lattice as raw facets in scan order (x, then y, then z).
    pub fn facets(&self, field: &dyn PotentialField) -> Result<Vec<Facet>> {
        let [nx, ny, nz] = self.cell_counts();
        if nx == 0 || ny == 0 || nz == 0 {
            log::warn!(
                "Empty lattice: origin {:?} extent {:?} cell size {}",
                self.origin,
                self.extent,
                self.cell_size
            );
            return Ok(Vec::new());
        }

        // One x-slab per task; collecting an indexed iterator keeps slab order
        let slabs: Vec<Vec<Facet>> = (0..nx)
            .into_par_iter()
            .map(|i| -> Result<Vec<Facet>> {
                let mut slab = Vec::new();
                for j in 0..ny {
                    for k in 0..nz {
                        slab.extend(self.march_corners(&self.cell_corners(i, j, k), field)?);
                    }
                }
                log::debug!("Slab {}/{}: {} triangles", i + 1, nx, slab.len());
                Ok(slab)
            })
            .collect::<Result<_>>()?;

        Ok(slabs.into_iter().flatten().collect())
    }

    /// Extract the isosurface as a mesh whose triangles share `material`.
    pub fn extract(&self, field: &dyn PotentialField, material: Arc<dyn Material>) -> Result<Mesh> {
        let [nx, ny, nz] = self.cell_counts();
        let facets = self.facets(field)?;

        let mesh: Mesh = facets
            .into_iter()
            .map(|[v0, v1, v2]| Triangle::new(v0, v1, v2, material.clone()))
            .collect();

        log::info!(
            "Extracted {} triangles from {}x{}x{} cells",
            mesh.len(),
            nx,
            ny,
            nz
        );
        Ok(mesh)
    }
}
