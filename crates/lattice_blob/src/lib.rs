//! Lattice blob - marching-cubes isosurface extraction.
//!
//! A [`Blob`] scans a regular lattice of cubic cells, classifies each cell's
//! corners against a [`PotentialField`], and emits triangles from the
//! standard 256-case table into a renderer [`Mesh`](lattice_renderer::Mesh).

mod case_table;
mod error;
mod field;
mod marching;

pub use case_table::{case_edges, edge_corners, CORNER_OFFSETS, EDGE_CORNERS, TRIANGLE_TABLE};
pub use error::{BlobError, Result};
pub use field::{PointSource, PointSources, PotentialField, SphereDistance, MIN_SOURCE_DISTANCE};
pub use marching::{Blob, Facet, VertexPlacement};
