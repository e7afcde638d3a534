//! Error types for isosurface extraction.

use thiserror::Error;

/// Errors that can occur while building or scanning a lattice.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum BlobError {
    /// A case-table row references an edge outside 0..12.
    #[error("case {case} references invalid edge {edge}")]
    InvalidEdge { case: u8, edge: i8 },

    /// A case-table row does not come in groups of three edges.
    #[error("case {case} ends with an incomplete triangle")]
    IncompleteTriangle { case: u8 },

    #[error("cell size must be finite and positive, got {0}")]
    InvalidCellSize(f64),

    #[error("lattice origin and extent must be finite")]
    InvalidBounds,
}

pub type Result<T> = std::result::Result<T, BlobError>;
