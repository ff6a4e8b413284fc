//! Error types for mesh subdivision operations.

use mesh_types::MeshError;
use thiserror::Error;

/// Errors that can occur during subdivision operations.
#[derive(Debug, Error)]
pub enum SubdivideError {
    /// Mesh has no vertices.
    #[error("Mesh has no vertices")]
    EmptyMesh,

    /// Mesh violates the indexed-triangle invariant.
    #[error("Invalid mesh: {0}")]
    InvalidMesh(#[from] MeshError),

    /// Invalid iteration count.
    #[error("Invalid iteration count: {0} (must be >= 1)")]
    InvalidIterations(u32),

    /// New vertices could not be addressed by a `u32` face index.
    #[error("Subdivision could produce {projected} vertices, more than the supported {max}")]
    IndexOverflow {
        /// Upper bound on the vertex count after one pass.
        projected: usize,
        /// Largest supported vertex count.
        max: usize,
    },

    /// Mesh would exceed maximum size.
    #[error("Subdivision would exceed maximum mesh size ({current} -> {projected} faces, max {max})")]
    MeshTooLarge {
        /// Current face count.
        current: usize,
        /// Projected face count after subdivision.
        projected: usize,
        /// Maximum allowed face count.
        max: usize,
    },
}

/// Result type for subdivision operations.
pub type SubdivideResult<T> = std::result::Result<T, SubdivideError>;
