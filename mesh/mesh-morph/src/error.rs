//! Error types for mesh morphing operations.

use mesh_correspond::MatchError;
use mesh_types::MeshError;
use thiserror::Error;

/// Errors that can occur during mesh morphing.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum MorphError {
    /// The correspondence does not cover the large mesh exactly once.
    #[error("invalid correspondence: {0}")]
    InvalidCorrespondence(#[from] MatchError),

    /// The triangle list does not fit the large mesh.
    #[error("invalid triangles: {0}")]
    InvalidTriangles(#[from] MeshError),

    /// The morph percent is NaN or infinite.
    #[error("morph percent must be finite, got {0}")]
    NonFiniteParameter(f64),
}

/// Result type for morphing operations.
pub type MorphResult<T> = Result<T, MorphError>;
