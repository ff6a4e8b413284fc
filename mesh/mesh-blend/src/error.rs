//! Error types for the blend pipeline.

use mesh_correspond::MatchError;
use mesh_morph::MorphError;
use mesh_subdivide::SubdivideError;
use mesh_types::MeshError;
use thiserror::Error;

/// Errors that can occur while building or driving a [`MorphPipeline`](crate::MorphPipeline).
#[derive(Debug, Error)]
pub enum BlendError {
    /// An input mesh is invalid.
    #[error("invalid input mesh: {0}")]
    Mesh(#[from] MeshError),

    /// Density equalization failed.
    #[error("equalization failed: {0}")]
    Subdivide(#[from] SubdivideError),

    /// Vertex matching failed.
    #[error("matching failed: {0}")]
    Match(#[from] MatchError),

    /// Interpolation failed.
    #[error("morph failed: {0}")]
    Morph(#[from] MorphError),
}

/// Result type for pipeline operations.
pub type BlendResult<T> = Result<T, BlendError>;
