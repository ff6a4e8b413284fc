//! Error types for mesh validation.

use thiserror::Error;

/// Reasons a mesh fails validation.
///
/// Every variant describes a mesh that violates the indexed-triangle
/// invariant: a non-empty face list whose indices all address a vertex.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MeshError {
    /// Mesh has no faces.
    #[error("mesh has no faces")]
    NoFaces,

    /// Flat index buffer length is not a multiple of three.
    #[error("index buffer length {len} is not a multiple of 3")]
    MalformedIndexBuffer {
        /// Length of the index buffer.
        len: usize,
    },

    /// Flat position buffer length is not a multiple of three.
    #[error("position buffer length {len} is not a multiple of 3")]
    MalformedPositionBuffer {
        /// Length of the position buffer.
        len: usize,
    },

    /// Normal buffer does not describe one normal per vertex.
    #[error("normal buffer has {normals} entries for {vertices} vertices")]
    NormalCountMismatch {
        /// Number of normals supplied.
        normals: usize,
        /// Number of vertices in the mesh.
        vertices: usize,
    },

    /// A face references a vertex that does not exist.
    #[error("face {face} references vertex {index} (mesh has {vertex_count} vertices)")]
    FaceIndexOutOfBounds {
        /// Offending face.
        face: usize,
        /// Offending vertex index.
        index: u32,
        /// Number of vertices in the mesh.
        vertex_count: usize,
    },
}

/// Result type for mesh validation.
pub type MeshResult<T> = Result<T, MeshError>;
