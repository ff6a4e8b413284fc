//! Result types for subdivision operations.

// Face counts don't overflow in practice
#![allow(clippy::cast_precision_loss)]

use mesh_types::IndexedMesh;

/// Result of mesh subdivision.
#[derive(Debug, Clone)]
pub struct SubdivisionResult {
    /// The subdivided mesh.
    pub mesh: IndexedMesh,

    /// Number of faces in original mesh.
    pub original_faces: usize,

    /// Number of faces in subdivided mesh.
    pub final_faces: usize,

    /// Number of vertices in original mesh.
    pub original_vertices: usize,

    /// Number of vertices in subdivided mesh.
    pub final_vertices: usize,

    /// Number of passes performed.
    pub iterations: u32,

    /// Midpoints whose endpoint normals summed to zero. Those vertices carry
    /// a zero normal.
    pub cancelled_normals: usize,
}

impl SubdivisionResult {
    /// Get the face multiplication factor.
    #[must_use]
    pub fn face_ratio(&self) -> f64 {
        if self.original_faces == 0 {
            1.0
        } else {
            self.final_faces as f64 / self.original_faces as f64
        }
    }

    /// Get the vertex multiplication factor.
    #[must_use]
    pub fn vertex_ratio(&self) -> f64 {
        if self.original_vertices == 0 {
            1.0
        } else {
            self.final_vertices as f64 / self.original_vertices as f64
        }
    }

    /// Check if any subdivision occurred.
    #[must_use]
    pub const fn was_subdivided(&self) -> bool {
        self.iterations > 0 && self.final_faces > self.original_faces
    }
}

impl std::fmt::Display for SubdivisionResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Subdivision: {} → {} faces ({:.1}x), {} → {} vertices, {} iterations",
            self.original_faces,
            self.final_faces,
            self.face_ratio(),
            self.original_vertices,
            self.final_vertices,
            self.iterations
        )
    }
}
