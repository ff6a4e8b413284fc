//! Traits for mesh types.

use crate::{Aabb, Triangle, Vertex};
use nalgebra::Point3;

/// Trait for types that provide mesh topology information.
pub trait MeshTopology {
    /// Get the number of vertices.
    fn vertex_count(&self) -> usize;

    /// Get the number of faces (triangles).
    fn face_count(&self) -> usize;

    /// Check if the mesh is empty (no vertices or no faces).
    fn is_empty(&self) -> bool {
        self.vertex_count() == 0 || self.face_count() == 0
    }

    /// Get a vertex by index, `None` if out of bounds.
    fn vertex(&self, index: usize) -> Option<&Vertex>;

    /// Get a face by index, `None` if out of bounds.
    fn face(&self, index: usize) -> Option<[u32; 3]>;

    /// Get a triangle by face index with resolved vertex positions.
    ///
    /// Returns `None` if the face index, or any vertex it references, is out
    /// of bounds.
    fn triangle(&self, face_index: usize) -> Option<Triangle>;

    /// Iterate over all resolvable triangles.
    fn triangles(&self) -> impl Iterator<Item = Triangle>;
}

/// Trait for types that can compute a bounding box.
pub trait MeshBounds {
    /// Compute the axis-aligned bounding box.
    ///
    /// Returns an empty AABB if the mesh has no vertices.
    fn bounds(&self) -> Aabb;

    /// Get the center of the bounding box.
    fn center(&self) -> Point3<f64> {
        self.bounds().center()
    }
}
