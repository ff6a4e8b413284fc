//! Vertex normal recomputation.

use mesh_types::{IndexedMesh, MeshTopology, Vector3};

/// Recompute vertex normals from face normals, weighted by face area.
///
/// Vertices touched by no non-degenerate face get no normal. Returns how
/// many vertices ended up without one. Faces with an out-of-range index are
/// skipped.
pub fn compute_vertex_normals(mesh: &mut IndexedMesh) -> usize {
    let mut normals = vec![Vector3::zeros(); mesh.vertices.len()];

    // The unnormalized face normal's length is twice the face area
    for (i, face) in mesh.faces.iter().enumerate() {
        let Some(tri) = mesh.triangle(i) else { continue };
        let face_normal = tri.normal_unnormalized();
        for &idx in face {
            normals[idx as usize] += face_normal;
        }
    }

    let mut missing = 0;
    for (vertex, normal) in mesh.vertices.iter_mut().zip(&normals) {
        let len = normal.norm();
        if len > 1e-10 {
            vertex.attributes.normal = Some(normal / len);
        } else {
            vertex.attributes.normal = None;
            missing += 1;
        }
    }
    missing
}
