//! Midpoint subdivision.

// New vertex ids are bounded by the capacity check before every pass
#![allow(clippy::cast_possible_truncation)]

use hashbrown::HashMap;
use mesh_types::{IndexedMesh, Point3, Vector3, Vertex, VertexAttributes};
use tracing::{debug, warn};

use crate::edge::EdgeKey;
use crate::error::{SubdivideError, SubdivideResult};
use crate::params::SubdivideParams;
use crate::result::SubdivisionResult;

/// Split every triangle of `mesh` into four, once.
///
/// Each edge gets exactly one midpoint vertex, shared by the triangles on
/// both sides. The output has `4 * T` faces and `V + E` vertices where `E` is
/// the number of distinct edges. Original vertices keep their ids.
///
/// New positions are edge midpoints. New normals are the normalized sum of
/// the endpoint normals; a midpoint only gets a normal when both endpoints
/// have one. Two exactly opposite endpoint normals yield a zero normal.
///
/// # Errors
///
/// Returns an error if:
/// - The mesh has no vertices ([`SubdivideError::EmptyMesh`])
/// - The mesh has no faces or a face index is out of range
///   ([`SubdivideError::InvalidMesh`])
/// - The new vertices could not be addressed by `u32` indices
///   ([`SubdivideError::IndexOverflow`])
///
/// # Examples
///
/// ```
/// use mesh_types::{IndexedMesh, Vertex, MeshTopology};
/// use mesh_subdivide::subdivide;
///
/// let mut mesh = IndexedMesh::new();
/// mesh.vertices.push(Vertex::from_coords(0.0, 0.0, 0.0));
/// mesh.vertices.push(Vertex::from_coords(1.0, 0.0, 0.0));
/// mesh.vertices.push(Vertex::from_coords(0.5, 1.0, 0.0));
/// mesh.faces.push([0, 1, 2]);
///
/// let refined = subdivide(&mesh)?;
/// assert_eq!(refined.face_count(), 4);
/// assert_eq!(refined.vertex_count(), 6);
/// # Ok::<(), mesh_subdivide::SubdivideError>(())
/// ```
pub fn subdivide(mesh: &IndexedMesh) -> SubdivideResult<IndexedMesh> {
    validate_input(mesh)?;
    check_index_capacity(mesh, SubdivideParams::default().vertex_limit())?;
    Ok(subdivide_midpoint(mesh).mesh)
}

/// Subdivide a mesh `params.iterations` times.
///
/// # Errors
///
/// Returns an error if:
/// - The mesh is empty or invalid (see [`subdivide`])
/// - The iteration count is 0
/// - The resulting mesh would exceed `max_faces`
/// - A pass would exceed `max_vertices`
///
/// # Examples
///
/// ```
/// use mesh_types::{IndexedMesh, Vertex};
/// use mesh_subdivide::{subdivide_mesh, SubdivideParams};
///
/// let mut mesh = IndexedMesh::new();
/// mesh.vertices.push(Vertex::from_coords(0.0, 0.0, 0.0));
/// mesh.vertices.push(Vertex::from_coords(1.0, 0.0, 0.0));
/// mesh.vertices.push(Vertex::from_coords(0.5, 1.0, 0.0));
/// mesh.faces.push([0, 1, 2]);
///
/// let params = SubdivideParams::new().with_iterations(2);
/// let result = subdivide_mesh(&mesh, &params)?;
///
/// // 1 * 4^2 = 16 faces after 2 iterations
/// assert_eq!(result.final_faces, 16);
/// # Ok::<(), mesh_subdivide::SubdivideError>(())
/// ```
pub fn subdivide_mesh(
    mesh: &IndexedMesh,
    params: &SubdivideParams,
) -> SubdivideResult<SubdivisionResult> {
    validate_input(mesh)?;
    if params.iterations == 0 {
        return Err(SubdivideError::InvalidIterations(0));
    }

    // Check projected size
    let projected = params.expected_faces(mesh.faces.len());
    if projected > params.max_faces {
        return Err(SubdivideError::MeshTooLarge {
            current: mesh.faces.len(),
            projected,
            max: params.max_faces,
        });
    }

    let original_faces = mesh.faces.len();
    let original_vertices = mesh.vertices.len();

    debug!(
        "Subdividing mesh: {} faces, {} vertices, {} iterations",
        original_faces, original_vertices, params.iterations
    );

    let mut current = mesh.clone();
    let mut cancelled_normals = 0;
    for i in 0..params.iterations {
        check_index_capacity(&current, params.vertex_limit())?;
        let pass = subdivide_midpoint(&current);
        current = pass.mesh;
        cancelled_normals += pass.cancelled_normals;
        debug!(
            "Iteration {}: {} faces, {} vertices",
            i + 1,
            current.faces.len(),
            current.vertices.len()
        );
    }

    Ok(SubdivisionResult {
        original_faces,
        final_faces: current.faces.len(),
        original_vertices,
        final_vertices: current.vertices.len(),
        iterations: params.iterations,
        cancelled_normals,
        mesh: current,
    })
}

/// Output of one midpoint pass.
pub(crate) struct MidpointPass {
    pub(crate) mesh: IndexedMesh,
    pub(crate) cancelled_normals: usize,
}

/// Reject meshes no algorithm here can work on.
pub(crate) fn validate_input(mesh: &IndexedMesh) -> SubdivideResult<()> {
    if mesh.vertices.is_empty() {
        return Err(SubdivideError::EmptyMesh);
    }
    mesh.validate()?;
    Ok(())
}

/// Make sure every vertex one more pass could create stays addressable.
///
/// A pass adds one vertex per distinct edge, and a mesh has at most `3 * T`
/// of them, so `V + 3T` bounds the output without building the edge set.
pub(crate) fn check_index_capacity(mesh: &IndexedMesh, max: usize) -> SubdivideResult<()> {
    let projected = mesh
        .vertices
        .len()
        .saturating_add(mesh.faces.len().saturating_mul(3));
    if projected > max {
        return Err(SubdivideError::IndexOverflow { projected, max });
    }
    Ok(())
}

/// Midpoint subdivision - split each triangle into 4 by adding edge midpoints.
///
/// Buffers and the edge cache live for this call only.
pub(crate) fn subdivide_midpoint(mesh: &IndexedMesh) -> MidpointPass {
    let mut out = IndexedMesh::with_capacity(
        mesh.vertices.len() + mesh.faces.len() * 3 / 2,
        mesh.faces.len() * 4,
    );
    out.vertices.extend_from_slice(&mesh.vertices);
    let vertices = &mut out.vertices;
    let faces = &mut out.faces;

    let mut edge_midpoints: HashMap<EdgeKey, u32> = HashMap::with_capacity(mesh.faces.len() * 3 / 2);
    let mut cancelled_normals = 0;

    for &[i1, i2, i3] in &mesh.faces {
        let mut midpoint = |a: u32, b: u32| {
            *edge_midpoints.entry(EdgeKey::new(a, b)).or_insert_with(|| {
                let (vertex, cancelled) = midpoint_vertex(&vertices[a as usize], &vertices[b as usize]);
                if cancelled {
                    cancelled_normals += 1;
                }
                let idx = vertices.len() as u32;
                vertices.push(vertex);
                idx
            })
        };

        let a = midpoint(i1, i2);
        let b = midpoint(i2, i3);
        let c = midpoint(i3, i1);

        // Corner triangles keep the original winding
        faces.push([i1, a, c]);
        faces.push([i2, b, a]);
        faces.push([i3, c, b]);
        // Center triangle
        faces.push([a, b, c]);
    }

    if cancelled_normals > 0 {
        warn!(
            "{} midpoint normals cancelled to zero (opposite endpoint normals)",
            cancelled_normals
        );
    }

    MidpointPass {
        mesh: out,
        cancelled_normals,
    }
}

/// Build the midpoint vertex of an edge.
///
/// Returns the vertex and whether its normal cancelled to zero.
fn midpoint_vertex(p: &Vertex, q: &Vertex) -> (Vertex, bool) {
    let position = Point3::from((p.position.coords + q.position.coords) * 0.5);

    let (normal, cancelled) = match (p.attributes.normal, q.attributes.normal) {
        (Some(n0), Some(n1)) => match (n0 + n1).try_normalize(0.0) {
            Some(n) => (Some(n), false),
            None => (Some(Vector3::zeros()), true),
        },
        _ => (None, false),
    };

    let uv = match (p.attributes.uv, q.attributes.uv) {
        (Some((u0, v0)), Some((u1, v1))) => Some(((u0 + u1) * 0.5, (v0 + v1) * 0.5)),
        _ => None,
    };

    let vertex = Vertex {
        position,
        attributes: VertexAttributes { normal, uv },
    };
    (vertex, cancelled)
}
