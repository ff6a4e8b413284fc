//! Density equalization.

use mesh_types::IndexedMesh;
use tracing::{debug, info};

use crate::edge::count_unique_edges;
use crate::error::SubdivideResult;
use crate::params::SubdivideParams;
use crate::result::SubdivisionResult;
use crate::subdivide::{check_index_capacity, subdivide_midpoint, validate_input};

/// Subdivide `mesh` until one more pass would push its vertex count past
/// `target_vertices`.
///
/// The projected count of a pass is exact (`V + distinct edges`). At most
/// `params.iterations` passes are made, and a pass that would exceed
/// `params.max_faces` is not made. Zero passes is a valid outcome, reported
/// as `iterations == 0`.
///
/// # Errors
///
/// Returns an error if the mesh is empty or invalid, or if a pass that fits
/// the target would exceed `params.max_vertices`.
///
/// # Examples
///
/// ```
/// use mesh_subdivide::{equalize_density, SubdivideParams};
/// use mesh_types::octahedron;
///
/// // 6 → 18 → 66 vertices; a third pass would give 258
/// let params = SubdivideParams::new().with_iterations(8);
/// let result = equalize_density(&octahedron(1.0), 200, &params)?;
///
/// assert_eq!(result.iterations, 2);
/// assert_eq!(result.final_vertices, 66);
/// # Ok::<(), mesh_subdivide::SubdivideError>(())
/// ```
pub fn equalize_density(
    mesh: &IndexedMesh,
    target_vertices: usize,
    params: &SubdivideParams,
) -> SubdivideResult<SubdivisionResult> {
    validate_input(mesh)?;

    let original_faces = mesh.faces.len();
    let original_vertices = mesh.vertices.len();

    let mut current = mesh.clone();
    let mut iterations = 0;
    let mut cancelled_normals = 0;

    while iterations < params.iterations {
        let projected = current.vertices.len() + count_unique_edges(&current);
        if projected > target_vertices {
            break;
        }
        let projected_faces = current.faces.len().saturating_mul(4);
        if projected_faces > params.max_faces {
            debug!(
                "Stopping equalization: {} faces would exceed max {}",
                projected_faces, params.max_faces
            );
            break;
        }
        check_index_capacity(&current, params.vertex_limit())?;

        let pass = subdivide_midpoint(&current);
        current = pass.mesh;
        cancelled_normals += pass.cancelled_normals;
        iterations += 1;
    }

    info!(
        "Equalized density: {} → {} vertices in {} passes (target {})",
        original_vertices,
        current.vertices.len(),
        iterations,
        target_vertices
    );

    Ok(SubdivisionResult {
        original_faces,
        final_faces: current.faces.len(),
        original_vertices,
        final_vertices: current.vertices.len(),
        iterations,
        cancelled_normals,
        mesh: current,
    })
}
