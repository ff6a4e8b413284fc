//! Linear interpolation over a vertex correspondence.

use mesh_correspond::Correspondence;
use mesh_types::{Aabb, IndexedMesh, Point3, Vertex, validate_faces};
use rayon::prelude::*;
use tracing::{debug, warn};

use crate::normals::compute_vertex_normals;
use crate::{MorphError, MorphOutput, MorphResult};

/// Morph percent at which the output equals the large mesh.
pub const FULL_PERCENT: f64 = 100.0;

/// Vertex count above which positions are computed in parallel.
const PARALLEL_VERTICES: usize = 1000;

/// Blend between the two matched meshes.
///
/// Every large-mesh vertex moves along the line from its group's small-mesh
/// parent towards its own position:
///
/// ```text
/// out[slot] = parent + (member - parent) * (percent / 100)
/// ```
///
/// `percent = 0` collapses each group onto its parent and `percent = 100`
/// reproduces the large mesh. Values outside `[0, 100]` extrapolate; they are
/// not clamped.
///
/// The output uses `large_triangles` unchanged. Vertex normals are recomputed
/// from the morphed faces and each vertex gets the planar UV `(x, z)` of its
/// morphed position.
///
/// # Errors
///
/// Returns an error if:
/// - `percent` is NaN or infinite
/// - A correspondence group has more or fewer member positions than slots
/// - The correspondence does not claim every large-mesh slot exactly once
/// - A triangle index is not a large-mesh vertex
///
/// # Examples
///
/// ```
/// use mesh_morph::interpolate;
/// use mesh_correspond::{match_vertices, MatchParams};
/// use mesh_types::Point3;
///
/// let small = [Point3::new(0.0, 0.0, 0.0), Point3::new(2.0, 0.0, 0.0)];
/// let large = [
///     Point3::new(0.0, 0.0, 1.0),
///     Point3::new(1.0, 0.0, 0.0),
///     Point3::new(2.0, 0.0, 1.0),
/// ];
/// let c = match_vertices(&small, &large, &MatchParams::default())?;
///
/// let output = interpolate(&c, &[[0, 1, 2]], 50.0)?;
/// assert_eq!(output.mesh.vertices[1].position, Point3::new(1.5, 0.0, 0.0));
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub fn interpolate(
    correspondence: &Correspondence,
    large_triangles: &[[u32; 3]],
    percent: f64,
) -> MorphResult<MorphOutput> {
    if !percent.is_finite() {
        return Err(MorphError::NonFiniteParameter(percent));
    }
    correspondence.validate()?;
    validate_faces(large_triangles, correspondence.large_vertex_count)?;

    let weight = percent / FULL_PERCENT;
    let positions = blend_positions(correspondence, weight);

    let mut max_displacement: f64 = 0.0;
    for group in &correspondence.groups {
        for (member, slot) in group.iter() {
            max_displacement = max_displacement.max((positions[slot] - member).norm());
        }
    }

    let mut vertices: Vec<Vertex> = positions.into_iter().map(Vertex::new).collect();
    for vertex in &mut vertices {
        let p = vertex.position;
        #[allow(clippy::cast_possible_truncation)]
        let uv = (p.x as f32, p.z as f32);
        vertex.attributes.uv = Some(uv);
    }

    let mut mesh = IndexedMesh::from_parts(vertices, large_triangles.to_vec());
    let vertices_without_normal = compute_vertex_normals(&mut mesh);
    if vertices_without_normal > 0 {
        warn!(
            "{} morphed vertices have no incident non-degenerate face",
            vertices_without_normal
        );
    }

    let bounds = Aabb::from_points(mesh.vertices.iter().map(|v| &v.position));

    debug!(
        "Interpolated {} vertices at {:.2}%, max displacement {:.6}",
        mesh.vertices.len(),
        percent,
        max_displacement
    );

    Ok(MorphOutput {
        mesh,
        percent,
        bounds,
        max_displacement,
        vertices_without_normal,
    })
}

/// Morphed position of every large-mesh slot.
///
/// The correspondence must already be validated.
fn blend_positions(correspondence: &Correspondence, weight: f64) -> Vec<Point3<f64>> {
    let mut positions = vec![Point3::origin(); correspondence.large_vertex_count];

    // Process groups in parallel for large meshes
    if correspondence.large_vertex_count > PARALLEL_VERTICES {
        let blended: Vec<(usize, Point3<f64>)> = correspondence
            .groups
            .par_iter()
            .flat_map_iter(|group| {
                let parent = group.parent;
                group
                    .iter()
                    .map(move |(member, slot)| (slot, blend(&parent, member, weight)))
            })
            .collect();

        for (slot, position) in blended {
            positions[slot] = position;
        }
    } else {
        for group in &correspondence.groups {
            let parent = group.parent;
            for (member, slot) in group.iter() {
                positions[slot] = blend(&parent, member, weight);
            }
        }
    }

    positions
}

/// `parent + (member - parent) * weight`, written so that weights 0 and 1
/// return `parent` and `member` bit for bit.
#[inline]
fn blend(parent: &Point3<f64>, member: &Point3<f64>, weight: f64) -> Point3<f64> {
    Point3::from(parent.coords * (1.0 - weight) + member.coords * weight)
}
