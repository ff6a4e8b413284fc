//! Morph output and summary metrics.

use mesh_types::{Aabb, IndexedMesh};

/// Result of one interpolation step.
///
/// # Examples
///
/// ```
/// use mesh_morph::interpolate;
/// use mesh_correspond::{match_vertices, MatchParams};
/// use mesh_types::Point3;
///
/// let small = [Point3::new(0.0, 0.0, 0.0), Point3::new(1.0, 0.0, 0.0), Point3::new(0.0, 0.0, 1.0)];
/// let large = [Point3::new(0.0, 1.0, 0.0), Point3::new(1.0, 1.0, 0.0), Point3::new(0.0, 1.0, 1.0)];
/// let c = match_vertices(&large, &small, &MatchParams::default())?;
///
/// let output = interpolate(&c, &[[0, 2, 1]], 50.0)?;
/// println!("{}", output.summary());
/// assert!((output.max_displacement - 0.5).abs() < 1e-12);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug, Clone)]
pub struct MorphOutput {
    /// The morphed mesh, with the large mesh's topology.
    pub mesh: IndexedMesh,
    /// Morph percent this output was computed for.
    pub percent: f64,
    /// Bounds of the morphed vertices.
    pub bounds: Aabb,
    /// Largest distance of a morphed vertex from its large-mesh position.
    pub max_displacement: f64,
    /// Vertices with no incident non-degenerate face, left without a normal.
    pub vertices_without_normal: usize,
}

impl MorphOutput {
    /// Returns a summary of the step.
    #[must_use]
    pub fn summary(&self) -> String {
        let size = self.bounds.size();
        format!(
            "MorphOutput: {:.1}% blend, {} vertices, {} faces, max displacement: {:.6}, \
             bounds: {:.4} x {:.4} x {:.4}, vertices without normal: {}",
            self.percent,
            self.mesh.vertices.len(),
            self.mesh.faces.len(),
            self.max_displacement,
            size.x,
            size.y,
            size.z,
            self.vertices_without_normal
        )
    }
}
