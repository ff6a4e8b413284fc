//! Subdivision parameters.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Largest vertex count a `u32`-indexed mesh can address.
pub const MAX_INDEXABLE_VERTICES: usize = u32::MAX as usize;

/// Parameters for mesh subdivision.
///
/// For [`subdivide_mesh`](crate::subdivide_mesh) `iterations` is the exact
/// number of passes. For [`equalize_density`](crate::equalize_density) it is
/// the upper bound on passes.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SubdivideParams {
    /// Number of subdivision iterations.
    pub iterations: u32,

    /// Maximum faces allowed in result (prevents memory issues).
    pub max_faces: usize,

    /// Maximum vertices a pass may produce. Clamped to
    /// [`MAX_INDEXABLE_VERTICES`].
    pub max_vertices: usize,
}

impl Default for SubdivideParams {
    fn default() -> Self {
        Self {
            iterations: 1,
            max_faces: 10_000_000, // 10M faces max
            max_vertices: MAX_INDEXABLE_VERTICES,
        }
    }
}

impl SubdivideParams {
    /// Create new parameters with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set number of iterations.
    #[must_use]
    pub const fn with_iterations(mut self, iterations: u32) -> Self {
        self.iterations = iterations;
        self
    }

    /// Set maximum faces allowed.
    #[must_use]
    pub const fn with_max_faces(mut self, max_faces: usize) -> Self {
        self.max_faces = max_faces;
        self
    }

    /// Set maximum vertices allowed.
    #[must_use]
    pub const fn with_max_vertices(mut self, max_vertices: usize) -> Self {
        self.max_vertices = max_vertices;
        self
    }

    /// Vertex limit actually enforced: the configured one, never above what
    /// a `u32` index can address.
    #[must_use]
    pub const fn vertex_limit(&self) -> usize {
        if self.max_vertices < MAX_INDEXABLE_VERTICES {
            self.max_vertices
        } else {
            MAX_INDEXABLE_VERTICES
        }
    }

    /// Calculate expected face count after subdivision.
    ///
    /// Each subdivision iteration multiplies face count by 4. Saturates
    /// instead of overflowing.
    #[must_use]
    pub const fn expected_faces(&self, current_faces: usize) -> usize {
        let mut faces = current_faces;
        let mut i = 0;
        while i < self.iterations {
            faces = faces.saturating_mul(4);
            i += 1;
        }
        faces
    }
}
