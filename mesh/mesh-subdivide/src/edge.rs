//! Undirected edge keys.

use hashbrown::HashSet;
use mesh_types::IndexedMesh;

/// An undirected edge between two vertex ids.
///
/// Both endpoints are stored at full `u32` width with `lo <= hi`, so
/// `EdgeKey::new(a, b) == EdgeKey::new(b, a)` and both hash identically.
/// No index range is aliased.
///
/// # Example
///
/// ```
/// use mesh_subdivide::EdgeKey;
///
/// assert_eq!(EdgeKey::new(7, 3), EdgeKey::new(3, 7));
/// assert_ne!(EdgeKey::new(0, 65_536), EdgeKey::new(0, 0));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EdgeKey {
    lo: u32,
    hi: u32,
}

impl EdgeKey {
    /// Create the canonical key for the edge between `a` and `b`.
    #[inline]
    #[must_use]
    pub const fn new(a: u32, b: u32) -> Self {
        if a <= b { Self { lo: a, hi: b } } else { Self { lo: b, hi: a } }
    }

    /// Smaller endpoint.
    #[inline]
    #[must_use]
    pub const fn lo(&self) -> u32 {
        self.lo
    }

    /// Larger endpoint.
    #[inline]
    #[must_use]
    pub const fn hi(&self) -> u32 {
        self.hi
    }
}

/// Count the distinct undirected edges referenced by the faces of `mesh`.
///
/// This is exactly the number of vertices one midpoint pass adds.
///
/// ```
/// use mesh_subdivide::count_unique_edges;
/// use mesh_types::octahedron;
///
/// assert_eq!(count_unique_edges(&octahedron(1.0)), 12);
/// ```
#[must_use]
pub fn count_unique_edges(mesh: &IndexedMesh) -> usize {
    let mut edges: HashSet<EdgeKey> = HashSet::with_capacity(mesh.faces.len() * 3 / 2);
    for &[a, b, c] in &mesh.faces {
        edges.insert(EdgeKey::new(a, b));
        edges.insert(EdgeKey::new(b, c));
        edges.insert(EdgeKey::new(c, a));
    }
    edges.len()
}
