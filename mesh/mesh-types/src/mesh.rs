//! Indexed triangle mesh.

use crate::{Aabb, MeshBounds, MeshError, MeshResult, MeshTopology, Triangle, Vertex};
use nalgebra::{Point3, Vector3};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// An indexed triangle mesh.
///
/// Stores vertices and faces separately, with faces referencing vertices by
/// index. The vertex index is the vertex id: reordering `vertices` changes the
/// meaning of every face that references them.
///
/// # Memory Layout
///
/// - `vertices`: `Vec<Vertex>` - Vertex positions and attributes
/// - `faces`: `Vec<[u32; 3]>` - Triangle faces as vertex indices
///
/// # Example
///
/// ```
/// use mesh_types::{IndexedMesh, Vertex, MeshTopology};
///
/// let mut mesh = IndexedMesh::new();
/// mesh.vertices.push(Vertex::from_coords(0.0, 0.0, 0.0));
/// mesh.vertices.push(Vertex::from_coords(1.0, 0.0, 0.0));
/// mesh.vertices.push(Vertex::from_coords(0.0, 1.0, 0.0));
/// mesh.faces.push([0, 1, 2]);
///
/// assert_eq!(mesh.vertex_count(), 3);
/// assert_eq!(mesh.face_count(), 1);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct IndexedMesh {
    /// Vertex data.
    pub vertices: Vec<Vertex>,

    /// Triangle faces as indices into the vertex array.
    /// Each face is `[v0, v1, v2]` with counter-clockwise winding.
    pub faces: Vec<[u32; 3]>,
}

/// Flat, engine-style buffers for a mesh.
///
/// Produced by [`IndexedMesh::to_raw`]. `normals` and `uvs` are present only
/// when every vertex carries the attribute.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct RawMesh {
    /// `[x0, y0, z0, x1, y1, z1, ...]`
    pub positions: Vec<f64>,
    /// `[nx0, ny0, nz0, ...]`
    pub normals: Option<Vec<f64>>,
    /// `[u0, v0, u1, v1, ...]`
    pub uvs: Option<Vec<f32>>,
    /// `[a0, b0, c0, a1, b1, c1, ...]`
    pub indices: Vec<u32>,
}

impl IndexedMesh {
    /// Create a new empty mesh.
    #[inline]
    #[must_use]
    pub const fn new() -> Self {
        Self {
            vertices: Vec::new(),
            faces: Vec::new(),
        }
    }

    /// Create a mesh with pre-allocated capacity.
    #[inline]
    #[must_use]
    pub fn with_capacity(vertex_count: usize, face_count: usize) -> Self {
        Self {
            vertices: Vec::with_capacity(vertex_count),
            faces: Vec::with_capacity(face_count),
        }
    }

    /// Create a mesh from vertices and faces.
    ///
    /// No validation is performed; call [`validate`](Self::validate) before
    /// handing the mesh to an algorithm that relies on in-range indices.
    #[inline]
    #[must_use]
    pub const fn from_parts(vertices: Vec<Vertex>, faces: Vec<[u32; 3]>) -> Self {
        Self { vertices, faces }
    }

    /// Create a validated mesh from flat coordinate, normal and index buffers.
    ///
    /// # Arguments
    ///
    /// * `positions` - `[x0, y0, z0, x1, y1, z1, ...]`
    /// * `normals` - Optional buffer with the same layout, one normal per vertex
    /// * `indices` - `[a0, b0, c0, a1, b1, c1, ...]`
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - `positions.len()` or `indices.len()` is not a multiple of 3
    /// - `normals` is present but holds a different number of vectors
    /// - `indices` is empty
    /// - any index is out of range
    ///
    /// # Example
    ///
    /// ```
    /// use mesh_types::{IndexedMesh, MeshError, MeshTopology};
    ///
    /// let positions = [0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0, 0.0];
    ///
    /// let mesh = IndexedMesh::try_from_raw(&positions, None, &[0, 1, 2])?;
    /// assert_eq!(mesh.vertex_count(), 3);
    ///
    /// let err = IndexedMesh::try_from_raw(&positions, None, &[0, 1]).unwrap_err();
    /// assert_eq!(err, MeshError::MalformedIndexBuffer { len: 2 });
    /// # Ok::<(), MeshError>(())
    /// ```
    pub fn try_from_raw(
        positions: &[f64],
        normals: Option<&[f64]>,
        indices: &[u32],
    ) -> MeshResult<Self> {
        if positions.len() % 3 != 0 {
            return Err(MeshError::MalformedPositionBuffer {
                len: positions.len(),
            });
        }
        if indices.len() % 3 != 0 {
            return Err(MeshError::MalformedIndexBuffer { len: indices.len() });
        }

        let vertex_count = positions.len() / 3;
        if let Some(normals) = normals {
            if normals.len() != positions.len() {
                return Err(MeshError::NormalCountMismatch {
                    normals: normals.len() / 3,
                    vertices: vertex_count,
                });
            }
        }

        let vertices = positions
            .chunks_exact(3)
            .enumerate()
            .map(|(i, c)| {
                let position = Point3::new(c[0], c[1], c[2]);
                match normals {
                    Some(n) => Vertex::with_normal(
                        position,
                        Vector3::new(n[i * 3], n[i * 3 + 1], n[i * 3 + 2]),
                    ),
                    None => Vertex::new(position),
                }
            })
            .collect();

        let faces = indices
            .chunks_exact(3)
            .map(|c| [c[0], c[1], c[2]])
            .collect();

        let mesh = Self { vertices, faces };
        mesh.validate()?;
        Ok(mesh)
    }

    /// Flatten the mesh into engine-style buffers.
    ///
    /// # Example
    ///
    /// ```
    /// use mesh_types::{IndexedMesh, Vertex};
    ///
    /// let mesh = IndexedMesh::from_parts(
    ///     vec![
    ///         Vertex::from_coords(0.0, 0.0, 0.0),
    ///         Vertex::from_coords(1.0, 0.0, 0.0),
    ///         Vertex::from_coords(0.0, 1.0, 0.0),
    ///     ],
    ///     vec![[0, 1, 2]],
    /// );
    ///
    /// let raw = mesh.to_raw();
    /// assert_eq!(raw.positions.len(), 9);
    /// assert_eq!(raw.indices, vec![0, 1, 2]);
    /// assert!(raw.normals.is_none());
    /// ```
    #[must_use]
    pub fn to_raw(&self) -> RawMesh {
        let positions = self
            .vertices
            .iter()
            .flat_map(|v| [v.position.x, v.position.y, v.position.z])
            .collect();

        let normals = self
            .vertices
            .iter()
            .map(|v| v.attributes.normal.map(|n| [n.x, n.y, n.z]))
            .collect::<Option<Vec<_>>>()
            .map(|n| n.into_iter().flatten().collect());

        let uvs = self
            .vertices
            .iter()
            .map(|v| v.attributes.uv.map(|(u, v)| [u, v]))
            .collect::<Option<Vec<_>>>()
            .map(|uv| uv.into_iter().flatten().collect());

        let indices = self.faces.iter().flatten().copied().collect();

        RawMesh {
            positions,
            normals,
            uvs,
            indices,
        }
    }

    /// Check the indexed-triangle invariant.
    ///
    /// A valid mesh has at least one face and every face index addresses an
    /// existing vertex.
    ///
    /// # Errors
    ///
    /// Returns [`MeshError::NoFaces`] for a face-less mesh and
    /// [`MeshError::FaceIndexOutOfBounds`] for the first offending index.
    pub fn validate(&self) -> MeshResult<()> {
        if self.faces.is_empty() {
            return Err(MeshError::NoFaces);
        }
        validate_faces(&self.faces, self.vertices.len())
    }

    /// Whether every vertex carries a normal.
    ///
    /// An empty mesh has no normals.
    #[must_use]
    pub fn has_normals(&self) -> bool {
        !self.vertices.is_empty() && self.vertices.iter().all(|v| v.attributes.normal.is_some())
    }

    /// Collect vertex positions in vertex-id order.
    #[must_use]
    pub fn positions(&self) -> Vec<Point3<f64>> {
        self.vertices.iter().map(|v| v.position).collect()
    }

    /// Clear all vertex normals.
    pub fn clear_normals(&mut self) {
        for vertex in &mut self.vertices {
            vertex.attributes.normal = None;
        }
    }
}

/// Check that every face index is below `vertex_count`.
///
/// Shared by [`IndexedMesh::validate`] and callers that hold a face list
/// without its vertices (for example, a cached topology).
///
/// # Errors
///
/// Returns [`MeshError::FaceIndexOutOfBounds`] for the first offending index.
pub fn validate_faces(faces: &[[u32; 3]], vertex_count: usize) -> MeshResult<()> {
    for (face, indices) in faces.iter().enumerate() {
        if let Some(&index) = indices.iter().find(|&&i| i as usize >= vertex_count) {
            return Err(MeshError::FaceIndexOutOfBounds {
                face,
                index,
                vertex_count,
            });
        }
    }
    Ok(())
}

impl MeshTopology for IndexedMesh {
    #[inline]
    fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    #[inline]
    fn face_count(&self) -> usize {
        self.faces.len()
    }

    fn vertex(&self, index: usize) -> Option<&Vertex> {
        self.vertices.get(index)
    }

    fn face(&self, index: usize) -> Option<[u32; 3]> {
        self.faces.get(index).copied()
    }

    fn triangle(&self, face_index: usize) -> Option<Triangle> {
        let [i0, i1, i2] = *self.faces.get(face_index)?;
        Some(Triangle {
            v0: self.vertices.get(i0 as usize)?.position,
            v1: self.vertices.get(i1 as usize)?.position,
            v2: self.vertices.get(i2 as usize)?.position,
        })
    }

    fn triangles(&self) -> impl Iterator<Item = Triangle> {
        (0..self.faces.len()).filter_map(|i| self.triangle(i))
    }
}

impl MeshBounds for IndexedMesh {
    fn bounds(&self) -> Aabb {
        if self.vertices.is_empty() {
            return Aabb::empty();
        }

        Aabb::from_points(self.vertices.iter().map(|v| &v.position))
    }
}

/// Create an octahedron centered on the origin.
///
/// Six vertices on the axes at distance `radius`, eight outward-facing
/// triangles, and outward unit normals on every vertex. Handy as a coarse
/// morph source: one midpoint pass yields 18 vertices and 32 faces.
///
/// # Example
///
/// ```
/// use mesh_types::{octahedron, MeshTopology};
///
/// let mesh = octahedron(1.0);
/// assert_eq!(mesh.vertex_count(), 6);
/// assert_eq!(mesh.face_count(), 8);
/// assert!(mesh.has_normals());
/// ```
#[must_use]
pub fn octahedron(radius: f64) -> IndexedMesh {
    let axes = [
        Vector3::new(1.0, 0.0, 0.0),
        Vector3::new(-1.0, 0.0, 0.0),
        Vector3::new(0.0, 1.0, 0.0),
        Vector3::new(0.0, -1.0, 0.0),
        Vector3::new(0.0, 0.0, 1.0),
        Vector3::new(0.0, 0.0, -1.0),
    ];

    let vertices = axes
        .iter()
        .map(|axis| Vertex::with_normal(Point3::from(axis * radius), *axis))
        .collect();

    // +X=0 -X=1 +Y=2 -Y=3 +Z=4 -Z=5, CCW seen from outside
    let faces = vec![
        [0, 2, 4],
        [2, 1, 4],
        [1, 3, 4],
        [3, 0, 4],
        [2, 0, 5],
        [1, 2, 5],
        [3, 1, 5],
        [0, 3, 5],
    ];

    IndexedMesh { vertices, faces }
}
