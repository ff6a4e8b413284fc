//! Midpoint mesh subdivision.
//!
//! Every triangle is split into four by inserting one vertex at the midpoint
//! of each edge. Midpoints are shared between the faces on both sides of an
//! edge, so a pass over a mesh with `V` vertices, `E` distinct edges and `T`
//! faces yields exactly `V + E` vertices and `4T` faces.
//!
//! [`equalize_density`] repeats the pass until a mesh approaches a target
//! vertex count, which is how a sparse mesh is brought up to the density of
//! the mesh it will be blended with.
//!
//! # Examples
//!
//! ```
//! use mesh_types::{IndexedMesh, Vertex};
//! use mesh_subdivide::{subdivide_mesh, SubdivideParams};
//!
//! // Create a simple triangle mesh
//! let mut mesh = IndexedMesh::new();
//! mesh.vertices.push(Vertex::from_coords(0.0, 0.0, 0.0));
//! mesh.vertices.push(Vertex::from_coords(1.0, 0.0, 0.0));
//! mesh.vertices.push(Vertex::from_coords(0.5, 1.0, 0.0));
//! mesh.faces.push([0, 1, 2]);
//!
//! // Subdivide once (each triangle becomes 4)
//! let result = subdivide_mesh(&mesh, &SubdivideParams::new())?;
//!
//! assert_eq!(result.final_faces, 4);
//! assert_eq!(result.final_vertices, 6);
//! # Ok::<(), mesh_subdivide::SubdivideError>(())
//! ```

#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]

mod edge;
mod equalize;
mod error;
mod params;
mod result;
mod subdivide;

pub use edge::{EdgeKey, count_unique_edges};
pub use equalize::equalize_density;
pub use error::{SubdivideError, SubdivideResult};
pub use params::{MAX_INDEXABLE_VERTICES, SubdivideParams};
pub use result::SubdivisionResult;
pub use subdivide::{subdivide, subdivide_mesh};
