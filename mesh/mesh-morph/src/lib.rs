//! Linear morphing between two meshes of different density.
//!
//! A [`Correspondence`](mesh_correspond::Correspondence) maps every vertex of
//! the denser mesh onto a vertex of the sparser one. [`interpolate`] moves
//! each dense vertex along the segment between its sparse partner and its
//! own position, controlled by a percent:
//!
//! - `0` collapses the dense mesh onto the sparse vertex positions
//! - `100` reproduces the dense mesh exactly
//!
//! The output always carries the dense mesh's triangles, freshly computed
//! vertex normals and planar `(x, z)` texture coordinates.
//!
//! # Example
//!
//! ```
//! use mesh_morph::interpolate;
//! use mesh_correspond::{match_meshes, MatchParams};
//! use mesh_types::octahedron;
//!
//! let sparse = octahedron(1.0);
//! let dense = mesh_subdivide::subdivide(&octahedron(2.0))?;
//! let correspondence = match_meshes(&sparse, &dense, &MatchParams::default())?;
//!
//! // Compute the correspondence once, then blend as often as needed
//! for percent in [0.0, 25.0, 50.0, 100.0] {
//!     let output = interpolate(&correspondence, &dense.faces, percent)?;
//!     assert_eq!(output.mesh.faces.len(), 32);
//! }
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]

mod error;
mod morph;
mod normals;
mod result;

pub use error::{MorphError, MorphResult};
pub use morph::{FULL_PERCENT, interpolate};
pub use normals::compute_vertex_normals;
pub use result::MorphOutput;
