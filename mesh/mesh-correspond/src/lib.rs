//! Vertex correspondence between meshes of different density.
//!
//! Given two vertex sets, every vertex of the larger set is assigned to
//! exactly one vertex of the smaller set, and every vertex of the smaller
//! set receives at least one. The result, a [`Correspondence`], is computed
//! once and then drives any number of interpolation steps.
//!
//! # Algorithm
//!
//! Matching runs over a dense distance matrix in two phases:
//!
//! 1. **Closest pairs**: the globally closest (large, small) pair is matched
//!    and both vertices are retired, once per small vertex.
//! 2. **Leftovers**: every remaining large vertex joins its nearest small
//!    vertex.
//!
//! Phase 1 is `O(n³)` in the worst case. Phase 2 can use a k-d tree via
//! [`NearestSearch::KdTree`].
//!
//! # Example
//!
//! ```
//! use mesh_correspond::{match_meshes, MatchParams};
//! use mesh_types::octahedron;
//!
//! let small = octahedron(1.0);
//! let large = mesh_subdivide::subdivide(&octahedron(2.0))?;
//!
//! let c = match_meshes(&small, &large, &MatchParams::default())?;
//! assert_eq!(c.group_count(), 6);
//! assert_eq!(c.large_vertex_count(), 18);
//! assert!(c.validate().is_ok());
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]

mod correspondence;
mod error;
mod matcher;
mod params;

pub use correspondence::{Correspondence, MatchGroup};
pub use error::{MatchError, MatchResult, MeshSide};
pub use matcher::{match_meshes, match_vertices};
pub use params::{MatchParams, NearestSearch};
