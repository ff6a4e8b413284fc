//! Blend between two triangle meshes of different density.
//!
//! This umbrella crate re-exports the mesh-* crates that make up the blend
//! pipeline and adds [`MorphPipeline`], which ties them together:
//!
//! 1. validate both meshes
//! 2. optionally subdivide the sparser mesh towards the denser one
//! 3. match vertices once
//! 4. interpolate as often as the caller likes
//!
//! # Quick Start
//!
//! ```
//! use mesh_blend::prelude::*;
//!
//! let sparse = octahedron(1.0);
//! let dense = subdivide(&octahedron(2.0))?;
//!
//! let pipeline = MorphPipeline::new(&sparse, &dense, &BlendParams::default())?;
//! for percent in [0.0, 50.0, 100.0] {
//!     let output = pipeline.morph(percent)?;
//!     println!("{}", output.summary());
//! }
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! # Module Organization
//!
//! - [`types`] - Core data structures: `IndexedMesh`, `Vertex`, `Aabb`
//! - [`subdivide`] - Midpoint subdivision and density equalization
//! - [`correspond`] - Two-phase vertex matching
//! - [`morph`] - Linear interpolation over a correspondence
//!
//! # Feature Flags
//!
//! - `serde` - Serialize parameters, correspondences and mesh types

// Safety: Deny unwrap/expect in library code. Tests may use them (workspace warns).
#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]

mod error;
mod params;
mod pipeline;

pub use error::{BlendError, BlendResult};
pub use params::BlendParams;
pub use pipeline::MorphPipeline;

// =============================================================================
// Re-exports
// =============================================================================

/// Core data structures: `IndexedMesh`, `Vertex`, `Aabb`.
pub use mesh_types as types;

/// Midpoint subdivision and density equalization.
pub use mesh_subdivide as subdivide;

/// Two-phase vertex matching.
pub use mesh_correspond as correspond;

/// Linear interpolation over a correspondence.
pub use mesh_morph as morph;

// =============================================================================
// Prelude
// =============================================================================

/// Common imports for mesh blending.
///
/// # Usage
///
/// ```
/// use mesh_blend::prelude::*;
/// ```
pub mod prelude {
    // Core types
    pub use mesh_types::{
        Aabb, IndexedMesh, MeshBounds, MeshTopology, Point3, Vector3, Vertex, octahedron,
    };

    // Subdivision
    pub use mesh_subdivide::{SubdivideParams, equalize_density, subdivide, subdivide_mesh};

    // Matching
    pub use mesh_correspond::{Correspondence, MatchParams, NearestSearch, match_meshes, match_vertices};

    // Morphing
    pub use mesh_morph::{MorphOutput, interpolate};

    // Pipeline
    pub use crate::{BlendError, BlendParams, MorphPipeline};
}

// =============================================================================
// Tests
// =============================================================================
