//! Core mesh types for mesh blending.
//!
//! This crate provides the foundational types shared by every stage of the
//! morphing pipeline:
//!
//! - [`Vertex`] - A point in 3D space with optional normal and UV
//! - [`IndexedMesh`] - A triangle mesh with indexed vertices
//! - [`Triangle`] - A concrete triangle with vertex positions
//! - [`Aabb`] - Axis-aligned bounding box
//! - [`MeshError`] - Validation failures for malformed meshes
//!
//! # Raw Buffers
//!
//! Rendering engines usually hand meshes over as flat arrays. Use
//! [`IndexedMesh::try_from_raw`] to build a validated mesh from them and
//! [`IndexedMesh::to_raw`] to flatten a result back out.
//!
//! # Winding
//!
//! Face winding is **counter-clockwise (CCW) when viewed from outside**.
//! Normals point outward by the right-hand rule.
//!
//! # Example
//!
//! ```
//! use mesh_types::{Vertex, IndexedMesh, Point3, MeshTopology};
//!
//! let mut mesh = IndexedMesh::new();
//! mesh.vertices.push(Vertex::new(Point3::new(0.0, 0.0, 0.0)));
//! mesh.vertices.push(Vertex::new(Point3::new(1.0, 0.0, 0.0)));
//! mesh.vertices.push(Vertex::new(Point3::new(0.5, 1.0, 0.0)));
//! mesh.faces.push([0, 1, 2]);
//!
//! assert_eq!(mesh.face_count(), 1);
//! assert!(mesh.validate().is_ok());
//! ```

#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]

mod bounds;
mod error;
mod mesh;
mod traits;
mod triangle;
mod vertex;

pub use bounds::Aabb;
pub use error::{MeshError, MeshResult};
pub use mesh::{IndexedMesh, RawMesh, octahedron, validate_faces};
pub use traits::{MeshBounds, MeshTopology};
pub use triangle::Triangle;
pub use vertex::{Vertex, VertexAttributes};

// Re-export nalgebra types for convenience
pub use nalgebra::{Point3, Vector3};
