//! Vertex types and attributes.

use nalgebra::{Point3, Vector3};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Optional attributes that can be attached to a vertex.
///
/// - `normal`: supplied by the caller, interpolated by subdivision, or
///   recomputed from adjacent faces after morphing
/// - `uv`: texture coordinates, produced by planar projection after morphing
#[derive(Debug, Clone, Copy, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct VertexAttributes {
    /// Per-vertex normal. Usually unit length.
    pub normal: Option<Vector3<f64>>,

    /// Texture coordinates (U, V).
    pub uv: Option<(f32, f32)>,
}

impl VertexAttributes {
    /// Create empty attributes with no values set.
    #[inline]
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            normal: None,
            uv: None,
        }
    }

    /// Create attributes with just a normal.
    #[inline]
    #[must_use]
    pub const fn with_normal(normal: Vector3<f64>) -> Self {
        Self {
            normal: Some(normal),
            uv: None,
        }
    }

    /// Check if any attributes are set.
    #[inline]
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.normal.is_none() && self.uv.is_none()
    }
}

/// A vertex in 3D space with optional attributes.
///
/// # Example
///
/// ```
/// use mesh_types::{Vertex, Point3};
///
/// let v1 = Vertex::new(Point3::new(1.0, 2.0, 3.0));
/// let v2 = Vertex::from_coords(1.0, 2.0, 3.0);
///
/// assert_eq!(v1.position, v2.position);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Vertex {
    /// 3D position.
    pub position: Point3<f64>,

    /// Optional attributes (normal, UV).
    pub attributes: VertexAttributes,
}

impl Vertex {
    /// Create a new vertex with only position set.
    #[inline]
    #[must_use]
    pub const fn new(position: Point3<f64>) -> Self {
        Self {
            position,
            attributes: VertexAttributes::empty(),
        }
    }

    /// Create a vertex from raw coordinates.
    ///
    /// # Example
    ///
    /// ```
    /// use mesh_types::Vertex;
    ///
    /// let v = Vertex::from_coords(1.0, 2.0, 3.0);
    /// assert_eq!(v.position.z, 3.0);
    /// ```
    #[inline]
    #[must_use]
    #[allow(clippy::missing_const_for_fn)] // Point3::new is not const in nalgebra
    pub fn from_coords(x: f64, y: f64, z: f64) -> Self {
        Self::new(Point3::new(x, y, z))
    }

    /// Create a vertex with position and normal.
    ///
    /// # Example
    ///
    /// ```
    /// use mesh_types::{Vertex, Point3, Vector3};
    ///
    /// let v = Vertex::with_normal(Point3::origin(), Vector3::z());
    /// assert!(v.normal().is_some());
    /// ```
    #[inline]
    #[must_use]
    pub const fn with_normal(position: Point3<f64>, normal: Vector3<f64>) -> Self {
        Self {
            position,
            attributes: VertexAttributes::with_normal(normal),
        }
    }

    /// Get the normal if set.
    #[inline]
    #[must_use]
    pub const fn normal(&self) -> Option<Vector3<f64>> {
        self.attributes.normal
    }

    /// Get the texture coordinates if set.
    #[inline]
    #[must_use]
    pub const fn uv(&self) -> Option<(f32, f32)> {
        self.attributes.uv
    }
}

impl From<Point3<f64>> for Vertex {
    fn from(position: Point3<f64>) -> Self {
        Self::new(position)
    }
}

impl From<[f64; 3]> for Vertex {
    fn from([x, y, z]: [f64; 3]) -> Self {
        Self::from_coords(x, y, z)
    }
}

impl From<(f64, f64, f64)> for Vertex {
    fn from((x, y, z): (f64, f64, f64)) -> Self {
        Self::from_coords(x, y, z)
    }
}
