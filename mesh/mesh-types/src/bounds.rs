//! Axis-aligned bounding box.

use nalgebra::{Point3, Vector3};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// An axis-aligned bounding box (AABB).
///
/// # Example
///
/// ```
/// use mesh_types::{Aabb, Point3};
///
/// let aabb = Aabb::new(
///     Point3::new(0.0, 0.0, 0.0),
///     Point3::new(10.0, 10.0, 10.0),
/// );
///
/// assert_eq!(aabb.size(), Point3::new(10.0, 10.0, 10.0).coords);
/// assert!(aabb.contains(&Point3::new(5.0, 5.0, 5.0)));
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Aabb {
    /// Minimum corner (smallest x, y, z values).
    pub min: Point3<f64>,
    /// Maximum corner (largest x, y, z values).
    pub max: Point3<f64>,
}

impl Aabb {
    /// Create a new AABB from minimum and maximum corners.
    ///
    /// The corners are corrected if min > max for any axis.
    #[must_use]
    pub fn new(min: Point3<f64>, max: Point3<f64>) -> Self {
        Self {
            min: Point3::new(min.x.min(max.x), min.y.min(max.y), min.z.min(max.z)),
            max: Point3::new(min.x.max(max.x), min.y.max(max.y), min.z.max(max.z)),
        }
    }

    /// Create an empty (inverted) AABB, the identity for
    /// [`expand_to_include`](Self::expand_to_include).
    ///
    /// ```
    /// use mesh_types::{Aabb, Point3};
    ///
    /// let mut aabb = Aabb::empty();
    /// assert!(aabb.is_empty());
    ///
    /// aabb.expand_to_include(&Point3::new(1.0, 2.0, 3.0));
    /// assert!(!aabb.is_empty());
    /// ```
    #[must_use]
    #[allow(clippy::missing_const_for_fn)] // Point3::new is not const in nalgebra
    pub fn empty() -> Self {
        Self {
            min: Point3::new(f64::INFINITY, f64::INFINITY, f64::INFINITY),
            max: Point3::new(f64::NEG_INFINITY, f64::NEG_INFINITY, f64::NEG_INFINITY),
        }
    }

    /// Create an AABB from an iterator of points.
    ///
    /// Returns an empty AABB if the iterator is empty.
    #[must_use]
    pub fn from_points<'a>(points: impl Iterator<Item = &'a Point3<f64>>) -> Self {
        let mut aabb = Self::empty();
        for point in points {
            aabb.expand_to_include(point);
        }
        aabb
    }

    /// Check if the AABB is empty (min > max on some axis).
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.min.x > self.max.x || self.min.y > self.max.y || self.min.z > self.max.z
    }

    /// Get the width, height and depth.
    #[inline]
    #[must_use]
    pub fn size(&self) -> Vector3<f64> {
        self.max - self.min
    }

    /// Get the center of the AABB.
    #[inline]
    #[must_use]
    pub fn center(&self) -> Point3<f64> {
        nalgebra::center(&self.min, &self.max)
    }

    /// Check if the AABB contains a point. Boundary points are inside.
    #[inline]
    #[must_use]
    pub fn contains(&self, point: &Point3<f64>) -> bool {
        point.x >= self.min.x
            && point.x <= self.max.x
            && point.y >= self.min.y
            && point.y <= self.max.y
            && point.z >= self.min.z
            && point.z <= self.max.z
    }

    /// Grow the AABB so it contains `point`.
    #[inline]
    pub fn expand_to_include(&mut self, point: &Point3<f64>) {
        self.min = self.min.inf(point);
        self.max = self.max.sup(point);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_sorts_corners() {
        let aabb = Aabb::new(Point3::new(5.0, 0.0, 2.0), Point3::new(1.0, 3.0, -2.0));
        assert_eq!(aabb.min, Point3::new(1.0, 0.0, -2.0));
        assert_eq!(aabb.max, Point3::new(5.0, 3.0, 2.0));
    }

    #[test]
    fn from_points_covers_all() {
        let points = [
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(10.0, 5.0, 3.0),
            Point3::new(-2.0, 8.0, 1.0),
        ];
        let aabb = Aabb::from_points(points.iter());
        assert_eq!(aabb.min, Point3::new(-2.0, 0.0, 0.0));
        assert_eq!(aabb.max, Point3::new(10.0, 8.0, 3.0));
        assert!(points.iter().all(|p| aabb.contains(p)));
        assert_eq!(aabb.center(), Point3::new(4.0, 4.0, 1.5));
    }

    #[test]
    fn empty_stays_empty() {
        let aabb = Aabb::from_points(std::iter::empty());
        assert!(aabb.is_empty());
        assert!(!aabb.contains(&Point3::origin()));
    }
}
