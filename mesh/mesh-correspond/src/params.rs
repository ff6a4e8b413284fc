//! Matching parameters.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// How unmatched large-mesh vertices find their nearest small-mesh vertex.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum NearestSearch {
    /// Linear scan over the small mesh. Ties go to the lowest index.
    #[default]
    BruteForce,

    /// k-d tree query. Same distances as [`NearestSearch::BruteForce`], but
    /// which of several equidistant vertices wins is unspecified.
    ///
    /// Small meshes with 32 or more vertices sharing a coordinate on one
    /// axis cannot be bucketed and are scanned linearly instead.
    KdTree,
}

/// Parameters for [`match_vertices`](crate::match_vertices).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct MatchParams {
    /// Nearest-vertex strategy for the second matching phase.
    pub nearest: NearestSearch,
}

impl MatchParams {
    /// Create new parameters with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parameters using a k-d tree for nearest-vertex queries.
    #[must_use]
    pub const fn kd_tree() -> Self {
        Self {
            nearest: NearestSearch::KdTree,
        }
    }

    /// Set the nearest-vertex strategy.
    #[must_use]
    pub const fn with_nearest(mut self, nearest: NearestSearch) -> Self {
        self.nearest = nearest;
        self
    }
}
