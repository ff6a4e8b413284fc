//! Correspondence between a small and a large vertex set.

use std::fmt;

use mesh_types::Point3;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{MatchError, MatchResult, MeshSide};

/// All large-mesh vertices mapped to one small-mesh vertex.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct MatchGroup {
    /// Position of the small-mesh vertex.
    pub parent: Point3<f64>,

    /// Index of the small-mesh vertex.
    pub parent_index: usize,

    /// Positions of the large-mesh vertices in this group.
    pub members: Vec<Point3<f64>>,

    /// Large-mesh vertex index of each member, parallel to `members`.
    pub slots: Vec<usize>,
}

impl MatchGroup {
    /// Create a group with no members yet.
    #[must_use]
    pub const fn new(parent: Point3<f64>, parent_index: usize) -> Self {
        Self {
            parent,
            parent_index,
            members: Vec::new(),
            slots: Vec::new(),
        }
    }

    /// Append a large-mesh vertex.
    pub fn push(&mut self, member: Point3<f64>, slot: usize) {
        self.members.push(member);
        self.slots.push(slot);
    }

    /// Number of members.
    #[must_use]
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Whether the group has no members.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Iterate `(member, slot)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (&Point3<f64>, usize)> {
        self.members.iter().zip(self.slots.iter().copied())
    }
}

/// Vertex correspondence produced by [`match_vertices`](crate::match_vertices).
///
/// There is one [`MatchGroup`] per small-mesh vertex, in small-mesh order.
/// Every large-mesh vertex index in `0..large_vertex_count` appears in
/// exactly one group's `slots`.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Correspondence {
    /// Groups, indexed by small-mesh vertex.
    pub groups: Vec<MatchGroup>,

    /// Number of vertices in the large mesh.
    pub large_vertex_count: usize,

    /// Which input was the large one.
    pub large_side: MeshSide,
}

impl Correspondence {
    /// Check that every group pairs each member with one slot and that every
    /// large-mesh slot is claimed exactly once.
    ///
    /// # Errors
    ///
    /// Returns [`MatchError::RaggedGroup`], [`MatchError::SlotOutOfBounds`],
    /// [`MatchError::DuplicateSlot`] or [`MatchError::MissingSlot`] for the
    /// first violation found.
    pub fn validate(&self) -> MatchResult<()> {
        if let Some((group, g)) = self
            .groups
            .iter()
            .enumerate()
            .find(|(_, g)| g.members.len() != g.slots.len())
        {
            return Err(MatchError::RaggedGroup {
                group,
                members: g.members.len(),
                slots: g.slots.len(),
            });
        }

        let mut seen = vec![false; self.large_vertex_count];
        for group in &self.groups {
            for &slot in &group.slots {
                let Some(claimed) = seen.get_mut(slot) else {
                    return Err(MatchError::SlotOutOfBounds {
                        slot,
                        large_vertex_count: self.large_vertex_count,
                    });
                };
                if *claimed {
                    return Err(MatchError::DuplicateSlot { slot });
                }
                *claimed = true;
            }
        }
        match seen.iter().position(|&claimed| !claimed) {
            Some(slot) => Err(MatchError::MissingSlot { slot }),
            None => Ok(()),
        }
    }

    /// Number of groups (the small-mesh vertex count).
    #[must_use]
    pub fn group_count(&self) -> usize {
        self.groups.len()
    }

    /// Number of large-mesh vertices.
    #[must_use]
    pub const fn large_vertex_count(&self) -> usize {
        self.large_vertex_count
    }

    /// Which input was the large one.
    #[must_use]
    pub const fn large_side(&self) -> MeshSide {
        self.large_side
    }

    /// Small-mesh parent index of every large-mesh vertex.
    ///
    /// Slots not claimed by any group (only possible in a hand-built,
    /// invalid correspondence) map to `None`.
    #[must_use]
    pub fn slot_parents(&self) -> Vec<Option<usize>> {
        let mut parents = vec![None; self.large_vertex_count];
        for group in &self.groups {
            for &slot in &group.slots {
                if let Some(parent) = parents.get_mut(slot) {
                    *parent = Some(group.parent_index);
                }
            }
        }
        parents
    }

    /// Size of the largest group.
    #[must_use]
    pub fn max_group_size(&self) -> usize {
        self.groups.iter().map(MatchGroup::len).max().unwrap_or(0)
    }
}

impl fmt::Display for Correspondence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Correspondence: {} large ({}) vertices onto {} groups, largest group {}",
            self.large_vertex_count,
            self.large_side,
            self.groups.len(),
            self.max_group_size()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_correspondence() -> Correspondence {
        let mut g0 = MatchGroup::new(Point3::origin(), 0);
        g0.push(Point3::new(0.0, 0.0, 1.0), 0);
        let mut g1 = MatchGroup::new(Point3::new(2.0, 0.0, 0.0), 1);
        g1.push(Point3::new(1.0, 0.0, 0.0), 1);
        g1.push(Point3::new(2.0, 0.0, 1.0), 2);
        Correspondence {
            groups: vec![g0, g1],
            large_vertex_count: 3,
            large_side: MeshSide::Second,
        }
    }

    #[test]
    fn test_valid_correspondence() {
        let c = make_correspondence();
        assert!(c.validate().is_ok());
        assert_eq!(c.group_count(), 2);
        assert_eq!(c.large_vertex_count(), 3);
        assert_eq!(c.max_group_size(), 2);
        assert_eq!(c.slot_parents(), vec![Some(0), Some(1), Some(1)]);
    }

    #[test]
    fn test_duplicate_slot() {
        let mut c = make_correspondence();
        c.groups[0].push(Point3::origin(), 2);
        assert_eq!(c.validate(), Err(MatchError::DuplicateSlot { slot: 2 }));
    }

    #[test]
    fn test_missing_slot() {
        let mut c = make_correspondence();
        c.large_vertex_count = 4;
        assert_eq!(c.validate(), Err(MatchError::MissingSlot { slot: 3 }));
        assert_eq!(c.slot_parents()[3], None);
    }

    #[test]
    fn test_slot_out_of_bounds() {
        let mut c = make_correspondence();
        c.groups[1].slots[1] = 9;
        assert_eq!(
            c.validate(),
            Err(MatchError::SlotOutOfBounds {
                slot: 9,
                large_vertex_count: 3
            })
        );
    }

    #[test]
    fn test_ragged_group() {
        let mut c = make_correspondence();
        c.groups[1].members.pop();
        assert_eq!(
            c.validate(),
            Err(MatchError::RaggedGroup {
                group: 1,
                members: 1,
                slots: 2
            })
        );

        // Extra positions are rejected too
        let mut c = make_correspondence();
        c.groups[0].members.push(Point3::origin());
        assert!(matches!(
            c.validate(),
            Err(MatchError::RaggedGroup { group: 0, .. })
        ));
    }

    #[test]
    fn test_group_iter() {
        let c = make_correspondence();
        let pairs: Vec<_> = c.groups[1].iter().map(|(_, slot)| slot).collect();
        assert_eq!(pairs, vec![1, 2]);
        assert!(!c.groups[0].is_empty());
    }

    #[test]
    fn test_display() {
        let display = format!("{}", make_correspondence());
        assert!(display.contains("3 large (second)"));
        assert!(display.contains("2 groups"));
    }
}
