//! Error types for vertex matching.

use std::fmt;

use thiserror::Error;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Which of the two inputs an error or a result refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum MeshSide {
    /// The first argument of the call.
    First,
    /// The second argument of the call.
    Second,
}

impl fmt::Display for MeshSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::First => write!(f, "first"),
            Self::Second => write!(f, "second"),
        }
    }
}

/// Errors that can occur while matching vertices.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MatchError {
    /// One input has no vertices.
    #[error("{side} mesh has no vertices")]
    EmptyMesh {
        /// The empty input.
        side: MeshSide,
    },

    /// A vertex position has a NaN or infinite coordinate.
    #[error("{side} mesh vertex {index} has a non-finite position")]
    NonFinitePosition {
        /// Input holding the vertex.
        side: MeshSide,
        /// Offending vertex.
        index: usize,
    },

    /// A large-mesh slot is claimed by more than one member.
    #[error("slot {slot} is assigned more than once")]
    DuplicateSlot {
        /// The repeated slot.
        slot: usize,
    },

    /// A large-mesh slot is not claimed by any member.
    #[error("slot {slot} is not assigned to any group")]
    MissingSlot {
        /// The first unclaimed slot.
        slot: usize,
    },

    /// A group has a different number of member positions and slots.
    #[error("group {group} has {members} members but {slots} slots")]
    RaggedGroup {
        /// Index of the group.
        group: usize,
        /// Length of `members`.
        members: usize,
        /// Length of `slots`.
        slots: usize,
    },

    /// A slot lies outside the large mesh.
    #[error("slot {slot} out of bounds for {large_vertex_count} large-mesh vertices")]
    SlotOutOfBounds {
        /// The offending slot.
        slot: usize,
        /// Number of vertices in the large mesh.
        large_vertex_count: usize,
    },
}

/// Result type for matching operations.
pub type MatchResult<T> = Result<T, MatchError>;
