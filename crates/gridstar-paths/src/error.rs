use std::fmt;

use gridstar_core::Coord;

/// Reasons a search is rejected before it starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    /// No start cell was given.
    MissingStart,
    /// No goal cell was given.
    MissingGoal,
    /// The grid has dimension 0.
    EmptyGrid,
    StartOutOfBounds(Coord),
    GoalOutOfBounds(Coord),
    StartIsBarrier(Coord),
    GoalIsBarrier(Coord),
    /// Adjacency was never derived, or barriers changed since it was.
    /// Call `compute_neighbors` before searching.
    StaleNeighbors,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingStart => write!(f, "no start cell"),
            Self::MissingGoal => write!(f, "no goal cell"),
            Self::EmptyGrid => write!(f, "grid has no cells"),
            Self::StartOutOfBounds(c) => write!(f, "start {c} is outside the grid"),
            Self::GoalOutOfBounds(c) => write!(f, "goal {c} is outside the grid"),
            Self::StartIsBarrier(c) => write!(f, "start {c} is a barrier"),
            Self::GoalIsBarrier(c) => write!(f, "goal {c} is a barrier"),
            Self::StaleNeighbors => write!(
                f,
                "neighbours are missing or out of date; call compute_neighbors first"
            ),
        }
    }
}

impl std::error::Error for ConfigError {}
