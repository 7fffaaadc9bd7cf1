//! The [`Cell`] type: a grid position and its barrier flag.

use crate::geom::Coord;

/// A single grid cell.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Cell {
    pub pos: Coord,
    pub barrier: bool,
}

impl Cell {
    /// A free (traversable) cell at `pos`.
    #[inline]
    pub const fn free(pos: Coord) -> Self {
        Self {
            pos,
            barrier: false,
        }
    }

    /// Set the barrier flag (builder).
    #[inline]
    pub const fn with_barrier(mut self, barrier: bool) -> Self {
        self.barrier = barrier;
        self
    }

    /// Whether the cell can be stepped on.
    #[inline]
    pub const fn is_passable(&self) -> bool {
        !self.barrier
    }
}
