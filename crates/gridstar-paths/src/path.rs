use gridstar_core::{Coord, Grid};

use crate::score::{Cost, PredecessorMap};

/// An ordered sequence of cells from start to goal, both included.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Path {
    cells: Vec<Coord>,
}

impl Path {
    /// The cells, start first.
    #[inline]
    pub fn cells(&self) -> &[Coord] {
        &self.cells
    }

    /// Number of cells (cost + 1).
    #[inline]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Always `false` for a path produced by search.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Number of unit steps.
    #[inline]
    pub fn cost(&self) -> Cost {
        self.cells.len().saturating_sub(1) as Cost
    }

    pub fn start(&self) -> Option<Coord> {
        self.cells.first().copied()
    }

    pub fn goal(&self) -> Option<Coord> {
        self.cells.last().copied()
    }

    pub fn contains(&self, c: Coord) -> bool {
        self.cells.contains(&c)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Coord> {
        self.cells.iter()
    }

    pub fn into_vec(self) -> Vec<Coord> {
        self.cells
    }
}

impl<'a> IntoIterator for &'a Path {
    type Item = &'a Coord;
    type IntoIter = std::slice::Iter<'a, Coord>;

    fn into_iter(self) -> Self::IntoIter {
        self.cells.iter()
    }
}

/// Walk the predecessor map back from `goal` and return the path in
/// start-to-goal order. The walk stops at the first cell without a
/// predecessor, which must be `start`.
pub(crate) fn reconstruct(
    grid: &Grid,
    preds: &PredecessorMap,
    start: usize,
    goal: usize,
) -> Path {
    let mut cells = vec![grid.coord(goal)];
    let mut current = goal;
    while let Some(parent) = preds.get(current) {
        cells.push(grid.coord(parent));
        current = parent;
    }
    debug_assert_eq!(current, start, "predecessor chain does not reach the start");
    cells.reverse();
    Path { cells }
}
