//! Observational per-cell markers for one search run.
//!
//! Nothing here affects correctness. The markers exist so that a renderer
//! can show what the driver is doing; the barrier set lives on the grid.

use gridstar_core::{Coord, Grid};

/// What a cell looks like to an observer.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Mark {
    /// Not touched by this run.
    #[default]
    Empty,
    Start,
    Goal,
    /// Has a pending frontier ticket.
    Open,
    /// Expanded at least once. A closed cell can still be improved and
    /// expanded again.
    Closed,
    /// On the reconstructed path.
    Path,
}

/// Markers for every cell of a grid, indexed like the grid.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SearchState {
    size: usize,
    marks: Vec<Mark>,
}

impl SearchState {
    /// All-empty state sized for `grid`.
    pub fn new(grid: &Grid) -> Self {
        Self {
            size: grid.size(),
            marks: vec![Mark::Empty; grid.len()],
        }
    }

    /// Marker at `c`; [`Mark::Empty`] outside the grid.
    pub fn at(&self, c: Coord) -> Mark {
        let n = self.size as i64;
        if !(0..n).contains(&(c.row as i64)) || !(0..n).contains(&(c.col as i64)) {
            return Mark::Empty;
        }
        self.marks[c.row as usize * self.size + c.col as usize]
    }

    #[inline]
    pub(crate) fn get(&self, idx: usize) -> Mark {
        self.marks[idx]
    }

    /// Set the marker at `idx`. Start and goal markers are never
    /// overwritten.
    pub(crate) fn set(&mut self, idx: usize, mark: Mark) {
        let slot = &mut self.marks[idx];
        if !matches!(*slot, Mark::Start | Mark::Goal) {
            *slot = mark;
        }
    }

    /// Number of cells carrying `mark`.
    pub fn count(&self, mark: Mark) -> usize {
        self.marks.iter().filter(|&&m| m == mark).count()
    }

    /// Iterate over `(coord, mark)` in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = (Coord, Mark)> + '_ {
        let size = self.size;
        self.marks.iter().enumerate().map(move |(i, &m)| {
            (Coord::new((i / size) as i32, (i % size) as i32), m)
        })
    }
}
