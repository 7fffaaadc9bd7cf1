//! A square grid of [`Cell`]s with a barrier set and derived adjacency.
//!
//! The grid owns every cell. Barrier edits bump a revision counter and drop
//! any previously derived [`Adjacency`]; searches require adjacency derived
//! at the current revision (see [`Grid::compute_neighbors`]).

use crate::cell::Cell;
use crate::geom::Coord;
use crate::neighbors::{self, Adjacency};

/// A square `size x size` grid.
#[derive(Debug, Clone)]
pub struct Grid {
    size: usize,
    cells: Vec<Cell>,
    revision: u64,
    adjacency: Option<Adjacency>,
}

impl Grid {
    /// Create a grid with all cells free. A size of 0 gives an empty grid.
    pub fn new(size: usize) -> Self {
        let cells = (0..size * size)
            .map(|idx| Cell::free(Self::coord_for(size, idx)))
            .collect();
        Self {
            size,
            cells,
            revision: 0,
            adjacency: None,
        }
    }

    #[inline]
    fn coord_for(size: usize, idx: usize) -> Coord {
        Coord::new((idx / size) as i32, (idx % size) as i32)
    }

    /// Number of rows (equal to the number of columns).
    #[inline]
    pub fn size(&self) -> usize {
        self.size
    }

    /// Total number of cells.
    #[inline]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Whether `c` lies inside the grid.
    #[inline]
    pub fn contains(&self, c: Coord) -> bool {
        let n = self.size as i64;
        (0..n).contains(&(c.row as i64)) && (0..n).contains(&(c.col as i64))
    }

    /// Flat row-major index of `c`, or `None` if out of bounds.
    #[inline]
    pub fn index(&self, c: Coord) -> Option<usize> {
        if !self.contains(c) {
            return None;
        }
        Some(c.row as usize * self.size + c.col as usize)
    }

    /// Coordinate of the cell with flat index `idx`. `idx` must be below
    /// [`len`](Self::len).
    #[inline]
    pub fn coord(&self, idx: usize) -> Coord {
        Self::coord_for(self.size, idx)
    }

    /// The cell at `c`, or `None` if out of bounds.
    #[inline]
    pub fn at(&self, c: Coord) -> Option<&Cell> {
        self.index(c).map(|i| &self.cells[i])
    }

    /// Whether `c` is a barrier. Out-of-bounds coordinates are not barriers.
    #[inline]
    pub fn is_barrier(&self, c: Coord) -> bool {
        self.at(c).is_some_and(|cell| cell.barrier)
    }

    /// Set or clear the barrier at `c`. Returns `true` if the grid changed.
    pub fn set_barrier(&mut self, c: Coord, barrier: bool) -> bool {
        let Some(i) = self.index(c) else {
            return false;
        };
        if self.cells[i].barrier == barrier {
            return false;
        }
        self.cells[i].barrier = barrier;
        self.touch();
        true
    }

    /// Flip the barrier at `c`, returning its new state, or `None` if `c`
    /// is out of bounds.
    pub fn toggle_barrier(&mut self, c: Coord) -> Option<bool> {
        let i = self.index(c)?;
        let barrier = !self.cells[i].barrier;
        self.cells[i].barrier = barrier;
        self.touch();
        Some(barrier)
    }

    /// Remove every barrier.
    pub fn clear(&mut self) {
        for cell in &mut self.cells {
            cell.barrier = false;
        }
        self.touch();
    }

    fn touch(&mut self) {
        self.revision = self.revision.wrapping_add(1);
        self.adjacency = None;
    }

    /// Counter bumped by every barrier edit.
    #[inline]
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Iterate over all cells in row-major order.
    pub fn iter(&self) -> std::slice::Iter<'_, Cell> {
        self.cells.iter()
    }

    /// Iterate over barrier coordinates in row-major order.
    pub fn barriers(&self) -> impl Iterator<Item = Coord> + '_ {
        self.cells.iter().filter(|c| c.barrier).map(|c| c.pos)
    }

    // -----------------------------------------------------------------------
    // Adjacency
    // -----------------------------------------------------------------------

    /// Derive adjacency from the current barrier flags. Shorthand for
    /// [`neighbors::compute_neighbors`].
    pub fn compute_neighbors(&mut self) {
        neighbors::compute_neighbors(self);
    }

    pub(crate) fn install_adjacency(&mut self, adjacency: Adjacency) {
        self.adjacency = Some(adjacency);
    }

    /// The last derived adjacency, if it is still current.
    #[inline]
    pub fn adjacency(&self) -> Option<&Adjacency> {
        self.adjacency
            .as_ref()
            .filter(|a| a.revision() == self.revision)
    }

    /// Whether adjacency has been derived since the last barrier edit.
    #[inline]
    pub fn has_fresh_neighbors(&self) -> bool {
        self.adjacency().is_some()
    }

    /// Passable neighbours of `c` from the current adjacency. Empty if `c`
    /// is out of bounds or adjacency is missing or stale.
    #[inline]
    pub fn neighbors(&self, c: Coord) -> &[Coord] {
        match (self.index(c), self.adjacency()) {
            (Some(i), Some(adj)) => adj.get(i),
            _ => &[],
        }
    }
}

impl<'a> IntoIterator for &'a Grid {
    type Item = &'a Cell;
    type IntoIter = std::slice::Iter<'a, Cell>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

// ---------------------------------------------------------------------------
// serde: a grid is its size plus its barrier set
// ---------------------------------------------------------------------------

#[cfg(feature = "serde")]
#[derive(serde::Serialize, serde::Deserialize)]
struct GridRepr {
    size: usize,
    barriers: Vec<Coord>,
}

#[cfg(feature = "serde")]
impl serde::Serialize for Grid {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        GridRepr {
            size: self.size,
            barriers: self.barriers().collect(),
        }
        .serialize(serializer)
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for Grid {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        use serde::de::Error;

        let repr = GridRepr::deserialize(deserializer)?;
        let mut grid = Grid::new(repr.size);
        for c in repr.barriers {
            if !grid.contains(c) {
                return Err(D::Error::custom(format!(
                    "barrier {c} outside {0}x{0} grid",
                    repr.size
                )));
            }
            grid.set_barrier(c, true);
        }
        Ok(grid)
    }
}
