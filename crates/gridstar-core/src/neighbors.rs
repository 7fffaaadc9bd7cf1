//! Adjacency derivation.
//!
//! Adjacency is never maintained incrementally. It is derived in one pass
//! from the barrier flags by [`compute_neighbors`] and stamped with the grid
//! revision it was derived from, so a search can tell whether barriers were
//! edited since.

use crate::geom::{Coord, Dir};
use crate::grid::Grid;

/// The up-to-four passable neighbours of one cell, in [`Dir::ALL`] order.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct NeighborList {
    buf: [Coord; 4],
    len: u8,
}

impl NeighborList {
    #[inline]
    fn push(&mut self, c: Coord) {
        self.buf[self.len as usize] = c;
        self.len += 1;
    }

    /// The neighbours as a slice.
    #[inline]
    pub fn as_slice(&self) -> &[Coord] {
        &self.buf[..self.len as usize]
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.len as usize
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}

/// Neighbour lists for every cell of a grid, indexed like the grid's cells.
#[derive(Clone, Debug)]
pub struct Adjacency {
    revision: u64,
    lists: Vec<NeighborList>,
}

impl Adjacency {
    /// Derive adjacency from the current barrier flags of `grid`.
    pub fn derive(grid: &Grid) -> Self {
        let lists = (0..grid.len())
            .map(|idx| {
                let c = grid.coord(idx);
                let mut list = NeighborList::default();
                for d in Dir::ALL {
                    let n = c.step(d);
                    if grid.at(n).is_some_and(|cell| cell.is_passable()) {
                        list.push(n);
                    }
                }
                list
            })
            .collect();
        Self {
            revision: grid.revision(),
            lists,
        }
    }

    /// Grid revision this adjacency was derived from.
    #[inline]
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Neighbours of the cell with flat index `idx`. Empty if out of range.
    #[inline]
    pub fn get(&self, idx: usize) -> &[Coord] {
        match self.lists.get(idx) {
            Some(list) => list.as_slice(),
            None => &[],
        }
    }

    /// Number of cells covered.
    #[inline]
    pub fn len(&self) -> usize {
        self.lists.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.lists.is_empty()
    }
}

/// Derive adjacency for every cell of `grid` from its current barrier flags.
///
/// Must be called after the last barrier edit and before each search; a
/// search over stale adjacency is rejected.
pub fn compute_neighbors(grid: &mut Grid) {
    let adjacency = Adjacency::derive(grid);
    grid.install_adjacency(adjacency);
}
