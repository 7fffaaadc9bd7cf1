//! **gridstar-core**: square obstacle grids for 4-connected path search.
//!
//! This crate provides the structural side of the search space: coordinates,
//! cells with a barrier flag, the [`Grid`] that owns them, adjacency
//! derivation and a plain-text map format. Search itself lives in
//! `gridstar-paths`.

pub mod cell;
pub mod geom;
pub mod grid;
pub mod map;
pub mod neighbors;

pub use cell::Cell;
pub use geom::{Coord, Dir};
pub use grid::Grid;
pub use map::{GridMap, MapError};
pub use neighbors::{Adjacency, NeighborList, compute_neighbors};
