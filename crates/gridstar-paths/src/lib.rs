//! A* shortest-path search on square obstacle grids.
//!
//! Movement is 4-connected with unit cost and the heuristic is Manhattan
//! distance, so every path returned is optimal.
//!
//! ```no_run
//! use gridstar_core::{Coord, Grid};
//! use gridstar_paths::{NoObserver, SearchResult, search};
//!
//! let mut grid = Grid::new(5);
//! grid.set_barrier(Coord::new(2, 2), true);
//! grid.compute_neighbors();
//!
//! match search(&grid, Some(Coord::new(0, 0)), Some(Coord::new(4, 4)), &mut NoObserver) {
//!     SearchResult::Found(path) => println!("{} steps", path.cost()),
//!     other => println!("{other:?}"),
//! }
//! ```
//!
//! # Pieces
//!
//! | Item | Role |
//! |---|---|
//! | [`manhattan`] | admissible, consistent heuristic |
//! | [`Frontier`] | open set with insertion-order tie breaking, no decrease-key |
//! | [`Search`] / [`search`] | the driver |
//! | [`Path`] | reconstructed start-to-goal route |
//! | [`StepObserver`] / [`CancelToken`] | per-expansion hook and cooperative cancellation |
//! | [`SearchState`] | observational per-cell markers for renderers |

mod astar;
mod cancel;
mod distance;
mod error;
mod frontier;
mod path;
mod score;
mod state;
mod traits;

pub use astar::{Phase, Search, SearchResult, SearchStats, Step, search};
pub use cancel::CancelToken;
pub use distance::manhattan;
pub use error::ConfigError;
pub use frontier::{Frontier, Ticket};
pub use path::Path;
pub use score::{Cost, INFINITY, PredecessorMap, ScoreTable};
pub use state::{Mark, SearchState};
pub use traits::{Control, NoObserver, StepObserver};
