use gridstar_core::Coord;

use crate::score::Cost;

/// Manhattan (L1) distance between two coordinates.
///
/// Admissible and consistent for 4-connected unit-cost movement, which is
/// what lets the A* driver tolerate stale frontier tickets.
#[inline]
pub fn manhattan(a: Coord, b: Coord) -> Cost {
    a.row.abs_diff(b.row) + a.col.abs_diff(b.col)
}
