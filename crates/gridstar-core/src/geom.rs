//! Geometry primitives: [`Coord`] and [`Dir`].
//!
//! Coordinates are `(row, col)` pairs. Rows grow downward and columns grow
//! to the right, so "down" is `row + 1` and "right" is `col + 1`.

use std::fmt;
use std::ops::{Add, Sub};

// ---------------------------------------------------------------------------
// Coord
// ---------------------------------------------------------------------------

/// A cell coordinate on a grid.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Coord {
    pub row: i32,
    pub col: i32,
}

impl Coord {
    /// Origin (0, 0).
    pub const ZERO: Self = Self { row: 0, col: 0 };

    /// Create a new coordinate.
    #[inline]
    pub const fn new(row: i32, col: i32) -> Self {
        Self { row, col }
    }

    /// Return a coordinate shifted by (drow, dcol).
    #[inline]
    pub const fn shift(self, drow: i32, dcol: i32) -> Self {
        Self {
            row: self.row + drow,
            col: self.col + dcol,
        }
    }

    /// The adjacent coordinate in direction `dir`.
    #[inline]
    pub const fn step(self, dir: Dir) -> Self {
        let d = dir.delta();
        self.shift(d.row, d.col)
    }

    /// The four cardinal neighbours in adjacency order (down, up, left,
    /// right). No bounds checking.
    #[inline]
    pub fn neighbors_4(self) -> [Coord; 4] {
        Dir::ALL.map(|d| self.step(d))
    }
}

impl PartialOrd for Coord {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Coord {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.row.cmp(&other.row).then(self.col.cmp(&other.col))
    }
}

impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

impl From<(i32, i32)> for Coord {
    fn from((row, col): (i32, i32)) -> Self {
        Self::new(row, col)
    }
}

impl Add for Coord {
    type Output = Self;
    #[inline]
    fn add(self, rhs: Self) -> Self {
        Self::new(self.row + rhs.row, self.col + rhs.col)
    }
}

impl Sub for Coord {
    type Output = Self;
    #[inline]
    fn sub(self, rhs: Self) -> Self {
        Self::new(self.row - rhs.row, self.col - rhs.col)
    }
}

// ---------------------------------------------------------------------------
// Dir
// ---------------------------------------------------------------------------

/// One of the four cardinal moves.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Dir {
    Down,
    Up,
    Left,
    Right,
}

impl Dir {
    /// All directions, in the order adjacency lists are built.
    ///
    /// Search expansion order, and therefore which of several equal-cost
    /// paths is returned, depends on this order.
    pub const ALL: [Dir; 4] = [Dir::Down, Dir::Up, Dir::Left, Dir::Right];

    /// Unit offset of this direction.
    #[inline]
    pub const fn delta(self) -> Coord {
        match self {
            Dir::Down => Coord::new(1, 0),
            Dir::Up => Coord::new(-1, 0),
            Dir::Left => Coord::new(0, -1),
            Dir::Right => Coord::new(0, 1),
        }
    }

    /// The opposite direction.
    #[inline]
    pub const fn reverse(self) -> Dir {
        match self {
            Dir::Down => Dir::Up,
            Dir::Up => Dir::Down,
            Dir::Left => Dir::Right,
            Dir::Right => Dir::Left,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn coord_arithmetic() {
        let a = Coord::new(1, 2);
        let b = Coord::new(3, 4);
        assert_eq!(a + b, Coord::new(4, 6));
        assert_eq!(b - a, Coord::new(2, 2));
        assert_eq!(a.shift(-1, 1), Coord::new(0, 3));
    }

    #[test]
    fn neighbors_follow_adjacency_order() {
        let c = Coord::new(5, 5);
        assert_eq!(
            c.neighbors_4(),
            [
                Coord::new(6, 5),
                Coord::new(4, 5),
                Coord::new(5, 4),
                Coord::new(5, 6),
            ]
        );
    }

    #[test]
    fn step_and_reverse_cancel_out() {
        let c = Coord::new(2, 7);
        for d in Dir::ALL {
            assert_eq!(c.step(d).step(d.reverse()), c);
        }
    }

    #[test]
    fn ordering_is_row_major() {
        let mut v = vec![Coord::new(1, 0), Coord::new(0, 3), Coord::new(0, 1)];
        v.sort();
        assert_eq!(v, vec![Coord::new(0, 1), Coord::new(0, 3), Coord::new(1, 0)]);
    }

    #[test]
    fn display() {
        assert_eq!(Coord::new(3, -2).to_string(), "(3, -2)");
    }
}
