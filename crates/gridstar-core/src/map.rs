//! Plain-text grid maps.
//!
//! A map is a square block of lines with one character per cell:
//!
//! | Char | Meaning |
//! |---|---|
//! | `.` | free cell |
//! | `#` | barrier |
//! | `S` | start (free) |
//! | `G` | goal (free) |
//!
//! Blank lines before and after the block are ignored, as is trailing
//! whitespace on each line.

use std::fmt;
use std::str::FromStr;

use crate::geom::Coord;
use crate::grid::Grid;

const FREE: char = '.';
const BARRIER: char = '#';
const START: char = 'S';
const GOAL: char = 'G';

/// A grid together with optional start and goal markers.
#[derive(Debug, Clone)]
pub struct GridMap {
    pub grid: Grid,
    pub start: Option<Coord>,
    pub goal: Option<Coord>,
}

impl GridMap {
    /// Parse a map from text.
    pub fn parse(text: &str) -> Result<Self, MapError> {
        let lines: Vec<&str> = text
            .lines()
            .map(str::trim_end)
            .skip_while(|l| l.is_empty())
            .collect();
        let end = lines
            .iter()
            .rposition(|l| !l.is_empty())
            .map_or(0, |i| i + 1);
        let lines = &lines[..end];
        if lines.is_empty() {
            return Err(MapError::Empty);
        }

        let size = lines[0].chars().count();
        for (row, line) in lines.iter().enumerate() {
            let found = line.chars().count();
            if found != size {
                return Err(MapError::InconsistentWidth {
                    row,
                    expected: size,
                    found,
                });
            }
        }
        if lines.len() != size {
            return Err(MapError::NotSquare {
                rows: lines.len(),
                cols: size,
            });
        }

        let mut grid = Grid::new(size);
        let mut start = None;
        let mut goal = None;
        for (row, line) in lines.iter().enumerate() {
            for (col, ch) in line.chars().enumerate() {
                let pos = Coord::new(row as i32, col as i32);
                match ch {
                    FREE => {}
                    BARRIER => {
                        grid.set_barrier(pos, true);
                    }
                    START | GOAL => {
                        let slot = if ch == START { &mut start } else { &mut goal };
                        if slot.is_some() {
                            return Err(MapError::DuplicateMarker { ch, pos });
                        }
                        *slot = Some(pos);
                    }
                    _ => return Err(MapError::InvalidChar { ch, pos }),
                }
            }
        }
        Ok(Self { grid, start, goal })
    }

    /// Render back to the text format.
    pub fn to_text(&self) -> String {
        let n = self.grid.size();
        let mut out = String::with_capacity(n * (n + 1));
        for cell in &self.grid {
            let ch = if Some(cell.pos) == self.start {
                START
            } else if Some(cell.pos) == self.goal {
                GOAL
            } else if cell.barrier {
                BARRIER
            } else {
                FREE
            };
            out.push(ch);
            if cell.pos.col as usize == n - 1 {
                out.push('\n');
            }
        }
        out
    }
}

impl FromStr for GridMap {
    type Err = MapError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// Errors that can occur when parsing a map.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MapError {
    /// No non-blank lines.
    Empty,
    /// Line count differs from line width.
    NotSquare { rows: usize, cols: usize },
    /// A line is wider or narrower than the first one.
    InconsistentWidth {
        row: usize,
        expected: usize,
        found: usize,
    },
    /// A character outside the map alphabet.
    InvalidChar { ch: char, pos: Coord },
    /// A second `S` or `G`.
    DuplicateMarker { ch: char, pos: Coord },
}

impl fmt::Display for MapError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "map: no rows"),
            Self::NotSquare { rows, cols } => {
                write!(f, "map: {rows} rows of width {cols}, expected a square")
            }
            Self::InconsistentWidth {
                row,
                expected,
                found,
            } => write!(
                f,
                "map: row {row} has width {found}, expected {expected}"
            ),
            Self::InvalidChar { ch, pos } => {
                write!(f, "map: invalid character \u{201c}{ch}\u{201d} at {pos}")
            }
            Self::DuplicateMarker { ch, pos } => {
                write!(f, "map: second \u{201c}{ch}\u{201d} marker at {pos}")
            }
        }
    }
}

impl std::error::Error for MapError {}
