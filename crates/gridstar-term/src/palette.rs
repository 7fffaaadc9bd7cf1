//! How each cell is coloured.

use crossterm::style::Color;

use gridstar_core::{Coord, Grid};
use gridstar_paths::{Mark, SearchState};

/// The visual class of a cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Tint {
    Free,
    Barrier,
    Start,
    Goal,
    Open,
    Closed,
    Path,
}

impl Tint {
    /// Classify `c`. Editor endpoints win over barriers, and barriers win
    /// over search markers.
    pub fn of(
        c: Coord,
        grid: &Grid,
        state: Option<&SearchState>,
        start: Option<Coord>,
        goal: Option<Coord>,
    ) -> Tint {
        if start == Some(c) {
            return Tint::Start;
        }
        if goal == Some(c) {
            return Tint::Goal;
        }
        if grid.is_barrier(c) {
            return Tint::Barrier;
        }
        match state.map_or(Mark::Empty, |s| s.at(c)) {
            Mark::Open => Tint::Open,
            Mark::Closed => Tint::Closed,
            Mark::Path => Tint::Path,
            Mark::Start => Tint::Start,
            Mark::Goal => Tint::Goal,
            Mark::Empty => Tint::Free,
        }
    }

    /// Background colour.
    pub const fn color(self) -> Color {
        match self {
            Tint::Free => Color::Rgb {
                r: 255,
                g: 255,
                b: 255,
            },
            Tint::Barrier => Color::Rgb { r: 0, g: 0, b: 0 },
            Tint::Start => Color::Rgb {
                r: 255,
                g: 165,
                b: 0,
            },
            Tint::Goal => Color::Rgb {
                r: 64,
                g: 224,
                b: 208,
            },
            Tint::Open => Color::Rgb { r: 0, g: 255, b: 0 },
            Tint::Closed => Color::Rgb { r: 255, g: 0, b: 0 },
            Tint::Path => Color::Rgb {
                r: 128,
                g: 0,
                b: 128,
            },
        }
    }
}

/// Foreground used for the cursor brackets.
pub const CURSOR: Color = Color::Rgb {
    r: 128,
    g: 128,
    b: 128,
};
