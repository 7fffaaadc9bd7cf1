//! Decoding crossterm events into editor input.

use crossterm::event::{
    Event, KeyCode, KeyEvent, KeyEventKind, MouseButton, MouseEvent, MouseEventKind,
};

use gridstar_core::{Coord, Dir};

/// Terminal columns per grid cell.
pub const CELL_WIDTH: u16 = 2;

/// A decoded user action.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Input {
    Char(char),
    Enter,
    Escape,
    Backspace,
    Arrow(Dir),
    /// Main mouse button pressed over a cell.
    Primary(Coord),
    /// Secondary mouse button pressed over a cell.
    Secondary(Coord),
    Resize,
}

/// Grid cell under terminal position (`column`, `row`).
#[inline]
pub fn cell_at(column: u16, row: u16) -> Coord {
    Coord::new(row as i32, (column / CELL_WIDTH) as i32)
}

/// Map a crossterm event to an [`Input`], ignoring everything else.
pub fn decode(ev: Event) -> Option<Input> {
    match ev {
        Event::Key(KeyEvent { code, kind, .. }) if kind != KeyEventKind::Release => {
            match code {
                KeyCode::Char(c) => Some(Input::Char(c)),
                KeyCode::Enter => Some(Input::Enter),
                KeyCode::Esc => Some(Input::Escape),
                KeyCode::Backspace | KeyCode::Delete => Some(Input::Backspace),
                KeyCode::Up => Some(Input::Arrow(Dir::Up)),
                KeyCode::Down => Some(Input::Arrow(Dir::Down)),
                KeyCode::Left => Some(Input::Arrow(Dir::Left)),
                KeyCode::Right => Some(Input::Arrow(Dir::Right)),
                _ => None,
            }
        }
        Event::Mouse(MouseEvent {
            kind, column, row, ..
        }) => {
            let pos = cell_at(column, row);
            match kind {
                MouseEventKind::Down(MouseButton::Left) | MouseEventKind::Drag(MouseButton::Left) => {
                    Some(Input::Primary(pos))
                }
                MouseEventKind::Down(MouseButton::Right)
                | MouseEventKind::Drag(MouseButton::Right) => Some(Input::Secondary(pos)),
                _ => None,
            }
        }
        Event::Resize(..) => Some(Input::Resize),
        _ => None,
    }
}
