//! Crossterm terminal front end for gridstar.
//!
//! Provides a [`Terminal`] that draws a grid together with the markers of a
//! search run and decodes keyboard and mouse input into grid terms. Each
//! grid cell is drawn as two terminal columns so cells look roughly square.

pub mod input;
pub mod palette;

use std::io::{self, Write};
use std::time::Duration;

use crossterm::{
    cursor, event, execute, queue,
    style::{Print, ResetColor, SetBackgroundColor, SetForegroundColor},
    terminal::{self, ClearType},
};

use gridstar_core::{Coord, Grid};
use gridstar_paths::SearchState;

pub use input::{CELL_WIDTH, Input, cell_at, decode};
pub use palette::Tint;

/// Everything needed to draw one frame.
#[derive(Clone, Copy, Debug)]
pub struct Scene<'a> {
    pub grid: &'a Grid,
    /// Markers of the current or most recent search run.
    pub state: Option<&'a SearchState>,
    pub start: Option<Coord>,
    pub goal: Option<Coord>,
    pub cursor: Option<Coord>,
    /// Shown on the line below the grid.
    pub status: &'a str,
}

/// A raw-mode, alternate-screen terminal session.
///
/// The terminal is restored by [`close`](Self::close) or on drop.
pub struct Terminal {
    mouse_enabled: bool,
    active: bool,
}

impl Terminal {
    /// Create a new, not yet initialised terminal.
    pub fn new() -> Self {
        Self {
            mouse_enabled: true,
            active: false,
        }
    }

    /// Configure whether mouse events are captured.
    pub fn with_mouse(mut self, enabled: bool) -> Self {
        self.mouse_enabled = enabled;
        self
    }

    /// Enter raw mode and the alternate screen.
    pub fn init(&mut self) -> io::Result<()> {
        terminal::enable_raw_mode()?;
        self.active = true;
        let mut stdout = io::stdout();
        execute!(
            stdout,
            terminal::EnterAlternateScreen,
            cursor::Hide,
            terminal::Clear(ClearType::All)
        )?;
        if self.mouse_enabled {
            execute!(stdout, event::EnableMouseCapture)?;
        }
        Ok(())
    }

    /// Wait up to `timeout` for one input. Events that do not decode to an
    /// [`Input`] yield `None`.
    pub fn poll_input(&mut self, timeout: Duration) -> io::Result<Option<Input>> {
        if !event::poll(timeout)? {
            return Ok(None);
        }
        Ok(decode(event::read()?))
    }

    /// Draw the grid, the cursor and the status line.
    pub fn draw(&mut self, scene: &Scene<'_>) -> io::Result<()> {
        let mut stdout = io::stdout().lock();

        for cell in scene.grid {
            let p = cell.pos;
            let tint = Tint::of(p, scene.grid, scene.state, scene.start, scene.goal);
            let text = if scene.cursor == Some(p) { "[]" } else { "  " };
            queue!(
                stdout,
                cursor::MoveTo(p.col as u16 * CELL_WIDTH, p.row as u16),
                SetBackgroundColor(tint.color()),
                SetForegroundColor(palette::CURSOR),
                Print(text)
            )?;
        }

        queue!(
            stdout,
            ResetColor,
            cursor::MoveTo(0, scene.grid.size() as u16),
            terminal::Clear(ClearType::CurrentLine),
            Print(scene.status)
        )?;
        stdout.flush()
    }

    /// Restore the terminal. Safe to call more than once.
    pub fn close(&mut self) {
        if !self.active {
            return;
        }
        self.active = false;
        let mut stdout = io::stdout();
        if self.mouse_enabled {
            let _ = execute!(stdout, event::DisableMouseCapture);
        }
        let _ = execute!(stdout, ResetColor, cursor::Show, terminal::LeaveAlternateScreen);
        let _ = terminal::disable_raw_mode();
    }
}

impl Default for Terminal {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for Terminal {
    fn drop(&mut self) {
        self.close();
    }
}
