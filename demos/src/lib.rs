//! Editor model and configuration for the `astar-viz` terminal demo.
//!
//! Demonstrates: interactive barrier editing, random obstacle fields,
//! step-by-step A* observation and cooperative cancellation.

use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

use rand::Rng;

use gridstar_core::{Coord, Dir, Grid, GridMap};
use gridstar_paths::{
    Search, SearchResult, SearchState, SearchStats, StepObserver, search,
};
use gridstar_term::Scene;

pub const USAGE: &str = "\
usage: astar-viz [options]

  --size N          grid dimension (default 20)
  --delay MS        pause after each expansion (default 15)
  --density F       barrier probability for 'r' (default 0.3)
  --seed N          RNG seed for 'r'
  --time-limit MS   abort searches that run longer than this
  --map FILE        load a text map (. free, # barrier, S start, G goal)
  --no-mouse        do not capture the mouse
  --help            show this message";

pub const HELP_LINE: &str =
    "click/enter: start, goal, barrier | right/x: reset | space: run | r: random | c: clear | q: quit";

// ---------------------------------------------------------------------------
// VizConfig
// ---------------------------------------------------------------------------

/// Settings for the visualiser.
#[derive(Clone, Debug, PartialEq)]
pub struct VizConfig {
    pub size: usize,
    pub step_delay: Duration,
    pub density: f64,
    pub seed: Option<u64>,
    pub time_limit: Option<Duration>,
    pub map: Option<PathBuf>,
    pub mouse: bool,
}

impl Default for VizConfig {
    fn default() -> Self {
        Self {
            size: 20,
            step_delay: Duration::from_millis(15),
            density: 0.3,
            seed: None,
            time_limit: None,
            map: None,
            mouse: true,
        }
    }
}

impl VizConfig {
    pub fn with_size(mut self, size: usize) -> Self {
        self.size = size;
        self
    }

    pub fn with_step_delay(mut self, delay: Duration) -> Self {
        self.step_delay = delay;
        self
    }

    pub fn with_time_limit(mut self, limit: Duration) -> Self {
        self.time_limit = Some(limit);
        self
    }

    /// Parse command-line arguments (without the program name).
    pub fn from_args<I>(args: I) -> Result<Self, ArgError>
    where
        I: IntoIterator<Item = String>,
    {
        let mut config = Self::default();
        let mut args = args.into_iter();
        while let Some(flag) = args.next() {
            let mut value = |flag: &str| args.next().ok_or_else(|| ArgError::MissingValue(flag.to_owned()));
            match flag.as_str() {
                "--size" => {
                    let v = value(&flag)?;
                    config.size = match v.parse() {
                        Ok(n) if n > 0 => n,
                        _ => return Err(ArgError::invalid(&flag, v)),
                    };
                }
                "--delay" => {
                    let v = value(&flag)?;
                    let ms = v.parse().map_err(|_| ArgError::invalid(&flag, &v))?;
                    config.step_delay = Duration::from_millis(ms);
                }
                "--density" => {
                    let v = value(&flag)?;
                    config.density = match v.parse::<f64>() {
                        Ok(d) if (0.0..=1.0).contains(&d) => d,
                        _ => return Err(ArgError::invalid(&flag, v)),
                    };
                }
                "--seed" => {
                    let v = value(&flag)?;
                    config.seed = Some(v.parse().map_err(|_| ArgError::invalid(&flag, &v))?);
                }
                "--time-limit" => {
                    let v = value(&flag)?;
                    let ms = v.parse().map_err(|_| ArgError::invalid(&flag, &v))?;
                    config.time_limit = Some(Duration::from_millis(ms));
                }
                "--map" => config.map = Some(PathBuf::from(value(&flag)?)),
                "--no-mouse" => config.mouse = false,
                "--help" | "-h" => return Err(ArgError::HelpRequested),
                _ => return Err(ArgError::Unknown(flag)),
            }
        }
        Ok(config)
    }
}

/// Command-line errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ArgError {
    HelpRequested,
    Unknown(String),
    MissingValue(String),
    InvalidValue { flag: String, value: String },
}

impl ArgError {
    fn invalid(flag: &str, value: impl Into<String>) -> Self {
        Self::InvalidValue {
            flag: flag.to_owned(),
            value: value.into(),
        }
    }
}

impl fmt::Display for ArgError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::HelpRequested => write!(f, "help requested"),
            Self::Unknown(a) => write!(f, "unknown argument {a}"),
            Self::MissingValue(flag) => write!(f, "{flag} needs a value"),
            Self::InvalidValue { flag, value } => write!(f, "invalid value {value:?} for {flag}"),
        }
    }
}

impl std::error::Error for ArgError {}

// ---------------------------------------------------------------------------
// Editor
// ---------------------------------------------------------------------------

/// The grid being edited, its endpoints, and the markers of the last run.
#[derive(Debug, Clone)]
pub struct Editor {
    grid: Grid,
    start: Option<Coord>,
    goal: Option<Coord>,
    cursor: Coord,
    last_state: Option<SearchState>,
    last_stats: Option<SearchStats>,
}

impl Editor {
    pub fn new(size: usize) -> Self {
        Self {
            grid: Grid::new(size),
            start: None,
            goal: None,
            cursor: Coord::ZERO,
            last_state: None,
            last_stats: None,
        }
    }

    /// Start from a parsed map, keeping its markers.
    pub fn from_map(map: GridMap) -> Self {
        Self {
            grid: map.grid,
            start: map.start,
            goal: map.goal,
            cursor: Coord::ZERO,
            last_state: None,
            last_stats: None,
        }
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn start(&self) -> Option<Coord> {
        self.start
    }

    pub fn goal(&self) -> Option<Coord> {
        self.goal
    }

    pub fn cursor(&self) -> Coord {
        self.cursor
    }

    /// Markers of the last run, until the next edit.
    pub fn last_state(&self) -> Option<&SearchState> {
        self.last_state.as_ref()
    }

    pub fn last_stats(&self) -> Option<SearchStats> {
        self.last_stats
    }

    fn edited(&mut self) {
        self.last_state = None;
        self.last_stats = None;
    }

    pub fn set_cursor(&mut self, c: Coord) {
        if self.grid.contains(c) {
            self.cursor = c;
        }
    }

    pub fn move_cursor(&mut self, dir: Dir) {
        self.set_cursor(self.cursor.step(dir));
    }

    /// Main-button action: set the start if there is none, then the goal,
    /// then add barriers. Start and goal are never overwritten. Returns
    /// whether anything changed.
    pub fn place(&mut self, c: Coord) -> bool {
        if !self.grid.contains(c) {
            return false;
        }
        if self.start.is_none() && self.goal != Some(c) {
            self.grid.set_barrier(c, false);
            self.start = Some(c);
            log::debug!("editor: start at {c}");
        } else if self.goal.is_none() && self.start != Some(c) {
            self.grid.set_barrier(c, false);
            self.goal = Some(c);
            log::debug!("editor: goal at {c}");
        } else if self.start != Some(c) && self.goal != Some(c) {
            if !self.grid.set_barrier(c, true) {
                return false;
            }
        } else {
            return false;
        }
        self.edited();
        true
    }

    /// Secondary-button action: make `c` a plain free cell.
    pub fn reset(&mut self, c: Coord) {
        if !self.grid.contains(c) {
            return;
        }
        self.grid.set_barrier(c, false);
        if self.start == Some(c) {
            self.start = None;
        }
        if self.goal == Some(c) {
            self.goal = None;
        }
        self.edited();
    }

    /// Drop every barrier and both endpoints.
    pub fn clear(&mut self) {
        self.grid.clear();
        self.start = None;
        self.goal = None;
        self.edited();
    }

    /// Replace the barrier set with a random one where each cell is a
    /// barrier with probability `density`. Endpoints stay free. Returns the
    /// number of barriers.
    pub fn scatter(&mut self, rng: &mut impl Rng, density: f64) -> usize {
        let density = density.clamp(0.0, 1.0);
        let mut count = 0;
        for idx in 0..self.grid.len() {
            let c = self.grid.coord(idx);
            let barrier = Some(c) != self.start && Some(c) != self.goal && rng.random_bool(density);
            self.grid.set_barrier(c, barrier);
            count += usize::from(barrier);
        }
        log::debug!("editor: scattered {count} barriers at density {density}");
        self.edited();
        count
    }

    /// Recompute adjacency and search from start to goal, keeping the run's
    /// markers for display.
    pub fn run<O: StepObserver + ?Sized>(&mut self, observer: &mut O) -> SearchResult {
        self.grid.compute_neighbors();
        let (Some(start), Some(goal)) = (self.start, self.goal) else {
            return search(&self.grid, self.start, self.goal, observer);
        };
        let result = match Search::new(&self.grid, start, goal) {
            Ok(mut run) => {
                let result = run.run(observer);
                self.last_state = Some(run.state().clone());
                self.last_stats = Some(run.stats());
                result
            }
            Err(e) => SearchResult::InvalidConfiguration(e),
        };
        log::info!("editor: search {start} -> {goal}: {}", describe(&result, self.last_stats));
        result
    }

    /// The frame to draw while editing.
    pub fn scene<'a>(&'a self, status: &'a str) -> Scene<'a> {
        Scene {
            grid: &self.grid,
            state: self.last_state.as_ref(),
            start: self.start,
            goal: self.goal,
            cursor: Some(self.cursor),
            status,
        }
    }
}

/// One-line summary of a search outcome.
pub fn describe(result: &SearchResult, stats: Option<SearchStats>) -> String {
    let expanded = stats.map_or(String::new(), |s| format!(", {} expanded", s.expanded));
    match result {
        SearchResult::Found(path) => format!("path found: {} steps{expanded}", path.cost()),
        SearchResult::NotFound => format!("no path{expanded}"),
        SearchResult::Aborted => format!("aborted{expanded}"),
        SearchResult::InvalidConfiguration(e) => format!("cannot search: {e}"),
    }
}
