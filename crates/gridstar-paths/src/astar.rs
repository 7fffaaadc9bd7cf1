//! The A* search driver.
//!
//! A run moves through `Initializing -> Running -> {Succeeded, Exhausted,
//! Aborted}`. Initialization happens in [`Search::new`], which also
//! validates the configuration; a rejected configuration never reaches the
//! loop. Each outer iteration pops one cell, tests it against the goal and
//! relaxes its neighbours.
//!
//! - The frontier has no decrease-key. An open cell whose score improves
//!   keeps its old ticket. Relaxation reads the live score tables, never
//!   ticket priorities.
//! - "Closed" is a marker only. A closed cell can be improved and pushed
//!   again.

use gridstar_core::{Adjacency, Coord, Grid};

use crate::distance::manhattan;
use crate::error::ConfigError;
use crate::frontier::Frontier;
use crate::path::{self, Path};
use crate::score::{Cost, PredecessorMap, ScoreTable};
use crate::state::{Mark, SearchState};
use crate::traits::{Control, StepObserver};

/// Where a run is in its lifecycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    Running,
    Succeeded,
    /// Frontier drained without reaching the goal.
    Exhausted,
    Aborted,
}

/// Outcome of a search.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SearchResult {
    Found(Path),
    NotFound,
    Aborted,
    InvalidConfiguration(ConfigError),
}

impl SearchResult {
    pub fn is_found(&self) -> bool {
        matches!(self, Self::Found(_))
    }

    pub fn path(&self) -> Option<&Path> {
        match self {
            Self::Found(p) => Some(p),
            _ => None,
        }
    }

    pub fn into_path(self) -> Option<Path> {
        match self {
            Self::Found(p) => Some(p),
            _ => None,
        }
    }
}

/// Counters for one run.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SearchStats {
    /// Cells popped from the frontier.
    pub expanded: usize,
    /// Tickets pushed, the start included.
    pub pushed: usize,
    /// Score improvements to cells that already had a ticket. Each leaves
    /// that ticket with a stale priority.
    pub improved_open: usize,
    /// Pops of cells that had already been expanded once.
    pub reexpanded: usize,
}

/// Read-only view handed to a [`StepObserver`] before each expansion.
#[derive(Clone, Copy, Debug)]
pub struct Step<'a> {
    /// Number of cells expanded so far.
    pub iteration: usize,
    /// Pending frontier tickets.
    pub frontier_len: usize,
    pub start: Coord,
    pub goal: Coord,
    pub grid: &'a Grid,
    pub state: &'a SearchState,
}

/// A single A* run over a borrowed grid.
///
/// Use [`search`] for the one-shot form. Holding a `Search` lets a caller
/// drive expansions one at a time with [`step`](Self::step) and inspect the
/// score tables in between.
#[derive(Debug)]
pub struct Search<'g> {
    grid: &'g Grid,
    adjacency: &'g Adjacency,
    start: Coord,
    goal: Coord,
    start_idx: usize,
    goal_idx: usize,
    g: ScoreTable,
    f: ScoreTable,
    preds: PredecessorMap,
    frontier: Frontier,
    state: SearchState,
    phase: Phase,
    path: Option<Path>,
    stats: SearchStats,
}

impl<'g> Search<'g> {
    /// Validate the configuration and set up a run from `start` to `goal`.
    ///
    /// `grid` must have had its neighbours computed after its last barrier
    /// edit.
    pub fn new(grid: &'g Grid, start: Coord, goal: Coord) -> Result<Self, ConfigError> {
        if grid.is_empty() {
            return Err(ConfigError::EmptyGrid);
        }
        let start_idx = grid
            .index(start)
            .ok_or(ConfigError::StartOutOfBounds(start))?;
        let goal_idx = grid.index(goal).ok_or(ConfigError::GoalOutOfBounds(goal))?;
        if grid.is_barrier(start) {
            return Err(ConfigError::StartIsBarrier(start));
        }
        if grid.is_barrier(goal) {
            return Err(ConfigError::GoalIsBarrier(goal));
        }
        let adjacency = grid.adjacency().ok_or(ConfigError::StaleNeighbors)?;

        let len = grid.len();
        let mut g = ScoreTable::new(len);
        let mut f = ScoreTable::new(len);
        g.set(start_idx, 0);
        f.set(start_idx, manhattan(start, goal));

        let mut frontier = Frontier::new(len);
        frontier.push(start_idx, f.get(start_idx));

        let mut state = SearchState::new(grid);
        state.set(start_idx, Mark::Start);
        state.set(goal_idx, Mark::Goal);

        log::debug!(
            "astar: {start} -> {goal} on {0}x{0} grid, h = {1}",
            grid.size(),
            f.get(start_idx)
        );

        Ok(Self {
            grid,
            adjacency,
            start,
            goal,
            start_idx,
            goal_idx,
            g,
            f,
            preds: PredecessorMap::new(len),
            frontier,
            state,
            phase: Phase::Running,
            path: None,
            stats: SearchStats {
                pushed: 1,
                ..SearchStats::default()
            },
        })
    }

    // -----------------------------------------------------------------------
    // Driving
    // -----------------------------------------------------------------------

    /// Run to completion, consulting `observer` before every expansion.
    pub fn run<O: StepObserver + ?Sized>(&mut self, observer: &mut O) -> SearchResult {
        loop {
            if let Some(result) = self.result() {
                return result;
            }
            if self.frontier.is_empty() {
                self.finish(Phase::Exhausted);
                continue;
            }
            if observer.on_step(&self.view()) == Control::Abort {
                self.abort();
                continue;
            }
            self.step();
        }
    }

    /// Perform one outer iteration: pop, goal test, relax, close. Does not
    /// consult any observer. Returns the phase afterwards; a finished run is
    /// left untouched.
    pub fn step(&mut self) -> Phase {
        if self.phase != Phase::Running {
            return self.phase;
        }
        // The ticket's priority may be stale; only its cell is used.
        let Some(ticket) = self.frontier.pop_min() else {
            self.finish(Phase::Exhausted);
            return self.phase;
        };
        let ci = ticket.idx;
        self.stats.expanded += 1;
        if self.state.get(ci) == Mark::Closed {
            self.stats.reexpanded += 1;
        }

        if ci == self.goal_idx {
            let path = path::reconstruct(self.grid, &self.preds, self.start_idx, ci);
            for &c in path.cells() {
                if let Some(i) = self.grid.index(c) {
                    self.state.set(i, Mark::Path);
                }
            }
            self.path = Some(path);
            self.finish(Phase::Succeeded);
            return self.phase;
        }

        let grid = self.grid;
        let current = grid.coord(ci);
        let tentative = self.g.get(ci) + 1;
        log::trace!(
            "astar: expand {current} g={} f={} (ticket f={})",
            self.g.get(ci),
            self.f.get(ci),
            ticket.priority
        );

        let adjacency = self.adjacency;
        for &n in adjacency.get(ci) {
            let Some(ni) = grid.index(n) else {
                continue;
            };
            if tentative >= self.g.get(ni) {
                continue;
            }
            let open = self.frontier.contains(ni);
            if open {
                self.stats.improved_open += 1;
            }
            self.preds.set(ni, ci);
            self.g.set(ni, tentative);
            self.f.set(ni, tentative + manhattan(n, self.goal));
            if !open {
                self.frontier.push(ni, self.f.get(ni));
                self.stats.pushed += 1;
                self.state.set(ni, Mark::Open);
            }
        }

        if ci != self.start_idx {
            self.state.set(ci, Mark::Closed);
        }
        self.phase
    }

    /// Stop a running search. No effect once finished.
    pub fn abort(&mut self) {
        if self.phase == Phase::Running {
            self.finish(Phase::Aborted);
        }
    }

    fn finish(&mut self, phase: Phase) {
        self.phase = phase;
        log::debug!(
            "astar: {:?} after {} expansions ({} pushed, {} improved in place, {} re-expanded){}",
            phase,
            self.stats.expanded,
            self.stats.pushed,
            self.stats.improved_open,
            self.stats.reexpanded,
            self.path
                .as_ref()
                .map(|p| format!(", path cost {}", p.cost()))
                .unwrap_or_default()
        );
    }

    // -----------------------------------------------------------------------
    // Inspection
    // -----------------------------------------------------------------------

    /// The terminal result, or `None` while still running.
    pub fn result(&self) -> Option<SearchResult> {
        match self.phase {
            Phase::Running => None,
            Phase::Succeeded => Some(
                self.path
                    .clone()
                    .map_or(SearchResult::NotFound, SearchResult::Found),
            ),
            Phase::Exhausted => Some(SearchResult::NotFound),
            Phase::Aborted => Some(SearchResult::Aborted),
        }
    }

    fn view(&self) -> Step<'_> {
        Step {
            iteration: self.stats.expanded,
            frontier_len: self.frontier.len(),
            start: self.start,
            goal: self.goal,
            grid: self.grid,
            state: &self.state,
        }
    }

    #[inline]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    #[inline]
    pub fn start(&self) -> Coord {
        self.start
    }

    #[inline]
    pub fn goal(&self) -> Coord {
        self.goal
    }

    /// Observational markers for this run.
    #[inline]
    pub fn state(&self) -> &SearchState {
        &self.state
    }

    #[inline]
    pub fn stats(&self) -> SearchStats {
        self.stats
    }

    /// The path, once the run has succeeded.
    #[inline]
    pub fn path(&self) -> Option<&Path> {
        self.path.as_ref()
    }

    /// Best known cost from the start, if any.
    pub fn g_score(&self, c: Coord) -> Option<Cost> {
        self.g.finite(self.grid.index(c)?)
    }

    /// `g + h` for cells with a finite g score.
    pub fn f_score(&self, c: Coord) -> Option<Cost> {
        self.f.finite(self.grid.index(c)?)
    }

    /// The cell that currently yields `c`'s best g score.
    pub fn predecessor(&self, c: Coord) -> Option<Coord> {
        let p = self.preds.get(self.grid.index(c)?)?;
        Some(self.grid.coord(p))
    }

    /// Whether `c` has a pending frontier ticket.
    pub fn in_open_set(&self, c: Coord) -> bool {
        self.grid
            .index(c)
            .is_some_and(|i| self.frontier.contains(i))
    }

    /// Pending frontier tickets.
    #[inline]
    pub fn frontier_len(&self) -> usize {
        self.frontier.len()
    }
}

/// Find a shortest path from `start` to `goal`.
///
/// Call [`compute_neighbors`](gridstar_core::compute_neighbors) on `grid`
/// after editing barriers and before searching. `observer` is invoked once
/// per expansion and may abort the run; pass
/// [`NoObserver`](crate::NoObserver) to run uninterrupted.
pub fn search<O: StepObserver + ?Sized>(
    grid: &Grid,
    start: Option<Coord>,
    goal: Option<Coord>,
    observer: &mut O,
) -> SearchResult {
    let endpoints = start
        .ok_or(ConfigError::MissingStart)
        .and_then(|s| Ok((s, goal.ok_or(ConfigError::MissingGoal)?)));
    match endpoints.and_then(|(s, g)| Search::new(grid, s, g)) {
        Ok(mut run) => run.run(observer),
        Err(e) => {
            log::debug!("astar: rejected: {e}");
            SearchResult::InvalidConfiguration(e)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cancel::CancelToken;
    use crate::traits::NoObserver;
    use gridstar_core::GridMap;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};
    use std::collections::VecDeque;

    fn c(row: i32, col: i32) -> Coord {
        Coord::new(row, col)
    }

    fn open_grid(size: usize) -> Grid {
        let mut g = Grid::new(size);
        g.compute_neighbors();
        g
    }

    fn run(grid: &Grid, start: Coord, goal: Coord) -> SearchResult {
        search(grid, Some(start), Some(goal), &mut NoObserver)
    }

    /// Run with an observer that only counts its invocations.
    fn run_counting(grid: &Grid, start: Coord, goal: Coord) -> (SearchResult, usize) {
        let mut calls = 0;
        let result = search(grid, Some(start), Some(goal), &mut |_: &Step<'_>| {
            calls += 1;
            Control::Continue
        });
        (result, calls)
    }

    fn from_map(text: &str) -> (Grid, Coord, Coord) {
        let mut m = GridMap::parse(text).unwrap();
        m.grid.compute_neighbors();
        (m.grid, m.start.unwrap(), m.goal.unwrap())
    }

    /// Breadth-first shortest distance, for cross-checking.
    fn bfs_distance(grid: &Grid, start: Coord, goal: Coord) -> Option<Cost> {
        let mut dist = vec![None; grid.len()];
        let mut queue = VecDeque::new();
        dist[grid.index(start)?] = Some(0);
        queue.push_back(start);
        while let Some(p) = queue.pop_front() {
            let d = dist[grid.index(p)?]?;
            if p == goal {
                return Some(d);
            }
            for &n in grid.neighbors(p) {
                let ni = grid.index(n)?;
                if dist[ni].is_none() {
                    dist[ni] = Some(d + 1);
                    queue.push_back(n);
                }
            }
        }
        None
    }

    fn assert_valid_path(grid: &Grid, path: &Path, start: Coord, goal: Coord) {
        assert_eq!(path.start(), Some(start));
        assert_eq!(path.goal(), Some(goal));
        for w in path.cells().windows(2) {
            assert_eq!(manhattan(w[0], w[1]), 1, "{} -> {} is not a step", w[0], w[1]);
        }
        for &p in path {
            assert!(!grid.is_barrier(p), "path crosses barrier at {p}");
        }
    }

    // -----------------------------------------------------------------------
    // Scenarios
    // -----------------------------------------------------------------------

    #[test]
    fn open_grid_corner_to_corner() {
        let g = open_grid(5);
        let (result, calls) = run_counting(&g, c(0, 0), c(4, 4));
        let path = result.into_path().unwrap();
        assert_eq!(path.len(), 9);
        assert_eq!(path.cost(), 8);
        // Down moves are tried first, so the route hugs the left edge.
        assert_eq!(
            path.cells(),
            &[
                c(0, 0),
                c(1, 0),
                c(2, 0),
                c(3, 0),
                c(4, 0),
                c(4, 1),
                c(4, 2),
                c(4, 3),
                c(4, 4),
            ]
        );
        assert_eq!(calls, 25);
    }

    #[test]
    fn full_wall_row_means_no_path() {
        let mut g = Grid::new(5);
        for col in 0..5 {
            g.set_barrier(c(2, col), true);
        }
        g.compute_neighbors();
        let (result, calls) = run_counting(&g, c(0, 0), c(4, 4));
        assert_eq!(result, SearchResult::NotFound);
        // Every cell above the wall is expanded exactly once.
        assert_eq!(calls, 10);
    }

    #[test]
    fn single_barrier_keeps_optimal_cost() {
        let mut g = Grid::new(5);
        g.set_barrier(c(2, 2), true);
        g.compute_neighbors();
        let path = run(&g, c(0, 0), c(4, 4)).into_path().unwrap();
        assert_eq!(path.cost(), 8);
        assert_eq!(path.len(), 9);
        assert!(!path.contains(c(2, 2)));
        assert_valid_path(&g, &path, c(0, 0), c(4, 4));
    }

    #[test]
    fn start_equals_goal() {
        let g = open_grid(5);
        let (result, calls) = run_counting(&g, c(2, 3), c(2, 3));
        let path = result.into_path().unwrap();
        assert_eq!(path.cells(), &[c(2, 3)]);
        assert_eq!(calls, 1);
    }

    #[test]
    fn detour_around_wall() {
        let (g, s, t) = from_map(
            "
S#G
.#.
...",
        );
        let path = run(&g, s, t).into_path().unwrap();
        assert_eq!(
            path.cells(),
            &[c(0, 0), c(1, 0), c(2, 0), c(2, 1), c(2, 2), c(1, 2), c(0, 2)]
        );
    }

    #[test]
    fn serpentine_corridor() {
        let (g, s, t) = from_map(
            "
S....
####.
.....
G####
.....",
        );
        let path = run(&g, s, t).into_path().unwrap();
        assert_eq!(path.cost(), 11);
        assert_eq!(bfs_distance(&g, s, t), Some(11));
        assert_valid_path(&g, &path, s, t);
    }

    #[test]
    fn open_cells_are_improved_in_place() {
        let (g, s, t) = from_map(
            "
#.#.....#.
.#..##.#.#
......#.##
#.##.#.#..
#........#
#.....###.
#.S#.....#
...#......
......##.#
..#.##.#G.",
        );
        let mut run = Search::new(&g, s, t).unwrap();
        let result = run.run(&mut NoObserver);
        let path = result.into_path().unwrap();
        assert_eq!(path.cost(), 11);
        assert_eq!(bfs_distance(&g, s, t), Some(11));
        assert_valid_path(&g, &path, s, t);

        let stats = run.stats();
        assert_eq!(stats.improved_open, 2);
        assert_eq!(stats.expanded, 22);
        assert_eq!(stats.pushed, 36);
    }

    // -----------------------------------------------------------------------
    // Properties
    // -----------------------------------------------------------------------

    #[test]
    fn optimal_on_open_grids() {
        for size in [1usize, 2, 3, 7, 12] {
            let g = open_grid(size);
            let n = size as i32;
            let pairs = [
                (c(0, 0), c(n - 1, n - 1)),
                (c(n - 1, 0), c(0, n - 1)),
                (c(n / 2, n / 2), c(0, n - 1)),
                (c(n - 1, n / 2), c(n - 1, n - 1)),
            ];
            for (s, t) in pairs {
                let path = run(&g, s, t).into_path().unwrap();
                assert_eq!(path.len() as Cost, 1 + manhattan(s, t), "{s} -> {t} on {size}");
                assert_valid_path(&g, &path, s, t);
            }
        }
    }

    #[test]
    fn matches_breadth_first_on_random_grids() {
        let mut rng = StdRng::seed_from_u64(0x5eed);
        for _ in 0..300 {
            let size = rng.random_range(2..14usize);
            let mut g = Grid::new(size);
            for cell in 0..g.len() {
                if rng.random_bool(0.3) {
                    g.set_barrier(g.coord(cell), true);
                }
            }
            let n = size as i32;
            let s = c(rng.random_range(0..n), rng.random_range(0..n));
            let t = c(rng.random_range(0..n), rng.random_range(0..n));
            g.set_barrier(s, false);
            g.set_barrier(t, false);
            g.compute_neighbors();

            match (run(&g, s, t), bfs_distance(&g, s, t)) {
                (SearchResult::Found(path), Some(d)) => {
                    assert_eq!(path.cost(), d);
                    assert_valid_path(&g, &path, s, t);
                }
                (SearchResult::NotFound, None) => {}
                (r, d) => panic!("{s} -> {t}: search gave {r:?}, bfs gave {d:?}"),
            }
        }
    }

    #[test]
    fn repeated_runs_are_identical() {
        let (g, s, t) = from_map(
            "
S.....
.##.#.
...#..
.#...#
...#..
.#...G",
        );
        let first = run(&g, s, t);
        assert!(first.is_found());
        for _ in 0..5 {
            assert_eq!(run(&g, s, t), first);
        }
    }

    #[test]
    fn g_scores_never_increase() {
        let (g, s, t) = from_map(
            "
#.#.....#.
.#..##.#.#
......#.##
#.##.#.#..
#........#
#.....###.
#.S#.....#
...#......
......##.#
..#.##.#G.",
        );
        let mut run = Search::new(&g, s, t).unwrap();
        let snapshot = |run: &Search<'_>| -> Vec<Option<Cost>> {
            (0..g.len()).map(|i| run.g_score(g.coord(i))).collect()
        };
        let mut prev = snapshot(&run);
        while run.step() == Phase::Running {
            let next = snapshot(&run);
            for (i, (a, b)) in prev.iter().zip(&next).enumerate() {
                if let Some(a) = a {
                    let b = b.expect("finite score became infinite");
                    assert!(b <= *a, "g at {} rose from {a} to {b}", g.coord(i));
                }
            }
            prev = next;
        }
        assert_eq!(run.phase(), Phase::Succeeded);
    }

    #[test]
    fn f_is_g_plus_heuristic_and_predecessors_are_consistent() {
        let (g, s, t) = from_map(
            "
S..#....
.#.#.##.
.#...#..
.####.#.
......#G
.##.#...
....#.#.
.#......",
        );
        let mut run = Search::new(&g, s, t).unwrap();
        assert!(run.run(&mut NoObserver).is_found());
        for cell in &g {
            let p = cell.pos;
            match run.g_score(p) {
                Some(gs) => {
                    assert_eq!(run.f_score(p), Some(gs + manhattan(p, t)));
                    if p == s {
                        assert_eq!(run.predecessor(p), None);
                    } else {
                        let parent = run.predecessor(p).unwrap();
                        assert_eq!(manhattan(p, parent), 1);
                        assert!(run.g_score(parent).unwrap() < gs);
                    }
                }
                None => {
                    assert_eq!(run.f_score(p), None);
                    assert_eq!(run.predecessor(p), None);
                }
            }
        }
    }

    #[test]
    fn open_set_matches_frontier() {
        let g = open_grid(6);
        let mut run = Search::new(&g, c(0, 5), c(5, 0)).unwrap();
        for _ in 0..8 {
            run.step();
            let open = (0..g.len()).filter(|&i| run.in_open_set(g.coord(i))).count();
            assert_eq!(open, run.frontier_len());
            assert_eq!(run.state().count(Mark::Open), open);
        }
    }

    // -----------------------------------------------------------------------
    // Validation
    // -----------------------------------------------------------------------

    #[test]
    fn barrier_endpoints_are_rejected_without_expanding() {
        let mut g = Grid::new(5);
        g.set_barrier(c(0, 0), true);
        g.set_barrier(c(4, 4), true);
        g.compute_neighbors();

        let (result, calls) = run_counting(&g, c(0, 0), c(1, 1));
        assert_eq!(
            result,
            SearchResult::InvalidConfiguration(ConfigError::StartIsBarrier(c(0, 0)))
        );
        assert_eq!(calls, 0);

        let (result, calls) = run_counting(&g, c(1, 1), c(4, 4));
        assert_eq!(
            result,
            SearchResult::InvalidConfiguration(ConfigError::GoalIsBarrier(c(4, 4)))
        );
        assert_eq!(calls, 0);
    }

    #[test]
    fn missing_endpoints_are_rejected() {
        let g = open_grid(3);
        assert_eq!(
            search(&g, None, Some(c(1, 1)), &mut NoObserver),
            SearchResult::InvalidConfiguration(ConfigError::MissingStart)
        );
        assert_eq!(
            search(&g, Some(c(1, 1)), None, &mut NoObserver),
            SearchResult::InvalidConfiguration(ConfigError::MissingGoal)
        );
    }

    #[test]
    fn empty_grid_and_out_of_bounds_are_rejected() {
        let g = open_grid(0);
        assert_eq!(
            run(&g, c(0, 0), c(0, 0)),
            SearchResult::InvalidConfiguration(ConfigError::EmptyGrid)
        );

        let g = open_grid(3);
        assert_eq!(
            run(&g, c(3, 0), c(0, 0)),
            SearchResult::InvalidConfiguration(ConfigError::StartOutOfBounds(c(3, 0)))
        );
        assert_eq!(
            run(&g, c(0, 0), c(0, -1)),
            SearchResult::InvalidConfiguration(ConfigError::GoalOutOfBounds(c(0, -1)))
        );
    }

    #[test]
    fn stale_neighbors_are_rejected() {
        let mut g = Grid::new(4);
        assert_eq!(
            run(&g, c(0, 0), c(3, 3)),
            SearchResult::InvalidConfiguration(ConfigError::StaleNeighbors)
        );

        g.compute_neighbors();
        assert!(run(&g, c(0, 0), c(3, 3)).is_found());

        // An edit between runs must be followed by a fresh derivation.
        for col in 0..4 {
            g.set_barrier(c(1, col), true);
        }
        assert_eq!(
            run(&g, c(0, 0), c(3, 3)),
            SearchResult::InvalidConfiguration(ConfigError::StaleNeighbors)
        );
        g.compute_neighbors();
        assert_eq!(run(&g, c(0, 0), c(3, 3)), SearchResult::NotFound);
    }

    // -----------------------------------------------------------------------
    // Cancellation and observation
    // -----------------------------------------------------------------------

    #[test]
    fn observer_can_abort() {
        let g = open_grid(8);
        let mut run = Search::new(&g, c(0, 0), c(7, 7)).unwrap();
        let mut seen = Vec::new();
        let result = run.run(&mut |step: &Step<'_>| {
            seen.push(step.iteration);
            if step.iteration == 3 {
                Control::Abort
            } else {
                Control::Continue
            }
        });
        assert_eq!(result, SearchResult::Aborted);
        assert_eq!(seen, vec![0, 1, 2, 3]);
        assert_eq!(run.stats().expanded, 3);
        assert_eq!(run.phase(), Phase::Aborted);
        // Finished runs ignore further stepping.
        assert_eq!(run.step(), Phase::Aborted);
        assert_eq!(run.stats().expanded, 3);
    }

    #[test]
    fn cancelled_token_stops_before_first_expansion() {
        let g = open_grid(5);
        let mut token = CancelToken::new();
        token.clone().cancel();
        let mut run = Search::new(&g, c(0, 0), c(4, 4)).unwrap();
        assert_eq!(run.run(&mut token), SearchResult::Aborted);
        assert_eq!(run.stats().expanded, 0);
    }

    #[test]
    fn token_cancelled_mid_run() {
        let g = open_grid(10);
        let token = CancelToken::new();
        let remote = token.clone();
        let mut checks = token.clone();
        let result = search(&g, Some(c(0, 0)), Some(c(9, 9)), &mut |step: &Step<'_>| {
            if step.iteration == 5 {
                remote.cancel();
            }
            checks.on_step(step)
        });
        assert_eq!(result, SearchResult::Aborted);
        assert!(token.is_cancelled());
    }

    #[test]
    fn uncancelled_token_runs_to_completion() {
        let g = open_grid(5);
        let mut token = CancelToken::new();
        assert!(search(&g, Some(c(0, 0)), Some(c(4, 4)), &mut token).is_found());
    }

    #[test]
    fn observer_sees_frontier_and_markers() {
        let g = open_grid(4);
        let mut frontier_sizes = Vec::new();
        let result = search(&g, Some(c(0, 0)), Some(c(0, 3)), &mut |step: &Step<'_>| {
            assert_eq!(step.state.at(step.start), Mark::Start);
            assert_eq!(step.state.at(step.goal), Mark::Goal);
            frontier_sizes.push(step.frontier_len);
            Control::Continue
        });
        assert!(result.is_found());
        // Only the start is pending before the first expansion.
        assert_eq!(frontier_sizes[0], 1);
    }

    #[test]
    fn final_state_marks_the_path() {
        let (g, s, t) = from_map(
            "
S#G
.#.
...",
        );
        let mut run = Search::new(&g, s, t).unwrap();
        let path = run.run(&mut NoObserver).into_path().unwrap();
        let state = run.state();
        assert_eq!(state.at(s), Mark::Start);
        assert_eq!(state.at(t), Mark::Goal);
        for &p in &path.cells()[1..path.len() - 1] {
            assert_eq!(state.at(p), Mark::Path);
        }
        assert_eq!(state.count(Mark::Path), path.len() - 2);
        assert_eq!(state.at(c(0, 1)), Mark::Empty);
    }
}
