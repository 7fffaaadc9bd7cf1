//! Per-run side tables: g/f scores and predecessors, indexed by flat cell
//! index. These are the authoritative search state; frontier tickets only
//! carry scheduling hints.

/// Path cost in steps.
pub type Cost = u32;

/// Score of a cell with no known route from the start.
pub const INFINITY: Cost = Cost::MAX;

/// Cell index to cost, defaulting to [`INFINITY`].
#[derive(Clone, Debug)]
pub struct ScoreTable {
    scores: Vec<Cost>,
}

impl ScoreTable {
    pub fn new(len: usize) -> Self {
        Self {
            scores: vec![INFINITY; len],
        }
    }

    #[inline]
    pub fn get(&self, idx: usize) -> Cost {
        self.scores[idx]
    }

    #[inline]
    pub fn set(&mut self, idx: usize, cost: Cost) {
        self.scores[idx] = cost;
    }

    /// The score if it is finite.
    #[inline]
    pub fn finite(&self, idx: usize) -> Option<Cost> {
        let s = self.scores.get(idx).copied()?;
        (s != INFINITY).then_some(s)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.scores.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.scores.is_empty()
    }
}

const NO_PARENT: usize = usize::MAX;

/// Cell index to the index of the cell that currently gives its best g
/// score. Only ever written on a strict improvement, so g strictly
/// decreases along every chain and the map stays a tree rooted at the start.
#[derive(Clone, Debug)]
pub struct PredecessorMap {
    parents: Vec<usize>,
}

impl PredecessorMap {
    pub fn new(len: usize) -> Self {
        Self {
            parents: vec![NO_PARENT; len],
        }
    }

    #[inline]
    pub fn get(&self, idx: usize) -> Option<usize> {
        match self.parents.get(idx) {
            Some(&p) if p != NO_PARENT => Some(p),
            _ => None,
        }
    }

    #[inline]
    pub fn set(&mut self, idx: usize, parent: usize) {
        self.parents[idx] = parent;
    }
}
