//! The A* open set: a min-ordered ticket heap plus O(1) membership.
//!
//! There is no decrease-key. When an open cell's score improves the driver
//! leaves its existing ticket in place with the old priority, so a popped
//! ticket's priority may be stale. Callers must read live scores from the
//! score tables and treat [`Ticket::priority`] as a scheduling hint only.

use std::collections::BinaryHeap;

use crate::score::Cost;

/// One enqueued frontier entry.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Ticket {
    /// f score at push time.
    pub priority: Cost,
    /// Insertion order; 0 for the first push.
    pub seq: u64,
    /// Flat cell index.
    pub idx: usize,
}

impl Ord for Ticket {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        // Reversed so BinaryHeap (max-heap) pops the smallest
        // (priority, seq) first.
        other
            .priority
            .cmp(&self.priority)
            .then(other.seq.cmp(&self.seq))
            .then(other.idx.cmp(&self.idx))
    }
}

impl PartialOrd for Ticket {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

/// Priority-ordered open set with insertion-order tie breaking.
///
/// Each open cell has exactly one pending ticket.
#[derive(Clone, Debug)]
pub struct Frontier {
    heap: BinaryHeap<Ticket>,
    open: Vec<bool>,
    next_seq: u64,
}

impl Frontier {
    /// An empty frontier over `len` cells.
    pub fn new(len: usize) -> Self {
        Self {
            heap: BinaryHeap::new(),
            open: vec![false; len],
            next_seq: 0,
        }
    }

    /// Enqueue `idx` with `priority` and add it to the open set. Returns the
    /// sequence number assigned to the ticket.
    ///
    /// The cell must not already be open.
    pub fn push(&mut self, idx: usize, priority: Cost) -> u64 {
        debug_assert!(!self.open[idx], "cell {idx} already has a ticket");
        let seq = self.next_seq;
        self.next_seq += 1;
        self.open[idx] = true;
        self.heap.push(Ticket { priority, seq, idx });
        seq
    }

    /// Remove the ticket with the smallest `(priority, seq)` and drop its
    /// cell from the open set.
    pub fn pop_min(&mut self) -> Option<Ticket> {
        let ticket = self.heap.pop()?;
        self.open[ticket.idx] = false;
        Some(ticket)
    }

    /// Whether `idx` has a pending ticket.
    #[inline]
    pub fn contains(&self, idx: usize) -> bool {
        self.open.get(idx).copied().unwrap_or(false)
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    /// Number of pending tickets (equal to the open set size).
    #[inline]
    pub fn len(&self) -> usize {
        self.heap.len()
    }
}
