//! The [`FrontierQueue`]: a min-priority queue over `(f, insertion sequence)`
//! paired with a membership set.
//!
//! `BinaryHeap` has no decrease-key, so improving a queued cell pushes a
//! second entry for it. The older entry is left behind and recognised as
//! stale when popped.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use gridstar_core::{Pos, Range};

/// One queued cell.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct FrontierEntry {
    pub f: i32,
    pub seq: u64,
    pub pos: Pos,
}

impl Ord for FrontierEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reverse so BinaryHeap (max-heap) pops smallest (f, seq) first.
        other.f.cmp(&self.f).then_with(|| other.seq.cmp(&self.seq))
    }
}

impl PartialOrd for FrontierEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Pending cells ordered by `f`, ties broken FIFO.
#[derive(Debug, Clone)]
pub struct FrontierQueue {
    rng: Range,
    heap: BinaryHeap<FrontierEntry>,
    members: Vec<bool>,
    next_seq: u64,
}

impl FrontierQueue {
    pub fn new(rng: Range) -> Self {
        Self {
            rng,
            heap: BinaryHeap::new(),
            members: vec![false; rng.len()],
            next_seq: 0,
        }
    }

    /// Queue `pos` with priority `f` under the next sequence number and add
    /// it to the membership set. Returns the sequence number used.
    pub fn push(&mut self, pos: Pos, f: i32) -> u64 {
        let seq = self.next_seq;
        self.next_seq += 1;
        if let Some(i) = self.rng.index(pos) {
            self.members[i] = true;
        }
        self.heap.push(FrontierEntry { f, seq, pos });
        seq
    }

    /// Pop the entry with the lowest `(f, seq)`. Membership is untouched;
    /// see [`remove`](FrontierQueue::remove).
    pub fn pop(&mut self) -> Option<FrontierEntry> {
        self.heap.pop()
    }

    /// Drop `pos` from the membership set.
    pub fn remove(&mut self, pos: Pos) {
        if let Some(i) = self.rng.index(pos) {
            self.members[i] = false;
        }
    }

    /// Whether `pos` is logically in the queue.
    #[inline]
    pub fn contains(&self, pos: Pos) -> bool {
        self.rng.index(pos).is_some_and(|i| self.members[i])
    }

    /// Number of physical entries, stale ones included.
    #[inline]
    pub fn len(&self) -> usize {
        self.heap.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    /// Total pushes so far.
    #[inline]
    pub fn pushed(&self) -> u64 {
        self.next_seq
    }
}
