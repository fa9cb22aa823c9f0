//! Per-search cost bookkeeping: the [`CostLedger`] and [`PredecessorMap`].
//!
//! Both are flat tables indexed by the grid's row-major cell index and live
//! for exactly one search.

use gridstar_core::{Pos, Range};

/// Sentinel value meaning "+infinity" for path costs.
pub const UNREACHABLE: i32 = i32::MAX;

/// Best-known cost from the start (`g`) and heuristic-augmented priority
/// (`f`) for every cell of a grid.
#[derive(Debug, Clone)]
pub struct CostLedger {
    rng: Range,
    g: Vec<i32>,
    f: Vec<i32>,
}

impl CostLedger {
    /// A ledger for `rng` with every cost at [`UNREACHABLE`].
    pub fn new(rng: Range) -> Self {
        let len = rng.len();
        Self {
            rng,
            g: vec![UNREACHABLE; len],
            f: vec![UNREACHABLE; len],
        }
    }

    /// Best known cost from the start, [`UNREACHABLE`] if none.
    #[inline]
    pub fn g(&self, p: Pos) -> i32 {
        self.rng.index(p).map_or(UNREACHABLE, |i| self.g[i])
    }

    /// `g` plus the heuristic estimate to the target.
    #[inline]
    pub fn f(&self, p: Pos) -> i32 {
        self.rng.index(p).map_or(UNREACHABLE, |i| self.f[i])
    }

    /// Record new costs for `p`. Out-of-range positions are ignored.
    #[inline]
    pub fn set(&mut self, p: Pos, g: i32, f: i32) {
        if let Some(i) = self.rng.index(p) {
            self.g[i] = g;
            self.f[i] = f;
        }
    }
}

/// For each improved cell, the cell it was most recently improved from.
#[derive(Debug, Clone)]
pub struct PredecessorMap {
    rng: Range,
    prev: Vec<Option<Pos>>,
}

impl PredecessorMap {
    pub fn new(rng: Range) -> Self {
        Self {
            rng,
            prev: vec![None; rng.len()],
        }
    }

    /// The predecessor of `p`, if any.
    #[inline]
    pub fn get(&self, p: Pos) -> Option<Pos> {
        self.rng.index(p).and_then(|i| self.prev[i])
    }

    /// Record (or overwrite) the predecessor of `p`.
    #[inline]
    pub fn insert(&mut self, p: Pos, from: Pos) {
        if let Some(i) = self.rng.index(p) {
            self.prev[i] = Some(from);
        }
    }

    /// Number of cells with a recorded predecessor.
    pub fn len(&self) -> usize {
        self.prev.iter().filter(|p| p.is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
