use gridstar_core::{Grid, Pos};

use crate::distance::manhattan;

/// Minimal pathfinding interface that provides neighbor enumeration.
pub trait Pather {
    /// Append neighbors of `p` into `buf`. The caller clears `buf` before calling.
    fn neighbors(&self, p: Pos, buf: &mut Vec<Pos>);
}

/// Pather with an admissible heuristic for A*.
pub trait AstarPather: Pather {
    /// Heuristic estimate of the number of moves from `from` to `to`.
    /// Must never overestimate the true cost (admissible).
    fn estimate(&self, from: Pos, to: Pos) -> i32;
}

// Reads the cached adjacency when present, so a search sees exactly what
// `Grid::update_neighbors` produced at setup.
impl Pather for Grid {
    fn neighbors(&self, p: Pos, buf: &mut Vec<Pos>) {
        match self.cell(p).and_then(|c| c.cached_neighbors()) {
            Some(ns) => buf.extend_from_slice(ns),
            None => buf.extend(self.compute_neighbors(p)),
        }
    }
}

impl AstarPather for Grid {
    #[inline]
    fn estimate(&self, from: Pos, to: Pos) -> i32 {
        manhattan(from, to)
    }
}
