use std::collections::VecDeque;

use gridstar_core::{Pos, Range};

use crate::ledger::UNREACHABLE;
use crate::traits::Pather;

/// Unit-cost distances from a set of sources, as produced by [`bfs_map`].
#[derive(Debug, Clone)]
pub struct DistanceMap {
    rng: Range,
    dist: Vec<i32>,
}

impl DistanceMap {
    /// Distance of `p` from the nearest source, or [`UNREACHABLE`].
    pub fn at(&self, p: Pos) -> i32 {
        self.rng.index(p).map_or(UNREACHABLE, |i| self.dist[i])
    }

    /// Number of reached cells, sources included.
    pub fn reached(&self) -> usize {
        self.dist.iter().filter(|&&d| d != UNREACHABLE).count()
    }
}

/// Compute a multi-source breadth-first search distance map over `rng`.
///
/// Each step has cost 1. Expansion stops when the distance exceeds
/// `max_dist`. Sources outside `rng` are ignored.
pub fn bfs_map<P: Pather>(pather: &P, rng: Range, sources: &[Pos], max_dist: i32) -> DistanceMap {
    let mut dist = vec![UNREACHABLE; rng.len()];
    let mut queue: VecDeque<Pos> = VecDeque::new();

    for &src in sources {
        if let Some(si) = rng.index(src) {
            if dist[si] != UNREACHABLE {
                continue;
            }
            dist[si] = 0;
            queue.push_back(src);
        }
    }

    let mut nbuf = Vec::with_capacity(4);

    while let Some(cp) = queue.pop_front() {
        let Some(ci) = rng.index(cp) else {
            continue;
        };
        let nd = dist[ci] + 1;
        if nd > max_dist {
            continue;
        }

        nbuf.clear();
        pather.neighbors(cp, &mut nbuf);

        for &np in nbuf.iter() {
            let Some(ni) = rng.index(np) else {
                continue;
            };
            if dist[ni] != UNREACHABLE {
                continue;
            }
            dist[ni] = nd;
            queue.push_back(np);
        }
    }

    DistanceMap { rng, dist }
}

/// Shortest unit-cost distance from `from` to `to`, or `None` if unreachable.
pub fn bfs_distance<P: Pather>(pather: &P, rng: Range, from: Pos, to: Pos) -> Option<i32> {
    let d = bfs_map(pather, rng, &[from], UNREACHABLE - 1).at(to);
    (d != UNREACHABLE).then_some(d)
}
