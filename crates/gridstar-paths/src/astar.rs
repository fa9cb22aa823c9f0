use gridstar_core::{CancelToken, CellState, Grid, Pos};

use crate::frontier::FrontierQueue;
use crate::ledger::{CostLedger, PredecessorMap};
use crate::reconstruct::reconstruct;
use crate::result::{EndpointError, Path, PathResult, SearchStats};
use crate::traits::{AstarPather, Pather};

/// Check that `start` and `end` can be searched between on `grid`.
pub fn validate_endpoints(grid: &Grid, start: Pos, end: Pos) -> Result<(), EndpointError> {
    for p in [start, end] {
        if !grid.contains(p) {
            return Err(EndpointError::OutOfBounds(p));
        }
    }
    if start == end {
        return Err(EndpointError::Same(start));
    }
    for p in [start, end] {
        if grid.cell(p).is_some_and(|c| c.is_barrier()) {
            return Err(EndpointError::Barrier(p));
        }
    }
    Ok(())
}

/// A reusable A* driver.
///
/// Holds the optional cancellation token and the counters of the last run.
/// The cost ledger, frontier and predecessor map are created fresh for every
/// search and dropped when it returns.
#[derive(Debug, Clone, Default)]
pub struct AstarSearch {
    cancel: Option<CancelToken>,
    stats: SearchStats,
}

impl AstarSearch {
    pub fn new() -> Self {
        Self::default()
    }

    /// Check `token` once per expansion and stop with
    /// [`PathResult::Cancelled`] when it trips.
    pub fn with_cancel(mut self, token: CancelToken) -> Self {
        self.cancel = Some(token);
        self
    }

    /// Counters from the most recent call.
    #[inline]
    pub fn stats(&self) -> SearchStats {
        self.stats
    }

    fn cancelled(&self) -> bool {
        self.cancel.as_ref().is_some_and(CancelToken::is_cancelled)
    }

    /// Search between the grid's designated start and end cells.
    pub fn find_marked_path<F>(&mut self, grid: &mut Grid, on_step: F) -> PathResult
    where
        F: FnMut(&Grid),
    {
        match (grid.start(), grid.end()) {
            (Some(start), Some(end)) => self.find_path(grid, start, end, on_step),
            _ => {
                self.stats = SearchStats::default();
                log::warn!("search requested without both endpoints");
                PathResult::InvalidEndpoints(EndpointError::Missing)
            }
        }
    }

    /// Find a shortest 4-directional route from `start` to `end`.
    ///
    /// Previous search marks are wiped and adjacency is rebuilt before the
    /// loop starts. The `start` and `end` cells keep whatever state they had,
    /// and the grid's own start and end designations are never touched. `on_step` runs after every expanded cell and once more
    /// after the route has been marked; the grid it receives already holds
    /// the updated frontier, visited and path states.
    pub fn find_path<F>(&mut self, grid: &mut Grid, start: Pos, end: Pos, mut on_step: F) -> PathResult
    where
        F: FnMut(&Grid),
    {
        self.stats = SearchStats::default();
        if let Err(e) = validate_endpoints(grid, start, end) {
            log::warn!("refusing search: {e}");
            return PathResult::InvalidEndpoints(e);
        }

        grid.clear_search();
        grid.update_neighbors();

        let rng = grid.bounds();
        let mut ledger = CostLedger::new(rng);
        let mut preds = PredecessorMap::new(rng);
        let mut open = FrontierQueue::new(rng);

        let h = grid.estimate(start, end);
        ledger.set(start, 0, h);
        open.push(start, h);

        let side = grid.size();
        log::debug!("a* {start} -> {end} on {side}x{side} grid, estimate {h}");

        let mut nbuf: Vec<Pos> = Vec::with_capacity(4);

        let result = loop {
            if self.cancelled() {
                break PathResult::Cancelled;
            }
            let Some(entry) = open.pop() else {
                break PathResult::NotFound;
            };
            let current = entry.pos;

            // Superseded by a cheaper entry, either still queued or already
            // expanded.
            if !open.contains(current) || entry.f > ledger.f(current) {
                self.stats.stale += 1;
                continue;
            }
            open.remove(current);
            self.stats.expanded += 1;

            if current == end {
                let cells = reconstruct(grid, &preds, end);
                on_step(&*grid);
                self.stats.steps += 1;
                break PathResult::Found(Path::new(cells, ledger.g(end)));
            }

            let current_g = ledger.g(current);
            log::trace!("expand {current} g={current_g} f={}", entry.f);

            nbuf.clear();
            grid.neighbors(current, &mut nbuf);

            for &n in nbuf.iter() {
                let tentative = current_g + 1;
                if tentative >= ledger.g(n) {
                    continue;
                }
                preds.insert(n, current);
                let f = tentative + grid.estimate(n, end);
                ledger.set(n, tentative, f);
                if !open.contains(n) && n != end {
                    grid.mark(n, CellState::Frontier);
                }
                open.push(n, f);
            }

            on_step(&*grid);
            self.stats.steps += 1;

            if current != start {
                grid.mark(current, CellState::Visited);
            }
        };

        self.stats.pushed = open.pushed();
        log::debug!(
            "a* finished: {} (expanded {}, pushed {}, stale {})",
            result,
            self.stats.expanded,
            self.stats.pushed,
            self.stats.stale
        );
        result
    }
}

/// Run a one-off A* search. See [`AstarSearch::find_path`].
pub fn find_path<F>(grid: &mut Grid, start: Pos, end: Pos, on_step: F) -> PathResult
where
    F: FnMut(&Grid),
{
    AstarSearch::new().find_path(grid, start, end, on_step)
}

/// Run a one-off A* search between the grid's own start and end cells.
pub fn find_marked_path<F>(grid: &mut Grid, on_step: F) -> PathResult
where
    F: FnMut(&Grid),
{
    AstarSearch::new().find_marked_path(grid, on_step)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::distance::manhattan;

    fn p(row: i32, col: i32) -> Pos {
        Pos::new(row, col)
    }

    fn assert_valid_route(grid: &Grid, path: &Path, start: Pos, end: Pos) {
        let cells = path.cells();
        assert_eq!(cells.first(), Some(&start));
        assert_eq!(cells.last(), Some(&end));
        for w in cells.windows(2) {
            assert!(w[0].is_adjacent(w[1]), "{} -> {}", w[0], w[1]);
        }
        for &c in cells {
            assert!(!grid.cell(c).unwrap().is_barrier(), "{c} is a barrier");
        }
        let mut sorted = cells.to_vec();
        sorted.sort();
        sorted.dedup();
        assert_eq!(sorted.len(), cells.len(), "route revisits a cell");
        assert_eq!(path.cost() as usize, cells.len() - 1);
    }

    #[test]
    fn open_grid_corner_to_corner() {
        let mut g = Grid::new(5).unwrap();
        g.set_state(p(0, 0), CellState::Start).unwrap();
        g.set_state(p(4, 4), CellState::End).unwrap();
        let r = find_path(&mut g, p(0, 0), p(4, 4), |_| {});
        let path = r.path().expect("open grid must be solvable");
        assert_eq!(path.len(), 9);
        assert_eq!(path.cost(), 8);
        assert_valid_route(&g, path, p(0, 0), p(4, 4));
    }

    #[test]
    fn wall_separating_columns_is_not_found() {
        let mut g = Grid::from_rows(&["S#E", ".#.", ".#."]).unwrap();
        assert_eq!(find_path(&mut g, p(0, 0), p(0, 2), |_| {}), PathResult::NotFound);
    }

    #[test]
    fn identical_endpoints_rejected() {
        let mut g = Grid::new(3).unwrap();
        assert_eq!(
            find_path(&mut g, p(1, 1), p(1, 1), |_| {}),
            PathResult::InvalidEndpoints(EndpointError::Same(p(1, 1)))
        );
    }

    #[test]
    fn barrier_and_out_of_bounds_endpoints_rejected() {
        let mut g = Grid::from_rows(&["..#", "...", "..."]).unwrap();
        assert_eq!(
            find_path(&mut g, p(0, 0), p(0, 2), |_| {}),
            PathResult::InvalidEndpoints(EndpointError::Barrier(p(0, 2)))
        );
        assert_eq!(
            find_path(&mut g, p(0, 0), p(3, 0), |_| {}),
            PathResult::InvalidEndpoints(EndpointError::OutOfBounds(p(3, 0)))
        );
    }

    #[test]
    fn marked_search_requires_both_endpoints() {
        let mut g = Grid::from_rows(&["S..", "...", "..."]).unwrap();
        let mut steps = 0;
        let r = find_marked_path(&mut g, |_| steps += 1);
        assert_eq!(r, PathResult::InvalidEndpoints(EndpointError::Missing));
        assert_eq!(steps, 0);

        g.set_state(p(2, 2), CellState::End).unwrap();
        assert!(find_marked_path(&mut g, |_| {}).is_found());
    }

    #[test]
    fn route_detours_around_wall() {
        let mut g = Grid::from_rows(&[
            "S....", //
            "####.", //
            ".....", //
            ".####", //
            "....E",
        ])
        .unwrap();
        let r = find_marked_path(&mut g, |_| {});
        let path = r.path().unwrap();
        assert_eq!(path.cost(), 16);
        assert_valid_route(&g, path, p(0, 0), p(4, 4));
    }

    #[test]
    fn path_cells_are_marked_and_endpoints_kept() {
        let mut g = Grid::from_rows(&["S.#", "..#", "..E"]).unwrap();
        let r = find_marked_path(&mut g, |_| {});
        let path = r.into_path().unwrap();
        assert_eq!(g.state(p(0, 0)), Some(CellState::Start));
        assert_eq!(g.state(p(2, 2)), Some(CellState::End));
        for &c in &path.cells()[1..path.len() - 1] {
            assert_eq!(g.state(c), Some(CellState::OnPath), "{c}");
        }
        assert_eq!(g.start(), Some(p(0, 0)));
        assert_eq!(g.end(), Some(p(2, 2)));
    }

    #[test]
    fn step_callback_sees_progress() {
        let mut g = Grid::new(6).unwrap();
        let mut search = AstarSearch::new();
        let mut frontier_seen = 0;
        let mut calls = 0u64;
        let r = search.find_path(&mut g, p(0, 0), p(5, 3), |grid| {
            calls += 1;
            frontier_seen += grid
                .iter()
                .filter(|c| c.state() == CellState::Frontier)
                .count();
        });
        assert!(r.is_found());
        assert!(frontier_seen > 0);
        let stats = search.stats();
        assert_eq!(stats.steps, calls);
        // One notification per non-goal expansion plus one for the route.
        assert_eq!(stats.steps, stats.expanded);
        assert!(stats.pushed >= stats.expanded);
    }

    #[test]
    fn start_is_never_marked_visited() {
        let mut g = Grid::from_rows(&["S...", "....", "....", "...E"]).unwrap();
        find_marked_path(&mut g, |grid| {
            assert_eq!(grid.state(Pos::new(0, 0)), Some(CellState::Start));
        });
        assert!(g.iter().any(|c| c.state() == CellState::Visited));
    }

    #[test]
    fn cancelled_before_first_pop() {
        let token = CancelToken::new();
        token.cancel();
        let mut search = AstarSearch::new().with_cancel(token);
        let mut g = Grid::new(4).unwrap();
        let r = search.find_path(&mut g, p(0, 0), p(3, 3), |_| {});
        assert_eq!(r, PathResult::Cancelled);
        assert_eq!(search.stats().expanded, 0);
    }

    #[test]
    fn cancelled_from_step_callback() {
        let token = CancelToken::new();
        let trip = token.clone();
        let mut search = AstarSearch::new().with_cancel(token);
        let mut g = Grid::new(20).unwrap();
        let mut calls = 0;
        let r = search.find_path(&mut g, p(0, 0), p(19, 19), |_| {
            calls += 1;
            if calls == 3 {
                trip.cancel();
            }
        });
        assert_eq!(r, PathResult::Cancelled);
        assert_eq!(calls, 3);
    }

    #[test]
    fn repeated_search_is_identical() {
        let mut g = Grid::from_rows(&[
            "S.....", //
            ".##.#.", //
            "...#..", //
            ".#...#", //
            ".#.#..", //
            "...#.E",
        ])
        .unwrap();
        let first = find_marked_path(&mut g, |_| {});
        let after_first = g.to_string();
        let second = find_marked_path(&mut g, |_| {});
        assert!(first.is_found());
        assert_eq!(first, second);
        assert_eq!(after_first, g.to_string());
    }

    #[test]
    fn barrier_edits_between_searches_are_seen() {
        let mut g = Grid::from_rows(&["S.E", "...", "..."]).unwrap();
        assert_eq!(find_marked_path(&mut g, |_| {}).path().unwrap().cost(), 2);

        g.set_state(p(0, 1), CellState::Barrier).unwrap();
        let r = find_marked_path(&mut g, |_| {});
        assert_eq!(r.path().unwrap().cost(), 4);

        g.set_state(p(1, 1), CellState::Barrier).unwrap();
        g.set_state(p(2, 1), CellState::Barrier).unwrap();
        assert_eq!(find_marked_path(&mut g, |_| {}), PathResult::NotFound);
    }

    #[test]
    fn explicit_endpoints_keep_designations() {
        let mut g = Grid::from_rows(&["S..", "...", "..E"]).unwrap();

        let r = find_path(&mut g, p(2, 2), p(0, 0), |_| {});
        assert_eq!(r.path().unwrap().cost(), 4);
        assert_eq!(g.start(), Some(p(0, 0)));
        assert_eq!(g.end(), Some(p(2, 2)));
        assert_eq!(g.state(p(0, 0)), Some(CellState::Start));
        assert_eq!(g.state(p(2, 2)), Some(CellState::End));

        let r = find_path(&mut g, p(0, 0), p(0, 2), |_| {});
        assert_eq!(r.path().unwrap().cost(), 2);
        assert_eq!(g.end(), Some(p(2, 2)));
        assert_eq!(g.state(p(2, 2)), Some(CellState::End));
        assert_ne!(g.state(p(0, 2)), Some(CellState::End));
    }

    #[test]
    fn unmarked_endpoints_get_no_search_marks() {
        let mut g = Grid::new(3).unwrap();
        let r = find_path(&mut g, p(0, 0), p(0, 2), |_| {});
        assert!(r.is_found());
        assert_eq!(g.state(p(0, 0)), Some(CellState::Unvisited));
        assert_eq!(g.state(p(0, 2)), Some(CellState::Unvisited));
        assert_eq!(g.state(p(0, 1)), Some(CellState::OnPath));
        assert_eq!(g.start(), None);
        assert_eq!(g.end(), None);
    }

    #[test]
    fn open_grid_cost_is_manhattan() {
        let mut g = Grid::new(8).unwrap();
        for (s, e) in [(p(0, 0), p(7, 7)), (p(3, 6), p(6, 1)), (p(7, 0), p(0, 1))] {
            let r = find_path(&mut g, s, e, |_| {});
            assert_eq!(r.path().unwrap().cost(), manhattan(s, e));
        }
    }
}
