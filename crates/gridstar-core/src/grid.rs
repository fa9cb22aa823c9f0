//! The [`Grid`] model: a fixed N×N matrix of [`Cell`]s.
//!
//! The grid owns its cells, tracks the session start/end endpoints and
//! caches each cell's traversable neighbours. Any barrier change drops the
//! caches of the cells around it; [`Grid::update_neighbors`] rebuilds all of
//! them and must run before every search.

use std::fmt;

use crate::error::GridError;
use crate::geom::{Pos, Range};
use crate::state::CellState;

// ---------------------------------------------------------------------------
// Cell
// ---------------------------------------------------------------------------

/// A single grid cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cell {
    pos: Pos,
    state: CellState,
    neighbors: Option<Vec<Pos>>,
}

impl Cell {
    fn new(pos: Pos) -> Self {
        Self {
            pos,
            state: CellState::Unvisited,
            neighbors: None,
        }
    }

    /// Identity of the cell.
    #[inline]
    pub fn pos(&self) -> Pos {
        self.pos
    }

    #[inline]
    pub fn row(&self) -> i32 {
        self.pos.row
    }

    #[inline]
    pub fn col(&self) -> i32 {
        self.pos.col
    }

    /// Current traversal state.
    #[inline]
    pub fn state(&self) -> CellState {
        self.state
    }

    #[inline]
    pub fn is_barrier(&self) -> bool {
        self.state == CellState::Barrier
    }

    /// Cached traversable neighbours, or `None` if the cache was never
    /// populated or has been invalidated.
    #[inline]
    pub fn cached_neighbors(&self) -> Option<&[Pos]> {
        self.neighbors.as_deref()
    }
}

// ---------------------------------------------------------------------------
// Grid
// ---------------------------------------------------------------------------

/// A square grid of cells with session start/end tracking.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    bounds: Range,
    cells: Vec<Cell>,
    start: Option<Pos>,
    end: Option<Pos>,
}

impl Grid {
    /// Create an `n`×`n` grid, every cell unvisited.
    pub fn new(n: i32) -> Result<Self, GridError> {
        if n <= 0 {
            log::warn!("rejecting grid with side length {n}");
            return Err(GridError::InvalidSize(n));
        }
        let bounds = Range::square(n);
        Ok(Self {
            bounds,
            cells: bounds.iter().map(Cell::new).collect(),
            start: None,
            end: None,
        })
    }

    /// Parse a square text map, one string per row.
    ///
    /// `.` is an open cell, `#` a barrier, `S` the start and `E` the end.
    pub fn from_rows<S: AsRef<str>>(rows: &[S]) -> Result<Self, GridError> {
        let n = rows.len() as i32;
        let mut grid = Self::new(n)?;
        for (r, line) in rows.iter().enumerate() {
            let line = line.as_ref();
            let width = line.chars().count() as i32;
            if width != n {
                return Err(GridError::NotSquare {
                    rows: n,
                    cols: width,
                });
            }
            for (c, ch) in line.chars().enumerate() {
                let p = Pos::new(r as i32, c as i32);
                let state = match ch {
                    '.' => continue,
                    '#' => CellState::Barrier,
                    'S' => CellState::Start,
                    'E' => CellState::End,
                    _ => return Err(GridError::InvalidGlyph { ch, pos: p }),
                };
                grid.set_state(p, state)?;
            }
        }
        Ok(grid)
    }

    /// Side length in cells.
    #[inline]
    pub fn size(&self) -> i32 {
        self.bounds.rows()
    }

    /// The rectangle covered by the grid.
    #[inline]
    pub fn bounds(&self) -> Range {
        self.bounds
    }

    /// Whether `p` lies inside the grid.
    #[inline]
    pub fn contains(&self, p: Pos) -> bool {
        self.bounds.contains(p)
    }

    /// Flat index of `p`, usable for per-cell side tables.
    #[inline]
    pub fn index(&self, p: Pos) -> Option<usize> {
        self.bounds.index(p)
    }

    /// Number of cells.
    #[inline]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Always `false`: a grid has at least one cell.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// The cell at `p`, or `None` if out of bounds.
    #[inline]
    pub fn cell(&self, p: Pos) -> Option<&Cell> {
        self.index(p).map(|i| &self.cells[i])
    }

    /// The state at `p`, or `None` if out of bounds.
    #[inline]
    pub fn state(&self, p: Pos) -> Option<CellState> {
        self.cell(p).map(Cell::state)
    }

    /// Current start cell.
    #[inline]
    pub fn start(&self) -> Option<Pos> {
        self.start
    }

    /// Current end cell.
    #[inline]
    pub fn end(&self) -> Option<Pos> {
        self.end
    }

    /// Row-major iterator over all cells.
    pub fn iter(&self) -> std::slice::Iter<'_, Cell> {
        self.cells.iter()
    }

    /// Positions of every barrier, row-major.
    pub fn barriers(&self) -> impl Iterator<Item = Pos> + '_ {
        self.cells.iter().filter(|c| c.is_barrier()).map(Cell::pos)
    }

    fn checked_index(&self, p: Pos) -> Result<usize, GridError> {
        self.index(p).ok_or(GridError::OutOfBounds(p))
    }

    // -----------------------------------------------------------------------
    // Mutation
    // -----------------------------------------------------------------------

    /// Set the state of `p`.
    ///
    /// Assigning `Start` or `End` first resets whichever cell held that
    /// state before, so each is held by at most one cell. Overwriting the
    /// current start or end with anything else forgets that endpoint.
    pub fn set_state(&mut self, p: Pos, state: CellState) -> Result<(), GridError> {
        let i = self.checked_index(p)?;
        let old = self.cells[i].state;
        if old == state {
            return Ok(());
        }

        match state {
            CellState::Start => {
                if let Some(prev) = self.start.replace(p) {
                    self.write(prev, CellState::Unvisited);
                }
            }
            CellState::End => {
                if let Some(prev) = self.end.replace(p) {
                    self.write(prev, CellState::Unvisited);
                }
            }
            _ => {}
        }
        match old {
            CellState::Start if self.start == Some(p) => self.start = None,
            CellState::End if self.end == Some(p) => self.end = None,
            _ => {}
        }

        self.write(p, state);
        Ok(())
    }

    /// Return `p` to `Unvisited`, forgetting it as start or end.
    pub fn reset(&mut self, p: Pos) -> Result<(), GridError> {
        self.set_state(p, CellState::Unvisited)
    }

    /// Click-style placement: the first placement sets the start, the second
    /// the end, and later ones add barriers. The current start and end are
    /// never overwritten. Returns the state of `p` afterwards.
    pub fn place(&mut self, p: Pos) -> Result<CellState, GridError> {
        let i = self.checked_index(p)?;
        let current = self.cells[i].state;
        if current.is_endpoint() {
            return Ok(current);
        }
        let state = if self.start.is_none() {
            CellState::Start
        } else if self.end.is_none() {
            CellState::End
        } else {
            CellState::Barrier
        };
        self.set_state(p, state)?;
        Ok(state)
    }

    /// Record search progress on `p`.
    ///
    /// Only `Frontier`, `Visited` and `OnPath` are accepted, and endpoints
    /// and barriers are never repainted. Returns whether the cell changed.
    pub fn mark(&mut self, p: Pos, state: CellState) -> bool {
        if !state.is_search_mark() {
            return false;
        }
        let Some(i) = self.index(p) else {
            return false;
        };
        let cell = &mut self.cells[i];
        if cell.state.is_endpoint() || cell.is_barrier() || cell.state == state {
            return false;
        }
        cell.state = state;
        true
    }

    /// Wipe frontier, visited and path marks, keeping barriers and endpoints.
    pub fn clear_search(&mut self) {
        for cell in &mut self.cells {
            if cell.state.is_search_mark() {
                cell.state = CellState::Unvisited;
            }
        }
    }

    /// Return every cell to `Unvisited` and forget both endpoints.
    pub fn clear(&mut self) {
        log::debug!("clearing {}x{} grid", self.size(), self.size());
        for cell in &mut self.cells {
            cell.state = CellState::Unvisited;
            cell.neighbors = None;
        }
        self.start = None;
        self.end = None;
    }

    // Low-level write that keeps the neighbour caches honest.
    fn write(&mut self, p: Pos, state: CellState) {
        let Some(i) = self.index(p) else {
            return;
        };
        let was_passable = self.cells[i].state.is_passable();
        self.cells[i].state = state;
        if was_passable != state.is_passable() {
            for n in p.neighbors_4() {
                if let Some(j) = self.index(n) {
                    self.cells[j].neighbors = None;
                }
            }
        }
    }

    // -----------------------------------------------------------------------
    // Adjacency
    // -----------------------------------------------------------------------

    /// The orthogonally adjacent, in-bounds, non-barrier cells of `p`, in
    /// the order up, down, left, right. Empty when `p` is out of bounds.
    pub fn compute_neighbors(&self, p: Pos) -> Vec<Pos> {
        if !self.contains(p) {
            return Vec::new();
        }
        p.neighbors_4()
            .into_iter()
            .filter(|&n| self.state(n).is_some_and(CellState::is_passable))
            .collect()
    }

    /// Neighbours of `p`, populating the cache on demand.
    pub fn adjacency(&mut self, p: Pos) -> &[Pos] {
        let Some(i) = self.index(p) else {
            return &[];
        };
        if self.cells[i].neighbors.is_none() {
            let fresh = self.compute_neighbors(p);
            self.cells[i].neighbors = Some(fresh);
        }
        self.cells[i].neighbors.as_deref().unwrap_or(&[])
    }

    /// Recompute the neighbour cache of every cell.
    pub fn update_neighbors(&mut self) {
        for i in 0..self.cells.len() {
            let fresh = self.compute_neighbors(self.cells[i].pos);
            self.cells[i].neighbors = Some(fresh);
        }
    }

    // -----------------------------------------------------------------------
    // Snapshots
    // -----------------------------------------------------------------------

    /// Capture the user-editable layout: side, barriers and endpoints.
    pub fn snapshot(&self) -> GridSnapshot {
        GridSnapshot {
            size: self.size(),
            barriers: self.barriers().collect(),
            start: self.start,
            end: self.end,
        }
    }

    /// Rebuild a grid from a snapshot. Search marks are not restored.
    pub fn from_snapshot(snap: &GridSnapshot) -> Result<Self, GridError> {
        let mut grid = Self::new(snap.size)?;
        for &b in &snap.barriers {
            grid.set_state(b, CellState::Barrier)?;
        }
        if let Some(s) = snap.start {
            grid.set_state(s, CellState::Start)?;
        }
        if let Some(e) = snap.end {
            grid.set_state(e, CellState::End)?;
        }
        Ok(grid)
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let n = self.size() as usize;
        for (i, cell) in self.cells.iter().enumerate() {
            write!(f, "{}", cell.state.glyph())?;
            if (i + 1) % n == 0 && i + 1 < self.cells.len() {
                writeln!(f)?;
            }
        }
        Ok(())
    }
}

/// The editable layout of a grid, detached from any search state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GridSnapshot {
    pub size: i32,
    pub barriers: Vec<Pos>,
    pub start: Option<Pos>,
    pub end: Option<Pos>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p(row: i32, col: i32) -> Pos {
        Pos::new(row, col)
    }

    #[test]
    fn new_rejects_non_positive_sizes() {
        assert_eq!(Grid::new(0), Err(GridError::InvalidSize(0)));
        assert_eq!(Grid::new(-3), Err(GridError::InvalidSize(-3)));
        let g = Grid::new(4).unwrap();
        assert_eq!(g.size(), 4);
        assert_eq!(g.len(), 16);
        assert!(g.iter().all(|c| c.state() == CellState::Unvisited));
    }

    #[test]
    fn start_and_end_are_unique() {
        let mut g = Grid::new(3).unwrap();
        g.set_state(p(0, 0), CellState::Start).unwrap();
        g.set_state(p(1, 1), CellState::Start).unwrap();
        assert_eq!(g.start(), Some(p(1, 1)));
        assert_eq!(g.state(p(0, 0)), Some(CellState::Unvisited));

        g.set_state(p(2, 2), CellState::End).unwrap();
        g.set_state(p(0, 2), CellState::End).unwrap();
        assert_eq!(g.end(), Some(p(0, 2)));
        assert_eq!(g.state(p(2, 2)), Some(CellState::Unvisited));

        let starts = g.iter().filter(|c| c.state() == CellState::Start).count();
        let ends = g.iter().filter(|c| c.state() == CellState::End).count();
        assert_eq!((starts, ends), (1, 1));
    }

    #[test]
    fn moving_start_onto_end_forgets_end() {
        let mut g = Grid::new(3).unwrap();
        g.set_state(p(0, 0), CellState::Start).unwrap();
        g.set_state(p(2, 2), CellState::End).unwrap();
        g.set_state(p(2, 2), CellState::Start).unwrap();
        assert_eq!(g.start(), Some(p(2, 2)));
        assert_eq!(g.end(), None);
        assert_eq!(g.state(p(0, 0)), Some(CellState::Unvisited));
    }

    #[test]
    fn overwriting_endpoint_with_barrier_forgets_it() {
        let mut g = Grid::new(3).unwrap();
        g.set_state(p(1, 1), CellState::Start).unwrap();
        g.set_state(p(1, 1), CellState::Barrier).unwrap();
        assert_eq!(g.start(), None);
        assert!(g.cell(p(1, 1)).unwrap().is_barrier());
    }

    #[test]
    fn reset_clears_session_reference() {
        let mut g = Grid::new(3).unwrap();
        g.set_state(p(0, 1), CellState::End).unwrap();
        g.reset(p(0, 1)).unwrap();
        assert_eq!(g.end(), None);
        assert_eq!(g.state(p(0, 1)), Some(CellState::Unvisited));
    }

    #[test]
    fn out_of_bounds_mutation_fails() {
        let mut g = Grid::new(2).unwrap();
        assert_eq!(
            g.set_state(p(2, 0), CellState::Barrier),
            Err(GridError::OutOfBounds(p(2, 0)))
        );
        assert_eq!(g.reset(p(-1, 0)), Err(GridError::OutOfBounds(p(-1, 0))));
        assert!(g.place(p(0, 5)).is_err());
    }

    #[test]
    fn place_follows_click_protocol() {
        let mut g = Grid::new(3).unwrap();
        assert_eq!(g.place(p(0, 0)), Ok(CellState::Start));
        assert_eq!(g.place(p(0, 0)), Ok(CellState::Start));
        assert_eq!(g.place(p(2, 2)), Ok(CellState::End));
        assert_eq!(g.place(p(1, 1)), Ok(CellState::Barrier));
        assert_eq!(g.place(p(2, 2)), Ok(CellState::End));

        g.reset(p(0, 0)).unwrap();
        assert_eq!(g.place(p(1, 0)), Ok(CellState::Start));
    }

    #[test]
    fn compute_neighbors_excludes_barriers_and_edges() {
        let mut g = Grid::new(3).unwrap();
        assert_eq!(g.compute_neighbors(p(0, 0)), vec![p(1, 0), p(0, 1)]);
        assert_eq!(
            g.compute_neighbors(p(1, 1)),
            vec![p(0, 1), p(2, 1), p(1, 0), p(1, 2)]
        );
        g.set_state(p(0, 1), CellState::Barrier).unwrap();
        assert_eq!(g.compute_neighbors(p(0, 0)), vec![p(1, 0)]);
        assert!(g.compute_neighbors(p(3, 3)).is_empty());
    }

    #[test]
    fn barrier_change_invalidates_adjacent_caches() {
        let mut g = Grid::new(3).unwrap();
        g.update_neighbors();
        assert_eq!(g.cell(p(1, 1)).unwrap().cached_neighbors().unwrap().len(), 4);

        g.set_state(p(0, 1), CellState::Barrier).unwrap();
        assert!(g.cell(p(1, 1)).unwrap().cached_neighbors().is_none());
        assert!(g.cell(p(0, 0)).unwrap().cached_neighbors().is_none());
        // Not adjacent to the change.
        assert!(g.cell(p(2, 2)).unwrap().cached_neighbors().is_some());

        assert_eq!(g.adjacency(p(1, 1)), &[p(2, 1), p(1, 0), p(1, 2)]);
        assert!(g.cell(p(1, 1)).unwrap().cached_neighbors().is_some());
    }

    #[test]
    fn non_barrier_changes_keep_caches() {
        let mut g = Grid::new(3).unwrap();
        g.update_neighbors();
        g.set_state(p(0, 1), CellState::Start).unwrap();
        g.mark(p(1, 0), CellState::Visited);
        assert!(g.cell(p(1, 1)).unwrap().cached_neighbors().is_some());
    }

    #[test]
    fn mark_never_repaints_endpoints_or_barriers() {
        let mut g = Grid::from_rows(&["S.", "#E"]).unwrap();
        assert!(!g.mark(p(0, 0), CellState::Visited));
        assert!(!g.mark(p(1, 1), CellState::Frontier));
        assert!(!g.mark(p(1, 0), CellState::OnPath));
        assert!(!g.mark(p(0, 1), CellState::Barrier));
        assert!(g.mark(p(0, 1), CellState::Frontier));
        assert!(!g.mark(p(0, 1), CellState::Frontier));
        assert_eq!(g.state(p(0, 1)), Some(CellState::Frontier));
    }

    #[test]
    fn clear_search_keeps_layout() {
        let mut g = Grid::from_rows(&["S.#", "...", "#.E"]).unwrap();
        g.mark(p(0, 1), CellState::Visited);
        g.mark(p(1, 1), CellState::OnPath);
        g.mark(p(1, 2), CellState::Frontier);
        g.clear_search();
        assert_eq!(g.to_string(), "S.#\n...\n#.E");
    }

    #[test]
    fn clear_resets_everything() {
        let mut g = Grid::from_rows(&["S#", "#E"]).unwrap();
        g.clear();
        assert_eq!(g.start(), None);
        assert_eq!(g.end(), None);
        assert_eq!(g.barriers().count(), 0);
    }

    #[test]
    fn from_rows_validates_layout() {
        assert_eq!(
            Grid::from_rows(&["..", "."]).unwrap_err(),
            GridError::NotSquare { rows: 2, cols: 1 }
        );
        assert_eq!(
            Grid::from_rows(&[".?", ".."]).unwrap_err(),
            GridError::InvalidGlyph {
                ch: '?',
                pos: p(0, 1)
            }
        );
        let empty: [&str; 0] = [];
        assert_eq!(Grid::from_rows(&empty), Err(GridError::InvalidSize(0)));
    }

    #[test]
    fn snapshot_round_trip() {
        let g = Grid::from_rows(&["S..", ".#.", "..E"]).unwrap();
        let snap = g.snapshot();
        assert_eq!(snap.barriers, vec![p(1, 1)]);
        assert_eq!(snap.start, Some(p(0, 0)));
        let back = Grid::from_snapshot(&snap).unwrap();
        assert_eq!(back.to_string(), g.to_string());
    }
}
