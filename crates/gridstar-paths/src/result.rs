//! Search outcomes: [`PathResult`], [`Path`], [`EndpointError`] and
//! [`SearchStats`].

use std::fmt;

use gridstar_core::Pos;

/// Why a search refused to start.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum EndpointError {
    /// The grid has no start or no end designated.
    Missing,
    /// Start and end are the same cell.
    Same(Pos),
    /// An endpoint is a barrier.
    Barrier(Pos),
    /// An endpoint lies outside the grid.
    OutOfBounds(Pos),
}

impl fmt::Display for EndpointError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Missing => f.write_str("start or end is not set"),
            Self::Same(p) => write!(f, "start and end are both {p}"),
            Self::Barrier(p) => write!(f, "endpoint {p} is a barrier"),
            Self::OutOfBounds(p) => write!(f, "endpoint {p} is outside the grid"),
        }
    }
}

impl std::error::Error for EndpointError {}

/// An ordered route from start to end, both included.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Path {
    cells: Vec<Pos>,
    cost: i32,
}

impl Path {
    pub(crate) fn new(cells: Vec<Pos>, cost: i32) -> Self {
        Self { cells, cost }
    }

    /// The cells, start first.
    #[inline]
    pub fn cells(&self) -> &[Pos] {
        &self.cells
    }

    /// The best-known cost of the end cell when the search finished. Every
    /// move costs 1, so this equals `len() - 1`.
    #[inline]
    pub fn cost(&self) -> i32 {
        self.cost
    }

    /// Number of cells on the route.
    #[inline]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn start(&self) -> Option<Pos> {
        self.cells.first().copied()
    }

    pub fn end(&self) -> Option<Pos> {
        self.cells.last().copied()
    }
}

/// Terminal outcome of one search.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PathResult {
    Found(Path),
    /// The frontier emptied without reaching the end.
    NotFound,
    InvalidEndpoints(EndpointError),
    /// The driver's cancellation token tripped mid-search.
    Cancelled,
}

impl PathResult {
    #[inline]
    pub fn is_found(&self) -> bool {
        matches!(self, Self::Found(_))
    }

    /// The route, if one was found.
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

impl fmt::Display for PathResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Found(p) => write!(f, "path found: {} cells, cost {}", p.len(), p.cost()),
            Self::NotFound => f.write_str("no path"),
            Self::InvalidEndpoints(e) => write!(f, "invalid endpoints: {e}"),
            Self::Cancelled => f.write_str("search cancelled"),
        }
    }
}

/// Counters from the most recent search.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SearchStats {
    /// Cells popped and expanded (the goal pop included).
    pub expanded: u64,
    /// Entries pushed onto the frontier queue.
    pub pushed: u64,
    /// Popped entries discarded as superseded.
    pub stale: u64,
    /// `on_step` notifications delivered.
    pub steps: u64,
}
