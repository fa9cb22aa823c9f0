//! **gridstar-core**: the square-grid model searched by `gridstar-paths`.
//!
//! This crate provides the cell identity and geometry types, the explicit
//! traversal-state enum with its rendering palette, the [`Grid`] model with
//! adjacency derivation and start/end bookkeeping, and a cooperative
//! [`CancelToken`] for drivers that want to abort a running search.

pub mod cancel;
pub mod error;
pub mod geom;
pub mod grid;
pub mod state;

pub use cancel::CancelToken;
pub use error::GridError;
pub use geom::{Pos, Range};
pub use grid::{Cell, Grid, GridSnapshot};
pub use state::{CellState, Color};
