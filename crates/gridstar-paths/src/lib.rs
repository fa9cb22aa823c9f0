//! A* shortest-path search on `gridstar-core` grids.
//!
//! The search moves in four directions at unit cost and uses the Manhattan
//! heuristic, so every route it returns is optimal. Ties between equally
//! promising cells are broken by insertion order, which makes repeated
//! searches on an unchanged grid return the same route.
//!
//! - **A\*** search ([`find_path`], [`find_marked_path`], [`AstarSearch`])
//! - **Path reconstruction** from a [`PredecessorMap`] ([`reconstruct`])
//! - **BFS** unweighted distance maps ([`bfs_map`], [`bfs_distance`])
//!
//! The engine writes `Frontier`, `Visited` and `OnPath` states back into the
//! grid as it goes and calls the caller's `on_step` closure after each
//! expansion, so a front-end can redraw from the grid alone.
//!
//! # Trait hierarchy
//!
//! | Trait | Required for |
//! |---|---|
//! | [`Pather`] | BFS |
//! | [`AstarPather`] : [`Pather`] | A* |

mod astar;
mod bfs;
mod distance;
mod frontier;
mod ledger;
mod reconstruct;
mod result;
mod traits;

pub use astar::{AstarSearch, find_marked_path, find_path, validate_endpoints};
pub use bfs::{DistanceMap, bfs_distance, bfs_map};
pub use distance::manhattan;
pub use frontier::{FrontierEntry, FrontierQueue};
pub use ledger::{CostLedger, PredecessorMap, UNREACHABLE};
pub use reconstruct::reconstruct;
pub use result::{EndpointError, Path, PathResult, SearchStats};
pub use traits::{AstarPather, Pather};
