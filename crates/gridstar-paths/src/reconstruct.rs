use gridstar_core::{CellState, Grid, Pos};

use crate::ledger::PredecessorMap;

/// Walk `preds` backwards from `end` and return the route start → end.
///
/// Every cell strictly between the endpoints is marked `OnPath`; the start
/// and end keep their states. The walk stops at the first cell without a
/// predecessor, or after visiting as many cells as the grid holds if the
/// map contains a cycle.
pub fn reconstruct(grid: &mut Grid, preds: &PredecessorMap, end: Pos) -> Vec<Pos> {
    let mut cells = vec![end];
    let mut current = end;
    while let Some(prev) = preds.get(current) {
        if cells.len() >= grid.len() {
            log::error!("predecessor chain from {end} does not terminate");
            break;
        }
        // The last cell of the walk is the start.
        if prev != end && preds.get(prev).is_some() {
            grid.mark(prev, CellState::OnPath);
        }
        cells.push(prev);
        current = prev;
    }
    cells.reverse();
    cells
}
