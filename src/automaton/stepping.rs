//! Generation stepping with B3/S23 rules over a neighbor table.

use rayon::prelude::*;

use super::grid::ensure_dimensions;
use super::neighbors::NeighborTable;
use crate::error::Result;
use crate::state::Grid;

/// B3/S23 rules:
/// - Birth: A dead cell with exactly 3 live neighbors becomes alive
/// - Survival: A live cell with 2 or 3 live neighbors stays alive
#[inline]
pub fn next_state(alive: bool, live_neighbors: usize) -> bool {
    if alive {
        live_neighbors == 2 || live_neighbors == 3
    } else {
        live_neighbors == 3
    }
}

/// Live entries in the neighbor list of cell `idx`.
#[inline]
fn live_neighbors(grid: &Grid, neighbors: &NeighborTable, idx: usize) -> usize {
    let cells = grid.cells();
    neighbors
        .at_index(idx)
        .iter()
        .filter(|&&pos| cells[grid.index(pos)] != 0)
        .count()
}

/// Compute the next generation of `grid` into a fresh grid.
///
/// All reads come from `grid`, all writes go to the new buffer, so rows are
/// evaluated in parallel on the current rayon pool.
pub fn step_grid(grid: &Grid, neighbors: &NeighborTable) -> Result<Grid> {
    ensure_dimensions("grid", neighbors.height(), neighbors.width(), grid)?;
    Ok(step_unchecked(grid, neighbors))
}

/// `step_grid` without the dimension check.
pub(crate) fn step_unchecked(grid: &Grid, neighbors: &NeighborTable) -> Grid {
    let width = grid.width() as usize;
    let mut next_cells = vec![0u8; grid.cells().len()];

    if width > 0 {
        next_cells
            .par_chunks_mut(width)
            .enumerate()
            .for_each(|(row, out)| {
                let base = row * width;
                for (col, cell) in out.iter_mut().enumerate() {
                    let idx = base + col;
                    let alive = grid.cells()[idx] != 0;
                    let count = live_neighbors(grid, neighbors, idx);
                    *cell = u8::from(next_state(alive, count));
                }
            });
    }

    Grid::from_raw(grid.height(), grid.width(), next_cells)
}
