//! Grid construction, diagnostics, and bounded position arithmetic.

use crate::error::{Result, WormholeError};
use crate::state::{Grid, Position};

impl Grid {
    /// Build a grid from row-major bytes. Any non-zero byte is alive.
    pub fn from_cells(height: u32, width: u32, cells: Vec<u8>) -> Result<Grid> {
        let expected = (height as usize) * (width as usize);
        if cells.len() != expected {
            return Err(WormholeError::CellCountMismatch {
                what: "occupancy grid",
                expected,
                found: cells.len(),
            });
        }
        let cells = cells.into_iter().map(|c| u8::from(c != 0)).collect();
        Ok(Grid::from_raw(height, width, cells))
    }

    /// Build a grid from fixed-width rows. Any non-zero byte is alive.
    pub fn from_rows<const W: usize>(rows: &[[u8; W]]) -> Grid {
        let cells = rows.iter().flatten().map(|&c| u8::from(c != 0)).collect();
        Grid::from_raw(rows.len() as u32, W as u32, cells)
    }

    /// Number of live cells.
    pub fn population(&self) -> usize {
        self.cells().iter().filter(|&&c| c != 0).count()
    }

    /// Positions whose state differs from `other`, in row-major order.
    pub fn diff(&self, other: &Grid) -> Result<Vec<Position>> {
        ensure_dimensions("compared grid", self.height(), self.width(), other)?;
        let width = self.width() as usize;
        Ok(self
            .cells()
            .iter()
            .zip(other.cells())
            .enumerate()
            .filter(|(_, (a, b))| a != b)
            .map(|(idx, _)| Position::new((idx / width) as u32, (idx % width) as u32))
            .collect())
    }

    /// Live positions in row-major order.
    pub fn live_positions(&self) -> Vec<Position> {
        let width = self.width() as usize;
        self.cells()
            .iter()
            .enumerate()
            .filter(|(_, &c)| c != 0)
            .map(|(idx, _)| Position::new((idx / width) as u32, (idx % width) as u32))
            .collect()
    }
}

/// Fail with `DimensionMismatch` unless `grid` is `height`×`width`.
pub(crate) fn ensure_dimensions(
    what: &'static str,
    height: u32,
    width: u32,
    grid: &Grid,
) -> Result<()> {
    if grid.height() != height || grid.width() != width {
        return Err(WormholeError::DimensionMismatch {
            what,
            expected_height: height,
            expected_width: width,
            found_height: grid.height(),
            found_width: grid.width(),
        });
    }
    Ok(())
}

/// Step `pos` by `(dr, dc)` inside a `height`×`width` grid.
/// Returns `None` when the result falls off the grid.
#[inline]
pub fn offset_within(height: u32, width: u32, pos: Position, dr: i32, dc: i32) -> Option<Position> {
    let row = pos.row.checked_add_signed(dr)?;
    let col = pos.col.checked_add_signed(dc)?;
    (row < height && col < width).then_some(Position { row, col })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_grid_is_dead() {
        let grid = Grid::new(8, 6);
        assert_eq!(grid.height(), 8);
        assert_eq!(grid.width(), 6);
        assert_eq!(grid.cells().len(), 48);
        assert_eq!(grid.population(), 0);
    }

    #[test]
    fn test_index() {
        let grid = Grid::new(4, 4);

        // First cell
        assert_eq!(grid.index(Position::new(0, 0)), 0);
        // Last cell
        assert_eq!(grid.index(Position::new(3, 3)), 15);
        assert_eq!(grid.index(Position::new(0, 1)), 1);
        assert_eq!(grid.index(Position::new(1, 0)), 4);
    }

    #[test]
    fn test_in_bounds() {
        let grid = Grid::new(4, 5);

        assert!(grid.in_bounds(Position::new(0, 0)));
        assert!(grid.in_bounds(Position::new(3, 4)));

        assert!(!grid.in_bounds(Position::new(4, 0)));
        assert!(!grid.in_bounds(Position::new(0, 5)));
    }

    #[test]
    fn test_from_cells_normalizes() {
        let grid = Grid::from_cells(2, 2, vec![0, 7, 255, 1]).unwrap();
        assert_eq!(grid.cells(), &[0, 1, 1, 1]);
        assert_eq!(grid.population(), 3);
    }

    #[test]
    fn test_from_cells_rejects_wrong_length() {
        let err = Grid::from_cells(3, 3, vec![0; 8]).unwrap_err();
        assert!(matches!(
            err,
            WormholeError::CellCountMismatch {
                expected: 9,
                found: 8,
                ..
            }
        ));
    }

    #[test]
    fn test_from_rows_is_row_major() {
        let grid = Grid::from_rows(&[[0, 1, 0], [2, 0, 0]]);
        assert_eq!(grid.height(), 2);
        assert_eq!(grid.width(), 3);
        assert_eq!(grid.live_positions(), vec![Position::new(0, 1), Position::new(1, 0)]);
    }

    #[test]
    fn test_set_and_out_of_bounds() {
        let mut grid = Grid::new(3, 3);
        grid.set(Position::new(1, 2), true);
        assert!(grid.is_alive(Position::new(1, 2)));
        grid.set(Position::new(1, 2), false);
        assert!(!grid.is_alive(Position::new(1, 2)));

        // Should not panic
        grid.set(Position::new(3, 0), true);
        assert!(!grid.is_alive(Position::new(3, 0)));
        assert_eq!(grid.population(), 0);
    }

    #[test]
    fn test_diff_lists_changed_cells() {
        let a = Grid::from_rows(&[[1, 0, 0], [0, 1, 0]]);
        let b = Grid::from_rows(&[[1, 1, 0], [0, 0, 0]]);
        assert_eq!(
            a.diff(&b).unwrap(),
            vec![Position::new(0, 1), Position::new(1, 1)]
        );
        assert!(a.diff(&a).unwrap().is_empty());
    }

    #[test]
    fn test_diff_rejects_other_dimensions() {
        let a = Grid::new(2, 3);
        let b = Grid::new(3, 2);
        assert!(matches!(
            a.diff(&b),
            Err(WormholeError::DimensionMismatch { .. })
        ));
    }

    #[test]
    fn test_offset_within() {
        let p = Position::new(0, 0);
        assert_eq!(offset_within(3, 3, p, 1, 1), Some(Position::new(1, 1)));
        assert_eq!(offset_within(3, 3, p, -1, 0), None);
        assert_eq!(offset_within(3, 3, p, 0, -1), None);
        assert_eq!(offset_within(3, 3, Position::new(2, 2), 1, 0), None);
        assert_eq!(offset_within(3, 3, Position::new(2, 2), 0, 1), None);
    }
}
