//! Core value types: grid positions and the binary cell grid.

use std::fmt;

/// A cell coordinate, `row` counted downward and `col` rightward from the
/// top-left corner.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Position {
    pub row: u32,
    pub col: u32,
}

impl Position {
    pub const fn new(row: u32, col: u32) -> Self {
        Position { row, col }
    }

    /// Squared Euclidean distance to `other`.
    pub fn distance_sq(self, other: Position) -> u64 {
        let dr = self.row.abs_diff(other.row) as u64;
        let dc = self.col.abs_diff(other.col) as u64;
        dr * dr + dc * dc
    }
}

impl From<(u32, u32)> for Position {
    fn from((row, col): (u32, u32)) -> Self {
        Position { row, col }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// An H×W grid of binary cells (0 = dead, 1 = alive), stored row-major.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Grid {
    height: u32,
    width: u32,
    cells: Vec<u8>,
}

impl Grid {
    /// An all-dead grid.
    pub fn new(height: u32, width: u32) -> Self {
        let size = (height as usize) * (width as usize);
        Grid {
            height,
            width,
            cells: vec![0; size],
        }
    }

    /// Wrap an already-normalized buffer. Callers guarantee the length.
    pub(crate) fn from_raw(height: u32, width: u32, cells: Vec<u8>) -> Self {
        debug_assert_eq!(cells.len(), (height as usize) * (width as usize));
        Grid {
            height,
            width,
            cells,
        }
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Row-major cell bytes.
    #[inline]
    pub fn cells(&self) -> &[u8] {
        &self.cells
    }

    /// Linear index of an in-bounds position.
    #[inline]
    pub fn index(&self, pos: Position) -> usize {
        pos.row as usize * self.width as usize + pos.col as usize
    }

    #[inline]
    pub fn in_bounds(&self, pos: Position) -> bool {
        pos.row < self.height && pos.col < self.width
    }

    /// Out-of-bounds reads are dead.
    pub fn is_alive(&self, pos: Position) -> bool {
        self.in_bounds(pos) && self.cells[self.index(pos)] != 0
    }

    /// Out-of-bounds writes are silently ignored.
    pub fn set(&mut self, pos: Position, alive: bool) {
        if self.in_bounds(pos) {
            let idx = self.index(pos);
            self.cells[idx] = u8::from(alive);
        }
    }
}
