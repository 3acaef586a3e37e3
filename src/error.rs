//! Error type shared by every fallible operation in the crate.

use thiserror::Error;

/// Structural failures that abort construction or a run.
///
/// Per-cell anomalies (a direction with no neighbor, an unpaired marker) are
/// not errors; they resolve to `None` or are skipped.
#[derive(Debug, Error)]
pub enum WormholeError {
    #[error("{what} is {found_height}x{found_width}, expected {expected_height}x{expected_width}")]
    DimensionMismatch {
        what: &'static str,
        expected_height: u32,
        expected_width: u32,
        found_height: u32,
        found_width: u32,
    },

    #[error("{what} holds {found} cells, expected {expected}")]
    CellCountMismatch {
        what: &'static str,
        expected: usize,
        found: usize,
    },

    #[error("marker at ({row}, {col}) lies outside a {height}x{width} grid")]
    MarkerOutOfBounds {
        row: u32,
        col: u32,
        height: u32,
        width: u32,
    },

    #[error("position ({row}, {col}) carries more than one marker key")]
    DuplicateMarker { row: u32, col: u32 },

    #[error("({dr}, {dc}) is not a unit cardinal offset")]
    InvalidCardinalOffset { dr: i32, dc: i32 },

    #[error("({dr}, {dc}) is not a unit diagonal offset")]
    InvalidDiagonalOffset { dr: i32, dc: i32 },

    #[error("invalid run configuration: {0}")]
    InvalidConfig(String),

    #[error("failed to build worker pool")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}

pub type Result<T> = std::result::Result<T, WormholeError>;
