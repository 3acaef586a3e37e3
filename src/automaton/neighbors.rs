//! Precomputed neighbor lists.
//!
//! Every cell's resolved neighbors are computed once, before the first
//! generation, and never change afterwards. Each list holds up to 8
//! positions in the order up, down, left, right, up-left, up-right,
//! down-left, down-right, with directions that leave the grid omitted.
//! Lists may repeat a position or contain the cell itself when tunnels fold
//! the topology; every entry counts.

use rayon::prelude::*;
use tracing::debug;

use crate::automaton::cardinal::{Cardinal, CardinalResolver};
use crate::automaton::diagonal::{Diagonal, DiagonalResolver};
use crate::automaton::tunnel::TunnelIndex;
use crate::error::{Result, WormholeError};
use crate::state::Position;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NeighborTable {
    height: u32,
    width: u32,
    entries: Vec<Vec<Position>>,
}

impl NeighborTable {
    /// Resolve all 8 directions for every cell of a `height`×`width` grid.
    /// The resolvers must share a tunnel index of the same dimensions.
    pub fn build(
        height: u32,
        width: u32,
        cardinal: &CardinalResolver<'_>,
        diagonal: &DiagonalResolver<'_>,
    ) -> Result<NeighborTable> {
        for (what, tunnels) in [
            ("cardinal resolver topology", cardinal.tunnels()),
            ("diagonal resolver topology", diagonal.tunnels()),
        ] {
            if tunnels.height() != height || tunnels.width() != width {
                return Err(WormholeError::DimensionMismatch {
                    what,
                    expected_height: height,
                    expected_width: width,
                    found_height: tunnels.height(),
                    found_width: tunnels.width(),
                });
            }
        }
        Ok(build_entries(height, width, cardinal, diagonal))
    }

    /// Build straight from a tunnel index.
    pub fn from_tunnels(tunnels: &TunnelIndex) -> NeighborTable {
        let cardinal = CardinalResolver::new(tunnels);
        let diagonal = DiagonalResolver::with_cardinal(cardinal);
        build_entries(tunnels.height(), tunnels.width(), &cardinal, &diagonal)
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Resolved neighbors of `pos`; empty for off-grid positions.
    pub fn get(&self, pos: Position) -> &[Position] {
        if pos.row >= self.height || pos.col >= self.width {
            return &[];
        }
        self.at_index(pos.row as usize * self.width as usize + pos.col as usize)
    }

    #[inline]
    pub(crate) fn at_index(&self, idx: usize) -> &[Position] {
        &self.entries[idx]
    }

    /// Total number of neighbor links across all cells.
    pub fn link_count(&self) -> usize {
        self.entries.iter().map(Vec::len).sum()
    }
}

fn build_entries(
    height: u32,
    width: u32,
    cardinal: &CardinalResolver<'_>,
    diagonal: &DiagonalResolver<'_>,
) -> NeighborTable {
    let w = width as usize;
    let size = height as usize * w;

    let entries: Vec<Vec<Position>> = (0..size)
        .into_par_iter()
        .map(|idx| {
            let pos = Position::new((idx / w) as u32, (idx % w) as u32);
            let mut list = Vec::with_capacity(8);
            list.extend(Cardinal::ALL.iter().filter_map(|&dir| cardinal.resolve(pos, dir)));
            list.extend(Diagonal::ALL.iter().filter_map(|&dir| diagonal.resolve(pos, dir)));
            list
        })
        .collect();

    let table = NeighborTable {
        height,
        width,
        entries,
    };
    debug!(
        cells = size,
        links = table.link_count(),
        "built neighbor table"
    );
    table
}
