//! Single axis-aligned steps through the tunnel topology.
//!
//! Moving off a tunnel endpoint teleports to its partner and then continues
//! one more cell in the direction of travel. Moving onto an endpoint from an
//! ordinary cell lands on the endpoint's partner instead. Only the map of the
//! matching orientation is consulted, and at most one teleport happens per
//! step.

use crate::automaton::grid::offset_within;
use crate::automaton::tunnel::{Orientation, TunnelIndex};
use crate::error::{Result, WormholeError};
use crate::state::Position;

/// One of the four axis-aligned directions.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Cardinal {
    Up,
    Down,
    Left,
    Right,
}

impl Cardinal {
    /// Enumeration order used for neighbor lists.
    pub const ALL: [Cardinal; 4] = [Cardinal::Up, Cardinal::Down, Cardinal::Left, Cardinal::Right];

    /// `(dr, dc)` for this direction.
    #[inline]
    pub const fn offset(self) -> (i32, i32) {
        match self {
            Cardinal::Up => (-1, 0),
            Cardinal::Down => (1, 0),
            Cardinal::Left => (0, -1),
            Cardinal::Right => (0, 1),
        }
    }

    #[inline]
    pub const fn orientation(self) -> Orientation {
        match self {
            Cardinal::Up | Cardinal::Down => Orientation::Vertical,
            Cardinal::Left | Cardinal::Right => Orientation::Horizontal,
        }
    }

    /// Parse a raw offset; anything but a unit cardinal step is rejected.
    pub fn from_offset(dr: i32, dc: i32) -> Result<Cardinal> {
        match (dr, dc) {
            (-1, 0) => Ok(Cardinal::Up),
            (1, 0) => Ok(Cardinal::Down),
            (0, -1) => Ok(Cardinal::Left),
            (0, 1) => Ok(Cardinal::Right),
            _ => Err(WormholeError::InvalidCardinalOffset { dr, dc }),
        }
    }
}

/// Resolves cardinal steps against a borrowed tunnel index.
#[derive(Clone, Copy, Debug)]
pub struct CardinalResolver<'a> {
    tunnels: &'a TunnelIndex,
}

impl<'a> CardinalResolver<'a> {
    pub fn new(tunnels: &'a TunnelIndex) -> Self {
        CardinalResolver { tunnels }
    }

    #[inline]
    pub fn tunnels(&self) -> &'a TunnelIndex {
        self.tunnels
    }

    /// The cell reached by one step from `pos`, or `None` if the step leaves
    /// the grid (or `pos` is already off it).
    pub fn resolve(&self, pos: Position, dir: Cardinal) -> Option<Position> {
        let height = self.tunnels.height();
        let width = self.tunnels.width();
        if pos.row >= height || pos.col >= width {
            return None;
        }

        let map = self.tunnels.map(dir.orientation());
        let (dr, dc) = dir.offset();

        // Standing on a mouth: pass through and keep going.
        if let Some(partner) = map.partner(pos) {
            return offset_within(height, width, partner, dr, dc);
        }

        let next = offset_within(height, width, pos, dr, dc)?;
        Some(map.partner(next).unwrap_or(next))
    }

    /// Like [`resolve`](Self::resolve) but from a raw `(dr, dc)` offset.
    pub fn resolve_offset(&self, pos: Position, dr: i32, dc: i32) -> Result<Option<Position>> {
        Ok(self.resolve(pos, Cardinal::from_offset(dr, dc)?))
    }

    /// Whether the plain one-cell step from `pos` lands on an endpoint of the
    /// step's own orientation. Tunnels are not followed.
    pub fn lands_on_endpoint(&self, pos: Position, dir: Cardinal) -> bool {
        let (dr, dc) = dir.offset();
        offset_within(self.tunnels.height(), self.tunnels.width(), pos, dr, dc)
            .is_some_and(|next| self.tunnels.map(dir.orientation()).is_endpoint(next))
    }
}
