//! Diagonal steps as two cardinal legs.
//!
//! A diagonal step is never a single jump: it is a vertical leg and a
//! horizontal leg, each of which may teleport. The vertical leg goes first
//! unless both legs' plain destinations are tunnel mouths, in which case the
//! leg ranked higher in `top > right > bottom > left` goes first.

use crate::automaton::cardinal::{Cardinal, CardinalResolver};
use crate::automaton::tunnel::TunnelIndex;
use crate::error::{Result, WormholeError};
use crate::state::Position;

/// Leg priority, highest first.
pub const PRECEDENCE: [Cardinal; 4] = [Cardinal::Up, Cardinal::Right, Cardinal::Down, Cardinal::Left];

fn precedence(dir: Cardinal) -> usize {
    PRECEDENCE
        .iter()
        .position(|&d| d == dir)
        .unwrap_or(PRECEDENCE.len())
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Diagonal {
    UpLeft,
    UpRight,
    DownLeft,
    DownRight,
}

impl Diagonal {
    /// Enumeration order used for neighbor lists.
    pub const ALL: [Diagonal; 4] = [
        Diagonal::UpLeft,
        Diagonal::UpRight,
        Diagonal::DownLeft,
        Diagonal::DownRight,
    ];

    /// The `(vertical, horizontal)` legs of this step.
    #[inline]
    pub const fn legs(self) -> (Cardinal, Cardinal) {
        match self {
            Diagonal::UpLeft => (Cardinal::Up, Cardinal::Left),
            Diagonal::UpRight => (Cardinal::Up, Cardinal::Right),
            Diagonal::DownLeft => (Cardinal::Down, Cardinal::Left),
            Diagonal::DownRight => (Cardinal::Down, Cardinal::Right),
        }
    }

    #[inline]
    pub const fn offset(self) -> (i32, i32) {
        match self {
            Diagonal::UpLeft => (-1, -1),
            Diagonal::UpRight => (-1, 1),
            Diagonal::DownLeft => (1, -1),
            Diagonal::DownRight => (1, 1),
        }
    }

    pub fn from_offset(dr: i32, dc: i32) -> Result<Diagonal> {
        match (dr, dc) {
            (-1, -1) => Ok(Diagonal::UpLeft),
            (-1, 1) => Ok(Diagonal::UpRight),
            (1, -1) => Ok(Diagonal::DownLeft),
            (1, 1) => Ok(Diagonal::DownRight),
            _ => Err(WormholeError::InvalidDiagonalOffset { dr, dc }),
        }
    }
}

#[derive(Clone, Copy, Debug)]
pub struct DiagonalResolver<'a> {
    cardinal: CardinalResolver<'a>,
}

impl<'a> DiagonalResolver<'a> {
    pub fn new(tunnels: &'a TunnelIndex) -> Self {
        DiagonalResolver {
            cardinal: CardinalResolver::new(tunnels),
        }
    }

    pub fn with_cardinal(cardinal: CardinalResolver<'a>) -> Self {
        DiagonalResolver { cardinal }
    }

    #[inline]
    pub fn tunnels(&self) -> &'a TunnelIndex {
        self.cardinal.tunnels()
    }

    /// Which leg runs first from `pos`, as `(first, second)`.
    pub fn leg_order(&self, pos: Position, dir: Diagonal) -> (Cardinal, Cardinal) {
        let (vertical, horizontal) = dir.legs();
        let contested = self.cardinal.lands_on_endpoint(pos, vertical)
            && self.cardinal.lands_on_endpoint(pos, horizontal);

        if contested && precedence(horizontal) < precedence(vertical) {
            (horizontal, vertical)
        } else {
            (vertical, horizontal)
        }
    }

    /// The cell reached by one diagonal step, or `None` if either leg leaves
    /// the grid.
    pub fn resolve(&self, pos: Position, dir: Diagonal) -> Option<Position> {
        let (first, second) = self.leg_order(pos, dir);
        let mid = self.cardinal.resolve(pos, first)?;
        self.cardinal.resolve(mid, second)
    }

    pub fn resolve_offset(&self, pos: Position, dr: i32, dc: i32) -> Result<Option<Position>> {
        Ok(self.resolve(pos, Diagonal::from_offset(dr, dc)?))
    }
}
