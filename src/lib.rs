//! Wormhole Life - Conway's Game of Life on a grid with tunnels
//!
//! Pairs of grid positions act as tunnel mouths: stepping onto one lands on
//! its partner, stepping off one comes out past its partner. Every cell's
//! neighbors are resolved through the tunnels once, then generations are
//! stepped with the standard B3/S23 rule against that fixed table.

pub mod automaton;
pub mod config;
pub mod error;
pub mod state;

pub use automaton::{
    Cardinal, CardinalResolver, Diagonal, DiagonalResolver, LifeEngine, MarkerLayer,
    NeighborTable, Orientation, SnapshotSet, TunnelIndex, TunnelMap,
};
pub use config::RunConfig;
pub use error::{Result, WormholeError};
pub use state::{Grid, Position};
