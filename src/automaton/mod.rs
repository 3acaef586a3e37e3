//! Core automaton logic: tunnel topology, neighbor resolution, and stepping.
//!
//! Construction runs bottom-up and is frozen once the neighbor table exists:
//! `TunnelIndex` → `CardinalResolver` / `DiagonalResolver` → `NeighborTable`
//! → `LifeEngine`.

pub mod cardinal;
pub mod diagonal;
pub mod engine;
pub mod grid;
pub mod neighbors;
pub mod stepping;
pub mod tunnel;

pub use cardinal::{Cardinal, CardinalResolver};
pub use diagonal::{Diagonal, DiagonalResolver, PRECEDENCE};
pub use engine::{LifeEngine, SnapshotSet};
pub use grid::offset_within;
pub use neighbors::NeighborTable;
pub use stepping::{next_state, step_grid};
pub use tunnel::{farthest_pair, MarkerLayer, Orientation, Rgb, TunnelIndex, TunnelMap, BACKGROUND};
