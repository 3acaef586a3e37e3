//! The simulation driver.
//!
//! `LifeEngine` owns the current grid and the frozen neighbor table. Each
//! step reads generation N and writes generation N+1 into a new buffer, which
//! replaces the old grid only once it is complete.

use std::collections::{BTreeMap, BTreeSet};
use std::hash::Hash;
use std::ops::RangeInclusive;

use tracing::{info, warn};

use super::grid::ensure_dimensions;
use super::neighbors::NeighborTable;
use super::stepping::step_unchecked;
use super::tunnel::{MarkerLayer, TunnelIndex};
use crate::config::RunConfig;
use crate::error::Result;
use crate::state::Grid;

/// Captured grids keyed by generation.
pub type SnapshotSet = BTreeMap<u64, Grid>;

pub struct LifeEngine {
    /// Current generation.
    grid: Grid,

    /// Resolved neighbors, never modified after construction.
    neighbors: NeighborTable,

    /// Number of steps taken so far.
    generation: u64,

    /// Deep copies captured by `run`.
    snapshots: SnapshotSet,

    /// Rayon thread pool used for row evaluation.
    thread_pool: rayon::ThreadPool,
}

/// Generations a run of `total_iterations` steps passes through.
fn run_window(generation: u64, total_iterations: u64) -> RangeInclusive<u64> {
    generation.saturating_add(1)..=generation.saturating_add(total_iterations)
}

fn build_pool(threads: u8) -> Result<rayon::ThreadPool> {
    let threads = if threads == 0 { 1 } else { threads as usize };
    Ok(rayon::ThreadPoolBuilder::new()
        .num_threads(threads)
        .thread_name(|i| format!("wormhole-life-{i}"))
        .build()?)
}

impl LifeEngine {
    /// Create an engine at generation 0. `grid` must match the table.
    pub fn new(grid: Grid, neighbors: NeighborTable, threads: u8) -> Result<Self> {
        ensure_dimensions("occupancy grid", neighbors.height(), neighbors.width(), &grid)?;
        Ok(LifeEngine {
            grid,
            neighbors,
            generation: 0,
            snapshots: SnapshotSet::new(),
            thread_pool: build_pool(threads)?,
        })
    }

    /// Build the whole topology from marker layers, then the engine.
    /// Both layers must have the grid's dimensions.
    pub fn from_layers<K: Eq + Hash>(
        grid: Grid,
        horizontal: &MarkerLayer<K>,
        vertical: &MarkerLayer<K>,
        threads: u8,
    ) -> Result<Self> {
        let tunnels = TunnelIndex::build(grid.height(), grid.width(), horizontal, vertical)?;
        let neighbors = NeighborTable::from_tunnels(&tunnels);
        LifeEngine::new(grid, neighbors, threads)
    }

    #[inline]
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    #[inline]
    pub fn neighbors(&self) -> &NeighborTable {
        &self.neighbors
    }

    #[inline]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Worker threads in the stepping pool.
    #[inline]
    pub fn threads(&self) -> usize {
        self.thread_pool.current_num_threads()
    }

    #[inline]
    pub fn snapshots(&self) -> &SnapshotSet {
        &self.snapshots
    }

    pub fn into_snapshots(self) -> SnapshotSet {
        self.snapshots
    }

    /// The next generation, leaving the engine untouched.
    pub fn step(&self) -> Grid {
        self.thread_pool
            .install(|| step_unchecked(&self.grid, &self.neighbors))
    }

    /// Replace the grid with the next generation.
    pub fn advance(&mut self) -> &Grid {
        self.grid = self.step();
        self.generation += 1;
        &self.grid
    }

    /// Advance `total_iterations` generations, keeping a copy of the grid at
    /// every generation listed in `targets`.
    pub fn run(&mut self, total_iterations: u64, targets: &BTreeSet<u64>) -> &SnapshotSet {
        let window = run_window(self.generation, total_iterations);
        let unreachable: Vec<u64> = targets
            .iter()
            .copied()
            .filter(|t| !window.contains(t))
            .collect();
        if !unreachable.is_empty() {
            warn!(
                ?unreachable,
                first = *window.start(),
                last = *window.end(),
                "run targets outside this run"
            );
        }

        for _ in 0..total_iterations {
            self.advance();
            if targets.contains(&self.generation) {
                info!(
                    generation = self.generation,
                    population = self.grid.population(),
                    "captured snapshot"
                );
                self.snapshots.insert(self.generation, self.grid.clone());
            }
        }
        &self.snapshots
    }

    /// Validate `config`, resize the pool to its thread count, then run it.
    pub fn run_config(&mut self, config: &RunConfig) -> Result<&SnapshotSet> {
        config.validate()?;
        let threads = usize::from(config.threads.max(1));
        if threads != self.threads() {
            self.thread_pool = build_pool(config.threads)?;
        }
        let targets: BTreeSet<u64> = config.targets.iter().copied().collect();
        Ok(self.run(config.total_iterations, &targets))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::WormholeError;
    use crate::state::Position;

    fn blinker_engine(threads: u8) -> LifeEngine {
        let grid = Grid::from_rows(&[
            [0, 0, 0, 0, 0],
            [0, 0, 0, 0, 0],
            [0, 1, 1, 1, 0],
            [0, 0, 0, 0, 0],
            [0, 0, 0, 0, 0],
        ]);
        let empty = MarkerLayer::<u8>::empty(5, 5);
        LifeEngine::from_layers(grid, &empty, &empty, threads).unwrap()
    }

    #[test]
    fn test_create_engine() {
        let engine = blinker_engine(1);
        assert_eq!(engine.generation(), 0);
        assert_eq!(engine.grid().population(), 3);
        assert!(engine.snapshots().is_empty());
    }

    #[test]
    fn test_step_is_pure() {
        let engine = blinker_engine(1);
        let before = engine.grid().clone();
        let next = engine.step();

        assert_eq!(engine.grid(), &before);
        assert_eq!(engine.generation(), 0);
        assert_ne!(next, before);
    }

    #[test]
    fn test_advance_increments_generation() {
        let mut engine = blinker_engine(1);
        engine.advance();
        assert_eq!(engine.generation(), 1);
        assert!(engine.grid().is_alive(Position::new(1, 2)));
        engine.advance();
        assert_eq!(engine.generation(), 2);
        assert!(engine.grid().is_alive(Position::new(2, 1)));
    }

    #[test]
    fn test_run_captures_targets_only() {
        let mut engine = blinker_engine(1);
        let snapshots = engine.run(10, &BTreeSet::from([1, 10]));

        assert_eq!(snapshots.len(), 2);
        assert_eq!(snapshots.keys().copied().collect::<Vec<_>>(), vec![1, 10]);
        assert_eq!(engine.generation(), 10);
    }

    #[test]
    fn test_snapshots_are_deep_copies() {
        let mut engine = blinker_engine(1);
        engine.run(10, &BTreeSet::from([1, 10]));
        let at_ten = engine.snapshots()[&10].clone();
        assert_eq!(engine.grid(), &at_ten);

        engine.advance();
        assert_ne!(engine.grid(), &at_ten);
        assert_eq!(engine.snapshots()[&10], at_ten);
        // Odd generations show the vertical phase
        assert_eq!(engine.snapshots()[&1], *engine.grid());
    }

    #[test]
    fn test_unreachable_targets_are_skipped() {
        let mut engine = blinker_engine(1);
        let snapshots = engine.run(3, &BTreeSet::from([0, 2, 100]));
        assert_eq!(snapshots.keys().copied().collect::<Vec<_>>(), vec![2]);
    }

    #[test]
    fn test_run_config_validates() {
        let mut engine = blinker_engine(1);
        let bad = RunConfig {
            total_iterations: 5,
            targets: vec![6],
            threads: 1,
        };
        assert!(matches!(
            engine.run_config(&bad),
            Err(WormholeError::InvalidConfig(_))
        ));
        assert_eq!(engine.generation(), 0);

        let good = RunConfig {
            total_iterations: 5,
            targets: vec![5],
            threads: 1,
        };
        assert_eq!(engine.run_config(&good).unwrap().len(), 1);
    }

    #[test]
    fn test_grid_must_match_table() {
        let table = NeighborTable::from_tunnels(&TunnelIndex::without_tunnels(4, 4));
        let err = LifeEngine::new(Grid::new(4, 5), table, 1).err().unwrap();
        assert!(matches!(err, WormholeError::DimensionMismatch { .. }));
    }

    #[test]
    fn test_layers_must_match_grid() {
        let h = MarkerLayer::<u8>::empty(5, 5);
        let v = MarkerLayer::<u8>::empty(6, 5);
        let err = LifeEngine::from_layers(Grid::new(5, 5), &h, &v, 1).err().unwrap();
        assert!(matches!(err, WormholeError::DimensionMismatch { .. }));
    }

    #[test]
    fn test_zero_threads_falls_back_to_one() {
        let mut engine = blinker_engine(0);
        engine.advance();
        assert_eq!(engine.generation(), 1);
    }

    #[test]
    fn test_run_config_resizes_pool() {
        let mut engine = blinker_engine(1);
        assert_eq!(engine.threads(), 1);

        let config = RunConfig {
            total_iterations: 2,
            targets: vec![2],
            threads: 4,
        };
        engine.run_config(&config).unwrap();
        assert_eq!(engine.threads(), 4);
        assert_eq!(engine.generation(), 2);

        let zero = RunConfig {
            threads: 0,
            ..config
        };
        engine.run_config(&zero).unwrap();
        assert_eq!(engine.threads(), 1);
        assert_eq!(engine.generation(), 4);
    }

    #[test]
    fn test_run_window_saturates() {
        assert_eq!(run_window(0, 10), 1..=10);
        assert_eq!(run_window(1, u64::MAX), 2..=u64::MAX);
        assert_eq!(run_window(u64::MAX, 5), u64::MAX..=u64::MAX);

        // A zero-step run after advancing computes the window without stepping.
        let mut engine = blinker_engine(1);
        engine.advance();
        assert!(engine.run(0, &BTreeSet::from([u64::MAX])).is_empty());
        assert_eq!(engine.generation(), 1);
    }

    #[test]
    fn test_into_snapshots_keeps_captures() {
        let mut engine = blinker_engine(1);
        engine.run(3, &BTreeSet::from([1, 3]));
        let vertical = engine.grid().clone();

        let snapshots = engine.into_snapshots();
        assert_eq!(snapshots.len(), 2);
        assert_eq!(snapshots[&1], vertical);
        assert_eq!(snapshots[&3], vertical);
    }
}
