//! Run configuration.

use serde::{Deserialize, Serialize};

use crate::error::{Result, WormholeError};

/// How long to run and which generations to keep.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RunConfig {
    /// Generations to advance.
    pub total_iterations: u64,
    /// Generations to snapshot. Generation 1 is the first stepped grid.
    pub targets: Vec<u64>,
    /// Worker threads for stepping (0 is treated as 1).
    pub threads: u8,
}

impl Default for RunConfig {
    fn default() -> Self {
        RunConfig {
            total_iterations: 1000,
            targets: vec![1, 10, 100, 1000],
            threads: 1,
        }
    }
}

impl RunConfig {
    /// Every target must be reachable: `1 <= target <= total_iterations`.
    pub fn validate(&self) -> Result<()> {
        if let Some(&bad) = self
            .targets
            .iter()
            .find(|&&t| t == 0 || t > self.total_iterations)
        {
            return Err(WormholeError::InvalidConfig(format!(
                "target {bad} is outside 1..={}",
                self.total_iterations
            )));
        }
        Ok(())
    }
}
