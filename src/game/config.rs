use std::time::Duration;

use anyhow::{Result, ensure};
use serde::{Deserialize, Serialize};

/// Largest supported cube side. Keeps the cell count comfortably in range.
pub const MAX_GRID_SIZE: i32 = 64;

/// Configuration for the game
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Side length of the cubic grid, in cells
    pub grid_size: i32,
    /// Initial length of the snake
    pub initial_snake_length: usize,
    /// Points awarded per food eaten
    pub food_reward: u32,
    /// Milliseconds between two ticks
    pub tick_interval_ms: u64,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            grid_size: 8,
            initial_snake_length: 3,
            food_reward: 10,
            tick_interval_ms: 400,
        }
    }
}

impl GameConfig {
    /// Create a new configuration with custom grid size
    pub fn new(grid_size: i32) -> Self {
        Self {
            grid_size,
            ..Default::default()
        }
    }

    /// Create a small grid for testing
    pub fn small() -> Self {
        Self::new(4)
    }

    /// Create a large grid
    pub fn large() -> Self {
        Self::new(16)
    }

    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }

    /// Number of cells in the lattice
    pub fn cell_count(&self) -> usize {
        let side = self.grid_size.max(0) as usize;
        side * side * side
    }

    /// Cell the snake's head starts on
    pub fn center(&self) -> i32 {
        self.grid_size / 2
    }

    pub fn validate(&self) -> Result<()> {
        ensure!(
            (4..=MAX_GRID_SIZE).contains(&self.grid_size),
            "grid_size must be between 4 and {MAX_GRID_SIZE}, got {}",
            self.grid_size
        );
        ensure!(
            self.initial_snake_length >= 1,
            "initial_snake_length must be at least 1"
        );
        // The body trails along -x from the centre and must stay on the grid
        let room = self.center() as usize + 1;
        ensure!(
            self.initial_snake_length <= room,
            "initial_snake_length {} does not fit behind the centre of a {}-cell grid (max {room})",
            self.initial_snake_length,
            self.grid_size
        );
        ensure!(self.food_reward > 0, "food_reward must be positive");
        // A snake filling the grid must not overflow the score
        let max_score = self.cell_count() as u64 * u64::from(self.food_reward);
        ensure!(
            max_score <= u64::from(u32::MAX),
            "food_reward {} is too large for a {}-cell grid (max {})",
            self.food_reward,
            self.cell_count(),
            u32::MAX as u64 / self.cell_count() as u64
        );
        ensure!(self.tick_interval_ms > 0, "tick_interval_ms must be positive");
        Ok(())
    }
}
