use anyhow::{ensure, Result};
use serde::{Deserialize, Serialize};

/// Smallest playable grid: the initial snake lies flat from the center, so
/// anything smaller puts body segments or the first fruit out of bounds
pub const MIN_GRID_SIZE: usize = 4;

/// Configuration for the game
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameConfig {
    /// Side length of the square game grid, in cells
    pub grid_size: usize,
    /// Initial length of the snake
    pub initial_snake_length: usize,
    /// Milliseconds between movement ticks
    pub tick_ms: u64,
    /// Seconds allowed per puzzle
    pub question_time_secs: u32,
    /// Seconds deducted from the puzzle timer on a wrong answer
    pub wrong_answer_penalty_secs: u32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            grid_size: 20,
            initial_snake_length: 3,
            tick_ms: 250,
            question_time_secs: 120,
            wrong_answer_penalty_secs: 3,
        }
    }
}

impl GameConfig {
    /// Create a configuration with a custom grid size
    pub fn new(grid_size: usize) -> Self {
        Self {
            grid_size,
            ..Default::default()
        }
    }

    /// Create a small grid for testing
    pub fn small() -> Self {
        Self::new(10)
    }

    /// Reject configurations the engine cannot run
    pub fn validate(&self) -> Result<()> {
        ensure!(
            self.grid_size >= MIN_GRID_SIZE,
            "grid size must be at least {} (got {})",
            MIN_GRID_SIZE,
            self.grid_size
        );
        ensure!(
            self.initial_snake_length >= 1,
            "initial snake length must be at least 1"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = GameConfig::default();
        assert_eq!(config.grid_size, 20);
        assert_eq!(config.initial_snake_length, 3);
        assert_eq!(config.question_time_secs, 120);
        assert_eq!(config.wrong_answer_penalty_secs, 3);
    }

    #[test]
    fn test_custom_config() {
        let config = GameConfig::new(15);
        assert_eq!(config.grid_size, 15);
        assert_eq!(config.tick_ms, 250);
    }

    #[test]
    fn test_degenerate_grids_rejected() {
        // Grid 0 would make fruit spawning sample an empty range; grids
        // below the initial snake length put body cells out of bounds
        assert!(GameConfig::new(0).validate().is_err());
        assert!(GameConfig::new(1).validate().is_err());
        assert!(GameConfig::new(3).validate().is_err());

        assert!(GameConfig::new(MIN_GRID_SIZE).validate().is_ok());
        assert!(GameConfig::default().validate().is_ok());
    }
}
