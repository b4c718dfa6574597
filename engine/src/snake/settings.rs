use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::config::Validate;
use super::types::Point;

pub const MAX_GRID_SIZE: usize = 1000;

#[derive(Debug, PartialEq, Serialize, Deserialize, Clone)]
pub struct SnakeSettings {
    pub grid_size: usize,
    pub initial_position: Point,
    /// Tick intervals from slowest to fastest; difficulty level `n` selects
    /// the `n`-th entry (1-based).
    pub tick_intervals_ms: Vec<u64>,
    pub default_difficulty: usize,
    /// Interval armed by a restart, independent of the selected difficulty.
    pub restart_interval_ms: u64,
    #[serde(default)]
    pub seed: Option<u64>,
}

impl SnakeSettings {
    pub fn difficulty_levels(&self) -> usize {
        self.tick_intervals_ms.len()
    }

    /// Interval for a 1-based difficulty level, `None` when out of range.
    pub fn tick_interval(&self, level: usize) -> Option<Duration> {
        let idx = level.checked_sub(1)?;
        self.tick_intervals_ms
            .get(idx)
            .map(|&ms| Duration::from_millis(ms))
    }

    pub fn restart_interval(&self) -> Duration {
        Duration::from_millis(self.restart_interval_ms)
    }
}

impl Validate for SnakeSettings {
    fn validate(&self) -> Result<(), String> {
        if self.grid_size == 0 || self.grid_size > MAX_GRID_SIZE {
            return Err(format!(
                "Grid size must be between 1 and {}, got {}",
                MAX_GRID_SIZE, self.grid_size
            ));
        }
        if self.initial_position.x >= self.grid_size || self.initial_position.y >= self.grid_size {
            return Err(format!(
                "Initial position {} is outside a {}x{} grid",
                self.initial_position, self.grid_size, self.grid_size
            ));
        }
        if self.tick_intervals_ms.is_empty() {
            return Err("At least one tick interval is required".to_string());
        }
        if self.tick_intervals_ms.contains(&0) {
            return Err("Tick intervals must be positive".to_string());
        }
        if self.tick_interval(self.default_difficulty).is_none() {
            return Err(format!(
                "Default difficulty must be between 1 and {}, got {}",
                self.difficulty_levels(),
                self.default_difficulty
            ));
        }
        if self.restart_interval_ms == 0 {
            return Err("Restart interval must be positive".to_string());
        }
        Ok(())
    }
}

impl Default for SnakeSettings {
    fn default() -> Self {
        Self {
            grid_size: 35,
            initial_position: Point::new(17, 17),
            tick_intervals_ms: vec![1000, 500, 100, 50, 10],
            default_difficulty: 3,
            restart_interval_ms: 100,
            seed: None,
        }
    }
}
