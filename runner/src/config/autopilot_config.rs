use serde::{Deserialize, Serialize};
use snake_engine::config::Validate;
use snake_engine::snake::AutopilotStrategy;

pub const MAX_AUTOPILOT_GAMES: u32 = 10_000;

#[derive(Debug, PartialEq, Serialize, Deserialize, Clone, Copy)]
pub struct AutopilotConfig {
    /// `None` reads commands from stdin instead.
    pub strategy: Option<AutopilotStrategy>,
    pub games: u32,
}

impl Validate for AutopilotConfig {
    fn validate(&self) -> Result<(), String> {
        if self.games == 0 || self.games > MAX_AUTOPILOT_GAMES {
            return Err(format!(
                "Autopilot games must be between 1 and {}, got {}",
                MAX_AUTOPILOT_GAMES, self.games
            ));
        }
        Ok(())
    }
}

impl Default for AutopilotConfig {
    fn default() -> Self {
        Self {
            strategy: None,
            games: 1,
        }
    }
}
