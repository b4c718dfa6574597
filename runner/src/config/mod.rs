mod autopilot_config;
mod main_config;

pub use autopilot_config::AutopilotConfig;
pub use main_config::{get_config_manager, Config};
