mod autopilot;
mod broadcaster;
mod direction;
mod food;
mod game_state;
mod grid;
mod session;
mod settings;
mod tick_source;
mod types;

pub use autopilot::{Autopilot, AutopilotStrategy};
pub use broadcaster::{GameOverSummary, SessionView, SnakeBroadcaster};
pub use direction::{steer, Direction, DirectionState};
pub use food::place_food;
pub use game_state::SnakeGameState;
pub use grid::Grid;
pub use session::{SessionCommand, SessionSummary, SnakeSession};
pub use settings::SnakeSettings;
pub use tick_source::{Tick, TickSource};
pub use types::{Cell, GameEndReason, Point, SessionStatus, TickOutcome};
