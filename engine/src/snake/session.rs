use std::time::Duration;
use tokio::sync::mpsc;

use crate::config::Validate;
use crate::{log, SessionRng};
use super::autopilot::{Autopilot, AutopilotStrategy};
use super::broadcaster::{GameOverSummary, SessionView, SnakeBroadcaster};
use super::direction::{Direction, DirectionState};
use super::game_state::SnakeGameState;
use super::settings::SnakeSettings;
use super::tick_source::{Tick, TickSource};
use super::types::{GameEndReason, SessionStatus, TickOutcome};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SessionCommand {
    Start,
    Stop,
    Restart,
    SetDifficulty(usize),
    ChangeDirection(Direction),
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SessionSummary {
    pub games_finished: u32,
    pub best_length: usize,
    pub ticks: u64,
}

/// Owns one player's game: status, difficulty, heading, game state and the
/// tick source. All mutation goes through `&mut self`, one event at a time.
pub struct SnakeSession<B: SnakeBroadcaster> {
    settings: SnakeSettings,
    status: SessionStatus,
    difficulty: usize,
    tick_interval: Duration,
    direction: DirectionState,
    game_state: SnakeGameState,
    rng: SessionRng,
    tick_source: TickSource,
    tick_receiver: Option<mpsc::UnboundedReceiver<Tick>>,
    autopilot: Option<AutopilotStrategy>,
    broadcaster: B,
    summary: SessionSummary,
}

impl<B: SnakeBroadcaster> SnakeSession<B> {
    pub fn new(settings: SnakeSettings, broadcaster: B) -> Result<Self, String> {
        settings
            .validate()
            .map_err(|e| format!("Invalid snake settings: {}", e))?;

        let difficulty = settings.default_difficulty;
        let tick_interval = settings
            .tick_interval(difficulty)
            .ok_or_else(|| format!("No tick interval for difficulty {}", difficulty))?;

        let mut rng = SessionRng::from_optional_seed(settings.seed);
        let game_state = SnakeGameState::new(settings.grid_size, settings.initial_position, &mut rng);
        let (tick_sender, tick_receiver) = mpsc::unbounded_channel();

        log!(
            "Session created: {}x{} grid, difficulty {} ({}ms), seed {}",
            settings.grid_size,
            settings.grid_size,
            difficulty,
            tick_interval.as_millis(),
            rng.seed()
        );

        Ok(Self {
            settings,
            status: SessionStatus::Init,
            difficulty,
            tick_interval,
            direction: DirectionState::default(),
            game_state,
            rng,
            tick_source: TickSource::new(tick_sender),
            tick_receiver: Some(tick_receiver),
            autopilot: None,
            broadcaster,
            summary: SessionSummary::default(),
        })
    }

    pub fn with_autopilot(mut self, strategy: Option<AutopilotStrategy>) -> Self {
        self.autopilot = strategy;
        self
    }

    pub fn status(&self) -> SessionStatus {
        self.status
    }

    pub fn difficulty(&self) -> usize {
        self.difficulty
    }

    pub fn tick_interval(&self) -> Duration {
        self.tick_interval
    }

    pub fn heading(&self) -> Direction {
        self.direction.heading()
    }

    pub fn game_state(&self) -> &SnakeGameState {
        &self.game_state
    }

    pub fn tick_source(&self) -> &TickSource {
        &self.tick_source
    }

    pub fn broadcaster(&self) -> &B {
        &self.broadcaster
    }

    pub fn summary(&self) -> SessionSummary {
        self.summary
    }

    /// Hands out the receiving end of the tick channel. `run` takes it too,
    /// so drive a session either through `run` or by hand.
    pub fn take_tick_receiver(&mut self) -> Option<mpsc::UnboundedReceiver<Tick>> {
        self.tick_receiver.take()
    }

    /// `Init | Suspended -> Playing`. A timer that is already running (armed
    /// by a restart or a difficulty change) keeps its interval. A game that
    /// is already over goes straight to `GameOver`.
    pub fn start(&mut self) -> bool {
        if !matches!(self.status, SessionStatus::Init | SessionStatus::Suspended) {
            return false;
        }

        // A game created on a board with no room for food is already won.
        if let Some(reason) = self.game_state.game_end_reason() {
            self.finish_game(reason);
            return true;
        }

        if !self.tick_source.is_armed() {
            self.tick_source.arm(self.tick_interval);
        }
        log!("{:?} -> Playing ({}ms per tick)", self.status, self.tick_interval.as_millis());
        self.status = SessionStatus::Playing;
        self.broadcast_state();
        true
    }

    /// `Playing -> Suspended`; the game is kept as is.
    pub fn stop(&mut self) -> bool {
        if self.status != SessionStatus::Playing {
            return false;
        }

        self.tick_source.cancel();
        self.status = SessionStatus::Suspended;
        log!("Playing -> Suspended at tick {}", self.game_state.tick());
        self.broadcast_state();
        true
    }

    /// Any state -> `Init` with a fresh game, heading up, and the timer
    /// re-armed at the restart interval rather than the selected difficulty.
    pub fn restart(&mut self) {
        let game_state = SnakeGameState::new(
            self.settings.grid_size,
            self.settings.initial_position,
            &mut self.rng,
        );

        self.game_state = game_state;
        self.direction.reset();
        self.tick_interval = self.settings.restart_interval();
        self.tick_source.arm(self.tick_interval);
        log!("{:?} -> Init (restart, {}ms per tick)", self.status, self.tick_interval.as_millis());
        self.status = SessionStatus::Init;
        self.broadcast_state();
    }

    /// Only honoured in `Init` and for levels inside the interval table.
    /// Re-selecting the current level after a restart re-arms its interval.
    pub fn set_difficulty(&mut self, level: usize) -> bool {
        if self.status != SessionStatus::Init {
            return false;
        }
        let Some(interval) = self.settings.tick_interval(level) else {
            log!(
                "Ignoring difficulty {}: expected 1..={}",
                level,
                self.settings.difficulty_levels()
            );
            return false;
        };
        if level == self.difficulty && interval == self.tick_interval {
            return false;
        }

        self.difficulty = level;
        self.tick_interval = interval;
        self.tick_source.arm(interval);
        log!("Difficulty set to {} ({}ms per tick)", level, interval.as_millis());
        self.broadcast_state();
        true
    }

    /// Takes effect on the next tick. Reversals and requests outside of
    /// `Playing` are dropped.
    pub fn change_direction(&mut self, direction: Direction) -> bool {
        self.direction.request(self.status, direction)
    }

    /// Advances the game by one step. Returns `false` when the tick was
    /// ignored (stale timer, or not playing).
    pub fn on_tick(&mut self, tick: Tick) -> bool {
        if !self.tick_source.accepts(tick) || self.status != SessionStatus::Playing {
            return false;
        }

        if let Some(strategy) = self.autopilot
            && let Some(direction) =
                Autopilot::calculate_move(strategy, &self.game_state, self.direction.heading(), &mut self.rng)
        {
            self.direction.request(self.status, direction);
        }

        let heading = self.direction.apply_pending();
        let outcome = self.game_state.advance(heading, &mut self.rng);

        match outcome {
            TickOutcome::Continue { ate } => {
                if ate {
                    log!(
                        "Food eaten at {}, length {}, next food at {:?}",
                        self.game_state.head(),
                        self.game_state.len(),
                        self.game_state.food()
                    );
                }
                self.summary.ticks += 1;
                self.summary.best_length = self.summary.best_length.max(self.game_state.len());
                self.broadcast_state();
            }
            TickOutcome::Finished(reason) => self.finish_game(reason),
        }
        true
    }

    fn finish_game(&mut self, reason: GameEndReason) {
        self.tick_source.cancel();
        self.status = SessionStatus::GameOver;
        self.summary.games_finished += 1;
        self.summary.best_length = self.summary.best_length.max(self.game_state.len());

        let game_over = GameOverSummary {
            reason,
            length: self.game_state.len(),
            ticks: self.game_state.tick(),
        };
        log!(
            "Game over: {:?} at {} after {} ticks, length {}",
            reason,
            self.game_state.head(),
            game_over.ticks,
            game_over.length
        );
        self.broadcast_state();
        self.broadcaster.broadcast_game_over(&game_over);
    }

    pub fn handle_command(&mut self, command: SessionCommand) {
        match command {
            SessionCommand::Start => {
                self.start();
            }
            SessionCommand::Stop => {
                self.stop();
            }
            SessionCommand::Restart => self.restart(),
            SessionCommand::SetDifficulty(level) => {
                self.set_difficulty(level);
            }
            SessionCommand::ChangeDirection(direction) => {
                self.change_direction(direction);
            }
        }
    }

    /// Processes ticks and commands one at a time until the command channel
    /// closes.
    pub async fn run(mut self, mut commands: mpsc::UnboundedReceiver<SessionCommand>) -> SessionSummary {
        let Some(mut ticks) = self.tick_receiver.take() else {
            log!("Session tick receiver was already taken, not running");
            return self.summary;
        };

        self.broadcast_state();

        loop {
            tokio::select! {
                Some(tick) = ticks.recv() => {
                    self.on_tick(tick);
                }
                command = commands.recv() => match command {
                    Some(command) => self.handle_command(command),
                    None => break,
                },
            }
        }

        self.tick_source.cancel();
        log!(
            "Session closed: {} games finished, best length {}",
            self.summary.games_finished,
            self.summary.best_length
        );
        self.summary
    }

    fn broadcast_state(&self) {
        let view = SessionView {
            status: self.status,
            difficulty: self.difficulty,
            tick_interval: self.tick_interval,
            tick: self.game_state.tick(),
            length: self.game_state.len(),
            grid: self.game_state.grid(),
        };
        self.broadcaster.broadcast_state(&view);
    }

    #[cfg(test)]
    fn replace_game_state(&mut self, game_state: SnakeGameState) {
        self.game_state = game_state;
    }
}
