use std::time::Duration;

use super::grid::Grid;
use super::types::{GameEndReason, SessionStatus};

/// Read-only snapshot handed to render collaborators after every change.
#[derive(Clone, Copy, Debug)]
pub struct SessionView<'a> {
    pub status: SessionStatus,
    pub difficulty: usize,
    pub tick_interval: Duration,
    pub tick: u64,
    pub length: usize,
    pub grid: &'a Grid,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GameOverSummary {
    pub reason: GameEndReason,
    pub length: usize,
    pub ticks: u64,
}

pub trait SnakeBroadcaster {
    fn broadcast_state(&self, view: &SessionView<'_>);

    fn broadcast_game_over(&self, summary: &GameOverSummary);
}
