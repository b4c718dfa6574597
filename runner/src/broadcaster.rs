use std::cell::Cell as StdCell;
use tokio::sync::mpsc;

use snake_engine::log;
use snake_engine::snake::{Cell, GameOverSummary, Grid, SessionStatus, SessionView, SnakeBroadcaster};

/// Logs session changes and forwards finished games to an optional listener.
pub struct LogBroadcaster {
    game_over_sender: Option<mpsc::UnboundedSender<GameOverSummary>>,
    show_board: bool,
    last_status: StdCell<Option<SessionStatus>>,
    last_length: StdCell<usize>,
    last_difficulty: StdCell<usize>,
}

impl LogBroadcaster {
    pub fn new(game_over_sender: Option<mpsc::UnboundedSender<GameOverSummary>>, show_board: bool) -> Self {
        Self {
            game_over_sender,
            show_board,
            last_status: StdCell::new(None),
            last_length: StdCell::new(0),
            last_difficulty: StdCell::new(0),
        }
    }
}

impl SnakeBroadcaster for LogBroadcaster {
    fn broadcast_state(&self, view: &SessionView<'_>) {
        if self.last_status.replace(Some(view.status)) != Some(view.status) {
            log!(
                "Status {:?}, difficulty {}, tick interval {}ms",
                view.status,
                view.difficulty,
                view.tick_interval.as_millis()
            );
        }
        if self.last_difficulty.replace(view.difficulty) != view.difficulty
            && view.status == SessionStatus::Init
        {
            log!("Difficulty set to {}", view.difficulty);
        }
        if self.last_length.replace(view.length) < view.length && view.length > 1 {
            log!("Length {} at tick {}", view.length, view.tick);
        }
        if self.show_board && view.status == SessionStatus::Playing {
            println!("{}", render_board(view.grid));
        }
    }

    fn broadcast_game_over(&self, summary: &GameOverSummary) {
        log!(
            "Game over: {:?}, length {}, {} ticks",
            summary.reason,
            summary.length,
            summary.ticks
        );
        if let Some(sender) = &self.game_over_sender
            && sender.send(*summary).is_err()
        {
            log!("Game over listener is gone");
        }
    }
}

/// One text line per row: `#` snake, `*` food, `.` empty.
pub fn render_board(grid: &Grid) -> String {
    grid.rows()
        .map(|row| {
            row.iter()
                .map(|cell| match cell {
                    Cell::Empty => '.',
                    Cell::Snake => '#',
                    Cell::Food => '*',
                })
                .collect::<String>()
        })
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use snake_engine::snake::{GameEndReason, Point};
    use std::time::Duration;

    #[test]
    fn test_render_board_marks_snake() {
        let grid = Grid::new(3, Point::new(1, 2));
        assert_eq!(render_board(&grid), "...\n...\n.#.");
    }

    #[test]
    fn test_game_over_is_forwarded() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let broadcaster = LogBroadcaster::new(Some(tx), false);
        let summary = GameOverSummary {
            reason: GameEndReason::WallCollision,
            length: 3,
            ticks: 12,
        };
        broadcaster.broadcast_game_over(&summary);
        assert_eq!(rx.try_recv().unwrap(), summary);
    }

    #[test]
    fn test_dropped_listener_is_tolerated() {
        let (tx, rx) = mpsc::unbounded_channel();
        drop(rx);
        let broadcaster = LogBroadcaster::new(Some(tx), false);
        broadcaster.broadcast_game_over(&GameOverSummary {
            reason: GameEndReason::SelfCollision,
            length: 1,
            ticks: 1,
        });
    }

    #[test]
    fn test_state_tracking_follows_last_view() {
        let broadcaster = LogBroadcaster::new(None, false);
        let grid = Grid::new(4, Point::new(0, 0));
        let mut view = SessionView {
            status: SessionStatus::Init,
            difficulty: 3,
            tick_interval: Duration::from_millis(100),
            tick: 0,
            length: 1,
            grid: &grid,
        };
        broadcaster.broadcast_state(&view);
        view.status = SessionStatus::Playing;
        view.length = 2;
        broadcaster.broadcast_state(&view);
        assert_eq!(broadcaster.last_status.get(), Some(SessionStatus::Playing));
        assert_eq!(broadcaster.last_length.get(), 2);
        assert_eq!(broadcaster.last_difficulty.get(), 3);
    }
}
