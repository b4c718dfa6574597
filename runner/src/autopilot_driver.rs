use tokio::sync::mpsc;

use snake_engine::log;
use snake_engine::snake::{GameOverSummary, SessionCommand};

/// Plays `games` games back to back: start, wait for the game over, restart.
/// Returns once all games are finished or the session stops listening.
pub async fn drive_autopilot(
    commands: mpsc::UnboundedSender<SessionCommand>,
    mut game_overs: mpsc::UnboundedReceiver<GameOverSummary>,
    games: u32,
) -> Vec<GameOverSummary> {
    let mut results = Vec::with_capacity(games as usize);

    for game in 1..=games {
        if game > 1 && commands.send(SessionCommand::Restart).is_err() {
            break;
        }
        if commands.send(SessionCommand::Start).is_err() {
            break;
        }
        log!("Autopilot game {}/{} started", game, games);

        let Some(summary) = game_overs.recv().await else {
            log!("Session ended before game {} finished", game);
            break;
        };
        results.push(summary);
    }

    results
}

pub fn best_length(results: &[GameOverSummary]) -> usize {
    results.iter().map(|r| r.length).max().unwrap_or(0)
}
