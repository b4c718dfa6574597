mod autopilot_driver;
mod broadcaster;
mod config;
mod input;

use clap::Parser;
use tokio::sync::mpsc;

use snake_engine::config::{ConfigManager, Validate};
use snake_engine::snake::{AutopilotStrategy, SnakeSession};
use snake_engine::{log, logger};

use autopilot_driver::{best_length, drive_autopilot};
use broadcaster::LogBroadcaster;
use config::{get_config_manager, Config};
use input::read_commands;

#[derive(Parser)]
#[command(name = "snake_runner")]
struct Args {
    /// YAML config file, defaults to snake_runner_config.yaml next to the executable
    #[arg(long)]
    config: Option<String>,

    #[arg(long)]
    use_log_prefix: bool,

    /// Let the autopilot play instead of reading commands from stdin
    #[arg(long)]
    autopilot: Option<AutopilotStrategy>,

    /// Number of autopilot games
    #[arg(long)]
    games: Option<u32>,

    /// Initial difficulty level, 1-based
    #[arg(long)]
    difficulty: Option<usize>,

    #[arg(long)]
    seed: Option<u64>,

    /// Print the board on every tick
    #[arg(long)]
    show_board: bool,
}

impl Args {
    fn apply(&self, config: &mut Config) {
        if let Some(strategy) = self.autopilot {
            config.autopilot.strategy = Some(strategy);
        }
        if let Some(games) = self.games {
            config.autopilot.games = games;
        }
        if let Some(level) = self.difficulty {
            config.snake.default_difficulty = level;
        }
        if self.seed.is_some() {
            config.snake.seed = self.seed;
        }
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let prefix = if args.use_log_prefix {
        Some("Runner".to_string())
    } else {
        None
    };
    logger::init_logger(prefix);

    let mut config = match &args.config {
        Some(path) => ConfigManager::from_yaml_file(path).get_or_init_config()?,
        None => get_config_manager().get_or_init_config()?,
    };
    args.apply(&mut config);
    config
        .validate()
        .map_err(|e| format!("Invalid settings: {}", e))?;

    let (command_tx, command_rx) = mpsc::unbounded_channel();

    match config.autopilot.strategy {
        Some(strategy) => {
            let (game_over_tx, game_over_rx) = mpsc::unbounded_channel();
            let broadcaster = LogBroadcaster::new(Some(game_over_tx), args.show_board);
            let session = SnakeSession::new(config.snake.clone(), broadcaster)?.with_autopilot(Some(strategy));
            log!(
                "Autopilot ({:?}) playing {} games on a {}x{} grid",
                strategy,
                config.autopilot.games,
                config.snake.grid_size,
                config.snake.grid_size
            );

            let games = config.autopilot.games;
            let driver = async move {
                tokio::select! {
                    results = drive_autopilot(command_tx, game_over_rx, games) => results,
                    _ = tokio::signal::ctrl_c() => {
                        log!("Ctrl+C received, stopping autopilot");
                        Vec::new()
                    }
                }
            };
            let (summary, results) = tokio::join!(session.run(command_rx), driver);

            for (i, result) in results.iter().enumerate() {
                log!(
                    "Game {}: {:?}, length {}, {} ticks",
                    i + 1,
                    result.reason,
                    result.length,
                    result.ticks
                );
            }
            log!(
                "Autopilot finished {} games, best length {}, {} ticks in total",
                summary.games_finished,
                best_length(&results),
                summary.ticks
            );
        }
        None => {
            let broadcaster = LogBroadcaster::new(None, args.show_board);
            let session = SnakeSession::new(config.snake.clone(), broadcaster)?;
            log!("Commands: start, stop, restart, difficulty <n>, up/down/left/right (w/a/s/d), quit");

            let (summary, _) = tokio::join!(session.run(command_rx), read_commands(command_tx));
            log!(
                "Played {} games, best length {}",
                summary.games_finished,
                summary.best_length
            );
        }
    }

    Ok(())
}
