use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;

use snake_engine::log;
use snake_engine::snake::{Direction, SessionCommand};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InputLine {
    Command(SessionCommand),
    Quit,
    Blank,
}

/// Parses one line typed by the player.
pub fn parse_line(line: &str) -> Result<InputLine, String> {
    let mut words = line.split_whitespace();
    let Some(keyword) = words.next() else {
        return Ok(InputLine::Blank);
    };
    let argument = words.next();
    if words.next().is_some() {
        return Err(format!("Too many arguments in '{}'", line.trim()));
    }

    let keyword = keyword.to_ascii_lowercase();
    let command = match (keyword.as_str(), argument) {
        ("start", None) => SessionCommand::Start,
        ("stop", None) | ("pause", None) => SessionCommand::Stop,
        ("restart", None) => SessionCommand::Restart,
        ("quit", None) | ("exit", None) => return Ok(InputLine::Quit),
        ("difficulty", Some(level)) => {
            let level = level
                .parse::<usize>()
                .map_err(|e| format!("Invalid difficulty '{}': {}", level, e))?;
            SessionCommand::SetDifficulty(level)
        }
        ("difficulty", None) => return Err("Difficulty level is missing".to_string()),
        (word, None) => SessionCommand::ChangeDirection(word.parse::<Direction>()?),
        (word, Some(_)) => return Err(format!("Unexpected argument for '{}'", word)),
    };
    Ok(InputLine::Command(command))
}

/// Forwards stdin commands until `quit`, end of input or Ctrl+C. Dropping
/// `commands` on return ends the session loop.
pub async fn read_commands(commands: mpsc::UnboundedSender<SessionCommand>) {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        let line = tokio::select! {
            line = lines.next_line() => line,
            _ = tokio::signal::ctrl_c() => {
                log!("Ctrl+C received, closing session");
                break;
            }
        };

        let line = match line {
            Ok(Some(line)) => line,
            Ok(None) => {
                log!("End of input, closing session");
                break;
            }
            Err(e) => {
                log!("Failed to read input: {}", e);
                break;
            }
        };

        match parse_line(&line) {
            Ok(InputLine::Command(command)) => {
                if commands.send(command).is_err() {
                    break;
                }
            }
            Ok(InputLine::Quit) => break,
            Ok(InputLine::Blank) => {}
            Err(e) => log!("Ignoring input: {}", e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_commands() {
        assert_eq!(parse_line("start"), Ok(InputLine::Command(SessionCommand::Start)));
        assert_eq!(parse_line("  STOP "), Ok(InputLine::Command(SessionCommand::Stop)));
        assert_eq!(parse_line("pause"), Ok(InputLine::Command(SessionCommand::Stop)));
        assert_eq!(parse_line("restart"), Ok(InputLine::Command(SessionCommand::Restart)));
        assert_eq!(
            parse_line("difficulty 4"),
            Ok(InputLine::Command(SessionCommand::SetDifficulty(4)))
        );
    }

    #[test]
    fn test_direction_keys() {
        assert_eq!(
            parse_line("w"),
            Ok(InputLine::Command(SessionCommand::ChangeDirection(Direction::Up)))
        );
        assert_eq!(
            parse_line("left"),
            Ok(InputLine::Command(SessionCommand::ChangeDirection(Direction::Left)))
        );
        assert_eq!(
            parse_line("D"),
            Ok(InputLine::Command(SessionCommand::ChangeDirection(Direction::Right)))
        );
    }

    #[test]
    fn test_quit_and_blank() {
        assert_eq!(parse_line("quit"), Ok(InputLine::Quit));
        assert_eq!(parse_line("exit"), Ok(InputLine::Quit));
        assert_eq!(parse_line("   "), Ok(InputLine::Blank));
    }

    #[test]
    fn test_malformed_lines_are_errors() {
        assert!(parse_line("difficulty").is_err());
        assert!(parse_line("difficulty fast").is_err());
        assert!(parse_line("difficulty -1").is_err());
        assert!(parse_line("start now").is_err());
        assert!(parse_line("jump").is_err());
        assert!(parse_line("difficulty 1 2").is_err());
    }
}
