use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::SessionRng;
use super::direction::Direction;
use super::game_state::SnakeGameState;
use super::types::{Cell, Point};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AutopilotStrategy {
    /// Safe move closest to the food.
    Greedy,
    /// Any safe move.
    Random,
}

impl FromStr for AutopilotStrategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "greedy" => Ok(AutopilotStrategy::Greedy),
            "random" => Ok(AutopilotStrategy::Random),
            other => Err(format!("Unknown autopilot strategy '{}'", other)),
        }
    }
}

/// Input source that steers from the game state instead of a player.
pub struct Autopilot;

impl Autopilot {
    pub fn calculate_move(
        strategy: AutopilotStrategy,
        state: &SnakeGameState,
        heading: Direction,
        rng: &mut SessionRng,
    ) -> Option<Direction> {
        if state.is_over() {
            return None;
        }

        match strategy {
            AutopilotStrategy::Greedy => Self::greedy_move(state, heading, rng),
            AutopilotStrategy::Random => Some(Self::random_safe_move(state, heading, rng)),
        }
    }

    fn greedy_move(state: &SnakeGameState, heading: Direction, rng: &mut SessionRng) -> Option<Direction> {
        let Some(food) = state.food() else {
            return Some(Self::random_safe_move(state, heading, rng));
        };

        Self::safe_directions(state, heading)
            .into_iter()
            .map(|(dir, next)| (dir, next.manhattan_distance(food)))
            .min_by_key(|&(_, distance)| distance)
            .map(|(dir, _)| dir)
            .or_else(|| Some(Self::random_safe_move(state, heading, rng)))
    }

    fn random_safe_move(state: &SnakeGameState, heading: Direction, rng: &mut SessionRng) -> Direction {
        let safe: Vec<Direction> = Self::safe_directions(state, heading)
            .into_iter()
            .map(|(dir, _)| dir)
            .collect();

        rng.choose(&safe).unwrap_or(heading)
    }

    fn safe_directions(state: &SnakeGameState, heading: Direction) -> Vec<(Direction, Point)> {
        let grid = state.grid();
        Direction::ALL
            .into_iter()
            .filter(|d| !d.is_opposite(&heading))
            .filter_map(|d| {
                state
                    .head()
                    .offset(d.delta(), grid.size())
                    .filter(|&next| grid.cell_at(next) != Cell::Snake)
                    .map(|next| (d, next))
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::snake::TickOutcome;

    #[test]
    fn test_greedy_heads_towards_food() {
        let mut rng = SessionRng::new(1);
        let state = SnakeGameState::with_layout(10, &[Point::new(5, 5)], Some(Point::new(8, 5)));
        let dir = Autopilot::calculate_move(AutopilotStrategy::Greedy, &state, Direction::Up, &mut rng);
        assert_eq!(dir, Some(Direction::Right));
    }

    #[test]
    fn test_never_reverses() {
        let mut rng = SessionRng::new(1);
        let state = SnakeGameState::with_layout(10, &[Point::new(5, 5)], Some(Point::new(5, 9)));
        for _ in 0..50 {
            for strategy in [AutopilotStrategy::Greedy, AutopilotStrategy::Random] {
                let dir = Autopilot::calculate_move(strategy, &state, Direction::Up, &mut rng).unwrap();
                assert_ne!(dir, Direction::Down);
            }
        }
    }

    #[test]
    fn test_avoids_wall_and_body() {
        let mut rng = SessionRng::new(3);
        // Top edge, heading right: up is the wall and left is a reversal into the body.
        let body = [Point::new(1, 0), Point::new(0, 0), Point::new(0, 1)];
        let state = SnakeGameState::with_layout(5, &body, Some(Point::new(0, 4)));
        for strategy in [AutopilotStrategy::Greedy, AutopilotStrategy::Random] {
            let dir = Autopilot::calculate_move(strategy, &state, Direction::Right, &mut rng);
            assert!(matches!(dir, Some(Direction::Right) | Some(Direction::Down)));
        }
    }

    #[test]
    fn test_greedy_reaches_first_food() {
        let mut rng = SessionRng::new(77);
        let mut state = SnakeGameState::new(12, Point::new(6, 6), &mut rng);
        let mut heading = Direction::Up;
        let mut ate = false;
        for _ in 0..40 {
            heading = Autopilot::calculate_move(AutopilotStrategy::Greedy, &state, heading, &mut rng).unwrap();
            match state.advance(heading, &mut rng) {
                TickOutcome::Continue { ate: true } => {
                    ate = true;
                    break;
                }
                TickOutcome::Continue { ate: false } => {}
                TickOutcome::Finished(reason) => panic!("autopilot crashed: {:?}", reason),
            }
        }
        assert!(ate);
        assert_eq!(state.len(), 2);
    }

    #[test]
    fn test_parse_strategy() {
        assert_eq!("Greedy".parse::<AutopilotStrategy>(), Ok(AutopilotStrategy::Greedy));
        assert!("smart".parse::<AutopilotStrategy>().is_err());
    }
}
