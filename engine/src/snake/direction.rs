use std::str::FromStr;

use super::types::SessionStatus;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Right,
    Left,
    Down,
}

impl Direction {
    pub const ALL: [Direction; 4] = [Direction::Up, Direction::Right, Direction::Left, Direction::Down];

    pub fn opposite(self) -> Direction {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }

    pub fn is_opposite(&self, other: &Direction) -> bool {
        self.opposite() == *other
    }

    /// Unit step in grid coordinates; `y` grows downwards.
    pub fn delta(self) -> (isize, isize) {
        match self {
            Direction::Up => (0, -1),
            Direction::Right => (1, 0),
            Direction::Left => (-1, 0),
            Direction::Down => (0, 1),
        }
    }
}

impl FromStr for Direction {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "up" | "w" => Ok(Direction::Up),
            "down" | "s" => Ok(Direction::Down),
            "left" | "a" => Ok(Direction::Left),
            "right" | "d" => Ok(Direction::Right),
            other => Err(format!("Unknown direction '{}'", other)),
        }
    }
}

/// Heading after a change request. Reversals and requests outside of
/// `Playing` leave the heading unchanged.
pub fn steer(status: SessionStatus, current: Direction, requested: Direction) -> Direction {
    if status != SessionStatus::Playing || requested.is_opposite(&current) {
        return current;
    }
    requested
}

/// The applied heading plus the latest accepted request, which only takes
/// effect on the next tick.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DirectionState {
    heading: Direction,
    pending: Option<Direction>,
}

impl Default for DirectionState {
    fn default() -> Self {
        Self {
            heading: Direction::Up,
            pending: None,
        }
    }
}

impl DirectionState {
    pub fn heading(&self) -> Direction {
        self.heading
    }

    pub fn pending(&self) -> Option<Direction> {
        self.pending
    }

    /// Checked against the applied heading, not an earlier pending request,
    /// so two quick turns between ticks cannot reverse the snake.
    pub fn request(&mut self, status: SessionStatus, requested: Direction) -> bool {
        if steer(status, self.heading, requested) != requested || status != SessionStatus::Playing {
            return false;
        }
        self.pending = Some(requested);
        true
    }

    pub fn apply_pending(&mut self) -> Direction {
        if let Some(direction) = self.pending.take() {
            self.heading = direction;
        }
        self.heading
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_opposite_is_symmetric_and_never_reflexive() {
        for direction in Direction::ALL {
            assert_ne!(direction.opposite(), direction);
            assert_eq!(direction.opposite().opposite(), direction);
        }
        assert_eq!(Direction::Up.opposite(), Direction::Down);
        assert_eq!(Direction::Left.opposite(), Direction::Right);
    }

    #[test]
    fn test_opposite_deltas_cancel() {
        for direction in Direction::ALL {
            let (dx, dy) = direction.delta();
            let (ox, oy) = direction.opposite().delta();
            assert_eq!((dx + ox, dy + oy), (0, 0));
        }
    }

    #[test]
    fn test_steer_rejects_reversal() {
        assert_eq!(steer(SessionStatus::Playing, Direction::Up, Direction::Down), Direction::Up);
        assert_eq!(steer(SessionStatus::Playing, Direction::Left, Direction::Right), Direction::Left);
    }

    #[test]
    fn test_steer_accepts_turns_and_is_idempotent() {
        let once = steer(SessionStatus::Playing, Direction::Up, Direction::Left);
        let twice = steer(SessionStatus::Playing, once, Direction::Left);
        assert_eq!(once, Direction::Left);
        assert_eq!(twice, Direction::Left);
    }

    #[test]
    fn test_steer_ignored_when_not_playing() {
        for status in [SessionStatus::Init, SessionStatus::Suspended, SessionStatus::GameOver] {
            assert_eq!(steer(status, Direction::Up, Direction::Left), Direction::Up);
        }
    }

    #[test]
    fn test_direction_state_checks_applied_heading() {
        let mut state = DirectionState::default();
        assert!(state.request(SessionStatus::Playing, Direction::Left));
        // Still heading up until the next tick, so down is a reversal.
        assert!(!state.request(SessionStatus::Playing, Direction::Down));
        assert_eq!(state.pending(), Some(Direction::Left));
        assert_eq!(state.apply_pending(), Direction::Left);
        assert_eq!(state.pending(), None);
        assert!(state.request(SessionStatus::Playing, Direction::Down));
        assert_eq!(state.apply_pending(), Direction::Down);
    }

    #[test]
    fn test_direction_state_ignores_requests_outside_play() {
        let mut state = DirectionState::default();
        assert!(!state.request(SessionStatus::Suspended, Direction::Left));
        assert!(!state.request(SessionStatus::Init, Direction::Up));
        assert_eq!(state.pending(), None);
    }

    #[test]
    fn test_direction_state_reset() {
        let mut state = DirectionState::default();
        state.request(SessionStatus::Playing, Direction::Right);
        state.apply_pending();
        state.reset();
        assert_eq!(state.heading(), Direction::Up);
        assert_eq!(state.pending(), None);
    }

    #[test]
    fn test_parse_direction() {
        assert_eq!("UP".parse::<Direction>(), Ok(Direction::Up));
        assert_eq!(" a ".parse::<Direction>(), Ok(Direction::Left));
        assert!("north".parse::<Direction>().is_err());
    }
}
