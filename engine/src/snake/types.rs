use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Point {
    pub x: usize,
    pub y: usize,
}

impl Point {
    pub fn new(x: usize, y: usize) -> Self {
        Self { x, y }
    }

    /// Moves by `(dx, dy)`, or `None` when either coordinate would leave `[0, size)`.
    pub fn offset(self, (dx, dy): (isize, isize), size: usize) -> Option<Point> {
        let x = self.x.checked_add_signed(dx).filter(|&x| x < size)?;
        let y = self.y.checked_add_signed(dy).filter(|&y| y < size)?;
        Some(Point::new(x, y))
    }

    pub fn manhattan_distance(self, other: Point) -> usize {
        self.x.abs_diff(other.x) + self.y.abs_diff(other.y)
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Cell {
    #[default]
    Empty,
    Snake,
    Food,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SessionStatus {
    Init,
    Playing,
    Suspended,
    GameOver,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameEndReason {
    WallCollision,
    SelfCollision,
    /// The body covers every cell, so no food can be placed.
    BoardFilled,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TickOutcome {
    Continue { ate: bool },
    Finished(GameEndReason),
}

impl TickOutcome {
    pub fn can_continue(&self) -> bool {
        matches!(self, TickOutcome::Continue { .. })
    }
}
