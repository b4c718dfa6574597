use std::collections::VecDeque;

use crate::SessionRng;
use super::direction::Direction;
use super::food::place_food;
use super::grid::Grid;
use super::types::{Cell, GameEndReason, Point, TickOutcome};

/// Grid, body and food of one game. Only `advance` mutates them.
#[derive(Clone, Debug)]
pub struct SnakeGameState {
    grid: Grid,
    body: VecDeque<Point>,
    food: Option<Point>,
    tick: u64,
    game_end_reason: Option<GameEndReason>,
}

impl SnakeGameState {
    /// Fresh one-cell snake plus one food. A board with no free cell left
    /// (1×1) starts finished with `BoardFilled`.
    pub fn new(size: usize, initial_position: Point, rng: &mut SessionRng) -> Self {
        let mut state = Self {
            grid: Grid::new(size, initial_position),
            body: VecDeque::from([initial_position]),
            food: None,
            tick: 0,
            game_end_reason: None,
        };
        if !state.respawn_food(rng) {
            state.finish(GameEndReason::BoardFilled);
        }
        state
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn body(&self) -> &VecDeque<Point> {
        &self.body
    }

    pub fn head(&self) -> Point {
        *self.body.front().expect("Snake body should never be empty")
    }

    pub fn len(&self) -> usize {
        self.body.len()
    }

    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }

    pub fn food(&self) -> Option<Point> {
        self.food
    }

    pub fn tick(&self) -> u64 {
        self.tick
    }

    pub fn game_end_reason(&self) -> Option<GameEndReason> {
        self.game_end_reason
    }

    pub fn is_over(&self) -> bool {
        self.game_end_reason.is_some()
    }

    /// Moves the snake one cell towards `direction`.
    ///
    /// Collisions are reported through the outcome, never as errors. A
    /// finished game stays finished: further calls repeat the end reason.
    pub fn advance(&mut self, direction: Direction, rng: &mut SessionRng) -> TickOutcome {
        if let Some(reason) = self.game_end_reason {
            return TickOutcome::Finished(reason);
        }

        // Bounds first: nothing outside the grid may be read.
        let Some(new_head) = self.head().offset(direction.delta(), self.grid.size()) else {
            return self.finish(GameEndReason::WallCollision);
        };

        // The tail still counts as occupied even though it would move away.
        let ate = match self.grid.cell_at(new_head) {
            Cell::Snake => return self.finish(GameEndReason::SelfCollision),
            Cell::Food => true,
            Cell::Empty => false,
        };

        if !ate {
            let tail = self
                .body
                .pop_back()
                .expect("Snake body should never be empty");
            self.grid.mark(tail, Cell::Empty);
        }

        self.grid.mark(new_head, Cell::Snake);
        self.body.push_front(new_head);
        self.tick += 1;

        if ate {
            self.food = None;
            if !self.respawn_food(rng) {
                return self.finish(GameEndReason::BoardFilled);
            }
        }

        TickOutcome::Continue { ate }
    }

    fn respawn_food(&mut self, rng: &mut SessionRng) -> bool {
        match place_food(&self.grid, rng) {
            Some(pos) => {
                self.grid.mark(pos, Cell::Food);
                self.food = Some(pos);
                true
            }
            None => false,
        }
    }

    fn finish(&mut self, reason: GameEndReason) -> TickOutcome {
        self.game_end_reason = Some(reason);
        TickOutcome::Finished(reason)
    }

    /// Builds a state from an explicit head-first body and food cell.
    #[cfg(test)]
    pub(crate) fn with_layout(size: usize, body: &[Point], food: Option<Point>) -> Self {
        let mut grid = Grid::new(size, body[0]);
        for &pos in &body[1..] {
            grid.mark(pos, Cell::Snake);
        }
        if let Some(pos) = food {
            grid.mark(pos, Cell::Food);
        }
        Self {
            grid,
            body: body.iter().copied().collect(),
            food,
            tick: 0,
            game_end_reason: None,
        }
    }
}
