use crate::SessionRng;
use super::grid::Grid;
use super::types::{Cell, Point};

const RANDOM_ATTEMPTS: usize = 64;

/// Uniformly random empty cell for the next food, or `None` when the board
/// has no empty cell left.
///
/// Snake cells (including a head marked this tick) and the food being
/// replaced are never empty, so they are excluded.
pub fn place_food(grid: &Grid, rng: &mut SessionRng) -> Option<Point> {
    let size = grid.size();

    // Cheap while the board is sparse.
    for _ in 0..RANDOM_ATTEMPTS {
        let pos = Point::new(rng.random_range(0..size), rng.random_range(0..size));
        if grid.cell_at(pos) == Cell::Empty {
            return Some(pos);
        }
    }

    rng.choose(&grid.positions(Cell::Empty))
}
