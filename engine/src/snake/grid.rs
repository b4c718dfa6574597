use super::types::{Cell, Point};

/// Square play field, row-major.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Grid {
    cells: Vec<Cell>,
    size: usize,
}

impl Grid {
    /// Empty `size`×`size` grid with the snake's starting cell marked.
    ///
    /// Panics when `size` is zero or `initial_position` lies outside the
    /// grid; both come from validated settings, never from gameplay.
    pub fn new(size: usize, initial_position: Point) -> Self {
        assert!(size > 0, "grid size must be positive");
        assert!(
            initial_position.x < size && initial_position.y < size,
            "initial position {} is outside a {}x{} grid",
            initial_position,
            size,
            size
        );

        let mut grid = Self {
            cells: vec![Cell::Empty; size * size],
            size,
        };
        grid.mark(initial_position, Cell::Snake);
        grid
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn capacity(&self) -> usize {
        self.cells.len()
    }

    pub fn contains(&self, position: Point) -> bool {
        position.x < self.size && position.y < self.size
    }

    /// Panics when `position` is outside the grid.
    pub fn cell_at(&self, position: Point) -> Cell {
        self.cells[self.index(position)]
    }

    pub(crate) fn mark(&mut self, position: Point, cell: Cell) {
        let idx = self.index(position);
        self.cells[idx] = cell;
    }

    pub fn count(&self, cell: Cell) -> usize {
        self.cells.iter().filter(|&&c| c == cell).count()
    }

    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> {
        self.cells.chunks(self.size)
    }

    pub fn positions(&self, cell: Cell) -> Vec<Point> {
        self.cells
            .iter()
            .enumerate()
            .filter(|&(_, &c)| c == cell)
            .map(|(idx, _)| Point::new(idx % self.size, idx / self.size))
            .collect()
    }

    fn index(&self, position: Point) -> usize {
        assert!(
            self.contains(position),
            "position {} is outside a {}x{} grid",
            position,
            self.size,
            self.size
        );
        position.y * self.size + position.x
    }
}
