#[cfg(feature = "json")]
use serde::{Deserialize, Serialize};

use bevy_math::Vec3;

// ============================================================================
// Cells
// ============================================================================

// Grid coordinate. Row maps to world Z, column maps to world X.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "json", derive(Serialize, Deserialize))]
pub struct Cell {
    pub row: usize,
    pub col: usize,
}

impl Cell {
    #[must_use]
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    // Neighbor in the given direction `steps` cells away, None if it would leave the grid
    #[must_use]
    pub fn offset(self, dir: Direction, steps: usize) -> Option<Self> {
        let (dr, dc) = dir.delta();
        let row = self.row.checked_add_signed(dr * steps as isize)?;
        let col = self.col.checked_add_signed(dc * steps as isize)?;
        Some(Self { row, col })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "json", derive(Serialize, Deserialize))]
pub enum CellState {
    #[default]
    Wall,
    Path,
}

// ============================================================================
// Directions
// ============================================================================

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Direction {
    East,
    North,
    West,
    South,
}

impl Direction {
    pub const ALL: [Self; 4] = [Self::East, Self::North, Self::West, Self::South];

    // (row, col) unit step. North is towards row 0.
    #[must_use]
    pub const fn delta(self) -> (isize, isize) {
        match self {
            Self::East => (0, 1),
            Self::North => (-1, 0),
            Self::West => (0, -1),
            Self::South => (1, 0),
        }
    }
}

// ============================================================================
// Grid
// ============================================================================

// Fixed-size cell table, row-major. Everything starts out as Wall.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "json", derive(Serialize, Deserialize))]
pub struct Grid {
    rows: usize,
    cols: usize,
    cells: Vec<CellState>,
}

impl Grid {
    #[must_use]
    pub fn new(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            cells: vec![CellState::Wall; rows * cols],
        }
    }

    #[must_use]
    pub const fn rows(&self) -> usize {
        self.rows
    }

    #[must_use]
    pub const fn cols(&self) -> usize {
        self.cols
    }

    #[must_use]
    pub const fn contains(&self, cell: Cell) -> bool {
        cell.row < self.rows && cell.col < self.cols
    }

    const fn index(&self, cell: Cell) -> usize {
        cell.row * self.cols + cell.col
    }

    // Row-major slot of a cell, for side tables laid out like the grid
    #[must_use]
    pub fn slot(&self, cell: Cell) -> Option<usize> {
        self.contains(cell).then(|| self.index(cell))
    }

    #[must_use]
    pub const fn len(&self) -> usize {
        self.cells.len()
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    #[must_use]
    pub fn state(&self, cell: Cell) -> Option<CellState> {
        self.contains(cell).then(|| self.cells[self.index(cell)])
    }

    #[must_use]
    pub fn is_path(&self, cell: Cell) -> bool {
        self.state(cell) == Some(CellState::Path)
    }

    // Out-of-bounds writes are ignored
    pub fn set(&mut self, cell: Cell, state: CellState) {
        if self.contains(cell) {
            let idx = self.index(cell);
            self.cells[idx] = state;
        }
    }

    #[must_use]
    pub const fn is_border(&self, cell: Cell) -> bool {
        cell.row == 0 || cell.col == 0 || cell.row + 1 == self.rows || cell.col + 1 == self.cols
    }

    // Strictly inside the border: 0 < row < rows-1 and 0 < col < cols-1
    #[must_use]
    pub const fn is_interior(&self, cell: Cell) -> bool {
        self.contains(cell) && !self.is_border(cell)
    }

    // All cells in row-major order
    pub fn cells(&self) -> impl Iterator<Item = Cell> + '_ {
        (0..self.rows).flat_map(move |row| (0..self.cols).map(move |col| Cell { row, col }))
    }

    pub fn path_cells(&self) -> impl Iterator<Item = Cell> + '_ {
        self.cells().filter(|&cell| self.is_path(cell))
    }

    #[must_use]
    pub fn path_count(&self) -> usize {
        self.cells.iter().filter(|&&s| s == CellState::Path).count()
    }

    // 4-neighbors of `cell` that are Path
    pub fn path_neighbors(&self, cell: Cell) -> impl Iterator<Item = Cell> + '_ {
        Direction::ALL
            .into_iter()
            .filter_map(move |dir| cell.offset(dir, 1))
            .filter(|&next| self.is_path(next))
    }

    #[must_use]
    pub fn count_path_neighbors(&self, cell: Cell) -> usize {
        self.path_neighbors(cell).count()
    }
}

// ============================================================================
// World Mapping
// ============================================================================

// One world unit per cell, floor plane at y = 0
#[must_use]
pub fn grid_to_world(cell: Cell) -> Vec3 {
    Vec3::new(cell.col as f32, 0.0, cell.row as f32)
}

// Nearest cell to a world position, None outside the grid
#[must_use]
pub fn world_to_cell(pos: Vec3, rows: usize, cols: usize) -> Option<Cell> {
    let row = pos.z.round();
    let col = pos.x.round();
    if !row.is_finite() || !col.is_finite() || row < 0.0 || col < 0.0 {
        return None;
    }
    let cell = Cell::new(row as usize, col as usize);
    (cell.row < rows && cell.col < cols).then_some(cell)
}
