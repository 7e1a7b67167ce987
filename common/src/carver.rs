use rand::{Rng, seq::SliceRandom};
use tracing::warn;

use crate::grid::{Cell, CellState, Direction, Grid};

// Rooms sit on odd coordinates, corridors on the even cell between two rooms
const ROOM_STEP: usize = 2;

// One level of the depth-first walk: the room, its shuffled exits, and how many were tried
struct Frame {
    cell: Cell,
    dirs: [Direction; 4],
    next: usize,
}

impl Frame {
    fn enter<R: Rng + ?Sized>(grid: &mut Grid, cell: Cell, rng: &mut R) -> Self {
        grid.set(cell, CellState::Path);
        let mut dirs = Direction::ALL;
        dirs.shuffle(rng);
        Self { cell, dirs, next: 0 }
    }
}

// ============================================================================
// Maze Carving
// ============================================================================

// Randomized depth-first backtracking over the room lattice, starting at `entry`.
// Produces a perfect maze: the Path cells form a spanning tree, border cells stay Wall.
// Uses an explicit stack so large grids cannot overflow the call stack.
// Returns the number of rooms visited.
pub fn carve<R: Rng + ?Sized>(grid: &mut Grid, entry: Cell, rng: &mut R) -> usize {
    if !grid.is_interior(entry) {
        warn!(?entry, rows = grid.rows(), cols = grid.cols(), "carve entry is not inside the border");
        return 0;
    }

    let mut stack = vec![Frame::enter(grid, entry, rng)];
    let mut rooms = 1;

    while let Some(frame) = stack.last_mut() {
        let Some(&dir) = frame.dirs.get(frame.next) else {
            stack.pop();
            continue;
        };
        frame.next += 1;
        let from = frame.cell;

        // Rooms only become Path when entered, so Path doubles as "visited"
        let Some(target) = from.offset(dir, ROOM_STEP) else {
            continue;
        };
        if !grid.is_interior(target) || grid.is_path(target) {
            continue;
        }

        if let Some(corridor) = from.offset(dir, 1) {
            grid.set(corridor, CellState::Path);
        }
        stack.push(Frame::enter(grid, target, rng));
        rooms += 1;
    }

    rooms
}
