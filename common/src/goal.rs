#[cfg(feature = "json")]
use serde::{Deserialize, Serialize};

use std::collections::VecDeque;

use crate::grid::{Cell, Grid};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "json", derive(Serialize, Deserialize))]
pub struct GoalPlacement {
    pub cell: Cell,
    // BFS depth from the entry
    pub distance: u32,
    // False when no dead end existed and the farthest Path cell was used instead
    pub dead_end: bool,
}

// BFS depth of every cell reachable from `entry` over Path cells, row-major.
// Unreachable cells (and all walls) are None.
#[must_use]
pub fn bfs_distances(grid: &Grid, entry: Cell) -> Vec<Option<u32>> {
    let mut dist = vec![None; grid.rows() * grid.cols()];
    bfs(grid, entry, |cell, d| dist[cell.row * grid.cols() + cell.col] = Some(d));
    dist
}

// Visits Path cells reachable from `entry` in dequeue order, passing each cell's depth
fn bfs(grid: &Grid, entry: Cell, mut visit: impl FnMut(Cell, u32)) {
    if !grid.is_path(entry) {
        return;
    }

    let mut seen = vec![false; grid.rows() * grid.cols()];
    let mut queue = VecDeque::new();
    seen[entry.row * grid.cols() + entry.col] = true;
    queue.push_back((entry, 0));

    while let Some((cell, d)) = queue.pop_front() {
        visit(cell, d);
        for next in grid.path_neighbors(cell) {
            let idx = next.row * grid.cols() + next.col;
            if !seen[idx] {
                seen[idx] = true;
                queue.push_back((next, d + 1));
            }
        }
    }
}

// ============================================================================
// Goal Placement
// ============================================================================

// Farthest dead end from the entry. A dead end is a Path cell with exactly one Path
// neighbor that isn't the entry itself. Ties go to whichever was dequeued first.
// Falls back to the farthest reachable Path cell when there is no dead end, and to
// the entry when nothing else is reachable.
#[must_use]
pub fn find_goal(grid: &Grid, entry: Cell) -> GoalPlacement {
    let mut dead_end: Option<(Cell, u32)> = None;
    let mut farthest = (entry, 0);

    bfs(grid, entry, |cell, d| {
        if d > farthest.1 {
            farthest = (cell, d);
        }
        if cell != entry
            && grid.count_path_neighbors(cell) == 1
            && dead_end.is_none_or(|(_, best)| d > best)
        {
            dead_end = Some((cell, d));
        }
    });

    match dead_end {
        Some((cell, distance)) => GoalPlacement {
            cell,
            distance,
            dead_end: true,
        },
        None => GoalPlacement {
            cell: farthest.0,
            distance: farthest.1,
            dead_end: false,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::CellState;

    fn open(grid: &mut Grid, cells: &[(usize, usize)]) {
        for &(row, col) in cells {
            grid.set(Cell::new(row, col), CellState::Path);
        }
    }

    #[test]
    fn picks_the_deeper_of_two_dead_ends() {
        // Corridor from (1,1) east to (1,5), branch south from (1,3) to (5,3)
        let mut grid = Grid::new(11, 11);
        open(&mut grid, &[(1, 1), (1, 2), (1, 3), (1, 4), (1, 5)]);
        open(&mut grid, &[(2, 3), (3, 3), (4, 3), (5, 3)]);

        let goal = find_goal(&grid, Cell::new(1, 1));
        assert_eq!(goal.cell, Cell::new(5, 3));
        assert_eq!(goal.distance, 6);
        assert!(goal.dead_end);
    }

    #[test]
    fn entry_is_never_the_goal_when_it_is_a_dead_end() {
        let mut grid = Grid::new(11, 11);
        open(&mut grid, &[(1, 1), (1, 2), (1, 3)]);

        let goal = find_goal(&grid, Cell::new(1, 1));
        assert_eq!(goal.cell, Cell::new(1, 3));
        assert_eq!(goal.distance, 2);
    }

    #[test]
    fn equal_depth_tie_goes_to_first_dequeued() {
        // Two arms of equal length from the entry; East is expanded before South
        let mut grid = Grid::new(11, 11);
        open(&mut grid, &[(1, 1), (1, 2), (1, 3), (2, 1), (3, 1)]);

        let goal = find_goal(&grid, Cell::new(1, 1));
        assert_eq!(goal.cell, Cell::new(1, 3));
    }

    #[test]
    fn loop_without_dead_ends_falls_back_to_farthest_cell() {
        // 3x3 ring of Path cells around a wall, every cell has two neighbors
        let mut grid = Grid::new(11, 11);
        open(&mut grid, &[(1, 1), (1, 2), (1, 3), (2, 1), (2, 3), (3, 1), (3, 2), (3, 3)]);

        let goal = find_goal(&grid, Cell::new(1, 1));
        assert!(!goal.dead_end);
        assert_eq!(goal.cell, Cell::new(3, 3));
        assert_eq!(goal.distance, 4);
    }

    #[test]
    fn lone_entry_is_its_own_goal() {
        let mut grid = Grid::new(11, 11);
        open(&mut grid, &[(1, 1)]);

        let goal = find_goal(&grid, Cell::new(1, 1));
        assert_eq!(goal.cell, Cell::new(1, 1));
        assert_eq!(goal.distance, 0);
        assert!(!goal.dead_end);
    }

    #[test]
    fn walled_entry_still_yields_a_goal() {
        let grid = Grid::new(11, 11);
        let goal = find_goal(&grid, Cell::new(1, 1));
        assert_eq!(goal.cell, Cell::new(1, 1));
    }

    #[test]
    fn distances_cover_only_reachable_path_cells() {
        let mut grid = Grid::new(11, 11);
        open(&mut grid, &[(1, 1), (1, 2), (1, 3)]);
        open(&mut grid, &[(5, 5)]); // disconnected island

        let dist = bfs_distances(&grid, Cell::new(1, 1));
        assert_eq!(dist[11 + 1], Some(0));
        assert_eq!(dist[11 + 3], Some(2));
        assert_eq!(dist[5 * 11 + 5], None);
        assert_eq!(dist.iter().flatten().count(), 3);
    }
}
