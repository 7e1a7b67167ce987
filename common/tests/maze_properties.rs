//! Property tests over generated mazes and the perception meter.

use common::{
    Cell, MazeBuilder, MazeConfig, PerceptionConfig, PerceptionMeter,
    goal::bfs_distances,
    obstacles::{ObstacleKind, invisible_wall_target},
};
use proptest::prelude::*;
use rand::{SeedableRng, rngs::StdRng};
use std::collections::HashSet;

// ---------------------------------------------------------------------------
// Helpers / Strategies
// ---------------------------------------------------------------------------

fn arb_maze_config() -> impl Strategy<Value = MazeConfig> {
    (0usize..40, 0usize..40, 0.0f64..0.5, 0.0f64..0.4).prop_map(|(rows, cols, fake, invis)| MazeConfig {
        rows,
        cols,
        fake_wall_chance: fake,
        invis_wall_chance: invis,
    })
}

fn arb_perception_config() -> impl Strategy<Value = PerceptionConfig> {
    (0.5f32..10.0, 0.0f32..5.0, 0.0f32..5.0, 0.05f32..0.95).prop_map(|(max, drain, recharge, threshold)| {
        PerceptionConfig {
            max_meter: max,
            drain_rate: drain,
            recharge_rate: recharge,
            recharge_threshold: threshold,
        }
    })
}

fn arb_samples() -> impl Strategy<Value = Vec<(bool, f32)>> {
    prop::collection::vec((any::<bool>(), 0.0f32..0.5), 1..300)
}

// Corridor edges: pairs of rooms (odd, odd) joined through an open corridor cell
fn count_room_edges(maze: &common::MazeDescription) -> usize {
    let grid = &maze.grid;
    let mut edges = 0;
    for room in grid.path_cells().filter(|c| c.row % 2 == 1 && c.col % 2 == 1) {
        let east = Cell::new(room.row, room.col + 1);
        let south = Cell::new(room.row + 1, room.col);
        if grid.is_path(east) && grid.is_path(Cell::new(room.row, room.col + 2)) {
            edges += 1;
        }
        if grid.is_path(south) && grid.is_path(Cell::new(room.row + 2, room.col)) {
            edges += 1;
        }
    }
    edges
}

// ---------------------------------------------------------------------------
// Maze Properties
// ---------------------------------------------------------------------------

proptest! {
    /// Flood fill from the entry covers exactly the Path set.
    #[test]
    fn every_path_cell_is_reachable(config in arb_maze_config(), seed in any::<u64>()) {
        let maze = MazeBuilder::new(config).generate(&mut StdRng::seed_from_u64(seed));
        let dist = bfs_distances(&maze.grid, maze.entry);
        let reached = dist.iter().flatten().count();
        prop_assert_eq!(reached, maze.grid.path_count());
    }

    /// Rooms and corridors form a tree.
    #[test]
    fn path_set_is_acyclic(config in arb_maze_config(), seed in any::<u64>()) {
        let maze = MazeBuilder::new(config).generate(&mut StdRng::seed_from_u64(seed));
        let rooms = maze
            .grid
            .path_cells()
            .filter(|c| c.row % 2 == 1 && c.col % 2 == 1)
            .count();
        prop_assert_eq!(count_room_edges(&maze), rooms - 1);
        // Every corridor is one edge, so the whole Path set is a tree as well
        prop_assert_eq!(maze.grid.path_count(), 2 * rooms - 1);
    }

    /// Border cells are Wall and Solid.
    #[test]
    fn border_is_sealed(config in arb_maze_config(), seed in any::<u64>()) {
        let maze = MazeBuilder::new(config).generate(&mut StdRng::seed_from_u64(seed));
        let grid = &maze.grid;
        prop_assert!(grid.rows() % 2 == 1 && grid.rows() >= 11);
        prop_assert!(grid.cols() % 2 == 1 && grid.cols() >= 11);

        for cell in grid.cells().filter(|&c| grid.is_border(c)) {
            prop_assert!(!grid.is_path(cell));
            let obstacle = maze.obstacle_at(cell);
            prop_assert_eq!(obstacle.map(|o| o.kind), Some(ObstacleKind::Solid));
        }
    }

    /// Goal is a reachable dead end other than the entry.
    #[test]
    fn goal_is_a_far_dead_end(config in arb_maze_config(), seed in any::<u64>()) {
        let maze = MazeBuilder::new(config).generate(&mut StdRng::seed_from_u64(seed));
        let goal = maze.goal;
        let dist = bfs_distances(&maze.grid, maze.entry);
        let goal_depth = dist[goal.cell.row * maze.grid.cols() + goal.cell.col];

        prop_assert!(maze.grid.is_path(goal.cell));
        prop_assert_eq!(goal_depth, Some(goal.distance));
        prop_assert!(goal.dead_end);
        prop_assert_ne!(goal.cell, maze.entry);
        prop_assert_eq!(maze.grid.count_path_neighbors(goal.cell), 1);

        // No other dead end is deeper
        for cell in maze.grid.path_cells() {
            if cell != maze.entry && maze.grid.count_path_neighbors(cell) == 1 {
                let depth = dist[cell.row * maze.grid.cols() + cell.col].unwrap_or(0);
                prop_assert!(depth <= goal.distance);
            }
        }
    }

    /// Invisible walls hit the exact floor(count * chance) target.
    #[test]
    fn invisible_wall_density_is_exact(config in arb_maze_config(), seed in any::<u64>()) {
        let maze = MazeBuilder::new(config).generate(&mut StdRng::seed_from_u64(seed));
        let candidates = maze.grid.path_count() - 1;
        let expected = (candidates as f64 * maze.config.invis_wall_chance).floor() as usize;

        prop_assert_eq!(maze.invisible_walls.len(), expected);
        prop_assert_eq!(invisible_wall_target(candidates, maze.config.invis_wall_chance), expected);

        let cells: HashSet<Cell> = maze.invisible_walls.iter().map(|o| o.cell).collect();
        prop_assert_eq!(cells.len(), expected);
        prop_assert!(!cells.contains(&maze.entry));
        prop_assert!(cells.iter().all(|&c| maze.grid.is_path(c)));
        prop_assert!(maze.fake_walls.iter().all(|o| !maze.grid.is_path(o.cell)));
    }

    /// Same seed, same maze.
    #[test]
    fn generation_is_reproducible(config in arb_maze_config(), seed in any::<u64>()) {
        let a = MazeBuilder::new(config).generate(&mut StdRng::seed_from_u64(seed));
        let b = MazeBuilder::new(config).generate(&mut StdRng::seed_from_u64(seed));
        prop_assert_eq!(a, b);
    }
}

// ---------------------------------------------------------------------------
// Perception Meter Properties
// ---------------------------------------------------------------------------

proptest! {
    /// The meter never leaves [0, max] and never drains while locked.
    #[test]
    fn meter_stays_in_bounds(config in arb_perception_config(), samples in arb_samples()) {
        let mut meter = PerceptionMeter::new(config);
        for (held, dt) in samples {
            meter.tick(held, dt, |_| {});
            prop_assert!(meter.current_meter() >= 0.0);
            prop_assert!(meter.current_meter() <= config.max_meter);
            prop_assert!(!(meter.is_active() && meter.is_locked()));
            prop_assert!(!meter.is_active() || meter.current_meter() > 0.0);
        }
    }

    /// Reveal events alternate on/off, starting with on.
    #[test]
    fn reveal_events_alternate(config in arb_perception_config(), samples in arb_samples()) {
        let mut meter = PerceptionMeter::new(config);
        let mut events = Vec::new();
        for (held, dt) in samples {
            meter.tick(held, dt, |on| events.push(on));
        }
        for (i, on) in events.iter().enumerate() {
            prop_assert_eq!(*on, i % 2 == 0);
        }
        prop_assert_eq!(meter.is_active(), events.len() % 2 == 1);
    }

    /// Once locked, no reveal until the threshold is reached, even if held throughout.
    #[test]
    fn lockout_respects_threshold(config in arb_perception_config(), dt in 0.01f32..0.2) {
        prop_assume!(config.drain_rate > 0.1 && config.recharge_rate > 0.1);
        let mut meter = PerceptionMeter::new(config);

        let mut steps = 0;
        while !meter.is_locked() {
            meter.tick(true, dt, |_| {});
            steps += 1;
            prop_assert!(steps < 100_000);
        }

        let threshold = config.max_meter * config.recharge_threshold;
        loop {
            let before = meter.current_meter();
            let mut revealed = false;
            meter.tick(true, dt, |on| revealed |= on);
            if revealed {
                prop_assert!(before + 1e-4 >= threshold);
                break;
            }
            steps += 1;
            prop_assert!(steps < 200_000);
        }
    }
}
