#[cfg(feature = "json")]
use serde::{Deserialize, Serialize};

use bevy_math::Vec3;
use rand::Rng;
use std::fmt::Write as _;
use tracing::debug;

use crate::{
    carver::carve,
    config::MazeConfig,
    constants::{ENTRY_COL, ENTRY_ROW, FLOOR_Y, ROOF_Y},
    goal::{GoalPlacement, find_goal},
    grid::{Cell, Grid, grid_to_world},
    obstacles::{Obstacle, ObstacleKind, classify_walls, place_invisible_walls},
};

// ============================================================================
// Maze Description
// ============================================================================

// Horizontal slab covering the whole maze (floor or roof)
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "json", derive(Serialize, Deserialize))]
pub struct Slab {
    pub center: Vec3,
    pub scale: Vec3,
}

impl Slab {
    fn covering(rows: usize, cols: usize, y: f32) -> Self {
        Self {
            center: Vec3::new((cols - 1) as f32 / 2.0, y, (rows - 1) as f32 / 2.0),
            scale: Vec3::new(cols as f32, 1.0, rows as f32),
        }
    }
}

// Row-major table pointing each cell at its obstacle: the list it lives in and its position there
#[derive(Debug, Clone, Default, PartialEq, Eq)]
struct ObstacleIndex(Vec<Option<(ObstacleKind, usize)>>);

impl ObstacleIndex {
    fn build(grid: &Grid, lists: [&[Obstacle]; 3]) -> Self {
        let mut slots = vec![None; grid.len()];
        for list in lists {
            for (i, obstacle) in list.iter().enumerate() {
                if let Some(slot) = grid.slot(obstacle.cell) {
                    slots[slot] = Some((obstacle.kind, i));
                }
            }
        }
        Self(slots)
    }
}

// Complete output of one generation. Replaced wholesale on regeneration.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "json", derive(Serialize, Deserialize))]
pub struct MazeDescription {
    pub generation: u64,
    pub config: MazeConfig,
    pub grid: Grid,
    pub solid_walls: Vec<Obstacle>,
    pub fake_walls: Vec<Obstacle>,
    pub invisible_walls: Vec<Obstacle>,
    pub entry: Cell,
    pub goal: GoalPlacement,
    pub entry_world_position: Vec3,
    pub goal_world_position: Vec3,
    pub floor: Slab,
    pub roof: Slab,
    // Derived from the lists; rebuilt by `reindex` after deserializing
    #[cfg_attr(feature = "json", serde(skip))]
    index: ObstacleIndex,
}

impl MazeDescription {
    // Every fake and invisible wall
    pub fn disguised(&self) -> impl Iterator<Item = &Obstacle> {
        self.fake_walls.iter().chain(&self.invisible_walls)
    }

    // Fan a reveal out to every disguised obstacle
    pub fn set_revealed(&mut self, on: bool) {
        for obstacle in self.fake_walls.iter_mut().chain(&mut self.invisible_walls) {
            obstacle.set_revealed(on);
        }
    }

    #[must_use]
    pub fn obstacle_at(&self, cell: Cell) -> Option<&Obstacle> {
        let slot = self.grid.slot(cell)?;
        match self.index.0.get(slot) {
            Some(entry) => {
                let (kind, i) = (*entry)?;
                self.obstacles(kind).get(i)
            }
            // Index missing (deserialized description): fall back to scanning.
            // Walls and invisible walls never share a cell.
            None => self
                .invisible_walls
                .iter()
                .chain(&self.fake_walls)
                .chain(&self.solid_walls)
                .find(|o| o.cell == cell),
        }
    }

    #[must_use]
    pub fn obstacles(&self, kind: ObstacleKind) -> &[Obstacle] {
        match kind {
            ObstacleKind::Solid => &self.solid_walls,
            ObstacleKind::FakeWall => &self.fake_walls,
            ObstacleKind::InvisibleWall => &self.invisible_walls,
        }
    }

    // Rebuilds the per-cell lookup table from the obstacle lists
    pub fn reindex(&mut self) {
        self.index = ObstacleIndex::build(
            &self.grid,
            [
                self.solid_walls.as_slice(),
                self.fake_walls.as_slice(),
                self.invisible_walls.as_slice(),
            ],
        );
    }

    // Physical passability, independent of what has been revealed
    #[must_use]
    pub fn blocks_movement(&self, cell: Cell) -> bool {
        if !self.grid.contains(cell) {
            return true;
        }
        self.obstacle_at(cell).is_some_and(|o| o.kind.blocks_movement())
    }

    #[must_use]
    pub fn render_ascii(&self) -> String {
        let mut out = String::with_capacity(self.grid.rows() * (self.grid.cols() + 1));
        for row in 0..self.grid.rows() {
            if row > 0 {
                out.push('\n');
            }
            for col in 0..self.grid.cols() {
                let cell = Cell::new(row, col);
                let ch = if cell == self.entry {
                    'S'
                } else if cell == self.goal.cell {
                    'G'
                } else {
                    match self.obstacle_at(cell).map(|o| o.kind) {
                        Some(ObstacleKind::Solid) => '#',
                        Some(ObstacleKind::FakeWall) => '%',
                        Some(ObstacleKind::InvisibleWall) => '!',
                        None => '.',
                    }
                };
                out.push(ch);
            }
        }
        out
    }

    #[must_use]
    pub fn summary(&self) -> String {
        let mut out = String::new();
        let _ = write!(
            out,
            "maze #{} {}x{}: {} path cells, {} solid, {} fake, {} invisible, goal {:?} at depth {}",
            self.generation,
            self.grid.rows(),
            self.grid.cols(),
            self.grid.path_count(),
            self.solid_walls.len(),
            self.fake_walls.len(),
            self.invisible_walls.len(),
            (self.goal.cell.row, self.goal.cell.col),
            self.goal.distance,
        );
        if !self.goal.dead_end {
            out.push_str(" (no dead end)");
        }
        out
    }

    #[cfg(feature = "json")]
    pub fn to_json(&self) -> anyhow::Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

// ============================================================================
// Maze Builder
// ============================================================================

// Runs carving, obstacle classification, and goal placement in that order
#[derive(Debug, Clone)]
pub struct MazeBuilder {
    config: MazeConfig,
    generation: u64,
}

impl MazeBuilder {
    #[must_use]
    pub fn new(config: MazeConfig) -> Self {
        Self {
            config: config.normalized(),
            generation: 0,
        }
    }

    #[must_use]
    pub const fn config(&self) -> &MazeConfig {
        &self.config
    }

    // Number of mazes built so far
    #[must_use]
    pub const fn generation(&self) -> u64 {
        self.generation
    }

    // Builds a fresh maze. Every random draw comes from `rng`, so equal seeds give equal mazes.
    pub fn generate<R: Rng + ?Sized>(&mut self, rng: &mut R) -> MazeDescription {
        let config = self.config;
        let entry = Cell::new(ENTRY_ROW, ENTRY_COL);

        let mut grid = Grid::new(config.rows, config.cols);
        let rooms = carve(&mut grid, entry, rng);
        let (solid_walls, fake_walls) = classify_walls(&grid, config.fake_wall_chance, rng);
        let invisible_walls = place_invisible_walls(&grid, entry, config.invis_wall_chance, rng);
        let goal = find_goal(&grid, entry);

        self.generation += 1;
        let mut maze = MazeDescription {
            generation: self.generation,
            config,
            solid_walls,
            fake_walls,
            invisible_walls,
            entry,
            goal,
            entry_world_position: grid_to_world(entry),
            goal_world_position: grid_to_world(goal.cell),
            floor: Slab::covering(config.rows, config.cols, FLOOR_Y),
            roof: Slab::covering(config.rows, config.cols, ROOF_Y),
            grid,
            index: ObstacleIndex::default(),
        };
        maze.reindex();

        debug!(rooms, "{}", maze.summary());
        maze
    }

    // Tears down whatever is in `slot` before building its replacement, so two
    // generations never coexist.
    pub fn regenerate<'a, R: Rng + ?Sized>(
        &mut self,
        slot: &'a mut Option<MazeDescription>,
        rng: &mut R,
    ) -> &'a MazeDescription {
        drop(slot.take());
        slot.insert(self.generate(rng))
    }
}

impl Default for MazeBuilder {
    fn default() -> Self {
        Self::new(MazeConfig::default())
    }
}
