#[cfg(feature = "json")]
use serde::{Deserialize, Serialize};

use rand::{Rng, seq::SliceRandom};

use crate::grid::{Cell, Grid};

// ============================================================================
// Obstacle Types
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "json", derive(Serialize, Deserialize))]
pub enum ObstacleKind {
    // Blocks movement, always visible
    Solid,
    // Sits on a Wall cell and looks solid, but can be walked through
    FakeWall,
    // Sits on a Path cell and looks open, but blocks movement
    InvisibleWall,
}

impl ObstacleKind {
    #[must_use]
    pub const fn is_disguised(self) -> bool {
        matches!(self, Self::FakeWall | Self::InvisibleWall)
    }

    // Revealing never changes this
    #[must_use]
    pub const fn blocks_movement(self) -> bool {
        matches!(self, Self::Solid | Self::InvisibleWall)
    }

    // What the player sees. A revealed fake wall shows through, a revealed invisible wall shows up.
    #[must_use]
    pub const fn looks_solid(self, revealed: bool) -> bool {
        match self {
            Self::Solid => true,
            Self::FakeWall => !revealed,
            Self::InvisibleWall => revealed,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "json", derive(Serialize, Deserialize))]
pub struct Obstacle {
    pub cell: Cell,
    pub kind: ObstacleKind,
    pub revealed: bool,
}

impl Obstacle {
    #[must_use]
    pub const fn new(cell: Cell, kind: ObstacleKind) -> Self {
        Self {
            cell,
            kind,
            revealed: false,
        }
    }

    // Visual only; solid walls have nothing to reveal
    pub const fn set_revealed(&mut self, on: bool) {
        if self.kind.is_disguised() {
            self.revealed = on;
        }
    }
}

// ============================================================================
// Classification
// ============================================================================

// Probability usable by `random_bool`; NaN counts as never
#[must_use]
pub fn unit_chance(p: f64) -> f64 {
    if p.is_nan() { 0.0 } else { p.clamp(0.0, 1.0) }
}

// Every Wall cell becomes an obstacle. Border walls are always solid; interior walls
// are independently fake with probability `fake_wall_chance`.
// Returns (solid walls, fake walls) in row-major order.
pub fn classify_walls<R: Rng + ?Sized>(
    grid: &Grid,
    fake_wall_chance: f64,
    rng: &mut R,
) -> (Vec<Obstacle>, Vec<Obstacle>) {
    let chance = unit_chance(fake_wall_chance);
    let mut solid = Vec::new();
    let mut fake = Vec::new();

    for cell in grid.cells().filter(|&c| !grid.is_path(c)) {
        if !grid.is_border(cell) && rng.random_bool(chance) {
            fake.push(Obstacle::new(cell, ObstacleKind::FakeWall));
        } else {
            solid.push(Obstacle::new(cell, ObstacleKind::Solid));
        }
    }

    (solid, fake)
}

// Exact number of invisible walls for a candidate pool
#[must_use]
pub fn invisible_wall_target(candidates: usize, invis_wall_chance: f64) -> usize {
    let chance = unit_chance(invis_wall_chance);
    ((candidates as f64 * chance).floor() as usize).min(candidates)
}

// Interior Path cells other than the entry, shuffled, truncated to the exact target density
pub fn place_invisible_walls<R: Rng + ?Sized>(
    grid: &Grid,
    entry: Cell,
    invis_wall_chance: f64,
    rng: &mut R,
) -> Vec<Obstacle> {
    let mut candidates: Vec<Cell> = grid
        .path_cells()
        .filter(|&c| grid.is_interior(c) && c != entry)
        .collect();
    candidates.shuffle(rng);

    let count = invisible_wall_target(candidates.len(), invis_wall_chance);
    candidates
        .into_iter()
        .take(count)
        .map(|cell| Obstacle::new(cell, ObstacleKind::InvisibleWall))
        .collect()
}
