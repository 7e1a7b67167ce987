pub mod carver;
pub mod components;
pub mod config;
pub mod constants;
pub mod goal;
pub mod grid;
pub mod markers;
pub mod maze;
pub mod obstacles;
pub mod perception;

pub use config::{MazeConfig, PerceptionConfig};
pub use grid::{Cell, CellState, Grid};
pub use maze::{MazeBuilder, MazeDescription};
pub use obstacles::{Obstacle, ObstacleKind};
pub use perception::{PerceptionMeter, PerceptionState};
