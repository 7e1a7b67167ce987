use bevy::prelude::*;

use crate::{messages::GoalReached, resources::CurrentMaze};
use common::{
    components::{CellPosition, WorldPosition},
    grid::world_to_cell,
    markers::{ActorMarker, GoalMarker},
};

// ============================================================================
// Goal Trigger System
// ============================================================================

// Fires while the actor stands in the exit's cell. Without an exit entity there is no
// trigger volume, so nothing fires.
pub fn goal_trigger_system(
    maze: Res<CurrentMaze>,
    actors: Query<&WorldPosition, With<ActorMarker>>,
    exits: Query<&CellPosition, With<GoalMarker>>,
    mut goal_writer: MessageWriter<GoalReached>,
) {
    let Some(maze) = &maze.0 else {
        return;
    };
    let (rows, cols) = (maze.grid.rows(), maze.grid.cols());

    for position in &actors {
        let Some(cell) = world_to_cell(position.0, rows, cols) else {
            continue;
        };
        if exits.iter().any(|exit| exit.0 == cell) {
            goal_writer.write(GoalReached {
                generation: maze.generation,
            });
        }
    }
}
