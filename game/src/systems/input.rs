use bevy::prelude::*;
use tokio::sync::mpsc::error::TryRecvError;

use crate::{
    input::InputCommand,
    messages::GoalReached,
    resources::{CurrentMaze, FromInputChannel, PerceptionInput, RunState, StatusRequest},
};
use common::{
    components::WorldPosition,
    constants::ACTOR_SPAWN_HEIGHT,
    grid::grid_to_world,
    markers::ActorMarker,
};

// ============================================================================
// Input Systems
// ============================================================================

// Drains every command the stdin task sent since the last tick
pub fn input_command_system(
    mut from_input: ResMut<FromInputChannel>,
    mut input: ResMut<PerceptionInput>,
    mut run: ResMut<RunState>,
    mut status: ResMut<StatusRequest>,
    maze: Res<CurrentMaze>,
    mut actors: Query<&mut WorldPosition, With<ActorMarker>>,
    mut goal_writer: MessageWriter<GoalReached>,
) {
    loop {
        let command = match from_input.try_recv() {
            Ok(command) => command,
            Err(TryRecvError::Empty) => break,
            Err(TryRecvError::Disconnected) => {
                if !run.quit {
                    debug!("input channel closed");
                    run.quit = true;
                }
                break;
            }
        };

        match command {
            InputCommand::Hold => input.held = true,
            InputCommand::Release => input.held = false,
            InputCommand::Goto(cell) => {
                let Some(maze) = &maze.0 else {
                    warn!("no maze to move in yet");
                    continue;
                };
                if !maze.grid.contains(cell) {
                    warn!("cell ({}, {}) is outside the maze", cell.row, cell.col);
                    continue;
                }
                for mut position in &mut actors {
                    position.0 = grid_to_world(cell) + Vec3::Y * ACTOR_SPAWN_HEIGHT;
                }
                debug!("actor moved to ({}, {})", cell.row, cell.col);
            }
            InputCommand::Goal => {
                if let Some(maze) = &maze.0 {
                    goal_writer.write(GoalReached {
                        generation: maze.generation,
                    });
                }
            }
            InputCommand::Regenerate => run.pending_regeneration = true,
            InputCommand::Status => status.0 = true,
            InputCommand::Quit => run.quit = true,
        }
    }
}
