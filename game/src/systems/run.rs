use bevy::prelude::*;

use crate::{
    messages::GoalReached,
    resources::{CurrentMaze, RunSettings, RunState},
};

// ============================================================================
// Run Orchestration System
// ============================================================================

// Exit reached -> wait restart_delay -> request a new maze. Repeated goal messages while
// waiting are ignored, as are messages about a maze that has already been replaced.
pub fn run_state_system(
    time: Res<Time>,
    settings: Res<RunSettings>,
    maze: Res<CurrentMaze>,
    mut run: ResMut<RunState>,
    mut goal_reader: MessageReader<GoalReached>,
) {
    if run.exit_reached {
        run.exit_timer += time.delta_secs();
        if run.exit_timer >= settings.restart_delay {
            run.exit_reached = false;
            run.exit_timer = 0.0;
            run.runs += 1;
            run.pending_regeneration = true;
            info!("run {} complete, building the next maze", run.runs);
        }
    }

    let generation = maze.0.as_ref().map(|m| m.generation);
    for reached in goal_reader.read() {
        if run.exit_reached || run.pending_regeneration || Some(reached.generation) != generation {
            continue;
        }
        run.exit_reached = true;
        run.exit_timer = 0.0;
        info!("exit reached in maze #{}", reached.generation);
    }
}
