use bevy::prelude::*;

use crate::resources::{CurrentMaze, RunState, StatusRequest};
use common::{PerceptionMeter, PerceptionState};

// ============================================================================
// Status System
// ============================================================================

// Logs the meter on request and whenever its state changes
pub fn status_report_system(
    meter: Res<PerceptionMeter>,
    maze: Res<CurrentMaze>,
    run: Res<RunState>,
    mut request: ResMut<StatusRequest>,
    mut last_state: Local<Option<PerceptionState>>,
) {
    let readout = meter.readout();

    if *last_state != Some(readout.state) {
        if last_state.is_some() {
            info!("{}", readout);
        }
        *last_state = Some(readout.state);
    }

    if request.0 {
        request.0 = false;
        info!("{}", readout);
        match &maze.0 {
            Some(maze) => info!("{} (runs completed: {})", maze.summary(), run.runs),
            None => info!("no maze yet"),
        }
    }
}
