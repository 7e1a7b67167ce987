pub mod config;
pub mod input;
pub mod messages;
pub mod resources;
pub mod systems;

use bevy::prelude::*;
use rand::rngs::StdRng;
use tokio::sync::mpsc::UnboundedReceiver;

use common::{MazeBuilder, PerceptionMeter};
use config::GameSettings;
use input::InputCommand;
use messages::{GoalReached, RevealChanged};
use resources::*;
use systems::{
    goal_trigger_system, input_command_system, maze_generation_system, perception_meter_system,
    reveal_fanout_system, run_state_system, spawn_actor_system, status_report_system,
};

// ============================================================================
// App Setup
// ============================================================================

// Installs the maze resources and systems. Plugins (time, logging) are left to the caller
// so tests can drive `Time` by hand.
pub fn configure_app(
    app: &mut App,
    settings: &GameSettings,
    rng: StdRng,
    from_input: UnboundedReceiver<InputCommand>,
) {
    app.insert_resource(MazeGenerator(MazeBuilder::new(settings.maze)))
        .insert_resource(MazeRng(rng))
        .insert_resource(PerceptionMeter::new(settings.perception))
        .insert_resource(RunSettings {
            restart_delay: settings.restart_delay,
            print_maze: settings.print_maze,
            dump_json: settings.dump_json.clone(),
        })
        .insert_resource(FromInputChannel::new(from_input))
        .init_resource::<CurrentMaze>()
        .init_resource::<PieceTemplates>()
        .init_resource::<MazeDiagnostics>()
        .init_resource::<RunState>()
        .init_resource::<PerceptionInput>()
        .init_resource::<StatusRequest>()
        .add_message::<RevealChanged>()
        .add_message::<GoalReached>()
        .add_systems(Startup, spawn_actor_system)
        .add_systems(
            Update,
            (
                // Order matters:
                // 1. Apply input (may move the actor or request a new maze)
                // 2. Check the exit trigger and advance the restart timer
                // 3. Rebuild the maze if requested, then ApplyDeferred so new pieces are queryable
                // 4. Tick the meter and fan reveal toggles out to the pieces
                input_command_system,
                goal_trigger_system,
                run_state_system,
                maze_generation_system,
                ApplyDeferred,
                perception_meter_system,
                reveal_fanout_system,
                status_report_system,
            )
                .chain(),
        );
}
