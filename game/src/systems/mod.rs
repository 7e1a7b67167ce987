pub mod goal;
pub mod input;
pub mod maze;
pub mod perception;
pub mod run;
pub mod status;

pub use goal::goal_trigger_system;
pub use input::input_command_system;
pub use maze::{maze_generation_system, spawn_actor_system};
pub use perception::{perception_meter_system, reveal_fanout_system};
pub use run::run_state_system;
pub use status::status_report_system;
