use bevy::prelude::*;

use crate::{
    messages::RevealChanged,
    resources::{CurrentMaze, PerceptionInput},
};
use common::{
    PerceptionMeter,
    components::{Appearance, PieceKind, Revealed},
    markers::DisguisedMarker,
};

// ============================================================================
// Perception Systems
// ============================================================================

pub fn perception_meter_system(
    time: Res<Time>,
    input: Res<PerceptionInput>,
    mut meter: ResMut<PerceptionMeter>,
    mut reveal_writer: MessageWriter<RevealChanged>,
) {
    meter.tick(input.held, time.delta_secs(), |on| {
        reveal_writer.write(RevealChanged { on });
    });
}

// Applies reveal toggles to the maze description and every disguised entity. Colliders
// are left alone: revealing changes what is drawn, never what blocks.
pub fn reveal_fanout_system(
    mut reveal_reader: MessageReader<RevealChanged>,
    mut maze: ResMut<CurrentMaze>,
    mut pieces: Query<(&PieceKind, &mut Revealed, &mut Appearance), With<DisguisedMarker>>,
) {
    for &RevealChanged { on } in reveal_reader.read() {
        if let Some(maze) = maze.0.as_mut() {
            maze.set_revealed(on);
        }
        for (kind, mut revealed, mut appearance) in &mut pieces {
            revealed.0 = on;
            *appearance = Appearance::for_reveal(*kind, on);
        }
        debug!("mask vision {}", if on { "on" } else { "off" });
    }
}
