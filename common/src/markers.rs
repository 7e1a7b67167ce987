use bevy_ecs::prelude::*;

// Marker components to tell maze archetypes apart.

// Everything spawned for the current maze; despawned wholesale on regeneration
#[derive(Component, Debug, Default)]
pub struct MazeEntityMarker;

// Fake and invisible walls, the targets of reveal fan-out
#[derive(Component, Debug, Default)]
pub struct DisguisedMarker;

#[derive(Component, Debug, Default)]
pub struct ActorMarker;

#[derive(Component, Debug, Default)]
pub struct GoalMarker;
