use bevy::prelude::*;
use rand::rngs::StdRng;
use std::{collections::HashMap, path::PathBuf};
use tokio::sync::mpsc::{UnboundedReceiver, error::TryRecvError};

use crate::input::InputCommand;
use common::{
    MazeBuilder, MazeDescription,
    components::{Appearance, Collider, PieceKind},
};

// ============================================================================
// Maze Resources
// ============================================================================

// The live maze. None before the first generation and for the instant between teardown
// and rebuild.
#[derive(Resource, Default)]
pub struct CurrentMaze(pub Option<MazeDescription>);

#[derive(Resource)]
pub struct MazeGenerator(pub MazeBuilder);

// Single source of randomness for every generation
#[derive(Resource)]
pub struct MazeRng(pub StdRng);

// What gets attached to each spawned piece
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PieceTemplate {
    pub appearance: Appearance,
    pub collider: Collider,
}

impl PieceTemplate {
    #[must_use]
    pub const fn for_kind(kind: PieceKind) -> Self {
        Self {
            appearance: Appearance::initial(kind),
            collider: Collider::for_piece(kind),
        }
    }
}

// Templates per piece kind. A kind with no template is not spawned.
#[derive(Resource, Debug, Clone)]
pub struct PieceTemplates(pub HashMap<PieceKind, PieceTemplate>);

impl PieceTemplates {
    #[must_use]
    pub fn get(&self, kind: PieceKind) -> Option<&PieceTemplate> {
        self.0.get(&kind)
    }

    #[must_use]
    pub fn without(mut self, kind: PieceKind) -> Self {
        self.0.remove(&kind);
        self
    }
}

impl Default for PieceTemplates {
    fn default() -> Self {
        let kinds = [
            PieceKind::SolidWall,
            PieceKind::FakeWall,
            PieceKind::InvisibleWall,
            PieceKind::Exit,
            PieceKind::Floor,
            PieceKind::Roof,
        ];
        Self(kinds.into_iter().map(|kind| (kind, PieceTemplate::for_kind(kind))).collect())
    }
}

// A piece kind that could not be spawned during one generation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MazeDiagnostic {
    pub generation: u64,
    pub kind: PieceKind,
    pub skipped: usize,
}

#[derive(Resource, Debug, Default)]
pub struct MazeDiagnostics(pub Vec<MazeDiagnostic>);

// ============================================================================
// Run Resources
// ============================================================================

#[derive(Resource, Debug)]
pub struct RunState {
    pub pending_regeneration: bool,
    pub exit_reached: bool,
    // Seconds since the exit was reached
    pub exit_timer: f32,
    // Completed runs
    pub runs: u64,
    pub quit: bool,
}

impl Default for RunState {
    fn default() -> Self {
        Self {
            pending_regeneration: true,
            exit_reached: false,
            exit_timer: 0.0,
            runs: 0,
            quit: false,
        }
    }
}

#[derive(Resource, Debug, Clone, Default)]
pub struct RunSettings {
    pub restart_delay: f32,
    pub print_maze: bool,
    pub dump_json: Option<PathBuf>,
}

// Latest sampled state of the vision button
#[derive(Resource, Debug, Default)]
pub struct PerceptionInput {
    pub held: bool,
}

// Set by the status command, consumed by the status system
#[derive(Resource, Debug, Default)]
pub struct StatusRequest(pub bool);

// ============================================================================
// Channels
// ============================================================================

// Resource wrapper for the channel from the stdin task
#[derive(Resource)]
pub struct FromInputChannel(UnboundedReceiver<InputCommand>);

impl FromInputChannel {
    #[must_use]
    pub const fn new(receiver: UnboundedReceiver<InputCommand>) -> Self {
        Self(receiver)
    }

    pub fn try_recv(&mut self) -> Result<InputCommand, TryRecvError> {
        self.0.try_recv()
    }
}
