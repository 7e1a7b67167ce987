use bevy::prelude::*;

// ============================================================================
// Bevy Messages
// ============================================================================

/// Mask vision switched on or off
#[derive(Message, Debug, Clone, Copy, PartialEq, Eq)]
pub struct RevealChanged {
    pub on: bool,
}

/// The actor is standing on the exit. Written every tick it stays there.
#[derive(Message, Debug, Clone, Copy, PartialEq, Eq)]
pub struct GoalReached {
    pub generation: u64,
}
