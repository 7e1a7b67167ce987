#[allow(clippy::wildcard_imports)]
use bevy_ecs::prelude::*;
use bevy_math::Vec3;

use crate::{constants::*, grid::Cell, obstacles::ObstacleKind};

// ============================================================================
// Shared Maze Components
// ============================================================================

// What a maze entity represents
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PieceKind {
    SolidWall,
    FakeWall,
    InvisibleWall,
    Exit,
    Floor,
    Roof,
}

impl PieceKind {
    #[must_use]
    pub const fn from_obstacle(kind: ObstacleKind) -> Self {
        match kind {
            ObstacleKind::Solid => Self::SolidWall,
            ObstacleKind::FakeWall => Self::FakeWall,
            ObstacleKind::InvisibleWall => Self::InvisibleWall,
        }
    }

    #[must_use]
    pub const fn is_disguised(self) -> bool {
        matches!(self, Self::FakeWall | Self::InvisibleWall)
    }

    // Entity name prefix, suffixed with `_row_col` for per-cell pieces
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::SolidWall => "Wall",
            Self::FakeWall => "FakeWall",
            Self::InvisibleWall => "InvisWall",
            Self::Exit => "Exit",
            Self::Floor => "Floor",
            Self::Roof => "Roof",
        }
    }
}

// Grid cell a piece occupies. Floor and roof span the maze and have none.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellPosition(pub Cell);

// World-space position (x = col, z = row)
#[derive(Component, Debug, Clone, Copy, PartialEq, Default)]
pub struct WorldPosition(pub Vec3);

// World-space size, used by the floor and roof slabs
#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct WorldScale(pub Vec3);

// Current reveal flag of a disguised piece. Starts hidden.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Revealed(pub bool);

// How a piece should be drawn right now
#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct Appearance {
    pub tint: [f32; 4],
    pub visible: bool,
}

impl Appearance {
    // Hidden look of each piece
    #[must_use]
    pub const fn initial(kind: PieceKind) -> Self {
        match kind {
            PieceKind::SolidWall => Self::shown(SOLID_WALL_TINT),
            PieceKind::FakeWall => Self::shown(FAKE_WALL_TINT),
            PieceKind::InvisibleWall => Self {
                tint: INVIS_WALL_TINT,
                visible: false,
            },
            PieceKind::Exit => Self::shown(EXIT_TINT),
            PieceKind::Floor => Self::shown(FLOOR_TINT),
            PieceKind::Roof => Self::shown(ROOF_TINT),
        }
    }

    const fn shown(tint: [f32; 4]) -> Self {
        Self { tint, visible: true }
    }

    // Look of a disguised piece for the given reveal state; other pieces never change
    #[must_use]
    pub const fn for_reveal(kind: PieceKind, revealed: bool) -> Self {
        match kind {
            PieceKind::FakeWall if revealed => Self::shown(FAKE_WALL_REVEALED_TINT),
            PieceKind::InvisibleWall => Self {
                tint: INVIS_WALL_TINT,
                visible: revealed,
            },
            _ => Self::initial(kind),
        }
    }
}

// Physical collision. Fixed at spawn, revealing never touches it.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub struct Collider {
    pub blocks: bool,
    // Trigger volumes report overlap instead of blocking
    pub trigger: bool,
}

impl Collider {
    #[must_use]
    pub const fn for_piece(kind: PieceKind) -> Self {
        match kind {
            PieceKind::SolidWall | PieceKind::InvisibleWall | PieceKind::Floor | PieceKind::Roof => Self {
                blocks: true,
                trigger: false,
            },
            PieceKind::FakeWall => Self {
                blocks: false,
                trigger: false,
            },
            PieceKind::Exit => Self {
                blocks: false,
                trigger: true,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fake_wall_turns_translucent_red_when_revealed() {
        assert_eq!(Appearance::for_reveal(PieceKind::FakeWall, false).tint, FAKE_WALL_TINT);
        let revealed = Appearance::for_reveal(PieceKind::FakeWall, true);
        assert_eq!(revealed.tint, FAKE_WALL_REVEALED_TINT);
        assert!(revealed.visible);
    }

    #[test]
    fn invisible_wall_only_drawn_when_revealed() {
        assert!(!Appearance::initial(PieceKind::InvisibleWall).visible);
        assert!(Appearance::for_reveal(PieceKind::InvisibleWall, true).visible);
        assert!(!Appearance::for_reveal(PieceKind::InvisibleWall, false).visible);
    }

    #[test]
    fn collision_matches_obstacle_semantics() {
        for kind in [ObstacleKind::Solid, ObstacleKind::FakeWall, ObstacleKind::InvisibleWall] {
            let piece = PieceKind::from_obstacle(kind);
            assert_eq!(Collider::for_piece(piece).blocks, kind.blocks_movement());
            assert_eq!(piece.is_disguised(), kind.is_disguised());
        }
        assert!(Collider::for_piece(PieceKind::Exit).trigger);
    }
}
