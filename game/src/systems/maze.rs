use anyhow::Result;
use bevy::prelude::*;
use std::path::Path;

use crate::resources::{
    CurrentMaze, MazeDiagnostic, MazeDiagnostics, MazeGenerator, MazeRng, PieceTemplates, RunSettings, RunState,
};
use common::{
    Cell, MazeDescription, Obstacle,
    components::{CellPosition, PieceKind, Revealed, WorldPosition, WorldScale},
    constants::ACTOR_SPAWN_HEIGHT,
    grid::grid_to_world,
    markers::{ActorMarker, DisguisedMarker, GoalMarker, MazeEntityMarker},
};

// ============================================================================
// Helper Functions
// ============================================================================

struct PieceSpawn {
    kind: PieceKind,
    name: String,
    cell: Option<Cell>,
    position: Vec3,
    scale: Option<Vec3>,
}

impl PieceSpawn {
    fn obstacle(obstacle: &Obstacle) -> Self {
        let kind = PieceKind::from_obstacle(obstacle.kind);
        Self {
            kind,
            name: format!("{}_{}_{}", kind.name(), obstacle.cell.row, obstacle.cell.col),
            cell: Some(obstacle.cell),
            position: grid_to_world(obstacle.cell),
            scale: None,
        }
    }
}

// All pieces of a maze in spawn order
fn maze_pieces(maze: &MazeDescription) -> Vec<PieceSpawn> {
    let mut pieces: Vec<PieceSpawn> = maze
        .solid_walls
        .iter()
        .chain(&maze.fake_walls)
        .chain(&maze.invisible_walls)
        .map(PieceSpawn::obstacle)
        .collect();

    pieces.push(PieceSpawn {
        kind: PieceKind::Exit,
        name: PieceKind::Exit.name().to_string(),
        cell: Some(maze.goal.cell),
        position: maze.goal_world_position,
        scale: None,
    });
    for (kind, slab) in [(PieceKind::Floor, maze.floor), (PieceKind::Roof, maze.roof)] {
        pieces.push(PieceSpawn {
            kind,
            name: kind.name().to_string(),
            cell: None,
            position: slab.center,
            scale: Some(slab.scale),
        });
    }
    pieces
}

fn record_skip(skipped: &mut Vec<MazeDiagnostic>, generation: u64, kind: PieceKind) {
    match skipped.iter_mut().find(|d| d.kind == kind) {
        Some(diagnostic) => diagnostic.skipped += 1,
        None => skipped.push(MazeDiagnostic {
            generation,
            kind,
            skipped: 1,
        }),
    }
}

#[cfg(feature = "json")]
fn dump_json(maze: &MazeDescription, path: &Path) -> Result<()> {
    use anyhow::Context as _;

    let json = maze.to_json()?;
    std::fs::write(path, json).with_context(|| format!("failed to write {}", path.display()))
}

#[cfg(not(feature = "json"))]
fn dump_json(_maze: &MazeDescription, _path: &Path) -> Result<()> {
    anyhow::bail!("built without the json feature")
}

// ============================================================================
// Maze Systems
// ============================================================================

pub fn spawn_actor_system(mut commands: Commands) {
    commands.spawn((ActorMarker, Name::new("Actor"), WorldPosition::default()));
}

// Tears down the old maze and spawns the next one when a regeneration is pending
pub fn maze_generation_system(
    mut commands: Commands,
    mut run: ResMut<RunState>,
    mut generator: ResMut<MazeGenerator>,
    mut rng: ResMut<MazeRng>,
    mut current: ResMut<CurrentMaze>,
    templates: Res<PieceTemplates>,
    settings: Res<RunSettings>,
    mut diagnostics: ResMut<MazeDiagnostics>,
    maze_entities: Query<Entity, With<MazeEntityMarker>>,
    mut actors: Query<&mut WorldPosition, With<ActorMarker>>,
) {
    if !run.pending_regeneration {
        return;
    }
    run.pending_regeneration = false;
    run.exit_reached = false;
    run.exit_timer = 0.0;

    for entity in &maze_entities {
        commands.entity(entity).despawn();
    }

    let maze = generator.0.regenerate(&mut current.0, &mut rng.0);

    let mut skipped = Vec::new();
    for piece in maze_pieces(maze) {
        let Some(template) = templates.get(piece.kind) else {
            record_skip(&mut skipped, maze.generation, piece.kind);
            continue;
        };

        let mut entity = commands.spawn((
            MazeEntityMarker,
            piece.kind,
            Name::new(piece.name),
            WorldPosition(piece.position),
            template.appearance,
            template.collider,
        ));
        if let Some(cell) = piece.cell {
            entity.insert(CellPosition(cell));
        }
        if let Some(scale) = piece.scale {
            entity.insert(WorldScale(scale));
        }
        // New pieces start hidden; the next reveal toggle catches them up
        if piece.kind.is_disguised() {
            entity.insert((DisguisedMarker, Revealed(false)));
        }
        if piece.kind == PieceKind::Exit {
            entity.insert(GoalMarker);
        }
    }

    for diagnostic in &skipped {
        warn!(
            "maze #{}: no template for {:?}, skipped {} piece(s)",
            diagnostic.generation, diagnostic.kind, diagnostic.skipped
        );
    }
    diagnostics.0.extend(skipped);

    for mut position in &mut actors {
        position.0 = maze.entry_world_position + Vec3::Y * ACTOR_SPAWN_HEIGHT;
    }

    info!("{}", maze.summary());
    if settings.print_maze {
        info!("\n{}", maze.render_ascii());
    }
    if let Some(path) = &settings.dump_json {
        if let Err(e) = dump_json(maze, path) {
            warn!("maze dump failed: {:#}", e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use common::MazeBuilder;
    use rand::{SeedableRng, rngs::StdRng};

    #[test]
    fn every_piece_is_listed_once() {
        let maze = MazeBuilder::default().generate(&mut StdRng::seed_from_u64(11));
        let pieces = maze_pieces(&maze);

        let obstacles = maze.solid_walls.len() + maze.fake_walls.len() + maze.invisible_walls.len();
        assert_eq!(pieces.len(), obstacles + 3);
        assert_eq!(pieces.iter().filter(|p| p.kind == PieceKind::Exit).count(), 1);
        assert!(pieces.iter().any(|p| p.name == "Wall_0_0"));
        assert!(
            pieces
                .iter()
                .filter(|p| matches!(p.kind, PieceKind::Floor | PieceKind::Roof))
                .all(|p| p.cell.is_none() && p.scale.is_some())
        );
    }

    #[test]
    fn skips_are_counted_per_kind() {
        let mut skipped = Vec::new();
        record_skip(&mut skipped, 3, PieceKind::FakeWall);
        record_skip(&mut skipped, 3, PieceKind::FakeWall);
        record_skip(&mut skipped, 3, PieceKind::Exit);
        assert_eq!(
            skipped,
            vec![
                MazeDiagnostic {
                    generation: 3,
                    kind: PieceKind::FakeWall,
                    skipped: 2
                },
                MazeDiagnostic {
                    generation: 3,
                    kind: PieceKind::Exit,
                    skipped: 1
                },
            ]
        );
    }
}
