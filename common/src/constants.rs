// ============================================================================
// Grid
// ============================================================================

pub const MIN_GRID_DIM: usize = 11; // Smallest accepted row/col count (must be odd)
pub const DEFAULT_ROWS: usize = 15;
pub const DEFAULT_COLS: usize = 15;

// Carving always starts here; (1, 1) is the first room inside the border
pub const ENTRY_ROW: usize = 1;
pub const ENTRY_COL: usize = 1;

// ============================================================================
// Obstacles
// ============================================================================

pub const DEFAULT_FAKE_WALL_CHANCE: f64 = 0.15;
pub const DEFAULT_INVIS_WALL_CHANCE: f64 = 0.10;

// Tuning ranges the game was balanced for. Values outside still work.
pub const FAKE_WALL_CHANCE_RANGE: (f64, f64) = (0.05, 0.40);
pub const INVIS_WALL_CHANCE_RANGE: (f64, f64) = (0.05, 0.30);

// ============================================================================
// Perception Meter
// ============================================================================

pub const DEFAULT_MAX_METER: f32 = 3.0; // seconds of vision
pub const DEFAULT_DRAIN_RATE: f32 = 1.0; // per second while held
pub const DEFAULT_RECHARGE_RATE: f32 = 0.4; // per second while released
pub const DEFAULT_RECHARGE_THRESHOLD: f32 = 0.3; // fraction needed to leave lockout

// Tolerance for meter comparisons so accumulated f32 steps still hit 0 and the threshold
pub const METER_EPSILON: f32 = 1e-5;

// HUD bar turns red at or below this ratio
pub const METER_LOW_RATIO: f32 = 0.4;
pub const METER_BAR_WIDTH: usize = 10;

// ============================================================================
// Map Geometry
// ============================================================================

pub const FLOOR_Y: f32 = -1.0; // Floor sits below the walls
pub const ROOF_Y: f32 = 1.7; // Roof sits above the walls
pub const ACTOR_SPAWN_HEIGHT: f32 = 0.5; // Capsule centre above the floor

// ============================================================================
// Piece Tints (RGBA)
// ============================================================================

pub const SOLID_WALL_TINT: [f32; 4] = [0.55, 0.55, 0.55, 1.0];
pub const FAKE_WALL_TINT: [f32; 4] = [0.55, 0.55, 0.55, 1.0]; // Same grey as a solid wall
pub const FAKE_WALL_REVEALED_TINT: [f32; 4] = [1.0, 0.2, 0.2, 0.4]; // Translucent red
pub const INVIS_WALL_TINT: [f32; 4] = [0.2, 0.4, 1.0, 0.7]; // Blue, only drawn when revealed
pub const EXIT_TINT: [f32; 4] = [0.1, 0.9, 0.2, 1.0];
pub const FLOOR_TINT: [f32; 4] = [0.3, 0.3, 0.3, 1.0];
pub const ROOF_TINT: [f32; 4] = [0.2, 0.2, 0.2, 1.0];

// ============================================================================
// Run Loop
// ============================================================================

pub const DEFAULT_RESTART_DELAY: f32 = 1.5; // seconds between reaching the exit and regenerating
