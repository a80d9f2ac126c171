// ============================================================================
// Grid Defaults
// ============================================================================

pub const DEFAULT_GRID_COLS: i32 = 10; // Number of grid columns (X axis)
pub const DEFAULT_GRID_ROWS: i32 = 10; // Number of grid rows (Y axis)

// ============================================================================
// Spawn Chances
// ============================================================================

pub const DEFAULT_COLLECTIBLE_SPAWN_CHANCE: f64 = 0.1;
pub const DEFAULT_DECORATION_SPAWN_CHANCE: f64 = 0.15;
pub const DEFAULT_BREAKABLE_WALL_CHANCE: f64 = 0.05;
pub const DEFAULT_ENEMY_PATH_SPAWN_CHANCE: f64 = 0.2;

// ============================================================================
// Patrol Paths
// ============================================================================

pub const MIN_PATH_CELLS: usize = 3; // Shortest accepted patrol path
pub const MIN_RUN_CELLS: usize = 2; // Shortest run of an L-shaped path (either leg)
pub const EARLY_STOP_CHANCE: f64 = 0.5; // Coin flip once a run is long enough

// ============================================================================
// Decorations
// ============================================================================

// How far from the wall a decoration anchor sits, in cell units
pub const DECORATION_WALL_INSET: f32 = 0.1;

pub const DEFAULT_STYLE_NAME: &str = "default";
