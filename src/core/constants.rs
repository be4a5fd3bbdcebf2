// Tick and timing
pub const TICK_INTERVAL_MS: u64 = 16; // ~60 FPS, all speeds below are per tick
pub const INPUT_POLL_MS: u64 = 4;

// Playing field (logical units)
pub const FIELD_WIDTH: f64 = 800.0;
pub const FIELD_HEIGHT: f64 = 400.0;

// Player
pub const PLAYER_SIZE: f64 = 20.0;
pub const PLAYER_STEP: f64 = 5.0;
pub const PLAYER_START_X: f64 = 50.0;

// Walls
pub const WALL_SPEED: f64 = 3.0;
pub const WALL_WIDTH: f64 = 25.0;
pub const MIN_GAP: u32 = 120;
pub const MAX_GAP: u32 = 180;
pub const SPAWN_RATE: f64 = 0.01;
/// The newest wall must be this far onto the field before another pair spawns.
pub const MIN_WALL_SPACING: f64 = 300.0;
/// Keeps the bottom wall from being squeezed to nothing.
pub const WALL_HEIGHT_MARGIN: u32 = 20;

// Persistence
pub const CONFIG_FILE: &str = "config.json";
pub const LOG_FILE: &str = "wallrun.log";
