// Physics (world units are pixels, time unit is one frame)
pub const GRAVITY: f64 = 0.75;
pub const FLAP_VELOCITY: f64 = -12.0;
pub const PIPE_SPEED: f64 = 3.0;
pub const BIRD_RADIUS: f64 = 18.0;

// Bird placement on reset, as fractions of the world size
pub const BIRD_X_FRACTION: f64 = 0.2;
pub const BIRD_Y_FRACTION: f64 = 0.5;

// Pipes
pub const PIPE_WIDTH: f64 = 90.0;
pub const PIPE_INTERVAL_MS: u64 = 1600;
pub const INITIAL_SPAWN_DELAY_MS: u64 = 800;
pub const MIN_GAP: i64 = 130;
pub const MAX_GAP: i64 = 220;
pub const GAP_TOP_MARGIN: i64 = 80;
pub const GAP_BOTTOM_MARGIN: i64 = 200;
pub const PIPE_SPAWN_OFFSET: f64 = 40.0;
pub const PIPE_DESPAWN_MARGIN: f64 = 100.0;

// Bird sprite
pub const BIRD_SPRITE_SCALE: f64 = 2.2;
pub const TILT_PER_VELOCITY: f64 = 0.05;
pub const MAX_TILT_UP: f64 = -std::f64::consts::FRAC_PI_6;
pub const MAX_TILT_DOWN: f64 = std::f64::consts::FRAC_PI_4;

// Frame pacing
pub const DEFAULT_FRAMES_PER_SECOND: u32 = 60;

// Terminal cell to world pixel mapping
pub const CELL_WIDTH_PX: f64 = 8.0;
pub const CELL_HEIGHT_PX: f64 = 16.0;
