//! Space Invaders - A browser arcade shooter
//!
//! Core modules:
//! - `sim`: Pure simulation (state reducer, physics tick, collisions)
//! - `platform`: Input capture and clocks feeding the event queue
//! - `session`: Level flow, terminal signals and restarts
//! - `tuning`: Data-driven timing and difficulty knobs

pub mod platform;
pub mod session;
pub mod sim;
pub mod tuning;

pub use session::{Phase, Session, Signal};
pub use tuning::{Tuning, TuningError};

/// Game configuration constants
pub mod consts {
    /// Width (and height) of the square play field
    pub const CANVAS_SIZE: f32 = 600.0;
    /// Keyboard movement keeps the ship sprite this far from the right edge
    pub const SHIP_RIGHT_MARGIN: f32 = 45.0;
    /// Mouse x is shifted by this much so the cursor sits on the sprite center
    pub const MOUSE_RECENTER_OFFSET: f32 = 32.0;

    /// Ship defaults
    pub const SHIP_START_X: f32 = 270.0;
    pub const SHIP_START_Y: f32 = 540.0;
    pub const SHIP_RADIUS: f32 = 25.0;
    /// Enemies reaching this row end the game
    pub const SHIP_ROW: u32 = 11;
    /// Ship hitbox center relative to its sprite origin
    pub const SHIP_HITBOX_OFFSET: (f32, f32) = (28.0, 43.0);

    /// Bullet defaults
    pub const BULLET_RADIUS: f32 = 3.0;
    pub const BULLET_VELOCITY: f32 = 15.0;
    /// Player bullets live this many ticks
    pub const BULLET_LIFETIME: u64 = 39;
    /// Enemy bullets outlive player bullets by this many ticks
    pub const ENEMY_BULLET_EXTRA_LIFETIME: u64 = 140;
    /// Enemy bullets are this much slower than player bullets at level 0
    pub const ENEMY_BULLET_SLOWDOWN: f32 = 12.0;
    /// Muzzle offsets applied after stepping one radius forward
    pub const SHIP_MUZZLE_OFFSET: (f32, f32) = (26.0, 25.0);
    pub const ENEMY_MUZZLE_OFFSET: (f32, f32) = (10.0, 40.0);

    /// Enemy grid layout
    pub const ENEMY_RADIUS: f32 = 20.0;
    pub const GRID_COLUMNS: u32 = 5;
    pub const GRID_ORIGIN: (f32, f32) = (140.0, 20.0);
    pub const GRID_COLUMN_SPACING: f32 = 80.0;
    pub const GRID_ROW_SPACING: f32 = 50.0;
    /// Enemies at level 0, plus this many per level
    pub const START_ENEMY_COUNT: usize = 5;
    pub const ENEMIES_PER_LEVEL: usize = 2;

    /// Formation moves on ticks divisible by this
    pub const FORMATION_CADENCE: u64 = 100;
    /// Sideways formation step
    pub const FORMATION_SIDE_STEP: f32 = 30.0;
}

/// Natural log of `level + 1`, the shared difficulty curve
#[inline]
pub fn level_bonus(level: u32) -> f32 {
    (level as f32 + 1.0).ln()
}

/// Number of enemies spawned for a level
#[inline]
pub fn enemy_count_for_level(level: u32) -> usize {
    consts::START_ENEMY_COUNT + consts::ENEMIES_PER_LEVEL * level as usize
}
