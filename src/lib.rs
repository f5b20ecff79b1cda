//! Brick Tower - An idle tower building game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (brick lifecycle, tower builder, row scoring, game store)
//! - `layout`: Tower geometry for whatever renders the tower
//! - `tabs`: Top-level UI tabs
//! - `settings`: Headless runner configuration

pub mod layout;
pub mod settings;
pub mod sim;
pub mod tabs;

pub use settings::Settings;
pub use sim::{Game, GameState, Snapshot};
pub use tabs::Tab;

/// Game configuration constants
pub mod consts {
    use std::time::Duration;

    /// Tower dimensions
    pub const BRICKS_PER_ROW: u32 = 13;
    /// Rows kept inside the viewport before the camera starts panning
    pub const VISIBLE_ROWS: u32 = 3;

    /// Brick geometry (layout units)
    pub const BRICK_WIDTH: f32 = 60.0;
    pub const BRICK_HEIGHT: f32 = 40.0;
    pub const BRICK_GAP: f32 = 4.0;
    /// Height of one row including its gap (camera pans by exactly this)
    pub const ROW_HEIGHT: f32 = BRICK_HEIGHT + BRICK_GAP;
    /// Bricks form this many rows above the visible bottom row
    pub const FORMATION_ROW_LEAD: u32 = 4;

    /// Animation timings (ms)
    pub const PIXEL_FORMATION_MS: u64 = 200;
    pub const BRICK_DROP_MS: u64 = 100;
    pub const CAMERA_PAN_MS: u64 = 300;
    pub const DELAY_BETWEEN_BRICKS_MS: u64 = 75;
    /// Extra wait on top of the pan before the first brick of a new row
    pub const PAN_SETTLE_MS: u64 = 100;
    /// Delay between a row wrap and the camera pan starting
    pub const PAN_TRIGGER_DELAY_MS: u64 = 200;

    pub const PIXEL_FORMATION: Duration = Duration::from_millis(PIXEL_FORMATION_MS);
    pub const BRICK_DROP: Duration = Duration::from_millis(BRICK_DROP_MS);
    pub const CAMERA_PAN: Duration = Duration::from_millis(CAMERA_PAN_MS);
    pub const DELAY_BETWEEN_BRICKS: Duration = Duration::from_millis(DELAY_BETWEEN_BRICKS_MS);
    pub const PAN_SETTLE: Duration = Duration::from_millis(PAN_SETTLE_MS);
    pub const PAN_TRIGGER_DELAY: Duration = Duration::from_millis(PAN_TRIGGER_DELAY_MS);

    /// Speed multiplier compounds by 2% per placed brick
    pub const SPEED_GROWTH: f64 = 1.02;

    /// Row combo multiplier range (inclusive)
    pub const COMBO_MIN: f64 = 1.2;
    pub const COMBO_MAX: f64 = 3.0;
    /// Base combo every tower starts with
    pub const BASE_COMBO: f64 = 1.0;
}

/// Round to one decimal place
#[inline]
pub fn round_tenth(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
