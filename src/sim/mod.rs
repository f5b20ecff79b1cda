//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Simulated time only (no wall clock)
//! - Seeded RNG only
//! - Stable iteration order (bricks by insertion)
//! - No rendering or platform dependencies

pub mod brick;
pub mod builder;
pub mod combo;
pub mod game;
pub mod scheduler;
pub mod state;

pub use brick::{Brick, BrickId, BrickState, drop_duration, formation_duration};
pub use builder::{BuildEvent, BuildOutcome, TowerBuilder};
pub use combo::{RowCombo, roll_multiplier, total_combo, tower_value};
pub use game::Game;
pub use scheduler::{Scheduler, TimerHandle};
pub use state::{Command, GameState, Snapshot};
