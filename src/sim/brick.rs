//! Brick identity and lifecycle
//!
//! A brick walks `Forming -> Dropping -> Placed` exactly once. No phase is
//! skipped and `Placed` is terminal.

use std::fmt;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Composite key of a brick: row from the bottom, column from the left
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct BrickId {
    pub row: u32,
    pub index: u32,
}

impl BrickId {
    pub const fn new(row: u32, index: u32) -> Self {
        Self { row, index }
    }

    /// Column is inside the row
    #[inline]
    pub fn in_bounds(&self) -> bool {
        self.index < BRICKS_PER_ROW
    }

    /// Last column of its row (placing it completes the row)
    #[inline]
    pub fn is_row_end(&self) -> bool {
        self.index == BRICKS_PER_ROW - 1
    }
}

impl fmt::Display for BrickId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "brick-{}-{}", self.row, self.index)
    }
}

/// Visual phase of a brick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BrickState {
    /// Pixel-by-pixel reveal above the tower
    #[default]
    Forming,
    /// Falling into its slot
    Dropping,
    /// Resting in the tower
    Placed,
}

impl BrickState {
    /// The only phase this one may move to
    pub fn next(self) -> Option<BrickState> {
        match self {
            BrickState::Forming => Some(BrickState::Dropping),
            BrickState::Dropping => Some(BrickState::Placed),
            BrickState::Placed => None,
        }
    }

    pub fn can_transition_to(self, target: BrickState) -> bool {
        self.next() == Some(target)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            BrickState::Forming => "forming",
            BrickState::Dropping => "dropping",
            BrickState::Placed => "placed",
        }
    }
}

/// A brick entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Brick {
    pub id: BrickId,
    pub state: BrickState,
}

impl Brick {
    /// New bricks always start forming
    pub fn new(id: BrickId) -> Self {
        Self {
            id,
            state: BrickState::Forming,
        }
    }

    #[inline]
    pub fn is_placed(&self) -> bool {
        self.state == BrickState::Placed
    }

    /// Advance to `target` if it is the next phase. Returns true on change.
    pub fn transition(&mut self, target: BrickState) -> bool {
        if self.state.can_transition_to(target) {
            self.state = target;
            true
        } else {
            false
        }
    }
}

/// Formation time for a brick entering `Forming` at `speed_multiplier`.
///
/// The multiplier is sampled once when formation starts; a faster tower
/// forms bricks in less time.
pub fn formation_duration(speed_multiplier: f64) -> Duration {
    if !speed_multiplier.is_finite() || speed_multiplier <= 0.0 {
        return PIXEL_FORMATION;
    }
    PIXEL_FORMATION.div_f64(speed_multiplier)
}

/// Drop time never scales with speed
#[inline]
pub fn drop_duration() -> Duration {
    BRICK_DROP
}
