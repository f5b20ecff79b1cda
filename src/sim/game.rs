//! Game session
//!
//! Pairs the store with the builder that animates it. This is the surface a
//! frontend holds: it forwards commands, advances time once per frame and
//! renders from `snapshot()`.

use std::time::Duration;

use super::brick::{BrickId, BrickState};
use super::builder::{BuildOutcome, TowerBuilder};
use super::state::{Command, GameState, Snapshot};
use crate::tabs::Tab;

#[derive(Debug)]
pub struct Game {
    state: GameState,
    builder: TowerBuilder,
}

impl Game {
    /// New session with the tower screen mounted
    pub fn new(seed: u64) -> Self {
        Self::from_state(GameState::new(seed))
    }

    pub fn from_state(state: GameState) -> Self {
        let mut game = Self {
            builder: TowerBuilder::new(),
            state,
        };
        game.builder.reset(&game.state);
        game.mount();
        game
    }

    /// Tower screen shown: an idle, empty tower starts building on its own
    pub fn mount(&mut self) {
        if !self.state.is_building() && self.state.bricks().is_empty() {
            log::info!("Tower {} building", self.state.current_tower_id());
            self.state.start_building();
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn builder(&self) -> &TowerBuilder {
        &self.builder
    }

    pub fn now(&self) -> Duration {
        self.builder.now()
    }

    pub fn snapshot(&self) -> Snapshot {
        self.state.snapshot()
    }

    /// Advance simulated time by `dt`
    pub fn advance(&mut self, dt: Duration) -> Vec<BuildOutcome> {
        self.builder.advance(&mut self.state, dt)
    }

    /// Forward a command to the store, then let the builder react to it
    pub fn apply(&mut self, command: Command) -> bool {
        let changed = self.state.apply(command);
        self.builder.pump(&self.state);
        changed
    }

    pub fn start_building(&mut self) -> bool {
        self.apply(Command::StartBuilding)
    }

    pub fn stop_building(&mut self) -> bool {
        self.apply(Command::StopBuilding)
    }

    pub fn add_brick(&mut self, id: BrickId) -> bool {
        self.apply(Command::AddBrick(id))
    }

    pub fn update_brick_state(&mut self, id: BrickId, state: BrickState) -> bool {
        self.apply(Command::UpdateBrickState(id, state))
    }

    pub fn advance_to_next_brick(&mut self) {
        self.apply(Command::AdvanceToNextBrick);
    }

    pub fn pan_camera_up(&mut self) {
        self.apply(Command::PanCameraUp);
    }

    pub fn generate_row_combo(&mut self, row: u32) -> bool {
        self.apply(Command::GenerateRowCombo(row))
    }

    /// Sell the tower and cancel everything still animating it
    pub fn sell_tower(&mut self) -> f64 {
        let value = self.state.sell_tower();
        self.builder.reset(&self.state);
        self.builder.pump(&self.state);
        value
    }

    pub fn set_active_tab(&mut self, tab: Tab) -> bool {
        self.apply(Command::SetActiveTab(tab))
    }

    pub fn set_current_tower(&mut self, id: u32) -> bool {
        self.apply(Command::SetCurrentTower(id))
    }
}
