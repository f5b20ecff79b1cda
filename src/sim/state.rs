//! Game store: the single owner of all mutable game state
//!
//! Every mutation goes through one of the commands below. Each command runs
//! to completion on `&mut self`, so callers never observe a half-applied
//! transition.

use std::collections::HashMap;

use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::brick::{Brick, BrickId, BrickState};
use super::combo::{self, RowCombo};
use crate::consts::*;
use crate::tabs::Tab;

/// Store commands, applied with [`GameState::apply`]
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Command {
    StartBuilding,
    StopBuilding,
    AddBrick(BrickId),
    UpdateBrickState(BrickId, BrickState),
    AdvanceToNextBrick,
    PanCameraUp,
    GenerateRowCombo(u32),
    SellTower,
    SetActiveTab(Tab),
    SetCurrentTower(u32),
}

/// Read-only view handed to the presentation layer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub current_tower_id: u32,
    pub gold: f64,
    /// Gold floored for display
    pub gold_display: u64,
    pub mana: u32,
    pub bricks: Vec<Brick>,
    pub row_combos: Vec<RowCombo>,
    pub tower_height: u32,
    pub total_rows_built: u32,
    pub total_bricks_placed: u32,
    pub cursor: BrickId,
    pub active_tab: Tab,
    pub is_building: bool,
    pub camera_offset: f32,
    pub speed_multiplier: f64,
    pub total_combo: f64,
    pub tower_value: u64,
    pub can_sell: bool,
}

/// Complete game state (deterministic for a given seed)
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    seed: u64,
    /// Row scoring randomness
    rng: Pcg32,
    current_tower_id: u32,
    /// Towers sold so far; scheduled work from an older tower is stale
    towers_sold: u64,
    gold: f64,
    mana: u32,
    /// Bricks in insertion order
    pub(crate) bricks: Vec<Brick>,
    brick_index: HashMap<BrickId, usize>,
    pub(crate) row_combos: Vec<RowCombo>,
    total_rows_built: u32,
    cursor: BrickId,
    is_building: bool,
    camera_offset: f32,
    total_bricks_placed: u32,
    pub(crate) speed_multiplier: f64,
    active_tab: Tab,
}

impl Default for GameState {
    fn default() -> Self {
        Self::new(0)
    }
}

impl GameState {
    /// Create a new game state with the given seed
    pub fn new(seed: u64) -> Self {
        Self::with_rng(seed, Pcg32::seed_from_u64(seed))
    }

    /// Create a game state scoring rows with an explicit random source
    pub fn with_rng(seed: u64, rng: Pcg32) -> Self {
        Self {
            seed,
            rng,
            current_tower_id: 1,
            towers_sold: 0,
            gold: 0.0,
            mana: 0,
            bricks: Vec::new(),
            brick_index: HashMap::new(),
            row_combos: Vec::new(),
            total_rows_built: 0,
            cursor: BrickId::new(0, 0),
            is_building: false,
            camera_offset: 0.0,
            total_bricks_placed: 0,
            speed_multiplier: 1.0,
            active_tab: Tab::Tower,
        }
    }

    /// Apply a command. Returns true if the state changed.
    pub fn apply(&mut self, command: Command) -> bool {
        match command {
            Command::StartBuilding => self.start_building(),
            Command::StopBuilding => self.stop_building(),
            Command::AddBrick(id) => self.add_brick(id),
            Command::UpdateBrickState(id, state) => self.update_brick_state(id, state),
            Command::AdvanceToNextBrick => {
                self.advance_to_next_brick();
                true
            }
            Command::PanCameraUp => {
                self.pan_camera_up();
                true
            }
            Command::GenerateRowCombo(row) => self.generate_row_combo(row).is_some(),
            Command::SellTower => {
                self.sell_tower();
                true
            }
            Command::SetActiveTab(tab) => self.set_active_tab(tab),
            Command::SetCurrentTower(id) => self.set_current_tower(id),
        }
    }

    // === Commands ===

    pub fn start_building(&mut self) -> bool {
        let changed = !self.is_building;
        self.is_building = true;
        changed
    }

    pub fn stop_building(&mut self) -> bool {
        let changed = self.is_building;
        self.is_building = false;
        changed
    }

    /// Add a brick in `Forming`. Duplicate or out-of-row ids are ignored.
    pub fn add_brick(&mut self, id: BrickId) -> bool {
        if !id.in_bounds() {
            log::debug!("Ignoring {}: column outside row", id);
            return false;
        }
        if self.brick_index.contains_key(&id) {
            log::debug!("Ignoring duplicate {}", id);
            return false;
        }
        self.brick_index.insert(id, self.bricks.len());
        self.bricks.push(Brick::new(id));
        log::trace!("{} forming", id);
        true
    }

    /// Move a brick to its next phase.
    ///
    /// Unknown ids and anything other than the next phase are ignored. A
    /// brick reaching `Placed` bumps the placed count and compounds the speed
    /// multiplier exactly once.
    pub fn update_brick_state(&mut self, id: BrickId, new_state: BrickState) -> bool {
        let Some(&slot) = self.brick_index.get(&id) else {
            log::debug!("Ignoring state change for unknown {}", id);
            return false;
        };
        let brick = &mut self.bricks[slot];
        if !brick.transition(new_state) {
            log::trace!(
                "{} already {}, ignoring {}",
                id,
                brick.state.as_str(),
                new_state.as_str()
            );
            return false;
        }
        log::trace!("{} {}", id, new_state.as_str());

        if new_state == BrickState::Placed {
            self.total_bricks_placed += 1;
            self.speed_multiplier *= SPEED_GROWTH;
            debug_assert_eq!(
                self.total_bricks_placed as usize,
                self.bricks.iter().filter(|b| b.is_placed()).count()
            );
        }
        true
    }

    /// Step the build cursor, wrapping to the next row at the row width
    pub fn advance_to_next_brick(&mut self) {
        let next = self.cursor.index + 1;
        if next >= BRICKS_PER_ROW {
            self.cursor = BrickId::new(self.cursor.row + 1, 0);
            self.total_rows_built += 1;
        } else {
            self.cursor.index = next;
        }
    }

    /// Scroll the tower down by one row
    pub fn pan_camera_up(&mut self) {
        self.camera_offset += ROW_HEIGHT;
    }

    /// Roll a combo for `row`. Returns the new multiplier, or `None` if the
    /// row already has one.
    pub fn generate_row_combo(&mut self, row: u32) -> Option<f64> {
        if self.row_combo(row).is_some() {
            log::debug!("Row {} already has a combo", row);
            return None;
        }
        let multiplier = combo::roll_multiplier(&mut self.rng);
        self.row_combos.push(RowCombo { row, multiplier });
        log::info!("Row {} complete: {:.1}x", row + 1, multiplier);
        Some(multiplier)
    }

    /// Sell the tower: add its value to gold and reset every per-tower field.
    /// Returns the full-precision value earned.
    pub fn sell_tower(&mut self) -> f64 {
        let value = self.tower_value();
        let rows = self.total_rows_built;
        let bricks = self.total_bricks_placed;

        self.gold += value;
        self.bricks.clear();
        self.brick_index.clear();
        self.row_combos.clear();
        self.total_rows_built = 0;
        self.cursor = BrickId::new(0, 0);
        self.camera_offset = 0.0;
        self.total_bricks_placed = 0;
        self.speed_multiplier = 1.0;
        self.towers_sold += 1;

        log::info!(
            "Sold tower ({} bricks, {} rows) for {} gold, total {}",
            bricks,
            rows,
            combo::display_value(value),
            self.gold_display()
        );
        value
    }

    pub fn set_active_tab(&mut self, tab: Tab) -> bool {
        let changed = self.active_tab != tab;
        self.active_tab = tab;
        changed
    }

    pub fn set_current_tower(&mut self, id: u32) -> bool {
        let changed = self.current_tower_id != id;
        self.current_tower_id = id;
        changed
    }

    // === Queries ===

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn current_tower_id(&self) -> u32 {
        self.current_tower_id
    }

    pub fn towers_sold(&self) -> u64 {
        self.towers_sold
    }

    pub fn gold(&self) -> f64 {
        self.gold
    }

    pub fn gold_display(&self) -> u64 {
        combo::display_value(self.gold)
    }

    pub fn mana(&self) -> u32 {
        self.mana
    }

    pub fn bricks(&self) -> &[Brick] {
        &self.bricks
    }

    pub fn brick(&self, id: BrickId) -> Option<&Brick> {
        self.brick_index.get(&id).map(|&i| &self.bricks[i])
    }

    pub fn row_combos(&self) -> &[RowCombo] {
        &self.row_combos
    }

    pub fn row_combo(&self, row: u32) -> Option<&RowCombo> {
        self.row_combos.iter().find(|c| c.row == row)
    }

    pub fn tower_height(&self) -> u32 {
        self.total_rows_built
    }

    pub fn total_rows_built(&self) -> u32 {
        self.total_rows_built
    }

    pub fn total_bricks_placed(&self) -> u32 {
        self.total_bricks_placed
    }

    pub fn cursor(&self) -> BrickId {
        self.cursor
    }

    pub fn active_tab(&self) -> Tab {
        self.active_tab
    }

    pub fn is_building(&self) -> bool {
        self.is_building
    }

    pub fn camera_offset(&self) -> f32 {
        self.camera_offset
    }

    pub fn speed_multiplier(&self) -> f64 {
        self.speed_multiplier
    }

    /// A row is complete when all of its bricks exist and are placed
    pub fn is_row_complete(&self, row: u32) -> bool {
        (0..BRICKS_PER_ROW).all(|i| self.brick(BrickId::new(row, i)).is_some_and(|b| b.is_placed()))
    }

    /// Combos whose row is fully placed (for completion indicators)
    pub fn completed_row_combos(&self) -> impl Iterator<Item = &RowCombo> {
        self.row_combos
            .iter()
            .filter(move |c| self.is_row_complete(c.row))
    }

    pub fn total_combo(&self) -> f64 {
        combo::total_combo(&self.row_combos)
    }

    /// Full-precision value the tower would sell for now
    pub fn tower_value(&self) -> f64 {
        combo::tower_value(self.total_bricks_placed, &self.row_combos)
    }

    pub fn tower_value_display(&self) -> u64 {
        combo::display_value(self.tower_value())
    }

    /// Selling is offered once the tower is worth at least one gold
    pub fn can_sell(&self) -> bool {
        self.tower_value_display() > 0
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            current_tower_id: self.current_tower_id,
            gold: self.gold,
            gold_display: self.gold_display(),
            mana: self.mana,
            bricks: self.bricks.clone(),
            row_combos: self.row_combos.clone(),
            tower_height: self.tower_height(),
            total_rows_built: self.total_rows_built,
            total_bricks_placed: self.total_bricks_placed,
            cursor: self.cursor,
            active_tab: self.active_tab,
            is_building: self.is_building,
            camera_offset: self.camera_offset,
            speed_multiplier: self.speed_multiplier,
            total_combo: self.total_combo(),
            tower_value: self.tower_value_display(),
            can_sell: self.can_sell(),
        }
    }
}
