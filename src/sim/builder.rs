//! Tower builder
//!
//! Drives brick creation, phase timing, row scoring and camera pans through
//! scheduled events. The builder never owns game data: it reads the store,
//! issues store commands, and keeps only its own bookkeeping (pending timers,
//! which row transitions already panned).
//!
//! Every brick that isn't placed gets animated, whoever added it. A brick
//! placed at the cursor moves the cursor on, however it got placed.

use std::collections::HashMap;
use std::time::Duration;

use super::brick::{self, BrickId, BrickState};
use super::scheduler::{Scheduler, TimerHandle};
use super::state::GameState;
use crate::consts::*;

/// Scheduled continuation. `tower` is the epoch it was scheduled in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuildEvent {
    CreateBrick { id: BrickId, tower: u64 },
    FormationComplete { id: BrickId, tower: u64 },
    DropComplete { id: BrickId, tower: u64 },
    PanCamera { row: u32, tower: u64 },
}

impl BuildEvent {
    fn tower(&self) -> u64 {
        match *self {
            BuildEvent::CreateBrick { tower, .. }
            | BuildEvent::FormationComplete { tower, .. }
            | BuildEvent::DropComplete { tower, .. }
            | BuildEvent::PanCamera { tower, .. } => tower,
        }
    }
}

/// What happened while delivering one event
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BuildOutcome {
    BrickCreated(BrickId),
    BrickDropping(BrickId),
    BrickPlaced(BrickId),
    RowCompleted { row: u32, multiplier: f64 },
    CameraPanned { row: u32 },
}

#[derive(Debug)]
pub struct TowerBuilder {
    scheduler: Scheduler<BuildEvent>,
    /// Tower epoch the bookkeeping below belongs to
    tower: u64,
    pending_create: Option<(BrickId, TimerHandle)>,
    /// Phase timer running for each unplaced brick
    animating: HashMap<BrickId, (BrickState, TimerHandle)>,
    /// Highest finished row a pan has been scheduled for
    last_panned_row: Option<u32>,
    pans_triggered: u32,
}

impl Default for TowerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl TowerBuilder {
    pub fn new() -> Self {
        Self {
            scheduler: Scheduler::new(),
            tower: 0,
            pending_create: None,
            animating: HashMap::new(),
            last_panned_row: None,
            pans_triggered: 0,
        }
    }

    /// Current simulated time
    pub fn now(&self) -> Duration {
        self.scheduler.now()
    }

    /// Live scheduled events
    pub fn pending(&self) -> usize {
        self.scheduler.pending()
    }

    /// Camera pans scheduled for the current tower
    pub fn pans_triggered(&self) -> u32 {
        self.pans_triggered
    }

    /// Drop every in-flight continuation and forget per-tower bookkeeping
    pub fn reset(&mut self, state: &GameState) {
        if !self.scheduler.is_idle() {
            log::debug!("Cancelling {} pending build events", self.scheduler.pending());
        }
        self.scheduler.clear();
        self.tower = state.towers_sold();
        self.pending_create = None;
        self.animating.clear();
        self.last_panned_row = None;
        self.pans_triggered = 0;
    }

    /// Run the simulation forward by `dt`, delivering due events in order
    pub fn advance(&mut self, state: &mut GameState, dt: Duration) -> Vec<BuildOutcome> {
        let until = self.scheduler.now() + dt;
        let mut outcomes = Vec::new();

        self.settle(state, &mut outcomes);
        self.pump(state);
        while let Some(event) = self.scheduler.pop_due(until) {
            self.handle(state, event, &mut outcomes);
            self.settle(state, &mut outcomes);
            self.pump(state);
        }
        self.scheduler.advance_to(until);
        outcomes
    }

    /// Re-evaluate what should be scheduled given the current state
    pub fn pump(&mut self, state: &GameState) {
        if state.towers_sold() != self.tower {
            self.reset(state);
        }
        self.animate_bricks(state);
        self.schedule_next_brick(state);
        self.schedule_pan(state);
    }

    /// Keep exactly one phase timer per unplaced brick, matching its phase
    fn animate_bricks(&mut self, state: &GameState) {
        self.animating.retain(|id, (phase, handle)| {
            let current = state.brick(*id).map(|b| b.state);
            if current == Some(*phase) {
                true
            } else {
                self.scheduler.cancel(*handle);
                false
            }
        });

        let tower = self.tower;
        for b in state.bricks().iter().filter(|b| !b.is_placed()) {
            if self.animating.contains_key(&b.id) {
                continue;
            }
            let id = b.id;
            let handle = match b.state {
                // Speed is sampled once, as the brick starts forming
                BrickState::Forming => self.scheduler.schedule(
                    brick::formation_duration(state.speed_multiplier()),
                    BuildEvent::FormationComplete { id, tower },
                ),
                BrickState::Dropping => self
                    .scheduler
                    .schedule(brick::drop_duration(), BuildEvent::DropComplete { id, tower }),
                BrickState::Placed => continue,
            };
            self.animating.insert(id, (b.state, handle));
        }
    }

    /// Step the cursor past placed bricks, scoring each finished row
    fn settle(&mut self, state: &mut GameState, outcomes: &mut Vec<BuildOutcome>) {
        loop {
            let cursor = state.cursor();
            if !state.brick(cursor).is_some_and(|b| b.is_placed()) {
                return;
            }
            if cursor.is_row_end() {
                if let Some(multiplier) = state.generate_row_combo(cursor.row) {
                    outcomes.push(BuildOutcome::RowCompleted {
                        row: cursor.row,
                        multiplier,
                    });
                }
            }
            state.advance_to_next_brick();
        }
    }

    fn schedule_next_brick(&mut self, state: &GameState) {
        let cursor = state.cursor();

        if !state.is_building() {
            if let Some((id, handle)) = self.pending_create.take() {
                log::trace!("Build stopped, cancelling {}", id);
                self.scheduler.cancel(handle);
            }
            return;
        }

        if state.brick(cursor).is_some() {
            return;
        }
        match self.pending_create {
            Some((id, _)) if id == cursor => return,
            Some((_, handle)) => self.scheduler.cancel(handle),
            None => {}
        }

        let delay = if self.waiting_for_pan(state) {
            CAMERA_PAN + PAN_SETTLE
        } else {
            DELAY_BETWEEN_BRICKS
        };
        let handle = self.scheduler.schedule(
            delay,
            BuildEvent::CreateBrick {
                id: cursor,
                tower: self.tower,
            },
        );
        self.pending_create = Some((cursor, handle));
    }

    /// First brick of a row that follows a pan-triggering row completion
    fn waiting_for_pan(&self, state: &GameState) -> bool {
        let cursor = state.cursor();
        cursor.index == 0
            && cursor.row > 0
            && state.total_rows_built() >= VISIBLE_ROWS
            && state.is_row_complete(cursor.row - 1)
    }

    fn schedule_pan(&mut self, state: &GameState) {
        if !self.waiting_for_pan(state) {
            return;
        }
        let finished = state.cursor().row - 1;
        if self.last_panned_row.is_some_and(|r| r >= finished) {
            return;
        }
        self.last_panned_row = Some(finished);
        self.pans_triggered += 1;
        self.scheduler.schedule(
            PAN_TRIGGER_DELAY,
            BuildEvent::PanCamera {
                row: finished,
                tower: self.tower,
            },
        );
    }

    /// Forget the timer for `id` if it was the one for `phase`
    fn finish_phase(&mut self, id: BrickId, phase: BrickState) {
        if self.animating.get(&id).is_some_and(|(p, _)| *p == phase) {
            self.animating.remove(&id);
        }
    }

    fn handle(
        &mut self,
        state: &mut GameState,
        event: BuildEvent,
        outcomes: &mut Vec<BuildOutcome>,
    ) {
        if event.tower() != state.towers_sold() {
            log::debug!("Dropping stale {:?}", event);
            return;
        }

        match event {
            BuildEvent::CreateBrick { id, .. } => {
                if self.pending_create.is_some_and(|(pending, _)| pending == id) {
                    self.pending_create = None;
                }
                if state.is_building() && state.add_brick(id) {
                    outcomes.push(BuildOutcome::BrickCreated(id));
                }
            }
            BuildEvent::FormationComplete { id, .. } => {
                self.finish_phase(id, BrickState::Forming);
                if state.update_brick_state(id, BrickState::Dropping) {
                    outcomes.push(BuildOutcome::BrickDropping(id));
                }
            }
            BuildEvent::DropComplete { id, .. } => {
                self.finish_phase(id, BrickState::Dropping);
                if state.update_brick_state(id, BrickState::Placed) {
                    outcomes.push(BuildOutcome::BrickPlaced(id));
                }
            }
            BuildEvent::PanCamera { row, .. } => {
                state.pan_camera_up();
                log::debug!("Camera panned past row {} (offset {})", row, state.camera_offset());
                outcomes.push(BuildOutcome::CameraPanned { row });
            }
        }
    }
}
