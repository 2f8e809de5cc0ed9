//! Event dispatch
//!
//! Every interaction and timer tick arrives as one [`Event`]. Handlers run to
//! completion one at a time through `&mut Game`, so no two can interleave.

use serde::{Deserialize, Serialize};

use super::puzzle::PlateSequence;
use super::shards::ShardField;
use super::state::{Effect, ProgressState, ShardId};
use super::{beacon, decay, puzzle, shards, win};
use crate::settings::Rules;

/// Inbound gameplay event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Event {
    /// Shard clicked
    Pickup(ShardId),
    /// Plate stepped on (slot index)
    Step(usize),
    /// Beacon clicked
    Deposit,
    /// Decay timer fired
    Tick,
    /// Portal clicked
    EnterPortal,
}

/// Complete simulation state for one session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Game {
    pub rules: Rules,
    pub progress: ProgressState,
    pub shards: ShardField,
    pub plates: PlateSequence,
}

impl Game {
    /// Fresh session with the initial shards already placed
    pub fn new(rules: Rules) -> Self {
        let mut shards = ShardField::new();
        let mut spawned = Vec::with_capacity(rules.initial_shards.len());
        for &position in &rules.initial_shards {
            shards.spawn(position, &mut spawned);
        }
        let plates = PlateSequence::new(rules.plate_count());

        Self {
            rules,
            progress: ProgressState::new(),
            shards,
            plates,
        }
    }

    pub fn is_won(&self) -> bool {
        self.progress.won
    }

    /// Route one event to its handler and collect the resulting effects
    pub fn dispatch(&mut self, event: Event) -> Vec<Effect> {
        let mut out = Vec::new();
        match event {
            Event::Pickup(id) => {
                shards::pickup(&mut self.progress, &mut self.shards, id, &mut out);
            }
            Event::Step(slot) => {
                puzzle::step(
                    &self.progress,
                    &mut self.plates,
                    &mut self.shards,
                    &self.rules.reward_shards,
                    slot,
                    &mut out,
                );
            }
            Event::Deposit => {
                beacon::deposit(&mut self.progress, &self.rules, &mut out);
            }
            Event::Tick => {
                decay::tick(&mut self.progress, &self.rules, &mut out);
            }
            Event::EnterPortal => win::enter_portal(&self.progress, &mut out),
        }
        out
    }
}
