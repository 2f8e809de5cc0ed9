//! Pressure plate puzzle
//!
//! Plates must be stepped on in order 0, 1, .., N-1. Any deviation sends the
//! sequence back to plate 0. Completing it spawns the reward shards once;
//! after that the plates are inert.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use super::shards::ShardField;
use super::state::{Effect, ProgressState};

/// Ordered plate sequence state
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlateSequence {
    /// Next plate expected; equals the plate count once solved
    index: usize,
    /// Last color set on each plate (true = armed/green)
    lit: Vec<bool>,
}

impl PlateSequence {
    /// Fresh sequence with plate 0 armed
    pub fn new(len: usize) -> Self {
        Self {
            index: 0,
            lit: (0..len).map(|slot| slot == 0).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.lit.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lit.is_empty()
    }

    /// Next plate expected
    pub fn current(&self) -> usize {
        self.index
    }

    pub fn is_complete(&self) -> bool {
        self.index == self.len()
    }

    /// Whether a plate currently shows the armed color
    pub fn is_lit(&self, slot: usize) -> bool {
        self.lit.get(slot).copied().unwrap_or(false)
    }

    fn reset(&mut self, out: &mut Vec<Effect>) {
        self.index = 0;
        for (slot, lit) in self.lit.iter_mut().enumerate() {
            *lit = slot == 0;
            out.push(Effect::PlateLit { slot, lit: *lit });
        }
    }
}

/// Step on a plate. Returns true when this step solved the puzzle.
pub fn step(
    progress: &ProgressState,
    plates: &mut PlateSequence,
    shards: &mut ShardField,
    reward: &[Vec3],
    slot: usize,
    out: &mut Vec<Effect>,
) -> bool {
    if progress.won {
        log::debug!("Plate {} ignored: game already won", slot);
        return false;
    }
    if plates.is_complete() {
        log::debug!("Plate {} ignored: puzzle already solved", slot);
        return false;
    }

    if slot != plates.index {
        log::debug!(
            "Plate {} stepped out of order (expected {}), resetting",
            slot,
            plates.index
        );
        plates.reset(out);
        return false;
    }

    plates.index += 1;
    if plates.is_complete() {
        log::info!("Plate puzzle solved, spawning {} reward shards", reward.len());
        for &position in reward {
            shards.spawn(position, out);
        }
        return true;
    }

    let next = plates.index;
    plates.lit[next] = true;
    out.push(Effect::PlateLit {
        slot: next,
        lit: true,
    });
    false
}
