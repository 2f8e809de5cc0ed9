//! Progress state and the effects the simulation hands to the session
//!
//! The simulation never talks to the host directly. Handlers mutate state
//! and describe what changed as [`Effect`]s.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::consts::MAX_CHARGE;

/// Session-unique shard identifier (allocated from 1, never reused)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ShardId(pub u32);

/// A collectible shard still present in the scene
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Shard {
    pub id: ShardId,
    pub position: Vec3,
}

/// Audio feedback requested by a handler
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Cue {
    /// Shard picked up; plays from the shard
    Pickup(ShardId),
    /// Shards deposited; plays from the beacon
    Charge,
}

/// Outbound command produced by a handler
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Effect {
    /// A shard entered the scene
    ShardSpawned { id: ShardId, position: Vec3 },
    /// A shard left the scene (picked up)
    ShardRemoved(ShardId),
    /// A plate changed its armed color
    PlateLit { slot: usize, lit: bool },
    /// Play a sound cue
    Cue(Cue),
    /// Win reached, portal appears
    PortalOpened,
    /// Player entered the portal; status display moves
    HudRelocated,
    /// Status display must be redrawn from current state
    HudRefresh,
}

/// Authoritative progress counters for one play session
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProgressState {
    /// Shards collected but not yet deposited
    pub held: u32,
    /// Shards deposited into the beacon so far
    pub banked: u32,
    /// Beacon charge percentage (0-100)
    pub charge: f64,
    /// Decay ticks since the last wipe
    pub decay_level: u32,
    /// Terminal flag; never cleared once set
    pub won: bool,
}

impl ProgressState {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn is_won(&self) -> bool {
        self.won
    }

    pub fn is_fully_charged(&self) -> bool {
        self.charge >= MAX_CHARGE
    }
}
