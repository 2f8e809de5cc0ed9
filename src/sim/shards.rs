//! Collectible shards: spawning and pickup

use glam::Vec3;
use serde::{Deserialize, Serialize};

use super::state::{Cue, Effect, ProgressState, Shard, ShardId};

/// Live shards in the scene, kept sorted by id
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShardField {
    live: Vec<Shard>,
    next_id: u32,
}

impl Default for ShardField {
    fn default() -> Self {
        Self::new()
    }
}

impl ShardField {
    pub fn new() -> Self {
        Self {
            live: Vec::new(),
            next_id: 1,
        }
    }

    /// Place a new shard; positions need not be unique
    pub fn spawn(&mut self, position: Vec3, out: &mut Vec<Effect>) -> ShardId {
        let id = ShardId(self.next_id);
        self.next_id += 1;
        self.live.push(Shard { id, position });
        out.push(Effect::ShardSpawned { id, position });
        id
    }

    pub fn contains(&self, id: ShardId) -> bool {
        self.live.iter().any(|s| s.id == id)
    }

    pub fn get(&self, id: ShardId) -> Option<&Shard> {
        self.live.iter().find(|s| s.id == id)
    }

    pub fn len(&self) -> usize {
        self.live.len()
    }

    pub fn is_empty(&self) -> bool {
        self.live.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Shard> {
        self.live.iter()
    }

    /// Number of shards ever spawned
    pub fn spawned(&self) -> u32 {
        self.next_id - 1
    }

    fn take(&mut self, id: ShardId) -> Option<Shard> {
        let idx = self.live.iter().position(|s| s.id == id)?;
        Some(self.live.remove(idx))
    }
}

/// Collect a shard. Returns false when the pickup was ignored.
pub fn pickup(
    progress: &mut ProgressState,
    shards: &mut ShardField,
    id: ShardId,
    out: &mut Vec<Effect>,
) -> bool {
    if progress.won {
        log::debug!("Pickup of {:?} ignored: game already won", id);
        return false;
    }
    let Some(shard) = shards.take(id) else {
        log::debug!("Pickup of {:?} ignored: not in scene", id);
        return false;
    };

    progress.held += 1;
    out.push(Effect::Cue(Cue::Pickup(shard.id)));
    out.push(Effect::ShardRemoved(shard.id));
    out.push(Effect::HudRefresh);
    log::debug!("Picked up {:?}, holding {}", shard.id, progress.held);
    true
}
