//! Progression state machine
//!
//! All gameplay logic lives here. This module must stay pure:
//! - One event handled at a time through `&mut Game`
//! - No host, rendering or audio dependencies; handlers emit [`Effect`]s
//! - Stable iteration order (shards sorted by id)
//! - Once won, every handler is a no-op

pub mod beacon;
pub mod decay;
pub mod dispatch;
pub mod puzzle;
pub mod shards;
pub mod state;
pub mod win;

pub use dispatch::{Event, Game};
pub use puzzle::PlateSequence;
pub use shards::ShardField;
pub use state::{Cue, Effect, ProgressState, Shard, ShardId};
