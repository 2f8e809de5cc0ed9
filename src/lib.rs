//! Shard Beacon - shard collection, plate puzzle and beacon charge
//!
//! Core modules:
//! - `sim`: Progression state machine (shards, plates, beacon, decay, win)
//! - `clock`: Fixed-interval tick timer that drives decay
//! - `hud`: Status text and pixelation overlay projection
//! - `host`: Traits for the rendering, audio and status collaborators
//! - `scene`: Visual layout of the beacon, plates, portal and props
//! - `audio`: Sound cues and volume handling
//! - `session`: Wires the simulation to a host and owns the timer
//! - `settings`: Data-driven game rules and audio preferences

pub mod audio;
pub mod clock;
pub mod host;
pub mod hud;
pub mod scene;
pub mod session;
pub mod settings;
pub mod sim;

pub use session::Session;
pub use settings::{Rules, Settings, SettingsError};

use glam::Vec3;

/// Game configuration constants
pub mod consts {
    /// Shards needed to fully charge the beacon
    pub const SHARD_COUNT_GOAL: u32 = 9;
    /// Decay ticks before unbanked shards are wiped
    pub const DECAY_THRESHOLD: u32 = 5;
    /// Decay tick cadence (20 seconds)
    pub const TICK_INTERVAL_MS: u64 = 20_000;
    /// Number of plates in the puzzle sequence
    pub const PLATE_COUNT: usize = 3;

    /// Full charge percentage
    pub const MAX_CHARGE: f64 = 100.0;

    /// Overlay alpha gained per decay level
    pub const OVERLAY_ALPHA_STEP: f32 = 0.15;
    /// Overlay alpha ceiling (scene never goes fully black)
    pub const OVERLAY_ALPHA_MAX: f32 = 0.75;

    /// Ticks the timer may fire in a single advance before dropping the rest
    pub const MAX_CATCH_UP_TICKS: u32 = 8;
}

/// Shorthand for building positions in layout tables
#[inline]
pub const fn v3(x: f32, y: f32, z: f32) -> Vec3 {
    Vec3::new(x, y, z)
}

/// Shards placed at session start: airport, recoleta, dome (three each)
pub const INITIAL_SHARD_POSITIONS: [Vec3; 9] = [
    v3(3.0, 1.0, 5.0),
    v3(6.0, 1.0, 4.0),
    v3(10.0, 1.0, 6.0),
    v3(5.0, 1.0, 10.0),
    v3(8.0, 1.0, 11.0),
    v3(12.0, 1.0, 9.0),
    v3(4.0, 1.0, 14.0),
    v3(8.0, 1.0, 15.0),
    v3(12.0, 1.0, 14.0),
];

/// Puzzle reward shards, either side of the beacon
pub const REWARD_SHARD_POSITIONS: [Vec3; 2] = [v3(7.5, 1.0, 8.0), v3(8.5, 1.0, 8.0)];

/// Recoleta pressure plates, stepped left to right
pub const PLATE_POSITIONS: [Vec3; consts::PLATE_COUNT] =
    [v3(6.0, 0.0, 10.0), v3(8.0, 0.0, 10.0), v3(10.0, 0.0, 10.0)];
