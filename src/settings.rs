//! Game rules and preferences
//!
//! Defaults are compiled in from [`crate::consts`]. A JSON file may override
//! any subset of fields; missing fields keep their defaults.

use std::path::Path;
use std::time::Duration;

use glam::Vec3;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;
use crate::scene::SceneLayout;
use crate::{INITIAL_SHARD_POSITIONS, PLATE_POSITIONS, REWARD_SHARD_POSITIONS};

/// Errors raised while loading or validating settings
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to read settings file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse settings: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid setting `{field}`: {reason}")]
    Invalid { field: &'static str, reason: String },
}

impl SettingsError {
    fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        SettingsError::Invalid {
            field,
            reason: reason.into(),
        }
    }
}

/// Gameplay rules consumed by the simulation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Rules {
    /// Shards needed for a full charge
    pub shard_goal: u32,
    /// Decay ticks before held shards are wiped
    pub decay_threshold: u32,
    /// Decay tick cadence in milliseconds
    pub tick_interval_ms: u64,
    /// Shards spawned at session start
    pub initial_shards: Vec<Vec3>,
    /// Shards spawned when the plate puzzle is solved
    pub reward_shards: Vec<Vec3>,
    /// Plate positions; the puzzle length is the number of plates
    pub plates: Vec<Vec3>,
    /// Overlay alpha per decay level
    pub overlay_alpha_step: f32,
    /// Overlay alpha ceiling
    pub overlay_alpha_max: f32,
}

impl Default for Rules {
    fn default() -> Self {
        Self {
            shard_goal: SHARD_COUNT_GOAL,
            decay_threshold: DECAY_THRESHOLD,
            tick_interval_ms: TICK_INTERVAL_MS,
            initial_shards: INITIAL_SHARD_POSITIONS.to_vec(),
            reward_shards: REWARD_SHARD_POSITIONS.to_vec(),
            plates: PLATE_POSITIONS.to_vec(),
            overlay_alpha_step: OVERLAY_ALPHA_STEP,
            overlay_alpha_max: OVERLAY_ALPHA_MAX,
        }
    }
}

impl Rules {
    /// Number of plates in the puzzle sequence
    pub fn plate_count(&self) -> usize {
        self.plates.len()
    }

    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }

    /// Reject rule sets the simulation cannot run with
    pub fn validate(&self) -> Result<(), SettingsError> {
        if self.shard_goal == 0 {
            return Err(SettingsError::invalid("shard_goal", "must be at least 1"));
        }
        if self.decay_threshold == 0 {
            return Err(SettingsError::invalid(
                "decay_threshold",
                "must be at least 1",
            ));
        }
        if self.tick_interval_ms == 0 {
            return Err(SettingsError::invalid(
                "tick_interval_ms",
                "must be greater than zero",
            ));
        }
        if self.plates.is_empty() {
            return Err(SettingsError::invalid("plates", "need at least one plate"));
        }
        check_unit("overlay_alpha_step", self.overlay_alpha_step)?;
        check_unit("overlay_alpha_max", self.overlay_alpha_max)?;
        Ok(())
    }
}

/// Audio preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AudioSettings {
    /// Master volume (0.0 - 1.0)
    pub master_volume: f32,
    /// Sound effects volume (0.0 - 1.0)
    pub sfx_volume: f32,
    /// Ambient music volume (0.0 - 1.0)
    pub music_volume: f32,
    /// Silence everything
    pub muted: bool,
}

impl Default for AudioSettings {
    fn default() -> Self {
        Self {
            master_volume: 0.8,
            sfx_volume: 1.0,
            music_volume: 0.7,
            muted: false,
        }
    }
}

impl AudioSettings {
    pub fn validate(&self) -> Result<(), SettingsError> {
        check_unit("master_volume", self.master_volume)?;
        check_unit("sfx_volume", self.sfx_volume)?;
        check_unit("music_volume", self.music_volume)?;
        Ok(())
    }
}

/// Everything a session needs besides the host
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub rules: Rules,
    pub audio: AudioSettings,
    pub scene: SceneLayout,
}

impl Settings {
    /// Parse and validate settings from JSON
    pub fn from_json_str(json: &str) -> Result<Self, SettingsError> {
        let settings: Settings = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Read settings from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let json = std::fs::read_to_string(path.as_ref())?;
        let settings = Self::from_json_str(&json)?;
        log::info!("Loaded settings from {}", path.as_ref().display());
        Ok(settings)
    }

    /// Read settings from a JSON file, falling back to defaults on any error
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        match Self::load(path.as_ref()) {
            Ok(settings) => settings,
            Err(e) => {
                log::warn!(
                    "Using default settings ({}: {})",
                    path.as_ref().display(),
                    e
                );
                Self::default()
            }
        }
    }

    pub fn validate(&self) -> Result<(), SettingsError> {
        self.rules.validate()?;
        self.audio.validate()
    }
}

fn check_unit(field: &'static str, value: f32) -> Result<(), SettingsError> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(SettingsError::invalid(
            field,
            format!("{value} is outside 0.0..=1.0"),
        ))
    }
}
