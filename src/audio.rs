//! Audio cues
//!
//! Maps gameplay sounds to clip assets and applies volume settings before
//! handing them to the host's audio backend.

use crate::host::VisualHandle;
use crate::settings::AudioSettings;
use crate::sim::Cue;

pub const PICKUP_CLIP: &str = "assets/audio/ding.ogg";
pub const CHARGE_CLIP: &str = "assets/audio/charge.ogg";
pub const AMBIENT_CLIP: &str = "assets/audio/cursed_tango_loop.ogg";

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEffect {
    /// Shard collected
    Pickup,
    /// Shards deposited into the beacon
    Charge,
    /// Background tango, loops for the whole session
    AmbientLoop,
}

impl SoundEffect {
    pub fn clip(&self) -> &'static str {
        match self {
            SoundEffect::Pickup => PICKUP_CLIP,
            SoundEffect::Charge => CHARGE_CLIP,
            SoundEffect::AmbientLoop => AMBIENT_CLIP,
        }
    }

    pub fn looping(&self) -> bool {
        matches!(self, SoundEffect::AmbientLoop)
    }

    /// Music follows the music volume, everything else the sfx volume
    pub fn is_music(&self) -> bool {
        matches!(self, SoundEffect::AmbientLoop)
    }
}

impl From<Cue> for SoundEffect {
    fn from(cue: Cue) -> Self {
        match cue {
            Cue::Pickup(_) => SoundEffect::Pickup,
            Cue::Charge => SoundEffect::Charge,
        }
    }
}

/// Audio service provided by the host. Fire-and-forget.
pub trait AudioBackend {
    /// Play `clip` attached to the `source` visual
    fn play(&mut self, clip: &str, source: VisualHandle, looping: bool, volume: f32);
}

/// Audio manager for the game
#[derive(Debug, Clone)]
pub struct AudioManager {
    master_volume: f32,
    sfx_volume: f32,
    music_volume: f32,
    muted: bool,
}

impl Default for AudioManager {
    fn default() -> Self {
        Self::new(&AudioSettings::default())
    }
}

impl AudioManager {
    pub fn new(settings: &AudioSettings) -> Self {
        Self {
            master_volume: settings.master_volume.clamp(0.0, 1.0),
            sfx_volume: settings.sfx_volume.clamp(0.0, 1.0),
            music_volume: settings.music_volume.clamp(0.0, 1.0),
            muted: settings.muted,
        }
    }

    /// Set master volume (0.0 - 1.0)
    pub fn set_master_volume(&mut self, vol: f32) {
        self.master_volume = vol.clamp(0.0, 1.0);
    }

    /// Set SFX volume (0.0 - 1.0)
    pub fn set_sfx_volume(&mut self, vol: f32) {
        self.sfx_volume = vol.clamp(0.0, 1.0);
    }

    /// Set music volume (0.0 - 1.0)
    pub fn set_music_volume(&mut self, vol: f32) {
        self.music_volume = vol.clamp(0.0, 1.0);
    }

    /// Mute/unmute all audio
    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }

    /// Get effective volume
    pub fn effective_volume(&self, effect: SoundEffect) -> f32 {
        if self.muted {
            return 0.0;
        }
        let channel = if effect.is_music() {
            self.music_volume
        } else {
            self.sfx_volume
        };
        self.master_volume * channel
    }

    /// Play a sound effect from a visual
    pub fn play<B: AudioBackend + ?Sized>(
        &self,
        backend: &mut B,
        effect: SoundEffect,
        source: VisualHandle,
    ) {
        let vol = self.effective_volume(effect);
        if vol <= 0.0 {
            return;
        }
        backend.play(effect.clip(), source, effect.looping(), vol);
    }
}
