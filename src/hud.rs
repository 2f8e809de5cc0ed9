//! Status display projection
//!
//! Stateless: every frame is computed from the current progress.

use crate::host::StatusSink;
use crate::settings::Rules;
use crate::sim::ProgressState;

/// One status display update
#[derive(Debug, Clone, PartialEq)]
pub struct HudFrame {
    pub text: String,
    /// Pixelation overlay opacity
    pub overlay_alpha: f32,
}

impl HudFrame {
    pub fn from_progress(progress: &ProgressState, rules: &Rules) -> Self {
        Self {
            text: status_text(progress.held, rules.shard_goal, progress.charge),
            overlay_alpha: overlay_alpha(progress.decay_level, rules),
        }
    }

    pub fn push<S: StatusSink + ?Sized>(&self, sink: &mut S) {
        sink.render(&self.text, self.overlay_alpha);
    }
}

/// Charge is floored for display only
pub fn status_text(held: u32, goal: u32, charge: f64) -> String {
    format!("Shards: {}/{}\nCharge: {}%", held, goal, charge.floor() as u32)
}

pub fn overlay_alpha(decay_level: u32, rules: &Rules) -> f32 {
    (decay_level as f32 * rules.overlay_alpha_step).min(rules.overlay_alpha_max)
}
