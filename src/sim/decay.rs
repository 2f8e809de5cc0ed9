//! Pixelation decay
//!
//! Every timer tick raises the decay level. Reaching the threshold wipes the
//! shards the player is holding. Banked charge is never touched.

use super::state::{Effect, ProgressState};
use crate::settings::Rules;

/// Advance decay by one tick. Returns the held shards lost to an overflow.
pub fn tick(progress: &mut ProgressState, rules: &Rules, out: &mut Vec<Effect>) -> u32 {
    if progress.won {
        return 0;
    }

    let mut lost = 0;
    progress.decay_level += 1;
    if progress.decay_level >= rules.decay_threshold {
        lost = progress.held;
        progress.held = 0;
        progress.decay_level = 0;
        log::info!("Pixelation overflow, {} held shards lost", lost);
    } else {
        log::debug!(
            "Pixelation level {}/{}",
            progress.decay_level,
            rules.decay_threshold
        );
    }
    out.push(Effect::HudRefresh);
    lost
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tick_raises_level() {
        let rules = Rules::default();
        let mut progress = ProgressState::new();
        let mut out = Vec::new();
        tick(&mut progress, &rules, &mut out);
        assert_eq!(progress.decay_level, 1);
        assert_eq!(out, vec![Effect::HudRefresh]);
    }

    #[test]
    fn test_threshold_wipes_held_only() {
        let rules = Rules::default();
        let mut progress = ProgressState {
            held: 2,
            banked: 3,
            charge: 100.0 / 3.0,
            ..Default::default()
        };
        let mut out = Vec::new();
        for _ in 0..4 {
            tick(&mut progress, &rules, &mut out);
        }
        assert_eq!(progress.held, 2);
        assert_eq!(progress.decay_level, 4);

        out.clear();
        assert_eq!(tick(&mut progress, &rules, &mut out), 2);
        assert_eq!(progress.held, 0);
        assert_eq!(progress.decay_level, 0);
        assert_eq!(progress.banked, 3);
        assert_eq!(progress.charge, 100.0 / 3.0);
        assert_eq!(out, vec![Effect::HudRefresh]);
    }

    #[test]
    fn test_threshold_of_one_wipes_every_tick() {
        let rules = Rules {
            decay_threshold: 1,
            ..Rules::default()
        };
        let mut progress = ProgressState {
            held: 5,
            ..Default::default()
        };
        let mut out = Vec::new();
        tick(&mut progress, &rules, &mut out);
        assert_eq!(progress.held, 0);
        assert_eq!(progress.decay_level, 0);
    }

    #[test]
    fn test_tick_after_win_ignored() {
        let rules = Rules::default();
        let mut progress = ProgressState {
            held: 1,
            decay_level: 3,
            charge: 100.0,
            won: true,
            ..Default::default()
        };
        let before = progress.clone();
        let mut out = Vec::new();
        assert_eq!(tick(&mut progress, &rules, &mut out), 0);
        assert_eq!(progress, before);
        assert!(out.is_empty());
    }
}
