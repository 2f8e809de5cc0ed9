//! Beacon deposits
//!
//! Each deposit banks every held shard. Charge is derived from the banked
//! total so repeated partial deposits land exactly on 100%.

use super::state::{Cue, Effect, ProgressState};
use super::win::declare_win;
use crate::consts::MAX_CHARGE;
use crate::settings::Rules;

/// Deposit held shards. Returns the number of shards banked (0 if ignored).
pub fn deposit(progress: &mut ProgressState, rules: &Rules, out: &mut Vec<Effect>) -> u32 {
    if progress.won {
        log::debug!("Deposit ignored: game already won");
        return 0;
    }
    if progress.held == 0 {
        log::debug!("Deposit ignored: no shards held");
        return 0;
    }

    out.push(Effect::Cue(Cue::Charge));

    let deposited = progress.held;
    progress.banked = progress.banked.saturating_add(deposited);
    // From the banked total, not charge += held * (100 / goal): the running
    // sum stops at 99.999.. after 3+3+3 and never wins
    let charge = f64::from(progress.banked) * MAX_CHARGE / f64::from(rules.shard_goal);
    // Never decreases, never exceeds full charge
    progress.charge = charge.min(MAX_CHARGE).max(progress.charge);
    progress.held = 0;
    log::debug!(
        "Deposited {} shards, charge now {:.1}%",
        deposited,
        progress.charge
    );

    if progress.is_fully_charged() {
        declare_win(progress, out);
    }
    out.push(Effect::HudRefresh);
    deposited
}
