//! Win transition and the portal it opens

use super::state::{Effect, ProgressState};

/// Enter the terminal state. Calling it again does nothing.
pub fn declare_win(progress: &mut ProgressState, out: &mut Vec<Effect>) {
    if progress.won {
        return;
    }
    progress.won = true;
    log::info!(
        "Beacon fully charged ({} shards banked), portal open",
        progress.banked
    );
    out.push(Effect::PortalOpened);
}

/// Walk into the portal. Presentation only; never touches progress.
pub fn enter_portal(progress: &ProgressState, out: &mut Vec<Effect>) {
    if !progress.won {
        log::debug!("Portal entry ignored: portal not open");
        return;
    }
    log::info!("Player entered the portal");
    out.push(Effect::HudRelocated);
}
