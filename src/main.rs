//! Shard Beacon headless runner
//!
//! Plays a seeded autoplay session against a host that only logs, then
//! prints the final game state as JSON.
//!
//! Usage: `shard-beacon [--seed N] [--settings path.json] [--max-actions N]`

use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use glam::Vec3;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use shard_beacon::host::{AudioBackend, Color, Presentation, StatusSink, VisualHandle, VisualSpec};
use shard_beacon::session::Interaction;
use shard_beacon::{Session, Settings};

/// Host that logs every command it receives
#[derive(Default)]
struct LogHost {
    next_handle: u64,
}

impl Presentation for LogHost {
    fn create_visual(&mut self, spec: &VisualSpec) -> VisualHandle {
        self.next_handle += 1;
        log::trace!("create #{} {:?} at {}", self.next_handle, spec.kind, spec.position);
        VisualHandle(self.next_handle)
    }

    fn destroy_visual(&mut self, handle: VisualHandle) {
        log::trace!("destroy #{}", handle.0);
    }

    fn set_color(&mut self, handle: VisualHandle, color: Color) {
        log::debug!("color #{} -> {:?}", handle.0, color);
    }

    fn set_position(&mut self, handle: VisualHandle, position: Vec3) {
        log::info!("move #{} -> {}", handle.0, position);
    }

    fn enable_interaction(&mut self, handle: VisualHandle, hover_text: &str) {
        log::trace!("clickable #{} \"{}\"", handle.0, hover_text);
    }
}

impl AudioBackend for LogHost {
    fn play(&mut self, clip: &str, source: VisualHandle, looping: bool, volume: f32) {
        log::debug!(
            "play {} on #{} (loop: {}, vol: {:.2})",
            clip,
            source.0,
            looping,
            volume
        );
    }
}

impl StatusSink for LogHost {
    fn render(&mut self, text: &str, overlay_alpha: f32) {
        log::info!("[{}] overlay {:.2}", text.replace('\n', " | "), overlay_alpha);
    }
}

/// Headless Shard Beacon runner - seeded autoplay, final state as JSON
#[derive(Parser, Debug)]
#[command(name = "shard-beacon")]
#[command(about = "Play a seeded autoplay session and print the final state as JSON")]
struct Options {
    /// Random seed for deterministic autoplay
    #[arg(long, default_value_t = 0x5EED)]
    seed: u64,

    /// JSON settings file (defaults are used if it cannot be loaded)
    #[arg(long)]
    settings: Option<PathBuf>,

    /// Clicks to attempt before giving up
    #[arg(long, default_value_t = 500)]
    max_actions: u32,
}

/// Pick the next click. Deposits once a few shards are held, walks the
/// plates in order most of the time, otherwise grabs a random shard.
fn choose_click(session: &Session<LogHost>, rng: &mut Pcg32) -> Option<VisualHandle> {
    let game = session.game();
    if let Some(portal) = session.portal_visual() {
        return Some(portal);
    }
    if game.progress.held >= 3 && rng.random_bool(0.7) {
        return Some(session.beacon_visual());
    }
    if !game.plates.is_complete() && rng.random_bool(0.3) {
        // Mostly the right plate, sometimes a wrong one
        let slot = if rng.random_bool(0.8) {
            game.plates.current()
        } else {
            rng.random_range(0..game.plates.len())
        };
        return session.plate_visual(slot);
    }

    let mut shards: Vec<VisualHandle> = session
        .interactions()
        .filter(|(_, i)| matches!(i, Interaction::Shard(_)))
        .map(|(h, _)| h)
        .collect();
    shards.sort();
    if shards.is_empty() {
        return Some(session.beacon_visual());
    }
    Some(shards[rng.random_range(0..shards.len())])
}

fn main() {
    env_logger::init();
    log::info!("Shard Beacon (headless) starting...");

    let options = Options::parse();
    let settings = match &options.settings {
        Some(path) => Settings::load_or_default(path),
        None => Settings::default(),
    };

    let mut session = match Session::new(settings, LogHost::default()) {
        Ok(session) => session,
        Err(e) => {
            log::error!("Cannot start session: {}", e);
            std::process::exit(2);
        }
    };

    let mut rng = Pcg32::seed_from_u64(options.seed);
    log::info!("Autoplay seed: {}", options.seed);

    let mut entered_portal = false;
    for _ in 0..options.max_actions {
        // Players take a few seconds between clicks
        let walk = Duration::from_millis(rng.random_range(1_000..8_000));
        session.advance(walk);

        let Some(handle) = choose_click(&session, &mut rng) else {
            continue;
        };
        let was_won = session.is_won();
        session.interact(handle);
        if was_won {
            entered_portal = true;
            break;
        }
    }

    if !entered_portal {
        log::warn!("Autoplay stopped after {} actions without winning", options.max_actions);
    }

    match serde_json::to_string_pretty(session.game()) {
        Ok(json) => println!("{}", json),
        Err(e) => log::error!("Failed to serialize final state: {}", e),
    }
}
