//! Play session
//!
//! Owns the simulation, the decay timer and every visual it asked the host
//! to create. Host clicks come in through [`Session::interact`], elapsed time
//! through [`Session::advance`]. Both take `&mut self`, so events are handled
//! strictly one at a time. Dropping the session stops the timer and removes
//! its visuals.

use std::collections::HashMap;
use std::time::Duration;

use crate::audio::{AudioManager, SoundEffect};
use crate::clock::TickTimer;
use crate::host::{Host, VisualHandle};
use crate::hud::HudFrame;
use crate::scene::{self, SceneLayout};
use crate::settings::{Settings, SettingsError};
use crate::sim::{Cue, Effect, Event, Game, ShardId};

/// What clicking a visual means
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Interaction {
    Shard(ShardId),
    Plate(usize),
    Beacon,
    Portal,
}

impl Interaction {
    pub fn event(self) -> Event {
        match self {
            Interaction::Shard(id) => Event::Pickup(id),
            Interaction::Plate(slot) => Event::Step(slot),
            Interaction::Beacon => Event::Deposit,
            Interaction::Portal => Event::EnterPortal,
        }
    }
}

/// A running play session bound to a host
pub struct Session<H: Host> {
    host: H,
    game: Game,
    layout: SceneLayout,
    audio: AudioManager,
    timer: TickTimer,
    interactions: HashMap<VisualHandle, Interaction>,
    shard_visuals: HashMap<ShardId, VisualHandle>,
    plate_visuals: Vec<VisualHandle>,
    beacon: VisualHandle,
    hud: VisualHandle,
    overlay: VisualHandle,
    ambient: VisualHandle,
    portal: Option<VisualHandle>,
    props: Vec<VisualHandle>,
    ended: bool,
}

impl<H: Host> Session<H> {
    /// Build the scene on the host and start the decay timer
    pub fn new(settings: Settings, mut host: H) -> Result<Self, SettingsError> {
        settings.validate()?;
        let Settings {
            rules,
            audio,
            scene: layout,
        } = settings;

        let audio = AudioManager::new(&audio);
        let timer = TickTimer::every(rules.tick_interval());
        let game = Game::new(rules);

        let ambient = host.create_visual(&layout.ambient_source());
        audio.play(&mut host, SoundEffect::AmbientLoop, ambient);

        let frame = HudFrame::from_progress(&game.progress, &game.rules);
        let hud = host.create_visual(&layout.hud(&frame.text));
        let overlay = host.create_visual(&layout.overlay());

        let beacon = host.create_visual(&layout.beacon());
        host.enable_interaction(beacon, scene::BEACON_HOVER);

        let mut interactions = HashMap::new();
        interactions.insert(beacon, Interaction::Beacon);

        let mut shard_visuals = HashMap::new();
        for shard in game.shards.iter() {
            let handle = host.create_visual(&layout.shard(shard.position));
            host.enable_interaction(handle, scene::SHARD_HOVER);
            interactions.insert(handle, Interaction::Shard(shard.id));
            shard_visuals.insert(shard.id, handle);
        }

        let mut plate_visuals = Vec::with_capacity(game.plates.len());
        for (slot, &position) in game.rules.plates.iter().enumerate() {
            let handle = host.create_visual(&layout.plate(position, game.plates.is_lit(slot)));
            host.enable_interaction(handle, scene::PLATE_HOVER);
            interactions.insert(handle, Interaction::Plate(slot));
            plate_visuals.push(handle);
        }

        let props = layout
            .props
            .iter()
            .map(|spec| host.create_visual(spec))
            .collect();

        frame.push(&mut host);

        log::info!(
            "Session started: {} shards, {} plates, goal {}, decay every {:?}",
            game.shards.len(),
            game.plates.len(),
            game.rules.shard_goal,
            timer.interval()
        );

        Ok(Self {
            host,
            game,
            layout,
            audio,
            timer,
            interactions,
            shard_visuals,
            plate_visuals,
            beacon,
            hud,
            overlay,
            ambient,
            portal: None,
            props,
            ended: false,
        })
    }

    pub fn game(&self) -> &Game {
        &self.game
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    pub fn timer(&self) -> &TickTimer {
        &self.timer
    }

    pub fn is_won(&self) -> bool {
        self.game.is_won()
    }

    pub fn is_ended(&self) -> bool {
        self.ended
    }

    pub fn shard_visual(&self, id: ShardId) -> Option<VisualHandle> {
        self.shard_visuals.get(&id).copied()
    }

    pub fn plate_visual(&self, slot: usize) -> Option<VisualHandle> {
        self.plate_visuals.get(slot).copied()
    }

    pub fn beacon_visual(&self) -> VisualHandle {
        self.beacon
    }

    pub fn portal_visual(&self) -> Option<VisualHandle> {
        self.portal
    }

    pub fn hud_visual(&self) -> VisualHandle {
        self.hud
    }

    /// Interaction bound to a visual, if any
    pub fn interaction(&self, handle: VisualHandle) -> Option<Interaction> {
        self.interactions.get(&handle).copied()
    }

    /// Every clickable visual and what it does
    pub fn interactions(&self) -> impl Iterator<Item = (VisualHandle, Interaction)> + '_ {
        self.interactions.iter().map(|(h, i)| (*h, *i))
    }

    /// Current status display contents
    pub fn hud_frame(&self) -> HudFrame {
        HudFrame::from_progress(&self.game.progress, &self.game.rules)
    }

    /// Host reports a click. Returns false if the visual is not interactive.
    pub fn interact(&mut self, handle: VisualHandle) -> bool {
        if self.ended {
            return false;
        }
        let Some(interaction) = self.interaction(handle) else {
            log::debug!("Click on {:?} ignored: not interactive", handle);
            return false;
        };
        self.dispatch(interaction.event());
        true
    }

    /// Feed elapsed time; fires due decay ticks. Returns the number fired.
    pub fn advance(&mut self, elapsed: Duration) -> u32 {
        let ticks = self.timer.advance(elapsed);
        for _ in 0..ticks {
            self.dispatch(Event::Tick);
        }
        ticks
    }

    /// Handle one event and apply its effects to the host
    pub fn dispatch(&mut self, event: Event) {
        if self.ended {
            return;
        }
        let effects = self.game.dispatch(event);
        self.apply(effects);
    }

    fn apply(&mut self, effects: Vec<Effect>) {
        let mut refresh = false;
        for effect in effects {
            match effect {
                Effect::ShardSpawned { id, position } => {
                    let handle = self.host.create_visual(&self.layout.shard(position));
                    self.host.enable_interaction(handle, scene::SHARD_HOVER);
                    self.interactions.insert(handle, Interaction::Shard(id));
                    self.shard_visuals.insert(id, handle);
                }
                Effect::ShardRemoved(id) => {
                    if let Some(handle) = self.shard_visuals.remove(&id) {
                        self.interactions.remove(&handle);
                        self.host.destroy_visual(handle);
                    }
                }
                Effect::PlateLit { slot, lit } => {
                    if let Some(&handle) = self.plate_visuals.get(slot) {
                        self.host.set_color(handle, scene::plate_color(lit));
                    }
                }
                Effect::Cue(cue) => {
                    let source = match cue {
                        Cue::Pickup(id) => self.shard_visuals.get(&id).copied(),
                        Cue::Charge => Some(self.beacon),
                    };
                    if let Some(source) = source {
                        self.audio.play(&mut self.host, cue.into(), source);
                    }
                }
                Effect::PortalOpened => {
                    if self.portal.is_none() {
                        let handle = self.host.create_visual(&self.layout.portal());
                        self.host.enable_interaction(handle, scene::PORTAL_HOVER);
                        self.interactions.insert(handle, Interaction::Portal);
                        self.portal = Some(handle);
                    }
                }
                Effect::HudRelocated => {
                    self.host
                        .set_position(self.hud, self.layout.hud_beyond_portal);
                }
                Effect::HudRefresh => refresh = true,
            }
        }
        if refresh {
            self.hud_frame().push(&mut self.host);
        }
    }

    /// Stop the timer and remove every visual this session created.
    /// Called automatically on drop; safe to call more than once.
    pub fn end(&mut self) {
        if self.ended {
            return;
        }
        self.ended = true;
        self.timer.cancel();

        let mut handles: Vec<VisualHandle> = self.shard_visuals.drain().map(|(_, h)| h).collect();
        handles.sort();
        handles.extend(self.plate_visuals.drain(..));
        handles.extend(self.portal.take());
        handles.extend(self.props.drain(..));
        handles.extend([self.beacon, self.overlay, self.hud, self.ambient]);
        for handle in handles {
            self.host.destroy_visual(handle);
        }
        self.interactions.clear();

        log::info!(
            "Session ended: charge {:.0}%, {} held, {} banked{}",
            self.game.progress.charge,
            self.game.progress.held,
            self.game.progress.banked,
            if self.game.is_won() { ", won" } else { "" }
        );
    }
}

impl<H: Host> Drop for Session<H> {
    fn drop(&mut self) {
        self.end();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::{AudioBackend, CHARGE_CLIP, PICKUP_CLIP};
    use crate::host::{Color, Presentation, StatusSink, VisualSpec};
    use crate::scene::PORTAL_ASSET;
    use crate::settings::Rules;
    use glam::Vec3;
    use std::cell::RefCell;
    use std::collections::HashSet;
    use std::rc::Rc;

    #[derive(Debug, Default)]
    struct Journal {
        next: u64,
        created: Vec<(VisualHandle, VisualSpec)>,
        destroyed: Vec<VisualHandle>,
        colors: Vec<(VisualHandle, Color)>,
        moved: Vec<(VisualHandle, Vec3)>,
        hover: HashMap<VisualHandle, String>,
        sounds: Vec<(String, VisualHandle, bool)>,
        frames: Vec<(String, f32)>,
    }

    impl Journal {
        fn live(&self) -> HashSet<VisualHandle> {
            let destroyed: HashSet<_> = self.destroyed.iter().copied().collect();
            self.created
                .iter()
                .map(|(h, _)| *h)
                .filter(|h| !destroyed.contains(h))
                .collect()
        }
    }

    /// Host double; the journal outlives the session
    #[derive(Clone, Default)]
    struct RecordingHost(Rc<RefCell<Journal>>);

    impl Presentation for RecordingHost {
        fn create_visual(&mut self, spec: &VisualSpec) -> VisualHandle {
            let mut j = self.0.borrow_mut();
            j.next += 1;
            let handle = VisualHandle(j.next);
            j.created.push((handle, spec.clone()));
            handle
        }
        fn destroy_visual(&mut self, handle: VisualHandle) {
            self.0.borrow_mut().destroyed.push(handle);
        }
        fn set_color(&mut self, handle: VisualHandle, color: Color) {
            self.0.borrow_mut().colors.push((handle, color));
        }
        fn set_position(&mut self, handle: VisualHandle, position: Vec3) {
            self.0.borrow_mut().moved.push((handle, position));
        }
        fn enable_interaction(&mut self, handle: VisualHandle, hover_text: &str) {
            self.0.borrow_mut().hover.insert(handle, hover_text.to_string());
        }
    }

    impl AudioBackend for RecordingHost {
        fn play(&mut self, clip: &str, source: VisualHandle, looping: bool, _volume: f32) {
            self.0
                .borrow_mut()
                .sounds
                .push((clip.to_string(), source, looping));
        }
    }

    impl StatusSink for RecordingHost {
        fn render(&mut self, text: &str, overlay_alpha: f32) {
            self.0
                .borrow_mut()
                .frames
                .push((text.to_string(), overlay_alpha));
        }
    }

    fn start() -> (Session<RecordingHost>, Rc<RefCell<Journal>>) {
        let host = RecordingHost::default();
        let journal = host.0.clone();
        let session = Session::new(Settings::default(), host).unwrap();
        (session, journal)
    }

    fn first_shards(session: &Session<RecordingHost>, n: usize) -> Vec<VisualHandle> {
        session
            .game()
            .shards
            .iter()
            .take(n)
            .filter_map(|s| session.shard_visual(s.id))
            .collect()
    }

    fn collect_and_deposit(session: &mut Session<RecordingHost>, n: usize) {
        for handle in first_shards(session, n) {
            assert!(session.interact(handle));
        }
        let beacon = session.beacon_visual();
        session.interact(beacon);
    }

    #[test]
    fn test_start_builds_scene() {
        let (session, journal) = start();
        let j = journal.borrow();

        // ambient + hud + overlay + beacon + 9 shards + 3 plates + 9 props
        assert_eq!(j.created.len(), 25);
        assert_eq!(j.hover.len(), 13);
        assert_eq!(j.hover[&session.beacon_visual()], scene::BEACON_HOVER);
        assert_eq!(j.sounds.len(), 1);
        assert!(j.sounds[0].2, "ambient loop should loop");
        assert_eq!(j.frames, vec![("Shards: 0/9\nCharge: 0%".to_string(), 0.0)]);

        let plate0 = session.plate_visual(0).unwrap();
        let plate1 = session.plate_visual(1).unwrap();
        let spec_of = |h: VisualHandle| j.created.iter().find(|(c, _)| *c == h).unwrap().1.clone();
        assert_eq!(spec_of(plate0).color, Some(Color::GREEN));
        assert_eq!(spec_of(plate1).color, Some(Color::GRAY));
        assert!(session.timer().is_running());
    }

    #[test]
    fn test_pickup_by_click() {
        let (mut session, journal) = start();
        let handle = first_shards(&session, 1)[0];

        assert!(session.interact(handle));
        assert_eq!(session.game().progress.held, 1);
        {
            let j = journal.borrow();
            assert_eq!(j.destroyed, vec![handle]);
            assert_eq!(j.sounds.last().unwrap(), &(PICKUP_CLIP.to_string(), handle, false));
            assert_eq!(j.frames.last().unwrap().0, "Shards: 1/9\nCharge: 0%");
        }

        // Destroyed visual is no longer clickable
        assert!(!session.interact(handle));
        assert_eq!(session.game().progress.held, 1);
    }

    #[test]
    fn test_unknown_handle_ignored() {
        let (mut session, journal) = start();
        let frames = journal.borrow().frames.len();
        assert!(!session.interact(VisualHandle(9_999)));
        assert_eq!(journal.borrow().frames.len(), frames);
    }

    #[test]
    fn test_deposit_plays_charge_from_beacon() {
        let (mut session, journal) = start();
        collect_and_deposit(&mut session, 3);
        let j = journal.borrow();
        assert_eq!(
            j.sounds.last().unwrap(),
            &(CHARGE_CLIP.to_string(), session.beacon_visual(), false)
        );
        assert_eq!(j.frames.last().unwrap().0, "Shards: 0/9\nCharge: 33%");
    }

    #[test]
    fn test_plate_colors_follow_sequence() {
        let (mut session, journal) = start();
        let plates: Vec<_> = (0..3).map(|s| session.plate_visual(s).unwrap()).collect();

        session.interact(plates[0]);
        assert_eq!(journal.borrow().colors, vec![(plates[1], Color::GREEN)]);

        journal.borrow_mut().colors.clear();
        session.interact(plates[0]);
        assert_eq!(
            journal.borrow().colors,
            vec![
                (plates[0], Color::GREEN),
                (plates[1], Color::GRAY),
                (plates[2], Color::GRAY)
            ]
        );
    }

    #[test]
    fn test_puzzle_reward_shards_are_clickable() {
        let (mut session, _journal) = start();
        for slot in 0..3 {
            let plate = session.plate_visual(slot).unwrap();
            session.interact(plate);
        }
        assert_eq!(session.game().shards.len(), 11);
        let reward = session.shard_visual(ShardId(10)).unwrap();
        assert_eq!(session.interaction(reward), Some(Interaction::Shard(ShardId(10))));
        assert!(session.interact(reward));
        assert_eq!(session.game().progress.held, 1);
    }

    #[test]
    fn test_decay_ticks_from_elapsed_time() {
        let (mut session, journal) = start();
        for handle in first_shards(&session, 2) {
            session.interact(handle);
        }

        assert_eq!(session.advance(Duration::from_secs(19)), 0);
        assert_eq!(session.advance(Duration::from_secs(1)), 1);
        assert!((journal.borrow().frames.last().unwrap().1 - 0.15).abs() < 1e-6);

        assert_eq!(session.advance(Duration::from_secs(80)), 4);
        assert_eq!(session.game().progress.held, 0);
        assert_eq!(session.game().progress.decay_level, 0);
        assert_eq!(journal.borrow().frames.last().unwrap(), &("Shards: 0/9\nCharge: 0%".to_string(), 0.0));
    }

    #[test]
    fn test_huge_elapsed_does_not_panic() {
        let (mut session, _journal) = start();
        session.advance(Duration::from_secs(5));
        assert_eq!(session.advance(Duration::MAX), crate::consts::MAX_CATCH_UP_TICKS);
        assert!(session.timer().is_running());
    }

    #[test]
    fn test_win_opens_portal_and_portal_moves_hud() {
        let (mut session, journal) = start();
        collect_and_deposit(&mut session, 9);
        assert!(session.is_won());

        let portal = session.portal_visual().expect("portal should be open");
        {
            let j = journal.borrow();
            let (_, spec) = j.created.iter().find(|(h, _)| *h == portal).unwrap();
            assert_eq!(
                spec.kind,
                crate::host::VisualKind::Model {
                    asset: PORTAL_ASSET.into()
                }
            );
            assert_eq!(j.hover[&portal], scene::PORTAL_HOVER);
            assert_eq!(j.frames.last().unwrap().0, "Shards: 0/9\nCharge: 100%");
        }

        let before = session.game().clone();
        assert!(session.interact(portal));
        assert_eq!(
            journal.borrow().moved,
            vec![(session.hud_visual(), SceneLayout::default().hud_beyond_portal)]
        );
        assert_eq!(session.game(), &before);
    }

    #[test]
    fn test_nothing_changes_after_win() {
        let (mut session, journal) = start();
        for slot in 0..3 {
            let plate = session.plate_visual(slot).unwrap();
            session.interact(plate);
        }
        collect_and_deposit(&mut session, 9);
        assert!(session.is_won());

        let game = session.game().clone();
        let frames = journal.borrow().frames.len();
        let colors = journal.borrow().colors.len();

        let remaining = first_shards(&session, 2);
        assert_eq!(remaining.len(), 2);
        for handle in remaining {
            session.interact(handle);
        }
        let plate = session.plate_visual(0).unwrap();
        session.interact(plate);
        let beacon = session.beacon_visual();
        session.interact(beacon);
        session.advance(Duration::from_secs(200));

        assert_eq!(session.game(), &game);
        assert_eq!(journal.borrow().frames.len(), frames);
        assert_eq!(journal.borrow().colors.len(), colors);
    }

    #[test]
    fn test_drop_tears_down() {
        let (mut session, journal) = start();
        collect_and_deposit(&mut session, 9);
        drop(session);

        let j = journal.borrow();
        assert!(j.live().is_empty(), "visuals left behind: {:?}", j.live());
    }

    #[test]
    fn test_teardown_on_panic() {
        let host = RecordingHost::default();
        let journal = host.0.clone();
        let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(move || {
            let mut session = Session::new(Settings::default(), host).unwrap();
            session.advance(Duration::from_secs(20));
            panic!("host crashed");
        }));
        assert!(result.is_err());
        assert!(journal.borrow().live().is_empty());
    }

    #[test]
    fn test_end_stops_timer_and_input() {
        let (mut session, journal) = start();
        session.end();
        session.end();
        assert!(session.is_ended());
        assert!(!session.timer().is_running());
        assert_eq!(session.advance(Duration::from_secs(100)), 0);

        let destroyed = journal.borrow().destroyed.len();
        assert_eq!(destroyed, 25);
        assert!(!session.interact(session.beacon_visual()));
    }

    #[test]
    fn test_invalid_settings_rejected() {
        let settings = Settings {
            rules: Rules {
                shard_goal: 0,
                ..Rules::default()
            },
            ..Settings::default()
        };
        let host = RecordingHost::default();
        let journal = host.0.clone();
        assert!(Session::new(settings, host).is_err());
        assert!(journal.borrow().created.is_empty());
    }
}
