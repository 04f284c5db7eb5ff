//! Voice Control Dispatcher: one touch event in, presentation, mute state and
//! four phoneme updates out.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::control::aggregate::{centroid, InteractionState, Location};
use crate::control::phoneme::{PhonemeTable, VoiceRole, VoiceSet};
use crate::control::polar::ControlPair;
use crate::control::touch::{Bounds, TouchPoint};

/*
Per-Event Pipeline
==================

  touches ──► centroid ──► Location? ──► ControlPair?
                 │                          │
                 ▼                          ▼
          InteractionState ──────────► presenter          (1)

  touches.is_empty() ? mute : unmute ──► engine            (2)

  Location? ──► soprano/alto/tenor/bass tables ──► engine  (3)

Each step runs on its own: a missing presenter skips (1), a missing engine
skips (2) and (3), a missing location skips (3). With zero touches the
voices keep their last phoneme while the chain is muted.
*/

/// The gesture event that triggered a dispatch. Only logged; the snapshot
/// itself decides everything.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TouchEvent {
    Began,
    Moved,
    Cancelled,
    Ended,
}

/// Visual feedback collaborator.
pub trait Presenter {
    fn present(&mut self, state: InteractionState, control: Option<ControlPair>);
}

/// Audio collaborator: master mute plus one phoneme input per voice.
pub trait AudioEngine<P> {
    fn mute(&mut self);

    fn unmute(&mut self);

    fn update_phoneme(&mut self, role: VoiceRole, phoneme: P);
}

impl Presenter for () {
    fn present(&mut self, _state: InteractionState, _control: Option<ControlPair>) {}
}

impl<P> AudioEngine<P> for () {
    fn mute(&mut self) {}

    fn unmute(&mut self) {}

    fn update_phoneme(&mut self, _role: VoiceRole, _phoneme: P) {}
}

/// "Keep touches after release" policy, owned by the gesture layer.
///
/// Cloning shares the flag. The dispatcher only ever reads it.
#[derive(Debug, Clone, Default)]
pub struct SustainFlag(Arc<AtomicBool>);

impl SustainFlag {
    pub fn new(enabled: bool) -> Self {
        Self(Arc::new(AtomicBool::new(enabled)))
    }

    pub fn set(&self, enabled: bool) {
        self.0.store(enabled, Ordering::Relaxed);
    }

    pub fn get(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }

    /// Flip the flag and return the new value.
    pub fn toggle(&self) -> bool {
        !self.0.fetch_xor(true, Ordering::Relaxed)
    }
}

/// Everything computed for one event.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Frame {
    pub state: InteractionState,
    pub location: Option<Location>,
    pub control: Option<ControlPair>,
    pub muted: bool,
}

pub struct Dispatcher<T, E = (), V = ()> {
    tables: VoiceSet<T>,
    bounds: Option<Bounds>,
    engine: Option<E>,
    presenter: Option<V>,
    sustain: SustainFlag,
    muted: Option<bool>,
}

impl<T: PhonemeTable> Dispatcher<T> {
    /// A dispatcher with no collaborators attached yet.
    pub fn new(tables: VoiceSet<T>) -> Self {
        Self {
            tables,
            bounds: None,
            engine: None,
            presenter: None,
            sustain: SustainFlag::default(),
            muted: None,
        }
    }
}

impl<T, E, V> Dispatcher<T, E, V>
where
    T: PhonemeTable,
    E: AudioEngine<T::Phoneme>,
    V: Presenter,
{
    pub fn with_engine<E2>(self, engine: E2) -> Dispatcher<T, E2, V>
    where
        E2: AudioEngine<T::Phoneme>,
    {
        Dispatcher {
            tables: self.tables,
            bounds: self.bounds,
            engine: Some(engine),
            presenter: self.presenter,
            sustain: self.sustain,
            muted: self.muted,
        }
    }

    pub fn with_presenter<V2: Presenter>(self, presenter: V2) -> Dispatcher<T, E, V2> {
        Dispatcher {
            tables: self.tables,
            bounds: self.bounds,
            engine: self.engine,
            presenter: Some(presenter),
            sustain: self.sustain,
            muted: self.muted,
        }
    }

    pub fn with_bounds(mut self, bounds: Bounds) -> Self {
        self.bounds = Some(bounds);
        self
    }

    pub fn with_sustain(mut self, sustain: SustainFlag) -> Self {
        self.sustain = sustain;
        self
    }

    /// Update the surface size, e.g. after a resize.
    pub fn set_bounds(&mut self, bounds: Option<Bounds>) {
        self.bounds = bounds;
    }

    pub fn bounds(&self) -> Option<Bounds> {
        self.bounds
    }

    pub fn engine(&self) -> Option<&E> {
        self.engine.as_ref()
    }

    pub fn engine_mut(&mut self) -> Option<&mut E> {
        self.engine.as_mut()
    }

    pub fn detach_engine(&mut self) -> Option<E> {
        self.engine.take()
    }

    pub fn presenter(&self) -> Option<&V> {
        self.presenter.as_ref()
    }

    pub fn presenter_mut(&mut self) -> Option<&mut V> {
        self.presenter.as_mut()
    }

    pub fn detach_presenter(&mut self) -> Option<V> {
        self.presenter.take()
    }

    /// Whether released touches should be kept. Read for the gesture layer.
    pub fn should_sustain_touches(&self) -> bool {
        self.sustain.get()
    }

    /// Run the pipeline for one touch event over the current snapshot.
    pub fn handle(&mut self, event: TouchEvent, touches: &[TouchPoint]) -> Frame {
        let state = InteractionState::classify(touches);
        let location = self.bounds.and_then(|bounds| centroid(touches, &bounds));
        let control = location.map(ControlPair::from_location);
        let muted = touches.is_empty();

        log::trace!(
            "{:?}: {} touches, {:?}, location {:?}, control {:?}",
            event,
            touches.len(),
            state,
            location,
            control
        );

        if let Some(presenter) = self.presenter.as_mut() {
            presenter.present(state, control);
        }

        if let Some(engine) = self.engine.as_mut() {
            if muted {
                engine.mute();
            } else {
                engine.unmute();
            }

            if let Some(location) = location {
                for (role, table) in self.tables.iter() {
                    engine.update_phoneme(role, table.phoneme_at(location));
                }
            }
        }

        if self.muted != Some(muted) {
            log::debug!("{}", if muted { "muted" } else { "unmuted" });
            self.muted = Some(muted);
        }

        Frame {
            state,
            location,
            control,
            muted,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::control::touch::TouchPhase;

    #[derive(Debug, Clone, PartialEq)]
    enum Call {
        Mute,
        Unmute,
        Update(VoiceRole, Location),
    }

    #[derive(Default)]
    struct Recorder {
        calls: Vec<Call>,
    }

    impl AudioEngine<Location> for Recorder {
        fn mute(&mut self) {
            self.calls.push(Call::Mute);
        }

        fn unmute(&mut self) {
            self.calls.push(Call::Unmute);
        }

        fn update_phoneme(&mut self, role: VoiceRole, phoneme: Location) {
            self.calls.push(Call::Update(role, phoneme));
        }
    }

    #[derive(Default)]
    struct Screen {
        shown: Vec<(InteractionState, Option<ControlPair>)>,
    }

    impl Presenter for Screen {
        fn present(&mut self, state: InteractionState, control: Option<ControlPair>) {
            self.shown.push((state, control));
        }
    }

    fn identity(location: Location) -> Location {
        location
    }

    fn dispatcher() -> Dispatcher<fn(Location) -> Location, Recorder, Screen> {
        let table: fn(Location) -> Location = identity;
        Dispatcher::new(VoiceSet::splat(table))
            .with_bounds(Bounds::unit())
            .with_engine(Recorder::default())
            .with_presenter(Screen::default())
    }

    #[test]
    fn test_live_touch_unmutes_and_updates_every_voice() {
        let mut dispatcher = dispatcher();
        let touches = [TouchPoint::new(1, 0.5, 0.5, TouchPhase::Began)];

        let frame = dispatcher.handle(TouchEvent::Began, &touches);

        assert!(!frame.muted);
        assert_eq!(frame.state, InteractionState::Highlighted);
        let calls = &dispatcher.engine().unwrap().calls;
        assert_eq!(calls[0], Call::Unmute);
        let roles: Vec<_> = calls[1..]
            .iter()
            .map(|call| match call {
                Call::Update(role, location) => {
                    assert_eq!(*location, Location::CENTER);
                    *role
                }
                other => panic!("unexpected call {:?}", other),
            })
            .collect();
        assert_eq!(roles, VoiceRole::ALL);
    }

    #[test]
    fn test_empty_snapshot_mutes_and_skips_voices() {
        let mut dispatcher = dispatcher();

        let frame = dispatcher.handle(TouchEvent::Ended, &[]);

        assert!(frame.muted);
        assert_eq!(frame.location, None);
        assert_eq!(frame.control, None);
        assert_eq!(frame.state, InteractionState::Idle);
        assert_eq!(dispatcher.engine().unwrap().calls, [Call::Mute]);
        assert_eq!(
            dispatcher.presenter().unwrap().shown,
            [(InteractionState::Idle, None::<ControlPair>)]
        );
    }

    #[test]
    fn test_retiring_touches_still_unmute() {
        let mut dispatcher = dispatcher();
        let touches = [TouchPoint::new(1, 0.25, 0.75, TouchPhase::Ended)];

        let frame = dispatcher.handle(TouchEvent::Ended, &touches);

        assert_eq!(frame.state, InteractionState::Selected);
        assert!(!frame.muted);
        assert_eq!(dispatcher.engine().unwrap().calls.len(), 5);
    }

    #[test]
    fn test_missing_collaborators_are_skipped() {
        let table: fn(Location) -> Location = identity;
        let mut bare = Dispatcher::new(VoiceSet::splat(table)).with_bounds(Bounds::unit());
        let touches = [TouchPoint::new(1, 1.0, 0.5, TouchPhase::Moved)];

        let frame = bare.handle(TouchEvent::Moved, &touches);

        let control = frame.control.unwrap();
        assert!((control.hue - 0.75).abs() < 1e-6);
        assert!(bare.engine().is_none());
    }

    #[test]
    fn test_detached_engine_receives_nothing_more() {
        let mut dispatcher = dispatcher();
        let touches = [TouchPoint::new(1, 0.5, 0.5, TouchPhase::Began)];

        dispatcher.handle(TouchEvent::Began, &touches);
        let engine = dispatcher.detach_engine().unwrap();
        dispatcher.handle(TouchEvent::Moved, &touches);

        assert_eq!(engine.calls.len(), 5);
        assert!(dispatcher.engine().is_none());
        assert_eq!(dispatcher.presenter().unwrap().shown.len(), 2);
    }

    #[test]
    fn test_without_bounds_voices_are_not_updated() {
        let table: fn(Location) -> Location = identity;
        let mut dispatcher = Dispatcher::new(VoiceSet::splat(table)).with_engine(Recorder::default());
        let touches = [TouchPoint::new(1, 0.5, 0.5, TouchPhase::Began)];

        let frame = dispatcher.handle(TouchEvent::Began, &touches);

        assert_eq!(frame.location, None);
        assert!(!frame.muted);
        assert_eq!(dispatcher.engine().unwrap().calls, [Call::Unmute]);
    }

    #[test]
    fn test_sustain_flag_is_read_not_written() {
        let sustain = SustainFlag::new(false);
        let table: fn(Location) -> Location = identity;
        let mut dispatcher = Dispatcher::new(VoiceSet::splat(table))
            .with_bounds(Bounds::unit())
            .with_sustain(sustain.clone());

        assert!(!dispatcher.should_sustain_touches());
        assert!(sustain.toggle());
        assert!(dispatcher.should_sustain_touches());

        dispatcher.handle(TouchEvent::Ended, &[]);
        assert!(sustain.get());
    }
}
