//! Positional sound playback.
//!
//! [`AudioSystem`] turns [`AudioComponent`]s into calls on an
//! [`AudioBackend`]. The backend owns the actual device; the system only
//! tracks which source belongs to which entity and decides when to start,
//! restart or retire a sound.
//!
//! Positions handed to the backend are normalised by the viewport so that
//! `(1, 1)` is the bottom-right corner of the screen.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use engine_component::{Component, Entity};
use engine_math::{SpaceComponent, Vec3};
use engine_system::{Context, Frame, System, SystemError};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::camera::CameraMessage;

const DEFAULT_HEIGHT_MODIFIER: f32 = 1.0;

/// A sound attached to an entity.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AudioComponent {
    /// Asset name passed to [`AudioBackend::create_source`].
    pub file: String,
    /// Restart when finished instead of removing the component.
    pub repeat: bool,
    /// Not positioned in the world.
    pub background: bool,
}

impl AudioComponent {
    /// A one-shot positioned sound.
    #[must_use]
    pub fn new(file: impl Into<String>) -> Self {
        Self {
            file: file.into(),
            ..Self::default()
        }
    }
}

impl Component for AudioComponent {
    fn type_name() -> &'static str {
        "AudioComponent"
    }
}

/// Backend handle for one playing sound.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SourceId(pub u64);

/// Playback state reported by the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaybackState {
    Initial,
    Playing,
    Paused,
    Stopped,
}

/// Errors reported by an [`AudioBackend`].
#[derive(Debug, thiserror::Error)]
pub enum AudioError {
    /// No asset with this name has been loaded.
    #[error("sound not found: {0}")]
    NotFound(String),

    /// The device could not be opened or failed.
    #[error("audio device error: {0}")]
    Device(String),

    /// The asset could not be decoded or buffered.
    #[error("failed to prepare {file}: {reason}")]
    Prepare { file: String, reason: String },
}

/// The audio device the system drives.
pub trait AudioBackend {
    /// # Errors
    ///
    /// Returns [`AudioError::Device`] when no output is available.
    fn open_device(&mut self) -> Result<(), AudioError>;

    /// Create a source for a loaded asset.
    ///
    /// # Errors
    ///
    /// Returns [`AudioError::NotFound`] for unknown assets.
    fn create_source(&mut self, file: &str) -> Result<SourceId, AudioError>;

    /// Current playback state of `source`.
    fn state(&self, source: SourceId) -> PlaybackState;

    /// Buffer the asset if that has not happened yet.
    ///
    /// # Errors
    ///
    /// Returns [`AudioError::Prepare`] when buffering fails.
    fn prepare(&mut self, source: SourceId, background: bool) -> Result<(), AudioError>;

    /// Start or resume playback.
    fn play(&mut self, source: SourceId);

    /// Halt playback.
    fn stop(&mut self, source: SourceId);

    /// Seek back to the start so the next `play` restarts the sound.
    fn rewind(&mut self, source: SourceId);

    /// Place a non-background source, in viewport-normalised coordinates.
    fn set_source_position(&mut self, source: SourceId, position: Vec3);

    /// Place the listener, in viewport-normalised coordinates.
    fn set_listener_position(&mut self, position: Vec3);
}

/// Plays each member's [`AudioComponent`] through the backend.
#[derive(Debug)]
pub struct AudioSystem<B> {
    backend: Rc<RefCell<B>>,
    /// Scales the camera height when placing the listener. Zero selects the
    /// default of 1.
    pub height_modifier: f32,
    players: HashMap<Entity, SourceId>,
}

impl<B: AudioBackend> AudioSystem<B> {
    /// System tag entities join to have their sounds played.
    pub const TYPE: &'static str = "AudioSystem";

    /// Wrap `backend`; the device is opened in [`System::init`].
    #[must_use]
    pub fn new(backend: B) -> Self {
        Self {
            backend: Rc::new(RefCell::new(backend)),
            height_modifier: 0.0,
            players: HashMap::new(),
        }
    }

    /// Set [`AudioSystem::height_modifier`].
    #[must_use]
    pub fn with_height_modifier(mut self, height_modifier: f32) -> Self {
        self.height_modifier = height_modifier;
        self
    }

    /// Shared handle to the backend.
    #[must_use]
    pub fn backend(&self) -> Rc<RefCell<B>> {
        Rc::clone(&self.backend)
    }
}

impl<B: AudioBackend + 'static> System for AudioSystem<B> {
    fn type_name(&self) -> &'static str {
        Self::TYPE
    }

    fn init(&mut self, ctx: &mut Context) -> Result<(), SystemError> {
        if self.height_modifier == 0.0 {
            self.height_modifier = DEFAULT_HEIGHT_MODIFIER;
        }

        self.backend
            .try_borrow_mut()
            .map_err(|err| SystemError::Init {
                system: Self::TYPE,
                reason: err.to_string(),
            })?
            .open_device()
            .map_err(|err| SystemError::Device(err.to_string()))?;

        let backend = Rc::clone(&self.backend);
        let viewport = ctx.viewport;
        let height_modifier = self.height_modifier;
        ctx.mailbox
            .listen_to::<CameraMessage, _>(CameraMessage::TYPE, move |camera| {
                let position = Vec3::new(
                    camera.x / viewport.width,
                    camera.y / viewport.height,
                    camera.z * height_modifier,
                );
                match backend.try_borrow_mut() {
                    Ok(mut backend) => backend.set_listener_position(position),
                    Err(_) => warn!("audio backend busy; listener position not updated"),
                }
            });

        info!(height_modifier, "audio device opened");
        Ok(())
    }

    fn update(&mut self, entity: Entity, frame: &Frame<'_>, ctx: &mut Context) {
        // Once per pass, forget sources of entities that no longer exist.
        if frame.members.first() == Some(&entity) {
            self.players.retain(|owner, _| ctx.registry.contains(*owner));
        }

        let Some(audio) = ctx.component::<AudioComponent>(entity) else {
            self.players.remove(&entity);
            return;
        };
        let (repeat, background) = (audio.repeat, audio.background);

        let Ok(mut backend) = self.backend.try_borrow_mut() else {
            warn!(%entity, "audio backend busy; skipping");
            return;
        };

        let source = match self.players.get(&entity) {
            Some(&source) => source,
            None => match backend.create_source(&audio.file) {
                Ok(source) => {
                    self.players.insert(entity, source);
                    source
                }
                Err(AudioError::NotFound(file)) => {
                    debug!(%entity, file = %file, "sound not loaded");
                    return;
                }
                Err(err) => {
                    warn!(%entity, error = %err, "failed to create audio source");
                    return;
                }
            },
        };

        let state = backend.state(source);
        if state == PlaybackState::Playing {
            return;
        }

        if state == PlaybackState::Stopped && !repeat {
            backend.rewind(source);
            backend.stop(source);
            self.players.remove(&entity);
            ctx.remove_component::<AudioComponent>(entity);
            debug!(%entity, "sound finished");
            return;
        }

        if let Err(err) = backend.prepare(source, background) {
            warn!(%entity, error = %err, "failed to prepare sound");
            return;
        }
        backend.play(source);

        if !background && let Some(space) = ctx.component::<SpaceComponent>(entity) {
            let center = space.center();
            backend.set_source_position(
                source,
                Vec3::new(
                    center.x / ctx.viewport.width,
                    center.y / ctx.viewport.height,
                    0.0,
                ),
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use engine_math::Vec2;
    use engine_system::{Viewport, World};

    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    enum Call {
        Create(String),
        Prepare(SourceId, bool),
        Play(SourceId),
        Stop(SourceId),
        Rewind(SourceId),
        SourceAt(SourceId, Vec3),
        ListenerAt(Vec3),
    }

    #[derive(Debug, Default)]
    struct FakeBackend {
        fail_open: bool,
        known: Vec<String>,
        states: HashMap<SourceId, PlaybackState>,
        calls: Vec<Call>,
        next: u64,
    }

    impl FakeBackend {
        fn with_sounds(sounds: &[&str]) -> Self {
            Self {
                known: sounds.iter().map(|s| s.to_string()).collect(),
                ..Self::default()
            }
        }
    }

    impl AudioBackend for FakeBackend {
        fn open_device(&mut self) -> Result<(), AudioError> {
            if self.fail_open {
                Err(AudioError::Device("no output".into()))
            } else {
                Ok(())
            }
        }

        fn create_source(&mut self, file: &str) -> Result<SourceId, AudioError> {
            if !self.known.iter().any(|known| known == file) {
                return Err(AudioError::NotFound(file.to_string()));
            }
            self.next += 1;
            let source = SourceId(self.next);
            self.states.insert(source, PlaybackState::Initial);
            self.calls.push(Call::Create(file.to_string()));
            Ok(source)
        }

        fn state(&self, source: SourceId) -> PlaybackState {
            self.states.get(&source).copied().unwrap_or(PlaybackState::Initial)
        }

        fn prepare(&mut self, source: SourceId, background: bool) -> Result<(), AudioError> {
            self.calls.push(Call::Prepare(source, background));
            Ok(())
        }

        fn play(&mut self, source: SourceId) {
            self.states.insert(source, PlaybackState::Playing);
            self.calls.push(Call::Play(source));
        }

        fn stop(&mut self, source: SourceId) {
            self.states.insert(source, PlaybackState::Stopped);
            self.calls.push(Call::Stop(source));
        }

        fn rewind(&mut self, source: SourceId) {
            self.calls.push(Call::Rewind(source));
        }

        fn set_source_position(&mut self, source: SourceId, position: Vec3) {
            self.calls.push(Call::SourceAt(source, position));
        }

        fn set_listener_position(&mut self, position: Vec3) {
            self.calls.push(Call::ListenerAt(position));
        }
    }

    fn setup(backend: FakeBackend) -> (World, Rc<RefCell<FakeBackend>>) {
        let system = AudioSystem::new(backend);
        let handle = system.backend();
        let mut world = World::new(Viewport::new(800.0, 400.0));
        world.add_system(system);
        (world, handle)
    }

    #[test]
    fn test_positional_sound_starts_at_entity_center() {
        let (mut world, backend) = setup(FakeBackend::with_sounds(&["hit.wav"]));
        let entity = world.create_entity("emitter", &[AudioSystem::<FakeBackend>::TYPE]);
        world.add_component(entity, AudioComponent::new("hit.wav"));
        world.add_component(entity, SpaceComponent::new(Vec2::new(390.0, 190.0), 20.0, 20.0));

        world.update(0.016);
        world.update(0.016);

        let source = SourceId(1);
        assert_eq!(
            backend.borrow().calls,
            vec![
                Call::Create("hit.wav".into()),
                Call::Prepare(source, false),
                Call::Play(source),
                Call::SourceAt(source, Vec3::new(0.5, 0.5, 0.0)),
            ]
        );
    }

    #[test]
    fn test_finished_sound_is_removed() {
        let (mut world, backend) = setup(FakeBackend::with_sounds(&["hit.wav"]));
        let entity = world.create_entity("emitter", &[AudioSystem::<FakeBackend>::TYPE]);
        world.add_component(entity, AudioComponent {
            file: "hit.wav".into(),
            repeat: false,
            background: true,
        });

        world.update(0.016);
        backend.borrow_mut().states.insert(SourceId(1), PlaybackState::Stopped);
        backend.borrow_mut().calls.clear();
        world.update(0.016);

        assert_eq!(
            backend.borrow().calls,
            vec![Call::Rewind(SourceId(1)), Call::Stop(SourceId(1))]
        );
        assert!(world.component::<AudioComponent>(entity).is_none());
    }

    #[test]
    fn test_repeating_sound_restarts() {
        let (mut world, backend) = setup(FakeBackend::with_sounds(&["music.ogg"]));
        let entity = world.create_entity("music", &[AudioSystem::<FakeBackend>::TYPE]);
        world.add_component(entity, AudioComponent {
            file: "music.ogg".into(),
            repeat: true,
            background: true,
        });

        world.update(0.016);
        backend.borrow_mut().states.insert(SourceId(1), PlaybackState::Stopped);
        backend.borrow_mut().calls.clear();
        world.update(0.016);

        assert_eq!(
            backend.borrow().calls,
            vec![Call::Prepare(SourceId(1), true), Call::Play(SourceId(1))]
        );
        assert!(world.component::<AudioComponent>(entity).is_some());
    }

    #[test]
    fn test_missing_asset_is_skipped_silently() {
        let (mut world, backend) = setup(FakeBackend::default());
        let entity = world.create_entity("emitter", &[AudioSystem::<FakeBackend>::TYPE]);
        world.add_component(entity, AudioComponent::new("missing.wav"));

        world.update(0.016);

        assert!(backend.borrow().calls.is_empty());
        assert!(world.component::<AudioComponent>(entity).is_some());
    }

    #[test]
    fn test_failed_device_makes_system_inert() {
        let (mut world, backend) = setup(FakeBackend {
            fail_open: true,
            known: vec!["hit.wav".into()],
            ..FakeBackend::default()
        });
        assert_eq!(world.is_inert(AudioSystem::<FakeBackend>::TYPE), Some(true));

        let entity = world.create_entity("emitter", &[AudioSystem::<FakeBackend>::TYPE]);
        world.add_component(entity, AudioComponent::new("hit.wav"));
        world.update(0.016);
        assert!(backend.borrow().calls.is_empty());

        world.mailbox().dispatch(CameraMessage { x: 1.0, y: 1.0, z: 1.0 });
        assert!(backend.borrow().calls.is_empty());
    }

    #[test]
    fn test_camera_message_moves_listener() {
        let system = AudioSystem::new(FakeBackend::default()).with_height_modifier(2.0);
        let backend = system.backend();
        let mut world = World::new(Viewport::new(800.0, 400.0));
        world.add_system(system);

        world.mailbox().dispatch(CameraMessage { x: 400.0, y: 100.0, z: 3.0 });

        assert_eq!(
            backend.borrow().calls,
            vec![Call::ListenerAt(Vec3::new(0.5, 0.25, 6.0))]
        );
    }

    #[test]
    fn test_default_height_modifier() {
        let (world, backend) = setup(FakeBackend::default());
        world.mailbox().dispatch(CameraMessage { x: 0.0, y: 0.0, z: 4.0 });
        assert_eq!(
            backend.borrow().calls,
            vec![Call::ListenerAt(Vec3::new(0.0, 0.0, 4.0))]
        );
    }
}
