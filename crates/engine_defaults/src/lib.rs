//! # engine_defaults
//!
//! Components and systems that ship with the engine.
//!
//! - [`CollisionSystem`]: AABB overlap detection, solid push-out and
//!   [`CollisionMessage`] broadcast.
//! - [`AudioSystem`]: positional sound playback through an [`AudioBackend`].
//! - [`Level`]: tile maps drawn through a [`RenderBatch`].

pub mod audio;
pub mod camera;
pub mod collision;
pub mod level;
pub mod render;

pub use audio::{AudioBackend, AudioComponent, AudioError, AudioSystem, PlaybackState, SourceId};
pub use camera::CameraMessage;
pub use collision::{CollisionComponent, CollisionMasterComponent, CollisionMessage, CollisionSystem};
pub use level::{Layer, Level, Tile, Tilesheet, region_from_sheet};
pub use render::{DrawCall, Region, RenderBatch, Texture, TextureId};
