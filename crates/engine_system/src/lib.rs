//! # engine_system
//!
//! System runtime for the 2D engine.
//!
//! A [`System`] is per-entity behaviour. The [`World`] owns every system,
//! the entity registry and the mailbox, and runs one frame per
//! [`World::update`] call:
//!
//! 1. Systems run in ascending priority (ties in registration order).
//! 2. Each system is invoked once per member entity, over a snapshot of its
//!    member list taken when its pass begins.
//! 3. Structural changes requested through the [`Context`] are applied after
//!    each per-entity step.
//!
//! ## Usage
//!
//! ```rust
//! use engine_component::Entity;
//! use engine_system::{Context, Frame, System, World};
//!
//! struct Tick;
//!
//! impl System for Tick {
//!     fn type_name(&self) -> &'static str { "Tick" }
//!     fn update(&mut self, _entity: Entity, _frame: &Frame<'_>, _ctx: &mut Context) {}
//! }
//!
//! let mut world = World::default();
//! world.add_system(Tick);
//! world.create_entity("ticker", &["Tick"]);
//! world.update(1.0 / 60.0);
//! ```

pub mod command;
pub mod config;
pub mod context;
pub mod error;
pub mod input;
pub mod system;
pub mod world;

pub use command::Command;
pub use config::{EngineConfig, Viewport};
pub use context::Context;
pub use error::{ConfigError, SystemError};
pub use input::{InputState, Key, Mouse, MouseAction};
pub use system::{Frame, System};
pub use world::World;
