//! # engine_math
//!
//! Math types for the 2D engine. Re-exports [`glam`] for linear algebra and
//! defines the engine-specific spatial types: [`Point`], [`Aabb`] and the
//! [`SpaceComponent`](space::SpaceComponent) that gives an entity its
//! rectangle.

pub mod aabb;
pub mod space;

// Re-export glam types for convenience.
pub use glam::{Vec2, Vec3};

/// A 2D point in world units.
pub type Point = Vec2;

pub use aabb::{Aabb, is_intersecting, minimum_translation};
pub use space::SpaceComponent;
