//! # engine_component
//!
//! The "E" and "C" in ECS. Defines what a component is, how an entity stores
//! its components, and the registry that owns every entity.
//!
//! This crate provides:
//!
//! - [`Component`] trait: the contract all entity data must satisfy.
//! - [`ComponentTypeId`]: stable id derived from a component's type tag.
//! - [`Entity`]: lightweight `u64` entity identifiers.
//! - [`EntityAllocator`]: issues world-scoped entity ids that are never reused.
//! - [`ComponentStore`]: one entity's type-erased component set.
//! - [`EntityRegistry`]: owner of all entities and their components.

pub mod component;
pub mod entity;
pub mod registry;
pub mod store;

pub use component::{Component, ComponentTypeId};
pub use entity::{Entity, EntityAllocator};
pub use registry::{EntityRecord, EntityRegistry};
pub use store::ComponentStore;
