//! Structural changes queued during update.

use engine_component::Entity;

/// A change to entity membership that a system requested while the world
/// was iterating. The world applies queued commands after each per-entity
/// step, so the member list being iterated is never mutated underneath it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Destroy the entity and drop it from every system.
    RemoveEntity(Entity),
    /// Add the entity to the system with this type tag.
    AddToSystem { system: String, entity: Entity },
    /// Remove the entity from the system with this type tag.
    RemoveFromSystem { system: String, entity: Entity },
}
