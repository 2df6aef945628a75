//! Entity handles.
//!
//! An [`Entity`] names one object in a world. It carries no data of its
//! own; its components live in the world's registry. Ids are scoped to the
//! registry that issued them and are never handed out twice, so a listener
//! or system that still holds the handle of a removed entity simply finds
//! nothing when it looks the entity up.

use std::fmt;

/// Handle to an object in a world.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Entity(pub u64);

impl Entity {
    /// Never issued by a registry. Useful as a "no entity" placeholder in
    /// messages and components.
    pub const INVALID: Entity = Entity(0);

    #[must_use]
    pub const fn from_raw(id: u64) -> Self {
        Self(id)
    }

    #[must_use]
    pub const fn id(self) -> u64 {
        self.0
    }

    /// `false` only for [`Entity::INVALID`]. Says nothing about whether the
    /// entity is still alive; ask the registry for that.
    #[must_use]
    pub const fn is_valid(self) -> bool {
        self.0 != Self::INVALID.0
    }
}

impl fmt::Display for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Entity({})", self.0)
    }
}

/// Issues entity handles for one registry.
///
/// Handles are issued in creation order starting after [`Entity::INVALID`].
/// Removing an entity does not return its id to the pool.
#[derive(Debug)]
pub struct EntityAllocator {
    issued: u64,
}

impl EntityAllocator {
    #[must_use]
    pub fn new() -> Self {
        Self {
            issued: Entity::INVALID.0,
        }
    }

    /// Hand out the next unused handle.
    pub fn allocate(&mut self) -> Entity {
        self.issued += 1;
        Entity(self.issued)
    }

    /// How many handles this allocator has issued, including those of
    /// entities that have since been removed.
    #[must_use]
    pub fn issued(&self) -> u64 {
        self.issued
    }
}

impl Default for EntityAllocator {
    fn default() -> Self {
        Self::new()
    }
}
