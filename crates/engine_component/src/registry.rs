//! Entity registry. Owns every entity and its component set.
//!
//! The registry is the only owner of entity data. Systems and messages refer
//! to entities by [`Entity`] id and look components up here; a lookup on a
//! missing entity or component yields `None`, never a panic.

use std::collections::BTreeMap;

use tracing::trace;

use crate::component::Component;
use crate::entity::{Entity, EntityAllocator};
use crate::store::ComponentStore;

/// Everything the registry knows about one entity.
#[derive(Debug)]
pub struct EntityRecord {
    /// Human-readable tag, used in logs.
    pub tag: String,
    /// The entity's components.
    pub components: ComponentStore,
}

/// Owner of all entities and their components.
#[derive(Debug, Default)]
pub struct EntityRegistry {
    allocator: EntityAllocator,
    records: BTreeMap<Entity, EntityRecord>,
}

impl EntityRegistry {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self {
            allocator: EntityAllocator::new(),
            records: BTreeMap::new(),
        }
    }

    /// Allocate a fresh entity with no components.
    pub fn create(&mut self, tag: impl Into<String>) -> Entity {
        let entity = self.allocator.allocate();
        let tag = tag.into();
        trace!(%entity, tag = %tag, "entity created");
        self.records.insert(
            entity,
            EntityRecord {
                tag,
                components: ComponentStore::new(),
            },
        );
        entity
    }

    /// Remove an entity and release its components.
    ///
    /// Returns the removed record, or `None` if the entity did not exist.
    pub fn remove(&mut self, entity: Entity) -> Option<EntityRecord> {
        let record = self.records.remove(&entity)?;
        trace!(%entity, tag = %record.tag, "entity removed");
        Some(record)
    }

    /// Returns `true` if the entity is alive.
    #[must_use]
    pub fn contains(&self, entity: Entity) -> bool {
        self.records.contains_key(&entity)
    }

    /// Returns the entity's tag.
    #[must_use]
    pub fn tag(&self, entity: Entity) -> Option<&str> {
        self.records.get(&entity).map(|record| record.tag.as_str())
    }

    /// Attach `component` to `entity`, replacing any component with the
    /// same tag.
    ///
    /// Returns `false` if the entity does not exist.
    pub fn add_component<T: Component>(&mut self, entity: Entity, component: T) -> bool {
        match self.records.get_mut(&entity) {
            Some(record) => {
                record.components.insert(component);
                true
            }
            None => false,
        }
    }

    /// Typed component lookup.
    #[must_use]
    pub fn component<T: Component>(&self, entity: Entity) -> Option<&T> {
        self.records.get(&entity)?.components.get::<T>()
    }

    /// Typed mutable component lookup.
    #[must_use]
    pub fn component_mut<T: Component>(&mut self, entity: Entity) -> Option<&mut T> {
        self.records.get_mut(&entity)?.components.get_mut::<T>()
    }

    /// Returns `true` if the entity has a component of type `T`.
    #[must_use]
    pub fn has_component<T: Component>(&self, entity: Entity) -> bool {
        self.component::<T>(entity).is_some()
    }

    /// Delete the entity's entry for `T`'s tag, returning it if it is a `T`.
    pub fn remove_component<T: Component>(&mut self, entity: Entity) -> Option<T> {
        self.records.get_mut(&entity)?.components.remove::<T>()
    }

    /// Returns the sorted type tags of an entity's components.
    #[must_use]
    pub fn component_names(&self, entity: Entity) -> Vec<&'static str> {
        self.records
            .get(&entity)
            .map(|record| record.components.type_names())
            .unwrap_or_default()
    }

    /// Returns all live entities in ascending id order.
    pub fn entities(&self) -> impl Iterator<Item = Entity> + '_ {
        self.records.keys().copied()
    }

    /// Returns all live entities carrying a component of type `T`, in
    /// ascending id order.
    #[must_use]
    pub fn entities_with<T: Component>(&self) -> Vec<Entity> {
        self.records
            .iter()
            .filter(|(_, record)| record.components.contains::<T>())
            .map(|(&entity, _)| entity)
            .collect()
    }

    /// Returns the number of live entities.
    #[must_use]
    pub fn entity_count(&self) -> usize {
        self.records.len()
    }

    /// Drop every entity. Ids keep increasing afterwards.
    pub fn clear(&mut self) {
        self.records.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    struct Health(f32);

    impl Component for Health {
        fn type_name() -> &'static str {
            "Health"
        }
    }

    /// Shares the "Health" tag with [`Health`].
    #[derive(Debug, Clone, PartialEq)]
    struct HealthV2(u32);

    impl Component for HealthV2 {
        fn type_name() -> &'static str {
            "Health"
        }
    }

    #[derive(Debug, Clone, PartialEq)]
    struct Marker;

    impl Component for Marker {
        fn type_name() -> &'static str {
            "Marker"
        }
    }

    #[test]
    fn test_create_assigns_fresh_ids() {
        let mut registry = EntityRegistry::new();
        let a = registry.create("a");
        let b = registry.create("b");
        assert_ne!(a, b);
        assert!(a.is_valid() && b.is_valid());
        assert_eq!(registry.tag(a), Some("a"));
        assert_eq!(registry.entity_count(), 2);
    }

    #[test]
    fn test_component_lookup_after_add_and_remove() {
        let mut registry = EntityRegistry::new();
        let e = registry.create("player");
        assert!(registry.add_component(e, Health(5.0)));
        assert_eq!(registry.component::<Health>(e), Some(&Health(5.0)));

        assert_eq!(registry.remove_component::<Health>(e), Some(Health(5.0)));
        assert!(registry.component::<Health>(e).is_none());
    }

    #[test]
    fn test_remove_component_deletes_tag_entry_of_other_type() {
        let mut registry = EntityRegistry::new();
        let e = registry.create("player");
        registry.add_component(e, Health(1.0));

        assert!(registry.remove_component::<HealthV2>(e).is_none());
        assert!(registry.component_names(e).is_empty());
        assert!(!registry.has_component::<Health>(e));
    }

    #[test]
    fn test_overwrite_keeps_single_component() {
        let mut registry = EntityRegistry::new();
        let e = registry.create("player");
        registry.add_component(e, Health(5.0));
        registry.add_component(e, Health(9.0));
        assert_eq!(registry.component::<Health>(e), Some(&Health(9.0)));
        assert_eq!(registry.component_names(e), vec!["Health"]);
    }

    #[test]
    fn test_missing_entity_is_not_found() {
        let mut registry = EntityRegistry::new();
        let ghost = Entity::from_raw(99);
        assert!(!registry.add_component(ghost, Health(1.0)));
        assert!(registry.component::<Health>(ghost).is_none());
        assert!(registry.component_mut::<Health>(ghost).is_none());
        assert!(registry.remove_component::<Health>(ghost).is_none());
        assert!(registry.remove(ghost).is_none());
        assert!(registry.component_names(ghost).is_empty());
    }

    #[test]
    fn test_remove_releases_components() {
        let mut registry = EntityRegistry::new();
        let e = registry.create("crate");
        registry.add_component(e, Health(1.0));
        let record = registry.remove(e);
        assert!(record.is_some_and(|r| r.components.contains::<Health>()));
        assert!(!registry.contains(e));
        assert!(registry.component::<Health>(e).is_none());
    }

    #[test]
    fn test_ids_not_reused_after_remove() {
        let mut registry = EntityRegistry::new();
        let a = registry.create("a");
        registry.remove(a);
        let b = registry.create("b");
        registry.add_component(b, Health(2.0));
        assert!(b.id() > a.id());
        // The stale handle must not reach the newer entity.
        assert!(!registry.contains(a));
        assert!(registry.component::<Health>(a).is_none());
    }

    #[test]
    fn test_entities_with() {
        let mut registry = EntityRegistry::new();
        let a = registry.create("a");
        let b = registry.create("b");
        let c = registry.create("c");
        registry.add_component(a, Marker);
        registry.add_component(c, Marker);
        registry.add_component(b, Health(1.0));
        assert_eq!(registry.entities_with::<Marker>(), vec![a, c]);
        assert_eq!(registry.entities().collect::<Vec<_>>(), vec![a, b, c]);
        assert!(registry.has_component::<Health>(b));
    }
}
