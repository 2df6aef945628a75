//! Per-entity, type-erased component storage.
//!
//! A [`ComponentStore`] maps a [`ComponentTypeId`] to at most one boxed
//! component instance. Typed access goes through `get::<T>()` and friends,
//! which downcast the stored value and report absence with `None`.

use std::any::Any;
use std::collections::HashMap;

use crate::component::{Component, ComponentTypeId};

/// A single stored component together with its tag for diagnostics.
struct Slot {
    name: &'static str,
    value: Box<dyn Any + Send + Sync>,
}

impl std::fmt::Debug for Slot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Slot").field("name", &self.name).finish_non_exhaustive()
    }
}

/// The component set of one entity.
///
/// Invariant: at most one component per [`ComponentTypeId`].
#[derive(Debug, Default)]
pub struct ComponentStore {
    slots: HashMap<ComponentTypeId, Slot>,
}

impl ComponentStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self {
            slots: HashMap::new(),
        }
    }

    /// Store `component` under its type tag.
    ///
    /// An existing component with the same tag is replaced and returned when
    /// it has the same Rust type.
    pub fn insert<T: Component>(&mut self, component: T) -> Option<T> {
        let previous = self.slots.insert(
            T::component_type_id(),
            Slot {
                name: T::type_name(),
                value: Box::new(component),
            },
        )?;
        previous.value.downcast::<T>().ok().map(|boxed| *boxed)
    }

    /// Returns the component of type `T`, if present.
    #[must_use]
    pub fn get<T: Component>(&self) -> Option<&T> {
        self.slots
            .get(&T::component_type_id())
            .and_then(|slot| slot.value.downcast_ref::<T>())
    }

    /// Returns the component of type `T` mutably, if present.
    #[must_use]
    pub fn get_mut<T: Component>(&mut self) -> Option<&mut T> {
        self.slots
            .get_mut(&T::component_type_id())
            .and_then(|slot| slot.value.downcast_mut::<T>())
    }

    /// Remove the entry stored under `T`'s tag and return it as a `T`.
    ///
    /// The entry is dropped even when it holds a different Rust type under
    /// the same tag; `None` is returned in that case.
    pub fn remove<T: Component>(&mut self) -> Option<T> {
        let slot = self.slots.remove(&T::component_type_id())?;
        slot.value.downcast::<T>().ok().map(|boxed| *boxed)
    }

    /// Remove whatever component is stored under `type_id`.
    ///
    /// Returns `true` if an entry was removed.
    pub fn remove_by_id(&mut self, type_id: ComponentTypeId) -> bool {
        self.slots.remove(&type_id).is_some()
    }

    /// Returns `true` if a component of type `T` is stored.
    #[must_use]
    pub fn contains<T: Component>(&self) -> bool {
        self.get::<T>().is_some()
    }

    /// Returns `true` if any component is stored under `type_id`.
    #[must_use]
    pub fn contains_id(&self, type_id: ComponentTypeId) -> bool {
        self.slots.contains_key(&type_id)
    }

    /// Returns the type tags of all stored components, sorted.
    #[must_use]
    pub fn type_names(&self) -> Vec<&'static str> {
        let mut names: Vec<_> = self.slots.values().map(|slot| slot.name).collect();
        names.sort_unstable();
        names
    }

    /// Returns the number of stored components.
    #[must_use]
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Returns `true` if no component is stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Drop every stored component.
    pub fn clear(&mut self) {
        self.slots.clear();
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

    #[derive(Debug, Clone, PartialEq)]
    struct Name(String);

    impl Component for Name {
        fn type_name() -> &'static str {
            "Name"
        }
    }

    /// Shares the `"Health"` tag with [`Health`] but is a different Rust type.
    #[derive(Debug, Clone, PartialEq)]
    struct FakeHealth;

    impl Component for FakeHealth {
        fn type_name() -> &'static str {
            "Health"
        }
    }

    #[test]
    fn test_insert_then_get() {
        let mut store = ComponentStore::new();
        assert!(store.insert(Health(10.0)).is_none());
        assert_eq!(store.get::<Health>(), Some(&Health(10.0)));
        assert!(store.get::<Name>().is_none());
    }

    #[test]
    fn test_insert_overwrites_same_tag() {
        let mut store = ComponentStore::new();
        store.insert(Health(10.0));
        let previous = store.insert(Health(3.0));
        assert_eq!(previous, Some(Health(10.0)));
        assert_eq!(store.get::<Health>(), Some(&Health(3.0)));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_get_mut_mutates_in_place() {
        let mut store = ComponentStore::new();
        store.insert(Health(10.0));
        if let Some(health) = store.get_mut::<Health>() {
            health.0 -= 4.0;
        }
        assert_eq!(store.get::<Health>(), Some(&Health(6.0)));
    }

    #[test]
    fn test_remove() {
        let mut store = ComponentStore::new();
        store.insert(Health(1.0));
        store.insert(Name("crate".into()));
        assert_eq!(store.remove::<Health>(), Some(Health(1.0)));
        assert!(!store.contains::<Health>());
        assert!(store.contains::<Name>());
        assert!(store.remove::<Health>().is_none());
    }

    #[test]
    fn test_same_tag_different_type_is_not_found() {
        let mut store = ComponentStore::new();
        store.insert(Health(1.0));
        assert!(store.get::<FakeHealth>().is_none());
        assert!(store.contains_id(ComponentTypeId::from_name("Health")));
    }

    #[test]
    fn test_remove_drops_entry_for_tag_regardless_of_type() {
        let mut store = ComponentStore::new();
        store.insert(Health(1.0));
        store.insert(Name("a".into()));
        assert!(store.remove::<FakeHealth>().is_none());
        assert!(!store.contains::<Health>());
        assert!(!store.contains_id(ComponentTypeId::from_name("Health")));
        assert_eq!(store.type_names(), vec!["Name"]);
    }

    #[test]
    fn test_type_names_sorted() {
        let mut store = ComponentStore::new();
        store.insert(Name("a".into()));
        store.insert(Health(1.0));
        assert_eq!(store.type_names(), vec!["Health", "Name"]);
    }

    #[test]
    fn test_remove_by_id_and_clear() {
        let mut store = ComponentStore::new();
        store.insert(Health(1.0));
        store.insert(Name("a".into()));
        assert!(store.remove_by_id(Health::component_type_id()));
        assert!(!store.remove_by_id(Health::component_type_id()));
        store.clear();
        assert!(store.is_empty());
    }
}
