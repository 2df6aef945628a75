//! The world: registered systems, their member entities and the frame step.
//!
//! Each call to [`World::update`] runs every system in priority order. For
//! one system, the member list is copied before the pass and the system is
//! invoked once per member that is still alive. Commands queued through the
//! [`Context`] are applied after each per-entity step, which makes it safe
//! for a system to remove the entity it is processing.

use engine_bus::Mailbox;
use engine_component::{Component, Entity, EntityRegistry};
use tracing::{debug, error, info, trace, warn};

use crate::command::Command;
use crate::config::Viewport;
use crate::context::Context;
use crate::input::InputState;
use crate::system::{Frame, System};

struct SystemSlot {
    system: Box<dyn System>,
    priority: i32,
    members: Vec<Entity>,
    inert: bool,
}

/// Owns the systems, the entity registry and the mailbox.
pub struct World {
    systems: Vec<SystemSlot>,
    context: Context,
    tick_id: u64,
    scratch: Vec<Entity>,
}

impl std::fmt::Debug for World {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("World")
            .field("systems", &self.system_names())
            .field("entities", &self.context.registry.entity_count())
            .field("tick_id", &self.tick_id)
            .finish()
    }
}

impl Default for World {
    fn default() -> Self {
        Self::new(Viewport::default())
    }
}

impl World {
    /// Create an empty world.
    #[must_use]
    pub fn new(viewport: Viewport) -> Self {
        Self {
            systems: Vec::new(),
            context: Context::new(viewport),
            tick_id: 0,
            scratch: Vec::new(),
        }
    }

    /// Initialise `system` and insert it after every system of equal or
    /// lower priority.
    ///
    /// If initialisation fails the error is logged and the system stays
    /// registered but inert. A system whose tag is already registered is
    /// rejected without being initialised; returns `false` in that case.
    pub fn add_system<S: System + 'static>(&mut self, system: S) -> bool {
        let mut system: Box<dyn System> = Box::new(system);
        let name = system.type_name();
        let priority = system.priority();
        if self.slot(name).is_some() {
            warn!(system = name, "system already registered; ignoring");
            return false;
        }

        let inert = match system.init(&mut self.context) {
            Ok(()) => false,
            Err(err) => {
                error!(system = name, error = %err, "system failed to initialise; it will not run");
                true
            }
        };
        let index = self
            .systems
            .iter()
            .position(|slot| slot.priority > priority)
            .unwrap_or(self.systems.len());
        self.systems.insert(
            index,
            SystemSlot {
                system,
                priority,
                members: Vec::new(),
                inert,
            },
        );
        info!(system = name, priority, position = index, "system added");
        // Init may have queued membership for this very system.
        self.apply_commands();
        true
    }

    /// Create an entity and add it to each named system.
    ///
    /// Unknown system tags are logged and skipped.
    pub fn create_entity(&mut self, tag: impl Into<String>, systems: &[&str]) -> Entity {
        let entity = self.context.registry.create(tag);
        for system in systems {
            self.add_entity_to_system(system, entity);
        }
        entity
    }

    /// Add a live entity to a system. Returns `false` for unknown tags and
    /// dead entities. Adding an existing member is a no-op.
    pub fn add_entity_to_system(&mut self, system: &str, entity: Entity) -> bool {
        if !self.context.registry.contains(entity) {
            warn!(system, %entity, "cannot add a removed entity to a system");
            return false;
        }
        let Some(slot) = self.slot_mut(system) else {
            warn!(system, %entity, "unknown system; entity not added");
            return false;
        };
        if !slot.members.contains(&entity) {
            slot.members.push(entity);
            trace!(system, %entity, "entity joined system");
        }
        true
    }

    /// Remove an entity from one system. Returns `true` if it was a member.
    pub fn remove_entity_from_system(&mut self, system: &str, entity: Entity) -> bool {
        let Some(slot) = self.slot_mut(system) else {
            warn!(system, %entity, "unknown system; nothing removed");
            return false;
        };
        let before = slot.members.len();
        slot.members.retain(|&member| member != entity);
        slot.members.len() != before
    }

    /// Destroy an entity and drop it from every system.
    pub fn remove_entity(&mut self, entity: Entity) -> bool {
        for slot in &mut self.systems {
            slot.members.retain(|&member| member != entity);
        }
        let removed = self.context.registry.remove(entity).is_some();
        if removed {
            debug!(%entity, "entity removed");
        }
        removed
    }

    /// Run one frame: every active system over a snapshot of its members.
    pub fn update(&mut self, dt: f32) {
        self.tick_id += 1;
        let tick_id = self.tick_id;
        trace!(tick_id, dt, systems = self.systems.len(), "frame start");

        let mut members = std::mem::take(&mut self.scratch);
        for index in 0..self.systems.len() {
            if self.systems[index].inert {
                continue;
            }
            members.clear();
            members.extend_from_slice(&self.systems[index].members);

            for &entity in &members {
                if !self.context.registry.contains(entity) {
                    continue;
                }
                let frame = Frame {
                    tick_id,
                    dt,
                    members: &members,
                };
                self.systems[index]
                    .system
                    .update(entity, &frame, &mut self.context);
                self.apply_commands();
            }
        }
        self.scratch = members;
        self.context.input.end_frame();
    }

    fn apply_commands(&mut self) {
        if self.context.pending_commands().is_empty() {
            return;
        }
        for command in self.context.take_commands() {
            match command {
                Command::RemoveEntity(entity) => {
                    self.remove_entity(entity);
                }
                Command::AddToSystem { system, entity } => {
                    self.add_entity_to_system(&system, entity);
                }
                Command::RemoveFromSystem { system, entity } => {
                    self.remove_entity_from_system(&system, entity);
                }
            }
        }
    }

    fn slot_mut(&mut self, system: &str) -> Option<&mut SystemSlot> {
        self.systems
            .iter_mut()
            .find(|slot| slot.system.type_name() == system)
    }

    fn slot(&self, system: &str) -> Option<&SystemSlot> {
        self.systems
            .iter()
            .find(|slot| slot.system.type_name() == system)
    }

    /// Attach or replace a component. Returns `false` if the entity is gone.
    pub fn add_component<T: Component>(&mut self, entity: Entity, component: T) -> bool {
        self.context.add_component(entity, component)
    }

    /// Returns the entity's component of type `T`, if present.
    #[must_use]
    pub fn component<T: Component>(&self, entity: Entity) -> Option<&T> {
        self.context.component(entity)
    }

    /// Returns the entity's component of type `T` mutably, if present.
    pub fn component_mut<T: Component>(&mut self, entity: Entity) -> Option<&mut T> {
        self.context.component_mut(entity)
    }

    /// Delete the entity's entry for `T`'s tag, returning it if it is a `T`.
    pub fn remove_component<T: Component>(&mut self, entity: Entity) -> Option<T> {
        self.context.remove_component(entity)
    }

    /// Members of a system in registration order, or `None` for unknown tags.
    #[must_use]
    pub fn members(&self, system: &str) -> Option<&[Entity]> {
        self.slot(system).map(|slot| slot.members.as_slice())
    }

    /// Returns `Some(true)` if the named system failed to initialise.
    #[must_use]
    pub fn is_inert(&self, system: &str) -> Option<bool> {
        self.slot(system).map(|slot| slot.inert)
    }

    /// System tags in execution order.
    #[must_use]
    pub fn system_names(&self) -> Vec<&'static str> {
        self.systems
            .iter()
            .map(|slot| slot.system.type_name())
            .collect()
    }

    /// Number of frames run so far.
    #[must_use]
    pub fn tick_id(&self) -> u64 {
        self.tick_id
    }

    /// The shared state handed to every system.
    #[must_use]
    pub fn context(&self) -> &Context {
        &self.context
    }

    /// Mutable access to the shared state.
    pub fn context_mut(&mut self) -> &mut Context {
        &mut self.context
    }

    #[must_use]
    pub fn registry(&self) -> &EntityRegistry {
        &self.context.registry
    }

    #[must_use]
    pub fn mailbox(&self) -> &Mailbox {
        &self.context.mailbox
    }

    pub fn input_mut(&mut self) -> &mut InputState {
        &mut self.context.input
    }
}

impl Drop for World {
    fn drop(&mut self) {
        // Listeners commonly hold a clone of the mailbox.
        self.context.mailbox.clear();
    }
}
