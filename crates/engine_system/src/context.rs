//! State shared with systems during initialisation and update.

use engine_bus::{Mailbox, Message};
use engine_component::{Component, Entity, EntityRegistry};

use crate::command::Command;
use crate::config::Viewport;
use crate::input::InputState;

/// Everything a system may touch besides itself.
///
/// Component reads and writes go straight to the registry. Changes to
/// entity lifetime or system membership are queued as [`Command`]s and
/// applied by the world between per-entity steps.
#[derive(Debug)]
pub struct Context {
    /// Entities and their components.
    pub registry: EntityRegistry,
    /// The world's message bus.
    pub mailbox: Mailbox,
    /// Input for the current frame.
    pub input: InputState,
    /// Drawable area.
    pub viewport: Viewport,
    commands: Vec<Command>,
}

impl Context {
    /// Create an empty context.
    #[must_use]
    pub fn new(viewport: Viewport) -> Self {
        Self {
            registry: EntityRegistry::new(),
            mailbox: Mailbox::new(),
            input: InputState::new(),
            viewport,
            commands: Vec::new(),
        }
    }

    /// Look up a component on an entity.
    #[must_use]
    pub fn component<T: Component>(&self, entity: Entity) -> Option<&T> {
        self.registry.component(entity)
    }

    /// Look up a component on an entity for mutation.
    pub fn component_mut<T: Component>(&mut self, entity: Entity) -> Option<&mut T> {
        self.registry.component_mut(entity)
    }

    /// Attach or replace a component. Returns `false` if the entity is gone.
    pub fn add_component<T: Component>(&mut self, entity: Entity, component: T) -> bool {
        self.registry.add_component(entity, component)
    }

    /// Delete the entity's entry for `T`'s tag.
    pub fn remove_component<T: Component>(&mut self, entity: Entity) -> Option<T> {
        self.registry.remove_component(entity)
    }

    /// Create an entity now and queue its registration with `systems`.
    ///
    /// The entity exists immediately, so components can be attached right
    /// away; it joins the named systems once the current step finishes.
    pub fn create_entity(&mut self, tag: impl Into<String>, systems: &[&str]) -> Entity {
        let entity = self.registry.create(tag);
        for system in systems {
            self.add_entity_to_system(*system, entity);
        }
        entity
    }

    /// Queue the entity's destruction.
    pub fn remove_entity(&mut self, entity: Entity) {
        self.commands.push(Command::RemoveEntity(entity));
    }

    /// Queue adding the entity to a system.
    pub fn add_entity_to_system(&mut self, system: impl Into<String>, entity: Entity) {
        self.commands.push(Command::AddToSystem {
            system: system.into(),
            entity,
        });
    }

    /// Queue removing the entity from a system.
    pub fn remove_entity_from_system(&mut self, system: impl Into<String>, entity: Entity) {
        self.commands.push(Command::RemoveFromSystem {
            system: system.into(),
            entity,
        });
    }

    /// Broadcast a message on the world's mailbox.
    pub fn dispatch<M: Message>(&self, message: M) -> usize {
        self.mailbox.dispatch(message)
    }

    /// Commands queued since the last drain.
    #[must_use]
    pub fn pending_commands(&self) -> &[Command] {
        &self.commands
    }

    pub(crate) fn take_commands(&mut self) -> Vec<Command> {
        std::mem::take(&mut self.commands)
    }
}
