//! Demo scene: a box slides into a wall and is held against it.

use std::cell::Cell;
use std::rc::Rc;

use engine_component::{Component, Entity};
use engine_defaults::{CollisionComponent, CollisionMessage, CollisionSystem};
use engine_math::{Point, SpaceComponent, Vec2};
use engine_system::{Context, Frame, System, World};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

/// Linear velocity in pixels per second.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Velocity(pub Point);

impl Component for Velocity {
    fn type_name() -> &'static str {
        "Velocity"
    }
}

/// Integrates [`Velocity`] into [`SpaceComponent`] positions.
#[derive(Debug, Default)]
pub struct MovementSystem;

impl MovementSystem {
    pub const TYPE: &'static str = "MovementSystem";
}

impl System for MovementSystem {
    fn type_name(&self) -> &'static str {
        Self::TYPE
    }

    // Move before collision resolves.
    fn priority(&self) -> i32 {
        -10
    }

    fn update(&mut self, entity: Entity, frame: &Frame<'_>, ctx: &mut Context) {
        let Some(&Velocity(velocity)) = ctx.component::<Velocity>(entity) else {
            return;
        };
        if let Some(space) = ctx.component_mut::<SpaceComponent>(entity) {
            space.position += velocity * frame.dt;
        }
    }
}

/// Entities created by [`build`].
#[derive(Debug, Clone)]
pub struct Scene {
    pub mover: Entity,
    pub wall: Entity,
    /// Number of collision messages seen so far.
    pub collisions: Rc<Cell<u64>>,
}

/// Register the demo systems and spawn the scene.
pub fn build(world: &mut World) -> Scene {
    world.add_system(MovementSystem);
    world.add_system(CollisionSystem::new());

    let mover = world.create_entity("mover", &[MovementSystem::TYPE, CollisionSystem::TYPE]);
    world.add_component(mover, SpaceComponent::new(Vec2::ZERO, 20.0, 20.0));
    world.add_component(mover, Velocity(Vec2::new(120.0, 0.0)));
    world.add_component(
        mover,
        CollisionComponent {
            solid: true,
            main: true,
            extra: Vec2::ZERO,
        },
    );

    let wall = world.create_entity("wall", &[CollisionSystem::TYPE]);
    world.add_component(wall, SpaceComponent::new(Vec2::new(100.0, -50.0), 20.0, 120.0));
    world.add_component(
        wall,
        CollisionComponent {
            solid: true,
            main: false,
            extra: Vec2::ZERO,
        },
    );

    let collisions = Rc::new(Cell::new(0));
    {
        let collisions = Rc::clone(&collisions);
        world
            .mailbox()
            .listen_to::<CollisionMessage, _>(CollisionMessage::TYPE, move |msg| {
                if collisions.get() == 0 {
                    info!(entity = %msg.entity, to = %msg.to, "first collision");
                }
                collisions.set(collisions.get() + 1);
                debug!(entity = %msg.entity, to = %msg.to, "collision");
            });
    }

    info!(
        entities = world.registry().entity_count(),
        systems = ?world.system_names(),
        "demo scene built"
    );
    Scene {
        mover,
        wall,
        collisions,
    }
}
