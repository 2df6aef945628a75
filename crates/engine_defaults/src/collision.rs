//! AABB collision detection and push-out.
//!
//! Every frame, each member entity whose [`CollisionComponent`] is `main`
//! scans the other members of the system. For every strict overlap between
//! padded boxes a [`CollisionMessage`] is dispatched; when both parties are
//! `solid`, the scanning entity is moved out along the minimum translation.
//! The other entity is never moved.

use engine_bus::Message;
use engine_component::{Component, Entity, EntityRegistry};
use engine_math::{Point, SpaceComponent, is_intersecting, minimum_translation};
use engine_system::{Context, Frame, System};
use serde::{Deserialize, Serialize};
use tracing::trace;

/// Collision settings for an entity.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct CollisionComponent {
    /// Takes part in push-out.
    pub solid: bool,
    /// Actively scans for collisions instead of only being scanned.
    pub main: bool,
    /// Total padding added to the box; half goes on each side.
    pub extra: Point,
}

impl Component for CollisionComponent {
    fn type_name() -> &'static str {
        "CollisionComponent"
    }
}

/// Marker for the one entity allowed privileged collision behaviour.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollisionMasterComponent;

impl Component for CollisionMasterComponent {
    fn type_name() -> &'static str {
        "CollisionMasterComponent"
    }
}

/// Sent once per overlapping pair per frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CollisionMessage {
    /// The scanning entity.
    pub entity: Entity,
    /// The entity it overlaps.
    pub to: Entity,
}

impl CollisionMessage {
    /// Message tag to listen on.
    pub const TYPE: &'static str = "CollisionMessage";
}

impl Message for CollisionMessage {
    fn type_name(&self) -> &'static str {
        Self::TYPE
    }
}

/// Detects overlaps among its members and resolves solid ones.
#[derive(Debug, Default)]
pub struct CollisionSystem;

impl CollisionSystem {
    /// System tag entities join to take part in collision.
    pub const TYPE: &'static str = "CollisionSystem";

    /// Create the system; it keeps no state of its own.
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// The single member carrying [`CollisionMasterComponent`], or `None`
    /// when there is no such member or more than one.
    #[must_use]
    pub fn master(registry: &EntityRegistry, members: &[Entity]) -> Option<Entity> {
        let mut masters = members
            .iter()
            .copied()
            .filter(|&entity| registry.has_component::<CollisionMasterComponent>(entity));
        match (masters.next(), masters.next()) {
            (Some(master), None) => Some(master),
            _ => None,
        }
    }
}

impl System for CollisionSystem {
    fn type_name(&self) -> &'static str {
        Self::TYPE
    }

    fn update(&mut self, entity: Entity, frame: &Frame<'_>, ctx: &mut Context) {
        let Some(&collision) = ctx.component::<CollisionComponent>(entity) else {
            return;
        };
        if !collision.main || !ctx.registry.has_component::<SpaceComponent>(entity) {
            return;
        }

        for other in frame.others(entity) {
            let (Some(&other_space), Some(&other_collision)) = (
                ctx.component::<SpaceComponent>(other),
                ctx.component::<CollisionComponent>(other),
            ) else {
                continue;
            };
            let Some(space) = ctx.component_mut::<SpaceComponent>(entity) else {
                return;
            };

            // Recomputed per pair so earlier push-outs are taken into account.
            let entity_aabb = space.aabb().padded(collision.extra);
            let other_aabb = other_space.aabb().padded(other_collision.extra);
            if !is_intersecting(&entity_aabb, &other_aabb) {
                continue;
            }

            if collision.solid && other_collision.solid {
                let mtd = minimum_translation(&entity_aabb, &other_aabb);
                space.position += mtd;
                trace!(%entity, %other, x = mtd.x, y = mtd.y, "pushed out of solid");
            }

            ctx.dispatch(CollisionMessage { entity, to: other });
        }
    }
}
