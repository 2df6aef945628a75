//! 2D space component.
//!
//! [`SpaceComponent`] places an entity in the world as a rectangle. Collision,
//! audio positioning and level rendering all read it.

use engine_component::Component;
use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::Point;
use crate::aabb::Aabb;

/// Position and size of an entity's rectangle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SpaceComponent {
    /// Minimum corner of the rectangle.
    pub position: Point,
    /// Extent along x.
    pub width: f32,
    /// Extent along y.
    pub height: f32,
}

impl SpaceComponent {
    /// Create a space component.
    #[must_use]
    pub fn new(position: Point, width: f32, height: f32) -> Self {
        Self {
            position,
            width,
            height,
        }
    }

    /// The entity's rectangle: `position` to `position + (width, height)`.
    #[must_use]
    pub fn aabb(&self) -> Aabb {
        Aabb::from_position_size(self.position, Vec2::new(self.width, self.height))
    }

    /// Centre of the rectangle.
    #[must_use]
    pub fn center(&self) -> Point {
        self.position + Vec2::new(self.width / 2.0, self.height / 2.0)
    }
}

impl Component for SpaceComponent {
    fn type_name() -> &'static str {
        "SpaceComponent"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_aabb_from_position_and_size() {
        let space = SpaceComponent::new(Vec2::new(5.0, 5.0), 10.0, 20.0);
        let aabb = space.aabb();
        assert_eq!(aabb.min, Vec2::new(5.0, 5.0));
        assert_eq!(aabb.max, Vec2::new(15.0, 25.0));
    }

    #[test]
    fn test_center() {
        let space = SpaceComponent::new(Vec2::new(0.0, 10.0), 4.0, 6.0);
        assert_eq!(space.center(), Vec2::new(2.0, 13.0));
    }

    #[test]
    fn test_type_name() {
        assert_eq!(SpaceComponent::type_name(), "SpaceComponent");
    }
}
