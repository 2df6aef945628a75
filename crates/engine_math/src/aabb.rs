//! Axis-aligned bounding boxes.
//!
//! [`Aabb`] is the rectangle the collision system tests against. The two
//! routines here are pure functions:
//!
//! - [`is_intersecting`]: strict overlap; boxes sharing only an edge do not
//!   intersect.
//! - [`minimum_translation`]: the single-axis displacement that moves the
//!   first box out of the second.

use glam::Vec2;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// An axis-aligned box given by its minimum and maximum corners.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Aabb {
    /// Minimum corner (smallest x and y).
    pub min: Vec2,
    /// Maximum corner (largest x and y).
    pub max: Vec2,
}

impl Aabb {
    /// Create a box from its corners.
    #[must_use]
    pub const fn new(min: Vec2, max: Vec2) -> Self {
        Self { min, max }
    }

    /// Create a box from a position (minimum corner) and a size.
    #[must_use]
    pub fn from_position_size(position: Vec2, size: Vec2) -> Self {
        Self {
            min: position,
            max: position + size,
        }
    }

    /// Expand the box by `extra / 2` on every side, so the total width grows
    /// by `extra.x` and the total height by `extra.y`.
    #[must_use]
    pub fn padded(self, extra: Vec2) -> Self {
        let offset = extra / 2.0;
        Self {
            min: self.min - offset,
            max: self.max + offset,
        }
    }

    /// Move the box by `offset`.
    #[must_use]
    pub fn translated(self, offset: Vec2) -> Self {
        Self {
            min: self.min + offset,
            max: self.max + offset,
        }
    }

    /// Width and height of the box.
    #[must_use]
    pub fn size(&self) -> Vec2 {
        self.max - self.min
    }

    /// Strict overlap test against `other`. See [`is_intersecting`].
    #[must_use]
    pub fn intersects(&self, other: &Aabb) -> bool {
        is_intersecting(self, other)
    }
}

/// Returns `true` if the two boxes strictly overlap.
///
/// Touching edges (equal coordinates) do not count as intersecting.
#[must_use]
pub fn is_intersecting(a: &Aabb, b: &Aabb) -> bool {
    a.max.x > b.min.x && a.min.x < b.max.x && a.max.y > b.min.y && a.min.y < b.max.y
}

/// Minimum translation distance that pushes `a` out of `b`.
///
/// Per axis the candidate with the smaller magnitude is chosen; then the
/// axis needing the larger displacement is zeroed so resolution is always
/// along a single axis. When both axes need the same displacement the X
/// component is zeroed.
///
/// Boxes that do not overlap return [`Vec2::ZERO`].
#[must_use]
pub fn minimum_translation(a: &Aabb, b: &Aabb) -> Vec2 {
    let left = b.min.x - a.max.x;
    let right = b.max.x - a.min.x;
    let top = b.min.y - a.max.y;
    let bottom = b.max.y - a.min.y;

    if left > 0.0 || right < 0.0 || top > 0.0 || bottom < 0.0 {
        debug!(?a, ?b, "boxes are not intersecting; no translation");
        return Vec2::ZERO;
    }

    let mut mtd = Vec2::new(
        if left.abs() < right { left } else { right },
        if top.abs() < bottom { top } else { bottom },
    );

    if mtd.x.abs() < mtd.y.abs() {
        mtd.y = 0.0;
    } else {
        mtd.x = 0.0;
    }

    mtd
}
