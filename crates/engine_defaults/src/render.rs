//! The drawing interface used by levels.
//!
//! The engine core does not rasterise anything. Code that wants to draw
//! pushes [`DrawCall`]s into a [`RenderBatch`] supplied by the platform.

use engine_math::{Point, Vec2};
use serde::{Deserialize, Serialize};

/// Identifies a texture owned by the platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TextureId(pub u32);

/// A loaded texture and its pixel size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Texture {
    pub id: TextureId,
    pub width: u32,
    pub height: u32,
}

/// A rectangle of a texture, in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Region {
    pub texture: TextureId,
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

/// One textured quad.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DrawCall {
    pub region: Region,
    pub position: Point,
    pub origin: Point,
    pub scale: Vec2,
    /// Degrees.
    pub rotation: f32,
    /// `0xRRGGBB`.
    pub tint: u32,
    pub alpha: f32,
}

impl DrawCall {
    /// Draw `region` at `position` with no transform and no tint.
    #[must_use]
    pub fn at(region: Region, position: Point) -> Self {
        Self {
            region,
            position,
            origin: Vec2::ZERO,
            scale: Vec2::ONE,
            rotation: 0.0,
            tint: 0xff_ffff,
            alpha: 1.0,
        }
    }
}

/// Receives draw calls for one frame.
pub trait RenderBatch {
    fn draw(&mut self, call: DrawCall);
}

impl RenderBatch for Vec<DrawCall> {
    fn draw(&mut self, call: DrawCall) {
        self.push(call);
    }
}
