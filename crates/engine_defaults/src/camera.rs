//! Camera notifications.

use engine_bus::Message;

/// Broadcast when the camera moves. Coordinates are in world pixels; `z` is
/// the zoom height.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraMessage {
    pub x: f32,
    pub y: f32,
    /// Zoom height.
    pub z: f32,
}

impl CameraMessage {
    /// Message tag to listen on.
    pub const TYPE: &'static str = "CameraMessage";
}

impl Message for CameraMessage {
    fn type_name(&self) -> &'static str {
        Self::TYPE
    }
}
