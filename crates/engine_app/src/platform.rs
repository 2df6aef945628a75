//! Window and input collaborators driven by the tick loop.

use engine_system::{InputState, World};

/// The host environment around the world: presents frames and feeds input.
pub trait Platform {
    /// Copy pending device events into `input`. Called after each update.
    fn poll_events(&mut self, input: &mut InputState);

    /// Show the frame the world just produced.
    fn present(&mut self, world: &World);

    /// Returns `true` once the user asked to quit.
    fn should_close(&self) -> bool;
}

/// A platform with no window and no devices.
#[derive(Debug, Default)]
pub struct HeadlessPlatform {
    frames: u64,
}

impl HeadlessPlatform {
    /// Number of frames presented so far.
    #[must_use]
    pub fn frames(&self) -> u64 {
        self.frames
    }
}

impl Platform for HeadlessPlatform {
    fn poll_events(&mut self, _input: &mut InputState) {}

    fn present(&mut self, _world: &World) {
        self.frames += 1;
    }

    fn should_close(&self) -> bool {
        false
    }
}
