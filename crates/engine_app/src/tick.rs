//! Fixed-rate frame loop.
//!
//! Each tick:
//!
//! 1. Run [`World::update`] with the fixed tick duration.
//! 2. Present the frame.
//! 3. Poll platform events into the world's input state.
//!
//! The loop stops after `max_ticks` ticks (0 = unlimited) or when the
//! platform asks to close.

use std::time::Instant;

use engine_system::{EngineConfig, World};
use tracing::{debug, info, warn};

use crate::platform::Platform;

/// Drives a [`World`] at the configured tick rate.
#[derive(Debug)]
pub struct TickLoop<P> {
    config: EngineConfig,
    world: World,
    platform: P,
}

impl<P: Platform> TickLoop<P> {
    /// Create a tick loop around an already populated world.
    #[must_use]
    pub fn new(config: EngineConfig, world: World, platform: P) -> Self {
        Self {
            config,
            world,
            platform,
        }
    }

    /// Returns the number of ticks run so far.
    #[must_use]
    pub fn tick_id(&self) -> u64 {
        self.world.tick_id()
    }

    /// Returns a reference to the world.
    #[must_use]
    pub fn world(&self) -> &World {
        &self.world
    }

    /// Returns a mutable reference to the world.
    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    #[must_use]
    pub fn platform(&self) -> &P {
        &self.platform
    }

    /// Run one tick of the simulation.
    pub fn tick(&mut self, dt: f32) {
        self.world.update(dt);
        self.platform.present(&self.world);
        self.platform.poll_events(self.world.input_mut());
        debug!(tick_id = self.world.tick_id(), dt, "tick complete");
    }

    /// Run until the tick limit is reached or the platform closes. Returns
    /// the number of ticks run by this call.
    pub fn run(&mut self) -> u64 {
        let tick_duration = self.config.tick_duration();
        let dt = tick_duration.as_secs_f32();
        let mut tick_count = 0u64;

        info!(
            tick_rate = self.config.tick_rate,
            max_ticks = self.config.max_ticks,
            "starting tick loop"
        );

        loop {
            let start = Instant::now();

            self.tick(dt);
            tick_count += 1;

            if self.config.max_ticks > 0 && tick_count >= self.config.max_ticks {
                info!(ticks = tick_count, "tick loop complete");
                break;
            }
            if self.platform.should_close() {
                info!(ticks = tick_count, "platform closed");
                break;
            }

            let elapsed = start.elapsed();
            if elapsed < tick_duration {
                std::thread::sleep(tick_duration - elapsed);
            } else {
                warn!(
                    tick_id = self.world.tick_id(),
                    elapsed_ms = elapsed.as_millis() as u64,
                    budget_ms = tick_duration.as_millis() as u64,
                    "tick exceeded time budget"
                );
            }
        }

        tick_count
    }
}

#[cfg(test)]
mod tests {
    use engine_system::{InputState, Key};

    use super::*;
    use crate::platform::HeadlessPlatform;

    /// Closes after a fixed number of presented frames and presses a key on
    /// the first poll.
    #[derive(Default)]
    struct ScriptedPlatform {
        close_after: u64,
        presented: u64,
        polled: bool,
    }

    impl Platform for ScriptedPlatform {
        fn poll_events(&mut self, input: &mut InputState) {
            if !self.polled {
                input.set_key(Key(13), true);
                self.polled = true;
            }
        }

        fn present(&mut self, _world: &World) {
            self.presented += 1;
        }

        fn should_close(&self) -> bool {
            self.presented >= self.close_after
        }
    }

    fn fast_config(max_ticks: u64) -> EngineConfig {
        EngineConfig::default()
            .with_tick_rate(1000.0)
            .with_max_ticks(max_ticks)
    }

    #[test]
    fn test_tick_advances_counter() {
        let mut tick_loop = TickLoop::new(EngineConfig::default(), World::default(), HeadlessPlatform::default());
        assert_eq!(tick_loop.tick_id(), 0);
        tick_loop.tick(1.0 / 60.0);
        assert_eq!(tick_loop.tick_id(), 1);
        tick_loop.tick(1.0 / 60.0);
        assert_eq!(tick_loop.tick_id(), 2);
        assert_eq!(tick_loop.platform().frames(), 2);
    }

    #[test]
    fn test_run_limited_ticks() {
        let mut tick_loop = TickLoop::new(fast_config(5), World::default(), HeadlessPlatform::default());
        assert_eq!(tick_loop.run(), 5);
        assert_eq!(tick_loop.tick_id(), 5);
    }

    #[test]
    fn test_run_stops_when_platform_closes() {
        let platform = ScriptedPlatform {
            close_after: 3,
            ..ScriptedPlatform::default()
        };
        let mut tick_loop = TickLoop::new(fast_config(0), World::default(), platform);
        assert_eq!(tick_loop.run(), 3);
    }

    #[test]
    fn test_polled_input_visible_next_tick() {
        let platform = ScriptedPlatform {
            close_after: 10,
            ..ScriptedPlatform::default()
        };
        let mut tick_loop = TickLoop::new(fast_config(0), World::default(), platform);
        tick_loop.tick(0.001);
        assert!(tick_loop.world().context().input.just_pressed(Key(13)));
        tick_loop.tick(0.001);
        assert!(!tick_loop.world().context().input.just_pressed(Key(13)));
        assert!(tick_loop.world().context().input.is_down(Key(13)));
    }
}
