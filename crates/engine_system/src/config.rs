//! Engine configuration.
//!
//! [`EngineConfig`] is read from JSON (every field optional) and then
//! overridden by command-line flags in the binary.

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Window size used when no platform window exists.
pub const HEADLESS_WIDTH: f32 = 800.0;
/// Window size used when no platform window exists.
pub const HEADLESS_HEIGHT: f32 = 800.0;

/// Size of the drawable area, in pixels. Systems normalise screen-space
/// positions against it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Viewport {
    /// Width in pixels.
    pub width: f32,
    /// Height in pixels.
    pub height: f32,
}

impl Viewport {
    /// Create a viewport of the given size.
    #[must_use]
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(HEADLESS_WIDTH, HEADLESS_HEIGHT)
    }
}

/// Configuration for the frame loop and world.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Target ticks per second.
    pub tick_rate: f64,
    /// Maximum number of ticks to run (0 = unlimited).
    pub max_ticks: u64,
    /// Drawable area.
    pub viewport: Viewport,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            tick_rate: 60.0,
            max_ticks: 0,
            viewport: Viewport::default(),
        }
    }
}

impl EngineConfig {
    /// Parse a config from a JSON string and validate it.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] for malformed JSON and
    /// [`ConfigError::Invalid`] for out-of-range values.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Read and parse a JSON config file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read, otherwise as
    /// [`EngineConfig::from_json_str`].
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&json)
    }

    /// Override the tick rate.
    #[must_use]
    pub fn with_tick_rate(mut self, tick_rate: f64) -> Self {
        self.tick_rate = tick_rate;
        self
    }

    /// Override the tick limit.
    #[must_use]
    pub fn with_max_ticks(mut self, max_ticks: u64) -> Self {
        self.max_ticks = max_ticks;
        self
    }

    /// Override the viewport.
    #[must_use]
    pub fn with_viewport(mut self, viewport: Viewport) -> Self {
        self.viewport = viewport;
        self
    }

    /// Check value ranges.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] if the tick rate or a viewport
    /// dimension is not a positive finite number.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.tick_rate.is_finite() && self.tick_rate > 0.0) {
            return Err(ConfigError::Invalid(format!(
                "tick_rate must be positive, got {}",
                self.tick_rate
            )));
        }
        let Viewport { width, height } = self.viewport;
        if !(width.is_finite() && width > 0.0 && height.is_finite() && height > 0.0) {
            return Err(ConfigError::Invalid(format!(
                "viewport must have a positive size, got {width}x{height}"
            )));
        }
        Ok(())
    }

    /// Duration of one tick at the configured rate.
    #[must_use]
    pub fn tick_duration(&self) -> Duration {
        Duration::from_secs_f64(1.0 / self.tick_rate)
    }
}
