//! Error types for the system layer.
//!
//! Missing components, unknown system tags and degenerate geometry are not
//! errors anywhere in the engine; they are reported through `Option`/`bool`
//! return values. The types here cover the few genuine failures: a system
//! that cannot acquire its resources and a configuration that cannot be
//! loaded.

use std::path::PathBuf;

/// Errors raised by a system's initialisation hook.
#[derive(Debug, thiserror::Error)]
pub enum SystemError {
    /// The system could not acquire an external device.
    #[error("device unavailable: {0}")]
    Device(String),

    /// Any other initialisation failure.
    #[error("{system} failed to initialise: {reason}")]
    Init {
        /// The system's type tag.
        system: &'static str,
        /// Human-readable cause.
        reason: String,
    },
}

/// Errors that can occur while loading an [`EngineConfig`](crate::EngineConfig).
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The config file could not be read.
    #[error("failed to read config file {path}: {source}")]
    Io {
        /// The path that was read.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The config was not valid JSON for the expected shape.
    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),

    /// A value was out of range.
    #[error("invalid config: {0}")]
    Invalid(String),
}
