//! Error types for algoviz-vis.

use thiserror::Error;

/// Result type for playback operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised by the playback controller and its driver.
#[derive(Debug, Error)]
pub enum Error {
    /// A transport control was used before any trace was loaded.
    #[error("no trace loaded")]
    NoTrace,

    /// The controller is in the wrong state for the requested operation.
    #[error("invalid playback state: expected {expected}, got {actual}")]
    InvalidState {
        expected: &'static str,
        actual: String,
    },

    /// A configuration value could not be parsed.
    #[error("invalid value {value:?} for {key}")]
    InvalidConfig { key: &'static str, value: String },

    /// The player task has shut down.
    #[error("player task has stopped")]
    PlayerClosed,

    #[error(transparent)]
    Trace(#[from] algoviz_trace::Error),
}
