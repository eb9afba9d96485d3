//! Error types for demo recording and playback

use super::types::SessionMode;

/// Error type for the demo system
///
/// Codec errors (`Truncated`, `OversizedMessage`) end a playback session;
/// lifecycle errors (`AlreadyActive`, `NotActive`, ...) leave state untouched.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum DemoError {
    /// Stream ended in the middle of a frame
    #[error("demo stream truncated at offset {offset}: needed {needed} bytes, {available} available")]
    Truncated {
        offset: usize,
        needed: usize,
        available: usize,
    },

    /// Frame claims a payload length outside `0..=max`
    #[error("demo message length {length} outside 0..={max} at offset {offset}")]
    OversizedMessage {
        offset: usize,
        length: i64,
        max: usize,
    },

    /// Requested recording could not be found
    #[error("couldn't open {0}")]
    NotFound(String),

    /// Operation requires a different mode than the current one
    #[error("cannot start {requested}: already {current}")]
    AlreadyActive {
        current: SessionMode,
        requested: &'static str,
    },

    /// Stop requested for something that isn't running
    #[error("not {0}")]
    NotActive(&'static str),

    /// Recording names may not escape the demo directory
    #[error("relative pathnames are not allowed: {0}")]
    RelativePath(String),

    /// Client recording must start before connecting
    #[error("can not record - already connected to server")]
    AlreadyConnected,

    /// Export collaborator rejected the finished recording
    #[error("failed to export {name}: {reason}")]
    Export { name: String, reason: String },

    /// Live transport reported a failure
    #[error("transport error: {0}")]
    Transport(String),
}

impl DemoError {
    /// Whether the error means the recorded stream itself is damaged
    pub fn is_corrupt_stream(&self) -> bool {
        matches!(self, Self::OversizedMessage { .. })
    }

    /// Whether the error came from decoding the recording
    pub fn is_decode_error(&self) -> bool {
        matches!(self, Self::Truncated { .. } | Self::OversizedMessage { .. })
    }
}
