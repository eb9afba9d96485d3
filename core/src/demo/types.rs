//! Core types for the demo system
//!
//! Data structures shared by the binary codec, the recorder, the playback
//! cursor and the session controller.

use glam::Vec3;

pub use demostream_shared::MAX_MESSAGE_LENGTH;

/// Size of the per-frame header: payload length + three orientation floats
pub const FRAME_HEADER_SIZE: usize = 4 + 3 * 4;

/// Initial recording buffer capacity (64 KiB)
pub const DEFAULT_BUFFER_CAPACITY: usize = 64 * 1024;

/// Forced track written when a recording doesn't request one
pub const NO_FORCED_TRACK: i32 = -1;

/// Server-to-client no-op command byte (keepalive when sent alone)
pub const SVC_NOP: u8 = 1;

/// Server-to-client disconnect command byte
pub const SVC_DISCONNECT: u8 = 2;

/// Decoded frame header
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameHeader {
    /// Payload length in bytes (validated against [`MAX_MESSAGE_LENGTH`])
    pub payload_length: usize,
    /// View orientation at capture time (pitch, yaw, roll)
    pub orientation: Vec3,
}

/// One length-prefixed unit of the demo stream
#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    /// View orientation at capture time
    pub orientation: Vec3,
    /// Opaque protocol message bytes
    pub payload: Vec<u8>,
}

impl Frame {
    pub fn new(payload: impl Into<Vec<u8>>, orientation: Vec3) -> Self {
        Self {
            orientation,
            payload: payload.into(),
        }
    }

    /// Total encoded size (header + payload)
    pub fn encoded_len(&self) -> usize {
        FRAME_HEADER_SIZE + self.payload.len()
    }

    /// Whether this frame is a lone `svc_nop` keepalive
    pub fn is_keepalive(&self) -> bool {
        is_keepalive(&self.payload)
    }
}

/// A lone `svc_nop` byte is transport noise, not a protocol message
pub fn is_keepalive(payload: &[u8]) -> bool {
    payload == [SVC_NOP]
}

/// Which side of the demo system is active
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SessionMode {
    /// Live play, nothing being captured
    #[default]
    Idle,
    /// Live play with outgoing messages captured into a recording
    Recording,
    /// Replaying a recording gated on simulation time
    Playing,
    /// Replaying a recording one frame per host frame (timedemo)
    Benchmarking,
}

impl SessionMode {
    /// Whether messages come from a recording instead of the network
    pub fn is_playback(self) -> bool {
        matches!(self, SessionMode::Playing | SessionMode::Benchmarking)
    }
}

impl std::fmt::Display for SessionMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Idle => write!(f, "idle"),
            Self::Recording => write!(f, "recording"),
            Self::Playing => write!(f, "playing"),
            Self::Benchmarking => write!(f, "benchmarking"),
        }
    }
}

/// Per-tick inputs from the host loop
///
/// Gathered by the caller once per simulated frame and handed to
/// `DemoSession::get_next_message`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct TickContext {
    /// Host frame counter (monotonic, one per rendered frame)
    pub frame: u64,
    /// Wall-clock seconds since host start
    pub realtime: f64,
    /// Current simulation time
    pub sim_time: f64,
    /// Server time stamped on the most recently parsed message
    pub last_message_time: f64,
    /// Whether the sign-on handshake has completed
    pub fully_connected: bool,
}

impl TickContext {
    /// Host clock portion of the context (used when stopping playback)
    pub fn clock(&self) -> HostClock {
        HostClock {
            frame: self.frame,
            realtime: self.realtime,
        }
    }
}

/// Host frame counter and wall clock
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct HostClock {
    pub frame: u64,
    pub realtime: f64,
}

/// Current and previous view angles read from playback
///
/// The previous slot lets the caller interpolate between demo frames.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ViewAngles {
    pub current: Vec3,
    pub previous: Vec3,
}

impl ViewAngles {
    /// Shift `current` into `previous` and store the new orientation
    pub fn push(&mut self, orientation: Vec3) {
        self.previous = self.current;
        self.current = orientation;
    }
}
