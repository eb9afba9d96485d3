//! Demo recording and playback
//!
//! A demo is the server-to-client message stream of a session, captured
//! to a file and replayed later in place of the network.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │                    Recording Mode                         │
//! │ outgoing message → Recorder → RecordingBuffer → exporter  │
//! └──────────────────────────────────────────────────────────┘
//!
//! ┌──────────────────────────────────────────────────────────┐
//! │                    Playback Mode                          │
//! │ .dem → PlaybackCursor → timing gate → get_next_message    │
//! └──────────────────────────────────────────────────────────┘
//!
//! ┌──────────────────────────────────────────────────────────┐
//! │                    Live Mode                              │
//! │ LiveTransport → keepalive filter → get_next_message       │
//! └──────────────────────────────────────────────────────────┘
//! ```
//!
//! # Usage
//!
//! ```ignore
//! use demostream_core::demo::{DemoSession, NextMessage, RecordRequest, TickContext};
//!
//! let mut session = DemoSession::new(config);
//! session.play_demo("demo1", &store, &mut client)?;
//!
//! // Once per host frame:
//! match session.get_next_message(&tick, &mut transport)? {
//!     NextMessage::Delivered(message) => parse(&message.payload),
//!     NextMessage::NoMessageYet => {}
//!     NextMessage::EndOfStream | NextMessage::Closed => next_demo(),
//! }
//! ```

pub mod binary;
pub mod buffer;
pub mod error;
pub mod host;
pub mod runtime;
pub mod session;
pub mod source;
pub mod store;
pub mod types;

// Re-export core types
pub use types::{
    FRAME_HEADER_SIZE, Frame, FrameHeader, HostClock, MAX_MESSAGE_LENGTH, SVC_DISCONNECT, SVC_NOP,
    SessionMode, TickContext, ViewAngles,
};

pub use buffer::RecordingBuffer;
pub use error::DemoError;
pub use host::{
    ClientControl, DemoExporter, DemoLoader, DetachedClient, LiveTransport, NullTransport,
    Received,
};
pub use runtime::{
    BenchmarkCounters, BenchmarkReport, FinishedRecording, PlaybackCursor, Recorder,
    RecorderConfig,
};
pub use session::{DemoSession, RecordRequest, RecordingSummary};
pub use source::{Message, MessageSource, NextMessage};
pub use store::{DirectoryStore, MemoryStore};
