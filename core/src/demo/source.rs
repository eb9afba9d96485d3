//! Message source multiplexer
//!
//! One place decides where the next protocol message comes from: the live
//! transport, a recording gated on simulation time, or a recording played
//! back one frame per host frame.

use glam::Vec3;

use super::error::DemoError;
use super::host::{LiveTransport, Received};
use super::runtime::{
    BenchmarkCounters, GateDecision, PlaybackCursor, benchmark_gate, playback_gate,
};
use super::types::{TickContext, is_keepalive};

/// A protocol message handed to the caller
#[derive(Debug, Clone, PartialEq)]
pub struct Message {
    pub payload: Vec<u8>,
    /// View orientation stored with the frame (playback only)
    pub orientation: Option<Vec3>,
}

impl Message {
    pub fn live(payload: Vec<u8>) -> Self {
        Self {
            payload,
            orientation: None,
        }
    }

    pub fn recorded(payload: Vec<u8>, orientation: Vec3) -> Self {
        Self {
            payload,
            orientation: Some(orientation),
        }
    }
}

/// Outcome of asking for the next message
#[derive(Debug, Clone, PartialEq)]
pub enum NextMessage {
    /// A message is ready
    Delivered(Message),
    /// Nothing to process this tick
    NoMessageYet,
    /// The recording ran out and playback has stopped
    EndOfStream,
    /// The live connection was closed
    Closed,
}

/// Where messages currently come from
#[derive(Debug, Clone, Default)]
pub enum MessageSource {
    /// The network
    #[default]
    Live,
    /// A recording paced by simulation time
    Playback(PlaybackCursor),
    /// A recording paced one frame per host frame
    Benchmark(PlaybackCursor, BenchmarkCounters),
}

impl MessageSource {
    /// Whether messages come from a recording
    pub fn is_playback(&self) -> bool {
        !matches!(self, Self::Live)
    }

    pub fn cursor(&self) -> Option<&PlaybackCursor> {
        match self {
            Self::Live => None,
            Self::Playback(cursor) | Self::Benchmark(cursor, _) => Some(cursor),
        }
    }

    pub fn counters(&self) -> Option<&BenchmarkCounters> {
        match self {
            Self::Benchmark(_, counters) => Some(counters),
            _ => None,
        }
    }

    /// Pull the next message without touching session state
    ///
    /// Recording exhaustion comes back as `EndOfStream` and decode
    /// failures as errors; the caller decides what stopping means.
    pub fn poll<T: LiveTransport + ?Sized>(
        &mut self,
        tick: &TickContext,
        transport: &mut T,
    ) -> Result<NextMessage, DemoError> {
        match self {
            Self::Live => poll_live(transport),
            Self::Playback(cursor) => {
                if playback_gate(tick) == GateDecision::Wait {
                    return Ok(NextMessage::NoMessageYet);
                }
                read_recorded(cursor)
            }
            Self::Benchmark(cursor, counters) => {
                if benchmark_gate(tick, counters) == GateDecision::Wait {
                    return Ok(NextMessage::NoMessageYet);
                }
                read_recorded(cursor)
            }
        }
    }
}

fn read_recorded(cursor: &mut PlaybackCursor) -> Result<NextMessage, DemoError> {
    Ok(match cursor.read_next_frame()? {
        Some(frame) => NextMessage::Delivered(Message::recorded(frame.payload, frame.orientation)),
        None => NextMessage::EndOfStream,
    })
}

fn poll_live<T: LiveTransport + ?Sized>(transport: &mut T) -> Result<NextMessage, DemoError> {
    loop {
        match transport.get_message() {
            Received::Message(payload) if is_keepalive(&payload) => {
                tracing::debug!("<-- server to client keepalive");
            }
            Received::Message(payload) => return Ok(NextMessage::Delivered(Message::live(payload))),
            Received::NoMessage => return Ok(NextMessage::NoMessageYet),
            Received::Closed => return Ok(NextMessage::Closed),
            Received::Error(e) => return Err(DemoError::Transport(e)),
        }
    }
}
