//! Shared test utilities for unit tests

use std::collections::VecDeque;

use glam::Vec3;

use crate::demo::binary::{encode_frame, forced_track_line};
use crate::demo::host::{LiveTransport, Received};

/// Transport that replays a fixed list of poll results
///
/// Reports `NoMessage` once the script runs out.
#[derive(Debug, Default)]
pub struct ScriptedTransport {
    script: VecDeque<Received>,
    pub polls: usize,
}

impl ScriptedTransport {
    pub fn new(script: impl IntoIterator<Item = Received>) -> Self {
        Self {
            script: script.into_iter().collect(),
            polls: 0,
        }
    }

    /// Poll results not yet handed out
    pub fn remaining(&self) -> usize {
        self.script.len()
    }
}

impl LiveTransport for ScriptedTransport {
    fn get_message(&mut self) -> Received {
        self.polls += 1;
        self.script.pop_front().unwrap_or(Received::NoMessage)
    }
}

/// Build a recording from a forced track and frame payloads
pub fn build_demo(track: i32, frames: &[(&[u8], Vec3)]) -> Vec<u8> {
    let mut bytes = forced_track_line(track).into_bytes();
    for (payload, orientation) in frames {
        bytes.extend(encode_frame(payload, *orientation));
    }
    bytes
}
