//! Demo recorder
//!
//! Captures protocol messages into a recording buffer for later export.

use glam::Vec3;

use crate::demo::binary::{encode_header, forced_track_line};
use crate::demo::buffer::RecordingBuffer;
use crate::demo::error::DemoError;
use crate::demo::types::{
    DEFAULT_BUFFER_CAPACITY, FRAME_HEADER_SIZE, MAX_MESSAGE_LENGTH, SVC_DISCONNECT,
};

/// Configuration for the recorder
#[derive(Debug, Clone)]
pub struct RecorderConfig {
    /// Export name of the recording (extension already applied)
    pub name: String,
    /// Forced audio track written at the start of the file
    pub forced_track: i32,
    /// Starting buffer capacity in bytes
    pub initial_capacity: usize,
}

impl RecorderConfig {
    pub fn new(name: impl Into<String>, forced_track: i32) -> Self {
        Self {
            name: name.into(),
            forced_track,
            initial_capacity: DEFAULT_BUFFER_CAPACITY,
        }
    }
}

/// A completed recording ready for export
#[derive(Debug, Clone, PartialEq)]
pub struct FinishedRecording {
    pub name: String,
    pub forced_track: i32,
    /// Frames written, including the closing disconnect frame
    pub frame_count: u64,
    pub bytes: Vec<u8>,
}

/// Active recording state
#[derive(Debug)]
pub struct Recorder {
    buffer: RecordingBuffer,
    forced_track: i32,
    frame_count: u64,
    last_orientation: Vec3,
}

impl Recorder {
    /// Begin a recording and write its forced track line
    pub fn start(config: RecorderConfig) -> Self {
        let mut buffer = RecordingBuffer::with_capacity(config.name, config.initial_capacity);
        buffer.append_text(&forced_track_line(config.forced_track));

        Self {
            buffer,
            forced_track: config.forced_track,
            frame_count: 0,
            last_orientation: Vec3::ZERO,
        }
    }

    /// Append one message with the view orientation it was sent under
    ///
    /// Payloads longer than [`MAX_MESSAGE_LENGTH`] are refused and nothing is
    /// written, since playback would reject them as corrupt.
    pub fn record_message(&mut self, payload: &[u8], orientation: Vec3) -> Result<(), DemoError> {
        if payload.len() > MAX_MESSAGE_LENGTH {
            return Err(DemoError::OversizedMessage {
                offset: self.buffer.write_offset(),
                length: payload.len() as i64,
                max: MAX_MESSAGE_LENGTH,
            });
        }

        // Header and payload land together so a grow never splits a frame
        self.buffer.ensure_capacity(FRAME_HEADER_SIZE + payload.len());
        self.buffer
            .append_bytes(&encode_header(payload.len() as i32, orientation));
        self.buffer.append_bytes(payload);

        self.frame_count += 1;
        self.last_orientation = orientation;
        Ok(())
    }

    /// Close the recording with a disconnect frame and hand back its bytes
    pub fn finish(mut self) -> FinishedRecording {
        let orientation = self.last_orientation;
        self.buffer.append_bytes(&encode_header(1, orientation));
        self.buffer.append_bytes(&[SVC_DISCONNECT]);
        self.frame_count += 1;

        let name = self.buffer.name().to_string();
        FinishedRecording {
            name,
            forced_track: self.forced_track,
            frame_count: self.frame_count,
            bytes: self.buffer.into_bytes(),
        }
    }

    pub fn name(&self) -> &str {
        self.buffer.name()
    }

    pub fn forced_track(&self) -> i32 {
        self.forced_track
    }

    /// Messages captured so far
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    /// Bytes written so far, including the forced track line
    pub fn bytes_written(&self) -> usize {
        self.buffer.write_offset()
    }
}
