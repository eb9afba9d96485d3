//! Demo playback cursor
//!
//! Reads frames sequentially from a loaded recording. The cursor only
//! moves forward and never reads past the end of the data.

use crate::demo::binary::{decode_frame, parse_forced_track};
use crate::demo::error::DemoError;
use crate::demo::types::Frame;

/// Read cursor over an immutable recording
#[derive(Debug, Clone)]
pub struct PlaybackCursor {
    bytes: Box<[u8]>,
    read_offset: usize,
    frames_read: u64,
}

impl PlaybackCursor {
    /// Take ownership of a recording, positioned at its first byte
    pub fn load(bytes: impl Into<Box<[u8]>>) -> Self {
        Self {
            bytes: bytes.into(),
            read_offset: 0,
            frames_read: 0,
        }
    }

    /// Consume the leading forced track line
    ///
    /// Must be called once, before any frame is read.
    pub fn read_forced_track(&mut self) -> i32 {
        let (track, consumed) = parse_forced_track(&self.bytes[self.read_offset..]);
        self.read_offset += consumed;
        track
    }

    /// Read the next frame
    ///
    /// Returns `Ok(None)` once the recording is exhausted on a frame
    /// boundary. A frame cut short yields `Truncated`; the cursor does not
    /// move on error.
    pub fn read_next_frame(&mut self) -> Result<Option<Frame>, DemoError> {
        if !self.has_more() {
            return Ok(None);
        }

        let (frame, size) = decode_frame(&self.bytes, self.read_offset)?;
        self.read_offset += size;
        self.frames_read += 1;
        Ok(Some(frame))
    }

    /// Whether unread bytes remain
    pub fn has_more(&self) -> bool {
        self.read_offset < self.bytes.len()
    }

    pub fn read_offset(&self) -> usize {
        self.read_offset
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Frames successfully read so far
    pub fn frames_read(&self) -> u64 {
        self.frames_read
    }

    /// Playback progress (0.0 to 1.0) by bytes consumed
    pub fn progress(&self) -> f32 {
        if self.bytes.is_empty() {
            return 1.0;
        }
        self.read_offset as f32 / self.bytes.len() as f32
    }
}
