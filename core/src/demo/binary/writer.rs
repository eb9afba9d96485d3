//! Binary demo format writer

use byteorder::{ByteOrder, LittleEndian, WriteBytesExt};
use glam::Vec3;
use std::io::{self, Write};

use crate::demo::types::{FRAME_HEADER_SIZE, Frame};

/// Encode the 16-byte frame header
///
/// Length first, then pitch/yaw/roll, all little-endian.
pub fn encode_header(payload_length: i32, orientation: Vec3) -> [u8; FRAME_HEADER_SIZE] {
    let mut header = [0u8; FRAME_HEADER_SIZE];
    LittleEndian::write_i32(&mut header[0..4], payload_length);
    LittleEndian::write_f32(&mut header[4..8], orientation.x);
    LittleEndian::write_f32(&mut header[8..12], orientation.y);
    LittleEndian::write_f32(&mut header[12..16], orientation.z);
    header
}

/// Encode a complete frame (header followed by payload)
///
/// The payload is not inspected. Callers keep it within
/// [`MAX_MESSAGE_LENGTH`](crate::demo::types::MAX_MESSAGE_LENGTH) or the
/// frame will be rejected on playback.
pub fn encode_frame(payload: &[u8], orientation: Vec3) -> Vec<u8> {
    let mut out = Vec::with_capacity(FRAME_HEADER_SIZE + payload.len());
    out.extend_from_slice(&encode_header(payload.len() as i32, orientation));
    out.extend_from_slice(payload);
    out
}

/// Text line that opens every recording
pub fn forced_track_line(track: i32) -> String {
    format!("{track}\n")
}

/// Streaming writer for demo files
pub struct FrameWriter<W: Write> {
    writer: W,
    frames_written: u64,
}

impl<W: Write> FrameWriter<W> {
    /// Create a new frame writer
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            frames_written: 0,
        }
    }

    /// Write the leading forced track line
    pub fn write_forced_track(&mut self, track: i32) -> io::Result<()> {
        self.writer.write_all(forced_track_line(track).as_bytes())
    }

    /// Write one frame
    pub fn write_frame(&mut self, frame: &Frame) -> io::Result<()> {
        self.writer
            .write_i32::<LittleEndian>(frame.payload.len() as i32)?;
        self.writer.write_f32::<LittleEndian>(frame.orientation.x)?;
        self.writer.write_f32::<LittleEndian>(frame.orientation.y)?;
        self.writer.write_f32::<LittleEndian>(frame.orientation.z)?;
        self.writer.write_all(&frame.payload)?;
        self.frames_written += 1;
        Ok(())
    }

    /// Number of frames written so far
    pub fn frames_written(&self) -> u64 {
        self.frames_written
    }

    /// Consume the writer and return the inner writer
    pub fn into_inner(self) -> W {
        self.writer
    }
}
