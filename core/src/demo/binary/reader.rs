//! Binary demo format reader
//!
//! Pure decode functions over an in-memory recording. Offsets are absolute
//! positions in `source`; nothing here advances a cursor.

use byteorder::{ByteOrder, LittleEndian};
use glam::Vec3;

use crate::demo::error::DemoError;
use crate::demo::types::{FRAME_HEADER_SIZE, Frame, FrameHeader, MAX_MESSAGE_LENGTH};

/// Decode the 16-byte header at `offset`
///
/// Fails with `Truncated` if fewer than 16 bytes remain and with
/// `OversizedMessage` if the length is negative or above the maximum.
pub fn decode_header(source: &[u8], offset: usize) -> Result<FrameHeader, DemoError> {
    let header = take(source, offset, FRAME_HEADER_SIZE)?;

    let length = LittleEndian::read_i32(&header[0..4]);
    let orientation = Vec3::new(
        LittleEndian::read_f32(&header[4..8]),
        LittleEndian::read_f32(&header[8..12]),
        LittleEndian::read_f32(&header[12..16]),
    );

    let payload_length = usize::try_from(length)
        .ok()
        .filter(|&len| len <= MAX_MESSAGE_LENGTH)
        .ok_or(DemoError::OversizedMessage {
            offset,
            length: i64::from(length),
            max: MAX_MESSAGE_LENGTH,
        })?;

    Ok(FrameHeader {
        payload_length,
        orientation,
    })
}

/// Borrow `payload_length` bytes at `offset`
pub fn decode_payload(
    source: &[u8],
    offset: usize,
    payload_length: usize,
) -> Result<&[u8], DemoError> {
    take(source, offset, payload_length)
}

/// Decode a whole frame at `offset`, returning it with its encoded size
pub fn decode_frame(source: &[u8], offset: usize) -> Result<(Frame, usize), DemoError> {
    let header = decode_header(source, offset)?;
    let payload = decode_payload(source, offset + FRAME_HEADER_SIZE, header.payload_length)?;
    let frame = Frame::new(payload, header.orientation);
    Ok((frame, FRAME_HEADER_SIZE + header.payload_length))
}

/// Parse the forced track line at the start of a recording
///
/// Consumes bytes up to and including the first line feed (or to the end
/// if there is none). A `-` anywhere on the line marks the value negative;
/// every other byte accumulates as a decimal digit. The magnitude wraps
/// on overflow and the sign is applied last.
///
/// Returns the track and the number of bytes consumed.
pub fn parse_forced_track(source: &[u8]) -> (i32, usize) {
    let mut value: i32 = 0;
    let mut negative = false;
    let mut consumed = 0;

    for &byte in source {
        consumed += 1;
        match byte {
            b'\n' => break,
            b'-' => negative = true,
            _ => {
                value = value
                    .wrapping_mul(10)
                    .wrapping_add(i32::from(byte) - i32::from(b'0'));
            }
        }
    }

    if negative {
        value = value.wrapping_neg();
    }
    (value, consumed)
}

fn take(source: &[u8], offset: usize, len: usize) -> Result<&[u8], DemoError> {
    let available = source.len().saturating_sub(offset);
    if len > available {
        return Err(DemoError::Truncated {
            offset,
            needed: len,
            available,
        });
    }
    Ok(&source[offset..offset + len])
}
