//! Binary demo format (.dem)
//!
//! # File Structure
//!
//! ```text
//! ┌────────────────────────────────────────────────┐
//! │ Forced track line: ASCII decimal, '-' allowed,  │
//! │ terminated by a single 0x0A                      │
//! ├────────────────────────────────────────────────┤
//! │ Frame 0                                         │
//! │ ├─ payload_length: i32 (LE)                     │
//! │ ├─ orientation: f32 x 3 (LE)                    │
//! │ └─ payload: [u8; payload_length]                │
//! ├────────────────────────────────────────────────┤
//! │ Frame 1 ... until end of file                   │
//! └────────────────────────────────────────────────┘
//! ```
//!
//! Frames carry no padding or alignment; the 16-byte header immediately
//! precedes its payload.

mod reader;
mod writer;

pub use reader::{decode_frame, decode_header, decode_payload, parse_forced_track};
pub use writer::{FrameWriter, encode_frame, encode_header, forced_track_line};
