//! Info command - summarize a recording
//!
//! Walks every frame and reports counts, sizes and where decoding stopped.

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use serde::Serialize;

use demostream_core::DemoConfig;
use demostream_core::demo::{PlaybackCursor, SVC_DISCONNECT};
use demostream_shared::read_file_with_limit;

/// Arguments for the info command
#[derive(Args)]
pub struct InfoArgs {
    /// Recording file (.dem)
    pub file: PathBuf,

    /// Print the summary as JSON
    #[arg(long)]
    pub json: bool,
}

/// Summary of a recording
#[derive(Debug, Serialize, PartialEq)]
pub struct DemoInfo {
    pub forced_track: i32,
    pub file_bytes: usize,
    pub frame_count: u64,
    pub payload_bytes: u64,
    pub largest_payload: usize,
    /// Whether the last frame is a disconnect marker
    pub ends_with_disconnect: bool,
    /// Byte offset where decoding stopped
    pub end_offset: usize,
    /// Decode error that ended the walk early, if any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Execute the info command
pub fn execute(args: InfoArgs, config: &DemoConfig) -> Result<()> {
    let bytes = read_file_with_limit(&args.file, config.playback.max_file_bytes)?;
    let info = inspect(bytes);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&info)?);
        return Ok(());
    }

    println!("Demo: {}", args.file.display());
    println!("  Forced track: {}", info.forced_track);
    println!("  Size: {} bytes", info.file_bytes);
    println!("  Frames: {}", info.frame_count);
    println!("  Payload bytes: {}", info.payload_bytes);
    println!("  Largest payload: {}", info.largest_payload);
    println!("  Ends with disconnect: {}", info.ends_with_disconnect);
    if let Some(error) = &info.error {
        println!("  Stopped at offset {}: {}", info.end_offset, error);
    }
    Ok(())
}

/// Walk a recording and summarize it
pub fn inspect(bytes: Vec<u8>) -> DemoInfo {
    let file_bytes = bytes.len();
    let mut cursor = PlaybackCursor::load(bytes);
    let forced_track = cursor.read_forced_track();

    let mut info = DemoInfo {
        forced_track,
        file_bytes,
        frame_count: 0,
        payload_bytes: 0,
        largest_payload: 0,
        ends_with_disconnect: false,
        end_offset: 0,
        error: None,
    };

    loop {
        match cursor.read_next_frame() {
            Ok(Some(frame)) => {
                info.frame_count += 1;
                info.payload_bytes += frame.payload.len() as u64;
                info.largest_payload = info.largest_payload.max(frame.payload.len());
                info.ends_with_disconnect = frame.payload == [SVC_DISCONNECT];
            }
            Ok(None) => break,
            Err(e) => {
                info.error = Some(e.to_string());
                break;
            }
        }
    }

    info.end_offset = cursor.read_offset();
    info
}
