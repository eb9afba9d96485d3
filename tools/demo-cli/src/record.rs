//! Record command - author a recording from hex payloads
//!
//! Runs the same recording path a client uses: start a recording, capture
//! each payload, stop and export. Useful for building test fixtures.

use std::path::PathBuf;

use anyhow::{Context, Result, anyhow};
use clap::Args;
use glam::Vec3;

use demostream_core::demo::{DetachedClient, DirectoryStore};
use demostream_core::{DemoConfig, DemoSession, RecordRequest};

/// Arguments for the record command
#[derive(Args)]
pub struct RecordArgs {
    /// Output file (the default extension is added if missing)
    ///
    /// A bare file name is written to the configured export directory.
    pub output: PathBuf,

    /// Forced audio track written into the header line
    #[arg(long, allow_hyphen_values = true)]
    pub track: Option<i32>,

    /// Message payload as hex, one per frame (repeatable)
    #[arg(long = "payload", value_name = "HEX")]
    pub payloads: Vec<String>,

    /// View angles stored with every frame, as "pitch,yaw,roll"
    #[arg(long, default_value = "0,0,0", allow_hyphen_values = true)]
    pub angles: String,
}

/// Execute the record command
pub fn execute(args: RecordArgs, config: &DemoConfig) -> Result<()> {
    let orientation = parse_angles(&args.angles)?;
    let payloads = args
        .payloads
        .iter()
        .map(|text| hex::decode(text).with_context(|| format!("Invalid hex payload: {}", text)))
        .collect::<Result<Vec<_>>>()?;

    let file_name = args
        .output
        .file_name()
        .and_then(|name| name.to_str())
        .ok_or_else(|| anyhow!("Invalid output path: {}", args.output.display()))?
        .to_string();
    // Bare names go to the configured export directory
    let parent = match args.output.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir.to_path_buf(),
        _ => config.export_dir(),
    };

    let mut request = RecordRequest::new(file_name);
    if let Some(track) = args.track {
        request = request.with_track(track);
    }

    let mut session = DemoSession::new(config.clone());
    let mut store = DirectoryStore::new(parent);
    session.start_recording(request, &mut DetachedClient::default())?;
    for payload in &payloads {
        session.capture_outgoing_message(payload, orientation)?;
    }
    let summary = session.stop_recording(&mut store)?;

    println!(
        "Wrote {} ({} frames, {} bytes)",
        store.path_for(&summary.name).display(),
        summary.frame_count,
        summary.byte_len
    );
    Ok(())
}

/// Parse "pitch,yaw,roll"
fn parse_angles(text: &str) -> Result<Vec3> {
    let parts = text
        .split(',')
        .map(|part| {
            part.trim()
                .parse::<f32>()
                .with_context(|| format!("Invalid angle: {}", part))
        })
        .collect::<Result<Vec<_>>>()?;

    match parts.as_slice() {
        [pitch, yaw, roll] => Ok(Vec3::new(*pitch, *yaw, *roll)),
        _ => anyhow::bail!("Expected three angles as pitch,yaw,roll, got: {}", text),
    }
}
