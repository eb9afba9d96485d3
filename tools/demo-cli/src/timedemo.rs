//! Timedemo command - benchmark playback speed
//!
//! Drives a benchmark session with a synthetic host loop: every loop
//! iteration is one host frame, the client is considered fully connected
//! from the start, and no real parsing or rendering happens.

use std::path::Path;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::Args;
use serde::Serialize;

use demostream_core::demo::{
    BenchmarkReport, DetachedClient, DirectoryStore, HostClock, NextMessage, NullTransport,
};
use demostream_core::{DemoConfig, DemoSession, TickContext};
use demostream_shared::read_file_with_limit;

/// Arguments for the timedemo command
#[derive(Args)]
pub struct TimedemoArgs {
    /// Recording path, or a name resolved in the demo directory
    pub demo: String,

    /// Print the result as JSON
    #[arg(long)]
    pub json: bool,
}

/// Timedemo result for JSON output
#[derive(Debug, Serialize)]
struct TimedemoOutput {
    demo: String,
    forced_track: i32,
    messages: u64,
    frames: u64,
    seconds: f64,
    fps: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

/// Execute the timedemo command
pub fn execute(args: TimedemoArgs, config: &DemoConfig) -> Result<()> {
    let mut session = DemoSession::new(config.clone());
    let mut client = DetachedClient::default();
    let start = HostClock::default();

    let path = Path::new(&args.demo);
    let forced_track = if path.is_file() {
        let bytes = read_file_with_limit(path, config.playback.max_file_bytes)?;
        session.start_benchmark(bytes, &mut client, start)?
    } else {
        let store =
            DirectoryStore::new(config.demo_dir()).with_max_bytes(config.playback.max_file_bytes);
        session
            .time_demo(&args.demo, &store, &mut client, start)
            .with_context(|| format!("Failed to load demo from {}", store.root().display()))?
    };

    let run = run_benchmark(&mut session);

    if args.json {
        let output = TimedemoOutput {
            demo: args.demo,
            forced_track,
            messages: run.messages,
            frames: run.report.frames,
            seconds: run.report.seconds,
            fps: run.report.fps,
            error: run.error,
        };
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    println!("Timedemo: {}", args.demo);
    println!("  Forced track: {}", forced_track);
    println!("  Messages: {}", run.messages);
    println!("  {}", run.report);
    if let Some(error) = run.error {
        println!("  Stopped early: {}", error);
    }
    Ok(())
}

/// Outcome of one benchmark loop
struct BenchmarkRun {
    messages: u64,
    report: BenchmarkReport,
    error: Option<String>,
}

/// Tick the session until playback stops
fn run_benchmark(session: &mut DemoSession) -> BenchmarkRun {
    let started = Instant::now();
    let mut transport = NullTransport;
    let mut messages = 0u64;
    let mut error = None;
    let mut tick = TickContext {
        fully_connected: true,
        ..Default::default()
    };

    while session.mode().is_playback() {
        tick.frame += 1;
        tick.realtime = started.elapsed().as_secs_f64();

        match session.get_next_message(&tick, &mut transport) {
            Ok(NextMessage::Delivered(_)) => messages += 1,
            Ok(_) => {}
            Err(e) => {
                tracing::warn!(error = %e, "Timedemo stopped");
                error = Some(e.to_string());
            }
        }
    }

    let report = session.last_benchmark().unwrap_or(BenchmarkReport {
        frames: 0,
        seconds: 1.0,
        fps: 0.0,
    });
    BenchmarkRun {
        messages,
        report,
        error,
    }
}
