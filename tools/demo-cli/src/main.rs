//! Demo CLI - inspect, benchmark and author `.dem` recordings
//!
//! # Commands
//!
//! - `demo info <file>` - Summarize a recording and report where decoding stops
//! - `demo timedemo <name>` - Replay a recording one frame per tick and report fps
//! - `demo record <out>` - Build a recording from hex payloads
//!
//! # Usage
//!
//! ```bash
//! demo info demos/demo1.dem --json
//! demo timedemo demo1
//! demo record fixtures/short.dem --track 3 --payload 010203 --payload 09
//! ```

mod info;
mod record;
mod timedemo;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

use demostream_core::DemoConfig;

/// Demo CLI - inspect, benchmark and author demo recordings
#[derive(Parser)]
#[command(name = "demo")]
#[command(about = "Inspect, benchmark and author demo recordings")]
#[command(version)]
struct Cli {
    /// Config file (defaults to the platform config directory)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Summarize a recording
    Info(info::InfoArgs),

    /// Benchmark playback of a recording
    Timedemo(timedemo::TimedemoArgs),

    /// Build a recording from hex payloads
    Record(record::RecordArgs),
}

fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    let config = load_config(cli.config.as_deref())?;

    match cli.command {
        Commands::Info(args) => info::execute(args, &config),
        Commands::Timedemo(args) => timedemo::execute(args, &config),
        Commands::Record(args) => record::execute(args, &config),
    }
}

fn load_config(path: Option<&std::path::Path>) -> Result<DemoConfig> {
    match path {
        Some(path) => demostream_core::config::load_from(path),
        None => Ok(demostream_core::config::load()),
    }
}
