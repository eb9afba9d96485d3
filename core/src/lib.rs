//! demostream core - demo recording, playback and benchmarking
//!
//! This crate unifies live and recorded protocol message streams behind a
//! single per-tick "next message" call, records outgoing traffic into
//! `.dem` files, and replays them either in real time or as a timedemo.
//!
//! # Architecture
//!
//! - [`DemoSession`] - All demo state and its lifecycle transitions
//! - [`MessageSource`] - Live / playback / benchmark message selection
//! - [`demo::binary`] - The `.dem` frame codec
//! - [`DemoConfig`] - Settings loaded from `demo.toml`

pub mod config;
pub mod demo;
#[cfg(test)]
pub mod test_utils;

pub use config::DemoConfig;
pub use demo::{
    BenchmarkReport, DemoError, DemoSession, Frame, MessageSource, NextMessage, RecordRequest,
    SessionMode, TickContext,
};
