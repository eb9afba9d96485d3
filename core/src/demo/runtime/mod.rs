//! Demo runtime
//!
//! - **Recorder**: captures messages into a growable buffer
//! - **PlaybackCursor**: reads frames back out of a loaded recording
//! - **Gate**: per-tick decision whether playback consumes a frame
//! - **Benchmark**: timedemo counters and the final report

mod benchmark;
mod gate;
mod player;
mod recorder;

pub use benchmark::{BenchmarkCounters, BenchmarkReport};
pub use gate::{GateDecision, benchmark_gate, playback_gate};
pub use player::PlaybackCursor;
pub use recorder::{FinishedRecording, Recorder, RecorderConfig};
