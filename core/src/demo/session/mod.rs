//! Demo session lifecycle
//!
//! [`DemoSession`] holds every piece of demo state (mode, recorder,
//! playback cursor, benchmark counters) and is the only place that state
//! changes. Hosts call it once per tick for messages and from their
//! console commands for lifecycle transitions.

mod session;
mod types;

#[cfg(test)]
mod tests;

pub use session::DemoSession;
pub use types::{RecordRequest, RecordingSummary};
