//! Playback timing gate
//!
//! Decides, once per host frame, whether the next demo frame should be
//! consumed. Pure: the only state it touches is the benchmark counters it
//! is handed.

use crate::demo::types::TickContext;

use super::benchmark::BenchmarkCounters;

/// Outcome of consulting the gate
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateDecision {
    /// Read the next frame now
    Consume,
    /// Nothing to read this tick
    Wait,
}

/// Gate for normal playback
///
/// Sign-on messages are drained unconditionally; after that a frame is
/// read only once simulation time has moved past the last message.
pub fn playback_gate(tick: &TickContext) -> GateDecision {
    if !tick.fully_connected {
        return GateDecision::Consume;
    }
    if tick.sim_time <= tick.last_message_time {
        GateDecision::Wait
    } else {
        GateDecision::Consume
    }
}

/// Gate for timedemo playback
///
/// One frame per distinct host frame index. The real start time is
/// latched on the frame after the benchmark started, so load time spent
/// in the first frame isn't measured.
pub fn benchmark_gate(tick: &TickContext, counters: &mut BenchmarkCounters) -> GateDecision {
    if !tick.fully_connected {
        return GateDecision::Consume;
    }
    if counters.last_frame == Some(tick.frame) {
        return GateDecision::Wait;
    }
    counters.last_frame = Some(tick.frame);

    if tick.frame == counters.start_frame + 1 {
        counters.start_time = tick.realtime;
    }
    GateDecision::Consume
}
