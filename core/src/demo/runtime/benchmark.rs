//! Timedemo counters and results

use crate::demo::types::HostClock;

/// Frame bookkeeping for a timedemo run
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BenchmarkCounters {
    /// Host frame the benchmark started on
    pub start_frame: u64,
    /// Host frame that last consumed a demo frame (`None` = read this frame)
    pub last_frame: Option<u64>,
    /// Wall clock at the start of the measured run
    pub start_time: f64,
}

impl BenchmarkCounters {
    pub fn new(start_frame: u64, start_time: f64) -> Self {
        Self {
            start_frame,
            last_frame: None,
            start_time,
        }
    }

    /// Finish the run at `clock`
    ///
    /// The first frame carries load time and isn't counted. Zero elapsed
    /// time is reported as one second.
    pub fn finish(&self, clock: HostClock) -> BenchmarkReport {
        let frames = clock.frame.saturating_sub(self.start_frame).saturating_sub(1);
        let mut seconds = clock.realtime - self.start_time;
        if seconds == 0.0 {
            seconds = 1.0;
        }
        BenchmarkReport {
            frames,
            seconds,
            fps: frames as f64 / seconds,
        }
    }
}

/// Result of a timedemo run
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BenchmarkReport {
    pub frames: u64,
    pub seconds: f64,
    pub fps: f64,
}

impl std::fmt::Display for BenchmarkReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} frames {:5.1} seconds {:5.1} fps",
            self.frames, self.seconds, self.fps
        )
    }
}
