//! Request and result types for session lifecycle operations

/// Parameters of a `record` command: `record <name> [<map> [track]]`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordRequest {
    /// Recording name; the default extension is added if missing
    pub name: String,
    /// Map to start before recording begins
    pub map: Option<String>,
    /// Forced audio track (written as -1 when absent)
    pub forced_track: Option<i32>,
}

impl RecordRequest {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            map: None,
            forced_track: None,
        }
    }

    /// Name derived from the current local time, e.g. `demo-20240131-184501`
    pub fn timestamped() -> Self {
        let stamp = chrono::Local::now().format("%Y%m%d-%H%M%S");
        Self::new(format!("demo-{stamp}"))
    }

    pub fn with_map(mut self, map: impl Into<String>) -> Self {
        self.map = Some(map.into());
        self
    }

    pub fn with_track(mut self, track: i32) -> Self {
        self.forced_track = Some(track);
        self
    }
}

/// What `stop_recording` handed to the exporter
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordingSummary {
    pub name: String,
    pub forced_track: i32,
    /// Frames written, including the closing disconnect frame
    pub frame_count: u64,
    pub byte_len: usize,
}
