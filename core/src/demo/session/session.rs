//! Demo session controller

use glam::Vec3;

use demostream_shared::default_extension;

use crate::config::DemoConfig;
use crate::demo::error::DemoError;
use crate::demo::host::{ClientControl, DemoExporter, DemoLoader, LiveTransport};
use crate::demo::runtime::{
    BenchmarkCounters, BenchmarkReport, PlaybackCursor, Recorder, RecorderConfig,
};
use crate::demo::source::{MessageSource, NextMessage};
use crate::demo::types::{HostClock, NO_FORCED_TRACK, SessionMode, TickContext, ViewAngles};

use super::types::{RecordRequest, RecordingSummary};

/// All demo state for one client
///
/// Recording and playback are mutually exclusive: `recorder` is only set
/// while `source` is [`MessageSource::Live`].
#[derive(Debug, Default)]
pub struct DemoSession {
    config: DemoConfig,
    source: MessageSource,
    recorder: Option<Recorder>,
    forced_track: i32,
    view_angles: ViewAngles,
    /// Host clock seen on the most recent tick
    last_clock: HostClock,
    last_benchmark: Option<BenchmarkReport>,
}

impl DemoSession {
    pub fn new(config: DemoConfig) -> Self {
        Self {
            config,
            ..Default::default()
        }
    }

    // =============================================================
    // Queries
    // =============================================================

    pub fn mode(&self) -> SessionMode {
        match (&self.source, &self.recorder) {
            (MessageSource::Playback(_), _) => SessionMode::Playing,
            (MessageSource::Benchmark(..), _) => SessionMode::Benchmarking,
            (MessageSource::Live, Some(_)) => SessionMode::Recording,
            (MessageSource::Live, None) => SessionMode::Idle,
        }
    }

    /// Forced track of the current (or last) recording or playback
    pub fn forced_track(&self) -> i32 {
        self.forced_track
    }

    /// View angles of the last two frames read from playback
    pub fn view_angles(&self) -> ViewAngles {
        self.view_angles
    }

    /// Whether the client counts as connected to a playing demo
    pub fn is_demo_connected(&self) -> bool {
        self.source.is_playback()
    }

    /// Counters of the running timedemo
    pub fn benchmark_counters(&self) -> Option<&BenchmarkCounters> {
        self.source.counters()
    }

    /// Result of the most recently finished timedemo
    pub fn last_benchmark(&self) -> Option<BenchmarkReport> {
        self.last_benchmark
    }

    pub fn recorder(&self) -> Option<&Recorder> {
        self.recorder.as_ref()
    }

    pub fn playback_cursor(&self) -> Option<&PlaybackCursor> {
        self.source.cursor()
    }

    pub fn config(&self) -> &DemoConfig {
        &self.config
    }

    // =============================================================
    // Per-tick message retrieval
    // =============================================================

    /// Next protocol message for this tick
    ///
    /// During playback, running out of data or hitting a damaged frame
    /// stops playback before the result is returned. Never blocks.
    pub fn get_next_message<T: LiveTransport + ?Sized>(
        &mut self,
        tick: &TickContext,
        transport: &mut T,
    ) -> Result<NextMessage, DemoError> {
        self.last_clock = tick.clock();

        let result = self.source.poll(tick, transport);
        if !self.source.is_playback() {
            return result;
        }

        match result {
            Ok(NextMessage::Delivered(message)) => {
                if let Some(orientation) = message.orientation {
                    self.view_angles.push(orientation);
                }
                Ok(NextMessage::Delivered(message))
            }
            Ok(NextMessage::EndOfStream) => {
                tracing::info!("Demo playback finished");
                self.stop_playback(tick.clock());
                Ok(NextMessage::EndOfStream)
            }
            Err(e) => {
                if e.is_corrupt_stream() {
                    tracing::error!(error = %e, "Corrupt demo, stopping playback");
                } else {
                    tracing::warn!(error = %e, "Demo ended mid-frame, stopping playback");
                }
                self.stop_playback(tick.clock());
                Err(e)
            }
            other => other,
        }
    }

    // =============================================================
    // Recording
    // =============================================================

    /// Begin recording
    ///
    /// Without a map the client must not be connected yet, since a client
    /// recording has to capture the whole sign-on.
    pub fn start_recording<C: ClientControl + ?Sized>(
        &mut self,
        request: RecordRequest,
        client: &mut C,
    ) -> Result<(), DemoError> {
        let current = self.mode();
        if current != SessionMode::Idle {
            return Err(DemoError::AlreadyActive {
                current,
                requested: "recording",
            });
        }
        if request.name.contains("..") {
            return Err(DemoError::RelativePath(request.name));
        }
        if request.map.is_none() && client.is_connected() {
            return Err(DemoError::AlreadyConnected);
        }

        let forced_track = match request.forced_track {
            Some(track) => {
                tracing::info!(track, "Forcing CD track");
                track
            }
            None => NO_FORCED_TRACK,
        };

        let name = default_extension(&request.name, &self.config.recording.extension);

        if let Some(map) = &request.map {
            client.execute_command(&format!("map {map}"));
        }

        tracing::info!(name = %name, "Recording demo");

        self.recorder = Some(Recorder::start(RecorderConfig {
            name,
            forced_track,
            initial_capacity: self.config.recording.initial_capacity,
        }));
        self.forced_track = forced_track;
        Ok(())
    }

    /// Append one outgoing message to the active recording
    ///
    /// Returns `Ok(false)` when nothing is being recorded.
    pub fn capture_outgoing_message(
        &mut self,
        payload: &[u8],
        orientation: Vec3,
    ) -> Result<bool, DemoError> {
        match self.recorder.as_mut() {
            Some(recorder) => {
                recorder.record_message(payload, orientation)?;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Finish the recording and export it
    ///
    /// The session is idle afterwards even if the export fails; the bytes
    /// are not kept for a retry.
    pub fn stop_recording<E: DemoExporter + ?Sized>(
        &mut self,
        exporter: &mut E,
    ) -> Result<RecordingSummary, DemoError> {
        let Some(recorder) = self.recorder.take() else {
            tracing::info!("Not recording a demo.");
            return Err(DemoError::NotActive("recording a demo"));
        };

        let finished = recorder.finish();
        let summary = RecordingSummary {
            name: finished.name.clone(),
            forced_track: finished.forced_track,
            frame_count: finished.frame_count,
            byte_len: finished.bytes.len(),
        };

        if let Err(e) = exporter.export_bytes(&finished.name, &finished.bytes) {
            tracing::error!(error = %e, "Demo export failed");
            return Err(e);
        }

        tracing::info!(
            name = %summary.name,
            frames = summary.frame_count,
            bytes = summary.byte_len,
            "Completed demo"
        );
        Ok(summary)
    }

    // =============================================================
    // Playback
    // =============================================================

    /// Start playing a recording from memory
    ///
    /// Drops any live connection first. A playback already in progress is
    /// stopped and replaced. Returns the recording's forced track.
    pub fn start_playback<C: ClientControl + ?Sized>(
        &mut self,
        bytes: Vec<u8>,
        client: &mut C,
    ) -> Result<i32, DemoError> {
        if self.recorder.is_some() {
            return Err(DemoError::AlreadyActive {
                current: SessionMode::Recording,
                requested: "playback",
            });
        }
        if self.source.is_playback() {
            self.stop_playback(self.last_clock);
        }
        client.disconnect();

        let mut cursor = PlaybackCursor::load(bytes);
        let forced_track = cursor.read_forced_track();

        self.source = MessageSource::Playback(cursor);
        self.forced_track = forced_track;
        self.view_angles = ViewAngles::default();

        tracing::info!(forced_track, "Playing demo");
        Ok(forced_track)
    }

    /// Start a timedemo: playback at one frame per host frame
    ///
    /// `clock` is the host frame the benchmark starts on; measurement
    /// begins with the frame after it.
    pub fn start_benchmark<C: ClientControl + ?Sized>(
        &mut self,
        bytes: Vec<u8>,
        client: &mut C,
        clock: HostClock,
    ) -> Result<i32, DemoError> {
        let forced_track = self.start_playback(bytes, client)?;

        self.source = match std::mem::take(&mut self.source) {
            MessageSource::Playback(cursor) => MessageSource::Benchmark(
                cursor,
                BenchmarkCounters::new(clock.frame, clock.realtime),
            ),
            other => other,
        };
        self.last_clock = clock;
        Ok(forced_track)
    }

    /// Load a named recording and play it
    pub fn play_demo<L, C>(
        &mut self,
        name: &str,
        loader: &L,
        client: &mut C,
    ) -> Result<i32, DemoError>
    where
        L: DemoLoader + ?Sized,
        C: ClientControl + ?Sized,
    {
        let bytes = self.load_named(name, loader, client)?;
        self.start_playback(bytes, client)
    }

    /// Load a named recording and benchmark it
    pub fn time_demo<L, C>(
        &mut self,
        name: &str,
        loader: &L,
        client: &mut C,
        clock: HostClock,
    ) -> Result<i32, DemoError>
    where
        L: DemoLoader + ?Sized,
        C: ClientControl + ?Sized,
    {
        let bytes = self.load_named(name, loader, client)?;
        self.start_benchmark(bytes, client, clock)
    }

    /// Stop playback (end of data, decode error or explicit stop)
    ///
    /// Returns the timedemo result when a benchmark was running. Does
    /// nothing when no recording is playing.
    pub fn stop_playback(&mut self, clock: HostClock) -> Option<BenchmarkReport> {
        match std::mem::take(&mut self.source) {
            MessageSource::Live => None,
            MessageSource::Playback(_) => {
                tracing::debug!("Demo playback stopped");
                None
            }
            MessageSource::Benchmark(_, counters) => {
                let report = counters.finish(clock);
                tracing::info!(
                    frames = report.frames,
                    seconds = report.seconds,
                    fps = report.fps,
                    "{report}"
                );
                self.last_benchmark = Some(report);
                Some(report)
            }
        }
    }

    fn load_named<L, C>(
        &mut self,
        name: &str,
        loader: &L,
        client: &mut C,
    ) -> Result<Vec<u8>, DemoError>
    where
        L: DemoLoader + ?Sized,
        C: ClientControl + ?Sized,
    {
        if self.recorder.is_some() {
            return Err(DemoError::AlreadyActive {
                current: SessionMode::Recording,
                requested: "playback",
            });
        }
        if self.source.is_playback() {
            self.stop_playback(self.last_clock);
        }
        client.disconnect();

        let name = default_extension(name, &self.config.recording.extension);
        tracing::info!(name = %name, "Playing demo from file");

        loader.find_file(&name).inspect_err(|_| {
            tracing::warn!(name = %name, "Couldn't open demo");
        })
    }
}
