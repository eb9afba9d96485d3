//! Tests for the demo session controller

use glam::Vec3;

use crate::config::DemoConfig;
use crate::demo::binary::{decode_frame, encode_header, parse_forced_track};
use crate::demo::error::DemoError;
use crate::demo::host::{DemoExporter, DetachedClient, Received};
use crate::demo::source::{Message, NextMessage};
use crate::demo::store::MemoryStore;
use crate::demo::types::{HostClock, SVC_DISCONNECT, SVC_NOP, SessionMode, TickContext};
use crate::test_utils::{ScriptedTransport, build_demo};

use super::{DemoSession, RecordRequest};

struct FailingExporter;

impl DemoExporter for FailingExporter {
    fn export_bytes(&mut self, name: &str, _bytes: &[u8]) -> Result<(), DemoError> {
        Err(DemoError::Export {
            name: name.to_string(),
            reason: "disk full".to_string(),
        })
    }
}

fn tick(frame: u64) -> TickContext {
    TickContext {
        frame,
        realtime: frame as f64,
        sim_time: frame as f64 + 1.0,
        last_message_time: frame as f64,
        fully_connected: true,
    }
}

fn delivered_payload(next: Result<NextMessage, DemoError>) -> Vec<u8> {
    match next {
        Ok(NextMessage::Delivered(message)) => message.payload,
        other => panic!("Expected delivered message, got {:?}", other),
    }
}

// =============================================================
// Playback
// =============================================================

#[test]
fn test_playback_end_to_end() {
    let demo = build_demo(3, &[(&[1, 2, 3], Vec3::ZERO), (&[9], Vec3::ZERO)]);
    let mut session = DemoSession::default();
    let mut client = DetachedClient::default();
    let mut transport = ScriptedTransport::default();

    assert_eq!(session.start_playback(demo, &mut client).unwrap(), 3);
    assert_eq!(session.mode(), SessionMode::Playing);
    assert_eq!(session.forced_track(), 3);
    assert!(session.is_demo_connected());
    assert_eq!(client.disconnects, 1);

    assert_eq!(
        delivered_payload(session.get_next_message(&tick(1), &mut transport)),
        vec![1, 2, 3]
    );
    assert_eq!(
        delivered_payload(session.get_next_message(&tick(2), &mut transport)),
        vec![9]
    );
    assert_eq!(
        session.get_next_message(&tick(3), &mut transport).unwrap(),
        NextMessage::EndOfStream
    );
    assert_eq!(session.mode(), SessionMode::Idle);
    assert!(!session.is_demo_connected());
    assert_eq!(transport.polls, 0);
}

#[test]
fn test_playback_waits_for_simulation_time() {
    let demo = build_demo(0, &[(&[5], Vec3::ZERO)]);
    let mut session = DemoSession::default();
    session
        .start_playback(demo, &mut DetachedClient::default())
        .unwrap();

    let mut waiting = tick(1);
    waiting.sim_time = waiting.last_message_time;
    let mut transport = ScriptedTransport::default();
    assert_eq!(
        session.get_next_message(&waiting, &mut transport).unwrap(),
        NextMessage::NoMessageYet
    );
    assert_eq!(session.mode(), SessionMode::Playing);

    // Sign-on is drained regardless of time
    waiting.fully_connected = false;
    assert_eq!(
        delivered_payload(session.get_next_message(&waiting, &mut transport)),
        vec![5]
    );
}

#[test]
fn test_playback_tracks_view_angles() {
    let demo = build_demo(
        0,
        &[
            (&[1], Vec3::new(10.0, 20.0, 0.0)),
            (&[2], Vec3::new(15.0, 25.0, 5.0)),
        ],
    );
    let mut session = DemoSession::default();
    session
        .start_playback(demo, &mut DetachedClient::default())
        .unwrap();
    let mut transport = ScriptedTransport::default();

    let first = session.get_next_message(&tick(1), &mut transport).unwrap();
    assert_eq!(
        first,
        NextMessage::Delivered(Message::recorded(vec![1], Vec3::new(10.0, 20.0, 0.0)))
    );
    session.get_next_message(&tick(2), &mut transport).unwrap();

    let angles = session.view_angles();
    assert_eq!(angles.previous, Vec3::new(10.0, 20.0, 0.0));
    assert_eq!(angles.current, Vec3::new(15.0, 25.0, 5.0));
}

#[test]
fn test_truncated_frame_stops_playback() {
    let mut demo = build_demo(0, &[(&[1], Vec3::ZERO)]);
    demo.extend_from_slice(&encode_header(100, Vec3::ZERO));
    demo.extend_from_slice(&[0u8; 10]);

    let mut session = DemoSession::default();
    session
        .start_playback(demo, &mut DetachedClient::default())
        .unwrap();
    let mut transport = ScriptedTransport::default();

    delivered_payload(session.get_next_message(&tick(1), &mut transport));
    let err = session.get_next_message(&tick(2), &mut transport).unwrap_err();
    assert!(matches!(err, DemoError::Truncated { needed: 100, available: 10, .. }));
    assert_eq!(session.mode(), SessionMode::Idle);

    // Back on the live path afterwards
    assert_eq!(
        session.get_next_message(&tick(3), &mut transport).unwrap(),
        NextMessage::NoMessageYet
    );
    assert_eq!(transport.polls, 1);
}

#[test]
fn test_oversized_frame_stops_playback() {
    let mut demo = build_demo(0, &[]);
    demo.extend_from_slice(&encode_header(9000, Vec3::ZERO));
    demo.extend_from_slice(&[0u8; 9000]);

    let mut session = DemoSession::default();
    session
        .start_playback(demo, &mut DetachedClient::default())
        .unwrap();

    let err = session
        .get_next_message(&tick(1), &mut ScriptedTransport::default())
        .unwrap_err();
    assert!(err.is_corrupt_stream());
    assert_eq!(session.mode(), SessionMode::Idle);
}

#[test]
fn test_empty_recording_ends_immediately() {
    let mut session = DemoSession::default();
    assert_eq!(
        session
            .start_playback(Vec::new(), &mut DetachedClient::default())
            .unwrap(),
        0
    );
    assert_eq!(
        session
            .get_next_message(&tick(1), &mut ScriptedTransport::default())
            .unwrap(),
        NextMessage::EndOfStream
    );
    assert_eq!(session.mode(), SessionMode::Idle);
}

#[test]
fn test_restart_playback_replaces_current() {
    let mut session = DemoSession::default();
    let mut client = DetachedClient::default();
    session
        .start_playback(build_demo(1, &[(&[1], Vec3::ZERO)]), &mut client)
        .unwrap();
    session
        .start_playback(build_demo(2, &[(&[2], Vec3::ZERO)]), &mut client)
        .unwrap();

    assert_eq!(session.forced_track(), 2);
    assert_eq!(
        delivered_payload(session.get_next_message(&tick(1), &mut ScriptedTransport::default())),
        vec![2]
    );
}

#[test]
fn test_manual_stop_playback() {
    let mut session = DemoSession::default();
    session
        .start_playback(build_demo(0, &[(&[1], Vec3::ZERO)]), &mut DetachedClient::default())
        .unwrap();

    assert_eq!(session.stop_playback(HostClock::default()), None);
    assert_eq!(session.mode(), SessionMode::Idle);
    // Stopping again is harmless
    assert_eq!(session.stop_playback(HostClock::default()), None);
}

// =============================================================
// Benchmark
// =============================================================

#[test]
fn test_benchmark_one_frame_per_tick() {
    let demo = build_demo(0, &[(&[1], Vec3::ZERO), (&[2], Vec3::ZERO), (&[3], Vec3::ZERO)]);
    let mut session = DemoSession::default();
    let start = HostClock {
        frame: 10,
        realtime: 100.0,
    };
    session
        .start_benchmark(demo, &mut DetachedClient::default(), start)
        .unwrap();
    assert_eq!(session.mode(), SessionMode::Benchmarking);
    assert_eq!(session.benchmark_counters().unwrap().start_frame, 10);

    let mut transport = ScriptedTransport::default();
    let mut t = TickContext {
        frame: 10,
        realtime: 100.0,
        fully_connected: true,
        ..Default::default()
    };

    // Sim time never advances; benchmark ignores it
    assert_eq!(delivered_payload(session.get_next_message(&t, &mut transport)), vec![1]);
    assert_eq!(
        session.get_next_message(&t, &mut transport).unwrap(),
        NextMessage::NoMessageYet
    );

    t.frame = 11;
    t.realtime = 101.0;
    assert_eq!(delivered_payload(session.get_next_message(&t, &mut transport)), vec![2]);
    assert_eq!(session.benchmark_counters().unwrap().start_time, 101.0);

    t.frame = 12;
    t.realtime = 103.0;
    assert_eq!(delivered_payload(session.get_next_message(&t, &mut transport)), vec![3]);

    t.frame = 13;
    t.realtime = 105.0;
    assert_eq!(
        session.get_next_message(&t, &mut transport).unwrap(),
        NextMessage::EndOfStream
    );
    assert_eq!(session.mode(), SessionMode::Idle);

    let report = session.last_benchmark().unwrap();
    assert_eq!(report.frames, 2);
    assert_eq!(report.seconds, 4.0);
    assert_eq!(report.fps, 0.5);
}

#[test]
fn test_benchmark_zero_elapsed() {
    let mut session = DemoSession::default();
    let clock = HostClock {
        frame: 0,
        realtime: 5.0,
    };
    session
        .start_benchmark(build_demo(0, &[]), &mut DetachedClient::default(), clock)
        .unwrap();

    let report = session
        .stop_playback(HostClock {
            frame: 3,
            realtime: 5.0,
        })
        .unwrap();
    assert_eq!(report.seconds, 1.0);
    assert_eq!(report.frames, 2);
    assert_eq!(report.fps, 2.0);
}

#[test]
fn test_time_demo_by_name() {
    let mut store = MemoryStore::new();
    store.insert("bench.dem", build_demo(-3, &[(&[1], Vec3::ZERO)]));

    let mut session = DemoSession::default();
    let track = session
        .time_demo("bench", &store, &mut DetachedClient::default(), HostClock::default())
        .unwrap();
    assert_eq!(track, -3);
    assert_eq!(session.mode(), SessionMode::Benchmarking);
}

// =============================================================
// Live
// =============================================================

#[test]
fn test_live_keepalive_discarded() {
    let mut session = DemoSession::default();
    let mut transport = ScriptedTransport::new([
        Received::Message(vec![SVC_NOP]),
        Received::Message(vec![0x20, 0x01]),
    ]);

    assert_eq!(
        session.get_next_message(&tick(1), &mut transport).unwrap(),
        NextMessage::Delivered(Message::live(vec![0x20, 0x01]))
    );
    assert_eq!(transport.polls, 2);
}

#[test]
fn test_live_messages_not_mirrored_into_recording() {
    let mut session = DemoSession::default();
    session
        .start_recording(RecordRequest::new("mirror"), &mut DetachedClient::default())
        .unwrap();

    let mut transport = ScriptedTransport::new([Received::Message(vec![4, 4])]);
    delivered_payload(session.get_next_message(&tick(1), &mut transport));

    assert_eq!(session.recorder().unwrap().frame_count(), 0);
}

// =============================================================
// Recording
// =============================================================

#[test]
fn test_record_and_replay() {
    let mut session = DemoSession::default();
    let mut client = DetachedClient::default();
    let mut store = MemoryStore::new();

    session
        .start_recording(RecordRequest::new("run").with_track(7), &mut client)
        .unwrap();
    assert_eq!(session.mode(), SessionMode::Recording);

    assert!(
        session
            .capture_outgoing_message(&[1, 2], Vec3::new(0.0, 45.0, 0.0))
            .unwrap()
    );
    assert!(session.capture_outgoing_message(&[3], Vec3::ZERO).unwrap());

    let summary = session.stop_recording(&mut store).unwrap();
    assert_eq!(session.mode(), SessionMode::Idle);
    assert_eq!(summary.name, "run.dem");
    assert_eq!(summary.forced_track, 7);
    assert_eq!(summary.frame_count, 3);

    let bytes = store.get("run.dem").unwrap();
    assert_eq!(summary.byte_len, bytes.len());
    assert_eq!(parse_forced_track(bytes).0, 7);

    session.play_demo("run", &store, &mut client).unwrap();
    let mut transport = ScriptedTransport::default();
    assert_eq!(delivered_payload(session.get_next_message(&tick(1), &mut transport)), vec![1, 2]);
    assert_eq!(delivered_payload(session.get_next_message(&tick(2), &mut transport)), vec![3]);
    assert_eq!(
        delivered_payload(session.get_next_message(&tick(3), &mut transport)),
        vec![SVC_DISCONNECT]
    );
    assert_eq!(
        session.get_next_message(&tick(4), &mut transport).unwrap(),
        NextMessage::EndOfStream
    );
}

#[test]
fn test_default_track_is_minus_one() {
    let mut session = DemoSession::default();
    let mut store = MemoryStore::new();
    session
        .start_recording(RecordRequest::new("plain.dem"), &mut DetachedClient::default())
        .unwrap();
    assert_eq!(session.forced_track(), -1);

    session.stop_recording(&mut store).unwrap();
    let bytes = store.get("plain.dem").unwrap();
    assert_eq!(&bytes[..3], b"-1\n");

    let (marker, size) = decode_frame(bytes, 3).unwrap();
    assert_eq!(marker.payload, vec![SVC_DISCONNECT]);
    assert_eq!(3 + size, bytes.len());
}

#[test]
fn test_capture_when_not_recording() {
    let mut session = DemoSession::default();
    assert!(!session.capture_outgoing_message(&[1], Vec3::ZERO).unwrap());
}

#[test]
fn test_stop_recording_when_idle() {
    let mut session = DemoSession::default();
    let err = session.stop_recording(&mut MemoryStore::new()).unwrap_err();
    assert_eq!(err, DemoError::NotActive("recording a demo"));
    assert_eq!(session.mode(), SessionMode::Idle);
}

#[test]
fn test_record_with_map_runs_command() {
    let mut session = DemoSession::default();
    let mut client = DetachedClient {
        connected: true,
        ..Default::default()
    };

    session
        .start_recording(RecordRequest::new("tour").with_map("e1m1"), &mut client)
        .unwrap();
    assert_eq!(client.commands, vec!["map e1m1".to_string()]);
    assert_eq!(session.recorder().unwrap().name(), "tour.dem");
}

#[test]
fn test_record_rejections() {
    let mut session = DemoSession::default();
    let mut connected = DetachedClient {
        connected: true,
        ..Default::default()
    };

    assert_eq!(
        session.start_recording(RecordRequest::new("../escape"), &mut connected),
        Err(DemoError::RelativePath("../escape".to_string()))
    );
    assert_eq!(
        session.start_recording(RecordRequest::new("late"), &mut connected),
        Err(DemoError::AlreadyConnected)
    );
    assert_eq!(session.mode(), SessionMode::Idle);
    assert!(connected.commands.is_empty());
}

#[test]
fn test_recording_and_playback_exclusive() {
    let mut session = DemoSession::default();
    let mut client = DetachedClient::default();

    session
        .start_recording(RecordRequest::new("busy"), &mut client)
        .unwrap();
    assert!(matches!(
        session.start_playback(build_demo(0, &[]), &mut client),
        Err(DemoError::AlreadyActive {
            current: SessionMode::Recording,
            ..
        })
    ));
    assert!(matches!(
        session.start_recording(RecordRequest::new("again"), &mut client),
        Err(DemoError::AlreadyActive { .. })
    ));
    assert_eq!(session.mode(), SessionMode::Recording);

    session.stop_recording(&mut MemoryStore::new()).unwrap();
    session
        .start_playback(build_demo(0, &[(&[1], Vec3::ZERO)]), &mut client)
        .unwrap();
    assert!(matches!(
        session.start_recording(RecordRequest::new("during"), &mut client),
        Err(DemoError::AlreadyActive {
            current: SessionMode::Playing,
            ..
        })
    ));
}

#[test]
fn test_export_failure_is_not_retried() {
    let mut session = DemoSession::default();
    session
        .start_recording(RecordRequest::new("lost"), &mut DetachedClient::default())
        .unwrap();

    assert!(matches!(
        session.stop_recording(&mut FailingExporter),
        Err(DemoError::Export { .. })
    ));
    assert_eq!(session.mode(), SessionMode::Idle);
    assert_eq!(
        session.stop_recording(&mut MemoryStore::new()),
        Err(DemoError::NotActive("recording a demo"))
    );
}

#[test]
fn test_play_missing_demo() {
    let mut session = DemoSession::default();
    let err = session
        .play_demo("nowhere", &MemoryStore::new(), &mut DetachedClient::default())
        .unwrap_err();
    assert_eq!(err, DemoError::NotFound("nowhere.dem".to_string()));
    assert_eq!(session.mode(), SessionMode::Idle);
}

#[test]
fn test_config_extension_and_capacity() {
    let mut config = DemoConfig::default();
    config.recording.extension = ".rec".to_string();
    config.recording.initial_capacity = 4;

    let mut session = DemoSession::new(config);
    let mut store = MemoryStore::new();
    session
        .start_recording(RecordRequest::new("small"), &mut DetachedClient::default())
        .unwrap();
    for _ in 0..8 {
        session.capture_outgoing_message(&[0xEE; 32], Vec3::ZERO).unwrap();
    }
    let summary = session.stop_recording(&mut store).unwrap();

    assert_eq!(summary.name, "small.rec");
    assert_eq!(summary.frame_count, 9);
    assert!(store.get("small.rec").is_some());
}
