//! Integration tests for trace parsing and replay.

use stageview::config::ViewerConfig;
use stageview::error::TraceError;
use stageview::input::ViewerEvent;
use stageview::sensors::SensorCapabilities;
use stageview::trace::{Replay, TraceRecord, load_trace, parse_trace};

const TAP_TRACE: &str = r#"
# tap in the middle of a 1000x2000 viewport
{"type":"resize","width":1000,"height":2000}
{"type":"touch_down","points":[{"x":500,"y":1000}]}
{"type":"frame","at_ms":0}
{"type":"touch_move","points":[{"x":502,"y":1001}]}
{"type":"frame","at_ms":16}
{"type":"touch_up"}
{"type":"frame","at_ms":33}
{"type":"frame","at_ms":350}
"#;

#[test]
fn test_replay_reports_tap_and_frames() {
    let records = parse_trace(TAP_TRACE).unwrap();
    assert_eq!(records.len(), 8);

    let mut replay = Replay::new(ViewerConfig::default(), SensorCapabilities::NONE);
    let outcome = replay.run(&records);

    assert_eq!(outcome.frames, 4);
    assert_eq!(outcome.events.len(), 1);
    assert!(matches!(outcome.events[0], ViewerEvent::Tap { .. }));
    assert!(outcome.last_signals.is_some());
}

#[test]
fn test_replay_shake_trace() {
    let mut text = String::from("{\"type\":\"resize\",\"width\":1000,\"height\":2000}\n");
    for i in 0..8 {
        let x = if i % 2 == 0 { 9.8 } else { -9.8 };
        text.push_str(&format!(
            "{{\"type\":\"accelerometer\",\"values\":[{x},0,0]}}\n\
             {{\"type\":\"magnetometer\",\"values\":[0,22,-40]}}\n"
        ));
    }
    text.push_str("{\"type\":\"frame\",\"at_ms\":16}\n");

    let records = parse_trace(&text).unwrap();
    let mut replay = Replay::new(ViewerConfig::default(), SensorCapabilities::ALL);
    let outcome = replay.run(&records);

    assert_eq!(outcome.events, vec![ViewerEvent::Shake]);
}

#[test]
fn test_apply_returns_signals_only_for_frames() {
    let mut replay = Replay::new(ViewerConfig::default(), SensorCapabilities::NONE);
    assert!(replay.apply(&TraceRecord::Pause).is_none());
    assert!(replay.apply(&TraceRecord::Frame { at_ms: 0 }).is_some());
}

#[test]
fn test_load_trace_from_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("tap.jsonl");
    std::fs::write(&path, TAP_TRACE).unwrap();

    let records = load_trace(&path).unwrap();
    assert_eq!(records.first(), Some(&TraceRecord::Resize {
        width: 1000.0,
        height: 2000.0
    }));
}

#[test]
fn test_load_missing_trace_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let result = load_trace(&dir.path().join("missing.jsonl"));
    assert!(matches!(result, Err(TraceError::Io(_))));
}

#[test]
fn test_replayed_double_tap_is_not_reported() {
    let text = r#"
{"type":"resize","width":1000,"height":2000}
{"type":"frame","at_ms":0}
{"type":"touch_down","points":[{"x":300,"y":400}]}
{"type":"frame","at_ms":50}
{"type":"touch_up"}
{"type":"frame","at_ms":120}
{"type":"touch_down","points":[{"x":302,"y":401}]}
{"type":"frame","at_ms":170}
{"type":"touch_up"}
{"type":"frame","at_ms":600}
"#;
    let records = parse_trace(text).unwrap();
    let mut replay = Replay::new(ViewerConfig::default(), SensorCapabilities::NONE);
    let outcome = replay.run(&records);

    assert!(outcome.events.is_empty(), "events: {:?}", outcome.events);
}
