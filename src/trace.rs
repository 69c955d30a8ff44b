//! Recorded input traces and their replay.
//!
//! A trace is a JSON-lines file, one [`TraceRecord`] per line, e.g.
//!
//! ```text
//! {"type":"resize","width":1080,"height":1920}
//! {"type":"touch_down","points":[{"x":540,"y":960}]}
//! {"type":"frame","at_ms":16}
//! ```
//!
//! Blank lines and lines starting with `#` are skipped. Replaying a trace
//! through [`Replay`] drives a [`GestureRouter`] exactly as a host would:
//! sensor samples go through the [`SensorFeed`](crate::sensors::SensorFeed)
//! and frame records call [`GestureRouter::update`]. Touch records are
//! stamped with the time of the latest frame, so tap confirmation and long
//! presses follow the frame clock.

use crate::config::ViewerConfig;
use crate::error::{TraceError, TraceResult};
use crate::input::{ControlSignals, GestureRouter, ViewerEvent};
use crate::sensors::{SensorCapabilities, SensorSample};
use crate::types::{Point, ScreenRotation, Vec3};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::{Duration, Instant};
use tracing::{debug, warn};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum TraceRecord {
    Resize { width: f32, height: f32 },
    TouchDown { points: Vec<Point> },
    TouchMove { points: Vec<Point> },
    TouchUp,
    TouchCancel,
    Accelerometer { values: [f32; 3] },
    Magnetometer { values: [f32; 3] },
    /// Display rotation quadrant (0-3)
    Rotation { quadrant: u8 },
    Pause,
    Resume,
    /// Frame tick, milliseconds since the start of the trace
    Frame { at_ms: u64 },
}

/// Parse JSON-lines trace text.
pub fn parse_trace(text: &str) -> TraceResult<Vec<TraceRecord>> {
    let mut records = Vec::new();
    for (idx, line) in text.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let record = serde_json::from_str(line).map_err(|source| TraceError::Parse {
            line: idx + 1,
            source,
        })?;
        records.push(record);
    }
    Ok(records)
}

pub fn load_trace(path: &Path) -> TraceResult<Vec<TraceRecord>> {
    let text = std::fs::read_to_string(path)?;
    parse_trace(&text)
}

/// What a replay produced.
#[derive(Clone, Debug, Default)]
pub struct ReplayOutcome {
    pub events: Vec<ViewerEvent>,
    pub frames: usize,
    pub last_signals: Option<ControlSignals>,
}

pub struct Replay {
    router: GestureRouter,
    epoch: Instant,
    clock: Instant,
}

impl Replay {
    pub fn new(config: ViewerConfig, capabilities: SensorCapabilities) -> Self {
        let epoch = Instant::now();
        Self {
            router: GestureRouter::new(config, capabilities),
            epoch,
            clock: epoch,
        }
    }

    pub fn router(&self) -> &GestureRouter {
        &self.router
    }

    /// Feed one record. Returns the frame's signals for `frame` records.
    pub fn apply(&mut self, record: &TraceRecord) -> Option<ControlSignals> {
        let router = &mut self.router;
        let now = self.clock;
        match record {
            TraceRecord::Resize { width, height } => router.resize(*width, *height),
            TraceRecord::TouchDown { points } => router.touch_down(points, now),
            TraceRecord::TouchMove { points } => router.touch_move(points),
            TraceRecord::TouchUp => router.touch_up(now),
            TraceRecord::TouchCancel => router.touch_cancel(),
            TraceRecord::Accelerometer { values } => {
                router
                    .sensor_feed()
                    .push(SensorSample::Accelerometer(Vec3::from_array(*values)));
            }
            TraceRecord::Magnetometer { values } => {
                router
                    .sensor_feed()
                    .push(SensorSample::Magnetometer(Vec3::from_array(*values)));
            }
            TraceRecord::Rotation { quadrant } => match ScreenRotation::from_quadrant(*quadrant) {
                Some(rotation) => router.set_screen_rotation(rotation),
                None => warn!(quadrant, "Ignoring invalid rotation quadrant"),
            },
            TraceRecord::Pause => router.pause(),
            TraceRecord::Resume => {
                router.resume();
            }
            TraceRecord::Frame { at_ms } => {
                self.clock = self.epoch + Duration::from_millis(*at_ms);
                return Some(router.update(self.clock));
            }
        }
        None
    }

    /// Replay every record and collect the events in order.
    pub fn run(&mut self, records: &[TraceRecord]) -> ReplayOutcome {
        let mut outcome = ReplayOutcome::default();
        for record in records {
            if let Some(signals) = self.apply(record) {
                outcome.frames += 1;
                outcome.last_signals = Some(signals);
            }
            outcome.events.extend(self.router.drain_events());
        }
        debug!(
            records = records.len(),
            frames = outcome.frames,
            events = outcome.events.len(),
            "Replay finished"
        );
        outcome
    }
}
