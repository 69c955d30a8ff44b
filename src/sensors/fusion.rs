//! Orientation fusion - tilt and shake from accelerometer + magnetometer.
//!
//! Runs at two rates:
//!
//! - **Per sample** ([`OrientationFusion::on_sample`]): each complete
//!   accelerometer/magnetometer pair yields a destination tilt, remapped for
//!   the screen rotation, and feeds the shake accumulator.
//! - **Per frame** ([`OrientationFusion::update`]): drains pending samples,
//!   then moves the published tilt toward the destination with a bounded step
//!   followed by frame-time-independent exponential smoothing.
//!
//! On a device without both sensors the feed never starts, and tilt and shake
//! stay at zero.

use crate::config::OrientationConfig;
use crate::profile_scope;
use crate::sensors::feed::{SensorCapabilities, SensorFeed, SensorSample};
use crate::sensors::rotation::{remap_for_rotation, rotation_matrix};
use crate::types::{ScreenRotation, Vec3};
use std::time::Instant;
use tracing::trace;

#[derive(Debug)]
pub struct OrientationFusion {
    config: OrientationConfig,
    feed: SensorFeed,
    rotation: ScreenRotation,

    accelerometer: Option<Vec3>,
    magnetometer: Option<Vec3>,
    /// Set by each magnetometer sample, consumed by the next complete pair
    ready: bool,

    destination: Vec3,
    last_destination: Vec3,
    /// Destination approached with a bounded per-update step
    rate_limited: Vec3,
    /// Smoothed output
    published: Vec3,
    shake: f32,
    last_update: Option<Instant>,
}

impl OrientationFusion {
    pub fn new(config: OrientationConfig, capabilities: SensorCapabilities) -> Self {
        Self {
            config,
            feed: SensorFeed::new(capabilities),
            rotation: ScreenRotation::Deg0,
            accelerometer: None,
            magnetometer: None,
            ready: false,
            destination: Vec3::ZERO,
            last_destination: Vec3::ZERO,
            rate_limited: Vec3::ZERO,
            published: Vec3::ZERO,
            shake: 0.0,
            last_update: None,
        }
    }

    /// Handle for the platform sensor thread.
    pub fn feed(&self) -> SensorFeed {
        self.feed.clone()
    }

    pub fn set_config(&mut self, config: OrientationConfig) {
        self.config = config;
    }

    pub fn set_screen_rotation(&mut self, rotation: ScreenRotation) {
        if rotation != self.rotation {
            trace!(degrees = rotation.degrees(), "Screen rotation changed");
        }
        self.rotation = rotation;
    }

    pub fn screen_rotation(&self) -> ScreenRotation {
        self.rotation
    }

    /// Start sensing (host resumed). Returns false when sensors are missing.
    pub fn start(&self) -> bool {
        self.feed.start()
    }

    /// Stop sensing (host paused).
    pub fn stop(&self) {
        self.feed.stop();
    }

    /// Process one raw sample at sensor rate.
    pub fn on_sample(&mut self, sample: SensorSample) {
        if !self.feed.is_supported() {
            return;
        }

        match sample {
            SensorSample::Accelerometer(values) => self.accelerometer = Some(values),
            SensorSample::Magnetometer(values) => {
                self.magnetometer = Some(values);
                self.ready = true;
            }
        }

        let (Some(accel), Some(mag)) = (self.accelerometer, self.magnetometer) else {
            return;
        };
        if !self.ready {
            return;
        }
        self.ready = false;

        // Low g (shaking through free fall) still moves the destination
        if rotation_matrix(accel, mag).is_none() {
            trace!(?accel, ?mag, "Degenerate rotation matrix");
        }

        self.set_destination(remap_for_rotation(self.rotation, accel));
    }

    fn set_destination(&mut self, destination: Vec3) {
        self.destination = destination;

        let movement = destination.manhattan_distance(self.last_destination);
        let decay = self.config.shake_decay;
        self.shake = self.shake * decay + movement * (1.0 - decay);

        self.last_destination = destination;
    }

    /// Process every sample queued by the sensor thread.
    pub fn drain_pending(&mut self) -> usize {
        profile_scope!("sensor_drain");

        let pending = self.feed.drain();
        let count = pending.len();
        for sample in pending {
            self.on_sample(sample);
        }
        count
    }

    /// Per-frame update.
    pub fn update(&mut self, now: Instant) {
        self.drain_pending();

        let max_step = self.config.max_tilt_step;
        let step = |target: f32, current: f32| (target - current).clamp(-max_step, max_step);
        self.rate_limited.x += step(self.destination.x, self.rate_limited.x);
        self.rate_limited.y += step(self.destination.y, self.rate_limited.y);
        self.rate_limited.z += step(self.destination.z, self.rate_limited.z);

        let weight = match self.last_update {
            Some(last) => {
                let elapsed_ms = now.saturating_duration_since(last).as_secs_f32() * 1000.0;
                self.smoothing_weight(elapsed_ms)
            }
            None => self.config.smoothing_cap,
        };
        self.last_update = Some(now);

        let blend = |published: f32, target: f32| published * (1.0 - weight) + target * weight;
        self.published = Vec3::new(
            blend(self.published.x, self.rate_limited.x),
            blend(self.published.y, self.rate_limited.y),
            blend(self.published.z, self.rate_limited.z),
        );
    }

    /// Smoothing weight for a frame of `elapsed_ms`, scaled against 60 Hz.
    pub fn smoothing_weight(&self, elapsed_ms: f32) -> f32 {
        let weight = self.config.smoothing_rate * elapsed_ms * 60.0 / 1000.0;
        weight.clamp(0.0, self.config.smoothing_cap)
    }

    /// Published tilt. Each axis is roughly in [-1, 1].
    pub fn tilt(&self) -> Vec3 {
        self.published
    }

    /// Tilt before the smoothing pass
    pub fn rate_limited(&self) -> Vec3 {
        self.rate_limited
    }

    /// Latest unfiltered, remapped tilt
    pub fn destination(&self) -> Vec3 {
        self.destination
    }

    /// Accumulated shake. Above ~1 the device was shaken noticeably.
    pub fn shake(&self) -> f32 {
        self.shake
    }

    /// Reset after consuming a shake so the same motion doesn't fire again.
    pub fn reset_shake(&mut self) {
        self.shake = 0.0;
    }
}
