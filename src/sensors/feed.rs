//! Sensor feed - hands raw samples from the platform sensor thread to the
//! render thread.
//!
//! The host's sensor callback calls [`SensorFeed::push`] from its own thread;
//! [`OrientationFusion`](super::fusion::OrientationFusion) drains the queue on
//! its update cadence. The queue is bounded: when the render loop stalls, the
//! oldest samples are dropped rather than blocking the producer.

use crate::constants::SENSOR_QUEUE_CAPACITY;
use crate::types::Vec3;
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use tracing::{debug, warn};

/// One raw sensor reading in device coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "sensor", content = "values", rename_all = "snake_case")]
pub enum SensorSample {
    /// m/s^2, gravity included
    Accelerometer(Vec3),
    /// microtesla
    Magnetometer(Vec3),
}

/// Which sensors the host device provides.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SensorCapabilities {
    pub accelerometer: bool,
    pub magnetometer: bool,
}

impl SensorCapabilities {
    pub const ALL: SensorCapabilities = SensorCapabilities {
        accelerometer: true,
        magnetometer: true,
    };

    pub const NONE: SensorCapabilities = SensorCapabilities {
        accelerometer: false,
        magnetometer: false,
    };

    /// Fusion needs both sensors
    pub fn supports_fusion(&self) -> bool {
        self.accelerometer && self.magnetometer
    }
}

impl Default for SensorCapabilities {
    fn default() -> Self {
        Self::ALL
    }
}

struct FeedInner {
    queue: Mutex<VecDeque<SensorSample>>,
    active: AtomicBool,
    supported: bool,
    dropped: AtomicU64,
}

/// Cloneable, `Send` handle to the pending-sample queue.
#[derive(Clone)]
pub struct SensorFeed {
    inner: Arc<FeedInner>,
}

impl std::fmt::Debug for SensorFeed {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SensorFeed")
            .field("active", &self.is_active())
            .field("supported", &self.inner.supported)
            .field("pending", &self.pending())
            .finish()
    }
}

impl SensorFeed {
    /// Create an inactive feed. Call [`start`](Self::start) to accept samples.
    pub fn new(capabilities: SensorCapabilities) -> Self {
        Self {
            inner: Arc::new(FeedInner {
                queue: Mutex::new(VecDeque::with_capacity(SENSOR_QUEUE_CAPACITY)),
                active: AtomicBool::new(false),
                supported: capabilities.supports_fusion(),
                dropped: AtomicU64::new(0),
            }),
        }
    }

    /// Begin accepting samples. Stays inactive when a sensor is missing.
    pub fn start(&self) -> bool {
        if !self.inner.supported {
            debug!("Sensor fusion unavailable on this device, sensing disabled");
            return false;
        }
        self.inner.active.store(true, Ordering::Release);
        debug!("Sensor feed started");
        true
    }

    /// Stop accepting samples and discard pending ones.
    pub fn stop(&self) {
        self.inner.active.store(false, Ordering::Release);
        self.inner.queue.lock().clear();
        debug!("Sensor feed stopped");
    }

    pub fn is_active(&self) -> bool {
        self.inner.active.load(Ordering::Acquire)
    }

    pub fn is_supported(&self) -> bool {
        self.inner.supported
    }

    /// Queue a sample. Returns false if the feed is not active.
    pub fn push(&self, sample: SensorSample) -> bool {
        if !self.is_active() {
            return false;
        }
        let mut queue = self.inner.queue.lock();
        if queue.len() >= SENSOR_QUEUE_CAPACITY {
            queue.pop_front();
            let dropped = self.inner.dropped.fetch_add(1, Ordering::Relaxed) + 1;
            if dropped.is_power_of_two() {
                warn!(dropped, "Sensor queue full, dropping oldest samples");
            }
        }
        queue.push_back(sample);
        true
    }

    /// Take every pending sample, oldest first.
    pub fn drain(&self) -> VecDeque<SensorSample> {
        std::mem::take(&mut *self.inner.queue.lock())
    }

    pub fn pending(&self) -> usize {
        self.inner.queue.lock().len()
    }

    /// Samples discarded because the queue was full
    pub fn dropped(&self) -> u64 {
        self.inner.dropped.load(Ordering::Relaxed)
    }
}
