//! Input and orientation front-end for an interactive character viewer.
//!
//! Converts raw touch events and accelerometer/magnetometer samples into
//! filtered view-control signals (pan, zoom, drag target, flick, tap, shake,
//! tilt) for a rendering/animation layer. The host owns the window, the
//! sensors and the renderer; [`GestureRouter`] is the single entry point.
//!
//! ```ignore
//! let mut router = GestureRouter::new(ViewerConfig::default(), SensorCapabilities::ALL);
//! router.resize(1080.0, 1920.0);
//! let feed = router.sensor_feed(); // move to the sensor thread
//!
//! // per frame
//! let signals = router.update(Instant::now());
//! for event in router.drain_events() { /* ... */ }
//! ```

pub mod config;
pub mod config_watcher;
pub mod constants;
pub mod error;
pub mod input;
pub mod perf;
pub mod sensors;
pub mod trace;
pub mod types;

pub use config::ViewerConfig;
pub use error::{ConfigError, TraceError};
pub use input::{ControlSignals, GestureRouter, ViewerEvent};
pub use sensors::{OrientationFusion, SensorCapabilities, SensorFeed, SensorSample};
pub use types::{Point, Rect, ScreenRotation, Vec3};
