//! Accelerometer + magnetometer fusion.
//!
//! - `feed` - Bounded queue between the sensor thread and the render thread
//! - `rotation` - Rotation matrix and screen-rotation remap table
//! - `fusion` - Tilt smoothing and shake accumulation

mod feed;
mod fusion;
pub mod rotation;

pub use feed::{SensorCapabilities, SensorFeed, SensorSample};
pub use fusion::OrientationFusion;
