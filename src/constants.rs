//! Viewer-wide constants.
//!
//! Centralizes the default limits and filter weights. Every value here can be
//! overridden through [`crate::config::ViewerConfig`].

// ============================================================================
// Logical Screen
// ============================================================================

/// Left edge of the logical screen (view space units)
pub const VIEW_LOGICAL_LEFT: f32 = -1.0;

/// Right edge of the logical screen
pub const VIEW_LOGICAL_RIGHT: f32 = 1.0;

/// Bounds of the pannable area: left, right, bottom, top
pub const VIEW_LOGICAL_MAX_LEFT: f32 = -2.0;
pub const VIEW_LOGICAL_MAX_RIGHT: f32 = 2.0;
pub const VIEW_LOGICAL_MAX_BOTTOM: f32 = -2.0;
pub const VIEW_LOGICAL_MAX_TOP: f32 = 2.0;

// ============================================================================
// Zoom & Pan
// ============================================================================

/// Maximum zoom scale
pub const VIEW_MAX_SCALE: f32 = 2.0;

/// Minimum zoom scale
pub const VIEW_MIN_SCALE: f32 = 0.8;

/// Default zoom scale
pub const VIEW_DEFAULT_SCALE: f32 = 1.0;

// ============================================================================
// Gestures
// ============================================================================

/// Straight-line distance in device pixels a single touch must travel to flick
pub const FLICK_DISTANCE: f32 = 100.0;

/// Movement in device pixels still accepted as a tap
pub const TAP_SLOP: f32 = 16.0;

/// A tap is confirmed once no second tap started within this window
pub const DOUBLE_TAP_TIMEOUT_MS: u64 = 300;

/// Distance in device pixels between the two downs of a double tap
pub const DOUBLE_TAP_SLOP: f32 = 100.0;

/// Presses held this long are long presses, never taps
pub const LONG_PRESS_TIMEOUT_MS: u64 = 500;

/// Fraction of the remaining distance the drag target covers per frame
pub const DRAG_EASE: f32 = 0.15;

// ============================================================================
// Orientation
// ============================================================================

/// Standard gravity in m/s^2, used to normalize accelerometer samples
pub const GRAVITY_EARTH: f32 = 9.806_65;

/// Largest per-update step of the tilt vector on any axis
pub const MAX_TILT_STEP: f32 = 0.04;

/// Weight kept from the previous shake value on each sample
pub const SHAKE_DECAY: f32 = 0.7;

/// Shake value above which a shake event fires
pub const SHAKE_THRESHOLD: f32 = 1.5;

/// Tilt smoothing weight per 60 Hz frame
pub const TILT_SMOOTHING_RATE: f32 = 0.2;

/// Upper bound of the tilt smoothing weight
pub const TILT_SMOOTHING_CAP: f32 = 0.5;

/// Pending sensor samples kept before the oldest is dropped
pub const SENSOR_QUEUE_CAPACITY: usize = 64;
