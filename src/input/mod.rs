//! Touch input handling for the viewer.
//!
//! This module implements the touch side of the pipeline: coordinate
//! conversion, pinch-zoom and pan, flick and tap detection, and the smoothed
//! drag target.
//!
//! ## Architecture
//!
//! The touch tracker uses an explicit state machine (`TouchState`) for the
//! finger mode, so per-mode data only exists while that mode is active.
//!
//! ## Modules
//!
//! - `state` - Touch state machine enum and helper methods
//! - `touch` - Raw samples -> position, delta, pinch and flick signals
//! - `coords` - Device pixel -> logical screen transform
//! - `transform` - Zoom/pan view transform with clamping
//! - `drag` - Smoothed drag target
//! - `router` - Composition root, emits viewer events

pub mod coords;
mod drag;
mod router;
mod state;
mod touch;
mod transform;

pub use drag::DragTarget;
pub use router::{ControlSignals, GestureRouter, ViewerEvent};
pub use state::TouchState;
pub use touch::TouchTracker;
pub use transform::{ViewSnapshot, ViewTransform};
