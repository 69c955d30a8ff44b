//! Gesture routing - the composition root of the input pipeline.
//!
//! Receives raw touch events, resize/rotation notifications and frame ticks
//! from the host, drives the touch tracker, view transform, drag target and
//! orientation fusion, and queues high-level [`ViewerEvent`]s for the
//! rendering/animation layer.
//!
//! Coordinate chain for every touch point:
//!
//! ```text
//! device px --DeviceToScreen--> logical screen --ViewTransform^-1--> view space
//! ```
//!
//! ## Performance Notes
//!
//! Touch moves arrive at display rate or faster. Enable profiling with
//! `cargo build --features profiling` to time them.

use crate::config::ViewerConfig;
use crate::input::coords::DeviceToScreen;
use crate::input::drag::DragTarget;
use crate::input::touch::TouchTracker;
use crate::input::transform::{ViewSnapshot, ViewTransform};
use crate::profile_scope;
use crate::sensors::{OrientationFusion, SensorCapabilities, SensorFeed};
use crate::types::{Point, ScreenRotation, Vec3};
use serde::Serialize;
use std::time::Instant;
use tracing::{debug, trace, warn};

/// High-level event for the animation layer. Coordinates are in view space.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum ViewerEvent {
    Tap { x: f32, y: f32 },
    Flick { start_x: f32, start_y: f32 },
    MaxScaleReached,
    MinScaleReached,
    Shake,
}

/// Continuous control values, produced once per frame.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct ControlSignals {
    pub drag: Point,
    pub tilt: Vec3,
    pub shake: f32,
    pub view: ViewSnapshot,
}

/// Single-finger press that may still become a tap.
#[derive(Clone, Copy, Debug)]
struct Press {
    down_at: Instant,
    origin: Point,
    /// Never left the tap slop
    still: bool,
    /// Second down of a double tap; never reported as a tap
    second_tap: bool,
}

/// Completed tap waiting out the double-tap window.
#[derive(Clone, Copy, Debug)]
struct PendingTap {
    at: Point,
    origin: Point,
    deadline: Instant,
}

pub struct GestureRouter {
    config: ViewerConfig,
    viewport: Option<(f32, f32)>,
    device_to_screen: DeviceToScreen,
    view: ViewTransform,
    touches: TouchTracker,
    drag: DragTarget,
    orientation: OrientationFusion,
    press: Option<Press>,
    pending_tap: Option<PendingTap>,
    events: Vec<ViewerEvent>,
}

impl GestureRouter {
    /// Create a router and start sensing if the device supports it.
    pub fn new(config: ViewerConfig, capabilities: SensorCapabilities) -> Self {
        let mut view = ViewTransform::new();
        Self::configure_view(&mut view, &config);

        let orientation = OrientationFusion::new(config.orientation.clone(), capabilities);
        orientation.start();

        Self {
            viewport: None,
            device_to_screen: DeviceToScreen::identity(),
            view,
            touches: TouchTracker::new(),
            drag: DragTarget::new(config.drag.ease),
            orientation,
            press: None,
            pending_tap: None,
            events: Vec::new(),
            config,
        }
    }

    fn configure_view(view: &mut ViewTransform, config: &ViewerConfig) {
        let v = &config.view;
        view.set_min_scale(v.min_scale);
        view.set_max_scale(v.max_scale);
        let max = v.max_rect;
        view.set_max_screen_rect(max.left, max.right, max.bottom, max.top);
    }

    pub fn config(&self) -> &ViewerConfig {
        &self.config
    }

    /// Apply a reloaded config without resetting gesture or view state.
    ///
    /// The current scale and translation are pulled back inside the new
    /// bounds.
    pub fn apply_config(&mut self, config: ViewerConfig) {
        Self::configure_view(&mut self.view, &config);
        self.drag.set_ease(config.drag.ease);
        self.orientation.set_config(config.orientation.clone());
        self.config = config;

        if let Some((width, height)) = self.viewport {
            self.resize(width, height);
        }
        self.view.adjust_scale(0.0, 0.0, 1.0);
        self.view.adjust_translate(0.0, 0.0);
        debug!("Viewer config applied");
    }

    // ========================================================================
    // Host notifications
    // ========================================================================

    /// The viewport changed size (device pixels).
    pub fn resize(&mut self, width: f32, height: f32) {
        let view_cfg = &self.config.view;
        let logical_width = view_cfg.logical_width();
        let Some(d2s) = DeviceToScreen::for_viewport(width, height, logical_width) else {
            warn!(width, height, "Ignoring resize to a degenerate viewport");
            return;
        };

        let half_height = height / width * logical_width / 2.0;
        self.view.set_screen_rect(
            view_cfg.logical_left,
            view_cfg.logical_right,
            -half_height,
            half_height,
        );
        self.device_to_screen = d2s;
        self.viewport = Some((width, height));
        debug!(width, height, "Viewport resized");
    }

    pub fn set_screen_rotation(&mut self, rotation: ScreenRotation) {
        self.orientation.set_screen_rotation(rotation);
    }

    /// Host paused: stop sensing.
    pub fn pause(&mut self) {
        self.orientation.stop();
    }

    /// Host resumed: start sensing. Returns false when sensors are missing.
    pub fn resume(&mut self) -> bool {
        self.orientation.start()
    }

    /// Handle for the platform sensor thread.
    pub fn sensor_feed(&self) -> SensorFeed {
        self.orientation.feed()
    }

    // ========================================================================
    // Touch events
    // ========================================================================

    /// Fingers went down. Only the first two points are used.
    ///
    /// A single finger landing near a tap that is still waiting for
    /// confirmation turns both into a double tap, and neither is reported.
    pub fn touch_down(&mut self, points: &[Point], now: Instant) {
        trace!(count = points.len(), "touch_down");
        self.confirm_tap(now);

        let mut second_tap = false;
        if let Some(pending) = self.pending_tap.take() {
            let slop = self.config.gestures.double_tap_slop;
            match points {
                [p] if pending.origin.distance(*p) <= slop => {
                    debug!("Double tap");
                    second_tap = true;
                }
                [] => self.pending_tap = Some(pending),
                _ => self.push_tap(pending),
            }
        }

        match points {
            [] => return,
            [p] => {
                self.touches.touch_began(*p);
                self.press = Some(Press {
                    down_at: now,
                    origin: *p,
                    still: true,
                    second_tap,
                });
            }
            [p1, p2, ..] => {
                self.touches.touch_began_pair(*p1, *p2);
                self.press = None;
            }
        }
        self.follow_touch();
    }

    /// Fingers moved. Only the first two points are used.
    pub fn touch_move(&mut self, points: &[Point]) {
        profile_scope!("touch_move");

        match points {
            [] => {}
            [p] => {
                self.touches.touches_moved(*p);
                if self.touches.flick_distance() > self.config.gestures.tap_slop {
                    if let Some(press) = self.press.as_mut() {
                        press.still = false;
                    }
                }
                self.follow_touch();
                self.check_flick();
            }
            [p1, p2, ..] => {
                self.press = None;
                let was_pinching = self.touches.state().is_double_touch();
                self.touches.touches_moved_pair(*p1, *p2);
                if was_pinching {
                    self.apply_pinch();
                }
                self.follow_touch();
            }
        }
    }

    /// All fingers lifted.
    ///
    /// A short, still, single-finger press becomes a pending tap. It is
    /// reported by [`update`](Self::update) once the double-tap window has
    /// passed, or right away if the press already outlasted that window.
    pub fn touch_up(&mut self, now: Instant) {
        trace!("touch_up");
        if let Some(press) = self.press.take() {
            if press.still && !press.second_tap && self.touches.is_single_touch() {
                let held = now.saturating_duration_since(press.down_at);
                if held >= self.config.gestures.long_press_timeout() {
                    trace!(held_ms = held.as_millis() as u64, "Long press, no tap");
                } else {
                    self.pending_tap = Some(PendingTap {
                        at: self.device_to_view(self.touches.current()),
                        origin: press.origin,
                        deadline: press.down_at + self.config.gestures.double_tap_timeout(),
                    });
                    self.confirm_tap(now);
                }
            }
        }
        self.end_touch();
    }

    /// The host cancelled the gesture; no tap is reported.
    pub fn touch_cancel(&mut self) {
        trace!("touch_cancel");
        self.end_touch();
    }

    fn end_touch(&mut self) {
        self.press = None;
        self.touches.touch_ended();
        self.drag.set(0.0, 0.0);
    }

    /// Report the pending tap once its double-tap window has closed.
    fn confirm_tap(&mut self, now: Instant) {
        if let Some(pending) = self.pending_tap {
            if now >= pending.deadline {
                self.pending_tap = None;
                self.push_tap(pending);
            }
        }
    }

    fn push_tap(&mut self, pending: PendingTap) {
        self.push_event(ViewerEvent::Tap {
            x: pending.at.x,
            y: pending.at.y,
        });
    }

    /// True while a tap waits for its double-tap window to close
    pub fn has_pending_tap(&self) -> bool {
        self.pending_tap.is_some()
    }

    fn follow_touch(&mut self) {
        let at = self.device_to_view(self.touches.current());
        self.drag.set(at.x, at.y);
    }

    fn check_flick(&mut self) {
        if let Some(start) = self.touches.take_flick(self.config.gestures.flick_distance) {
            let at = self.device_to_view(start);
            self.push_event(ViewerEvent::Flick {
                start_x: at.x,
                start_y: at.y,
            });
        }
    }

    fn apply_pinch(&mut self) {
        let dx = self.touches.delta_x() * self.device_to_screen.scale_x();
        let dy = self.touches.delta_y() * self.device_to_screen.scale_y();
        let center = self.device_to_view(self.touches.center());
        let scale = self.touches.scale();
        trace!(dx, dy, cx = center.x, cy = center.y, scale, "pinch");
        self.update_view(dx, dy, center.x, center.y, scale);
    }

    /// Zoom around (cx, cy) in view space, then pan by (dx, dy) in logical
    /// screen units. Scale-limit events fire only on the transition edge.
    fn update_view(&mut self, dx: f32, dy: f32, cx: f32, cy: f32, scale: f32) {
        let was_max = self.view.is_max_scale();
        let was_min = self.view.is_min_scale();

        self.view.adjust_scale(cx, cy, scale);
        self.view.adjust_translate(dx, dy);

        if !was_max && self.view.is_max_scale() {
            self.push_event(ViewerEvent::MaxScaleReached);
        }
        if !was_min && self.view.is_min_scale() {
            self.push_event(ViewerEvent::MinScaleReached);
        }
    }

    // ========================================================================
    // Frame update
    // ========================================================================

    /// Advance per-frame filters. Call exactly once per rendered frame.
    pub fn update(&mut self, now: Instant) -> ControlSignals {
        self.confirm_tap(now);
        self.drag.update();
        self.orientation.update(now);

        if self.orientation.shake() > self.config.orientation.shake_threshold {
            debug!(shake = self.orientation.shake(), "Shake detected");
            self.push_event(ViewerEvent::Shake);
            self.orientation.reset_shake();
        }

        self.signals()
    }

    pub fn signals(&self) -> ControlSignals {
        ControlSignals {
            drag: self.drag.current(),
            tilt: self.orientation.tilt(),
            shake: self.orientation.shake(),
            view: self.view.snapshot(),
        }
    }

    fn push_event(&mut self, event: ViewerEvent) {
        trace!(?event, "Viewer event");
        self.events.push(event);
    }

    /// Take the queued events, oldest first.
    pub fn drain_events(&mut self) -> Vec<ViewerEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn pending_events(&self) -> &[ViewerEvent] {
        &self.events
    }

    // ========================================================================
    // Coordinate conversion
    // ========================================================================

    /// Convert a device pixel position to view space (for hit testing)
    pub fn device_to_view(&self, device: Point) -> Point {
        let screen = self.device_to_screen.transform(device);
        self.view.invert_transform(screen)
    }

    /// Convert a view-space position to device pixels
    pub fn view_to_device(&self, view: Point) -> Point {
        Point::new(
            self.device_to_screen.invert_x(self.view.transform_x(view.x)),
            self.device_to_screen.invert_y(self.view.transform_y(view.y)),
        )
    }

    pub fn view(&self) -> &ViewTransform {
        &self.view
    }

    pub fn device_to_screen(&self) -> &DeviceToScreen {
        &self.device_to_screen
    }

    pub fn touches(&self) -> &TouchTracker {
        &self.touches
    }

    pub fn drag(&self) -> &DragTarget {
        &self.drag
    }

    pub fn orientation(&self) -> &OrientationFusion {
        &self.orientation
    }
}
