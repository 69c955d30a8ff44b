//! Touch tracking - turns raw finger samples into gesture signals.
//!
//! Two-finger signals are incremental: pinch scale and pan delta are measured
//! against the previous two-finger sample, not the gesture start, so feeding
//! them to [`ViewTransform`](super::transform::ViewTransform) on every move
//! composes into a continuous pinch/pan.

use crate::input::state::TouchState;
use crate::types::Point;

#[derive(Debug, Clone)]
pub struct TouchTracker {
    state: TouchState,
    /// Where the gesture started (midpoint for two fingers)
    start: Point,
    /// Latest position (midpoint for two fingers)
    current: Point,
    /// Change of `current` on the last move
    delta: Point,
    /// Pinch ratio of the last two-finger move
    scale: f32,
}

impl Default for TouchTracker {
    fn default() -> Self {
        Self::new()
    }
}

impl TouchTracker {
    pub fn new() -> Self {
        Self {
            state: TouchState::Idle,
            start: Point::ZERO,
            current: Point::ZERO,
            delta: Point::ZERO,
            scale: 1.0,
        }
    }

    pub fn state(&self) -> &TouchState {
        &self.state
    }

    /// One finger went down.
    pub fn touch_began(&mut self, p: Point) {
        self.state = TouchState::SingleTouch {
            flick_available: true,
        };
        self.start = p;
        self.current = p;
        self.delta = Point::ZERO;
        self.scale = 1.0;
    }

    /// Two fingers went down. Flicks are single-finger only.
    pub fn touch_began_pair(&mut self, p1: Point, p2: Point) {
        let center = p1.midpoint(p2);
        self.state = TouchState::DoubleTouch {
            first: p1,
            second: p2,
        };
        self.start = center;
        self.current = center;
        self.delta = Point::ZERO;
        self.scale = 1.0;
    }

    /// One finger moved.
    pub fn touches_moved(&mut self, p: Point) {
        match self.state {
            TouchState::SingleTouch { .. } => {
                self.delta = p - self.current;
                self.current = p;
            }
            TouchState::DoubleTouch { .. } => {
                // A finger was lifted: `current` was the midpoint, so no delta
                self.state = TouchState::SingleTouch {
                    flick_available: false,
                };
                self.current = p;
                self.delta = Point::ZERO;
            }
            TouchState::Idle => self.touch_began(p),
        }
        self.scale = 1.0;
    }

    /// Two fingers moved.
    pub fn touches_moved_pair(&mut self, p1: Point, p2: Point) {
        let Some((prev1, prev2)) = self.state.finger_pair() else {
            // Second finger arrived mid-gesture; start measuring from here
            let start = self.start;
            let was_idle = self.state.is_idle();
            self.touch_began_pair(p1, p2);
            if !was_idle {
                self.start = start;
            }
            return;
        };

        let prev_distance = prev1.distance(prev2);
        let distance = p1.distance(p2);
        let center = p1.midpoint(p2);

        self.scale = if prev_distance > 0.0 {
            distance / prev_distance
        } else {
            1.0
        };
        self.delta = center - self.current;
        self.current = center;
        self.state = TouchState::DoubleTouch {
            first: p1,
            second: p2,
        };
    }

    /// All fingers up or gesture cancelled.
    pub fn touch_ended(&mut self) {
        self.state.reset();
        self.delta = Point::ZERO;
        self.scale = 1.0;
    }

    pub fn x(&self) -> f32 {
        self.current.x
    }

    pub fn y(&self) -> f32 {
        self.current.y
    }

    pub fn current(&self) -> Point {
        self.current
    }

    pub fn start(&self) -> Point {
        self.start
    }

    pub fn start_x(&self) -> f32 {
        self.start.x
    }

    pub fn start_y(&self) -> f32 {
        self.start.y
    }

    pub fn delta_x(&self) -> f32 {
        self.delta.x
    }

    pub fn delta_y(&self) -> f32 {
        self.delta.y
    }

    /// Pinch center of the last sample (same as `current` in two-finger mode)
    pub fn center(&self) -> Point {
        self.current
    }

    /// Ratio of current to previous finger distance; 1.0 outside pinches
    pub fn scale(&self) -> f32 {
        self.scale
    }

    pub fn is_single_touch(&self) -> bool {
        self.state.is_single_touch()
    }

    pub fn is_flick_available(&self) -> bool {
        self.state.is_flick_available()
    }

    pub fn disable_flick(&mut self) {
        self.state.disable_flick();
    }

    /// Straight-line distance from the gesture start to the current point.
    pub fn flick_distance(&self) -> f32 {
        self.start.distance(self.current)
    }

    /// Fire the flick once per touch-down when the distance exceeds `threshold`.
    ///
    /// Returns the gesture start point on the firing call.
    pub fn take_flick(&mut self, threshold: f32) -> Option<Point> {
        if !self.is_flick_available() || self.flick_distance() <= threshold {
            return None;
        }
        self.disable_flick();
        Some(self.start)
    }
}
