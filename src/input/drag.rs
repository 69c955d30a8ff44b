//! Drag target - the smoothed point the character looks toward.
//!
//! [`DragTarget::update`] must run exactly once per rendered frame. The
//! approach is a fixed fraction per call, so a different cadence changes the
//! apparent speed.

use crate::constants::DRAG_EASE;
use crate::types::Point;

#[derive(Debug, Clone)]
pub struct DragTarget {
    current: Point,
    target: Point,
    ease: f32,
}

impl Default for DragTarget {
    fn default() -> Self {
        Self::new(DRAG_EASE)
    }
}

impl DragTarget {
    /// `ease` is clamped into (0, 1]; 1 snaps to the target every frame.
    pub fn new(ease: f32) -> Self {
        Self {
            current: Point::ZERO,
            target: Point::ZERO,
            ease: Self::sanitize_ease(ease),
        }
    }

    fn sanitize_ease(ease: f32) -> f32 {
        if ease.is_finite() && ease > 0.0 {
            ease.min(1.0)
        } else {
            DRAG_EASE
        }
    }

    pub fn set_ease(&mut self, ease: f32) {
        self.ease = Self::sanitize_ease(ease);
    }

    /// Move the target only; `current` follows on later updates.
    pub fn set(&mut self, x: f32, y: f32) {
        self.target = Point::new(x, y);
    }

    pub fn update(&mut self) {
        self.current.x += (self.target.x - self.current.x) * self.ease;
        self.current.y += (self.target.y - self.current.y) * self.ease;
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

    pub fn target(&self) -> Point {
        self.target
    }
}
