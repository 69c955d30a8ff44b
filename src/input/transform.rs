//! View transformations - zoom, pan, coordinate conversion.
//!
//! The view transform maps view space (where content is laid out) onto the
//! logical screen:
//!
//! ```text
//! screen = scale * view + translate
//! ```
//!
//! Scale is always within `[min_scale, max_scale]`. After a translation the
//! maximum screen rect, mapped through the transform, still covers the logical
//! screen rect, so panning never reveals anything outside the max rect.

use crate::constants::{
    VIEW_DEFAULT_SCALE, VIEW_LOGICAL_LEFT, VIEW_LOGICAL_MAX_BOTTOM, VIEW_LOGICAL_MAX_LEFT,
    VIEW_LOGICAL_MAX_RIGHT, VIEW_LOGICAL_MAX_TOP, VIEW_LOGICAL_RIGHT, VIEW_MAX_SCALE,
    VIEW_MIN_SCALE,
};
use crate::types::{Point, Rect};
use serde::{Deserialize, Serialize};

/// Scale and translation handed to the renderer each frame.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ViewSnapshot {
    pub scale: f32,
    pub translate_x: f32,
    pub translate_y: f32,
}

#[derive(Clone, Debug)]
pub struct ViewTransform {
    scale: f32,
    translate_x: f32,
    translate_y: f32,
    min_scale: f32,
    max_scale: f32,
    screen_rect: Rect,
    max_screen_rect: Rect,
}

impl Default for ViewTransform {
    fn default() -> Self {
        Self::new()
    }
}

impl ViewTransform {
    pub fn new() -> Self {
        Self {
            scale: VIEW_DEFAULT_SCALE,
            translate_x: 0.0,
            translate_y: 0.0,
            min_scale: VIEW_MIN_SCALE,
            max_scale: VIEW_MAX_SCALE,
            screen_rect: Rect::new(VIEW_LOGICAL_LEFT, VIEW_LOGICAL_RIGHT, -1.0, 1.0),
            max_screen_rect: Rect::new(
                VIEW_LOGICAL_MAX_LEFT,
                VIEW_LOGICAL_MAX_RIGHT,
                VIEW_LOGICAL_MAX_BOTTOM,
                VIEW_LOGICAL_MAX_TOP,
            ),
        }
    }

    /// Set the logical screen bounds the viewport corresponds to.
    pub fn set_screen_rect(&mut self, left: f32, right: f32, bottom: f32, top: f32) {
        self.screen_rect = Rect::new(left, right, bottom, top);
    }

    /// Set the area panning may reveal, in view space.
    pub fn set_max_screen_rect(&mut self, left: f32, right: f32, bottom: f32, top: f32) {
        self.max_screen_rect = Rect::new(left, right, bottom, top);
    }

    pub fn set_max_scale(&mut self, max_scale: f32) {
        self.max_scale = max_scale;
    }

    pub fn set_min_scale(&mut self, min_scale: f32) {
        self.min_scale = min_scale;
    }

    pub fn screen_rect(&self) -> Rect {
        self.screen_rect
    }

    pub fn max_screen_rect(&self) -> Rect {
        self.max_screen_rect
    }

    pub fn scale(&self) -> f32 {
        self.scale
    }

    pub fn translate_x(&self) -> f32 {
        self.translate_x
    }

    pub fn translate_y(&self) -> f32 {
        self.translate_y
    }

    pub fn min_scale(&self) -> f32 {
        self.min_scale
    }

    pub fn max_scale(&self) -> f32 {
        self.max_scale
    }

    /// Multiply the scale by `delta` around the view-space point (cx, cy).
    ///
    /// The result is clamped to the scale bounds; a clamped scale is set to the
    /// bound value itself. The translation is re-centered so that (cx, cy)
    /// still maps to the same screen point afterwards.
    pub fn adjust_scale(&mut self, cx: f32, cy: f32, delta: f32) {
        if !delta.is_finite() || delta <= 0.0 {
            return;
        }

        let target = self.scale * delta;
        let new_scale = if target < self.min_scale {
            self.min_scale
        } else if target > self.max_scale {
            self.max_scale
        } else {
            target
        };

        self.translate_x += cx * (self.scale - new_scale);
        self.translate_y += cy * (self.scale - new_scale);
        self.scale = new_scale;
    }

    /// Shift the translation by (dx, dy), clamping per axis so the max screen
    /// rect keeps covering the logical screen.
    pub fn adjust_translate(&mut self, dx: f32, dy: f32) {
        let mut dx = dx;
        let mut dy = dy;
        let max = self.max_screen_rect;
        let screen = self.screen_rect;

        if self.scale * max.left + self.translate_x + dx > screen.left {
            dx = screen.left - self.scale * max.left - self.translate_x;
        }
        if self.scale * max.right + self.translate_x + dx < screen.right {
            dx = screen.right - self.scale * max.right - self.translate_x;
        }

        if self.scale * max.top + self.translate_y + dy < screen.top {
            dy = screen.top - self.scale * max.top - self.translate_y;
        }
        if self.scale * max.bottom + self.translate_y + dy > screen.bottom {
            dy = screen.bottom - self.scale * max.bottom - self.translate_y;
        }

        self.translate_x += dx;
        self.translate_y += dy;
    }

    /// Exact comparison: clamping assigns `max_scale` itself, so no tolerance
    /// is needed.
    pub fn is_max_scale(&self) -> bool {
        self.scale == self.max_scale
    }

    pub fn is_min_scale(&self) -> bool {
        self.scale == self.min_scale
    }

    /// Convert a view-space X to logical screen X
    #[inline]
    pub fn transform_x(&self, x: f32) -> f32 {
        self.scale * x + self.translate_x
    }

    /// Convert a view-space Y to logical screen Y
    #[inline]
    pub fn transform_y(&self, y: f32) -> f32 {
        self.scale * y + self.translate_y
    }

    /// Convert a logical screen X back to view space (for hit testing)
    #[inline]
    pub fn invert_transform_x(&self, screen_x: f32) -> f32 {
        (screen_x - self.translate_x) / self.scale
    }

    /// Convert a logical screen Y back to view space
    #[inline]
    pub fn invert_transform_y(&self, screen_y: f32) -> f32 {
        (screen_y - self.translate_y) / self.scale
    }

    pub fn invert_transform(&self, screen: Point) -> Point {
        Point::new(
            self.invert_transform_x(screen.x),
            self.invert_transform_y(screen.y),
        )
    }

    /// The logical screen rect expressed in view space.
    pub fn visible_rect(&self) -> Rect {
        Rect::new(
            self.invert_transform_x(self.screen_rect.left),
            self.invert_transform_x(self.screen_rect.right),
            self.invert_transform_y(self.screen_rect.bottom),
            self.invert_transform_y(self.screen_rect.top),
        )
    }

    pub fn snapshot(&self) -> ViewSnapshot {
        ViewSnapshot {
            scale: self.scale,
            translate_x: self.translate_x,
            translate_y: self.translate_y,
        }
    }

    /// Column-major 4x4 matrix for the renderer.
    pub fn to_matrix(&self) -> [f32; 16] {
        [
            self.scale, 0.0, 0.0, 0.0, //
            0.0, self.scale, 0.0, 0.0, //
            0.0, 0.0, 1.0, 0.0, //
            self.translate_x, self.translate_y, 0.0, 1.0,
        ]
    }
}
