//! Device pixel to logical screen conversion.
//!
//! Device coordinates have their origin at the top-left corner with Y growing
//! downward. The logical screen is centered on the viewport with Y growing
//! upward and spans `logical_width` units horizontally, so the vertical extent
//! follows from the aspect ratio.

use crate::types::Point;

/// Affine device -> logical screen transform (per-axis scale + offset).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DeviceToScreen {
    scale_x: f32,
    scale_y: f32,
    offset_x: f32,
    offset_y: f32,
}

impl Default for DeviceToScreen {
    fn default() -> Self {
        Self::identity()
    }
}

impl DeviceToScreen {
    pub const fn identity() -> Self {
        Self {
            scale_x: 1.0,
            scale_y: 1.0,
            offset_x: 0.0,
            offset_y: 0.0,
        }
    }

    /// Build the transform for a viewport of `width` x `height` device pixels.
    ///
    /// Returns `None` for a degenerate viewport.
    pub fn for_viewport(width: f32, height: f32, logical_width: f32) -> Option<Self> {
        if !(width > 0.0 && height > 0.0 && logical_width > 0.0) {
            return None;
        }
        let k = logical_width / width;
        Some(Self {
            scale_x: k,
            scale_y: -k,
            offset_x: -width / 2.0 * k,
            offset_y: height / 2.0 * k,
        })
    }

    #[inline]
    pub fn transform_x(&self, device_x: f32) -> f32 {
        self.scale_x * device_x + self.offset_x
    }

    #[inline]
    pub fn transform_y(&self, device_y: f32) -> f32 {
        self.scale_y * device_y + self.offset_y
    }

    #[inline]
    pub fn transform(&self, device: Point) -> Point {
        Point::new(self.transform_x(device.x), self.transform_y(device.y))
    }

    #[inline]
    pub fn invert_x(&self, screen_x: f32) -> f32 {
        (screen_x - self.offset_x) / self.scale_x
    }

    #[inline]
    pub fn invert_y(&self, screen_y: f32) -> f32 {
        (screen_y - self.offset_y) / self.scale_y
    }

    /// Scale applied to horizontal device deltas
    pub fn scale_x(&self) -> f32 {
        self.scale_x
    }

    /// Scale applied to vertical device deltas (negative: Y flips)
    pub fn scale_y(&self) -> f32 {
        self.scale_y
    }
}
