//! Touch state machine - the finger mode a gesture is currently in.
//!
//! ## State Transitions
//!
//! ```text
//! Idle -> SingleTouch          (one finger down)
//! Idle -> DoubleTouch          (two fingers down)
//! SingleTouch -> DoubleTouch   (second finger down, or a two-finger move)
//! DoubleTouch -> SingleTouch   (one finger lifted, next move has one point)
//!
//! Any -> Idle                  (all fingers up or cancel)
//! ```

use crate::types::Point;

/// Finger mode of the active gesture.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum TouchState {
    /// No finger on the screen
    #[default]
    Idle,

    /// One finger down
    SingleTouch {
        /// Whether a flick can still fire during this gesture
        flick_available: bool,
    },

    /// Two fingers down
    DoubleTouch {
        /// Last sample of the first finger
        first: Point,
        /// Last sample of the second finger
        second: Point,
    },
}

impl TouchState {
    /// Returns true if the state is Idle
    pub fn is_idle(&self) -> bool {
        matches!(self, Self::Idle)
    }

    /// Returns true if exactly one finger is tracked
    pub fn is_single_touch(&self) -> bool {
        matches!(self, Self::SingleTouch { .. })
    }

    /// Returns true if two fingers are tracked
    pub fn is_double_touch(&self) -> bool {
        matches!(self, Self::DoubleTouch { .. })
    }

    /// Returns true if a flick may still fire
    pub fn is_flick_available(&self) -> bool {
        matches!(
            self,
            Self::SingleTouch {
                flick_available: true
            }
        )
    }

    /// Get the two finger positions, if in double touch
    pub fn finger_pair(&self) -> Option<(Point, Point)> {
        match self {
            Self::DoubleTouch { first, second } => Some((*first, *second)),
            _ => None,
        }
    }

    /// Stop flick detection for the rest of the gesture
    pub fn disable_flick(&mut self) {
        if let Self::SingleTouch { flick_available } = self {
            *flick_available = false;
        }
    }

    /// Reset to Idle state
    pub fn reset(&mut self) {
        *self = Self::Idle;
    }
}
