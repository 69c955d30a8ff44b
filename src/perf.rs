//! Hot path timing.
//!
//! Touch moves and sensor drains run on the render thread every frame. With
//! the `profiling` feature, [`profile_scope!`] wraps a block in a
//! [`ScopedTimer`] that warns when it runs over budget; without the feature
//! the macro expands to nothing.
//!
//! ```ignore
//! fn touch_move(&mut self, points: &[Point]) {
//!     profile_scope!("touch_move");
//!     // ...
//! }
//! ```

use std::time::Instant;
use tracing::warn;

/// Budget for a single hot path call, a tenth of a 60 FPS frame
pub const DEFAULT_THRESHOLD_MS: f64 = 1.667;

#[macro_export]
macro_rules! profile_scope {
    ($name:expr) => {
        #[cfg(feature = "profiling")]
        let _timer = $crate::perf::ScopedTimer::new($name, $crate::perf::DEFAULT_THRESHOLD_MS);
        #[cfg(not(feature = "profiling"))]
        let _ = $name;
    };
    ($name:expr, $threshold_ms:expr) => {
        #[cfg(feature = "profiling")]
        let _timer = $crate::perf::ScopedTimer::new($name, $threshold_ms);
        #[cfg(not(feature = "profiling"))]
        let _ = ($name, $threshold_ms);
    };
}

pub use crate::profile_scope;

/// RAII timer; warns on drop if the scope exceeded its threshold.
pub struct ScopedTimer {
    name: &'static str,
    start: Instant,
    threshold_ms: f64,
}

impl ScopedTimer {
    pub fn new(name: &'static str, threshold_ms: f64) -> Self {
        Self {
            name,
            start: Instant::now(),
            threshold_ms,
        }
    }

    pub fn elapsed_ms(&self) -> f64 {
        self.start.elapsed().as_secs_f64() * 1000.0
    }
}

impl Drop for ScopedTimer {
    fn drop(&mut self) {
        let elapsed = self.elapsed_ms();
        if elapsed > self.threshold_ms {
            warn!(
                operation = self.name,
                elapsed_ms = elapsed,
                threshold_ms = self.threshold_ms,
                "Slow operation"
            );
        }
    }
}
