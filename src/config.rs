//! Viewer configuration.
//!
//! Stored as JSON. Every section and field is optional; missing values fall
//! back to the defaults in [`crate::constants`].

use crate::constants::{
    DOUBLE_TAP_SLOP, DOUBLE_TAP_TIMEOUT_MS, DRAG_EASE, FLICK_DISTANCE, LONG_PRESS_TIMEOUT_MS, MAX_TILT_STEP, SHAKE_DECAY, SHAKE_THRESHOLD, TAP_SLOP,
    TILT_SMOOTHING_CAP, TILT_SMOOTHING_RATE, VIEW_LOGICAL_LEFT, VIEW_LOGICAL_MAX_BOTTOM,
    VIEW_LOGICAL_MAX_LEFT, VIEW_LOGICAL_MAX_RIGHT, VIEW_LOGICAL_MAX_TOP, VIEW_LOGICAL_RIGHT,
    VIEW_MAX_SCALE, VIEW_MIN_SCALE,
};
use crate::error::{ConfigError, ConfigResult};
use crate::types::Rect;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::debug;

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewerConfig {
    pub view: ViewConfig,
    pub gestures: GestureConfig,
    pub drag: DragConfig,
    pub orientation: OrientationConfig,
}

/// Zoom bounds and logical screen layout.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewConfig {
    pub min_scale: f32,
    pub max_scale: f32,
    /// Horizontal extent of the logical screen; the vertical extent follows
    /// from the viewport aspect ratio
    pub logical_left: f32,
    pub logical_right: f32,
    /// Area panning may reveal
    pub max_rect: Rect,
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            min_scale: VIEW_MIN_SCALE,
            max_scale: VIEW_MAX_SCALE,
            logical_left: VIEW_LOGICAL_LEFT,
            logical_right: VIEW_LOGICAL_RIGHT,
            max_rect: Rect::new(
                VIEW_LOGICAL_MAX_LEFT,
                VIEW_LOGICAL_MAX_RIGHT,
                VIEW_LOGICAL_MAX_BOTTOM,
                VIEW_LOGICAL_MAX_TOP,
            ),
        }
    }
}

impl ViewConfig {
    pub fn logical_width(&self) -> f32 {
        (self.logical_right - self.logical_left).abs()
    }
}

/// Device-pixel thresholds for touch gestures.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GestureConfig {
    pub flick_distance: f32,
    pub tap_slop: f32,
    pub double_tap_slop: f32,
    pub double_tap_timeout_ms: u64,
    pub long_press_timeout_ms: u64,
}

impl Default for GestureConfig {
    fn default() -> Self {
        Self {
            flick_distance: FLICK_DISTANCE,
            tap_slop: TAP_SLOP,
            double_tap_slop: DOUBLE_TAP_SLOP,
            double_tap_timeout_ms: DOUBLE_TAP_TIMEOUT_MS,
            long_press_timeout_ms: LONG_PRESS_TIMEOUT_MS,
        }
    }
}

impl GestureConfig {
    pub fn double_tap_timeout(&self) -> Duration {
        Duration::from_millis(self.double_tap_timeout_ms)
    }

    pub fn long_press_timeout(&self) -> Duration {
        Duration::from_millis(self.long_press_timeout_ms)
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DragConfig {
    /// Fraction of the remaining distance covered per frame
    pub ease: f32,
}

impl Default for DragConfig {
    fn default() -> Self {
        Self { ease: DRAG_EASE }
    }
}

/// Tilt and shake filter constants.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OrientationConfig {
    pub max_tilt_step: f32,
    pub shake_decay: f32,
    pub shake_threshold: f32,
    pub smoothing_rate: f32,
    pub smoothing_cap: f32,
}

impl Default for OrientationConfig {
    fn default() -> Self {
        Self {
            max_tilt_step: MAX_TILT_STEP,
            shake_decay: SHAKE_DECAY,
            shake_threshold: SHAKE_THRESHOLD,
            smoothing_rate: TILT_SMOOTHING_RATE,
            smoothing_cap: TILT_SMOOTHING_CAP,
        }
    }
}

/// Default config location: `<config dir>/stageview/config.json`
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("stageview").join("config.json"))
}

impl ViewerConfig {
    /// Read and validate a config file.
    pub fn load(path: &Path) -> ConfigResult<Self> {
        let text = fs::read_to_string(path)?;
        let config: ViewerConfig = serde_json::from_str(&text)?;
        config.validate()?;
        debug!(path = %path.display(), "Loaded viewer config");
        Ok(config)
    }

    /// Like [`load`](Self::load), but a missing file yields the defaults.
    pub fn load_or_default(path: &Path) -> ConfigResult<Self> {
        match Self::load(path) {
            Err(ConfigError::Io(e)) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!(path = %path.display(), "No config file, using defaults");
                Ok(Self::default())
            }
            other => other,
        }
    }

    /// Write the config atomically: a temp file in the same directory is
    /// persisted over the target.
    pub fn save(&self, path: &Path) -> ConfigResult<()> {
        self.validate()?;
        let dir = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        fs::create_dir_all(dir)?;

        let json = serde_json::to_string_pretty(self)?;
        let mut tmp = tempfile::NamedTempFile::new_in(dir)?;
        tmp.write_all(json.as_bytes())?;
        tmp.as_file().sync_all()?;
        tmp.persist(path).map_err(|e| ConfigError::Io(e.error))?;
        Ok(())
    }

    /// Reject values the pipeline cannot work with.
    pub fn validate(&self) -> ConfigResult<()> {
        let view = &self.view;
        if !(view.min_scale > 0.0) {
            return Err(format!("view.min_scale must be positive, got {}", view.min_scale).into());
        }
        if !(view.max_scale >= view.min_scale) {
            return Err(format!(
                "view.max_scale ({}) must not be below view.min_scale ({})",
                view.max_scale, view.min_scale
            )
            .into());
        }
        if !(view.logical_right > view.logical_left) {
            return Err("view.logical_right must be greater than view.logical_left".into());
        }
        let max = &view.max_rect;
        if !(max.right > max.left && max.top > max.bottom) {
            return Err("view.max_rect must have positive width and height".into());
        }

        let gestures = &self.gestures;
        if !(gestures.flick_distance >= 0.0)
            || !(gestures.tap_slop >= 0.0)
            || !(gestures.double_tap_slop >= 0.0)
        {
            return Err("gesture distances must be non-negative".into());
        }
        if gestures.long_press_timeout_ms == 0 {
            return Err("gestures.long_press_timeout_ms must be positive".into());
        }

        if !(self.drag.ease > 0.0 && self.drag.ease <= 1.0) {
            return Err(format!("drag.ease must be in (0, 1], got {}", self.drag.ease).into());
        }

        let orientation = &self.orientation;
        if !(orientation.max_tilt_step > 0.0) {
            return Err("orientation.max_tilt_step must be positive".into());
        }
        if !(orientation.shake_decay >= 0.0 && orientation.shake_decay < 1.0) {
            return Err("orientation.shake_decay must be in [0, 1)".into());
        }
        if !(orientation.smoothing_rate > 0.0) {
            return Err("orientation.smoothing_rate must be positive".into());
        }
        if !(orientation.smoothing_cap > 0.0 && orientation.smoothing_cap <= 1.0) {
            return Err("orientation.smoothing_cap must be in (0, 1]".into());
        }
        if !(orientation.shake_threshold > 0.0) {
            return Err("orientation.shake_threshold must be positive".into());
        }
        Ok(())
    }
}
