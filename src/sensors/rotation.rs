//! Gravity/geomagnetic rotation matrix and the screen-rotation remap table.

use crate::constants::GRAVITY_EARTH;
use crate::types::{ScreenRotation, Vec3};

/// Below this squared magnitude (1% of g^2) the device is in free fall.
const FREE_FALL_GRAVITY_SQUARED: f32 = 0.01 * GRAVITY_EARTH * GRAVITY_EARTH;

/// Below this the geomagnetic field is (nearly) parallel to gravity.
const MIN_HORIZONTAL_FIELD: f32 = 0.1;

/// Row-major 3x3 rotation from device coordinates to world (east, north, up).
pub type RotationMatrix = [[f32; 3]; 3];

/// Decompose gravity and the geomagnetic field into a device -> world
/// rotation.
///
/// Returns `None` when the inputs cannot define an orientation: the device is
/// in free fall, or the field points along gravity.
pub fn rotation_matrix(gravity: Vec3, geomagnetic: Vec3) -> Option<RotationMatrix> {
    let (ax, ay, az) = (gravity.x, gravity.y, gravity.z);
    let norm_sq_a = ax * ax + ay * ay + az * az;
    if !(norm_sq_a >= FREE_FALL_GRAVITY_SQUARED) {
        return None;
    }

    let (ex, ey, ez) = (geomagnetic.x, geomagnetic.y, geomagnetic.z);
    // East = field x up
    let mut hx = ey * az - ez * ay;
    let mut hy = ez * ax - ex * az;
    let mut hz = ex * ay - ey * ax;
    let norm_h = (hx * hx + hy * hy + hz * hz).sqrt();
    if !(norm_h >= MIN_HORIZONTAL_FIELD) {
        return None;
    }

    let inv_h = 1.0 / norm_h;
    hx *= inv_h;
    hy *= inv_h;
    hz *= inv_h;

    let inv_a = 1.0 / norm_sq_a.sqrt();
    let ax = ax * inv_a;
    let ay = ay * inv_a;
    let az = az * inv_a;

    // North = up x east
    let mx = ay * hz - az * hy;
    let my = az * hx - ax * hz;
    let mz = ax * hy - ay * hx;

    Some([[hx, hy, hz], [mx, my, mz], [ax, ay, az]])
}

/// Remap a raw accelerometer sample into screen-relative tilt.
///
/// Each axis is divided by standard gravity, so a device lying still reports
/// roughly unit magnitude. Sign conventions per rotation:
///
/// ```text
///   0°: (-ax, -ay, -az)
///  90°: ( ay, -ax, -az)
/// 180°: ( ax,  ay, -az)
/// 270°: (-ay,  ax, -az)
/// ```
pub fn remap_for_rotation(rotation: ScreenRotation, accel: Vec3) -> Vec3 {
    let x = accel.x / GRAVITY_EARTH;
    let y = accel.y / GRAVITY_EARTH;
    let z = accel.z / GRAVITY_EARTH;
    match rotation {
        ScreenRotation::Deg0 => Vec3::new(-x, -y, -z),
        ScreenRotation::Deg90 => Vec3::new(y, -x, -z),
        ScreenRotation::Deg180 => Vec3::new(x, y, -z),
        ScreenRotation::Deg270 => Vec3::new(-y, x, -z),
    }
}
