//! Unit tests for orientation fusion: remap table, shake and tilt filters.

use stageview::config::OrientationConfig;
use stageview::sensors::rotation::remap_for_rotation;
use stageview::sensors::{OrientationFusion, SensorCapabilities, SensorSample};
use stageview::types::{ScreenRotation, Vec3};
use std::time::{Duration, Instant};

use crate::helpers::{G, TEST_FIELD, assert_close};

fn fusion() -> OrientationFusion {
    OrientationFusion::new(OrientationConfig::default(), SensorCapabilities::ALL)
}

fn sample_pair(fusion: &mut OrientationFusion, accel: Vec3) {
    fusion.on_sample(SensorSample::Accelerometer(accel));
    fusion.on_sample(SensorSample::Magnetometer(TEST_FIELD));
}

#[test]
fn test_rotation_remap_table() {
    let raw = Vec3::new(G, 2.0 * G, 3.0 * G);
    let cases = [
        (ScreenRotation::Deg0, Vec3::new(-1.0, -2.0, -3.0)),
        (ScreenRotation::Deg90, Vec3::new(2.0, -1.0, -3.0)),
        (ScreenRotation::Deg180, Vec3::new(1.0, 2.0, -3.0)),
        (ScreenRotation::Deg270, Vec3::new(-2.0, 1.0, -3.0)),
    ];
    for (rotation, expected) in cases {
        let tilt = remap_for_rotation(rotation, raw);
        assert_close(tilt.x, expected.x, 1e-6);
        assert_close(tilt.y, expected.y, 1e-6);
        assert_close(tilt.z, expected.z, 1e-6);
    }
}

#[test]
fn test_fusion_applies_current_rotation() {
    let mut fusion = fusion();
    fusion.set_screen_rotation(ScreenRotation::Deg90);
    sample_pair(&mut fusion, Vec3::new(G, 0.0, 0.0));
    let dst = fusion.destination();
    assert_close(dst.x, 0.0, 1e-6);
    assert_close(dst.y, -1.0, 1e-6);
}

#[test]
fn test_shake_reset_then_still_device_stays_zero() {
    let mut fusion = fusion();
    let still = Vec3::new(0.5, 1.0, 9.7);
    sample_pair(&mut fusion, still);
    assert!(fusion.shake() > 0.0);

    fusion.reset_shake();
    assert_eq!(fusion.shake(), 0.0);

    for _ in 0..50 {
        sample_pair(&mut fusion, still);
    }
    assert_eq!(fusion.shake(), 0.0);
}

#[test]
fn test_rapid_shaking_outscores_slow_tilt() {
    let mut shaken = fusion();
    let mut tilted = fusion();
    for i in 0..20 {
        let sign = if i % 2 == 0 { 1.0 } else { -1.0 };
        sample_pair(&mut shaken, Vec3::new(sign * 9.0, 0.0, 4.0));
        let lean = i as f32 * 0.05;
        sample_pair(&mut tilted, Vec3::new(lean, 0.0, 9.7));
    }
    assert!(shaken.shake() > 1.5, "shake was {}", shaken.shake());
    assert!(tilted.shake() < 0.1, "tilt scored {}", tilted.shake());
}

#[test]
fn test_rate_limited_step_bound() {
    let mut fusion = fusion();
    sample_pair(&mut fusion, Vec3::new(-G, G, -G));

    let mut now = Instant::now();
    let mut previous = fusion.rate_limited();
    for frame in 0..60 {
        // Uneven frame times must not affect the step bound
        now += Duration::from_millis(if frame % 3 == 0 { 50 } else { 8 });
        fusion.update(now);
        let current = fusion.rate_limited();
        assert!((current.x - previous.x).abs() <= 0.04 + 1e-6);
        assert!((current.y - previous.y).abs() <= 0.04 + 1e-6);
        assert!((current.z - previous.z).abs() <= 0.04 + 1e-6);
        previous = current;
    }
}

#[test]
fn test_published_step_bound_at_steady_frame_rate() {
    let mut fusion = fusion();
    sample_pair(&mut fusion, Vec3::new(-G, 0.0, 0.0));

    let mut now = Instant::now();
    let mut previous = fusion.tilt();
    for _ in 0..120 {
        now += Duration::from_millis(16);
        fusion.update(now);
        let current = fusion.tilt();
        assert!((current.x - previous.x).abs() <= 0.04 + 1e-5);
        previous = current;
    }
    assert_close(fusion.tilt().x, 1.0, 1e-3);
}

#[test]
fn test_low_gravity_sample_still_counts() {
    let mut fusion = fusion();
    sample_pair(&mut fusion, Vec3::new(0.0, 0.0, G));
    assert_close(fusion.shake(), 0.3, 1e-6);

    // Swinging through near free fall: no usable rotation matrix, but the
    // sample still moves the destination and feeds the shake filter
    sample_pair(&mut fusion, Vec3::new(0.0, 0.0, 0.5));
    assert_close(fusion.destination().z, -0.5 / G, 1e-6);
    let movement = 1.0 - 0.5 / G;
    assert_close(fusion.shake(), 0.3 * 0.7 + movement * 0.3, 1e-5);
}

#[test]
fn test_stopped_feed_ignores_pushes() {
    let mut fusion = fusion();
    let feed = fusion.feed();
    assert!(fusion.start());
    fusion.stop();
    feed.push(SensorSample::Accelerometer(Vec3::new(G, 0.0, 0.0)));
    feed.push(SensorSample::Magnetometer(TEST_FIELD));
    fusion.update(Instant::now());
    assert_eq!(fusion.destination(), Vec3::ZERO);
}
