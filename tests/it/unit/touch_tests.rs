//! Unit tests for the touch tracker and drag target.

use stageview::input::{DragTarget, TouchState, TouchTracker};

use crate::helpers::{assert_close, pt};

#[test]
fn test_state_transitions() {
    let mut tracker = TouchTracker::new();
    assert!(tracker.state().is_idle());

    tracker.touch_began(pt(0.0, 0.0));
    assert!(tracker.state().is_single_touch());

    tracker.touch_began_pair(pt(0.0, 0.0), pt(40.0, 0.0));
    assert!(tracker.state().is_double_touch());

    tracker.touches_moved(pt(10.0, 10.0));
    assert!(tracker.state().is_single_touch());

    tracker.touch_ended();
    assert_eq!(*tracker.state(), TouchState::Idle);
}

#[test]
fn test_pair_begin_records_midpoint() {
    let mut tracker = TouchTracker::new();
    tracker.touch_began_pair(pt(100.0, 200.0), pt(300.0, 400.0));
    assert_eq!(tracker.current(), pt(200.0, 300.0));
    assert_eq!(tracker.start(), pt(200.0, 300.0));
    assert_eq!(tracker.scale(), 1.0);
}

#[test]
fn test_incremental_pinch_composes() {
    let mut tracker = TouchTracker::new();
    tracker.touch_began_pair(pt(0.0, 0.0), pt(100.0, 0.0));

    let mut total = 1.0;
    for right in [120.0, 150.0, 90.0, 200.0] {
        tracker.touches_moved_pair(pt(0.0, 0.0), pt(right, 0.0));
        total *= tracker.scale();
    }
    // Product of per-move ratios equals the overall ratio
    assert_close(total, 2.0, 1e-5);
}

#[test]
fn test_pinch_pan_delta_is_midpoint_change() {
    let mut tracker = TouchTracker::new();
    tracker.touch_began_pair(pt(0.0, 0.0), pt(100.0, 100.0));
    tracker.touches_moved_pair(pt(20.0, 10.0), pt(120.0, 110.0));
    assert_eq!(tracker.delta_x(), 20.0);
    assert_eq!(tracker.delta_y(), 10.0);
    assert_eq!(tracker.scale(), 1.0);
}

#[test]
fn test_flick_distance_is_straight_line_from_start() {
    let mut tracker = TouchTracker::new();
    tracker.touch_began(pt(100.0, 100.0));
    tracker.touches_moved(pt(200.0, 100.0));
    tracker.touches_moved(pt(160.0, 180.0));
    assert_eq!(tracker.flick_distance(), 100.0);
}

#[test]
fn test_flick_not_available_after_firing() {
    let mut tracker = TouchTracker::new();
    tracker.touch_began(pt(0.0, 0.0));
    tracker.touches_moved(pt(0.0, 101.0));
    assert!(tracker.is_flick_available());
    assert!(tracker.take_flick(100.0).is_some());
    assert!(!tracker.is_flick_available());
    assert!(tracker.is_single_touch());
}

#[test]
fn test_flick_at_exact_threshold_does_not_fire() {
    let mut tracker = TouchTracker::new();
    tracker.touch_began(pt(0.0, 0.0));
    tracker.touches_moved(pt(100.0, 0.0));
    assert_eq!(tracker.take_flick(100.0), None);
}

#[test]
fn test_drag_target_reaches_target_smoothly() {
    let mut drag = DragTarget::new(0.2);
    drag.set(1.0, -0.5);
    drag.update();
    assert_close(drag.x(), 0.2, 1e-6);
    assert_close(drag.y(), -0.1, 1e-6);

    for _ in 0..100 {
        drag.update();
    }
    assert_close(drag.x(), 1.0, 1e-5);
    assert_close(drag.y(), -0.5, 1e-5);
}
