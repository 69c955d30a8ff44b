//! Unit tests for the view transform and the device -> screen chain.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use stageview::input::ViewTransform;
use stageview::input::coords::DeviceToScreen;
use stageview::types::Rect;

use crate::helpers::{assert_close, rect_within};

fn portrait_view() -> ViewTransform {
    let mut view = ViewTransform::new();
    view.set_screen_rect(-1.0, 1.0, -1.5, 1.5);
    view.set_max_screen_rect(-2.0, 2.0, -2.0, 2.0);
    view.set_min_scale(0.8);
    view.set_max_scale(2.0);
    view
}

/// Put the view into a random reachable state.
fn scramble(view: &mut ViewTransform, rng: &mut StdRng) {
    for _ in 0..4 {
        let cx = rng.gen_range(-2.0..2.0);
        let cy = rng.gen_range(-2.0..2.0);
        view.adjust_scale(cx, cy, rng.gen_range(0.5..1.8));
        view.adjust_translate(rng.gen_range(-0.8..0.8), rng.gen_range(-0.8..0.8));
    }
}

#[test]
fn test_inverse_law_holds_for_random_states() {
    let mut rng = StdRng::seed_from_u64(7);
    for _ in 0..200 {
        let mut view = portrait_view();
        scramble(&mut view, &mut rng);

        let x: f32 = rng.gen_range(-3.0..3.0);
        let y: f32 = rng.gen_range(-3.0..3.0);
        assert_close(view.invert_transform_x(view.transform_x(x)), x, 1e-4);
        assert_close(view.invert_transform_y(view.transform_y(y)), y, 1e-4);
    }
}

#[test]
fn test_zoom_center_does_not_drift() {
    let mut rng = StdRng::seed_from_u64(11);
    for _ in 0..200 {
        let mut view = portrait_view();
        scramble(&mut view, &mut rng);

        let cx: f32 = rng.gen_range(-2.0..2.0);
        let cy: f32 = rng.gen_range(-2.0..2.0);
        let before = (view.transform_x(cx), view.transform_y(cy));
        view.adjust_scale(cx, cy, rng.gen_range(0.3..3.0));
        assert_close(view.transform_x(cx), before.0, 1e-4);
        assert_close(view.transform_y(cy), before.1, 1e-4);
    }
}

#[test]
fn test_zoom_center_holds_when_clamped() {
    let mut view = portrait_view();
    let before = view.transform_x(0.5);
    view.adjust_scale(0.5, 0.0, 100.0);
    assert!(view.is_max_scale());
    assert_close(view.transform_x(0.5), before, 1e-6);
}

#[test]
fn test_repeated_translate_converges_to_boundary() {
    let mut view = portrait_view();
    let max = view.max_screen_rect();

    for _ in 0..10 {
        view.adjust_translate(0.7, -0.9);
        let visible = view.visible_rect();
        assert!(rect_within(&max, &visible, 1e-6), "visible {visible:?} escaped {max:?}");
    }
    let settled = view.snapshot();

    view.adjust_translate(0.7, -0.9);
    assert_eq!(view.snapshot(), settled);

    let visible = view.visible_rect();
    assert_close(visible.left, max.left, 1e-6);
    assert_close(visible.top, max.top, 1e-6);
}

#[test]
fn test_translate_clamps_but_does_not_reject() {
    let mut view = portrait_view();
    // Y is allowed to move 0.5 before hitting the top; X is free
    view.adjust_translate(0.25, -3.0);
    assert_close(view.translate_x(), 0.25, 1e-6);
    assert_close(view.translate_y(), -0.5, 1e-6);
}

#[test]
fn test_visible_rect_stays_inside_after_zoom_and_pan() {
    let mut rng = StdRng::seed_from_u64(3);
    let mut view = portrait_view();
    let max: Rect = view.max_screen_rect();
    for _ in 0..500 {
        let cx = rng.gen_range(-1.0..1.0);
        let cy = rng.gen_range(-1.0..1.0);
        view.adjust_scale(cx, cy, rng.gen_range(0.9..1.1));
        // Scale never leaves its bounds
        assert!(view.scale() >= view.min_scale() && view.scale() <= view.max_scale());
        view.adjust_translate(rng.gen_range(-0.3..0.3), rng.gen_range(-0.3..0.3));
        assert!(rect_within(&max, &view.visible_rect(), 1e-4));
    }
}

#[test]
fn test_max_min_flags_use_exact_bounds() {
    let mut view = portrait_view();
    assert!(!view.is_max_scale());
    view.adjust_scale(0.1, 0.1, 1.7);
    view.adjust_scale(0.1, 0.1, 1.7);
    assert!(view.is_max_scale());
    assert_eq!(view.scale(), 2.0);

    view.adjust_scale(0.0, 0.0, 0.999);
    assert!(!view.is_max_scale());
}

#[test]
fn test_full_device_to_view_chain_inverts() {
    let d2s = DeviceToScreen::for_viewport(1080.0, 1920.0, 2.0).unwrap();
    let mut view = portrait_view();
    view.adjust_scale(0.2, 0.3, 1.4);
    view.adjust_translate(0.1, -0.2);

    let device_x = 777.0;
    let device_y = 321.0;
    let vx = view.invert_transform_x(d2s.transform_x(device_x));
    let vy = view.invert_transform_y(d2s.transform_y(device_y));
    assert_close(d2s.invert_x(view.transform_x(vx)), device_x, 1e-2);
    assert_close(d2s.invert_y(view.transform_y(vy)), device_y, 1e-2);
}
