use glam::{Vec2, Vec4};
use merlin_editor::easing::EaseMethod;
use merlin_editor::keyframes::{ColorCurve, PointCurve, ScalarCurve};

fn approx(a: f32, b: f32) -> bool {
    (a - b).abs() <= 1e-5
}

#[test]
fn queries_outside_the_keyframe_range_extrapolate_flat() {
    let mut curve = ScalarCurve::new(2.0);
    curve.add(0.25, 5.0, EaseMethod::None);
    curve.add(0.75, 9.0, EaseMethod::None);

    assert_eq!(curve.sample(-10.0), 2.0);
    assert_eq!(curve.sample(0.0), 2.0);
    assert_eq!(curve.sample(0.1), 2.0, "before the first keyframe the first value holds");

    assert_eq!(curve.sample(0.75), 9.0);
    assert_eq!(curve.sample(1.0), 9.0);
    assert_eq!(curve.sample(50.0), 9.0, "past the last keyframe the last value holds");
}

#[test]
fn linear_segment_midpoint_is_exact() {
    let mut curve = ScalarCurve::new(0.0);
    curve.add(1.0, 10.0, EaseMethod::None);
    assert_eq!(curve.sample(0.5), 5.0, "exact midpoint of a linear segment");
}

#[test]
fn sampling_is_idempotent() {
    let mut curve = ScalarCurve::new(1.0);
    curve.add(0.4, 3.0, EaseMethod::Out);
    curve.add(0.9, -2.0, EaseMethod::InElastic);
    for t in [0.0, 0.2, 0.4, 0.65, 0.9, 1.0] {
        assert_eq!(curve.sample(t), curve.sample(t), "repeat query at {t} must match");
    }
}

#[test]
fn added_keyframe_round_trips() {
    let mut curve = ScalarCurve::new(0.0);
    let index = curve.add(0.6, 42.0, EaseMethod::None);
    let frame = curve.keyframe(index).expect("keyframe just added");
    assert_eq!(frame.time, 0.6);
    assert_eq!(frame.value, 42.0);
}

#[test]
fn set_keyframe_time_reorders_and_reports_the_new_index() {
    let mut curve = ScalarCurve::new(0.0);
    curve.add(0.3, 3.0, EaseMethod::None);
    curve.add(0.6, 6.0, EaseMethod::None);

    let new_index = curve.set_keyframe_time(2, 0.1);
    assert_eq!(new_index, 1);
    let moved = curve.keyframe(new_index).expect("moved keyframe");
    assert_eq!(moved.time, 0.1);
    assert_eq!(moved.value, 6.0, "value rides along with the move");

    let times: Vec<f32> = curve.keyframes().iter().map(|frame| frame.time).collect();
    assert_eq!(times, vec![0.0, 0.1, 0.3]);
}

#[test]
fn set_keyframe_time_stops_at_an_equal_neighbor() {
    let mut curve = ScalarCurve::new(0.0);
    curve.add(0.2, 2.0, EaseMethod::None);
    curve.add(0.5, 5.0, EaseMethod::None);

    // Moving onto a neighbor's exact time must not jump past it.
    let new_index = curve.set_keyframe_time(2, 0.2);
    assert_eq!(new_index, 2);
    assert_eq!(curve.keyframe(1).expect("neighbor").value, 2.0);
    assert_eq!(curve.keyframe(2).expect("mover").value, 5.0);
}

#[test]
fn set_keyframe_value_keeps_the_order() {
    let mut curve = ScalarCurve::new(0.0);
    curve.add(0.5, 1.0, EaseMethod::None);
    curve.set_keyframe_value(1, 7.5);
    assert_eq!(curve.keyframe(1).expect("updated keyframe").value, 7.5);
    assert_eq!(curve.keyframe_count(), 2);
}

#[test]
fn remove_drops_a_keyframe() {
    let mut curve = ScalarCurve::new(0.0);
    curve.add(0.5, 1.0, EaseMethod::None);
    curve.add(1.0, 2.0, EaseMethod::None);
    curve.remove(1);
    assert_eq!(curve.keyframe_count(), 2);
    assert_eq!(curve.keyframe(1).expect("survivor").value, 2.0);
}

#[test]
fn color_channels_interpolate_independently() {
    let mut curve = ColorCurve::new(Vec4::new(0.0, 0.0, 0.0, 0.0));
    curve.add(1.0, Vec4::new(1.0, 0.5, 0.0, 1.0), EaseMethod::None);

    let mid = curve.sample(0.5);
    assert!(approx(mid.x, 0.5));
    assert!(approx(mid.y, 0.25));
    assert!(approx(mid.z, 0.0));
    assert!(approx(mid.w, 0.5));
}

#[test]
fn point_axes_interpolate_independently() {
    let mut curve = PointCurve::new(Vec2::new(-10.0, 40.0));
    curve.add(1.0, Vec2::new(10.0, 0.0), EaseMethod::None);

    let quarter = curve.sample(0.25);
    assert!(approx(quarter.x, -5.0));
    assert!(approx(quarter.y, 30.0));
}

#[test]
fn easing_shapes_the_segment() {
    let mut curve = ScalarCurve::new(0.0);
    curve.add(1.0, 1.0, EaseMethod::Out);

    let eased = curve.sample(0.5);
    assert!(approx(eased, EaseMethod::Out.apply(0.5)));
    assert!(eased > 0.5, "ease-out front-loads the change");
}

#[test]
fn uneven_spacing_is_respected() {
    let mut curve = ScalarCurve::new(0.0);
    curve.add(0.1, 1.0, EaseMethod::None);
    curve.add(1.0, 10.0, EaseMethod::None);

    assert!(approx(curve.sample(0.05), 0.5));
    assert!(approx(curve.sample(0.55), 5.5));
}
