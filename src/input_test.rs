#![allow(clippy::float_cmp)]

use super::*;
use crate::stroke::StrokeStyle;

fn style() -> StrokeStyle {
    StrokeStyle { width: 4.0, color: "#000000".into() }
}

// =============================================================
// Tool
// =============================================================

#[test]
fn tool_defaults_to_draw() {
    assert_eq!(Tool::default(), Tool::Draw);
}

#[test]
fn tool_serializes_lowercase() {
    assert_eq!(serde_json::to_string(&Tool::Select).unwrap(), "\"select\"");
    let parsed: Tool = serde_json::from_str("\"draw\"").unwrap();
    assert_eq!(parsed, Tool::Draw);
}

// =============================================================
// resolve_pressure
// =============================================================

#[test]
fn basic_device_always_full_pressure() {
    let caps = PointerCapabilities::basic();
    assert_eq!(caps.resolve_pressure(None), 1.0);
    assert_eq!(caps.resolve_pressure(Some(0.5)), 1.0);
    assert_eq!(caps.resolve_pressure(Some(0.0)), 1.0);
}

#[test]
fn stylus_pressure_passes_through_in_range() {
    assert_eq!(PointerCapabilities::stylus().resolve_pressure(Some(0.5)), 0.5);
}

#[test]
fn stylus_pressure_is_floored() {
    let caps = PointerCapabilities::stylus();
    assert_eq!(caps.resolve_pressure(Some(0.05)), 0.1);
    assert_eq!(caps.resolve_pressure(Some(0.0)), 0.1);
}

#[test]
fn stylus_pressure_is_capped() {
    assert_eq!(PointerCapabilities::stylus().resolve_pressure(Some(1.7)), 1.0);
}

#[test]
fn capabilities_wire_shape_is_pressure_only() {
    let json = serde_json::to_value(PointerCapabilities::stylus()).unwrap();
    assert_eq!(json, serde_json::json!({ "pressure": true }));
}

#[test]
fn missing_or_nan_pressure_is_full() {
    let caps = PointerCapabilities::stylus();
    assert_eq!(caps.resolve_pressure(None), 1.0);
    assert_eq!(caps.resolve_pressure(Some(f64::NAN)), 1.0);
    assert_eq!(caps.resolve_pressure(Some(f64::INFINITY)), 1.0);
}

// =============================================================
// PointerEvent
// =============================================================

#[test]
fn screen_position_filters_missing_and_non_finite() {
    assert_eq!(PointerEvent::at(Point::new(1.0, 2.0)).screen_position(), Some(Point::new(1.0, 2.0)));
    let missing = PointerEvent { position: None, ..PointerEvent::at(Point::default()) };
    assert!(missing.screen_position().is_none());
    assert!(PointerEvent::at(Point::new(f64::NAN, 2.0)).screen_position().is_none());
    assert!(PointerEvent::at(Point::new(0.0, f64::NEG_INFINITY)).screen_position().is_none());
}

#[test]
fn sample_at_uses_resolved_pressure() {
    let event = PointerEvent::stylus(Point::new(5.0, 5.0), 0.02);
    let sample = event.sample_at(Point::new(50.0, 60.0));
    assert_eq!(sample.point, Point::new(50.0, 60.0));
    assert_eq!(sample.pressure, 0.1);
}

// =============================================================
// Gesture
// =============================================================

#[test]
fn drawing_gesture_reports_handle_and_tool() {
    let gesture = Gesture::Drawing {
        handle: StrokeHandle(7),
        builder: StrokeBuilder::begin(Sample::at(0.0, 0.0), style()),
    };
    assert_eq!(gesture.handle(), StrokeHandle(7));
    assert_eq!(gesture.tool(), Tool::Draw);
}

#[test]
fn lassoing_gesture_reports_handle_and_tool() {
    let gesture = Gesture::Lassoing { handle: StrokeHandle(3), builder: LassoBuilder::begin(Point::default()) };
    assert_eq!(gesture.handle(), StrokeHandle(3));
    assert_eq!(gesture.tool(), Tool::Select);
}

#[test]
fn extend_feeds_the_stroke_builder() {
    let mut gesture = Gesture::Drawing {
        handle: StrokeHandle(1),
        builder: StrokeBuilder::begin(Sample::at(0.0, 0.0), style()),
    };
    assert!(gesture.extend(Sample::at(10.0, 0.0)));
    assert!(!gesture.extend(Sample::at(10.0, 0.0)), "duplicate is dropped");
    let Gesture::Drawing { builder, .. } = &gesture else {
        panic!("expected a drawing gesture");
    };
    assert_eq!(builder.samples().len(), 2);
}

#[test]
fn extend_feeds_the_lasso_builder() {
    let mut gesture = Gesture::Lassoing { handle: StrokeHandle(1), builder: LassoBuilder::begin(Point::default()) };
    assert!(gesture.extend(Sample::at(5.0, 5.0)));
    assert!(gesture.extend(Sample::at(5.0, 0.0)));
    let Gesture::Lassoing { builder, .. } = &gesture else {
        panic!("expected a lasso gesture");
    };
    assert_eq!(builder.points(), &[Point::new(0.0, 0.0), Point::new(5.0, 5.0), Point::new(5.0, 0.0)]);
}

#[test]
fn points_reports_the_live_shape() {
    let mut drawing = Gesture::Drawing {
        handle: StrokeHandle(1),
        builder: StrokeBuilder::begin(Sample::at(0.0, 0.0), style()),
    };
    drawing.extend(Sample::at(10.0, 0.0));
    assert_eq!(drawing.points(), vec![Point::new(0.0, 2.0), Point::new(0.0, -2.0)]);

    let lasso = Gesture::Lassoing { handle: StrokeHandle(2), builder: LassoBuilder::begin(Point::new(1.0, 1.0)) };
    assert_eq!(lasso.points(), vec![Point::new(1.0, 1.0)]);
}
