//! End-to-end behavior of the scene engine through its public API.

use inkboard_core::elements::{Shape, ShapeKind, Stroke, StrokePoint};
use inkboard_core::{
    Alignment, AnchorSide, Axis, Binding, Canvas, Element, ElementId, EngineConfig, PointerEvent, SceneFile,
    SerializableColor, ToolKind, Viewport,
};
use kurbo::{Point, Rect};

fn rect(x: f64, y: f64, w: f64, h: f64) -> Element {
    Shape::new(ShapeKind::Rectangle, x, y, w, h, SerializableColor::black(), 2.0).into()
}

fn stroke(points: &[(f64, f64)]) -> Element {
    let points = points.iter().map(|&(x, y)| StrokePoint::new(x, y)).collect();
    Stroke::new(points, SerializableColor::black(), 2.0, 1.0).into()
}

fn bounds(canvas: &Canvas, id: ElementId) -> Rect {
    canvas.scene().bounds_of(id).unwrap()
}

#[test]
fn undo_redo_round_trip() {
    let mut canvas = Canvas::default();
    let mut states = vec![canvas.elements().to_vec()];

    let a = canvas.add_element(rect(0.0, 0.0, 10.0, 10.0)).unwrap();
    states.push(canvas.elements().to_vec());
    canvas.add_element(stroke(&[(0.0, 0.0), (5.0, 5.0)])).unwrap();
    states.push(canvas.elements().to_vec());
    canvas.delete_element(a);
    states.push(canvas.elements().to_vec());
    canvas.add_element(rect(20.0, 20.0, 5.0, 5.0)).unwrap();
    states.push(canvas.elements().to_vec());

    for expected in states.iter().rev().skip(1) {
        assert!(canvas.undo());
        assert_eq!(canvas.elements(), expected.as_slice());
    }
    assert!(!canvas.undo());

    for expected in states.iter().skip(1) {
        assert!(canvas.redo());
        assert_eq!(canvas.elements(), expected.as_slice());
    }
    assert!(!canvas.redo());
}

#[test]
fn new_edit_after_undo_drops_redo() {
    let mut canvas = Canvas::default();
    canvas.add_element(rect(0.0, 0.0, 10.0, 10.0)).unwrap();
    canvas.add_element(rect(20.0, 0.0, 10.0, 10.0)).unwrap();
    assert!(canvas.undo());
    canvas.add_element(rect(40.0, 0.0, 10.0, 10.0)).unwrap();
    assert!(!canvas.redo());
    assert_eq!(canvas.elements().len(), 2);
}

#[test]
fn viewport_inverse_law() {
    let viewport = Viewport::new(-37.5, 120.25, 2.75).unwrap();
    for &(x, y) in &[(0.0, 0.0), (13.0, -7.5), (1e4, -3e3), (-0.001, 999.0)] {
        let world = Point::new(x, y);
        let back = viewport.to_world(viewport.to_screen(world));
        assert!((back - world).hypot() < 1e-6);
    }
}

#[test]
fn zoom_keeps_pointer_anchored() {
    let mut viewport = Viewport::new(15.0, -40.0, 1.3).unwrap();
    let pointer = Point::new(321.0, 123.0);
    let before = viewport.to_world(pointer);
    assert!(viewport.zoom_at(pointer, 0.4));
    assert!((viewport.to_world(pointer) - before).hypot() < 1e-9);
    assert!(viewport.zoom_at(pointer, -1.2));
    assert!((viewport.to_world(pointer) - before).hypot() < 1e-9);
}

#[test]
fn shape_bounds_normalized() {
    let mut canvas = Canvas::default();
    let id = canvas.add_element(rect(100.0, 80.0, -60.0, -30.0)).unwrap();
    assert_eq!(bounds(&canvas, id), Rect::new(40.0, 50.0, 100.0, 80.0));
}

#[test]
fn align_left_shares_group_minimum() {
    let mut canvas = Canvas::default();
    let ids = vec![
        canvas.add_element(rect(30.0, 0.0, 10.0, 10.0)).unwrap(),
        canvas.add_element(rect(12.0, 40.0, 50.0, 10.0)).unwrap(),
        canvas.add_element(stroke(&[(25.0, 80.0), (90.0, 95.0)])).unwrap(),
    ];
    canvas.scene_mut().set_selection(ids.clone());
    assert!(canvas.align(Alignment::Left));
    for id in ids {
        assert!((bounds(&canvas, id).x0 - 12.0).abs() < 1e-9);
    }
}

#[test]
fn distribute_equalizes_gaps() {
    let mut canvas = Canvas::default();
    let ids = vec![
        canvas.add_element(rect(0.0, 0.0, 10.0, 10.0)).unwrap(),
        canvas.add_element(rect(15.0, 0.0, 30.0, 10.0)).unwrap(),
        canvas.add_element(rect(90.0, 0.0, 20.0, 10.0)).unwrap(),
        canvas.add_element(rect(200.0, 0.0, 10.0, 10.0)).unwrap(),
    ];
    canvas.scene_mut().set_selection(ids.clone());
    assert!(canvas.distribute(Axis::Horizontal));

    let mut rects: Vec<Rect> = ids.iter().map(|&id| bounds(&canvas, id)).collect();
    rects.sort_by(|a, b| a.x0.total_cmp(&b.x0));
    let gaps: Vec<f64> = rects.windows(2).map(|w| w[1].x0 - w[0].x1).collect();
    for gap in &gaps {
        assert!((gap - gaps[0]).abs() < 1e-9);
    }
    assert!((rects[0].x0).abs() < 1e-9);
    assert!((rects[3].x1 - 210.0).abs() < 1e-9);
}

#[test]
fn pen_stroke_round_trip() {
    let mut canvas = Canvas::new(EngineConfig::default());
    canvas.set_active_tool(ToolKind::Pen);
    let history_before = canvas.scene().history().len();

    canvas.handle_pointer(&PointerEvent::down(10.0, 10.0));
    canvas.handle_pointer(&PointerEvent::moved(20.0, 10.0));
    canvas.handle_pointer(&PointerEvent::moved(30.0, 10.0));
    canvas.handle_pointer(&PointerEvent::up(30.0, 10.0));

    assert_eq!(canvas.elements().len(), 1);
    let Element::Stroke(stroke) = &canvas.elements()[0] else {
        panic!("expected a stroke");
    };
    let points: Vec<(f64, f64, f64)> = stroke.points.iter().map(|p| (p.x, p.y, p.pressure())).collect();
    assert_eq!(points, vec![(10.0, 10.0, 0.5), (20.0, 10.0, 0.5), (30.0, 10.0, 0.5)]);
    assert_eq!(canvas.scene().history().len(), history_before + 1);
}

#[test]
fn accidental_shape_click_discarded() {
    let mut canvas = Canvas::default();
    canvas.set_active_tool(ToolKind::Rectangle);
    canvas.handle_pointer(&PointerEvent::down(100.0, 100.0));
    canvas.handle_pointer(&PointerEvent::up(102.0, 101.0));
    assert!(canvas.elements().is_empty());
    assert!(!canvas.scene().history().can_undo());
}

#[test]
fn marquee_selects_by_centroid() {
    let mut canvas = Canvas::default();
    let id = canvas.add_element(rect(0.0, 0.0, 100.0, 100.0)).unwrap();

    let hits = canvas.scene().ids_with_centroid_in(Rect::new(40.0, 40.0, 60.0, 60.0));
    assert_eq!(hits, vec![id]);
    let misses = canvas.scene().ids_with_centroid_in(Rect::new(0.0, 0.0, 30.0, 30.0));
    assert!(misses.is_empty());

    // The same resolution through a select-tool drag on empty canvas.
    canvas.set_active_tool(ToolKind::Select);
    canvas.handle_pointer(&PointerEvent::down(-20.0, -20.0));
    canvas.handle_pointer(&PointerEvent::moved(60.0, 60.0));
    canvas.handle_pointer(&PointerEvent::up(60.0, 60.0));
    assert_eq!(canvas.selection(), &[id]);
}

#[test]
fn connector_follows_bound_shape() {
    let mut canvas = Canvas::default();
    let r = canvas.add_element(rect(0.0, 0.0, 100.0, 100.0)).unwrap();
    let mut arrow = Shape::new(ShapeKind::Arrow, 100.0, 50.0, 200.0, 0.0, SerializableColor::black(), 2.0);
    arrow.bound_start = Some(Binding::new(r, AnchorSide::Right));
    let arrow_id = canvas.add_element(arrow.into()).unwrap();

    canvas.set_active_tool(ToolKind::Select);
    canvas.handle_pointer(&PointerEvent::down(20.0, 20.0));
    canvas.handle_pointer(&PointerEvent::moved(70.0, 70.0));
    canvas.handle_pointer(&PointerEvent::up(70.0, 70.0));

    assert_eq!(bounds(&canvas, r).origin(), Point::new(50.0, 50.0));
    let arrow = canvas.scene().element(arrow_id).and_then(Element::as_shape).unwrap();
    assert_eq!(arrow.start(), Point::new(150.0, 100.0));
    assert_eq!(arrow.end(), Point::new(300.0, 50.0));
}

#[test]
fn document_round_trip_restores_scene() {
    let mut canvas = Canvas::default();
    canvas.add_element(rect(0.0, 0.0, 10.0, 10.0)).unwrap();
    canvas.add_element(stroke(&[(1.0, 1.0), (2.0, 3.0)])).unwrap();
    canvas.set_viewport(Viewport::new(4.0, 5.0, 0.5).unwrap());

    let json = canvas.snapshot().to_json().unwrap();
    let mut restored = Canvas::default();
    restored.load(SceneFile::from_json(&json).unwrap()).unwrap();

    assert_eq!(restored.elements(), canvas.elements());
    assert_eq!(restored.viewport(), canvas.viewport());
    assert_eq!(restored.background(), canvas.background());
}
