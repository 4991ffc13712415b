//! Selection handles: resize corners and edges plus the rotation knob.

use crate::elements::{Element, TextMetrics};
use kurbo::{Affine, Point, Rect};
use serde::{Deserialize, Serialize};

/// Handle size in screen pixels.
pub const HANDLE_SIZE: f64 = 8.0;

/// Type of selection handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HandleKind {
    /// Corner handle; resizes both axes.
    Corner(Corner),
    /// Edge midpoint handle; resizes one axis.
    Edge(Edge),
    /// Rotation handle above the top edge.
    Rotate,
}

/// Corner positions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Corner {
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
}

/// Edge positions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Edge {
    Top,
    Right,
    Bottom,
    Left,
}

/// A selection handle with its position and type.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Handle {
    /// Position in world coordinates.
    pub position: Point,
    pub kind: HandleKind,
}

impl Handle {
    pub fn new(position: Point, kind: HandleKind) -> Self {
        Self { position, kind }
    }

    /// Check if a world point hits this handle. `tolerance` is in world units.
    pub fn hit_test(&self, point: Point, tolerance: f64) -> bool {
        let dx = point.x - self.position.x;
        let dy = point.y - self.position.y;
        dx * dx + dy * dy <= tolerance * tolerance
    }
}

/// Rotation about the element centre, in the element's own degrees.
fn element_transform(element: &Element, bounds: Rect) -> Affine {
    let rotation = element.rotation();
    if rotation == 0.0 {
        Affine::IDENTITY
    } else {
        Affine::rotate_about(rotation.to_radians(), bounds.center())
    }
}

/// Handles for a selected element, rotated with it.
///
/// Resizable elements get four corners and four edge midpoints; rotatable
/// ones also get a rotation handle `rotate_offset` world units above the top
/// edge. Everything else gets no handles.
pub fn get_handles(element: &Element, metrics: &dyn TextMetrics, rotate_offset: f64) -> Vec<Handle> {
    let bounds = element.bounds(metrics);
    let transform = element_transform(element, bounds);
    let center = bounds.center();
    let mut handles = Vec::new();

    if element.is_resizable() {
        let local = [
            (Point::new(bounds.x0, bounds.y0), HandleKind::Corner(Corner::TopLeft)),
            (Point::new(bounds.x1, bounds.y0), HandleKind::Corner(Corner::TopRight)),
            (Point::new(bounds.x0, bounds.y1), HandleKind::Corner(Corner::BottomLeft)),
            (Point::new(bounds.x1, bounds.y1), HandleKind::Corner(Corner::BottomRight)),
            (Point::new(center.x, bounds.y0), HandleKind::Edge(Edge::Top)),
            (Point::new(bounds.x1, center.y), HandleKind::Edge(Edge::Right)),
            (Point::new(center.x, bounds.y1), HandleKind::Edge(Edge::Bottom)),
            (Point::new(bounds.x0, center.y), HandleKind::Edge(Edge::Left)),
        ];
        handles.extend(local.into_iter().map(|(p, kind)| Handle::new(transform * p, kind)));
    }

    if element.is_rotatable() {
        let knob = Point::new(center.x, bounds.y0 - rotate_offset);
        handles.push(Handle::new(transform * knob, HandleKind::Rotate));
    }

    handles
}

/// Find which handle, if any, is hit at a world point.
///
/// The rotation handle is checked first so it wins over a nearby corner on
/// small elements.
pub fn hit_test_handles(
    element: &Element,
    metrics: &dyn TextMetrics,
    rotate_offset: f64,
    point: Point,
    tolerance: f64,
) -> Option<HandleKind> {
    let handles = get_handles(element, metrics, rotate_offset);
    handles
        .iter()
        .filter(|h| h.kind == HandleKind::Rotate)
        .chain(handles.iter().filter(|h| h.kind != HandleKind::Rotate))
        .find(|h| h.hit_test(point, tolerance))
        .map(|h| h.kind)
}

/// Resize `original` by dragging `handle` to `pointer`.
///
/// `pointer` must already be in the element's unrotated frame. The side or
/// corner opposite the handle stays fixed and neither dimension drops below
/// `min_size`. With `keep_aspect` a corner drag derives the height from the
/// new width using the original ratio, measured from the fixed corner.
pub fn resize_rect(original: Rect, handle: HandleKind, pointer: Point, keep_aspect: bool, min_size: f64) -> Rect {
    let r = original.abs();
    let (mut x0, mut y0, mut x1, mut y1) = (r.x0, r.y0, r.x1, r.y1);

    match handle {
        HandleKind::Corner(corner) => {
            let (left, top) = match corner {
                Corner::TopLeft => (true, true),
                Corner::TopRight => (false, true),
                Corner::BottomLeft => (true, false),
                Corner::BottomRight => (false, false),
            };
            if left {
                x0 = pointer.x.min(x1 - min_size);
            } else {
                x1 = pointer.x.max(x0 + min_size);
            }
            if top {
                y0 = pointer.y.min(y1 - min_size);
            } else {
                y1 = pointer.y.max(y0 + min_size);
            }
            if keep_aspect && r.width() > 0.0 {
                let ratio = r.height() / r.width();
                let height = ((x1 - x0) * ratio).max(min_size);
                if top {
                    y0 = y1 - height;
                } else {
                    y1 = y0 + height;
                }
            }
        }
        HandleKind::Edge(Edge::Top) => y0 = pointer.y.min(y1 - min_size),
        HandleKind::Edge(Edge::Bottom) => y1 = pointer.y.max(y0 + min_size),
        HandleKind::Edge(Edge::Left) => x0 = pointer.x.min(x1 - min_size),
        HandleKind::Edge(Edge::Right) => x1 = pointer.x.max(x0 + min_size),
        HandleKind::Rotate => {}
    }

    Rect::new(x0, y0, x1, y1)
}

/// The point of `rect` that stays put while `handle` is dragged: the
/// opposite corner, or the middle of the opposite edge.
pub fn fixed_point(rect: Rect, handle: HandleKind) -> Option<Point> {
    let r = rect.abs();
    let c = r.center();
    let point = match handle {
        HandleKind::Corner(Corner::TopLeft) => Point::new(r.x1, r.y1),
        HandleKind::Corner(Corner::TopRight) => Point::new(r.x0, r.y1),
        HandleKind::Corner(Corner::BottomLeft) => Point::new(r.x1, r.y0),
        HandleKind::Corner(Corner::BottomRight) => Point::new(r.x0, r.y0),
        HandleKind::Edge(Edge::Top) => Point::new(c.x, r.y1),
        HandleKind::Edge(Edge::Bottom) => Point::new(c.x, r.y0),
        HandleKind::Edge(Edge::Left) => Point::new(r.x1, c.y),
        HandleKind::Edge(Edge::Right) => Point::new(r.x0, c.y),
        HandleKind::Rotate => return None,
    };
    Some(point)
}

/// Shift a resized rect so that, drawn rotated by `degrees` about its own
/// center, the fixed point of `handle` lands where it was on `original`.
pub fn pin_rotated_resize(original: Rect, resized: Rect, handle: HandleKind, degrees: f64) -> Rect {
    let Some(fixed) = fixed_point(original, handle) else {
        return resized;
    };
    if degrees == 0.0 {
        return resized;
    }
    let angle = degrees.to_radians();
    let before = Affine::rotate_about(angle, original.center()) * fixed;
    let after = Affine::rotate_about(angle, resized.center()) * fixed;
    resized + (before - after)
}

/// Rotation in degrees that points the top of an element at `pointer`.
pub fn rotation_from_pointer(center: Point, pointer: Point) -> f64 {
    (pointer.y - center.y).atan2(pointer.x - center.x).to_degrees() + 90.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::SerializableColor;
    use crate::elements::{ApproxTextMetrics, Shape, ShapeKind, Stroke, StrokePoint};

    fn rect_element() -> Element {
        Shape::new(ShapeKind::Rectangle, 0.0, 0.0, 100.0, 50.0, SerializableColor::black(), 2.0).into()
    }

    #[test]
    fn test_rectangle_handles() {
        let handles = get_handles(&rect_element(), &ApproxTextMetrics, 25.0);
        assert_eq!(handles.len(), 9);
        let rotate = handles.iter().find(|h| h.kind == HandleKind::Rotate).unwrap();
        assert!((rotate.position.x - 50.0).abs() < 1e-9);
        assert!((rotate.position.y + 25.0).abs() < 1e-9);
    }

    #[test]
    fn test_stroke_has_no_handles() {
        let stroke: Element = Stroke::new(
            vec![StrokePoint::new(0.0, 0.0), StrokePoint::new(10.0, 10.0)],
            SerializableColor::black(),
            2.0,
            1.0,
        )
        .into();
        assert!(get_handles(&stroke, &ApproxTextMetrics, 25.0).is_empty());
    }

    #[test]
    fn test_handles_follow_rotation() {
        let mut shape = Shape::new(ShapeKind::Rectangle, 0.0, 0.0, 100.0, 100.0, SerializableColor::black(), 2.0);
        shape.rotation = Some(90.0);
        let handles = get_handles(&shape.into(), &ApproxTextMetrics, 25.0);
        let rotate = handles.iter().find(|h| h.kind == HandleKind::Rotate).unwrap();
        // Top of a square rotated a quarter turn clockwise faces right.
        assert!((rotate.position.x - 125.0).abs() < 1e-9);
        assert!((rotate.position.y - 50.0).abs() < 1e-9);
    }

    #[test]
    fn test_hit_test_handles() {
        let el = rect_element();
        let hit = hit_test_handles(&el, &ApproxTextMetrics, 25.0, Point::new(101.0, 51.0), 5.0);
        assert_eq!(hit, Some(HandleKind::Corner(Corner::BottomRight)));
        assert_eq!(hit_test_handles(&el, &ApproxTextMetrics, 25.0, Point::new(30.0, 30.0), 5.0), None);
    }

    #[test]
    fn test_resize_keeps_opposite_corner() {
        let original = Rect::new(10.0, 10.0, 110.0, 60.0);
        let r = resize_rect(original, HandleKind::Corner(Corner::BottomRight), Point::new(210.0, 90.0), false, 20.0);
        assert_eq!(r, Rect::new(10.0, 10.0, 210.0, 90.0));

        let r = resize_rect(original, HandleKind::Corner(Corner::TopLeft), Point::new(0.0, 0.0), false, 20.0);
        assert_eq!(r, Rect::new(0.0, 0.0, 110.0, 60.0));
    }

    #[test]
    fn test_resize_minimum_size() {
        let original = Rect::new(0.0, 0.0, 100.0, 100.0);
        let r = resize_rect(original, HandleKind::Corner(Corner::BottomRight), Point::new(-50.0, 5.0), false, 20.0);
        assert!((r.width() - 20.0).abs() < f64::EPSILON);
        assert!((r.height() - 20.0).abs() < f64::EPSILON);
        assert_eq!(r.origin(), Point::ZERO);
    }

    #[test]
    fn test_resize_aspect_lock() {
        let original = Rect::new(0.0, 0.0, 100.0, 50.0);
        let r = resize_rect(original, HandleKind::Corner(Corner::BottomRight), Point::new(200.0, 60.0), true, 20.0);
        assert!((r.width() - 200.0).abs() < f64::EPSILON);
        assert!((r.height() - 100.0).abs() < f64::EPSILON);

        let r = resize_rect(original, HandleKind::Corner(Corner::TopLeft), Point::new(-100.0, 0.0), true, 20.0);
        assert!((r.y1 - 50.0).abs() < f64::EPSILON);
        assert!((r.height() - 100.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_edge_resize_one_axis() {
        let original = Rect::new(0.0, 0.0, 100.0, 50.0);
        let r = resize_rect(original, HandleKind::Edge(Edge::Right), Point::new(150.0, 500.0), true, 20.0);
        assert_eq!(r, Rect::new(0.0, 0.0, 150.0, 50.0));
    }

    #[test]
    fn test_fixed_point_opposes_handle() {
        let r = Rect::new(0.0, 0.0, 100.0, 50.0);
        assert_eq!(fixed_point(r, HandleKind::Corner(Corner::TopLeft)), Some(Point::new(100.0, 50.0)));
        assert_eq!(fixed_point(r, HandleKind::Edge(Edge::Top)), Some(Point::new(50.0, 50.0)));
        assert_eq!(fixed_point(r, HandleKind::Edge(Edge::Right)), Some(Point::new(0.0, 25.0)));
        assert_eq!(fixed_point(r, HandleKind::Rotate), None);
    }

    #[test]
    fn test_pin_rotated_resize() {
        let original = Rect::new(0.0, 0.0, 100.0, 100.0);
        let resized = Rect::new(0.0, 0.0, 200.0, 200.0);
        let handle = HandleKind::Corner(Corner::BottomRight);
        assert_eq!(pin_rotated_resize(original, resized, handle, 0.0), resized);

        let pinned = pin_rotated_resize(original, resized, handle, 90.0);
        assert!((pinned.x0 + 100.0).abs() < 1e-9 && pinned.y0.abs() < 1e-9);
        assert!((pinned.width() - 200.0).abs() < 1e-9 && (pinned.height() - 200.0).abs() < 1e-9);
        let corner = Affine::rotate_about(90f64.to_radians(), pinned.center()) * Point::new(pinned.x0, pinned.y0);
        assert!((corner - Point::new(100.0, 0.0)).hypot() < 1e-9);
    }

    #[test]
    fn test_rotation_from_pointer() {
        let c = Point::new(0.0, 0.0);
        assert!(rotation_from_pointer(c, Point::new(0.0, -10.0)).abs() < 1e-9);
        assert!((rotation_from_pointer(c, Point::new(10.0, 0.0)) - 90.0).abs() < 1e-9);
    }
}
