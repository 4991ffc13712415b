//! Geometric shapes: rectangles, circles and the line/arrow connectors.

use super::{ElementId, ElementPatch, ElementTrait, InvalidElement, TextMetrics, default_opacity, default_visible, ensure_finite};
use crate::color::SerializableColor;
use crate::connector::{AnchorSide, Binding, anchor_points};
use crate::geometry::{distance_to_segment, point_in_rect};
use kurbo::{Affine, Point, Rect, Vec2};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Kind of geometric shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShapeKind {
    Rectangle,
    Circle,
    Line,
    Arrow,
}

impl ShapeKind {
    /// Lines and arrows join two points and can bind to anchors.
    pub fn is_connector(self) -> bool {
        matches!(self, ShapeKind::Line | ShapeKind::Arrow)
    }

    /// Rectangles and circles expose connection anchors.
    pub fn has_anchors(self) -> bool {
        matches!(self, ShapeKind::Rectangle | ShapeKind::Circle)
    }
}

/// A shape spanning `(x, y)` to `(x + width, y + height)`.
///
/// Width and height keep the drag direction and may be negative. For
/// connectors the two corners are the start and end points.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Shape {
    pub(crate) id: ElementId,
    pub kind: ShapeKind,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub color: SerializableColor,
    pub thickness: f64,
    #[serde(default = "default_opacity")]
    pub opacity: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fill_color: Option<SerializableColor>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fill_opacity: Option<f64>,
    /// Clockwise rotation in degrees around the center.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rotation: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bound_start: Option<Binding>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bound_end: Option<Binding>,
    #[serde(default = "default_visible")]
    pub visible: bool,
}

impl Shape {
    /// Create a new unfilled shape.
    pub fn new(kind: ShapeKind, x: f64, y: f64, width: f64, height: f64, color: SerializableColor, thickness: f64) -> Self {
        Self {
            id: Uuid::new_v4(),
            kind,
            x,
            y,
            width,
            height,
            color,
            thickness,
            opacity: 1.0,
            fill_color: None,
            fill_opacity: None,
            rotation: None,
            bound_start: None,
            bound_end: None,
            visible: true,
        }
    }

    /// Create a shape from a drag start and end point.
    pub fn from_drag(kind: ShapeKind, start: Point, end: Point, color: SerializableColor, thickness: f64) -> Self {
        Self::new(kind, start.x, start.y, end.x - start.x, end.y - start.y, color, thickness)
    }

    /// Replace the id (for loading and tests).
    pub fn with_id(mut self, id: ElementId) -> Self {
        self.id = id;
        self
    }

    pub fn start(&self) -> Point {
        Point::new(self.x, self.y)
    }

    pub fn end(&self) -> Point {
        Point::new(self.x + self.width, self.y + self.height)
    }

    /// Move both corners, keeping the signed extent.
    pub fn set_endpoints(&mut self, start: Point, end: Point) {
        self.x = start.x;
        self.y = start.y;
        self.width = end.x - start.x;
        self.height = end.y - start.y;
    }

    /// Normalized rectangle, ignoring rotation.
    pub fn rect(&self) -> Rect {
        Rect::from_points(self.start(), self.end())
    }

    /// Replace the geometry with a normalized rectangle.
    pub fn set_rect(&mut self, rect: Rect) {
        let rect = rect.abs();
        self.x = rect.x0;
        self.y = rect.y0;
        self.width = rect.width();
        self.height = rect.height();
    }

    /// Rotation in degrees, zero when unset.
    pub fn rotation_degrees(&self) -> f64 {
        self.rotation.unwrap_or(0.0)
    }

    /// Transform that applies the shape's rotation about its center.
    pub fn rotation_transform(&self) -> Affine {
        let degrees = self.rotation_degrees();
        if degrees == 0.0 {
            return Affine::IDENTITY;
        }
        let center = self.rect().center();
        Affine::translate(center.to_vec2())
            * Affine::rotate(degrees.to_radians())
            * Affine::translate(-center.to_vec2())
    }

    /// Connection anchors (rectangles and circles only).
    pub fn anchors(&self) -> Option<[(AnchorSide, Point); 4]> {
        self.kind.has_anchors().then(|| anchor_points(self.rect()))
    }

    /// Effective fill opacity, zero when no fill is set.
    pub fn fill_alpha(&self) -> f64 {
        match self.fill_color {
            Some(_) => self.fill_opacity.unwrap_or(0.0),
            None => 0.0,
        }
    }
}

impl ElementTrait for Shape {
    fn id(&self) -> ElementId {
        self.id
    }

    fn bounds(&self, _metrics: &dyn TextMetrics) -> Rect {
        self.rect()
    }

    fn hit_test(&self, point: Point, tolerance: f64, _metrics: &dyn TextMetrics) -> bool {
        if self.kind.is_connector() {
            return distance_to_segment(point, self.start(), self.end()) <= self.thickness / 2.0 + tolerance;
        }
        let local = self.rotation_transform().inverse() * point;
        point_in_rect(local, self.rect().inflate(tolerance, tolerance))
    }

    fn translate(&mut self, delta: Vec2) {
        self.x += delta.x;
        self.y += delta.y;
    }

    fn validate(&self) -> Result<(), InvalidElement> {
        ensure_finite("x", self.x)?;
        ensure_finite("y", self.y)?;
        ensure_finite("width", self.width)?;
        ensure_finite("height", self.height)?;
        ensure_finite("thickness", self.thickness)?;
        ensure_finite("opacity", self.opacity)?;
        if let Some(rotation) = self.rotation {
            ensure_finite("rotation", rotation)?;
        }
        Ok(())
    }

    fn apply_patch(&mut self, patch: &ElementPatch) {
        if let Some(x) = patch.x {
            self.x = x;
        }
        if let Some(y) = patch.y {
            self.y = y;
        }
        if let Some(width) = patch.width {
            self.width = width;
        }
        if let Some(height) = patch.height {
            self.height = height;
        }
        if let Some(color) = patch.color {
            self.color = color;
        }
        if let Some(thickness) = patch.thickness {
            self.thickness = thickness;
        }
        if let Some(opacity) = patch.opacity {
            self.opacity = opacity;
        }
        if let Some(fill) = patch.fill_color {
            self.fill_color = fill;
        }
        if let Some(fill_opacity) = patch.fill_opacity {
            self.fill_opacity = Some(fill_opacity);
        }
        if let Some(rotation) = patch.rotation {
            self.rotation = Some(rotation);
        }
        if let Some(binding) = patch.bound_start {
            self.bound_start = binding;
        }
        if let Some(binding) = patch.bound_end {
            self.bound_end = binding;
        }
        if let Some(visible) = patch.visible {
            self.visible = visible;
        }
    }

    fn visible(&self) -> bool {
        self.visible
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::elements::ApproxTextMetrics;

    #[test]
    fn test_negative_extent_bounds_normalized() {
        let shape = Shape::new(ShapeKind::Rectangle, 100.0, 100.0, -40.0, -30.0, SerializableColor::black(), 2.0);
        let bounds = shape.bounds(&ApproxTextMetrics);
        assert_eq!(bounds, Rect::new(60.0, 70.0, 100.0, 100.0));
    }

    #[test]
    fn test_from_drag_keeps_direction() {
        let shape = Shape::from_drag(
            ShapeKind::Arrow,
            Point::new(50.0, 50.0),
            Point::new(10.0, 80.0),
            SerializableColor::black(),
            3.0,
        );
        assert_eq!(shape.start(), Point::new(50.0, 50.0));
        assert_eq!(shape.end(), Point::new(10.0, 80.0));
    }

    #[test]
    fn test_anchors_only_for_closed_shapes() {
        let rect = Shape::new(ShapeKind::Rectangle, 0.0, 0.0, 100.0, 50.0, SerializableColor::black(), 2.0);
        let anchors = rect.anchors().unwrap();
        assert_eq!(anchors[1], (AnchorSide::Right, Point::new(100.0, 25.0)));

        let line = Shape::new(ShapeKind::Line, 0.0, 0.0, 100.0, 50.0, SerializableColor::black(), 2.0);
        assert!(line.anchors().is_none());
    }

    #[test]
    fn test_connector_hit_test_uses_segment() {
        let line = Shape::new(ShapeKind::Line, 0.0, 0.0, 100.0, 100.0, SerializableColor::black(), 2.0);
        assert!(line.hit_test(Point::new(50.0, 52.0), 2.0, &ApproxTextMetrics));
        // Inside the bounding box but far from the segment
        assert!(!line.hit_test(Point::new(90.0, 10.0), 2.0, &ApproxTextMetrics));
    }

    #[test]
    fn test_rotated_hit_test() {
        let mut rect = Shape::new(ShapeKind::Rectangle, 0.0, 40.0, 100.0, 20.0, SerializableColor::black(), 2.0);
        assert!(!rect.hit_test(Point::new(50.0, 5.0), 0.0, &ApproxTextMetrics));
        rect.rotation = Some(90.0);
        assert!(rect.hit_test(Point::new(50.0, 5.0), 0.0, &ApproxTextMetrics));
    }

    #[test]
    fn test_patch_clears_binding() {
        let mut line = Shape::new(ShapeKind::Line, 0.0, 0.0, 10.0, 10.0, SerializableColor::black(), 2.0);
        line.bound_start = Some(Binding::new(Uuid::new_v4(), AnchorSide::Left));
        line.apply_patch(&ElementPatch {
            bound_start: Some(None),
            ..Default::default()
        });
        assert!(line.bound_start.is_none());
    }
}
