//! Freehand pen strokes.

use super::{ElementId, ElementPatch, ElementTrait, InvalidElement, TextMetrics, default_opacity, default_visible, ensure_finite};
use crate::color::SerializableColor;
use crate::geometry::{distance_to_polyline, points_bounds};
use kurbo::{Point, Rect, Vec2};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Pressure assumed for pointer devices that do not report one.
pub const DEFAULT_PRESSURE: f64 = 0.5;

/// A single captured pen sample in world coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StrokePoint {
    pub x: f64,
    pub y: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pressure: Option<f64>,
}

impl StrokePoint {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y, pressure: None }
    }

    pub fn with_pressure(x: f64, y: f64, pressure: f64) -> Self {
        Self {
            x,
            y,
            pressure: Some(pressure),
        }
    }

    /// Reported pressure, or [`DEFAULT_PRESSURE`] when the device gave none.
    pub fn pressure(&self) -> f64 {
        self.pressure.unwrap_or(DEFAULT_PRESSURE)
    }

    pub fn point(&self) -> Point {
        Point::new(self.x, self.y)
    }
}

/// A pressure-sensitive freehand stroke.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Stroke {
    pub(crate) id: ElementId,
    pub points: Vec<StrokePoint>,
    pub color: SerializableColor,
    pub thickness: f64,
    #[serde(default = "default_opacity")]
    pub opacity: f64,
    #[serde(default = "default_visible")]
    pub visible: bool,
}

impl Stroke {
    /// Create a new stroke with a fresh id.
    pub fn new(points: Vec<StrokePoint>, color: SerializableColor, thickness: f64, opacity: f64) -> Self {
        Self {
            id: Uuid::new_v4(),
            points,
            color,
            thickness,
            opacity,
            visible: true,
        }
    }

    /// Replace the id (for loading and tests).
    pub fn with_id(mut self, id: ElementId) -> Self {
        self.id = id;
        self
    }

    /// Whether the stroke carries per-point pressure.
    ///
    /// Pressure is looked at on the first sample only; strokes without it
    /// are drawn with a uniform width.
    pub fn has_pressure(&self) -> bool {
        self.points.first().is_some_and(|p| p.pressure.is_some())
    }

    /// Width of the segment ending at `points[index]`.
    pub fn segment_width(&self, index: usize) -> f64 {
        if !self.has_pressure() {
            return self.thickness;
        }
        let pressure = self.points.get(index).map_or(DEFAULT_PRESSURE, StrokePoint::pressure);
        (self.thickness * pressure * 2.0).max(1.0)
    }

    /// Points as kurbo points.
    pub fn polyline(&self) -> Vec<Point> {
        self.points.iter().map(StrokePoint::point).collect()
    }
}

impl ElementTrait for Stroke {
    fn id(&self) -> ElementId {
        self.id
    }

    fn bounds(&self, _metrics: &dyn TextMetrics) -> Rect {
        points_bounds(self.points.iter().map(StrokePoint::point)).unwrap_or(Rect::ZERO)
    }

    fn hit_test(&self, point: Point, tolerance: f64, _metrics: &dyn TextMetrics) -> bool {
        distance_to_polyline(point, &self.polyline()) <= self.thickness / 2.0 + tolerance
    }

    fn translate(&mut self, delta: Vec2) {
        for p in &mut self.points {
            p.x += delta.x;
            p.y += delta.y;
        }
    }

    fn validate(&self) -> Result<(), InvalidElement> {
        if self.points.is_empty() {
            return Err(InvalidElement::EmptyStroke);
        }
        for p in &self.points {
            ensure_finite("points", p.x)?;
            ensure_finite("points", p.y)?;
            if let Some(pressure) = p.pressure {
                ensure_finite("pressure", pressure)?;
            }
        }
        ensure_finite("thickness", self.thickness)?;
        ensure_finite("opacity", self.opacity)
    }

    fn apply_patch(&mut self, patch: &ElementPatch) {
        if let Some(points) = &patch.points {
            self.points = points.clone();
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

    fn line_stroke() -> Stroke {
        Stroke::new(
            vec![
                StrokePoint::with_pressure(0.0, 0.0, 0.5),
                StrokePoint::with_pressure(10.0, 0.0, 1.0),
                StrokePoint::new(20.0, 5.0),
            ],
            SerializableColor::black(),
            4.0,
            1.0,
        )
    }

    #[test]
    fn test_bounds() {
        let bounds = line_stroke().bounds(&ApproxTextMetrics);
        assert_eq!(bounds, Rect::new(0.0, 0.0, 20.0, 5.0));
    }

    #[test]
    fn test_segment_width_uses_end_pressure() {
        let stroke = line_stroke();
        assert!((stroke.segment_width(1) - 8.0).abs() < f64::EPSILON);
        // Missing pressure falls back to 0.5
        assert!((stroke.segment_width(2) - 4.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_segment_width_has_floor() {
        let stroke = Stroke::new(
            vec![StrokePoint::with_pressure(0.0, 0.0, 0.05), StrokePoint::with_pressure(1.0, 1.0, 0.05)],
            SerializableColor::black(),
            2.0,
            1.0,
        );
        assert!((stroke.segment_width(1) - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_hit_test() {
        let stroke = line_stroke();
        assert!(stroke.hit_test(Point::new(5.0, 3.0), 2.0, &ApproxTextMetrics));
        assert!(!stroke.hit_test(Point::new(5.0, 30.0), 2.0, &ApproxTextMetrics));
    }

    #[test]
    fn test_translate_moves_all_points() {
        let mut stroke = line_stroke();
        stroke.translate(Vec2::new(5.0, -5.0));
        assert!((stroke.points[2].x - 25.0).abs() < f64::EPSILON);
        assert!(stroke.points[2].y.abs() < f64::EPSILON);
    }

    #[test]
    fn test_empty_stroke_is_invalid() {
        let stroke = Stroke::new(Vec::new(), SerializableColor::black(), 3.0, 1.0);
        assert_eq!(stroke.validate(), Err(InvalidElement::EmptyStroke));
    }

    #[test]
    fn test_missing_pressure_round_trips() {
        let json = r#"{"x":1.0,"y":2.0}"#;
        let p: StrokePoint = serde_json::from_str(json).unwrap();
        assert!((p.pressure() - DEFAULT_PRESSURE).abs() < f64::EPSILON);
    }
}
