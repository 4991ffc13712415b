//! Element definitions for the whiteboard.

mod media;
mod note;
mod patch;
mod shape;
mod stroke;
mod text;

pub use media::{Equation, Image};
pub use note::{Frame, Sticky};
pub use patch::ElementPatch;
pub use shape::{Shape, ShapeKind};
pub use stroke::{DEFAULT_PRESSURE, Stroke, StrokePoint};
pub use text::{ApproxTextMetrics, DEFAULT_FONT_FAMILY, FontSpec, LINE_HEIGHT_FACTOR, Text, TextAlign, TextMetrics};

use crate::connector::AnchorSide;
use crate::geometry::{point_in_rect, segment_intersects_rect, segments_intersect};
use kurbo::{Point, Rect, Vec2};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// Unique identifier for an element.
pub type ElementId = Uuid;

/// Reasons an element is refused by the scene.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvalidElement {
    #[error("stroke has no points")]
    EmptyStroke,
    #[error("text element has no text")]
    EmptyText,
    #[error("image has no source")]
    MissingSource,
    #[error("field `{0}` is not a finite number")]
    NonFinite(&'static str),
    #[error("field `{0}` must be positive")]
    NonPositive(&'static str),
}

pub(crate) fn ensure_finite(field: &'static str, value: f64) -> Result<(), InvalidElement> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(InvalidElement::NonFinite(field))
    }
}

pub(crate) fn default_opacity() -> f64 {
    1.0
}

pub(crate) fn default_visible() -> bool {
    true
}

/// Common behavior of every element variant.
pub trait ElementTrait {
    /// Get the unique identifier.
    fn id(&self) -> ElementId;

    /// Axis-aligned bounds in world coordinates, ignoring rotation.
    fn bounds(&self, metrics: &dyn TextMetrics) -> Rect;

    /// Check if a world point hits the element.
    fn hit_test(&self, point: Point, tolerance: f64, metrics: &dyn TextMetrics) -> bool {
        point_in_rect(point, self.bounds(metrics).inflate(tolerance, tolerance))
    }

    /// Point used for marquee containment.
    fn centroid(&self, metrics: &dyn TextMetrics) -> Point {
        self.bounds(metrics).center()
    }

    /// Move by a world-space delta.
    fn translate(&mut self, delta: Vec2);

    /// Check the construction invariants.
    fn validate(&self) -> Result<(), InvalidElement>;

    /// Merge a partial update.
    fn apply_patch(&mut self, patch: &ElementPatch);

    fn visible(&self) -> bool;
}

/// A board element.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Element {
    Stroke(Stroke),
    Shape(Shape),
    Text(Text),
    Image(Image),
    Equation(Equation),
    Sticky(Sticky),
    Frame(Frame),
}

impl Element {
    fn as_dyn(&self) -> &dyn ElementTrait {
        match self {
            Element::Stroke(e) => e,
            Element::Shape(e) => e,
            Element::Text(e) => e,
            Element::Image(e) => e,
            Element::Equation(e) => e,
            Element::Sticky(e) => e,
            Element::Frame(e) => e,
        }
    }

    fn as_dyn_mut(&mut self) -> &mut dyn ElementTrait {
        match self {
            Element::Stroke(e) => e,
            Element::Shape(e) => e,
            Element::Text(e) => e,
            Element::Image(e) => e,
            Element::Equation(e) => e,
            Element::Sticky(e) => e,
            Element::Frame(e) => e,
        }
    }

    pub fn id(&self) -> ElementId {
        self.as_dyn().id()
    }

    pub fn bounds(&self, metrics: &dyn TextMetrics) -> Rect {
        self.as_dyn().bounds(metrics)
    }

    pub fn hit_test(&self, point: Point, tolerance: f64, metrics: &dyn TextMetrics) -> bool {
        self.as_dyn().hit_test(point, tolerance, metrics)
    }

    pub fn centroid(&self, metrics: &dyn TextMetrics) -> Point {
        self.as_dyn().centroid(metrics)
    }

    pub fn translate(&mut self, delta: Vec2) {
        self.as_dyn_mut().translate(delta);
    }

    pub fn validate(&self) -> Result<(), InvalidElement> {
        self.as_dyn().validate()
    }

    pub fn apply_patch(&mut self, patch: &ElementPatch) {
        self.as_dyn_mut().apply_patch(patch);
    }

    pub fn is_visible(&self) -> bool {
        self.as_dyn().visible()
    }

    /// Name of the variant as persisted in the `type` tag.
    pub fn type_name(&self) -> &'static str {
        match self {
            Element::Stroke(_) => "stroke",
            Element::Shape(_) => "shape",
            Element::Text(_) => "text",
            Element::Image(_) => "image",
            Element::Equation(_) => "equation",
            Element::Sticky(_) => "sticky",
            Element::Frame(_) => "frame",
        }
    }

    /// Connection anchors; empty for everything except rectangles and circles.
    pub fn anchors(&self) -> Vec<(AnchorSide, Point)> {
        match self {
            Element::Shape(shape) => shape.anchors().map(Vec::from).unwrap_or_default(),
            _ => Vec::new(),
        }
    }

    /// Whether corner/edge handles can resize the element.
    pub fn is_resizable(&self) -> bool {
        match self {
            Element::Shape(shape) => !shape.kind.is_connector(),
            Element::Image(_) | Element::Equation(_) | Element::Sticky(_) | Element::Frame(_) => true,
            Element::Stroke(_) | Element::Text(_) => false,
        }
    }

    /// Whether the element carries a rotation field.
    pub fn is_rotatable(&self) -> bool {
        match self {
            Element::Shape(shape) => !shape.kind.is_connector(),
            Element::Image(_) => true,
            _ => false,
        }
    }

    /// Rotation in degrees, zero for variants without one.
    pub fn rotation(&self) -> f64 {
        match self {
            Element::Shape(shape) => shape.rotation_degrees(),
            Element::Image(image) => image.rotation.unwrap_or(0.0),
            _ => 0.0,
        }
    }

    /// Whether the segment `a`-`b` crosses the element's outline.
    ///
    /// Strokes and connectors are tested against their own segments, every
    /// other variant against its bounds.
    pub fn crossed_by(&self, a: Point, b: Point, metrics: &dyn TextMetrics) -> bool {
        match self {
            Element::Stroke(stroke) => stroke
                .points
                .windows(2)
                .any(|w| segments_intersect(a, b, w[0].point(), w[1].point())),
            Element::Shape(shape) if shape.kind.is_connector() => segments_intersect(a, b, shape.start(), shape.end()),
            _ => segment_intersects_rect(a, b, self.bounds(metrics)),
        }
    }

    /// Patch that moves this element by `delta`.
    pub fn translation_patch(&self, delta: Vec2) -> ElementPatch {
        match self {
            Element::Stroke(stroke) => ElementPatch::translated_points(&stroke.points, delta),
            Element::Shape(e) => ElementPatch::position(e.x + delta.x, e.y + delta.y),
            Element::Text(e) => ElementPatch::position(e.x + delta.x, e.y + delta.y),
            Element::Image(e) => ElementPatch::position(e.x + delta.x, e.y + delta.y),
            Element::Equation(e) => ElementPatch::position(e.x + delta.x, e.y + delta.y),
            Element::Sticky(e) => ElementPatch::position(e.x + delta.x, e.y + delta.y),
            Element::Frame(e) => ElementPatch::position(e.x + delta.x, e.y + delta.y),
        }
    }

    pub fn as_shape(&self) -> Option<&Shape> {
        match self {
            Element::Shape(shape) => Some(shape),
            _ => None,
        }
    }
}

impl From<Stroke> for Element {
    fn from(value: Stroke) -> Self {
        Element::Stroke(value)
    }
}

impl From<Shape> for Element {
    fn from(value: Shape) -> Self {
        Element::Shape(value)
    }
}

impl From<Text> for Element {
    fn from(value: Text) -> Self {
        Element::Text(value)
    }
}

impl From<Image> for Element {
    fn from(value: Image) -> Self {
        Element::Image(value)
    }
}

impl From<Equation> for Element {
    fn from(value: Equation) -> Self {
        Element::Equation(value)
    }
}

impl From<Sticky> for Element {
    fn from(value: Sticky) -> Self {
        Element::Sticky(value)
    }
}

impl From<Frame> for Element {
    fn from(value: Frame) -> Self {
        Element::Frame(value)
    }
}
