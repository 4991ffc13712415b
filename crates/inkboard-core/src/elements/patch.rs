//! Partial element updates.

use super::StrokePoint;
use crate::color::SerializableColor;
use crate::connector::Binding;
use kurbo::{Rect, Vec2};

/// A partial update merged into an element in place.
///
/// `None` leaves a field untouched. Fields that do not exist on the target
/// variant are ignored. A patch can never change an element's id.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ElementPatch {
    pub x: Option<f64>,
    pub y: Option<f64>,
    pub width: Option<f64>,
    pub height: Option<f64>,
    pub points: Option<Vec<StrokePoint>>,
    /// Rotation in degrees.
    pub rotation: Option<f64>,
    pub color: Option<SerializableColor>,
    pub opacity: Option<f64>,
    pub thickness: Option<f64>,
    /// `Some(None)` removes the fill.
    pub fill_color: Option<Option<SerializableColor>>,
    pub fill_opacity: Option<f64>,
    pub text: Option<String>,
    pub font_size: Option<f64>,
    pub name: Option<String>,
    pub visible: Option<bool>,
    /// `Some(None)` unbinds the endpoint.
    pub bound_start: Option<Option<Binding>>,
    pub bound_end: Option<Option<Binding>>,
}

impl ElementPatch {
    /// Set the position.
    pub fn position(x: f64, y: f64) -> Self {
        Self {
            x: Some(x),
            y: Some(y),
            ..Default::default()
        }
    }

    /// Set position and size from a rectangle.
    pub fn rect(rect: Rect) -> Self {
        Self {
            x: Some(rect.x0),
            y: Some(rect.y0),
            width: Some(rect.width()),
            height: Some(rect.height()),
            ..Default::default()
        }
    }

    /// Set the rotation in degrees.
    pub fn rotation(degrees: f64) -> Self {
        Self {
            rotation: Some(degrees),
            ..Default::default()
        }
    }

    /// Hide or show the element.
    pub fn visibility(visible: bool) -> Self {
        Self {
            visible: Some(visible),
            ..Default::default()
        }
    }

    /// Translated point list for a stroke.
    pub fn translated_points(points: &[StrokePoint], delta: Vec2) -> Self {
        Self {
            points: Some(
                points
                    .iter()
                    .map(|p| StrokePoint {
                        x: p.x + delta.x,
                        y: p.y + delta.y,
                        pressure: p.pressure,
                    })
                    .collect(),
            ),
            ..Default::default()
        }
    }

    /// True when the patch changes nothing.
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}
