//! Box-shaped media elements: raster images and typeset equations.

use super::{ElementId, ElementPatch, ElementTrait, InvalidElement, TextMetrics, default_opacity, default_visible, ensure_finite};
use crate::color::SerializableColor;
use crate::geometry::point_in_rect;
use kurbo::{Affine, Point, Rect, Vec2};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// An image placed on the board. `src` is a URL or a `data:` URL.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Image {
    pub(crate) id: ElementId,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub src: String,
    #[serde(default = "default_opacity")]
    pub opacity: f64,
    /// Clockwise rotation in degrees around the center.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rotation: Option<f64>,
    #[serde(default = "default_visible")]
    pub visible: bool,
}

impl Image {
    pub fn new(x: f64, y: f64, width: f64, height: f64, src: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            x,
            y,
            width,
            height,
            src: src.into(),
            opacity: 1.0,
            rotation: None,
            visible: true,
        }
    }

    /// Replace the id (for loading and tests).
    pub fn with_id(mut self, id: ElementId) -> Self {
        self.id = id;
        self
    }

    pub fn rect(&self) -> Rect {
        Rect::new(self.x, self.y, self.x + self.width, self.y + self.height).abs()
    }

    pub fn set_rect(&mut self, rect: Rect) {
        let rect = rect.abs();
        self.x = rect.x0;
        self.y = rect.y0;
        self.width = rect.width();
        self.height = rect.height();
    }

    /// Transform that applies the image's rotation about its center.
    pub fn rotation_transform(&self) -> Affine {
        match self.rotation {
            Some(degrees) if degrees != 0.0 => {
                let center = self.rect().center().to_vec2();
                Affine::translate(center) * Affine::rotate(degrees.to_radians()) * Affine::translate(-center)
            }
            _ => Affine::IDENTITY,
        }
    }
}

impl ElementTrait for Image {
    fn id(&self) -> ElementId {
        self.id
    }

    fn bounds(&self, _metrics: &dyn TextMetrics) -> Rect {
        self.rect()
    }

    fn hit_test(&self, point: Point, tolerance: f64, _metrics: &dyn TextMetrics) -> bool {
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
        ensure_finite("opacity", self.opacity)?;
        if self.src.is_empty() {
            return Err(InvalidElement::MissingSource);
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
        if let Some(opacity) = patch.opacity {
            self.opacity = opacity;
        }
        if let Some(rotation) = patch.rotation {
            self.rotation = Some(rotation);
        }
        if let Some(visible) = patch.visible {
            self.visible = visible;
        }
    }

    fn visible(&self) -> bool {
        self.visible
    }
}

/// A LaTeX equation with its pre-rendered markup.
///
/// The engine treats equations as opaque boxes; typesetting happens outside.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Equation {
    pub(crate) id: ElementId,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub latex: String,
    #[serde(default)]
    pub html: String,
    pub font_size: f64,
    pub color: SerializableColor,
    #[serde(default = "default_opacity")]
    pub opacity: f64,
    #[serde(default = "default_visible")]
    pub visible: bool,
}

impl Equation {
    pub fn new(x: f64, y: f64, width: f64, height: f64, latex: impl Into<String>, font_size: f64, color: SerializableColor) -> Self {
        Self {
            id: Uuid::new_v4(),
            x,
            y,
            width,
            height,
            latex: latex.into(),
            html: String::new(),
            font_size,
            color,
            opacity: 1.0,
            visible: true,
        }
    }

    /// Replace the id (for loading and tests).
    pub fn with_id(mut self, id: ElementId) -> Self {
        self.id = id;
        self
    }

    pub fn rect(&self) -> Rect {
        Rect::new(self.x, self.y, self.x + self.width, self.y + self.height).abs()
    }

    pub fn set_rect(&mut self, rect: Rect) {
        let rect = rect.abs();
        self.x = rect.x0;
        self.y = rect.y0;
        self.width = rect.width();
        self.height = rect.height();
    }
}

impl ElementTrait for Equation {
    fn id(&self) -> ElementId {
        self.id
    }

    fn bounds(&self, _metrics: &dyn TextMetrics) -> Rect {
        self.rect()
    }

    fn centroid(&self, _metrics: &dyn TextMetrics) -> Point {
        Point::new(self.x, self.y)
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
        ensure_finite("fontSize", self.font_size)?;
        ensure_finite("opacity", self.opacity)
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
        if let Some(font_size) = patch.font_size {
            self.font_size = font_size;
        }
        if let Some(color) = patch.color {
            self.color = color;
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
