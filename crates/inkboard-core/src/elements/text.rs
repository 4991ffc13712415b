//! Text labels and the text-measuring capability.

use super::{ElementId, ElementPatch, ElementTrait, InvalidElement, default_opacity, default_visible, ensure_finite};
use crate::color::SerializableColor;
use kurbo::{Point, Rect, Vec2};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Line height as a multiple of the font size.
pub const LINE_HEIGHT_FACTOR: f64 = 1.2;

/// Default font family for new text.
pub const DEFAULT_FONT_FAMILY: &str = "Inter";

/// Font description used for measuring.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FontSpec<'a> {
    pub size: f64,
    pub family: &'a str,
    pub bold: bool,
    pub italic: bool,
}

impl<'a> FontSpec<'a> {
    pub fn new(size: f64, family: &'a str) -> Self {
        Self {
            size,
            family,
            bold: false,
            italic: false,
        }
    }
}

/// Measures rendered text width.
///
/// The engine does not own a font stack; the host supplies this, usually
/// backed by the same text shaper the renderer uses.
pub trait TextMetrics {
    /// Advance width of a single line of text.
    fn text_width(&self, text: &str, font: &FontSpec<'_>) -> f64;
}

/// Fixed-advance approximation used when no shaper is available.
#[derive(Debug, Clone, Copy, Default)]
pub struct ApproxTextMetrics;

impl ApproxTextMetrics {
    /// Average glyph advance relative to the font size.
    pub const ADVANCE: f64 = 0.6;
}

impl TextMetrics for ApproxTextMetrics {
    fn text_width(&self, text: &str, font: &FontSpec<'_>) -> f64 {
        let weight = if font.bold { 1.05 } else { 1.0 };
        text.chars().count() as f64 * font.size * Self::ADVANCE * weight
    }
}

/// Horizontal alignment of text lines within the block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextAlign {
    #[default]
    Left,
    Center,
    Right,
}

fn default_font_family() -> String {
    DEFAULT_FONT_FAMILY.to_string()
}

/// A text block. `(x, y)` is the baseline origin of the first line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Text {
    pub(crate) id: ElementId,
    pub x: f64,
    pub y: f64,
    pub text: String,
    pub font_size: f64,
    #[serde(default = "default_font_family")]
    pub font_family: String,
    pub color: SerializableColor,
    #[serde(default = "default_opacity")]
    pub opacity: f64,
    #[serde(default)]
    pub bold: bool,
    #[serde(default)]
    pub italic: bool,
    #[serde(default)]
    pub underline: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub background_color: Option<SerializableColor>,
    #[serde(default)]
    pub text_align: TextAlign,
    #[serde(default = "default_visible")]
    pub visible: bool,
}

impl Text {
    /// Padding around the optional background box.
    pub const BACKGROUND_PADDING: f64 = 8.0;

    /// Create a new left-aligned text block.
    pub fn new(x: f64, y: f64, text: impl Into<String>, font_size: f64, color: SerializableColor) -> Self {
        Self {
            id: Uuid::new_v4(),
            x,
            y,
            text: text.into(),
            font_size,
            font_family: default_font_family(),
            color,
            opacity: 1.0,
            bold: false,
            italic: false,
            underline: false,
            background_color: None,
            text_align: TextAlign::Left,
            visible: true,
        }
    }

    /// Replace the id (for loading and tests).
    pub fn with_id(mut self, id: ElementId) -> Self {
        self.id = id;
        self
    }

    pub fn font(&self) -> FontSpec<'_> {
        FontSpec {
            size: self.font_size,
            family: &self.font_family,
            bold: self.bold,
            italic: self.italic,
        }
    }

    pub fn lines(&self) -> impl Iterator<Item = &str> {
        self.text.split('\n')
    }

    pub fn line_height(&self) -> f64 {
        self.font_size * LINE_HEIGHT_FACTOR
    }

    /// Width of the widest line.
    pub fn max_line_width(&self, metrics: &dyn TextMetrics) -> f64 {
        let font = self.font();
        self.lines()
            .map(|line| metrics.text_width(line, &font))
            .fold(0.0, f64::max)
    }

    /// Height of the text block; a single line is exactly one font size tall.
    pub fn block_height(&self) -> f64 {
        let count = self.lines().count();
        if count <= 1 {
            self.font_size
        } else {
            count as f64 * self.line_height()
        }
    }
}

impl ElementTrait for Text {
    fn id(&self) -> ElementId {
        self.id
    }

    fn bounds(&self, metrics: &dyn TextMetrics) -> Rect {
        Rect::from_origin_size(
            (self.x, self.y - self.font_size),
            (self.max_line_width(metrics), self.block_height()),
        )
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
        ensure_finite("fontSize", self.font_size)?;
        ensure_finite("opacity", self.opacity)?;
        if self.font_size <= 0.0 {
            return Err(InvalidElement::NonPositive("fontSize"));
        }
        if self.text.is_empty() {
            return Err(InvalidElement::EmptyText);
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
        if let Some(text) = &patch.text {
            self.text = text.clone();
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_line_bounds() {
        let text = Text::new(10.0, 50.0, "hello", 20.0, SerializableColor::black());
        let bounds = text.bounds(&ApproxTextMetrics);
        assert!((bounds.x0 - 10.0).abs() < f64::EPSILON);
        assert!((bounds.y0 - 30.0).abs() < f64::EPSILON);
        assert!((bounds.width() - 60.0).abs() < 1e-9);
        assert!((bounds.height() - 20.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_multi_line_bounds_use_widest_line() {
        let text = Text::new(0.0, 16.0, "ab\nabcd\na", 10.0, SerializableColor::black());
        let bounds = text.bounds(&ApproxTextMetrics);
        assert!((bounds.width() - 24.0).abs() < 1e-9);
        assert!((bounds.height() - 36.0).abs() < 1e-9);
    }

    #[test]
    fn test_centroid_is_anchor_point() {
        let text = Text::new(7.0, 9.0, "anchor", 16.0, SerializableColor::black());
        assert_eq!(text.centroid(&ApproxTextMetrics), Point::new(7.0, 9.0));
    }

    #[test]
    fn test_empty_text_invalid() {
        let text = Text::new(0.0, 0.0, "", 16.0, SerializableColor::black());
        assert_eq!(text.validate(), Err(InvalidElement::EmptyText));
    }

    #[test]
    fn test_defaults_on_deserialize() {
        let json = format!(
            r##"{{"id":"{}","x":1,"y":2,"text":"hi","fontSize":16,"color":"#000000"}}"##,
            Uuid::new_v4()
        );
        let text: Text = serde_json::from_str(&json).unwrap();
        assert_eq!(text.font_family, "Inter");
        assert_eq!(text.text_align, TextAlign::Left);
        assert!(text.visible);
    }
}
