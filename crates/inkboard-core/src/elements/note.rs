//! Sticky notes and frames.

use super::{ElementId, ElementPatch, ElementTrait, InvalidElement, TextMetrics, default_opacity, default_visible, ensure_finite};
use crate::color::SerializableColor;
use kurbo::{Rect, Vec2};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

fn default_sticky_color() -> SerializableColor {
    Sticky::DEFAULT_COLOR
}

fn default_sticky_font_size() -> f64 {
    16.0
}

fn default_frame_name() -> String {
    Frame::DEFAULT_NAME.to_string()
}

/// A colored note with word-wrapped text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Sticky {
    pub(crate) id: ElementId,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    #[serde(default)]
    pub text: String,
    #[serde(default = "default_sticky_color")]
    pub color: SerializableColor,
    #[serde(default = "default_sticky_font_size")]
    pub font_size: f64,
    #[serde(default = "default_opacity")]
    pub opacity: f64,
    #[serde(default = "default_visible")]
    pub visible: bool,
}

impl Sticky {
    pub const DEFAULT_COLOR: SerializableColor = SerializableColor::rgb(255, 235, 59);
    pub const CORNER_RADIUS: f64 = 5.0;
    pub const TEXT_PADDING: f64 = 20.0;

    pub fn new(x: f64, y: f64, width: f64, height: f64, text: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            x,
            y,
            width,
            height,
            text: text.into(),
            color: Self::DEFAULT_COLOR,
            font_size: default_sticky_font_size(),
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

    /// Greedy word wrap of the note text to the padded inner width.
    pub fn wrapped_lines(&self, metrics: &dyn TextMetrics) -> Vec<String> {
        let font = super::FontSpec::new(self.font_size, super::text::DEFAULT_FONT_FAMILY);
        let max_width = self.width - Self::TEXT_PADDING * 2.0;
        let mut lines = Vec::new();
        let mut current = String::new();
        for word in self.text.split(' ') {
            let candidate = if current.is_empty() {
                word.to_string()
            } else {
                format!("{current} {word}")
            };
            if !current.is_empty() && metrics.text_width(&candidate, &font) > max_width {
                lines.push(std::mem::replace(&mut current, word.to_string()));
            } else {
                current = candidate;
            }
        }
        lines.push(current);
        lines
    }
}

impl ElementTrait for Sticky {
    fn id(&self) -> ElementId {
        self.id
    }

    fn bounds(&self, _metrics: &dyn TextMetrics) -> Rect {
        self.rect()
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
        if let Some(text) = &patch.text {
            self.text = text.clone();
        }
        if let Some(color) = patch.color {
            self.color = color;
        }
        if let Some(font_size) = patch.font_size {
            self.font_size = font_size;
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

/// A named region used to group content visually.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Frame {
    pub(crate) id: ElementId,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    #[serde(default = "default_frame_name")]
    pub name: String,
    /// Background tint; a faint accent wash when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<SerializableColor>,
    #[serde(default = "default_opacity")]
    pub opacity: f64,
    #[serde(default = "default_visible")]
    pub visible: bool,
}

impl Frame {
    pub const DEFAULT_NAME: &'static str = "Frame";
    pub const DEFAULT_TINT: SerializableColor = SerializableColor::new(0, 122, 255, 13);

    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            id: Uuid::new_v4(),
            x,
            y,
            width,
            height,
            name: default_frame_name(),
            color: None,
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

    pub fn tint(&self) -> SerializableColor {
        self.color.unwrap_or(Self::DEFAULT_TINT)
    }
}

impl ElementTrait for Frame {
    fn id(&self) -> ElementId {
        self.id
    }

    fn bounds(&self, _metrics: &dyn TextMetrics) -> Rect {
        self.rect()
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
        if let Some(name) = &patch.name {
            self.name = name.clone();
        }
        if let Some(color) = patch.color {
            self.color = Some(color);
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
