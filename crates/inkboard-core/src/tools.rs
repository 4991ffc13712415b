//! Tool system for the whiteboard.

use crate::color::SerializableColor;
use crate::elements::{DEFAULT_FONT_FAMILY, ShapeKind};
use serde::{Deserialize, Serialize};

/// Available tools.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ToolKind {
    Select,
    Pan,
    #[default]
    Pen,
    Eraser,
    Rectangle,
    Circle,
    Line,
    Arrow,
    Ruler,
    Protractor,
}

impl ToolKind {
    /// The shape a drawing tool produces.
    pub fn shape_kind(self) -> Option<ShapeKind> {
        match self {
            ToolKind::Rectangle => Some(ShapeKind::Rectangle),
            ToolKind::Circle => Some(ShapeKind::Circle),
            ToolKind::Line => Some(ShapeKind::Line),
            ToolKind::Arrow => Some(ShapeKind::Arrow),
            _ => None,
        }
    }

    /// Display name.
    pub fn name(self) -> &'static str {
        match self {
            ToolKind::Select => "Select",
            ToolKind::Pan => "Pan",
            ToolKind::Pen => "Pen",
            ToolKind::Eraser => "Eraser",
            ToolKind::Rectangle => "Rectangle",
            ToolKind::Circle => "Circle",
            ToolKind::Line => "Line",
            ToolKind::Arrow => "Arrow",
            ToolKind::Ruler => "Ruler",
            ToolKind::Protractor => "Protractor",
        }
    }
}

/// Style applied to newly created elements.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ToolProperties {
    pub color: SerializableColor,
    pub thickness: f64,
    pub opacity: f64,
    pub font_size: f64,
    pub font_family: String,
    pub fill_color: Option<SerializableColor>,
    pub fill_opacity: f64,
}

impl Default for ToolProperties {
    fn default() -> Self {
        Self {
            color: SerializableColor::accent(),
            thickness: 3.0,
            opacity: 1.0,
            font_size: 16.0,
            font_family: DEFAULT_FONT_FAMILY.to_string(),
            fill_color: None,
            fill_opacity: 0.0,
        }
    }
}

/// A single tool property change.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "property", content = "value", rename_all = "camelCase")]
pub enum ToolProperty {
    Color(SerializableColor),
    Thickness(f64),
    Opacity(f64),
    FontSize(f64),
    FontFamily(String),
    FillColor(Option<SerializableColor>),
    FillOpacity(f64),
}

impl ToolProperties {
    /// Apply a change. Out-of-range values are rejected and leave the
    /// properties untouched.
    pub fn apply(&mut self, property: ToolProperty) -> bool {
        match property {
            ToolProperty::Color(color) => self.color = color,
            ToolProperty::Thickness(t) if t.is_finite() && t > 0.0 => self.thickness = t,
            ToolProperty::Opacity(o) if (0.0..=1.0).contains(&o) => self.opacity = o,
            ToolProperty::FontSize(s) if s.is_finite() && s > 0.0 => self.font_size = s,
            ToolProperty::FontFamily(family) if !family.is_empty() => self.font_family = family,
            ToolProperty::FillColor(fill) => self.fill_color = fill,
            ToolProperty::FillOpacity(o) if (0.0..=1.0).contains(&o) => self.fill_opacity = o,
            rejected => {
                log::warn!("rejected tool property {rejected:?}");
                return false;
            }
        }
        true
    }
}
