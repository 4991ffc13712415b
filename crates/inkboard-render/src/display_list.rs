//! A recording surface.
//!
//! `DisplayList` captures draw calls in order instead of rasterising them.
//! Hosts replay it onto their own 2D API; tests inspect it directly.

use crate::draw;
use crate::image_cache::DecodedImage;
use crate::renderer::{RenderContext, Renderer};
use crate::surface::Surface;
use inkboard_core::elements::{ApproxTextMetrics, FontSpec, TextMetrics};
use kurbo::{Affine, BezPath, Point, Rect, Stroke};
use peniko::Color;
use std::sync::Arc;

/// One recorded draw call.
#[derive(Debug, Clone)]
pub enum DrawCommand {
    Fill {
        path: BezPath,
        transform: Affine,
        color: Color,
    },
    Stroke {
        path: BezPath,
        transform: Affine,
        style: Stroke,
        color: Color,
    },
    Text {
        text: String,
        origin: Point,
        size: f64,
        family: String,
        bold: bool,
        italic: bool,
        transform: Affine,
        color: Color,
    },
    Image {
        image: DecodedImage,
        rect: Rect,
        transform: Affine,
        opacity: f64,
    },
}

impl DrawCommand {
    pub fn kind(&self) -> &'static str {
        match self {
            DrawCommand::Fill { .. } => "fill",
            DrawCommand::Stroke { .. } => "stroke",
            DrawCommand::Text { .. } => "text",
            DrawCommand::Image { .. } => "image",
        }
    }
}

/// Ordered draw commands plus the text metrics used while recording.
#[derive(Clone)]
pub struct DisplayList {
    commands: Vec<DrawCommand>,
    metrics: Arc<dyn TextMetrics + Send + Sync>,
}

impl Default for DisplayList {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for DisplayList {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DisplayList")
            .field("commands", &self.commands.len())
            .finish_non_exhaustive()
    }
}

impl DisplayList {
    pub fn new() -> Self {
        Self::with_text_metrics(Arc::new(ApproxTextMetrics))
    }

    /// Record with the host's text measurement.
    pub fn with_text_metrics(metrics: Arc<dyn TextMetrics + Send + Sync>) -> Self {
        Self {
            commands: Vec::new(),
            metrics,
        }
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    pub fn into_commands(self) -> Vec<DrawCommand> {
        self.commands
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    pub fn clear(&mut self) {
        self.commands.clear();
    }
}

impl TextMetrics for DisplayList {
    fn text_width(&self, text: &str, font: &FontSpec<'_>) -> f64 {
        self.metrics.text_width(text, font)
    }
}

impl Surface for DisplayList {
    fn fill(&mut self, path: &BezPath, transform: Affine, color: Color) {
        self.commands.push(DrawCommand::Fill {
            path: path.clone(),
            transform,
            color,
        });
    }

    fn stroke(&mut self, path: &BezPath, transform: Affine, style: &Stroke, color: Color) {
        self.commands.push(DrawCommand::Stroke {
            path: path.clone(),
            transform,
            style: style.clone(),
            color,
        });
    }

    fn fill_text(&mut self, text: &str, origin: Point, font: &FontSpec<'_>, transform: Affine, color: Color) {
        if text.is_empty() {
            return;
        }
        self.commands.push(DrawCommand::Text {
            text: text.to_string(),
            origin,
            size: font.size,
            family: font.family.to_string(),
            bold: font.bold,
            italic: font.italic,
            transform,
            color,
        });
    }

    fn draw_image(&mut self, image: &DecodedImage, rect: Rect, transform: Affine, opacity: f64) {
        self.commands.push(DrawCommand::Image {
            image: image.clone(),
            rect,
            transform,
            opacity,
        });
    }
}

impl Renderer for DisplayList {
    fn build_scene(&mut self, ctx: &RenderContext) {
        self.clear();
        draw::build_scene(self, ctx);
        log::trace!("recorded {} draw commands", self.commands.len());
    }
}
