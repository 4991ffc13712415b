//! Renderer trait abstraction.

use crate::image_cache::ImageCache;
use inkboard_core::Canvas;
use kurbo::{Affine, Rect, Size};
use peniko::Color;
use thiserror::Error;

/// Renderer errors.
#[derive(Debug, Error)]
pub enum RendererError {
    #[error("not a base64 data URL: {0}")]
    InvalidDataUrl(String),
    #[error("base64 payload is malformed: {0}")]
    Base64(#[from] base64::DecodeError),
    #[error("image decode failed: {0}")]
    Decode(#[from] image::ImageError),
}

/// Result type for renderer operations.
pub type RenderResult<T> = Result<T, RendererError>;

/// Context for a single render frame.
pub struct RenderContext<'a> {
    /// The canvas to render.
    pub canvas: &'a Canvas,
    /// Decoded bitmaps for image elements.
    pub images: &'a ImageCache,
    /// Surface size in logical pixels.
    pub viewport_size: Size,
    /// Device pixel ratio (for HiDPI).
    pub scale_factor: f64,
    /// Selection outline and handle color.
    pub selection_color: Color,
    /// Draw the grid and background fill.
    pub draw_background: bool,
}

impl<'a> RenderContext<'a> {
    pub fn new(canvas: &'a Canvas, images: &'a ImageCache, viewport_size: Size) -> Self {
        Self {
            canvas,
            images,
            viewport_size,
            scale_factor: 1.0,
            selection_color: Color::from_rgba8(0, 122, 255, 255),
            draw_background: true,
        }
    }

    /// Set the scale factor for HiDPI.
    pub fn with_scale_factor(mut self, scale_factor: f64) -> Self {
        self.scale_factor = scale_factor;
        self
    }

    pub fn with_selection_color(mut self, color: Color) -> Self {
        self.selection_color = color;
        self
    }

    /// Skip the background fill and grid, e.g. for transparent overlays.
    pub fn without_background(mut self) -> Self {
        self.draw_background = false;
        self
    }

    /// World to device-pixel transform for this frame.
    pub fn transform(&self) -> Affine {
        Affine::scale(self.scale_factor) * self.canvas.viewport().transform()
    }

    /// The visible surface in logical pixels.
    pub fn screen_rect(&self) -> Rect {
        self.viewport_size.to_rect()
    }

    /// Background color (for clearing).
    pub fn background_color(&self) -> Color {
        self.canvas.background().background_color.into()
    }
}

/// Trait for rendering backends.
pub trait Renderer: Send + Sync {
    /// Build the drawing commands for a frame.
    fn build_scene(&mut self, ctx: &RenderContext);

    /// Get the background color (for clearing).
    fn background_color(&self, ctx: &RenderContext) -> Color {
        ctx.background_color()
    }
}
