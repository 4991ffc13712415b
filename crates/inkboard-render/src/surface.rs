//! The drawing target abstraction shared by on-screen rendering and export.

use crate::image_cache::DecodedImage;
use inkboard_core::elements::{FontSpec, TextMetrics};
use kurbo::{Affine, BezPath, Point, Rect, Stroke};
use peniko::Color;

/// A 2D drawing target.
///
/// Paths are given in world coordinates together with the world-to-device
/// transform. Text measurement comes from the same font stack the surface
/// draws with.
pub trait Surface: TextMetrics {
    fn fill(&mut self, path: &BezPath, transform: Affine, color: Color);

    fn stroke(&mut self, path: &BezPath, transform: Affine, style: &Stroke, color: Color);

    /// Draw one line of text with its baseline starting at `origin`.
    fn fill_text(&mut self, text: &str, origin: Point, font: &FontSpec<'_>, transform: Affine, color: Color);

    /// Draw a bitmap stretched over `rect`.
    fn draw_image(&mut self, image: &DecodedImage, rect: Rect, transform: Affine, opacity: f64);
}
