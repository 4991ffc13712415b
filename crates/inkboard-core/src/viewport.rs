//! Viewport module for pan/zoom transforms.

use kurbo::{Affine, Point, Vec2};
use serde::{Deserialize, Serialize};

/// Smallest allowed scale.
pub const MIN_SCALE: f64 = 0.1;
/// Largest allowed scale.
pub const MAX_SCALE: f64 = 5.0;
/// Offsets are clamped to this magnitude on both axes.
pub const MAX_OFFSET: f64 = 100_000.0;

/// The screen <-> world mapping: `screen = world * scale + (x, y)`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    /// Horizontal screen offset of the world origin.
    pub x: f64,
    /// Vertical screen offset of the world origin.
    pub y: f64,
    /// Zoom factor.
    pub scale: f64,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            scale: 1.0,
        }
    }
}

impl Viewport {
    /// Create a viewport, rejecting non-finite parts and clamping the rest.
    pub fn new(x: f64, y: f64, scale: f64) -> Option<Self> {
        if !(x.is_finite() && y.is_finite() && scale.is_finite()) {
            return None;
        }
        Some(Self {
            x: clamp_offset(x),
            y: clamp_offset(y),
            scale: scale.clamp(MIN_SCALE, MAX_SCALE),
        })
    }

    pub fn offset(&self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }

    /// Get the affine transform for rendering (world -> screen).
    pub fn transform(&self) -> Affine {
        Affine::translate(self.offset()) * Affine::scale(self.scale)
    }

    /// Get the inverse transform for input handling (screen -> world).
    pub fn inverse_transform(&self) -> Affine {
        Affine::scale(1.0 / self.scale) * Affine::translate(-self.offset())
    }

    /// Convert a screen point to world coordinates.
    pub fn to_world(&self, screen: Point) -> Point {
        Point::new((screen.x - self.x) / self.scale, (screen.y - self.y) / self.scale)
    }

    /// Convert a world point to screen coordinates.
    pub fn to_screen(&self, world: Point) -> Point {
        Point::new(world.x * self.scale + self.x, world.y * self.scale + self.y)
    }

    /// Convert a screen-space length to world units.
    pub fn screen_to_world_len(&self, len: f64) -> f64 {
        len / self.scale
    }

    /// Pan by a delta in screen coordinates.
    pub fn pan(&mut self, delta: Vec2) {
        if !(delta.x.is_finite() && delta.y.is_finite()) {
            log::warn!("ignoring non-finite pan delta {delta:?}");
            return;
        }
        self.x = clamp_offset(self.x + delta.x);
        self.y = clamp_offset(self.y + delta.y);
    }

    /// Zoom by an additive scale delta, keeping `screen_point` fixed.
    ///
    /// Returns `false` when the clamped scale did not change.
    pub fn zoom_at(&mut self, screen_point: Point, scale_delta: f64) -> bool {
        self.zoom_to(screen_point, self.scale + scale_delta)
    }

    /// Zoom by a multiplicative factor, keeping `screen_point` fixed.
    pub fn zoom_by(&mut self, screen_point: Point, factor: f64) -> bool {
        self.zoom_to(screen_point, self.scale * factor)
    }

    fn zoom_to(&mut self, p: Point, target: f64) -> bool {
        if !(target.is_finite() && p.x.is_finite() && p.y.is_finite()) {
            log::warn!("ignoring non-finite zoom request (scale {target}, anchor {p:?})");
            return false;
        }
        let new_scale = target.clamp(MIN_SCALE, MAX_SCALE);
        if (new_scale - self.scale).abs() < f64::EPSILON {
            return false;
        }
        let ratio = new_scale / self.scale;
        let x = p.x - (p.x - self.x) * ratio;
        let y = p.y - (p.y - self.y) * ratio;
        if !(x.is_finite() && y.is_finite()) {
            log::warn!("zoom produced a non-finite offset; keeping previous viewport");
            return false;
        }
        self.x = clamp_offset(x);
        self.y = clamp_offset(y);
        self.scale = new_scale;
        true
    }

    /// Reset to the identity viewport.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

fn clamp_offset(value: f64) -> f64 {
    value.clamp(-MAX_OFFSET, MAX_OFFSET)
}
