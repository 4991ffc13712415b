//! Drawing aids placed over the scene: the ruler and the protractor.
//!
//! Overlays are singletons, live outside the element history and are never
//! exported.

use crate::geometry::{point_in_arc, point_in_rect, snap_to_rect_edges};
use kurbo::{Point, Rect, Vec2};
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

/// A straight-edge guide that pen strokes snap to.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Ruler {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Ruler {
    pub const DEFAULT_WIDTH: f64 = 300.0;
    pub const DEFAULT_HEIGHT: f64 = 40.0;
    /// Number of minor tick intervals along the length.
    pub const TICKS: usize = 20;

    /// Place a default-sized ruler centered on a world point.
    pub fn centered_at(center: Point) -> Self {
        Self {
            x: center.x - Self::DEFAULT_WIDTH / 2.0,
            y: center.y - Self::DEFAULT_HEIGHT / 2.0,
            width: Self::DEFAULT_WIDTH,
            height: Self::DEFAULT_HEIGHT,
        }
    }

    pub fn rect(&self) -> Rect {
        Rect::new(self.x, self.y, self.x + self.width, self.y + self.height)
    }

    pub fn contains(&self, point: Point) -> bool {
        point_in_rect(point, self.rect())
    }

    /// Snap a point onto the nearest ruler edge within `threshold`.
    pub fn snap(&self, point: Point, threshold: f64) -> Point {
        snap_to_rect_edges(point, self.rect(), threshold)
    }

    pub fn translate(&mut self, delta: Vec2) {
        self.x += delta.x;
        self.y += delta.y;
    }
}

/// A semicircular angle guide.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Protractor {
    pub x: f64,
    pub y: f64,
    pub radius: f64,
    pub start_angle: f64,
    pub end_angle: f64,
}

impl Protractor {
    pub const DEFAULT_RADIUS: f64 = 100.0;

    /// Place a default protractor centered at a world point.
    pub fn centered_at(center: Point) -> Self {
        Self {
            x: center.x,
            y: center.y,
            radius: Self::DEFAULT_RADIUS,
            start_angle: 0.0,
            end_angle: PI,
        }
    }

    pub fn center(&self) -> Point {
        Point::new(self.x, self.y)
    }

    pub fn contains(&self, point: Point) -> bool {
        point_in_arc(point, self.center(), self.radius, self.start_angle, self.end_angle)
    }

    pub fn translate(&mut self, delta: Vec2) {
        self.x += delta.x;
        self.y += delta.y;
    }
}

/// The overlay slots of a scene.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Overlays {
    pub ruler: Option<Ruler>,
    pub protractor: Option<Protractor>,
}

impl Overlays {
    pub fn clear(&mut self) {
        self.ruler = None;
        self.protractor = None;
    }
}
