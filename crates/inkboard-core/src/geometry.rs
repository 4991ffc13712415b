//! Pure geometry helpers shared by hit testing, snapping and overlays.

use kurbo::{Point, Rect};
use std::f64::consts::TAU;

/// Check whether a point lies inside a rectangle, edges included.
pub fn point_in_rect(point: Point, rect: Rect) -> bool {
    let rect = rect.abs();
    point.x >= rect.x0 && point.x <= rect.x1 && point.y >= rect.y0 && point.y <= rect.y1
}

/// Euclidean distance between two points.
pub fn distance(a: Point, b: Point) -> f64 {
    (b - a).hypot()
}

/// Angle of the vector `a -> b` in radians.
pub fn angle_between(a: Point, b: Point) -> f64 {
    (b.y - a.y).atan2(b.x - a.x)
}

/// Distance from a point to the segment `a..b`.
///
/// The projection is clamped to the segment; a zero-length segment
/// degenerates to the distance to `a`.
pub fn distance_to_segment(point: Point, a: Point, b: Point) -> f64 {
    let ab = b - a;
    let len_sq = ab.hypot2();
    if len_sq == 0.0 {
        return distance(point, a);
    }
    let t = ((point - a).dot(ab) / len_sq).clamp(0.0, 1.0);
    distance(point, a + ab * t)
}

/// Distance from a point to an open polyline. Returns `f64::INFINITY` for an empty slice.
pub fn distance_to_polyline(point: Point, points: &[Point]) -> f64 {
    match points {
        [] => f64::INFINITY,
        [single] => distance(point, *single),
        _ => points
            .windows(2)
            .map(|w| distance_to_segment(point, w[0], w[1]))
            .fold(f64::INFINITY, f64::min),
    }
}

/// Parametric segment/segment intersection test.
///
/// Parallel and collinear segments (zero denominator) never intersect.
pub fn segments_intersect(a1: Point, a2: Point, b1: Point, b2: Point) -> bool {
    let denom = (b2.y - b1.y) * (a2.x - a1.x) - (b2.x - b1.x) * (a2.y - a1.y);
    if denom == 0.0 {
        return false;
    }
    let ua = ((b2.x - b1.x) * (a1.y - b1.y) - (b2.y - b1.y) * (a1.x - b1.x)) / denom;
    let ub = ((a2.x - a1.x) * (a1.y - b1.y) - (a2.y - a1.y) * (a1.x - b1.x)) / denom;
    (0.0..=1.0).contains(&ua) && (0.0..=1.0).contains(&ub)
}

/// The four edges of a rectangle in top, right, bottom, left order.
pub fn rect_edges(rect: Rect) -> [(Point, Point); 4] {
    let rect = rect.abs();
    let tl = Point::new(rect.x0, rect.y0);
    let tr = Point::new(rect.x1, rect.y0);
    let br = Point::new(rect.x1, rect.y1);
    let bl = Point::new(rect.x0, rect.y1);
    [(tl, tr), (tr, br), (bl, br), (tl, bl)]
}

/// Check whether a segment crosses any edge of a rectangle.
pub fn segment_intersects_rect(a: Point, b: Point, rect: Rect) -> bool {
    rect_edges(rect)
        .iter()
        .any(|&(e1, e2)| segments_intersect(a, b, e1, e2))
}

/// Snap a point onto the nearest rectangle edge when within `threshold`.
///
/// Edges are checked top, right, bottom, left; on a tie the first edge wins.
/// Points farther than `threshold` from every edge are returned unchanged.
pub fn snap_to_rect_edges(point: Point, rect: Rect, threshold: f64) -> Point {
    let mut best = point;
    let mut best_dist = threshold;
    for (a, b) in rect_edges(rect) {
        let ab = b - a;
        let len_sq = ab.hypot2();
        let t = if len_sq == 0.0 {
            0.0
        } else {
            ((point - a).dot(ab) / len_sq).clamp(0.0, 1.0)
        };
        let candidate = a + ab * t;
        let dist = distance(point, candidate);
        if dist < best_dist {
            best_dist = dist;
            best = candidate;
        }
    }
    best
}

/// Normalize an angle into `[0, 2π)`.
pub fn normalize_angle(angle: f64) -> f64 {
    let a = angle % TAU;
    if a < 0.0 { a + TAU } else { a }
}

/// Check whether a point lies inside a circular sector.
///
/// The sector spans from `start_angle` to `end_angle` (radians, clockwise in
/// screen space) around `center`.
pub fn point_in_arc(point: Point, center: Point, radius: f64, start_angle: f64, end_angle: f64) -> bool {
    if distance(point, center) > radius {
        return false;
    }
    let span = end_angle - start_angle;
    if span.abs() >= TAU {
        return true;
    }
    let angle = normalize_angle(angle_between(center, point));
    let start = normalize_angle(start_angle);
    let end = normalize_angle(end_angle);
    if start <= end {
        angle >= start && angle <= end
    } else {
        angle >= start || angle <= end
    }
}

/// Bounding rectangle of a set of points, or `None` when empty.
pub fn points_bounds(points: impl IntoIterator<Item = Point>) -> Option<Rect> {
    let mut iter = points.into_iter();
    let first = iter.next()?;
    Some(iter.fold(Rect::from_points(first, first), |acc, p| acc.union_pt(p)))
}
