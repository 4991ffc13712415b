//! Connector anchors and bindings between lines/arrows and shapes.

use crate::elements::{Element, ElementId, ElementPatch};
use crate::geometry::distance;
use kurbo::{Point, Rect};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Side of a shape's bounding box a connector can attach to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnchorSide {
    Top,
    Right,
    Bottom,
    Left,
}

/// Attachment of a connector endpoint to another element's anchor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Binding {
    pub element_id: ElementId,
    pub side: AnchorSide,
}

impl Binding {
    pub fn new(element_id: ElementId, side: AnchorSide) -> Self {
        Self { element_id, side }
    }
}

/// A resolved anchor location.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Anchor {
    pub element_id: ElementId,
    pub side: AnchorSide,
    pub position: Point,
}

impl Anchor {
    pub fn binding(&self) -> Binding {
        Binding::new(self.element_id, self.side)
    }
}

/// Edge midpoints of a rectangle in top, right, bottom, left order.
pub fn anchor_points(rect: Rect) -> [(AnchorSide, Point); 4] {
    let rect = rect.abs();
    let center = rect.center();
    [
        (AnchorSide::Top, Point::new(center.x, rect.y0)),
        (AnchorSide::Right, Point::new(rect.x1, center.y)),
        (AnchorSide::Bottom, Point::new(center.x, rect.y1)),
        (AnchorSide::Left, Point::new(rect.x0, center.y)),
    ]
}

/// Find the closest anchor within `radius` of `point`.
///
/// `exclude` skips the connector currently being edited.
pub fn nearest_anchor<'a>(
    elements: impl IntoIterator<Item = &'a Element>,
    point: Point,
    radius: f64,
    exclude: Option<ElementId>,
) -> Option<Anchor> {
    let mut best: Option<(f64, Anchor)> = None;
    for element in elements {
        if Some(element.id()) == exclude || !element.is_visible() {
            continue;
        }
        for (side, position) in element.anchors() {
            let dist = distance(point, position);
            if dist > radius {
                continue;
            }
            if best.is_none_or(|(d, _)| dist < d) {
                best = Some((
                    dist,
                    Anchor {
                        element_id: element.id(),
                        side,
                        position,
                    },
                ));
            }
        }
    }
    best.map(|(_, anchor)| anchor)
}

/// Resolve a binding to the current anchor position. Stale bindings yield `None`.
pub fn resolve_binding(elements: &[Element], binding: &Binding) -> Option<Point> {
    elements
        .iter()
        .find(|e| e.id() == binding.element_id)?
        .anchors()
        .into_iter()
        .find_map(|(side, p)| (side == binding.side).then_some(p))
}

/// Patches that re-attach connectors bound to any of the `moved` elements.
///
/// The endpoint bound to a moved element jumps to that element's current
/// anchor; the other endpoint stays where it is.
pub fn connector_updates(elements: &[Element], moved: &HashSet<ElementId>) -> Vec<(ElementId, ElementPatch)> {
    let mut updates = Vec::new();
    for element in elements {
        let Element::Shape(shape) = element else {
            continue;
        };
        if !shape.kind.is_connector() {
            continue;
        }
        let follow = |binding: &Option<Binding>| {
            binding
                .filter(|b| moved.contains(&b.element_id))
                .and_then(|b| resolve_binding(elements, &b))
        };
        let new_start = follow(&shape.bound_start);
        let new_end = follow(&shape.bound_end);
        if new_start.is_none() && new_end.is_none() {
            continue;
        }
        let start = new_start.unwrap_or_else(|| shape.start());
        let end = new_end.unwrap_or_else(|| shape.end());
        updates.push((
            shape.id,
            ElementPatch {
                x: Some(start.x),
                y: Some(start.y),
                width: Some(end.x - start.x),
                height: Some(end.y - start.y),
                ..Default::default()
            },
        ));
    }
    updates
}
