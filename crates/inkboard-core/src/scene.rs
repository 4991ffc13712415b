//! The scene store: the ordered element list, its history, the selection
//! and the overlays.

use crate::connector::{Anchor, Binding, connector_updates, nearest_anchor};
use crate::elements::{ApproxTextMetrics, Element, ElementId, ElementPatch, InvalidElement, TextMetrics};
use crate::geometry::point_in_rect;
use crate::history::History;
use crate::overlay::Overlays;
use kurbo::{Point, Rect, Vec2};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;
use thiserror::Error;

/// Errors from scene mutations that the caller may want to report.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SceneError {
    #[error("invalid element: {0}")]
    Invalid(#[from] InvalidElement),
    #[error("an element with id {0} already exists")]
    DuplicateId(ElementId),
}

/// Z-order move direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ZOrder {
    ToFront,
    ToBack,
}

/// Alignment target for a group of elements.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Alignment {
    Left,
    CenterHorizontal,
    Right,
    Top,
    CenterVertical,
    Bottom,
}

/// Distribution axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Axis {
    Horizontal,
    Vertical,
}

/// Which elements an export should include.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ExportScope {
    /// Every visible element.
    All,
    /// Visible selected elements.
    Selection,
    /// Visible elements whose bounds intersect a world rectangle.
    Within(Rect),
}

/// Owns the live elements in z-order (first = bottom).
#[derive(Clone)]
pub struct Scene {
    elements: Vec<Element>,
    history: History,
    selection: Vec<ElementId>,
    overlays: Overlays,
    metrics: Arc<dyn TextMetrics + Send + Sync>,
}

impl fmt::Debug for Scene {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Scene")
            .field("elements", &self.elements.len())
            .field("history_cursor", &self.history.cursor())
            .field("selection", &self.selection)
            .field("overlays", &self.overlays)
            .finish()
    }
}

impl Default for Scene {
    fn default() -> Self {
        Self::new()
    }
}

impl Scene {
    /// Create an empty scene with unbounded history.
    pub fn new() -> Self {
        Self {
            elements: Vec::new(),
            history: History::default(),
            selection: Vec::new(),
            overlays: Overlays::default(),
            metrics: Arc::new(ApproxTextMetrics),
        }
    }

    /// Bound the history to `limit` snapshots.
    pub fn with_history_limit(mut self, limit: Option<usize>) -> Self {
        self.history = History::new(limit);
        self.history.reset_to(&self.elements);
        self
    }

    /// Use a host-provided text measurer.
    pub fn with_text_metrics(mut self, metrics: Arc<dyn TextMetrics + Send + Sync>) -> Self {
        self.metrics = metrics;
        self
    }

    pub fn metrics(&self) -> &dyn TextMetrics {
        self.metrics.as_ref()
    }

    // --- Queries ---

    /// All elements in z-order.
    pub fn elements(&self) -> &[Element] {
        &self.elements
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    pub fn element(&self, id: ElementId) -> Option<&Element> {
        self.elements.iter().find(|e| e.id() == id)
    }

    fn index_of(&self, id: ElementId) -> Option<usize> {
        self.elements.iter().position(|e| e.id() == id)
    }

    pub fn contains(&self, id: ElementId) -> bool {
        self.index_of(id).is_some()
    }

    pub fn bounds_of(&self, id: ElementId) -> Option<Rect> {
        self.element(id).map(|e| e.bounds(self.metrics()))
    }

    /// Elements that are drawn and exported.
    pub fn visible_elements(&self) -> impl Iterator<Item = &Element> {
        self.elements.iter().filter(|e| e.is_visible())
    }

    /// Topmost visible element hit at a world point.
    pub fn hit_test(&self, point: Point, tolerance: f64) -> Option<ElementId> {
        self.elements
            .iter()
            .rev()
            .filter(|e| e.is_visible())
            .find(|e| e.hit_test(point, tolerance, self.metrics()))
            .map(Element::id)
    }

    /// Topmost visible element hit at `to`, or crossed on the way from `from`.
    pub fn hit_test_segment(&self, from: Point, to: Point, tolerance: f64) -> Option<ElementId> {
        self.hit_test(to, tolerance).or_else(|| {
            if from == to {
                return None;
            }
            self.elements
                .iter()
                .rev()
                .filter(|e| e.is_visible())
                .find(|e| e.crossed_by(from, to, self.metrics()))
                .map(Element::id)
        })
    }

    /// Visible elements whose bounds intersect `rect`.
    pub fn elements_in_bounds(&self, rect: Rect) -> Vec<&Element> {
        let rect = rect.abs();
        self.visible_elements()
            .filter(|e| {
                let b = e.bounds(self.metrics());
                b.x0 <= rect.x1 && b.x1 >= rect.x0 && b.y0 <= rect.y1 && b.y1 >= rect.y0
            })
            .collect()
    }

    /// Ids of visible elements whose centroid lies in `rect`.
    pub fn ids_with_centroid_in(&self, rect: Rect) -> Vec<ElementId> {
        self.visible_elements()
            .filter(|e| point_in_rect(e.centroid(self.metrics()), rect))
            .map(Element::id)
            .collect()
    }

    /// Closest connector anchor within `radius` of a world point.
    pub fn anchors_near(&self, point: Point, radius: f64, exclude: Option<ElementId>) -> Option<Anchor> {
        nearest_anchor(&self.elements, point, radius, exclude)
    }

    /// Union of the bounds of the given elements; stale ids are skipped.
    pub fn group_bounds(&self, ids: &[ElementId]) -> Option<Rect> {
        ids.iter()
            .filter_map(|&id| self.bounds_of(id))
            .reduce(|acc, b| acc.union(b))
    }

    /// Union of the bounds of every visible element.
    pub fn content_bounds(&self) -> Option<Rect> {
        self.visible_elements()
            .map(|e| e.bounds(self.metrics()))
            .reduce(|acc, b| acc.union(b))
    }

    /// Elements for an export pass, in z-order.
    pub fn elements_for_export(&self, scope: ExportScope) -> Vec<&Element> {
        match scope {
            ExportScope::All => self.visible_elements().collect(),
            ExportScope::Selection => self
                .visible_elements()
                .filter(|e| self.selection.contains(&e.id()))
                .collect(),
            ExportScope::Within(rect) => self.elements_in_bounds(rect),
        }
    }

    // --- History ---

    pub fn history(&self) -> &History {
        &self.history
    }

    fn snapshot(&mut self) {
        self.history.push(&self.elements);
    }

    /// Record the current state as one undo step if it differs from the
    /// snapshot under the cursor.
    pub fn commit(&mut self) -> bool {
        if *self.history.current() == *self.elements {
            return false;
        }
        log::debug!("committing gesture ({} elements)", self.elements.len());
        self.snapshot();
        true
    }

    pub fn undo(&mut self) -> bool {
        match self.history.undo() {
            Some(snapshot) => {
                self.elements = snapshot.to_vec();
                self.prune_selection();
                log::debug!("undo -> step {}", self.history.cursor());
                true
            }
            None => false,
        }
    }

    pub fn redo(&mut self) -> bool {
        match self.history.redo() {
            Some(snapshot) => {
                self.elements = snapshot.to_vec();
                self.prune_selection();
                log::debug!("redo -> step {}", self.history.cursor());
                true
            }
            None => false,
        }
    }

    // --- Mutations ---

    /// Validate and append an element, recording a history step.
    pub fn add_element(&mut self, element: Element) -> Result<ElementId, SceneError> {
        element.validate()?;
        let id = element.id();
        if self.contains(id) {
            return Err(SceneError::DuplicateId(id));
        }
        log::debug!("adding {} {}", element.type_name(), id);
        self.elements.push(element);
        self.snapshot();
        Ok(id)
    }

    /// Merge a patch into one element without recording history.
    ///
    /// Returns `false` for stale ids and for patches that would make the
    /// element invalid.
    pub fn update_element(&mut self, id: ElementId, patch: &ElementPatch) -> bool {
        let Some(index) = self.index_of(id) else {
            return false;
        };
        let mut updated = self.elements[index].clone();
        updated.apply_patch(patch);
        if let Err(err) = updated.validate() {
            log::warn!("rejected update to {id}: {err}");
            return false;
        }
        self.elements[index] = updated;
        true
    }

    /// Merge several patches without recording history. Returns how many applied.
    pub fn bulk_update_elements<I>(&mut self, updates: I) -> usize
    where
        I: IntoIterator<Item = (ElementId, ElementPatch)>,
    {
        updates
            .into_iter()
            .filter(|(id, patch)| self.update_element(*id, patch))
            .count()
    }

    /// Move elements by a world delta without recording history.
    ///
    /// A connector that moves without the element it is bound to loses
    /// that binding.
    pub fn translate_elements(&mut self, ids: &[ElementId], delta: Vec2) {
        let moved: HashSet<ElementId> = ids.iter().copied().collect();
        let patches: Vec<_> = ids
            .iter()
            .filter_map(|&id| {
                let element = self.element(id)?;
                let mut patch = element.translation_patch(delta);
                if let Some(shape) = element.as_shape() {
                    let stays = |binding: Option<Binding>| binding.is_some_and(|b| !moved.contains(&b.element_id));
                    if stays(shape.bound_start) {
                        patch.bound_start = Some(None);
                    }
                    if stays(shape.bound_end) {
                        patch.bound_end = Some(None);
                    }
                }
                Some((id, patch))
            })
            .collect();
        self.bulk_update_elements(patches);
        self.follow_connectors(moved);
    }

    /// Re-attach connectors bound to any of `moved`.
    pub fn follow_connectors(&mut self, moved: HashSet<ElementId>) {
        if moved.is_empty() {
            return;
        }
        let updates = connector_updates(&self.elements, &moved);
        self.bulk_update_elements(updates);
    }

    pub fn delete_element(&mut self, id: ElementId) -> bool {
        self.delete_elements(&[id]) > 0
    }

    /// Remove several elements with a single history step.
    pub fn delete_elements(&mut self, ids: &[ElementId]) -> usize {
        let before = self.elements.len();
        self.elements.retain(|e| !ids.contains(&e.id()));
        let removed = before - self.elements.len();
        if removed > 0 {
            self.prune_selection();
            self.snapshot();
            log::debug!("deleted {removed} element(s)");
        }
        removed
    }

    /// Move elements to the front or back, keeping relative order on both sides.
    pub fn reorder(&mut self, ids: &[ElementId], order: ZOrder) -> bool {
        let before: Vec<ElementId> = self.elements.iter().map(Element::id).collect();
        let (moved, rest): (Vec<Element>, Vec<Element>) =
            std::mem::take(&mut self.elements).into_iter().partition(|e| ids.contains(&e.id()));
        self.elements = match order {
            ZOrder::ToFront => rest.into_iter().chain(moved).collect(),
            ZOrder::ToBack => moved.into_iter().chain(rest).collect(),
        };
        if self.elements.iter().map(Element::id).eq(before) {
            return false;
        }
        self.snapshot();
        true
    }

    /// Align the resolvable `ids` to an edge or center line of their group bounds.
    pub fn align(&mut self, ids: &[ElementId], alignment: Alignment) -> bool {
        let Some(group) = self.group_bounds(ids) else {
            return false;
        };
        let mut moves = Vec::new();
        for &id in ids {
            let Some(b) = self.bounds_of(id) else {
                continue;
            };
            let delta = match alignment {
                Alignment::Left => Vec2::new(group.x0 - b.x0, 0.0),
                Alignment::CenterHorizontal => Vec2::new(group.center().x - b.center().x, 0.0),
                Alignment::Right => Vec2::new(group.x1 - b.x1, 0.0),
                Alignment::Top => Vec2::new(0.0, group.y0 - b.y0),
                Alignment::CenterVertical => Vec2::new(0.0, group.center().y - b.center().y),
                Alignment::Bottom => Vec2::new(0.0, group.y1 - b.y1),
            };
            if delta != Vec2::ZERO {
                moves.push((id, delta));
            }
        }
        self.apply_moves(moves)
    }

    /// Space three or more elements evenly between the outermost two.
    pub fn distribute(&mut self, ids: &[ElementId], axis: Axis) -> bool {
        let mut items: Vec<(ElementId, Rect)> = ids
            .iter()
            .filter_map(|&id| self.bounds_of(id).map(|b| (id, b)))
            .collect();
        if items.len() < 3 {
            return false;
        }
        let (lead, size): (fn(&Rect) -> f64, fn(&Rect) -> f64) = match axis {
            Axis::Horizontal => (|r: &Rect| r.x0, |r: &Rect| r.width()),
            Axis::Vertical => (|r: &Rect| r.y0, |r: &Rect| r.height()),
        };
        items.sort_by(|a, b| lead(&a.1).total_cmp(&lead(&b.1)));
        let start = items.iter().map(|(_, r)| lead(r)).fold(f64::INFINITY, f64::min);
        let end = items.iter().map(|(_, r)| lead(r) + size(r)).fold(f64::NEG_INFINITY, f64::max);
        let total: f64 = items.iter().map(|(_, r)| size(r)).sum();
        let gap = (end - start - total) / (items.len() - 1) as f64;

        let mut cursor = start;
        let mut moves = Vec::new();
        for (id, rect) in &items {
            let shift = cursor - lead(rect);
            let delta = match axis {
                Axis::Horizontal => Vec2::new(shift, 0.0),
                Axis::Vertical => Vec2::new(0.0, shift),
            };
            if delta != Vec2::ZERO {
                moves.push((*id, delta));
            }
            cursor += size(rect) + gap;
        }
        self.apply_moves(moves)
    }

    fn apply_moves(&mut self, moves: Vec<(ElementId, Vec2)>) -> bool {
        if moves.is_empty() {
            return false;
        }
        let patches: Vec<_> = moves
            .iter()
            .filter_map(|&(id, delta)| self.element(id).map(|e| (id, e.translation_patch(delta))))
            .collect();
        self.bulk_update_elements(patches);
        self.follow_connectors(moves.iter().map(|(id, _)| *id).collect());
        self.snapshot();
        true
    }

    /// Remove everything and start a fresh history.
    pub fn clear(&mut self) {
        self.elements.clear();
        self.selection.clear();
        self.overlays.clear();
        self.history.reset();
        log::debug!("scene cleared");
    }

    /// Replace the element list wholesale (loading). History restarts at the loaded state.
    pub fn replace_elements(&mut self, elements: Vec<Element>) -> Result<(), SceneError> {
        let mut seen = HashSet::new();
        for element in &elements {
            element.validate()?;
            if !seen.insert(element.id()) {
                return Err(SceneError::DuplicateId(element.id()));
            }
        }
        self.elements = elements;
        self.selection.clear();
        self.history.reset_to(&self.elements);
        Ok(())
    }

    // --- Selection ---

    pub fn selection(&self) -> &[ElementId] {
        &self.selection
    }

    pub fn is_selected(&self, id: ElementId) -> bool {
        self.selection.contains(&id)
    }

    /// Replace the selection; unknown ids are dropped.
    pub fn set_selection(&mut self, ids: impl IntoIterator<Item = ElementId>) {
        self.selection.clear();
        self.extend_selection(ids);
    }

    /// Add ids to the selection, ignoring unknown and duplicate ids.
    pub fn extend_selection(&mut self, ids: impl IntoIterator<Item = ElementId>) {
        for id in ids {
            if self.contains(id) && !self.selection.contains(&id) {
                self.selection.push(id);
            }
        }
    }

    /// Add or remove one id.
    pub fn toggle_selection(&mut self, id: ElementId) {
        if let Some(pos) = self.selection.iter().position(|&s| s == id) {
            self.selection.remove(pos);
        } else if self.contains(id) {
            self.selection.push(id);
        }
    }

    pub fn clear_selection(&mut self) {
        self.selection.clear();
    }

    pub fn select_all(&mut self) {
        self.selection = self.visible_elements().map(Element::id).collect();
    }

    /// The selected element when exactly one is selected.
    pub fn single_selected(&self) -> Option<&Element> {
        match self.selection.as_slice() {
            [id] => self.element(*id),
            _ => None,
        }
    }

    fn prune_selection(&mut self) {
        let live: HashSet<ElementId> = self.elements.iter().map(Element::id).collect();
        self.selection.retain(|id| live.contains(id));
    }

    // --- Overlays ---

    pub fn overlays(&self) -> &Overlays {
        &self.overlays
    }

    pub fn overlays_mut(&mut self) -> &mut Overlays {
        &mut self.overlays
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::SerializableColor;
    use crate::connector::{AnchorSide, Binding};
    use crate::elements::{Shape, ShapeKind, Stroke, StrokePoint, Text};

    fn rect(x: f64, y: f64, w: f64, h: f64) -> Element {
        Shape::new(ShapeKind::Rectangle, x, y, w, h, SerializableColor::black(), 2.0).into()
    }

    #[test]
    fn test_add_pushes_history() {
        let mut scene = Scene::new();
        scene.add_element(rect(0.0, 0.0, 10.0, 10.0)).unwrap();
        assert_eq!(scene.history().len(), 2);
        assert_eq!(scene.history().cursor(), 1);
    }

    #[test]
    fn test_add_rejects_invalid_and_duplicates() {
        let mut scene = Scene::new();
        let empty = Stroke::new(Vec::new(), SerializableColor::black(), 3.0, 1.0);
        assert_eq!(
            scene.add_element(empty.into()),
            Err(SceneError::Invalid(InvalidElement::EmptyStroke))
        );
        let r = rect(0.0, 0.0, 10.0, 10.0);
        scene.add_element(r.clone()).unwrap();
        assert_eq!(scene.add_element(r.clone()), Err(SceneError::DuplicateId(r.id())));
        assert_eq!(scene.len(), 1);
    }

    #[test]
    fn test_undo_redo_round_trip() {
        let mut scene = Scene::new();
        let a = scene.add_element(rect(0.0, 0.0, 10.0, 10.0)).unwrap();
        let b = scene.add_element(rect(20.0, 0.0, 10.0, 10.0)).unwrap();
        scene.delete_element(a);
        let after: Vec<Element> = scene.elements().to_vec();

        assert!(scene.undo());
        assert!(scene.undo());
        assert!(scene.undo());
        assert!(scene.is_empty());
        assert!(!scene.undo());

        assert!(scene.redo());
        assert!(scene.redo());
        assert!(scene.redo());
        assert_eq!(scene.elements(), after.as_slice());
        assert_eq!(scene.elements()[0].id(), b);
        assert!(!scene.redo());
    }

    #[test]
    fn test_update_does_not_snapshot() {
        let mut scene = Scene::new();
        let id = scene.add_element(rect(0.0, 0.0, 10.0, 10.0)).unwrap();
        assert!(scene.update_element(id, &ElementPatch::position(5.0, 5.0)));
        assert_eq!(scene.history().len(), 2);
        assert!(!scene.update_element(uuid::Uuid::new_v4(), &ElementPatch::position(1.0, 1.0)));
    }

    #[test]
    fn test_update_rejects_non_finite() {
        let mut scene = Scene::new();
        let id = scene.add_element(rect(0.0, 0.0, 10.0, 10.0)).unwrap();
        assert!(!scene.update_element(id, &ElementPatch::position(f64::NAN, 0.0)));
        assert_eq!(scene.bounds_of(id), Some(Rect::new(0.0, 0.0, 10.0, 10.0)));
    }

    #[test]
    fn test_commit_only_when_changed() {
        let mut scene = Scene::new();
        let id = scene.add_element(rect(0.0, 0.0, 10.0, 10.0)).unwrap();
        assert!(!scene.commit());
        scene.update_element(id, &ElementPatch::position(30.0, 30.0));
        assert!(scene.commit());
        assert!(scene.undo());
        assert_eq!(scene.bounds_of(id), Some(Rect::new(0.0, 0.0, 10.0, 10.0)));
    }

    #[test]
    fn test_delete_prunes_selection() {
        let mut scene = Scene::new();
        let a = scene.add_element(rect(0.0, 0.0, 10.0, 10.0)).unwrap();
        let b = scene.add_element(rect(20.0, 0.0, 10.0, 10.0)).unwrap();
        scene.set_selection([a, b]);
        scene.delete_element(a);
        assert_eq!(scene.selection(), &[b]);
        assert!(!scene.delete_element(a));
    }

    #[test]
    fn test_reorder_stable_partition() {
        let mut scene = Scene::new();
        let ids: Vec<_> = (0..4)
            .map(|i| scene.add_element(rect(i as f64 * 20.0, 0.0, 10.0, 10.0)).unwrap())
            .collect();
        assert!(scene.reorder(&[ids[2], ids[0]], ZOrder::ToFront));
        let order: Vec<_> = scene.elements().iter().map(Element::id).collect();
        assert_eq!(order, vec![ids[1], ids[3], ids[0], ids[2]]);

        assert!(scene.reorder(&[ids[3]], ZOrder::ToBack));
        let order: Vec<_> = scene.elements().iter().map(Element::id).collect();
        assert_eq!(order, vec![ids[3], ids[1], ids[0], ids[2]]);

        // Stale ids and no-op moves change nothing
        assert!(!scene.reorder(&[uuid::Uuid::new_v4()], ZOrder::ToFront));
        assert!(!scene.reorder(&[ids[2]], ZOrder::ToFront));
    }

    #[test]
    fn test_align_left_and_center() {
        let mut scene = Scene::new();
        let a = scene.add_element(rect(10.0, 0.0, 20.0, 20.0)).unwrap();
        let b = scene.add_element(rect(50.0, 40.0, 40.0, 20.0)).unwrap();
        let stroke = Stroke::new(
            vec![StrokePoint::new(30.0, 80.0), StrokePoint::new(60.0, 90.0)],
            SerializableColor::black(),
            2.0,
            1.0,
        );
        let c = scene.add_element(stroke.into()).unwrap();
        let ids = [a, b, c];

        assert!(scene.align(&ids, Alignment::Left));
        for id in ids {
            assert!((scene.bounds_of(id).unwrap().x0 - 10.0).abs() < 1e-9);
        }
        // Strokes are translated, never resized
        assert!((scene.bounds_of(c).unwrap().width() - 30.0).abs() < 1e-9);

        assert!(scene.align(&ids, Alignment::CenterHorizontal));
        let center = scene.bounds_of(b).unwrap().center().x;
        for id in ids {
            assert!((scene.bounds_of(id).unwrap().center().x - center).abs() < 1e-9);
        }
    }

    #[test]
    fn test_align_text_uses_bounds() {
        let mut scene = Scene::new();
        let r = scene.add_element(rect(0.0, 100.0, 50.0, 50.0)).unwrap();
        let t = scene
            .add_element(Text::new(40.0, 20.0, "hi", 20.0, SerializableColor::black()).into())
            .unwrap();
        scene.align(&[r, t], Alignment::Top);
        assert!((scene.bounds_of(t).unwrap().y0 - 0.0).abs() < 1e-9);
        assert!((scene.bounds_of(r).unwrap().y0 - 0.0).abs() < 1e-9);
    }

    #[test]
    fn test_distribute_even_gaps() {
        let mut scene = Scene::new();
        let a = scene.add_element(rect(0.0, 0.0, 10.0, 10.0)).unwrap();
        let b = scene.add_element(rect(15.0, 0.0, 30.0, 10.0)).unwrap();
        let c = scene.add_element(rect(90.0, 0.0, 10.0, 10.0)).unwrap();
        assert!(scene.distribute(&[c, a, b], Axis::Horizontal));

        let ra = scene.bounds_of(a).unwrap();
        let rb = scene.bounds_of(b).unwrap();
        let rc = scene.bounds_of(c).unwrap();
        assert!((ra.x0 - 0.0).abs() < 1e-9);
        assert!((rc.x1 - 100.0).abs() < 1e-9);
        let gap1 = rb.x0 - ra.x1;
        let gap2 = rc.x0 - rb.x1;
        assert!((gap1 - gap2).abs() < 1e-9);
        assert!((gap1 - 25.0).abs() < 1e-9);
    }

    #[test]
    fn test_distribute_needs_three() {
        let mut scene = Scene::new();
        let a = scene.add_element(rect(0.0, 0.0, 10.0, 10.0)).unwrap();
        let b = scene.add_element(rect(50.0, 0.0, 10.0, 10.0)).unwrap();
        let before = scene.history().len();
        assert!(!scene.distribute(&[a, b, uuid::Uuid::new_v4()], Axis::Vertical));
        assert_eq!(scene.history().len(), before);
    }

    #[test]
    fn test_hit_test_prefers_topmost() {
        let mut scene = Scene::new();
        let _bottom = scene.add_element(rect(0.0, 0.0, 100.0, 100.0)).unwrap();
        let top = scene.add_element(rect(25.0, 25.0, 50.0, 50.0)).unwrap();
        assert_eq!(scene.hit_test(Point::new(50.0, 50.0), 0.0), Some(top));
        assert_eq!(scene.hit_test(Point::new(500.0, 50.0), 0.0), None);
    }

    #[test]
    fn test_hidden_elements_skipped() {
        let mut scene = Scene::new();
        let id = scene.add_element(rect(0.0, 0.0, 100.0, 100.0)).unwrap();
        scene.update_element(id, &ElementPatch::visibility(false));
        assert_eq!(scene.hit_test(Point::new(50.0, 50.0), 0.0), None);
        assert!(scene.elements_for_export(ExportScope::All).is_empty());
        assert!(scene.content_bounds().is_none());
    }

    #[test]
    fn test_export_scopes() {
        let mut scene = Scene::new();
        let a = scene.add_element(rect(0.0, 0.0, 10.0, 10.0)).unwrap();
        let _b = scene.add_element(rect(100.0, 100.0, 10.0, 10.0)).unwrap();
        scene.set_selection([a]);
        assert_eq!(scene.elements_for_export(ExportScope::Selection).len(), 1);
        assert_eq!(
            scene.elements_for_export(ExportScope::Within(Rect::new(90.0, 90.0, 200.0, 200.0))).len(),
            1
        );
        assert_eq!(scene.elements_for_export(ExportScope::All).len(), 2);
    }

    #[test]
    fn test_translate_follows_connectors() {
        let mut scene = Scene::new();
        let r = scene.add_element(rect(0.0, 0.0, 100.0, 100.0)).unwrap();
        let mut arrow = Shape::new(ShapeKind::Arrow, 100.0, 50.0, 100.0, 0.0, SerializableColor::black(), 2.0);
        arrow.bound_start = Some(Binding::new(r, AnchorSide::Right));
        let arrow_id = scene.add_element(arrow.into()).unwrap();

        scene.translate_elements(&[r], Vec2::new(50.0, 50.0));
        let shape = scene.element(arrow_id).and_then(Element::as_shape).unwrap();
        assert_eq!(shape.start(), Point::new(150.0, 100.0));
        assert_eq!(shape.end(), Point::new(200.0, 50.0));
    }

    #[test]
    fn test_translate_unbinds_connector_left_behind() {
        let mut scene = Scene::new();
        let a = scene.add_element(rect(0.0, 0.0, 100.0, 100.0)).unwrap();
        let b = scene.add_element(rect(300.0, 0.0, 100.0, 100.0)).unwrap();
        let mut arrow = Shape::new(ShapeKind::Arrow, 100.0, 50.0, 200.0, 0.0, SerializableColor::black(), 2.0);
        arrow.bound_start = Some(Binding::new(a, AnchorSide::Right));
        arrow.bound_end = Some(Binding::new(b, AnchorSide::Left));
        let arrow_id = scene.add_element(arrow.into()).unwrap();

        scene.translate_elements(&[arrow_id, a], Vec2::new(0.0, 10.0));
        let shape = scene.element(arrow_id).and_then(Element::as_shape).unwrap();
        assert_eq!(shape.bound_start.map(|b| b.element_id), Some(a));
        assert_eq!(shape.bound_end, None);

        scene.translate_elements(&[b], Vec2::new(0.0, 50.0));
        let shape = scene.element(arrow_id).and_then(Element::as_shape).unwrap();
        assert_eq!(shape.end(), Point::new(300.0, 60.0));
    }

    #[test]
    fn test_clear_resets_history() {
        let mut scene = Scene::new();
        scene.add_element(rect(0.0, 0.0, 10.0, 10.0)).unwrap();
        scene.overlays_mut().ruler = Some(crate::overlay::Ruler::centered_at(Point::ZERO));
        scene.clear();
        assert!(scene.is_empty());
        assert_eq!(scene.history().len(), 1);
        assert!(scene.overlays().ruler.is_none());
    }

    #[test]
    fn test_undo_prunes_selection() {
        let mut scene = Scene::new();
        let id = scene.add_element(rect(0.0, 0.0, 10.0, 10.0)).unwrap();
        scene.set_selection([id]);
        scene.undo();
        assert!(scene.selection().is_empty());
    }
}
