//! Pointer interaction state machine.
//!
//! One gesture is active at a time. A gesture starts on pointer-down, is
//! advanced by every pointer-move and ends on pointer-up or pointer-leave,
//! which always return the machine to [`InteractionState::Idle`].

use crate::canvas::Canvas;
use crate::config::EmptyCanvasDrag;
use crate::elements::{DEFAULT_PRESSURE, Element, ElementId, ElementPatch, Shape, Stroke, StrokePoint};
use crate::input::{Modifiers, MouseButton, PointerEvent};
use crate::overlay::{Protractor, Ruler};
use crate::selection::{HandleKind, hit_test_handles, pin_rotated_resize, resize_rect, rotation_from_pointer};
use crate::tools::ToolKind;
use kurbo::{Affine, Point, Rect, Vec2};
use std::collections::HashSet;

/// The active gesture.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum InteractionState {
    #[default]
    Idle,
    /// Capturing a pen stroke. Points are in world coordinates.
    Drawing { points: Vec<StrokePoint> },
    /// Dragging out a new shape; `preview` is not yet in the scene.
    DrawingShape { preview: Shape },
    /// Erasing along the pointer path; `last` is the previous world sample.
    Erasing { last: Point },
    /// Panning by screen-space pointer deltas.
    Panning { last_screen: Point },
    /// Rubber-band selection between two world points.
    SelectingBox { origin: Point, current: Point, additive: bool },
    /// Moving the selection.
    DraggingElement { last: Point, moved: bool },
    Resizing {
        id: ElementId,
        handle: HandleKind,
        /// Unrotated bounds at gesture start.
        original: Rect,
        /// Element rotation in degrees at gesture start.
        rotation: f64,
        keep_aspect: bool,
    },
    RotatingDrag { id: ElementId, center: Point },
    PlacingRuler { last: Point },
    PlacingProtractor { last: Point },
}

impl InteractionState {
    pub fn is_idle(&self) -> bool {
        matches!(self, InteractionState::Idle)
    }

    pub fn name(&self) -> &'static str {
        match self {
            InteractionState::Idle => "idle",
            InteractionState::Drawing { .. } => "drawing",
            InteractionState::DrawingShape { .. } => "drawing-shape",
            InteractionState::Erasing { .. } => "erasing",
            InteractionState::Panning { .. } => "panning",
            InteractionState::SelectingBox { .. } => "selecting-box",
            InteractionState::DraggingElement { .. } => "dragging",
            InteractionState::Resizing { .. } => "resizing",
            InteractionState::RotatingDrag { .. } => "rotating",
            InteractionState::PlacingRuler { .. } => "placing-ruler",
            InteractionState::PlacingProtractor { .. } => "placing-protractor",
        }
    }

    /// The marquee rectangle while box-selecting.
    pub fn marquee(&self) -> Option<Rect> {
        match self {
            InteractionState::SelectingBox { origin, current, .. } => Some(Rect::from_points(*origin, *current)),
            _ => None,
        }
    }

    /// Points of the stroke being captured.
    pub fn stroke_preview(&self) -> Option<&[StrokePoint]> {
        match self {
            InteractionState::Drawing { points } => Some(points),
            _ => None,
        }
    }

    /// The shape being dragged out.
    pub fn shape_preview(&self) -> Option<&Shape> {
        match self {
            InteractionState::DrawingShape { preview } => Some(preview),
            _ => None,
        }
    }
}

/// What the host should repaint after an event.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum Redraw {
    /// Nothing visible changed.
    #[default]
    None,
    /// Only the newest segment of the stroke being captured (world coordinates).
    Segment { from: StrokePoint, to: StrokePoint },
    /// Rebuild the whole frame.
    Full,
}

impl Canvas {
    /// Feed one pointer event through the state machine.
    pub fn handle_pointer(&mut self, event: &PointerEvent) -> Redraw {
        log::trace!("{event:?} in {}", self.state.name());
        match *event {
            PointerEvent::Down {
                position,
                button,
                pressure,
                modifiers,
            } => self.pointer_down(position, button, pressure, modifiers),
            PointerEvent::Move {
                position,
                pressure,
                modifiers,
            } => self.pointer_move(position, pressure, modifiers),
            PointerEvent::Up { position, .. } | PointerEvent::Leave { position } => self.pointer_up(position),
            PointerEvent::Wheel {
                position,
                delta,
                modifiers,
            } => self.wheel(position, delta, modifiers),
        }
    }

    /// Start a gesture at a screen position.
    pub fn pointer_down(
        &mut self,
        screen: Point,
        button: MouseButton,
        pressure: Option<f64>,
        modifiers: Modifiers,
    ) -> Redraw {
        // A stray down while a gesture is live ends that gesture first.
        let mut redraw = Redraw::None;
        if !self.state.is_idle() {
            redraw = self.pointer_up(screen);
        }

        match button {
            MouseButton::Middle => {
                self.state = InteractionState::Panning { last_screen: screen };
                return redraw;
            }
            MouseButton::Right => return redraw,
            MouseButton::Left => {}
        }

        let world = self.viewport.to_world(screen);
        let started = match self.tool {
            ToolKind::Select => self.select_down(screen, world, modifiers),
            ToolKind::Pan => {
                self.state = InteractionState::Panning { last_screen: screen };
                Redraw::None
            }
            ToolKind::Pen => {
                let p = self.snap_to_ruler(world);
                let first = StrokePoint::with_pressure(p.x, p.y, pressure.unwrap_or(DEFAULT_PRESSURE));
                self.state = InteractionState::Drawing { points: vec![first] };
                Redraw::Segment { from: first, to: first }
            }
            ToolKind::Eraser => {
                self.state = InteractionState::Erasing { last: world };
                self.erase_along(world, world)
            }
            ToolKind::Rectangle | ToolKind::Circle | ToolKind::Line | ToolKind::Arrow => self.shape_down(world),
            ToolKind::Ruler => {
                let overlays = self.scene.overlays_mut();
                if !overlays.ruler.is_some_and(|r| r.contains(world)) {
                    overlays.ruler = Some(Ruler::centered_at(world));
                }
                self.state = InteractionState::PlacingRuler { last: world };
                Redraw::Full
            }
            ToolKind::Protractor => {
                let overlays = self.scene.overlays_mut();
                if !overlays.protractor.is_some_and(|p| p.contains(world)) {
                    overlays.protractor = Some(Protractor::centered_at(world));
                }
                self.state = InteractionState::PlacingProtractor { last: world };
                Redraw::Full
            }
        };
        merge(redraw, started)
    }

    fn select_down(&mut self, screen: Point, world: Point, modifiers: Modifiers) -> Redraw {
        let scale = self.viewport.scale;

        if let Some(element) = self.scene.single_selected() {
            let handle = hit_test_handles(
                element,
                self.scene.metrics(),
                self.config.rotate_handle_offset / scale,
                world,
                self.config.handle_tolerance / scale,
            );
            let bounds = element.bounds(self.scene.metrics());
            let id = element.id();
            match handle {
                Some(HandleKind::Rotate) => {
                    self.state = InteractionState::RotatingDrag {
                        id,
                        center: bounds.center(),
                    };
                    return Redraw::None;
                }
                Some(handle) => {
                    self.state = InteractionState::Resizing {
                        id,
                        handle,
                        original: bounds,
                        rotation: element.rotation(),
                        keep_aspect: self.aspect_lock || modifiers.shift,
                    };
                    return Redraw::None;
                }
                None => {}
            }
        }

        match self.scene.hit_test(world, self.config.hit_tolerance / scale) {
            Some(id) if modifiers.shift => {
                self.scene.toggle_selection(id);
                Redraw::Full
            }
            Some(id) => {
                if !self.scene.is_selected(id) {
                    self.scene.set_selection([id]);
                }
                self.state = InteractionState::DraggingElement {
                    last: world,
                    moved: false,
                };
                Redraw::Full
            }
            None => match self.config.empty_canvas_drag {
                EmptyCanvasDrag::Marquee => {
                    let had_selection = !self.scene.selection().is_empty();
                    if !modifiers.shift {
                        self.scene.clear_selection();
                    }
                    self.state = InteractionState::SelectingBox {
                        origin: world,
                        current: world,
                        additive: modifiers.shift,
                    };
                    if had_selection { Redraw::Full } else { Redraw::None }
                }
                EmptyCanvasDrag::Pan => {
                    self.state = InteractionState::Panning { last_screen: screen };
                    Redraw::None
                }
            },
        }
    }

    fn shape_down(&mut self, world: Point) -> Redraw {
        let Some(kind) = self.tool.shape_kind() else {
            return Redraw::None;
        };
        let props = &self.properties;
        let mut preview = Shape::from_drag(kind, world, world, props.color, props.thickness);
        preview.opacity = props.opacity;
        if kind.is_connector() {
            if let Some(anchor) = self.scene.anchors_near(world, self.anchor_radius(), None) {
                preview.set_endpoints(anchor.position, anchor.position);
                preview.bound_start = Some(anchor.binding());
            }
        } else if let Some(fill) = props.fill_color {
            preview.fill_color = Some(fill);
            preview.fill_opacity = Some(props.fill_opacity);
        }
        self.state = InteractionState::DrawingShape { preview };
        Redraw::Full
    }

    /// Advance the active gesture.
    pub fn pointer_move(&mut self, screen: Point, pressure: Option<f64>, modifiers: Modifiers) -> Redraw {
        let world = self.viewport.to_world(screen);
        match std::mem::take(&mut self.state) {
            InteractionState::Idle => Redraw::None,
            InteractionState::Drawing { mut points } => {
                let p = self.snap_to_ruler(world);
                let next = StrokePoint::with_pressure(p.x, p.y, pressure.unwrap_or(DEFAULT_PRESSURE));
                let from = points.last().copied().unwrap_or(next);
                points.push(next);
                self.state = InteractionState::Drawing { points };
                Redraw::Segment { from, to: next }
            }
            InteractionState::DrawingShape { mut preview } => {
                self.extend_preview(&mut preview, world);
                self.state = InteractionState::DrawingShape { preview };
                Redraw::Full
            }
            InteractionState::Erasing { last } => {
                self.state = InteractionState::Erasing { last: world };
                self.erase_along(last, world)
            }
            InteractionState::Panning { last_screen } => {
                self.viewport.pan(screen - last_screen);
                self.state = InteractionState::Panning { last_screen: screen };
                Redraw::Full
            }
            InteractionState::SelectingBox { origin, additive, .. } => {
                self.state = InteractionState::SelectingBox {
                    origin,
                    current: world,
                    additive,
                };
                Redraw::Full
            }
            InteractionState::DraggingElement { last, moved } => {
                let delta = world - last;
                let ids = self.scene.selection().to_vec();
                if delta != Vec2::ZERO && !ids.is_empty() {
                    self.scene.translate_elements(&ids, delta);
                }
                self.state = InteractionState::DraggingElement {
                    last: world,
                    moved: moved || delta != Vec2::ZERO,
                };
                Redraw::Full
            }
            InteractionState::Resizing {
                id,
                handle,
                original,
                rotation,
                keep_aspect,
            } => {
                let local = if rotation == 0.0 {
                    world
                } else {
                    Affine::rotate_about(-rotation.to_radians(), original.center()) * world
                };
                let rect = resize_rect(original, handle, local, keep_aspect || modifiers.shift, self.config.min_resize);
                let rect = pin_rotated_resize(original, rect, handle, rotation);
                if self.scene.update_element(id, &ElementPatch::rect(rect)) {
                    self.scene.follow_connectors(HashSet::from([id]));
                }
                self.state = InteractionState::Resizing {
                    id,
                    handle,
                    original,
                    rotation,
                    keep_aspect,
                };
                Redraw::Full
            }
            InteractionState::RotatingDrag { id, center } => {
                let degrees = rotation_from_pointer(center, world);
                self.scene.update_element(id, &ElementPatch::rotation(degrees));
                self.state = InteractionState::RotatingDrag { id, center };
                Redraw::Full
            }
            InteractionState::PlacingRuler { last } => {
                if let Some(ruler) = self.scene.overlays_mut().ruler.as_mut() {
                    ruler.translate(world - last);
                }
                self.state = InteractionState::PlacingRuler { last: world };
                Redraw::Full
            }
            InteractionState::PlacingProtractor { last } => {
                if let Some(protractor) = self.scene.overlays_mut().protractor.as_mut() {
                    protractor.translate(world - last);
                }
                self.state = InteractionState::PlacingProtractor { last: world };
                Redraw::Full
            }
        }
    }

    /// End the active gesture and return to idle.
    pub fn pointer_up(&mut self, screen: Point) -> Redraw {
        let world = self.viewport.to_world(screen);
        match std::mem::take(&mut self.state) {
            InteractionState::Idle => Redraw::None,
            InteractionState::Drawing { points } => {
                if points.is_empty() {
                    return Redraw::Full;
                }
                let props = &self.properties;
                let stroke = Stroke::new(points, props.color, props.thickness, props.opacity);
                match self.scene.add_element(Element::Stroke(stroke)) {
                    Ok(id) => log::debug!("committed stroke {id}"),
                    Err(err) => log::debug!("discarded stroke: {err}"),
                }
                Redraw::Full
            }
            InteractionState::DrawingShape { mut preview } => {
                self.extend_preview(&mut preview, world);
                let min = self.config.min_shape_drag;
                if preview.width.abs() > min || preview.height.abs() > min {
                    match self.scene.add_element(Element::Shape(preview)) {
                        Ok(id) => log::debug!("committed shape {id}"),
                        Err(err) => log::debug!("discarded shape: {err}"),
                    }
                } else {
                    log::debug!("discarded {:?} below minimum drag", preview.kind);
                }
                Redraw::Full
            }
            InteractionState::SelectingBox { origin, additive, .. } => {
                let ids = self.scene.ids_with_centroid_in(Rect::from_points(origin, world));
                if additive {
                    self.scene.extend_selection(ids);
                } else {
                    self.scene.set_selection(ids);
                }
                Redraw::Full
            }
            InteractionState::DraggingElement { moved, .. } => {
                if moved {
                    self.scene.commit();
                }
                Redraw::Full
            }
            InteractionState::Resizing { .. } | InteractionState::RotatingDrag { .. } => {
                self.scene.commit();
                Redraw::Full
            }
            InteractionState::Erasing { .. }
            | InteractionState::Panning { .. }
            | InteractionState::PlacingRuler { .. }
            | InteractionState::PlacingProtractor { .. } => Redraw::None,
        }
    }

    /// Ctrl/Cmd + wheel zooms at the pointer; a plain wheel pans.
    pub fn wheel(&mut self, screen: Point, delta: Vec2, modifiers: Modifiers) -> Redraw {
        if modifiers.command() {
            if self.viewport.zoom_at(screen, -delta.y * self.config.wheel_zoom_speed) {
                return Redraw::Full;
            }
            return Redraw::None;
        }
        let before = self.viewport;
        self.viewport.pan(-delta);
        if self.viewport == before { Redraw::None } else { Redraw::Full }
    }

    /// Abandon the active gesture. Drags already applied are kept as one
    /// history step; in-progress strokes and shapes are dropped.
    pub fn cancel_interaction(&mut self) {
        match std::mem::take(&mut self.state) {
            InteractionState::DraggingElement { moved: true, .. }
            | InteractionState::Resizing { .. }
            | InteractionState::RotatingDrag { .. } => {
                self.scene.commit();
            }
            _ => {}
        }
    }

    /// Move the free end of a shape preview, snapping connectors to anchors.
    fn extend_preview(&self, preview: &mut Shape, world: Point) {
        let mut end = world;
        if preview.kind.is_connector() {
            preview.bound_end = None;
            if let Some(anchor) = self.scene.anchors_near(world, self.anchor_radius(), None) {
                end = anchor.position;
                preview.bound_end = Some(anchor.binding());
            }
        }
        preview.set_endpoints(preview.start(), end);
    }

    /// Delete the topmost element under `to`, or the topmost one the pointer
    /// swept across since `from`.
    fn erase_along(&mut self, from: Point, to: Point) -> Redraw {
        let tolerance = self.config.hit_tolerance / self.viewport.scale;
        match self.scene.hit_test_segment(from, to, tolerance) {
            Some(id) => {
                self.scene.delete_element(id);
                Redraw::Full
            }
            None => Redraw::None,
        }
    }

    fn snap_to_ruler(&self, world: Point) -> Point {
        match self.scene.overlays().ruler {
            Some(ruler) => ruler.snap(world, self.config.ruler_snap_threshold),
            None => world,
        }
    }

    fn anchor_radius(&self) -> f64 {
        self.config.anchor_snap_radius / self.viewport.scale
    }
}

/// The stronger of two redraw requests.
fn merge(a: Redraw, b: Redraw) -> Redraw {
    match (a, b) {
        (Redraw::Full, _) | (_, Redraw::Full) => Redraw::Full,
        (Redraw::None, other) => other,
        (other, Redraw::None) => other,
        (_, segment) => segment,
    }
}
