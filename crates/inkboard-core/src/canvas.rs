//! The top-level whiteboard controller.

use crate::background::Background;
use crate::config::EngineConfig;
use crate::document::{DocumentError, SceneFile};
use crate::elements::{Element, ElementId, ElementPatch, TextMetrics};
use crate::interaction::InteractionState;
use crate::overlay::Overlays;
use crate::scene::{Alignment, Axis, ExportScope, Scene, SceneError, ZOrder};
use crate::tools::{ToolKind, ToolProperties, ToolProperty};
use crate::viewport::Viewport;
use kurbo::{Point, Size};
use std::sync::Arc;

/// A whiteboard: the scene, how it is viewed and the active tool.
///
/// All mutation goes through `&mut self`; hosts that share a canvas across
/// threads wrap it in a lock.
#[derive(Debug)]
pub struct Canvas {
    pub(crate) scene: Scene,
    pub(crate) viewport: Viewport,
    pub(crate) background: Background,
    pub(crate) tool: ToolKind,
    pub(crate) properties: ToolProperties,
    pub(crate) config: EngineConfig,
    pub(crate) state: InteractionState,
    pub(crate) aspect_lock: bool,
    /// Size of the host surface, used to centre keyboard zoom.
    screen_size: Size,
}

impl Default for Canvas {
    fn default() -> Self {
        Self::new(EngineConfig::default())
    }
}

impl Canvas {
    pub fn new(config: EngineConfig) -> Self {
        Self {
            scene: Scene::new().with_history_limit(config.history_limit),
            viewport: Viewport::default(),
            background: Background::default(),
            tool: ToolKind::default(),
            properties: ToolProperties::default(),
            config,
            state: InteractionState::Idle,
            aspect_lock: false,
            screen_size: Size::new(800.0, 600.0),
        }
    }

    /// Use a host-provided text measurer for text bounds and hit tests.
    pub fn with_text_metrics(mut self, metrics: Arc<dyn TextMetrics + Send + Sync>) -> Self {
        self.scene = self.scene.with_text_metrics(metrics);
        self
    }

    pub fn set_screen_size(&mut self, width: f64, height: f64) {
        self.screen_size = Size::new(width, height);
    }

    pub fn screen_size(&self) -> Size {
        self.screen_size
    }

    // --- Read access ---

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn scene_mut(&mut self) -> &mut Scene {
        &mut self.scene
    }

    pub fn elements(&self) -> &[Element] {
        self.scene.elements()
    }

    pub fn selection(&self) -> &[ElementId] {
        self.scene.selection()
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn active_tool(&self) -> ToolKind {
        self.tool
    }

    pub fn tool_properties(&self) -> &ToolProperties {
        &self.properties
    }

    pub fn background(&self) -> &Background {
        &self.background
    }

    pub fn overlays(&self) -> &Overlays {
        self.scene.overlays()
    }

    /// The live gesture, for drawing previews.
    pub fn interaction(&self) -> &InteractionState {
        &self.state
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn aspect_lock(&self) -> bool {
        self.aspect_lock
    }

    // --- Tools ---

    /// Switch tools. Any live gesture is cancelled first.
    pub fn set_active_tool(&mut self, tool: ToolKind) {
        if tool == self.tool {
            return;
        }
        self.cancel_interaction();
        log::debug!("tool {} -> {}", self.tool.name(), tool.name());
        self.tool = tool;
    }

    pub fn update_tool_property(&mut self, property: ToolProperty) -> bool {
        self.properties.apply(property)
    }

    /// Lock the aspect ratio of corner resizes regardless of shift.
    pub fn set_aspect_lock(&mut self, locked: bool) {
        self.aspect_lock = locked;
    }

    // --- Scene mutations ---

    pub fn add_element(&mut self, element: Element) -> Result<ElementId, SceneError> {
        self.scene.add_element(element)
    }

    pub fn update_element(&mut self, id: ElementId, patch: &ElementPatch) -> bool {
        self.scene.update_element(id, patch)
    }

    pub fn bulk_update_elements<I>(&mut self, updates: I) -> usize
    where
        I: IntoIterator<Item = (ElementId, ElementPatch)>,
    {
        self.scene.bulk_update_elements(updates)
    }

    pub fn delete_element(&mut self, id: ElementId) -> bool {
        self.scene.delete_element(id)
    }

    pub fn delete_selected(&mut self) -> usize {
        let ids = self.scene.selection().to_vec();
        self.scene.delete_elements(&ids)
    }

    pub fn select_all(&mut self) {
        self.scene.select_all();
    }

    pub fn undo(&mut self) -> bool {
        self.cancel_interaction();
        self.scene.undo()
    }

    pub fn redo(&mut self) -> bool {
        self.cancel_interaction();
        self.scene.redo()
    }

    /// Remove every element and overlay and restart history.
    pub fn clear_scene(&mut self) {
        self.state = InteractionState::Idle;
        self.scene.clear();
    }

    /// Align the current selection.
    pub fn align(&mut self, alignment: Alignment) -> bool {
        let ids = self.scene.selection().to_vec();
        self.scene.align(&ids, alignment)
    }

    /// Distribute the current selection.
    pub fn distribute(&mut self, axis: Axis) -> bool {
        let ids = self.scene.selection().to_vec();
        self.scene.distribute(&ids, axis)
    }

    /// Move the current selection to the front or back.
    pub fn reorder(&mut self, order: ZOrder) -> bool {
        let ids = self.scene.selection().to_vec();
        self.scene.reorder(&ids, order)
    }

    pub fn set_background(&mut self, background: Background) {
        self.background = background;
    }

    // --- Viewport ---

    /// Replace the viewport. Non-finite values are rejected and the current
    /// viewport is kept.
    pub fn set_viewport(&mut self, viewport: Viewport) -> bool {
        match Viewport::new(viewport.x, viewport.y, viewport.scale) {
            Some(valid) => {
                self.viewport = valid;
                true
            }
            None => {
                log::warn!("rejected viewport {viewport:?}");
                false
            }
        }
    }

    fn screen_center(&self) -> Point {
        Point::new(self.screen_size.width / 2.0, self.screen_size.height / 2.0)
    }

    pub fn zoom_in(&mut self) -> bool {
        let center = self.screen_center();
        self.viewport.zoom_by(center, self.config.zoom_step)
    }

    pub fn zoom_out(&mut self) -> bool {
        let center = self.screen_center();
        self.viewport.zoom_by(center, 1.0 / self.config.zoom_step)
    }

    pub fn reset_zoom(&mut self) {
        self.viewport.reset();
    }

    // --- Persistence ---

    /// Replace elements, background and viewport with a document's contents.
    ///
    /// The document is validated before anything changes.
    pub fn load(&mut self, file: SceneFile) -> Result<(), DocumentError> {
        file.validate()?;
        let viewport = Viewport::new(file.viewport.x, file.viewport.y, file.viewport.scale).unwrap_or_default();
        self.state = InteractionState::Idle;
        self.scene.replace_elements(file.elements)?;
        self.background = file.background;
        self.viewport = viewport;
        log::debug!("loaded {} elements", self.scene.len());
        Ok(())
    }

    /// The current `{elements, background, viewport}` triple.
    pub fn snapshot(&self) -> SceneFile {
        SceneFile::new(self.scene.elements().to_vec(), self.background, self.viewport)
    }

    /// Elements to hand to an exporter, in z-order.
    pub fn export_elements(&self, scope: ExportScope) -> Vec<&Element> {
        self.scene.elements_for_export(scope)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::SerializableColor;
    use crate::elements::{Shape, ShapeKind};
    use kurbo::Rect;

    fn rect(x: f64, y: f64, w: f64, h: f64) -> Element {
        Shape::new(ShapeKind::Rectangle, x, y, w, h, SerializableColor::black(), 2.0).into()
    }

    #[test]
    fn test_snapshot_load_round_trip() {
        let mut canvas = Canvas::default();
        canvas.add_element(rect(0.0, 0.0, 10.0, 10.0)).unwrap();
        canvas.set_viewport(Viewport::new(5.0, 6.0, 2.0).unwrap());
        let file = canvas.snapshot();

        let mut other = Canvas::default();
        other.load(file.clone()).unwrap();
        assert_eq!(other.snapshot(), file);
        assert!(!other.scene().history().can_undo());
    }

    #[test]
    fn test_load_rejects_invalid_without_changes() {
        let mut canvas = Canvas::default();
        canvas.add_element(rect(0.0, 0.0, 10.0, 10.0)).unwrap();
        let mut file = SceneFile::default();
        file.version = "9.0".to_string();
        assert!(canvas.load(file).is_err());
        assert_eq!(canvas.elements().len(), 1);
    }

    #[test]
    fn test_set_viewport_rejects_non_finite() {
        let mut canvas = Canvas::default();
        let bad = Viewport {
            x: f64::NAN,
            y: 0.0,
            scale: 1.0,
        };
        assert!(!canvas.set_viewport(bad));
        assert_eq!(*canvas.viewport(), Viewport::default());
    }

    #[test]
    fn test_zoom_in_out_about_center() {
        let mut canvas = Canvas::default();
        canvas.set_screen_size(200.0, 100.0);
        let center = Point::new(100.0, 50.0);
        let world = canvas.viewport().to_world(center);
        assert!(canvas.zoom_in());
        assert!((canvas.viewport().scale - 1.1).abs() < 1e-9);
        assert!((canvas.viewport().to_world(center) - world).hypot() < 1e-9);
        assert!(canvas.zoom_out());
        assert!((canvas.viewport().scale - 1.0).abs() < 1e-9);
        canvas.reset_zoom();
        assert_eq!(*canvas.viewport(), Viewport::default());
    }

    #[test]
    fn test_selection_commands() {
        let mut canvas = Canvas::default();
        let a = canvas.add_element(rect(0.0, 0.0, 10.0, 10.0)).unwrap();
        let b = canvas.add_element(rect(50.0, 20.0, 10.0, 30.0)).unwrap();
        canvas.select_all();
        assert!(canvas.align(Alignment::Top));
        assert!((canvas.scene().bounds_of(b).unwrap().y0).abs() < f64::EPSILON);

        assert!(!canvas.reorder(ZOrder::ToBack));
        canvas.scene_mut().set_selection([b]);
        assert!(canvas.reorder(ZOrder::ToBack));
        assert_eq!(canvas.elements()[0].id(), b);

        assert_eq!(canvas.delete_selected(), 1);
        assert_eq!(canvas.elements().len(), 1);
        assert_eq!(canvas.elements()[0].id(), a);
    }

    #[test]
    fn test_export_scope() {
        let mut canvas = Canvas::default();
        let a = canvas.add_element(rect(0.0, 0.0, 10.0, 10.0)).unwrap();
        canvas.add_element(rect(100.0, 100.0, 10.0, 10.0)).unwrap();
        let within = canvas.export_elements(ExportScope::Within(Rect::new(-5.0, -5.0, 20.0, 20.0)));
        assert_eq!(within.len(), 1);
        assert_eq!(within[0].id(), a);
        assert_eq!(canvas.export_elements(ExportScope::All).len(), 2);
    }

    #[test]
    fn test_clear_scene() {
        let mut canvas = Canvas::default();
        canvas.add_element(rect(0.0, 0.0, 10.0, 10.0)).unwrap();
        canvas.clear_scene();
        assert!(canvas.elements().is_empty());
        assert!(!canvas.undo());
    }
}
