//! Headless editing session: a canvas, its image cache and the last frame.

use crate::error::{AppError, AppResult};
use crate::script::{Script, ScriptStep};
use crate::shortcuts::{ShortcutAction, ShortcutRegistry};
use inkboard_core::{Canvas, EngineConfig, Redraw, SceneFile};
use inkboard_render::draw::draw_stroke_segment;
use inkboard_render::{DisplayList, ImageCache, RenderContext, Renderer};
use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;

/// Counters collected while replaying a script.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SessionReport {
    pub steps: usize,
    /// Full frame rebuilds.
    pub frames: usize,
    /// Incremental stroke segments drawn onto the current frame.
    pub segments: usize,
}

pub struct Session {
    canvas: Canvas,
    images: ImageCache,
    frame: DisplayList,
}

impl Session {
    pub fn new(config: EngineConfig) -> Self {
        Self {
            canvas: Canvas::new(config),
            images: ImageCache::new(),
            frame: DisplayList::new(),
        }
    }

    /// Read an engine config file.
    pub fn read_config(path: &Path) -> AppResult<EngineConfig> {
        let text = std::fs::read_to_string(path).map_err(|source| AppError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&text).map_err(|source| AppError::Config {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn canvas(&self) -> &Canvas {
        &self.canvas
    }

    pub fn canvas_mut(&mut self) -> &mut Canvas {
        &mut self.canvas
    }

    pub fn images(&self) -> &ImageCache {
        &self.images
    }

    /// The most recently built frame.
    pub fn frame(&self) -> &DisplayList {
        &self.frame
    }

    /// Load a scene document, replacing the current scene.
    pub fn open(&mut self, path: &Path) -> AppResult<()> {
        let file = File::open(path).map_err(|source| AppError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let document = SceneFile::read_from(BufReader::new(file))?;
        self.canvas.load(document)?;
        self.images.request_elements(self.canvas.elements());
        log::info!("Loaded {} elements from {}", self.canvas.elements().len(), path.display());
        Ok(())
    }

    /// Write the current scene as a document.
    pub fn save(&self, path: &Path) -> AppResult<()> {
        let file = File::create(path).map_err(|source| AppError::Write {
            path: path.to_path_buf(),
            source,
        })?;
        self.canvas.snapshot().write_to(BufWriter::new(file))?;
        log::info!("Saved {} elements to {}", self.canvas.elements().len(), path.display());
        Ok(())
    }

    /// Rebuild the whole frame.
    pub fn render(&mut self) {
        self.images.request_elements(self.canvas.elements());
        let size = self.canvas.screen_size();
        let ctx = RenderContext::new(&self.canvas, &self.images, size);
        self.frame.build_scene(&ctx);
    }

    fn present(&mut self, redraw: Redraw, report: &mut SessionReport) {
        match redraw {
            Redraw::None => {}
            Redraw::Segment { from, to } => {
                let transform = self.canvas.viewport().transform();
                draw_stroke_segment(&mut self.frame, from, to, self.canvas.tool_properties(), transform);
                report.segments += 1;
            }
            Redraw::Full => {
                self.render();
                report.frames += 1;
            }
        }
    }

    fn apply_shortcut(&mut self, action: ShortcutAction) -> bool {
        match action {
            ShortcutAction::SelectAll => self.canvas.select_all(),
            ShortcutAction::Undo => return self.canvas.undo(),
            ShortcutAction::Redo => return self.canvas.redo(),
            ShortcutAction::DeleteSelected => return self.canvas.delete_selected() > 0,
            ShortcutAction::Cancel => self.canvas.cancel_interaction(),
            ShortcutAction::ZoomIn => return self.canvas.zoom_in(),
            ShortcutAction::ZoomOut => return self.canvas.zoom_out(),
            ShortcutAction::ResetZoom => self.canvas.reset_zoom(),
            ShortcutAction::Tool(tool) => self.canvas.set_active_tool(tool),
        }
        true
    }

    /// Apply one step and report what needs repainting.
    pub fn apply(&mut self, index: usize, step: &ScriptStep) -> AppResult<Redraw> {
        let changed = match step {
            ScriptStep::Pointer { event } => return Ok(self.canvas.handle_pointer(event)),
            ScriptStep::Key { key, modifiers } => match ShortcutRegistry::lookup(key, *modifiers) {
                Some(action) => self.apply_shortcut(action),
                None => {
                    log::warn!("step {index}: no shortcut bound to {key:?}");
                    false
                }
            },
            ScriptStep::Tool { tool } => {
                self.canvas.set_active_tool(*tool);
                true
            }
            ScriptStep::Property { change } => self.canvas.update_tool_property(change.clone()),
            ScriptStep::Align { alignment } => self.canvas.align(*alignment),
            ScriptStep::Distribute { axis } => self.canvas.distribute(*axis),
            ScriptStep::Reorder { order } => self.canvas.reorder(*order),
            ScriptStep::Background { background } => {
                self.canvas.set_background(*background);
                true
            }
            ScriptStep::Resize { width, height } => {
                if !(width.is_finite() && height.is_finite() && *width > 0.0 && *height > 0.0) {
                    return Err(AppError::Step {
                        index,
                        message: format!("invalid surface size {width}x{height}"),
                    });
                }
                self.canvas.set_screen_size(*width, *height);
                true
            }
            ScriptStep::LoadImage { src, path } => {
                let bytes = std::fs::read(path).map_err(|source| AppError::Read {
                    path: path.clone(),
                    source,
                })?;
                self.images.request(src);
                self.images.resolve(src, &bytes)
            }
            ScriptStep::Clear => {
                self.canvas.clear_scene();
                true
            }
        };
        Ok(if changed { Redraw::Full } else { Redraw::None })
    }

    /// Replay a script, repainting after each step the way a host would.
    pub fn run(&mut self, script: &Script) -> AppResult<SessionReport> {
        let mut report = SessionReport::default();
        self.render();
        for (index, step) in script.steps.iter().enumerate() {
            log::trace!("step {index}: {step:?}");
            let redraw = self.apply(index, step)?;
            self.present(redraw, &mut report);
            report.steps += 1;
        }
        log::debug!(
            "replayed {} steps: {} frames, {} segments",
            report.steps,
            report.frames,
            report.segments
        );
        Ok(report)
    }
}
