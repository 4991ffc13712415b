//! Inkboard Core Library
//!
//! Platform-agnostic scene engine for the Inkboard whiteboard: the element
//! model, the undoable scene store, the viewport and the pointer interaction
//! state machine.

pub mod background;
pub mod canvas;
pub mod color;
pub mod config;
pub mod connector;
pub mod document;
pub mod elements;
pub mod geometry;
pub mod history;
pub mod input;
pub mod interaction;
pub mod overlay;
pub mod scene;
pub mod selection;
pub mod tools;
pub mod viewport;

pub use background::{Background, GridType};
pub use canvas::Canvas;
pub use color::SerializableColor;
pub use config::{EmptyCanvasDrag, EngineConfig};
pub use connector::{AnchorSide, Binding};
pub use document::{DocumentError, FORMAT_VERSION, SceneFile};
pub use elements::{Element, ElementId, ElementPatch, ElementTrait, TextMetrics};
pub use input::{Modifiers, MouseButton, PointerEvent};
pub use interaction::{InteractionState, Redraw};
pub use overlay::{Overlays, Protractor, Ruler};
pub use scene::{Alignment, Axis, ExportScope, Scene, SceneError, ZOrder};
pub use selection::{Handle, HandleKind};
pub use tools::{ToolKind, ToolProperties, ToolProperty};
pub use viewport::Viewport;
