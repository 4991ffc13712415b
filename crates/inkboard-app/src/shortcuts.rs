//! Keyboard shortcut registry.

use inkboard_core::{Modifiers, ToolKind};

/// What a shortcut does to the canvas.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShortcutAction {
    SelectAll,
    Undo,
    Redo,
    DeleteSelected,
    Cancel,
    ZoomIn,
    ZoomOut,
    ResetZoom,
    Tool(ToolKind),
}

/// A keyboard shortcut definition.
#[derive(Debug, Clone)]
pub struct Shortcut {
    pub key: &'static str,
    pub ctrl: bool,
    pub shift: bool,
    pub action: ShortcutAction,
    pub description: &'static str,
}

impl Shortcut {
    pub const fn new(key: &'static str, ctrl: bool, shift: bool, action: ShortcutAction, description: &'static str) -> Self {
        Self {
            key,
            ctrl,
            shift,
            action,
            description,
        }
    }

    /// Format the shortcut for display (e.g., "Ctrl+Z").
    pub fn format(&self) -> String {
        let mut parts = Vec::new();
        if self.ctrl {
            parts.push("Ctrl");
        }
        if self.shift {
            parts.push("Shift");
        }
        parts.push(self.key);
        parts.join("+")
    }

    fn matches(&self, key: &str, modifiers: Modifiers) -> bool {
        self.key.eq_ignore_ascii_case(key) && self.ctrl == modifiers.command() && self.shift == modifiers.shift
    }
}

/// Registry of all keyboard shortcuts.
pub struct ShortcutRegistry;

impl ShortcutRegistry {
    /// Get all registered shortcuts.
    pub fn all() -> Vec<Shortcut> {
        use ShortcutAction::*;
        vec![
            Shortcut::new("A", true, false, SelectAll, "Select all elements"),
            Shortcut::new("Z", true, false, Undo, "Undo"),
            Shortcut::new("Z", true, true, Redo, "Redo"),
            Shortcut::new("Y", true, false, Redo, "Redo"),
            Shortcut::new("Delete", false, false, DeleteSelected, "Delete selected elements"),
            Shortcut::new("Backspace", false, false, DeleteSelected, "Delete selected elements"),
            Shortcut::new("Escape", false, false, Cancel, "Cancel current action"),
            Shortcut::new("=", true, false, ZoomIn, "Zoom in"),
            Shortcut::new("-", true, false, ZoomOut, "Zoom out"),
            Shortcut::new("0", true, false, ResetZoom, "Reset zoom"),
            Shortcut::new("V", false, false, Tool(ToolKind::Select), "Select tool"),
            Shortcut::new("H", false, false, Tool(ToolKind::Pan), "Pan tool"),
            Shortcut::new("P", false, false, Tool(ToolKind::Pen), "Pen tool"),
            Shortcut::new("E", false, false, Tool(ToolKind::Eraser), "Eraser"),
            Shortcut::new("R", false, false, Tool(ToolKind::Rectangle), "Rectangle tool"),
            Shortcut::new("O", false, false, Tool(ToolKind::Circle), "Circle tool"),
            Shortcut::new("L", false, false, Tool(ToolKind::Line), "Line tool"),
            Shortcut::new("A", false, false, Tool(ToolKind::Arrow), "Arrow tool"),
            Shortcut::new("R", false, true, Tool(ToolKind::Ruler), "Ruler"),
            Shortcut::new("P", false, true, Tool(ToolKind::Protractor), "Protractor"),
        ]
    }

    /// The action bound to `key` with the given modifiers.
    pub fn lookup(key: &str, modifiers: Modifiers) -> Option<ShortcutAction> {
        Self::all()
            .into_iter()
            .find(|shortcut| shortcut.matches(key, modifiers))
            .map(|shortcut| shortcut.action)
    }

    /// Print all shortcuts to console.
    pub fn print_all() {
        println!("\n=== Keyboard Shortcuts ===");
        for shortcut in Self::all() {
            println!("  {:20} {}", shortcut.format(), shortcut.description);
        }
        println!();
    }
}
