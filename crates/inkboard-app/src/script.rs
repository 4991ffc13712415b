//! Event scripts: a JSON list of inputs replayed against a canvas.

use crate::error::{AppError, AppResult};
use inkboard_core::{Alignment, Axis, Background, Modifiers, PointerEvent, ToolKind, ToolProperty, ZOrder};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// One scripted input.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "camelCase")]
pub enum ScriptStep {
    Pointer { event: PointerEvent },
    /// A key press resolved through the shortcut registry.
    Key {
        key: String,
        #[serde(default)]
        modifiers: Modifiers,
    },
    Tool { tool: ToolKind },
    Property { change: ToolProperty },
    Align { alignment: Alignment },
    Distribute { axis: Axis },
    Reorder { order: ZOrder },
    Background { background: Background },
    /// Change the surface size in logical pixels.
    Resize { width: f64, height: f64 },
    /// Supply bytes for an image source from a local file.
    LoadImage { src: String, path: PathBuf },
    Clear,
}

/// A whole script.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Script {
    #[serde(default)]
    pub steps: Vec<ScriptStep>,
}

impl Script {
    pub fn from_json(json: &str) -> AppResult<Self> {
        serde_json::from_str(json).map_err(AppError::Script)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kurbo::Point;

    #[test]
    fn test_parse_mixed_steps() {
        let json = r#"{
            "steps": [
                {"op": "tool", "tool": "rectangle"},
                {"op": "pointer", "event": {"kind": "down", "position": {"x": 10.0, "y": 20.0}}},
                {"op": "key", "key": "z", "modifiers": {"ctrl": true}},
                {"op": "align", "alignment": "left"},
                {"op": "resize", "width": 1024.0, "height": 768.0},
                {"op": "clear"}
            ]
        }"#;
        let script = Script::from_json(json).unwrap();
        assert_eq!(script.steps.len(), 6);
        assert_eq!(script.steps[0], ScriptStep::Tool { tool: ToolKind::Rectangle });
        match &script.steps[1] {
            ScriptStep::Pointer { event } => assert_eq!(event.position(), Point::new(10.0, 20.0)),
            other => panic!("unexpected step {other:?}"),
        }
        assert_eq!(
            script.steps[2],
            ScriptStep::Key {
                key: "z".into(),
                modifiers: Modifiers::CTRL,
            }
        );
    }

    #[test]
    fn test_unknown_op_rejected() {
        let err = Script::from_json(r#"{"steps": [{"op": "explode"}]}"#).unwrap_err();
        assert!(matches!(err, AppError::Script(_)));
    }

    #[test]
    fn test_empty_script() {
        assert!(Script::from_json("{}").unwrap().steps.is_empty());
    }
}
