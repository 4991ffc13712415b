//! Engine tuning knobs.

use serde::{Deserialize, Serialize};

/// What a select-tool drag on empty canvas does.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EmptyCanvasDrag {
    /// Rubber-band selection.
    #[default]
    Marquee,
    /// Pan the viewport.
    Pan,
}

/// Engine configuration.
///
/// Distances marked "screen" are divided by the viewport scale before use,
/// so they feel the same at every zoom level.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Multiplicative step for zoom in/out.
    pub zoom_step: f64,
    /// Wheel delta to scale delta factor.
    pub wheel_zoom_speed: f64,
    /// Hit tolerance for select and erase (screen).
    pub hit_tolerance: f64,
    /// Handle hit radius (screen).
    pub handle_tolerance: f64,
    /// Distance of the rotation handle above the top edge (screen).
    pub rotate_handle_offset: f64,
    /// Anchor snap radius for connectors (screen).
    pub anchor_snap_radius: f64,
    /// A drawn shape is kept only if one side exceeds this (world).
    pub min_shape_drag: f64,
    /// Smallest width/height a resize can produce (world).
    pub min_resize: f64,
    /// Pen-to-ruler snap distance (world).
    pub ruler_snap_threshold: f64,
    /// Maximum retained history snapshots; `None` is unbounded.
    pub history_limit: Option<usize>,
    /// Behavior of a select-tool drag on empty canvas.
    pub empty_canvas_drag: EmptyCanvasDrag,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            zoom_step: 1.1,
            wheel_zoom_speed: 0.001,
            hit_tolerance: 5.0,
            handle_tolerance: 10.0,
            rotate_handle_offset: 25.0,
            anchor_snap_radius: 20.0,
            min_shape_drag: 5.0,
            min_resize: 20.0,
            ruler_snap_threshold: 10.0,
            history_limit: None,
            empty_canvas_drag: EmptyCanvasDrag::Marquee,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_config_fills_defaults() {
        let config: EngineConfig = serde_json::from_str(r#"{"history_limit": 50, "empty_canvas_drag": "pan"}"#).unwrap();
        assert_eq!(config.history_limit, Some(50));
        assert_eq!(config.empty_canvas_drag, EmptyCanvasDrag::Pan);
        assert!((config.min_resize - 20.0).abs() < f64::EPSILON);
    }
}
