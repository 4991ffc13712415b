//! Canvas background settings.

use crate::color::SerializableColor;
use serde::{Deserialize, Serialize};

/// Grid display style.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GridType {
    /// Plain background.
    None,
    /// A dot at every grid intersection.
    Dots,
    /// Full grid lines.
    #[default]
    Lines,
    /// Outlined grid cells.
    Squares,
}

impl GridType {
    /// Cycle to the next grid style.
    pub fn next(self) -> Self {
        match self {
            GridType::None => GridType::Dots,
            GridType::Dots => GridType::Lines,
            GridType::Lines => GridType::Squares,
            GridType::Squares => GridType::None,
        }
    }
}

fn default_grid_size() -> f64 {
    Background::DEFAULT_GRID_SIZE
}

/// Background color and grid. Persisted alongside the elements.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Background {
    #[serde(default)]
    pub grid_type: GridType,
    #[serde(default = "default_grid_size")]
    pub grid_size: f64,
    #[serde(default = "Background::default_grid_color")]
    pub grid_color: SerializableColor,
    #[serde(default = "SerializableColor::white")]
    pub background_color: SerializableColor,
}

impl Background {
    pub const DEFAULT_GRID_SIZE: f64 = 20.0;

    fn default_grid_color() -> SerializableColor {
        SerializableColor::rgb(0xe5, 0xe5, 0xe5)
    }

    /// Grid spacing, or `None` when no grid is drawn.
    pub fn grid_spacing(&self) -> Option<f64> {
        (self.grid_type != GridType::None && self.grid_size.is_finite() && self.grid_size > 0.0)
            .then_some(self.grid_size)
    }
}

impl Default for Background {
    fn default() -> Self {
        Self {
            grid_type: GridType::default(),
            grid_size: Self::DEFAULT_GRID_SIZE,
            grid_color: Self::default_grid_color(),
            background_color: SerializableColor::white(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_json_uses_defaults() {
        let bg: Background = serde_json::from_str(r#"{"gridType":"dots"}"#).unwrap();
        assert_eq!(bg.grid_type, GridType::Dots);
        assert!((bg.grid_size - 20.0).abs() < f64::EPSILON);
        assert_eq!(bg.background_color, SerializableColor::white());
    }

    #[test]
    fn test_grid_spacing() {
        let mut bg = Background::default();
        assert_eq!(bg.grid_spacing(), Some(20.0));
        bg.grid_type = GridType::None;
        assert_eq!(bg.grid_spacing(), None);
        bg.grid_type = GridType::Lines;
        bg.grid_size = 0.0;
        assert_eq!(bg.grid_spacing(), None);
    }

    #[test]
    fn test_next_cycles() {
        assert_eq!(GridType::Squares.next(), GridType::None);
    }
}
