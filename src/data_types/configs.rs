use serde::{Deserialize, Serialize};

use super::data::Rgba;

const DEFAULT_BLUE: Rgba = Rgba::opaque(60, 120, 230);

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ScatterConfig {
    pub color: Rgba,
    /// Marker square edge in pixels.
    pub marker_size: u32,
}

impl Default for ScatterConfig {
    fn default() -> Self {
        Self {
            color: DEFAULT_BLUE,
            marker_size: 3,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LineConfig {
    pub color: Rgba,
    /// Stroke thickness in pixels.
    pub line_width: u32,
}

impl Default for LineConfig {
    fn default() -> Self {
        Self {
            color: DEFAULT_BLUE,
            line_width: 1,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ColumnConfig {
    pub color: Rgba,
    /// Column width in pixels, centered on the point's X.
    pub column_width: u32,
}

impl Default for ColumnConfig {
    fn default() -> Self {
        Self {
            color: DEFAULT_BLUE,
            column_width: 5,
        }
    }
}
