use eyre::{bail, Result};
use serde::{Deserialize, Serialize};

use crate::data_types::Rgba;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ChartTheme {
    pub background: Rgba,
    pub grid_line: Rgba,
    pub axis_line: Rgba,
    /// Brush selected series are recolored with.
    pub selection_brush: Rgba,
    /// Default interior colors handed out to series by index.
    pub series_palette: Vec<Rgba>,
}

impl Default for ChartTheme {
    fn default() -> Self {
        Self {
            background: Rgba::opaque(16, 16, 20),
            grid_line: Rgba::new(255, 255, 255, 26),
            axis_line: Rgba::new(255, 255, 255, 51),
            selection_brush: Rgba::opaque(255, 80, 80),
            series_palette: vec![
                Rgba::opaque(60, 120, 230),
                Rgba::opaque(230, 160, 40),
                Rgba::opaque(80, 200, 120),
                Rgba::opaque(200, 80, 200),
                Rgba::opaque(80, 200, 220),
            ],
        }
    }
}

impl ChartTheme {
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn series_color(&self, index: usize) -> Rgba {
        if self.series_palette.is_empty() {
            return Rgba::opaque(128, 128, 128);
        }
        self.series_palette[index % self.series_palette.len()]
    }
}

/// Parse `#rrggbb` or `#rrggbbaa` into an [`Rgba`].
pub fn parse_hex(hex: &str) -> Result<Rgba> {
    let digits = hex.strip_prefix('#').unwrap_or(hex);
    if !digits.is_ascii() || (digits.len() != 6 && digits.len() != 8) {
        bail!("expected 6 or 8 hex digits, got {:?}", hex);
    }
    let byte = |i: usize| -> Result<u8> { Ok(u8::from_str_radix(&digits[i..i + 2], 16)?) };
    Ok(Rgba {
        r: byte(0)?,
        g: byte(2)?,
        b: byte(4)?,
        a: if digits.len() == 8 { byte(6)? } else { 255 },
    })
}
