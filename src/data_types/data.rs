use serde::{Deserialize, Serialize};

/// Packed 8-bit color. The raster surface stores bytes in B,G,R,A order;
/// [`Rgba::bgra`] returns the channels in that write order.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub const fn opaque(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// Channel bytes in surface write order.
    #[inline]
    pub const fn bgra(self) -> [u8; 4] {
        [self.b, self.g, self.r, self.a]
    }

    /// Little-endian packed BGRA pixel, matching the surface's u32 view.
    #[inline]
    pub const fn packed(self) -> u32 {
        u32::from_le_bytes([self.b, self.g, self.r, self.a])
    }
}

/// Declared kind of a series' independent (X) values. Drives default axis
/// selection and tick formatting.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ValueKind {
    #[default]
    Numeric,
    /// Milliseconds since the Unix epoch.
    DateTime,
    /// Ordinal position; X carries the category index.
    Category,
    /// Elapsed milliseconds.
    Duration,
}

/// One data sample. `color` overrides the series interior color for the
/// pixels this point produces.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct PlotPoint {
    pub x: f64,
    pub y: f64,
    pub color: Option<Rgba>,
}

impl PlotPoint {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y, color: None }
    }

    pub fn colored(x: f64, y: f64, color: Rgba) -> Self {
        Self {
            x,
            y,
            color: Some(color),
        }
    }
}

/// Value extent of a series as `(x_min, x_max, y_min, y_max)`.
pub type DataExtent = (f64, f64, f64, f64);
