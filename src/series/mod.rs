// Series model: capability-tagged instead of type-switched. A series that can
// be painted into the shared pixel buffer reports a `RasterKind` and owns a
// `RasterCell`; everything else about it goes through the same trait surface.

pub mod fast_column;
pub mod fast_line;
pub mod fast_scatter;

pub use fast_column::FastColumnSeries;
pub use fast_line::FastLineSeries;
pub use fast_scatter::FastScatterSeries;

use std::sync::Arc;

use hashlink::LinkedHashSet;
use parking_lot::RwLock;

use crate::data_types::{DataExtent, PlotPoint, Rgba, ValueKind};

/// How a raster-eligible series is painted.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RasterKind {
    /// Square markers, one per point.
    Scatter { marker: u32 },
    /// Connected polyline; treated as continuous for selection reset.
    Line { width: u32 },
    /// Vertical bars from the zero line, centered on each point.
    Column { width: u32 },
}

impl RasterKind {
    /// Continuous kinds are reset by re-rendering the whole series; discrete
    /// kinds restore per-point interior colors pixel by pixel.
    pub fn is_continuous(&self) -> bool {
        matches!(self, RasterKind::Line { .. })
    }
}

/// Pixel offsets a series wrote into the shared surface. Offsets are byte
/// positions, recorded in write order during paint; the lookup set is built
/// lazily from them when a recolor or occlusion query first needs it.
#[derive(Default)]
pub struct RasterCell {
    raw: Vec<u32>,
    set: LinkedHashSet<u32>,
}

impl RasterCell {
    #[inline]
    pub fn record(&mut self, offset: u32) {
        self.raw.push(offset);
    }

    /// Fold the raw write log into the lookup set, keeping first-write order.
    pub fn convert(&mut self) {
        for off in self.raw.drain(..) {
            if !self.set.contains(&off) {
                self.set.insert(off);
            }
        }
    }

    pub fn needs_conversion(&self) -> bool {
        !self.raw.is_empty()
    }

    pub fn set(&self) -> &LinkedHashSet<u32> {
        &self.set
    }

    pub fn is_empty(&self) -> bool {
        self.raw.is_empty() && self.set.is_empty()
    }

    pub fn clear(&mut self) {
        self.raw.clear();
        self.set.clear();
    }
}

/// Split borrow handed to the paint pass: the point list is read while the
/// cell records offsets.
pub struct RasterParts<'a> {
    pub points: &'a [PlotPoint],
    pub base_color: Rgba,
    pub kind: RasterKind,
    pub cell: &'a mut RasterCell,
}

/// Uniform contract every series exposes to the engine. The engine drives
/// these; it never owns the data behind them.
pub trait SeriesModel: Send + Sync {
    /// Declared kind of the independent values, consulted when defaulting
    /// the X axis.
    fn value_kind(&self) -> ValueKind {
        ValueKind::Numeric
    }

    /// Whether render points have been generated since the last data change.
    fn has_points(&self) -> bool;

    /// Materialize render points from the raw samples.
    fn generate_points(&mut self);

    /// Recompute the value extent from the current points.
    fn update_range(&mut self) -> Option<DataExtent>;

    fn points(&self) -> &[PlotPoint];

    /// Color the given logical point paints with when unselected.
    fn interior_color_at(&self, index: usize) -> Rgba;

    fn wants_tooltip(&self) -> bool {
        false
    }

    /// `Some` marks the series raster-eligible.
    fn raster_kind(&self) -> Option<RasterKind> {
        None
    }

    fn raster_cell(&self) -> Option<&RasterCell> {
        None
    }

    fn raster_cell_mut(&mut self) -> Option<&mut RasterCell> {
        None
    }

    fn raster_parts(&mut self) -> Option<RasterParts<'_>> {
        None
    }

    fn push_sample(&mut self, sample: PlotPoint);

    fn set_samples(&mut self, samples: Vec<PlotPoint>);

    /// Index of the point nearest to `x`, for tooltip hit-testing.
    fn nearest_index(&self, x: f64) -> Option<usize>;
}

/// Participation of a series in the chart.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SeriesRole {
    #[default]
    Cartesian,
    /// Overlay/indicator series: contributes to range updates even when not
    /// part of the painted stack.
    Indicator,
}

/// A series slot in the chart. Z-order is the slot's position in the engine's
/// series list; a series is "above" another when its index is greater.
#[derive(Clone)]
pub struct Series {
    pub id: String,
    pub model: Arc<RwLock<dyn SeriesModel>>,
    pub role: SeriesRole,
    pub visible: bool,
    pub(crate) needs_repaint: bool,
}

impl Series {
    pub fn new(id: impl Into<String>, model: impl SeriesModel + 'static) -> Self {
        Self {
            id: id.into(),
            model: Arc::new(RwLock::new(model)),
            role: SeriesRole::Cartesian,
            visible: true,
            needs_repaint: true,
        }
    }

    pub fn as_indicator(mut self) -> Self {
        self.role = SeriesRole::Indicator;
        self
    }
}
