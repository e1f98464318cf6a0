use crate::data_types::{ColumnConfig, DataExtent, PlotPoint, Rgba, SampleStore, ValueKind};

use super::{RasterCell, RasterKind, RasterParts, SeriesModel};

/// High-density column series: one vertical bar per point, drawn from the
/// zero line, painted into the shared pixel buffer. Discrete for selection
/// reset purposes.
pub struct FastColumnSeries {
    store: SampleStore,
    points: Vec<PlotPoint>,
    pub config: ColumnConfig,
    value_kind: ValueKind,
    tooltip: bool,
    cell: RasterCell,
}

impl FastColumnSeries {
    pub fn new(samples: Vec<PlotPoint>) -> Self {
        Self {
            store: SampleStore::new(samples),
            points: Vec::new(),
            config: ColumnConfig::default(),
            value_kind: ValueKind::Numeric,
            tooltip: false,
            cell: RasterCell::default(),
        }
    }

    pub fn with_config(mut self, config: ColumnConfig) -> Self {
        self.config = config;
        self
    }

    pub fn with_value_kind(mut self, kind: ValueKind) -> Self {
        self.value_kind = kind;
        self
    }

    pub fn with_tooltip(mut self) -> Self {
        self.tooltip = true;
        self
    }
}

impl SeriesModel for FastColumnSeries {
    fn value_kind(&self) -> ValueKind {
        self.value_kind
    }

    fn has_points(&self) -> bool {
        !self.points.is_empty()
    }

    fn generate_points(&mut self) {
        self.points = self
            .store
            .samples()
            .iter()
            .filter(|p| p.x.is_finite() && p.y.is_finite())
            .copied()
            .collect();
        self.points
            .sort_by(|a, b| a.x.partial_cmp(&b.x).unwrap_or(std::cmp::Ordering::Equal));
    }

    fn update_range(&mut self) -> Option<DataExtent> {
        // Columns grow from the zero line, so the Y extent always covers it.
        let (x_min, x_max, y_min, y_max) = self.store.bounds()?;
        Some((x_min, x_max, y_min.min(0.0), y_max.max(0.0)))
    }

    fn points(&self) -> &[PlotPoint] {
        &self.points
    }

    fn interior_color_at(&self, index: usize) -> Rgba {
        self.points
            .get(index)
            .and_then(|p| p.color)
            .unwrap_or(self.config.color)
    }

    fn wants_tooltip(&self) -> bool {
        self.tooltip
    }

    fn raster_kind(&self) -> Option<RasterKind> {
        Some(RasterKind::Column {
            width: self.config.column_width,
        })
    }

    fn raster_cell(&self) -> Option<&RasterCell> {
        Some(&self.cell)
    }

    fn raster_cell_mut(&mut self) -> Option<&mut RasterCell> {
        Some(&mut self.cell)
    }

    fn raster_parts(&mut self) -> Option<RasterParts<'_>> {
        Some(RasterParts {
            points: &self.points,
            base_color: self.config.color,
            kind: RasterKind::Column {
                width: self.config.column_width,
            },
            cell: &mut self.cell,
        })
    }

    fn push_sample(&mut self, sample: PlotPoint) {
        self.store.push(sample);
        self.points.clear();
    }

    fn set_samples(&mut self, samples: Vec<PlotPoint>) {
        self.store.replace(samples);
        self.points.clear();
    }

    fn nearest_index(&self, x: f64) -> Option<usize> {
        crate::data_types::samples::nearest_in(&self.points, x)
    }
}
