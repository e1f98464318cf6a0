//! Chart engine: the single source of truth for series, axes and the plot
//! surface, plus the business logic that mutates them. Every mutation site
//! ends in one explicit [`ChartEngine::request_update`] call; the deferred
//! pass in `update.rs` decides what actually re-runs.

mod update;

pub mod dispatch;

use std::rc::Rc;

use tracing::{debug, info};

use crate::data_types::{AxisModel, PlotPoint, Rgba};
use crate::flags::ChangeFlags;
use crate::host::{DisplayHost, UpdateDispatcher};
use crate::raster::{recolor, OcclusionIndex, PlotSurface};
use crate::series::Series;
use crate::theme::ChartTheme;
use crate::transform::PlotTransform;

/// Lifecycle of the update scheduler.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EngineState {
    Idle,
    PassScheduled,
    PassRunning,
    /// Terminal; every entry point becomes a no-op.
    Disposed,
}

type SelectionListener = Box<dyn FnMut(Option<usize>)>;

pub struct ChartEngine {
    pub(crate) host: Box<dyn DisplayHost>,
    pub(crate) dispatcher: Rc<dyn UpdateDispatcher>,

    pub(crate) series: Vec<Series>,
    pub(crate) x_axis: Option<AxisModel>,
    pub(crate) y_axis: Option<AxisModel>,

    pub(crate) surface: Option<PlotSurface>,
    pub(crate) plot_size: Option<(u32, u32)>,

    pub(crate) flags: ChangeFlags,
    pub(crate) state: EngineState,
    pub(crate) pass_pending: bool,
    pub(crate) loaded: bool,
    pub(crate) render_in_flight: bool,
    /// Raw per-series offset logs need folding into lookup sets before any
    /// occlusion or recolor work.
    pub(crate) pixel_sets_stale: bool,
    pub(crate) tooltip_enabled: bool,

    theme: ChartTheme,
    selected: Option<usize>,
    selection_brush: Rgba,
    pub(crate) pending_selection_notify: bool,
    on_selection_changed: Option<SelectionListener>,
}

impl ChartEngine {
    pub fn new(host: Box<dyn DisplayHost>, dispatcher: Rc<dyn UpdateDispatcher>) -> Self {
        info!("chart engine created");
        let theme = ChartTheme::default();
        let selection_brush = theme.selection_brush;
        Self {
            host,
            dispatcher,
            series: Vec::new(),
            x_axis: None,
            y_axis: None,
            surface: None,
            plot_size: None,
            flags: ChangeFlags::NONE,
            state: EngineState::Idle,
            pass_pending: false,
            loaded: false,
            render_in_flight: false,
            pixel_sets_stale: false,
            tooltip_enabled: false,
            theme,
            selected: None,
            selection_brush,
            pending_selection_notify: false,
            on_selection_changed: None,
        }
    }

    pub fn state(&self) -> EngineState {
        self.state
    }

    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    pub fn tooltip_enabled(&self) -> bool {
        self.tooltip_enabled
    }

    pub fn series(&self) -> &[Series] {
        &self.series
    }

    pub fn x_axis(&self) -> Option<&AxisModel> {
        self.x_axis.as_ref()
    }

    pub fn y_axis(&self) -> Option<&AxisModel> {
        self.y_axis.as_ref()
    }

    pub fn surface(&self) -> Option<&PlotSurface> {
        self.surface.as_ref()
    }

    pub fn theme(&self) -> &ChartTheme {
        &self.theme
    }

    pub fn selected_index(&self) -> Option<usize> {
        self.selected
    }

    // ---- mutation sites -------------------------------------------------
    // Each one merges its invalidation bits and returns; the work happens in
    // the next coalesced pass.

    pub fn add_series(&mut self, series: Series) {
        self.series.push(series);
        self.request_update(ChangeFlags::ALL);
    }

    pub fn remove_series(&mut self, id: &str) {
        let before = self.series.len();
        self.series.retain(|s| s.id != id);
        if self.series.len() == before {
            return;
        }
        // Removal leaves stale pixels behind; the next paint must clear.
        if let Some(surface) = self.surface.as_mut() {
            surface.mark_needs_clear();
        }
        // Index-based selection no longer points at the same series.
        self.selected = None;
        self.request_update(ChangeFlags::ALL);
    }

    pub fn set_series_visible(&mut self, id: &str, visible: bool) {
        let Some(series) = self.series.iter_mut().find(|s| s.id == id) else {
            return;
        };
        if series.visible == visible {
            return;
        }
        series.visible = visible;
        series.needs_repaint = visible;
        if let Some(surface) = self.surface.as_mut() {
            surface.mark_needs_clear();
        }
        // Create is included because a series un-hidden for the first time
        // may never have generated its points.
        self.request_update(
            ChangeFlags::CREATE
                | ChangeFlags::UPDATE_RANGE
                | ChangeFlags::LAYOUT
                | ChangeFlags::RENDER,
        );
    }

    /// Append one sample; the surface is painted over, not cleared.
    pub fn append_sample(&mut self, id: &str, sample: PlotPoint) {
        let Some(series) = self.series.iter_mut().find(|s| s.id == id) else {
            return;
        };
        series.model.write().push_sample(sample);
        series.needs_repaint = true;
        self.request_update(ChangeFlags::CREATE | ChangeFlags::UPDATE_RANGE | ChangeFlags::RENDER);
    }

    /// Replace a series' data wholesale; forces a cleared repaint.
    pub fn replace_samples(&mut self, id: &str, samples: Vec<PlotPoint>) {
        let Some(series) = self.series.iter_mut().find(|s| s.id == id) else {
            return;
        };
        series.model.write().set_samples(samples);
        series.needs_repaint = true;
        if let Some(surface) = self.surface.as_mut() {
            surface.mark_needs_clear();
        }
        self.request_update(ChangeFlags::ALL);
    }

    /// Plot rectangle size from the layout host, in pixels.
    pub fn set_plot_size(&mut self, width: u32, height: u32) {
        if self.state == EngineState::Disposed {
            return;
        }
        if self.plot_size == Some((width, height)) {
            return;
        }
        if width == 0 || height == 0 {
            // Degenerate plot area: drop the surface, keep the size on file.
            debug!(width, height, "plot area collapsed, dropping surface");
            self.plot_size = Some((width, height));
            self.surface = None;
            return;
        }
        self.plot_size = Some((width, height));
        if let Some(surface) = self.surface.as_mut() {
            surface.resize(&mut *self.host, width, height);
        }
        self.request_update(ChangeFlags::LAYOUT | ChangeFlags::RENDER);
    }

    pub fn set_x_axis(&mut self, axis: AxisModel) {
        self.x_axis = Some(axis);
        self.request_update(ChangeFlags::UPDATE_RANGE | ChangeFlags::LAYOUT | ChangeFlags::RENDER);
    }

    pub fn set_y_axis(&mut self, axis: AxisModel) {
        self.y_axis = Some(axis);
        self.request_update(ChangeFlags::UPDATE_RANGE | ChangeFlags::LAYOUT | ChangeFlags::RENDER);
    }

    pub fn set_theme(&mut self, theme: ChartTheme) {
        self.theme = theme;
        if let Some(surface) = self.surface.as_mut() {
            surface.mark_needs_clear();
        }
        self.request_update(ChangeFlags::RENDER);
    }

    pub fn set_selection_listener(&mut self, listener: impl FnMut(Option<usize>) + 'static) {
        self.on_selection_changed = Some(Box::new(listener));
    }

    pub fn dispose(&mut self) {
        debug!("chart engine disposed");
        self.state = EngineState::Disposed;
        self.surface = None;
    }

    // ---- selection (synchronous path) -----------------------------------

    /// Change the selected series. Runs synchronously between passes: only
    /// the affected pixels are rewritten, the buffer is not repainted.
    pub fn set_selected_index(&mut self, index: Option<usize>) {
        if self.state == EngineState::Disposed {
            return;
        }
        if let Some(i) = index {
            if i >= self.series.len() {
                return;
            }
        }
        if index == self.selected {
            return;
        }
        let previous = std::mem::replace(&mut self.selected, index);
        // The brush is resolved once here and held until the next change.
        self.selection_brush = self.theme.selection_brush;

        if !self.loaded || self.surface.is_none() {
            // Pre-set before the first render: applied and notified then.
            self.pending_selection_notify = true;
            return;
        }

        self.ensure_pixel_sets();
        if let Some(prev) = previous {
            self.reset_series_colors(prev);
        }
        if let Some(sel) = self.selected {
            self.apply_series_selection(sel);
        }
        self.notify_selection();
    }

    /// Fold every series' raw offset log into its lookup set. Occlusion is
    /// computed against the unified converted state, so this runs for all
    /// series before any recoloring.
    pub(crate) fn ensure_pixel_sets(&mut self) {
        if !self.pixel_sets_stale {
            return;
        }
        for s in &self.series {
            let mut model = s.model.write();
            if let Some(cell) = model.raster_cell_mut() {
                cell.convert();
            }
        }
        self.pixel_sets_stale = false;
    }

    pub(crate) fn apply_series_selection(&mut self, index: usize) {
        let Some(surface) = self.surface.as_mut() else {
            return;
        };
        let occlusion = OcclusionIndex::capture(&self.series, index);
        let Some(series) = self.series.get(index) else {
            return;
        };
        let model = series.model.read();
        if let Some(cell) = model.raster_cell() {
            recolor::apply_selection(surface, cell, &occlusion, self.selection_brush);
        }
        // The occlusion union is discarded here; per-series sets live on.
    }

    pub(crate) fn reset_series_colors(&mut self, index: usize) {
        let Some(transform) = self.transform() else {
            return;
        };
        let Some(surface) = self.surface.as_mut() else {
            return;
        };
        let occlusion = OcclusionIndex::capture(&self.series, index);
        let Some(series) = self.series.get(index) else {
            return;
        };
        let model = series.model.read();
        let Some(kind) = model.raster_kind() else {
            return;
        };
        if kind.is_continuous() {
            let width = match kind {
                crate::series::RasterKind::Line { width } => width,
                _ => 1,
            };
            recolor::apply_reset_continuous(
                surface,
                &transform,
                model.points(),
                model.interior_color_at(0),
                width,
                &occlusion,
            );
        } else if let Some(cell) = model.raster_cell() {
            recolor::apply_reset_discrete(
                surface,
                &transform,
                model.points(),
                |i| model.interior_color_at(i),
                kind,
                cell,
                &occlusion,
            );
        }
    }

    pub(crate) fn notify_selection(&mut self) {
        let selected = self.selected;
        if let Some(listener) = self.on_selection_changed.as_mut() {
            listener(selected);
        }
    }

    /// Projection for the current layout, if one has been computed.
    pub fn transform(&self) -> Option<PlotTransform> {
        let surface = self.surface.as_ref()?;
        let x_scale = self.x_axis.as_ref()?.scale.clone()?;
        let y_scale = self.y_axis.as_ref()?.scale.clone()?;
        Some(PlotTransform::new(
            x_scale,
            y_scale,
            surface.width(),
            surface.height(),
        ))
    }

    /// Map a plot-relative pointer position to `(series, point)` for tooltip
    /// purposes. Goes through the inverse transform and binary search, never
    /// through the pixel buffer.
    pub fn hit_test(&self, px: f32, _py: f32) -> Option<(usize, usize)> {
        if !self.tooltip_enabled {
            return None;
        }
        let x_scale = self.x_axis.as_ref()?.scale.as_ref()?;
        let x = x_scale.invert(px);
        crate::hittest::HitTester::nearest_point(&self.series, x)
    }
}
