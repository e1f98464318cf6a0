//! The coalesced update pass. `request_update` merges invalidation bits and
//! schedules at most one deferred pass; `run_scheduled_pass` consumes the
//! merged bits and runs the sub-phases in fixed order:
//! create -> range -> layout -> render.

use tracing::{debug, trace};

use crate::data_types::{AxisKind, AxisModel};
use crate::flags::ChangeFlags;
use crate::raster::{draw, PlotSurface};
use crate::series::SeriesRole;
use crate::transform::PlotTransform;

use super::{ChartEngine, EngineState};

impl ChartEngine {
    /// Merge invalidation bits and schedule one deferred pass. Idempotent:
    /// any number of calls before the pass runs collapse into a single
    /// scheduled token observing the merged flags.
    pub fn request_update(&mut self, flags: ChangeFlags) {
        if self.state == EngineState::Disposed {
            trace!("update requested on disposed chart, ignoring");
            return;
        }
        self.flags |= flags;
        if self.pass_pending {
            return;
        }
        self.pass_pending = true;
        if self.state == EngineState::Idle {
            self.state = EngineState::PassScheduled;
        }
        self.dispatcher.schedule_pass();
    }

    /// Entry point for the deferred callback. The pending token and the
    /// accumulated flags are consumed up front, so a mutation raised while
    /// the pass is executing schedules a fresh pass instead of being folded
    /// into this one.
    pub fn run_scheduled_pass(&mut self) {
        if self.state == EngineState::Disposed {
            return;
        }
        if !self.pass_pending {
            return;
        }
        self.pass_pending = false;
        let flags = self.flags.take();
        self.state = EngineState::PassRunning;
        debug!(?flags, "running update pass");

        if flags.contains(ChangeFlags::CREATE) {
            self.run_create();
        }
        if flags.contains(ChangeFlags::UPDATE_RANGE) {
            self.run_update_range();
        }
        if flags.contains(ChangeFlags::LAYOUT) {
            self.run_layout();
        }
        if flags.contains(ChangeFlags::RENDER) {
            self.run_render();
        }

        self.state = if self.pass_pending {
            EngineState::PassScheduled
        } else {
            EngineState::Idle
        };
    }

    /// Phase 1: generate missing points, default the axes, re-register
    /// series, and latch tooltip support.
    fn run_create(&mut self) {
        for s in &self.series {
            if !s.visible {
                continue;
            }
            let mut model = s.model.write();
            if !model.has_points() {
                model.generate_points();
            }
        }

        // The first series with generated points decides the default X axis
        // kind from its declared value kind; Y defaults to numeric.
        if self.x_axis.is_none() {
            let kind = self
                .series
                .iter()
                .find_map(|s| {
                    let model = s.model.read();
                    model.has_points().then(|| model.value_kind())
                })
                .unwrap_or_default();
            self.x_axis = Some(AxisModel::new(AxisKind::from(kind)));
        }
        if self.y_axis.is_none() {
            self.y_axis = Some(AxisModel::new(AxisKind::Numeric));
        }

        if let Some(axis) = self.x_axis.as_mut() {
            axis.registered.clear();
            axis.registered.extend(self.series.iter().map(|s| s.id.clone()));
        }
        if let Some(axis) = self.y_axis.as_mut() {
            axis.registered.clear();
            axis.registered.extend(self.series.iter().map(|s| s.id.clone()));
        }

        self.tooltip_enabled = self.series.iter().any(|s| s.model.read().wants_tooltip());
    }

    /// Phase 2: recompute value extents. Visible series and indicators
    /// contribute; the auto range is rebuilt from scratch every time so it
    /// can shrink as well as grow.
    fn run_update_range(&mut self) {
        let (Some(x_axis), Some(y_axis)) = (self.x_axis.as_mut(), self.y_axis.as_mut()) else {
            return;
        };
        let mut first_x = true;
        let mut first_y = true;
        for s in &self.series {
            if !s.visible && s.role != SeriesRole::Indicator {
                continue;
            }
            let mut model = s.model.write();
            if let Some((x_min, x_max, y_min, y_max)) = model.update_range() {
                x_axis.accumulate(x_min, x_max, first_x);
                y_axis.accumulate(y_min, y_max, first_y);
                first_x = false;
                first_y = false;
            }
        }
    }

    /// Phase 3: recompute axis pixel geometry. Skipped until a measured size
    /// is available.
    fn run_layout(&mut self) {
        let Some((width, height)) = self.plot_size else {
            return;
        };
        if width == 0 || height == 0 {
            return;
        }
        if let Some(axis) = self.x_axis.as_mut() {
            axis.layout(width as f32, false);
        }
        if let Some(axis) = self.y_axis.as_mut() {
            axis.layout(height as f32, true);
        }
    }

    /// Phase 4: paint. The first successful layout performs the full render
    /// and flips the loaded latch (applying and notifying a pre-set
    /// selection); afterwards renders are incremental unless one is already
    /// in flight.
    fn run_render(&mut self) {
        let Some((width, height)) = self.plot_size else {
            return;
        };
        if width == 0 || height == 0 {
            return;
        }
        let laid_out = self
            .x_axis
            .as_ref()
            .and_then(|a| a.scale.as_ref())
            .is_some()
            && self
                .y_axis
                .as_ref()
                .and_then(|a| a.scale.as_ref())
                .is_some();
        if !laid_out {
            return;
        }

        if !self.loaded {
            self.paint();
            self.loaded = true;
            if let Some(selected) = self.selected_index() {
                self.ensure_pixel_sets();
                self.apply_series_selection(selected);
            }
            if std::mem::take(&mut self.pending_selection_notify) {
                self.notify_selection();
            }
        } else if !self.render_in_flight {
            self.render_in_flight = true;
            let cleared = self.paint();
            if cleared {
                // A cleared repaint wiped any selection overlay; restore it.
                if let Some(selected) = self.selected_index() {
                    self.ensure_pixel_sets();
                    self.apply_series_selection(selected);
                }
            }
            self.render_in_flight = false;
        }
    }

    /// Paint pass over the surface. Returns whether the clear latch fired.
    /// A cleared paint resets every pixel cell and repaints every visible
    /// series; otherwise only series flagged dirty are painted over the
    /// existing buffer.
    fn paint(&mut self) -> bool {
        let Some((width, height)) = self.plot_size else {
            return false;
        };

        let (Some(x_scale), Some(y_scale)) = (
            self.x_axis.as_ref().and_then(|a| a.scale.clone()),
            self.y_axis.as_ref().and_then(|a| a.scale.clone()),
        ) else {
            return false;
        };

        if let Some(surface) = self.surface.as_mut() {
            surface.resize(&mut *self.host, width, height);
        } else {
            self.surface = Some(PlotSurface::new(&mut *self.host, width, height));
        }

        let Self {
            surface,
            series,
            host,
            ..
        } = self;
        let Some(surface) = surface.as_mut() else {
            return false;
        };
        let transform = PlotTransform::new(x_scale, y_scale, surface.width(), surface.height());

        let cleared = surface.take_needs_clear();
        if cleared {
            surface.clear();
            for s in series.iter() {
                let mut model = s.model.write();
                if let Some(cell) = model.raster_cell_mut() {
                    cell.clear();
                }
            }
        }

        // Bottom to top; later series overwrite shared pixels, which is what
        // makes their recorded sets authoritative for occlusion.
        let mut painted = 0usize;
        for s in series.iter_mut() {
            if !s.visible || s.role == SeriesRole::Indicator {
                continue;
            }
            if !cleared && !s.needs_repaint {
                continue;
            }
            let mut model = s.model.write();
            if let Some(parts) = model.raster_parts() {
                draw::paint_series(
                    surface,
                    parts.cell,
                    &transform,
                    parts.points,
                    parts.base_color,
                    parts.kind,
                );
                painted += 1;
            }
            drop(model);
            s.needs_repaint = false;
        }

        trace!(painted, cleared, "paint pass finished");
        surface.commit();
        host.request_redraw();

        if painted > 0 {
            self.pixel_sets_stale = true;
        }
        cleared
    }
}
