use serde::{Deserialize, Serialize};

use super::data::ValueKind;
use crate::scales::LinearScale;

/// Kind of an axis, normally inferred from the first registered series'
/// declared value kind.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum AxisKind {
    #[default]
    Numeric,
    DateTime,
    Category,
    Duration,
}

impl From<ValueKind> for AxisKind {
    fn from(kind: ValueKind) -> Self {
        match kind {
            ValueKind::Numeric => Self::Numeric,
            ValueKind::DateTime => Self::DateTime,
            ValueKind::Category => Self::Category,
            ValueKind::Duration => Self::Duration,
        }
    }
}

/// Data-space range of a single axis, with optional hard limits and a tick
/// cache keyed on the last domain the ticks were computed for.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct AxisRange {
    pub min: f64,
    pub max: f64,
    pub min_limit: Option<f64>,
    pub max_limit: Option<f64>,
    cached_ticks: Vec<f64>,
    last_tick_domain: (f64, f64),
}

impl AxisRange {
    pub fn new(min: f64, max: f64) -> Self {
        Self {
            min,
            max,
            ..Default::default()
        }
    }

    pub fn span(&self) -> f64 {
        self.max - self.min
    }

    pub fn set(&mut self, min: f64, max: f64) {
        self.min = min;
        self.max = max;
    }

    /// Bounds with limits applied, used for layout and tick generation.
    pub fn clamped_bounds(&self) -> (f64, f64) {
        let mut c_min = self.min;
        let mut c_max = self.max;
        if let Some(l) = self.min_limit {
            if c_min < l {
                c_min = l;
            }
            if c_max < l {
                c_max = l;
            }
        }
        if let Some(l) = self.max_limit {
            if c_max > l {
                c_max = l;
            }
            if c_min > l {
                c_min = l;
            }
        }
        (c_min, c_max)
    }

    /// Ticks for the current domain, recomputed only when the domain moved by
    /// more than 0.1% of its span since the last computation.
    pub fn ticks(&mut self, count: usize) -> &[f64] {
        let (min, max) = self.clamped_bounds();
        let span = max - min;
        let domain_changed = (min - self.last_tick_domain.0).abs() > span * 0.001
            || (max - self.last_tick_domain.1).abs() > span * 0.001;

        if domain_changed || self.cached_ticks.is_empty() {
            self.cached_ticks = LinearScale::new((min, max), (0.0, 1.0)).ticks(count);
            self.last_tick_domain = (min, max);
        }
        &self.cached_ticks
    }
}

/// A chart axis: kind, data range, the series registered against it, and the
/// pixel-space scale produced by the layout phase.
pub struct AxisModel {
    pub kind: AxisKind,
    pub range: AxisRange,
    /// Range fixed by the embedder; auto-ranging leaves it untouched.
    pub explicit_range: bool,
    /// Series ids re-registered on every create phase.
    pub registered: Vec<String>,
    /// Set by the layout phase once a measured size is available.
    pub scale: Option<LinearScale>,
}

impl AxisModel {
    pub fn new(kind: AxisKind) -> Self {
        Self {
            kind,
            range: AxisRange::new(0.0, 1.0),
            explicit_range: false,
            registered: Vec::new(),
            scale: None,
        }
    }

    pub fn with_range(kind: AxisKind, min: f64, max: f64) -> Self {
        let mut axis = Self::new(kind);
        axis.range.set(min, max);
        axis.explicit_range = true;
        axis
    }

    /// Widen the data range to cover `(min, max)` unless the range is
    /// explicit. The first contribution replaces the placeholder range.
    pub fn accumulate(&mut self, min: f64, max: f64, first: bool) {
        if self.explicit_range {
            return;
        }
        if first {
            self.range.set(min, max);
        } else {
            self.range.min = self.range.min.min(min);
            self.range.max = self.range.max.max(max);
        }
    }

    /// Recompute the pixel-space scale for a plot span of `pixels`.
    /// `inverted` flips the range for Y axes (pixel 0 at the top).
    pub fn layout(&mut self, pixels: f32, inverted: bool) {
        let domain = self.range.clamped_bounds();
        let range = if inverted {
            (pixels, 0.0)
        } else {
            (0.0, pixels)
        };
        self.scale = Some(LinearScale::new(domain, range));
        self.range.ticks(8);
    }
}
