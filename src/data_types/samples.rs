use super::data::{DataExtent, PlotPoint};

const CHUNK_SIZE: usize = 512;

#[derive(Clone, Copy, Debug)]
struct ChunkBounds {
    x_min: f64,
    x_max: f64,
    y_min: f64,
    y_max: f64,
}

impl ChunkBounds {
    fn empty() -> Self {
        Self {
            x_min: f64::INFINITY,
            x_max: f64::NEG_INFINITY,
            y_min: f64::INFINITY,
            y_max: f64::NEG_INFINITY,
        }
    }

    fn absorb(&mut self, p: &PlotPoint) {
        self.x_min = self.x_min.min(p.x);
        self.x_max = self.x_max.max(p.x);
        self.y_min = self.y_min.min(p.y);
        self.y_max = self.y_max.max(p.y);
    }
}

/// Sample storage shared by the concrete series types. Keeps a per-chunk
/// bounds cache so extent and windowed range queries do not rescan every
/// sample. Samples are expected sorted by X; `iter_range` binary-searches on
/// that assumption.
#[derive(Default)]
pub struct SampleStore {
    data: Vec<PlotPoint>,
    bounds_cache: Vec<ChunkBounds>,
}

impl SampleStore {
    pub fn new(data: Vec<PlotPoint>) -> Self {
        let mut store = Self {
            data,
            bounds_cache: Vec::new(),
        };
        store.rebuild_cache();
        store
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn samples(&self) -> &[PlotPoint] {
        &self.data
    }

    pub fn push(&mut self, p: PlotPoint) {
        self.data.push(p);
        if self.data.len() % CHUNK_SIZE == 1 {
            self.bounds_cache.push(ChunkBounds::empty());
        }
        if let Some(last) = self.bounds_cache.last_mut() {
            last.absorb(&self.data[self.data.len() - 1]);
        }
    }

    pub fn replace(&mut self, data: Vec<PlotPoint>) {
        self.data = data;
        self.rebuild_cache();
    }

    fn rebuild_cache(&mut self) {
        self.bounds_cache.clear();
        for chunk in self.data.chunks(CHUNK_SIZE) {
            let mut bounds = ChunkBounds::empty();
            for p in chunk {
                if p.y.is_nan() {
                    continue;
                }
                bounds.absorb(p);
            }
            self.bounds_cache.push(bounds);
        }
    }

    /// Extent over all samples, or `None` when empty.
    pub fn bounds(&self) -> Option<DataExtent> {
        if self.bounds_cache.is_empty() {
            return None;
        }
        let mut b = (
            f64::INFINITY,
            f64::NEG_INFINITY,
            f64::INFINITY,
            f64::NEG_INFINITY,
        );
        for c in &self.bounds_cache {
            b.0 = b.0.min(c.x_min);
            b.1 = b.1.max(c.x_max);
            b.2 = b.2.min(c.y_min);
            b.3 = b.3.max(c.y_max);
        }
        if b.0.is_infinite() {
            return None;
        }
        Some(b)
    }

    /// Y extent within an X window. Whole chunks inside the window are
    /// answered from the cache; boundary chunks are scanned.
    pub fn y_range(&self, x_min: f64, x_max: f64) -> Option<(f64, f64)> {
        if self.data.is_empty() {
            return None;
        }
        let mut y_min = f64::INFINITY;
        let mut y_max = f64::NEG_INFINITY;
        let mut found = false;

        for (i, chunk) in self.bounds_cache.iter().enumerate() {
            // Chunks that never absorbed a finite sample keep inverted bounds.
            if chunk.x_min > chunk.x_max {
                continue;
            }
            if chunk.x_max < x_min || chunk.x_min > x_max {
                continue;
            }
            if chunk.x_min >= x_min && chunk.x_max <= x_max {
                y_min = y_min.min(chunk.y_min);
                y_max = y_max.max(chunk.y_max);
                found = true;
                continue;
            }
            let start = i * CHUNK_SIZE;
            let end = (start + CHUNK_SIZE).min(self.data.len());
            for p in &self.data[start..end] {
                if p.y.is_nan() {
                    continue;
                }
                if p.x >= x_min && p.x <= x_max {
                    y_min = y_min.min(p.y);
                    y_max = y_max.max(p.y);
                    found = true;
                }
            }
        }

        if found {
            Some((y_min, y_max))
        } else {
            None
        }
    }

    /// Samples within an X window, padded by one point on each side for line
    /// continuity at the edges.
    pub fn range(&self, x_min: f64, x_max: f64) -> &[PlotPoint] {
        let start_idx = self.data.partition_point(|p| p.x < x_min);
        let end_idx = self.data.partition_point(|p| p.x <= x_max);

        let start = start_idx.saturating_sub(1);
        let end = (end_idx + 1).min(self.data.len());
        &self.data[start..end]
    }

    /// Index of the sample whose X is nearest to `x`.
    pub fn nearest_index(&self, x: f64) -> Option<usize> {
        nearest_in(&self.data, x)
    }
}

/// Index of the point nearest to `x` in a slice sorted by X.
pub fn nearest_in(points: &[PlotPoint], x: f64) -> Option<usize> {
    if points.is_empty() {
        return None;
    }
    let idx = points.partition_point(|p| p.x < x);
    if idx == 0 {
        return Some(0);
    }
    if idx >= points.len() {
        return Some(points.len() - 1);
    }
    let before = &points[idx - 1];
    let after = &points[idx];
    if (x - before.x).abs() <= (after.x - x).abs() {
        Some(idx - 1)
    } else {
        Some(idx)
    }
}
