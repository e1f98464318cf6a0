/// Linear data-to-pixel scale. Replaces the scale/tick duties the view layer
/// used to delegate to its charting toolkit.
#[derive(Clone, Debug, PartialEq)]
pub struct LinearScale {
    domain: (f64, f64),
    range: (f32, f32),
}

impl LinearScale {
    pub fn new(domain: (f64, f64), range: (f32, f32)) -> Self {
        let (mut d_min, mut d_max) = domain;
        // Degenerate domains are widened so map/invert stay finite.
        if (d_max - d_min).abs() < f64::EPSILON {
            d_min -= 0.5;
            d_max += 0.5;
        }
        Self {
            domain: (d_min, d_max),
            range,
        }
    }

    pub fn domain(&self) -> (f64, f64) {
        self.domain
    }

    pub fn range(&self) -> (f32, f32) {
        self.range
    }

    pub fn map(&self, value: f64) -> f32 {
        let (d_min, d_max) = self.domain;
        let (r_min, r_max) = self.range;
        let pct = (value - d_min) / (d_max - d_min);
        let res = (r_min as f64 + pct * (r_max - r_min) as f64) as f32;
        if res.is_nan() || res.is_infinite() {
            0.0
        } else {
            res
        }
    }

    pub fn invert(&self, pixel: f32) -> f64 {
        let (d_min, d_max) = self.domain;
        let (r_min, r_max) = self.range;
        let denom = (r_max - r_min) as f64;
        if denom == 0.0 {
            return d_min;
        }
        let pct = (pixel - r_min) as f64 / denom;
        d_min + pct * (d_max - d_min)
    }

    /// Returns `(m, c)` such that `pixel = value * m + c`, for batch
    /// projection paths.
    pub fn coeffs(&self) -> (f32, f32) {
        let (d_min, d_max) = self.domain;
        let (r_min, r_max) = self.range;
        let m = (r_max - r_min) as f64 / (d_max - d_min);
        let c = r_min as f64 - m * d_min;
        (m as f32, c as f32)
    }

    /// Round tick values covering the domain, at most `count + 1` of them,
    /// stepped on a 1-2-5 progression.
    pub fn ticks(&self, count: usize) -> Vec<f64> {
        let (min, max) = self.domain;
        let span = max - min;
        if !span.is_finite() || span <= 0.0 || count == 0 {
            return Vec::new();
        }

        let raw_step = span / count as f64;
        let magnitude = 10f64.powf(raw_step.log10().floor());
        let residual = raw_step / magnitude;
        let step = if residual > 5.0 {
            10.0 * magnitude
        } else if residual > 2.0 {
            5.0 * magnitude
        } else if residual > 1.0 {
            2.0 * magnitude
        } else {
            magnitude
        };

        // Index-based generation keeps ticks inside the domain and free of
        // accumulated addition error.
        let first = (min / step).ceil();
        let last = (max / step).floor();
        let mut ticks = Vec::new();
        let mut i = first;
        while i <= last {
            ticks.push(i * step);
            i += 1.0;
        }
        ticks
    }
}
