use crate::series::Series;

/// Pointer-to-data mapping for tooltips, independent of any toolkit so it
/// can be tested directly. Hit-testing goes through the inverse transform
/// and a binary search over the generated points, never through the pixel
/// buffer.
pub struct HitTester;

impl HitTester {
    /// Maps a pixel position to a value in a given domain.
    pub fn map_pixels_to_value(
        pixels: f32,
        total_pixels: f32,
        min_val: f64,
        max_val: f64,
        invert: bool,
    ) -> f64 {
        if total_pixels <= 0.0 {
            return min_val;
        }
        let pct = (pixels / total_pixels).clamp(0.0, 1.0) as f64;
        let effective_pct = if invert { 1.0 - pct } else { pct };
        min_val + (max_val - min_val) * effective_pct
    }

    /// Nearest tooltip-enabled point across all visible series: returns
    /// `(series index, point index)` minimizing the X distance.
    pub fn nearest_point(series: &[Series], x: f64) -> Option<(usize, usize)> {
        let mut best: Option<(usize, usize, f64)> = None;
        for (series_idx, s) in series.iter().enumerate() {
            if !s.visible {
                continue;
            }
            let model = s.model.read();
            if !model.wants_tooltip() {
                continue;
            }
            let Some(point_idx) = model.nearest_index(x) else {
                continue;
            };
            let Some(point) = model.points().get(point_idx) else {
                continue;
            };
            let dist = (point.x - x).abs();
            match best {
                Some((_, _, best_dist)) if best_dist <= dist => {}
                _ => best = Some((series_idx, point_idx, dist)),
            }
        }
        best.map(|(s, p, _)| (s, p))
    }
}
