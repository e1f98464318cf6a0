//! Coordinate projection and pixel-offset math for the raster path.

use rayon::prelude::*;

use crate::data_types::PlotPoint;
use crate::scales::LinearScale;

/// Above this many points, batch projection fans out across rayon.
const PAR_THRESHOLD: usize = 16_384;

/// Projects data coordinates into the plot rectangle's pixel space.
#[derive(Clone, Debug)]
pub struct PlotTransform {
    pub x_scale: LinearScale,
    pub y_scale: LinearScale,
    pub width: u32,
    pub height: u32,
}

impl PlotTransform {
    pub fn new(x_scale: LinearScale, y_scale: LinearScale, width: u32, height: u32) -> Self {
        Self {
            x_scale,
            y_scale,
            width,
            height,
        }
    }

    #[inline]
    pub fn data_to_pixel(&self, x: f64, y: f64) -> (f32, f32) {
        (self.x_scale.map(x), self.y_scale.map(y))
    }

    #[inline]
    pub fn pixel_to_data(&self, px: f32, py: f32) -> (f64, f64) {
        (self.x_scale.invert(px), self.y_scale.invert(py))
    }

    /// Byte offset of pixel `(x, y)` in a BGRA buffer, or `None` when the
    /// pixel lies outside the plot rectangle.
    #[inline]
    pub fn offset_of(&self, x: i32, y: i32) -> Option<u32> {
        if x < 0 || y < 0 || x as u32 >= self.width || y as u32 >= self.height {
            return None;
        }
        Some((y as u32 * self.width + x as u32) * 4)
    }

    /// Batch projection of points into integer pixel coordinates. Scalar
    /// work is unrolled in blocks of four for auto-vectorization; large
    /// inputs are split across rayon.
    pub fn project_points(&self, points: &[PlotPoint], output: &mut Vec<(i32, i32)>) {
        let (xm, xc) = self.x_scale.coeffs();
        let (ym, yc) = self.y_scale.coeffs();

        output.clear();
        output.reserve(points.len());
        if points.len() >= PAR_THRESHOLD {
            let parts: Vec<Vec<(i32, i32)>> = points
                .par_chunks(PAR_THRESHOLD / 4)
                .map(|chunk| {
                    let mut part = Vec::with_capacity(chunk.len());
                    project_chunk(chunk, xm, xc, ym, yc, &mut part);
                    part
                })
                .collect();
            for part in parts {
                output.extend_from_slice(&part);
            }
            return;
        }
        project_chunk(points, xm, xc, ym, yc, output);
    }
}

fn project_chunk(
    points: &[PlotPoint],
    xm: f32,
    xc: f32,
    ym: f32,
    yc: f32,
    output: &mut Vec<(i32, i32)>,
) {
    let chunks = points.chunks_exact(4);
    let rem = chunks.remainder();

    for c in chunks {
        let p0 = ((c[0].x as f32 * xm + xc), (c[0].y as f32 * ym + yc));
        let p1 = ((c[1].x as f32 * xm + xc), (c[1].y as f32 * ym + yc));
        let p2 = ((c[2].x as f32 * xm + xc), (c[2].y as f32 * ym + yc));
        let p3 = ((c[3].x as f32 * xm + xc), (c[3].y as f32 * ym + yc));
        output.push((p0.0 as i32, p0.1 as i32));
        output.push((p1.0 as i32, p1.1 as i32));
        output.push((p2.0 as i32, p2.1 as i32));
        output.push((p3.0 as i32, p3.1 as i32));
    }
    for p in rem {
        let sx = p.x as f32 * xm + xc;
        let sy = p.y as f32 * ym + yc;
        output.push((sx as i32, sy as i32));
    }
}
