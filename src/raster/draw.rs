//! Rasterization of series geometry into the plot surface. Every written
//! pixel registers its four byte offsets with the owning series' cell, in
//! write order; the selection recolorer later replays exactly that order.

use crate::data_types::{PlotPoint, Rgba};
use crate::raster::PlotSurface;
use crate::series::{RasterCell, RasterKind};
use crate::transform::PlotTransform;

/// Paint one series into the surface, recording offsets into its cell.
pub fn paint_series(
    surface: &mut PlotSurface,
    cell: &mut RasterCell,
    transform: &PlotTransform,
    points: &[PlotPoint],
    base_color: Rgba,
    kind: RasterKind,
) {
    let mut projected = Vec::new();
    transform.project_points(points, &mut projected);

    match kind {
        RasterKind::Scatter { marker } => {
            for (i, &(px, py)) in projected.iter().enumerate() {
                let color = points[i].color.unwrap_or(base_color);
                marker_offsets(transform, px, py, marker, |off| {
                    write_recorded(surface, cell, off, color);
                });
            }
        }
        RasterKind::Line { width } => {
            for (i, seg) in projected.windows(2).enumerate() {
                // Skip gaps introduced by non-finite samples.
                if !points[i].y.is_finite() || !points[i + 1].y.is_finite() {
                    continue;
                }
                line_offsets(transform, seg[0], seg[1], width, |off| {
                    write_recorded(surface, cell, off, base_color);
                });
            }
        }
        RasterKind::Column { width } => {
            let zero = transform.y_scale.map(0.0) as i32;
            for (i, &(px, py)) in projected.iter().enumerate() {
                let color = points[i].color.unwrap_or(base_color);
                column_offsets(transform, px, py, zero, width, |off| {
                    write_recorded(surface, cell, off, color);
                });
            }
        }
    }
}

/// Re-render a continuous series over the surface, skipping occluded bytes.
/// Used by selection reset; nothing is re-recorded.
pub fn rerender_line(
    surface: &mut PlotSurface,
    transform: &PlotTransform,
    points: &[PlotPoint],
    color: Rgba,
    width: u32,
    mut occluded: impl FnMut(u32) -> bool,
) {
    let mut projected = Vec::new();
    transform.project_points(points, &mut projected);
    let channels = color.bgra();

    for (i, seg) in projected.windows(2).enumerate() {
        if !points[i].y.is_finite() || !points[i + 1].y.is_finite() {
            continue;
        }
        line_offsets(transform, seg[0], seg[1], width, |off| {
            for c in 0..4u32 {
                let byte = off + c;
                if !occluded(byte) {
                    surface.write_byte(byte, channels[c as usize]);
                }
            }
        });
    }
}

#[inline]
fn write_recorded(surface: &mut PlotSurface, cell: &mut RasterCell, offset: u32, color: Rgba) {
    let [b, g, r, a] = color.bgra();
    surface.write(offset, b, g, r, a);
    cell.record(offset);
    cell.record(offset + 1);
    cell.record(offset + 2);
    cell.record(offset + 3);
}

/// Base byte offsets of the square marker centered on `(cx, cy)`, clipped to
/// the plot rectangle, in row-major write order.
pub fn marker_offsets(
    transform: &PlotTransform,
    cx: i32,
    cy: i32,
    marker: u32,
    mut emit: impl FnMut(u32),
) {
    let half = (marker as i32) / 2;
    let m = marker.max(1) as i32;
    for dy in 0..m {
        for dx in 0..m {
            if let Some(off) = transform.offset_of(cx - half + dx, cy - half + dy) {
                emit(off);
            }
        }
    }
}

/// Base byte offsets of a column of `width` pixels between the point's Y and
/// the zero line, clipped, top-down then left-right.
pub fn column_offsets(
    transform: &PlotTransform,
    cx: i32,
    cy: i32,
    zero_y: i32,
    width: u32,
    mut emit: impl FnMut(u32),
) {
    let half = (width as i32) / 2;
    let w = width.max(1) as i32;
    let (top, bottom) = if cy <= zero_y { (cy, zero_y) } else { (zero_y, cy) };
    for y in top..=bottom {
        for dx in 0..w {
            if let Some(off) = transform.offset_of(cx - half + dx, y) {
                emit(off);
            }
        }
    }
}

/// Base byte offsets along a Bresenham segment. Thickness is applied by
/// vertical replication, which is what a one-pass polyline pays for.
pub fn line_offsets(
    transform: &PlotTransform,
    from: (i32, i32),
    to: (i32, i32),
    width: u32,
    mut emit: impl FnMut(u32),
) {
    let (mut x0, mut y0) = from;
    let (x1, y1) = to;
    let dx = (x1 - x0).abs();
    let dy = -(y1 - y0).abs();
    let sx = if x0 < x1 { 1 } else { -1 };
    let sy = if y0 < y1 { 1 } else { -1 };
    let mut err = dx + dy;
    let w = width.max(1) as i32;
    let half = w / 2;

    loop {
        for t in 0..w {
            if let Some(off) = transform.offset_of(x0, y0 - half + t) {
                emit(off);
            }
        }
        if x0 == x1 && y0 == y1 {
            break;
        }
        let e2 = 2 * err;
        if e2 >= dy {
            err += dy;
            x0 += sx;
        }
        if e2 <= dx {
            err += dx;
            y0 += sy;
        }
    }
}

/// Recompute the base offsets a discrete point produced, identical to the
/// paint traversal. Selection reset re-derives point colors through this.
pub fn point_offsets(
    transform: &PlotTransform,
    projected: (i32, i32),
    zero_y: i32,
    kind: RasterKind,
    emit: impl FnMut(u32),
) {
    match kind {
        RasterKind::Scatter { marker } => {
            marker_offsets(transform, projected.0, projected.1, marker, emit)
        }
        RasterKind::Column { width } => {
            column_offsets(transform, projected.0, projected.1, zero_y, width, emit)
        }
        RasterKind::Line { .. } => {}
    }
}
