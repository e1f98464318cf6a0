//! Selection recoloring: patches only the affected pixels of the surface
//! instead of repainting.
//!
//! The selection write replays the original byte-stream behavior exactly: one
//! channel byte per set entry, with a rolling B,G,R,A cursor that advances per
//! written byte and wraps after every 4th write regardless of pixel
//! boundaries. When occlusion skips bytes mid-iteration, every later pixel of
//! the same call is phase-shifted. That quirk is intentional and pinned by
//! tests; do not "fix" it here.

use tracing::trace;

use crate::data_types::{PlotPoint, Rgba};
use crate::raster::draw;
use crate::raster::{OcclusionIndex, PlotSurface};
use crate::series::{RasterCell, RasterKind};
use crate::transform::PlotTransform;

/// Overwrite the series' non-occluded bytes with the selection brush.
pub fn apply_selection(
    surface: &mut PlotSurface,
    cell: &RasterCell,
    occlusion: &OcclusionIndex,
    color: Rgba,
) {
    let channels = color.bgra();
    // The cursor counts written bytes; skipped entries do not advance it.
    let mut written = 0usize;

    for &off in cell.set() {
        if occlusion.is_occluded(off) {
            continue;
        }
        surface.write_byte(off, channels[written & 3]);
        written += 1;
    }

    trace!(written, occluded = cell.set().len() - written, "selection applied");
    surface.commit();
}

/// Restore a discrete series to its per-point interior colors by re-deriving
/// which logical point produced each owned, non-occluded byte.
pub fn apply_reset_discrete(
    surface: &mut PlotSurface,
    transform: &PlotTransform,
    points: &[PlotPoint],
    color_at: impl Fn(usize) -> Rgba,
    kind: RasterKind,
    cell: &RasterCell,
    occlusion: &OcclusionIndex,
) {
    let mut projected = Vec::new();
    transform.project_points(points, &mut projected);
    let zero = transform.y_scale.map(0.0) as i32;

    for (i, &p) in projected.iter().enumerate() {
        let channels = color_at(i).bgra();
        draw::point_offsets(transform, p, zero, kind, |off| {
            for c in 0..4u32 {
                let byte = off + c;
                if cell.set().contains(&byte) && !occlusion.is_occluded(byte) {
                    surface.write_byte(byte, channels[c as usize]);
                }
            }
        });
    }

    surface.commit();
}

/// Restore a continuous series by re-rendering it whole; per-pixel color
/// re-derivation is more expensive than one rasterization pass for
/// continuous interiors.
pub fn apply_reset_continuous(
    surface: &mut PlotSurface,
    transform: &PlotTransform,
    points: &[PlotPoint],
    color: Rgba,
    width: u32,
    occlusion: &OcclusionIndex,
) {
    draw::rerender_line(surface, transform, points, color, width, |byte| {
        occlusion.is_occluded(byte)
    });
    surface.commit();
}
