// High-density raster path: persistent pixel buffer, per-series occlusion
// accounting, and in-place selection patching.

pub mod draw;
pub mod occlusion;
pub mod recolor;
pub mod surface;

pub use occlusion::OcclusionIndex;
pub use surface::PlotSurface;
