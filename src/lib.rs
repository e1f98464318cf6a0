//! fastchart: incremental bitmap charting engine.
//!
//! Turns a collection of data series into a persistent BGRA pixel buffer.
//! Mutations funnel through [`ChartEngine::request_update`], which coalesces
//! them into one deferred pass (point generation -> range update -> layout ->
//! paint); high-density series paint straight into the buffer and selection
//! changes patch only the affected pixels. The hosting toolkit is abstracted
//! behind the traits in [`host`].

pub mod data_types;
pub mod engine;
pub mod flags;
pub mod hittest;
pub mod host;
pub mod raster;
pub mod scales;
pub mod series;
pub mod theme;
pub mod transform;
pub mod utils;

pub use data_types::{AxisKind, AxisModel, AxisRange, PlotPoint, Rgba, ValueKind};
pub use engine::{ChartEngine, EngineState};
pub use flags::ChangeFlags;
pub use host::{DisplayHost, LocalQueue, MemoryHost, RasterTarget, UpdateDispatcher};
pub use series::{
    FastColumnSeries, FastLineSeries, FastScatterSeries, Series, SeriesModel, SeriesRole,
};
pub use theme::ChartTheme;
