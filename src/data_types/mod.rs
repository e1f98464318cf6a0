pub mod axis;
pub mod configs;
pub mod data;
pub mod samples;

pub use axis::*;
pub use configs::*;
pub use data::*;
pub use samples::*;
