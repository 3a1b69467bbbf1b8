//! Block indexing and arrival matching for 3-D travel-time tomography inputs.
//!
//! Events and stations are mapped onto a longitude/latitude/depth block grid,
//! arrivals are split by wave type, reduced to one median observation per
//! source/station block pair and finally restricted to block pairs seen for
//! both wave types.

pub mod catalog;
pub mod io;
pub mod math;
pub mod prelude;
pub mod processing;
pub mod telemetry;

pub use prelude::{EventError, PipelineError, PipelineResult, RowSink};
