pub mod block;
pub mod geodesy;
pub mod stats;

pub use block::{block_id, GridSpec};
pub use geodesy::{Geodesic, SphericalDistance};
pub use stats::StatsHelper;
