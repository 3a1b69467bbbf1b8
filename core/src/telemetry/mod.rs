pub mod log;
pub mod metrics;

pub use self::log::{LogManager, SkipReason};
pub use self::metrics::{MetricsRecorder, MetricsSnapshot};
