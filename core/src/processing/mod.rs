pub mod batch;
pub mod dedup;
pub mod extractor;
pub mod matcher;

pub use batch::EventBatchProcessor;
pub use dedup::DedupFilter;
pub use extractor::{ArrivalExtractor, ClassifiedRow, EventArrivals, MAX_DISTANCE_DEGREES};
pub use matcher::{MatchedRows, PhaseMatcher};
