pub mod arrival;
pub mod event;
pub mod station;

pub use arrival::{
    ArrivalRow, BlockPair, PhaseClass, WavePair, COLUMN_NAMES, SUPPORTED_WAVE_PAIRS,
};
pub use event::{Arrival, EventRecord, Origin, Pick};
pub use station::{StationRecord, StationTable};
