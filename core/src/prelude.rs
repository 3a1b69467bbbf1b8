use std::path::PathBuf;

pub use crate::catalog::{ArrivalRow, PhaseClass, WavePair};
pub use crate::math::block::GridSpec;

/// Fatal error for a whole pipeline operation (gather, sort or match).
#[derive(thiserror::Error, Debug)]
pub enum PipelineError {
    #[error("i/o failure on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("csv failure: {0}")]
    Csv(#[from] csv::Error),
    #[error("malformed catalog file {path}: {source}")]
    Catalog {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("invalid grid: {0}")]
    InvalidGrid(String),
    #[error("invalid wave type pair: {0}")]
    InvalidWavePair(String),
    #[error("missing input: {0}")]
    MissingInput(PathBuf),
    #[error("no catalog files in {0}")]
    EmptyCatalog(PathBuf),
    #[error("row position {position} out of range for {rows} rows")]
    RowOutOfRange { position: usize, rows: usize },
}

pub type PipelineResult<T> = Result<T, PipelineError>;

/// Error raised for a single event; the batch logs it and moves on.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum EventError {
    #[error("event {0} has no preferred origin")]
    MissingPreferredOrigin(String),
    #[error("event {event} refers to unknown origin {origin}")]
    UnknownOrigin { event: String, origin: String },
    #[error("event {0} has no creation time")]
    MissingCreationTime(String),
}

/// Receives classified rows; one sink per wave-type class.
pub trait RowSink {
    fn push(&mut self, row: &ArrivalRow) -> PipelineResult<()>;

    /// Flushes buffered rows. Sinks must also flush when dropped.
    fn finish(&mut self) -> PipelineResult<()> {
        Ok(())
    }
}

impl RowSink for Vec<ArrivalRow> {
    fn push(&mut self, row: &ArrivalRow) -> PipelineResult<()> {
        Vec::push(self, row.clone());
        Ok(())
    }
}
