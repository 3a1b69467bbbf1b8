use log::{info, warn};
use std::fs::File;
use std::path::Path;

use crate::catalog::{StationRecord, StationTable};
use crate::prelude::{PipelineError, PipelineResult};

/// Reads a station CSV with a header row containing at least
/// `station_code`, `latitude` and `longitude`.
pub fn read_station_file<P: AsRef<Path>>(path: P) -> PipelineResult<Vec<StationRecord>> {
    let path = path.as_ref();
    if !path.is_file() {
        return Err(PipelineError::MissingInput(path.to_path_buf()));
    }
    let file = File::open(path).map_err(|source| PipelineError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(file);
    let records = reader
        .deserialize()
        .collect::<Result<Vec<StationRecord>, _>>()?;
    info!("read {} stations from {}", records.len(), path.display());
    Ok(records)
}

/// Builds the lookup table from several inventories; later files win.
pub fn load_station_table<P: AsRef<Path>>(paths: &[P]) -> PipelineResult<StationTable> {
    let sources = paths
        .iter()
        .map(read_station_file)
        .collect::<PipelineResult<Vec<_>>>()?;
    let table = StationTable::merged(sources);
    if table.is_empty() {
        warn!("station table is empty; every arrival will be skipped");
    } else {
        info!("station table holds {} unique codes", table.len());
    }
    Ok(table)
}
