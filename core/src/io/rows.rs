use std::fs::File;
use std::path::{Path, PathBuf};

use crate::catalog::{ArrivalRow, COLUMN_NAMES};
use crate::prelude::{PipelineError, PipelineResult, RowSink};

fn open(path: &Path) -> PipelineResult<File> {
    if !path.exists() {
        return Err(PipelineError::MissingInput(path.to_path_buf()));
    }
    File::open(path).map_err(|source| PipelineError::Io {
        path: path.to_path_buf(),
        source,
    })
}

fn create(path: &Path) -> PipelineResult<csv::Writer<File>> {
    let file = File::create(path).map_err(|source| PipelineError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(csv::WriterBuilder::new().has_headers(false).from_writer(file))
}

/// Headerless CSV sink used for gather output. The underlying writer
/// flushes on drop, so rows written before an early return still land.
pub struct CsvRowSink {
    path: PathBuf,
    writer: csv::Writer<File>,
    rows: usize,
}

impl CsvRowSink {
    pub fn create<P: AsRef<Path>>(path: P) -> PipelineResult<Self> {
        let path = path.as_ref().to_path_buf();
        let writer = create(&path)?;
        Ok(Self {
            path,
            writer,
            rows: 0,
        })
    }

    pub fn rows(&self) -> usize {
        self.rows
    }
}

impl RowSink for CsvRowSink {
    fn push(&mut self, row: &ArrivalRow) -> PipelineResult<()> {
        self.writer.write_record(row.fields())?;
        self.rows += 1;
        Ok(())
    }

    fn finish(&mut self) -> PipelineResult<()> {
        self.writer.flush().map_err(|source| PipelineError::Io {
            path: self.path.clone(),
            source,
        })
    }
}

/// Reads a headerless row file as written by [`CsvRowSink`] or [`write_rows`].
pub fn read_rows<P: AsRef<Path>>(path: P) -> PipelineResult<Vec<ArrivalRow>> {
    let file = open(path.as_ref())?;
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .from_reader(file);
    let rows = reader.deserialize().collect::<Result<Vec<ArrivalRow>, _>>()?;
    Ok(rows)
}

/// Writes rows without header or index.
pub fn write_rows<P: AsRef<Path>>(path: P, rows: &[ArrivalRow]) -> PipelineResult<()> {
    let mut sink = CsvRowSink::create(path)?;
    for row in rows {
        sink.push(row)?;
    }
    sink.finish()
}

/// Writes a header line and, ahead of each row, an unnamed index column
/// holding the row's position in the file it was read from. Positions are
/// checked against `rows` before the file is created.
pub fn write_indexed_rows<P: AsRef<Path>>(
    path: P,
    rows: &[ArrivalRow],
    positions: &[usize],
) -> PipelineResult<()> {
    if let Some(&position) = positions.iter().find(|&&p| p >= rows.len()) {
        return Err(PipelineError::RowOutOfRange {
            position,
            rows: rows.len(),
        });
    }
    let path = path.as_ref();
    let mut writer = create(path)?;
    writer.write_record(std::iter::once("").chain(COLUMN_NAMES))?;
    for &position in positions {
        let fields = rows[position].fields();
        writer.write_record(std::iter::once(position.to_string()).chain(fields))?;
    }
    writer.flush().map_err(|source| PipelineError::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// Reads a file with a header row; columns are matched by name and any
/// others, such as the index column, are ignored.
pub fn read_indexed_rows<P: AsRef<Path>>(path: P) -> PipelineResult<Vec<ArrivalRow>> {
    let file = open(path.as_ref())?;
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_reader(file);
    let rows = reader.deserialize().collect::<Result<Vec<ArrivalRow>, _>>()?;
    Ok(rows)
}
