use crate::workflow::config::GatherConfig;
use anyhow::Context;
use blockcore::io::{
    load_catalog, load_station_table, read_indexed_rows, read_rows, write_indexed_rows, write_rows,
    CsvRowSink,
};
use blockcore::processing::{ArrivalExtractor, DedupFilter, EventBatchProcessor, PhaseMatcher};
use blockcore::telemetry::MetricsSnapshot;
use log::info;
use std::path::{Path, PathBuf};

pub struct GatherResult {
    pub first_path: PathBuf,
    pub second_path: PathBuf,
    pub summary: MetricsSnapshot,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortResult {
    pub input_rows: usize,
    pub kept_rows: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatchResult {
    pub first_rows: usize,
    pub second_rows: usize,
}

#[derive(Clone)]
pub struct Runner {
    config: GatherConfig,
}

impl Runner {
    pub fn new(config: GatherConfig) -> Self {
        Self { config }
    }

    /// Writes one headerless arrivals file per wave type for every event in
    /// `events_dir`.
    pub fn gather(&self, events_dir: &Path) -> anyhow::Result<GatherResult> {
        info!("gathering all arrivals");
        let grid = self.config.grid()?;
        let station_files = self.config.station_files();
        let stations = load_station_table(&station_files).context("reading station inventory")?;
        let events = load_catalog(events_dir)
            .with_context(|| format!("reading event catalog {}", events_dir.display()))?;

        let (first_path, second_path) = self.config.output_paths();
        let mut first = CsvRowSink::create(&first_path)
            .with_context(|| format!("creating {}", first_path.display()))?;
        let mut second = CsvRowSink::create(&second_path)
            .with_context(|| format!("creating {}", second_path.display()))?;

        let processor = EventBatchProcessor::new(ArrivalExtractor::new(
            &stations,
            grid,
            self.config.wave_type.clone(),
        ));
        let summary = if self.config.parallel {
            processor.run_parallel(&events, &mut first, &mut second)
        } else {
            processor.run(&events, &mut first, &mut second)
        }
        .context("writing gathered arrivals")?;

        info!(
            "gathered all arrivals into {} and {}",
            first_path.display(),
            second_path.display()
        );
        Ok(GatherResult {
            first_path,
            second_path,
            summary,
        })
    }
}

/// Keeps the median-travel-time row per block pair of a gathered file.
pub fn sort_file(input: &Path, sorted_file: &Path) -> anyhow::Result<SortResult> {
    let rows = read_rows(input).with_context(|| format!("reading arrivals {}", input.display()))?;
    let positions = DedupFilter::positions(&rows);
    write_indexed_rows(sorted_file, &rows, &positions)
        .with_context(|| format!("writing sorted arrivals {}", sorted_file.display()))?;

    info!(
        "kept {} of {} rows in {}",
        positions.len(),
        rows.len(),
        sorted_file.display()
    );
    Ok(SortResult {
        input_rows: rows.len(),
        kept_rows: positions.len(),
    })
}

/// Restricts two sorted files to the block pairs present in both.
pub fn match_files(
    p_file: &Path,
    s_file: &Path,
    matched_p_file: &Path,
    matched_s_file: &Path,
) -> anyhow::Result<MatchResult> {
    let p_rows = read_indexed_rows(p_file)
        .with_context(|| format!("reading sorted arrivals {}", p_file.display()))?;
    let s_rows = read_indexed_rows(s_file)
        .with_context(|| format!("reading sorted arrivals {}", s_file.display()))?;

    let matched = PhaseMatcher::apply(p_rows, s_rows);
    write_rows(matched_p_file, &matched.first)
        .with_context(|| format!("writing {}", matched_p_file.display()))?;
    write_rows(matched_s_file, &matched.second)
        .with_context(|| format!("writing {}", matched_s_file.display()))?;

    info!(
        "matched {} rows into {} and {}",
        matched.first.len(),
        matched_p_file.display(),
        matched_s_file.display()
    );
    Ok(MatchResult {
        first_rows: matched.first.len(),
        second_rows: matched.second.len(),
    })
}
