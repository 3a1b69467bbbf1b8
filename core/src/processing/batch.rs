use log::{debug, error, info};
use rayon::prelude::*;

use crate::catalog::{EventRecord, PhaseClass};
use crate::math::Geodesic;
use crate::prelude::{PipelineResult, RowSink};
use crate::processing::extractor::{ArrivalExtractor, ClassifiedRow};
use crate::telemetry::MetricsSnapshot;

/// Runs the extractor over a whole catalog and routes rows to one sink per class.
pub struct EventBatchProcessor<'a, D> {
    extractor: ArrivalExtractor<'a, D>,
}

impl<'a, D: Geodesic> EventBatchProcessor<'a, D> {
    pub fn new(extractor: ArrivalExtractor<'a, D>) -> Self {
        Self { extractor }
    }

    pub fn extractor(&self) -> &ArrivalExtractor<'a, D> {
        &self.extractor
    }

    /// Processes events strictly in order. Events that fail are logged and
    /// skipped; only sink failures abort the batch.
    pub fn run<'e, I, F, S>(
        &self,
        events: I,
        first: &mut F,
        second: &mut S,
    ) -> PipelineResult<MetricsSnapshot>
    where
        I: IntoIterator<Item = &'e EventRecord>,
        F: RowSink + ?Sized,
        S: RowSink + ?Sized,
    {
        for event in events {
            match self.extractor.extract(event) {
                Ok(rows) => {
                    for classified in rows {
                        route(classified, first, second)?;
                    }
                    self.extractor.metrics().record_event();
                    debug!("processed event {}", event.resource_id);
                }
                Err(err) => {
                    error!("skipping event: {}", err);
                    self.extractor.metrics().record_event_error();
                }
            }
        }
        self.finish(first, second)
    }

    /// Extracts events on the rayon pool, one private buffer per event, then
    /// drains the buffers into the sinks in catalog order.
    pub fn run_parallel<F, S>(
        &self,
        events: &[EventRecord],
        first: &mut F,
        second: &mut S,
    ) -> PipelineResult<MetricsSnapshot>
    where
        D: Sync,
        F: RowSink + ?Sized,
        S: RowSink + ?Sized,
    {
        let buffers: Vec<Vec<ClassifiedRow>> = events
            .par_iter()
            .map(|event| match self.extractor.extract(event) {
                Ok(rows) => {
                    let buffer: Vec<ClassifiedRow> = rows.collect();
                    self.extractor.metrics().record_event();
                    debug!("processed event {}", event.resource_id);
                    buffer
                }
                Err(err) => {
                    error!("skipping event: {}", err);
                    self.extractor.metrics().record_event_error();
                    Vec::new()
                }
            })
            .collect();

        for classified in buffers.into_iter().flatten() {
            route(classified, first, second)?;
        }
        self.finish(first, second)
    }

    fn finish<F, S>(&self, first: &mut F, second: &mut S) -> PipelineResult<MetricsSnapshot>
    where
        F: RowSink + ?Sized,
        S: RowSink + ?Sized,
    {
        first.finish()?;
        second.finish()?;

        let summary = self.extractor.metrics().snapshot();
        info!(
            "gathered {} {} rows and {} {} rows from {} events ({} failed, {} arrivals skipped)",
            summary.first_phase_rows,
            self.extractor.waves().first(),
            summary.second_phase_rows,
            self.extractor.waves().second(),
            summary.events_processed,
            summary.events_failed,
            summary.skipped()
        );
        Ok(summary)
    }
}

fn route<F, S>((row, class): ClassifiedRow, first: &mut F, second: &mut S) -> PipelineResult<()>
where
    F: RowSink + ?Sized,
    S: RowSink + ?Sized,
{
    match class {
        PhaseClass::First => first.push(&row),
        PhaseClass::Second => second.push(&row),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{ArrivalRow, WavePair};
    use crate::math::GridSpec;
    use crate::processing::extractor::fixtures::{event, stations};

    fn catalog() -> Vec<EventRecord> {
        let mut broken = event("ev-broken", &[("NEAR", "P", 5.0)]);
        broken.preferred_origin_id = None;
        vec![
            event("ev1", &[("NEAR", "P", 10.0), ("MID", "S", 300.0)]),
            broken,
            event(
                "ev2",
                &[("MID", "P", 200.0), ("GONE", "S", 1.0), ("NEAR", "S", 18.0)],
            ),
        ]
    }

    #[test]
    fn rows_are_routed_by_class_in_event_order() {
        let stations = stations();
        let processor = EventBatchProcessor::new(ArrivalExtractor::new(
            &stations,
            GridSpec::default(),
            WavePair::default(),
        ));
        let events = catalog();
        let mut first: Vec<ArrivalRow> = Vec::new();
        let mut second: Vec<ArrivalRow> = Vec::new();

        let summary = processor.run(&events, &mut first, &mut second).unwrap();

        assert_eq!(first.len(), 2);
        assert_eq!(second.len(), 2);
        assert!((first[0].observed_tt - 10.0).abs() < 1e-9);
        assert!((first[1].observed_tt - 200.0).abs() < 1e-9);
        assert!((second[0].observed_tt - 300.0).abs() < 1e-9);
        assert!(second.iter().all(|row| row.phase_code == PhaseClass::Second));

        assert_eq!(summary.events_processed, 2);
        assert_eq!(summary.events_failed, 1);
        assert_eq!(summary.unknown_station, 1);
    }

    #[test]
    fn parallel_run_matches_sequential_output() {
        let stations = stations();
        let events = catalog();

        let sequential = EventBatchProcessor::new(ArrivalExtractor::new(
            &stations,
            GridSpec::default(),
            WavePair::default(),
        ));
        let mut seq_first: Vec<ArrivalRow> = Vec::new();
        let mut seq_second: Vec<ArrivalRow> = Vec::new();
        sequential
            .run(&events, &mut seq_first, &mut seq_second)
            .unwrap();

        let parallel = EventBatchProcessor::new(ArrivalExtractor::new(
            &stations,
            GridSpec::default(),
            WavePair::default(),
        ));
        let mut par_first: Vec<ArrivalRow> = Vec::new();
        let mut par_second: Vec<ArrivalRow> = Vec::new();
        let summary = parallel
            .run_parallel(&events, &mut par_first, &mut par_second)
            .unwrap();

        assert_eq!(seq_first, par_first);
        assert_eq!(seq_second, par_second);
        assert_eq!(summary.events_failed, 1);
    }

    #[test]
    fn other_wave_pair_selects_other_phases() {
        let stations = stations();
        let processor = EventBatchProcessor::new(ArrivalExtractor::new(
            &stations,
            GridSpec::default(),
            WavePair::parse("Pn Sn").unwrap(),
        ));
        let events = vec![event("ev1", &[("NEAR", "Pn", 10.0), ("NEAR", "P", 9.0)])];
        let mut first: Vec<ArrivalRow> = Vec::new();
        let mut second: Vec<ArrivalRow> = Vec::new();

        processor.run(&events, &mut first, &mut second).unwrap();
        assert_eq!(first.len(), 1);
        assert!(second.is_empty());
    }
}
