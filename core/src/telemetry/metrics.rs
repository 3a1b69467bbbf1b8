use std::sync::Mutex;

use crate::catalog::PhaseClass;
use crate::telemetry::log::SkipReason;

/// Counters collected while gathering; safe to share across extraction workers.
pub struct MetricsRecorder {
    inner: Mutex<MetricsSnapshot>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MetricsSnapshot {
    pub events_processed: usize,
    pub events_failed: usize,
    pub first_phase_rows: usize,
    pub second_phase_rows: usize,
    pub unknown_station: usize,
    pub unresolved_pick: usize,
    pub beyond_aperture: usize,
    pub other_phase: usize,
}

impl MetricsSnapshot {
    pub fn rows(&self) -> usize {
        self.first_phase_rows + self.second_phase_rows
    }

    pub fn skipped(&self) -> usize {
        self.unknown_station + self.unresolved_pick + self.beyond_aperture + self.other_phase
    }
}

impl MetricsRecorder {
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(MetricsSnapshot::default()),
        }
    }

    pub fn record_event(&self) {
        if let Ok(mut metrics) = self.inner.lock() {
            metrics.events_processed += 1;
        }
    }

    pub fn record_event_error(&self) {
        if let Ok(mut metrics) = self.inner.lock() {
            metrics.events_failed += 1;
        }
    }

    pub fn record_row(&self, class: PhaseClass) {
        if let Ok(mut metrics) = self.inner.lock() {
            match class {
                PhaseClass::First => metrics.first_phase_rows += 1,
                PhaseClass::Second => metrics.second_phase_rows += 1,
            }
        }
    }

    pub fn record_skip(&self, reason: &SkipReason) {
        if let Ok(mut metrics) = self.inner.lock() {
            match reason {
                SkipReason::UnknownStation(_) => metrics.unknown_station += 1,
                SkipReason::UnresolvedPick(_) => metrics.unresolved_pick += 1,
                SkipReason::BeyondAperture(_) => metrics.beyond_aperture += 1,
                SkipReason::OtherPhase(_) => metrics.other_phase += 1,
            }
        }
    }

    pub fn snapshot(&self) -> MetricsSnapshot {
        self.inner
            .lock()
            .map(|metrics| *metrics)
            .unwrap_or_default()
    }
}

impl Default for MetricsRecorder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counters_accumulate_by_kind() {
        let metrics = MetricsRecorder::new();
        metrics.record_event();
        metrics.record_event_error();
        metrics.record_row(PhaseClass::First);
        metrics.record_row(PhaseClass::Second);
        metrics.record_row(PhaseClass::Second);
        metrics.record_skip(&SkipReason::BeyondAperture(91.0));
        metrics.record_skip(&SkipReason::UnknownStation("XYZ".into()));

        let snapshot = metrics.snapshot();
        assert_eq!(snapshot.events_processed, 1);
        assert_eq!(snapshot.events_failed, 1);
        assert_eq!(snapshot.rows(), 3);
        assert_eq!(snapshot.second_phase_rows, 2);
        assert_eq!(snapshot.skipped(), 2);
    }
}
