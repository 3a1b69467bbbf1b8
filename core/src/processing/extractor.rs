use chrono::{DateTime, Utc};
use std::collections::HashMap;

use crate::catalog::{
    Arrival, ArrivalRow, EventRecord, Origin, PhaseClass, Pick, StationTable, WavePair,
};
use crate::math::{Geodesic, GridSpec, SphericalDistance};
use crate::prelude::EventError;
use crate::telemetry::{LogManager, MetricsRecorder, SkipReason};

/// Arrivals farther than this from the source are not resolved by the grid.
pub const MAX_DISTANCE_DEGREES: f64 = 90.0;

/// A row paired with the sink it belongs to.
pub type ClassifiedRow = (ArrivalRow, PhaseClass);

/// Turns one catalog event into block-indexed rows for the configured wave pair.
pub struct ArrivalExtractor<'a, D = SphericalDistance> {
    stations: &'a StationTable,
    grid: GridSpec,
    waves: WavePair,
    distance: D,
    logger: LogManager,
    metrics: MetricsRecorder,
}

impl<'a> ArrivalExtractor<'a> {
    pub fn new(stations: &'a StationTable, grid: GridSpec, waves: WavePair) -> Self {
        Self::with_distance(stations, grid, waves, SphericalDistance)
    }
}

impl<'a, D: Geodesic> ArrivalExtractor<'a, D> {
    pub fn with_distance(
        stations: &'a StationTable,
        grid: GridSpec,
        waves: WavePair,
        distance: D,
    ) -> Self {
        Self {
            stations,
            grid,
            waves,
            distance,
            logger: LogManager::new(),
            metrics: MetricsRecorder::new(),
        }
    }

    pub fn waves(&self) -> &WavePair {
        &self.waves
    }

    pub fn metrics(&self) -> &MetricsRecorder {
        &self.metrics
    }

    /// Lazily yields the rows of `event`. Fails up front when the event has no
    /// usable origin or creation time; individual arrivals are skipped instead.
    pub fn extract<'e>(
        &'e self,
        event: &'e EventRecord,
    ) -> Result<EventArrivals<'e, D>, EventError> {
        let origin = event.preferred_origin()?;
        let event_number = event.event_number()?;
        let event_block = self
            .grid
            .block_id(origin.latitude, origin.longitude, origin.depth);
        let picks = event
            .picks
            .iter()
            .map(|pick| (pick.resource_id.as_str(), pick))
            .collect();

        Ok(EventArrivals {
            extractor: self,
            event,
            origin,
            arrivals: origin.arrivals.iter(),
            picks,
            event_number,
            event_block,
        })
    }

    fn build_row(
        &self,
        origin: &Origin,
        pick: Option<&Pick>,
        arrival: &Arrival,
        event_number: i64,
        event_block: i64,
    ) -> Result<ClassifiedRow, SkipReason> {
        let pick = pick.ok_or_else(|| SkipReason::UnresolvedPick(arrival.pick_id.clone()))?;
        let station = self
            .stations
            .get(&pick.station_code)
            .ok_or_else(|| SkipReason::UnknownStation(pick.station_code.clone()))?;

        let distance_degrees = self.distance.degrees_between(
            origin.latitude,
            origin.longitude,
            station.latitude,
            station.longitude,
        );
        if distance_degrees > MAX_DISTANCE_DEGREES {
            return Err(SkipReason::BeyondAperture(distance_degrees));
        }

        // TODO: include station elevation once the grid carries topography.
        let station_block = self.grid.block_id(station.latitude, station.longitude, 0.0);

        let class = self
            .waves
            .classify(&arrival.phase)
            .ok_or_else(|| SkipReason::OtherPhase(arrival.phase.clone()))?;

        let row = ArrivalRow {
            source_block: event_block,
            station_block,
            residual: arrival.time_residual,
            event_number,
            source_longitude: origin.longitude,
            source_latitude: origin.latitude,
            source_depth: origin.depth,
            station_longitude: station.longitude,
            station_latitude: station.latitude,
            observed_tt: seconds_between(origin.time, pick.time),
            distance_degrees,
            phase_code: class,
        };
        Ok((row, class))
    }
}

/// One-pass iterator over the rows of a single event.
pub struct EventArrivals<'e, D> {
    extractor: &'e ArrivalExtractor<'e, D>,
    event: &'e EventRecord,
    origin: &'e Origin,
    arrivals: std::slice::Iter<'e, Arrival>,
    picks: HashMap<&'e str, &'e Pick>,
    event_number: i64,
    event_block: i64,
}

impl<D: Geodesic> Iterator for EventArrivals<'_, D> {
    type Item = ClassifiedRow;

    fn next(&mut self) -> Option<Self::Item> {
        for arrival in self.arrivals.by_ref() {
            let pick = self.picks.get(arrival.pick_id.as_str()).copied();
            match self.extractor.build_row(
                self.origin,
                pick,
                arrival,
                self.event_number,
                self.event_block,
            ) {
                Ok((row, class)) => {
                    self.extractor.metrics.record_row(class);
                    return Some((row, class));
                }
                Err(reason) => {
                    self.extractor
                        .logger
                        .record_skip(&self.event.resource_id, &reason);
                    self.extractor.metrics.record_skip(&reason);
                }
            }
        }
        None
    }
}

fn seconds_between(from: DateTime<Utc>, to: DateTime<Utc>) -> f64 {
    let delta = to - from;
    delta.num_seconds() as f64 + f64::from(delta.subsec_nanos()) * 1e-9
}
