use crate::catalog::ArrivalRow;
use crate::math::StatsHelper;

/// Keeps one representative row per `(source_block, station_block)`.
///
/// Groups are visited in ascending key order. Within a group the first row
/// (in input order) whose `observed_tt` equals the group median is kept. An
/// even-sized group whose median falls between two distinct travel times has
/// no such row and contributes nothing.
pub struct DedupFilter;

impl DedupFilter {
    /// Input positions of the retained rows, in output order.
    pub fn positions(rows: &[ArrivalRow]) -> Vec<usize> {
        let mut order: Vec<usize> = (0..rows.len()).collect();
        order.sort_by_key(|&index| rows[index].key());

        let mut kept = Vec::new();
        for group in order.chunk_by(|&a, &b| rows[a].key() == rows[b].key()) {
            let travel_times: Vec<f64> = group
                .iter()
                .map(|&index| rows[index].observed_tt)
                .collect();
            let Some(median) = StatsHelper::median(&travel_times) else {
                continue;
            };
            if let Some(&index) = group
                .iter()
                .find(|&&index| rows[index].observed_tt == median)
            {
                kept.push(index);
            }
        }
        kept
    }

    pub fn apply(rows: &[ArrivalRow]) -> Vec<ArrivalRow> {
        Self::positions(rows)
            .into_iter()
            .map(|index| rows[index].clone())
            .collect()
    }
}
