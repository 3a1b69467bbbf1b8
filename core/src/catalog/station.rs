use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Station location keyed by code. Elevation is carried but not used for
/// block assignment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StationRecord {
    pub station_code: String,
    pub latitude: f64,
    pub longitude: f64,
    #[serde(default)]
    pub elevation: Option<f64>,
}

/// Read-only station lookup built once per run.
///
/// Records are inserted in order, so when several inventories are chained
/// together the later source wins on a code collision.
#[derive(Debug, Clone, Default)]
pub struct StationTable {
    stations: HashMap<String, StationRecord>,
}

impl StationTable {
    pub fn get(&self, station_code: &str) -> Option<&StationRecord> {
        self.stations.get(station_code)
    }

    pub fn contains(&self, station_code: &str) -> bool {
        self.stations.contains_key(station_code)
    }

    pub fn len(&self) -> usize {
        self.stations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stations.is_empty()
    }

    /// Combines inventories in priority order, lowest first.
    pub fn merged<I>(sources: I) -> Self
    where
        I: IntoIterator<Item = Vec<StationRecord>>,
    {
        sources.into_iter().flatten().collect()
    }
}

impl FromIterator<StationRecord> for StationTable {
    fn from_iter<T: IntoIterator<Item = StationRecord>>(iter: T) -> Self {
        let mut stations = HashMap::new();
        for record in iter {
            stations.insert(record.station_code.clone(), record);
        }
        Self { stations }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn station(code: &str, latitude: f64) -> StationRecord {
        StationRecord {
            station_code: code.into(),
            latitude,
            longitude: 130.0,
            elevation: None,
        }
    }

    #[test]
    fn later_source_wins_on_collision() {
        let table = StationTable::merged(vec![
            vec![station("AAA", 1.0), station("BBB", 2.0)],
            vec![station("AAA", 9.0)],
        ]);
        assert_eq!(table.len(), 2);
        assert_eq!(table.get("AAA").unwrap().latitude, 9.0);
        assert_eq!(table.get("BBB").unwrap().latitude, 2.0);
    }

    #[test]
    fn unknown_code_is_absent() {
        let table: StationTable = vec![station("AAA", 1.0)].into_iter().collect();
        assert!(table.contains("AAA"));
        assert!(!table.contains("ZZZ"));
        assert!(table.get("ZZZ").is_none());
    }
}
