use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::prelude::EventError;

/// A phase pick at one station.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Pick {
    pub resource_id: String,
    pub station_code: String,
    pub time: DateTime<Utc>,
}

/// Association of a pick with an origin.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Arrival {
    pub pick_id: String,
    pub phase: String,
    #[serde(default)]
    pub time_residual: Option<f64>,
}

/// Hypocentre solution; depth in metres.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Origin {
    pub resource_id: String,
    pub time: DateTime<Utc>,
    pub latitude: f64,
    pub longitude: f64,
    #[serde(default)]
    pub depth: f64,
    #[serde(default)]
    pub arrivals: Vec<Arrival>,
}

/// Catalog event with its origins and picks.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventRecord {
    pub resource_id: String,
    #[serde(default)]
    pub creation_time: Option<DateTime<Utc>>,
    #[serde(default)]
    pub preferred_origin_id: Option<String>,
    #[serde(default)]
    pub origins: Vec<Origin>,
    #[serde(default)]
    pub picks: Vec<Pick>,
}

impl EventRecord {
    pub fn preferred_origin(&self) -> Result<&Origin, EventError> {
        let origin_id = self
            .preferred_origin_id
            .as_deref()
            .ok_or_else(|| EventError::MissingPreferredOrigin(self.resource_id.clone()))?;

        self.origins
            .iter()
            .find(|origin| origin.resource_id == origin_id)
            .ok_or_else(|| EventError::UnknownOrigin {
                event: self.resource_id.clone(),
                origin: origin_id.to_string(),
            })
    }

    /// Creation time in whole microseconds since the epoch. Not unique.
    pub fn event_number(&self) -> Result<i64, EventError> {
        self.creation_time
            .map(|created| created.timestamp_micros())
            .ok_or_else(|| EventError::MissingCreationTime(self.resource_id.clone()))
    }

    pub fn pick(&self, pick_id: &str) -> Option<&Pick> {
        self.picks.iter().find(|pick| pick.resource_id == pick_id)
    }
}
