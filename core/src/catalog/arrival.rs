use serde::{Deserialize, Serialize};
use std::fmt;

use crate::prelude::{PipelineError, PipelineResult};

/// Column names in output order. The last two keep the names used by
/// downstream inversion tooling.
pub const COLUMN_NAMES: [&str; 12] = [
    "source_block",
    "station_block",
    "residual",
    "event_number",
    "source_longitude",
    "source_latitude",
    "source_depth",
    "station_longitude",
    "station_latitude",
    "observed_tt",
    "locations2degrees",
    "P_or_S",
];

/// Wave-type pairs accepted by the command line.
pub const SUPPORTED_WAVE_PAIRS: [&str; 4] = ["P S", "Pn Sn", "Pg Sg", "p s"];

/// `(source_block, station_block)`
pub type BlockPair = (i64, i64);

/// Which half of the configured wave-type pair an arrival belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
pub enum PhaseClass {
    First,
    Second,
}

impl PhaseClass {
    pub fn code(self) -> u8 {
        match self {
            PhaseClass::First => 1,
            PhaseClass::Second => 2,
        }
    }
}

impl From<PhaseClass> for u8 {
    fn from(class: PhaseClass) -> Self {
        class.code()
    }
}

impl TryFrom<u8> for PhaseClass {
    type Error = String;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        match code {
            1 => Ok(PhaseClass::First),
            2 => Ok(PhaseClass::Second),
            other => Err(format!("phase code must be 1 or 2, got {}", other)),
        }
    }
}

/// Two phase labels extracted together, e.g. `P` and `S`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct WavePair {
    first: String,
    second: String,
}

impl WavePair {
    /// Parses a whitespace separated pair such as `"Pn Sn"`.
    pub fn parse(text: &str) -> PipelineResult<Self> {
        let labels: Vec<&str> = text.split_whitespace().collect();
        match labels.as_slice() {
            [first, second] if first != second => Ok(Self {
                first: (*first).to_string(),
                second: (*second).to_string(),
            }),
            _ => Err(PipelineError::InvalidWavePair(text.to_string())),
        }
    }

    pub fn first(&self) -> &str {
        &self.first
    }

    pub fn second(&self) -> &str {
        &self.second
    }

    pub fn label(&self, class: PhaseClass) -> &str {
        match class {
            PhaseClass::First => &self.first,
            PhaseClass::Second => &self.second,
        }
    }

    /// Exact, case-sensitive match against either label.
    pub fn classify(&self, phase: &str) -> Option<PhaseClass> {
        if phase == self.first {
            Some(PhaseClass::First)
        } else if phase == self.second {
            Some(PhaseClass::Second)
        } else {
            None
        }
    }
}

impl Default for WavePair {
    fn default() -> Self {
        Self {
            first: "P".into(),
            second: "S".into(),
        }
    }
}

impl fmt::Display for WavePair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.first, self.second)
    }
}

impl TryFrom<String> for WavePair {
    type Error = PipelineError;

    fn try_from(text: String) -> Result<Self, Self::Error> {
        WavePair::parse(&text)
    }
}

impl From<WavePair> for String {
    fn from(pair: WavePair) -> Self {
        pair.to_string()
    }
}

/// One block-indexed arrival observation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArrivalRow {
    pub source_block: i64,
    pub station_block: i64,
    pub residual: Option<f64>,
    pub event_number: i64,
    pub source_longitude: f64,
    pub source_latitude: f64,
    pub source_depth: f64,
    pub station_longitude: f64,
    pub station_latitude: f64,
    pub observed_tt: f64,
    #[serde(rename = "locations2degrees")]
    pub distance_degrees: f64,
    #[serde(rename = "P_or_S")]
    pub phase_code: PhaseClass,
}

impl ArrivalRow {
    pub fn key(&self) -> BlockPair {
        (self.source_block, self.station_block)
    }

    /// Field values in [`COLUMN_NAMES`] order; a missing residual is empty.
    pub fn fields(&self) -> [String; 12] {
        [
            self.source_block.to_string(),
            self.station_block.to_string(),
            self.residual.map(|r| r.to_string()).unwrap_or_default(),
            self.event_number.to_string(),
            self.source_longitude.to_string(),
            self.source_latitude.to_string(),
            self.source_depth.to_string(),
            self.station_longitude.to_string(),
            self.station_latitude.to_string(),
            self.observed_tt.to_string(),
            self.distance_degrees.to_string(),
            self.phase_code.code().to_string(),
        ]
    }
}

#[cfg(test)]
pub(crate) fn sample_row(source_block: i64, station_block: i64, observed_tt: f64) -> ArrivalRow {
    ArrivalRow {
        source_block,
        station_block,
        residual: Some(0.1),
        event_number: 1_500_000_000_000_000,
        source_longitude: 120.0,
        source_latitude: -5.0,
        source_depth: 10_000.0,
        station_longitude: 125.0,
        station_latitude: -7.5,
        observed_tt,
        distance_degrees: 5.5,
        phase_code: PhaseClass::First,
    }
}
