use log::{debug, info, warn};

/// Why an arrival did not become a row.
#[derive(Debug, Clone, PartialEq)]
pub enum SkipReason {
    UnknownStation(String),
    UnresolvedPick(String),
    BeyondAperture(f64),
    OtherPhase(String),
}

/// Central place for per-arrival skip messages so their levels stay consistent.
pub struct LogManager;

impl LogManager {
    pub fn new() -> Self {
        Self
    }

    pub fn record_skip(&self, event_id: &str, reason: &SkipReason) {
        match reason {
            SkipReason::UnknownStation(code) => {
                warn!("station {} not found in inventory (event {})", code, event_id)
            }
            SkipReason::UnresolvedPick(pick_id) => {
                warn!("pick {} not found in event {}", pick_id, event_id)
            }
            SkipReason::BeyondAperture(degrees) => info!(
                "ignored arrival for event {}: distance from source is {} degrees",
                event_id, degrees
            ),
            SkipReason::OtherPhase(phase) => {
                debug!("ignored {} arrival for event {}", phase, event_id)
            }
        }
    }
}

impl Default for LogManager {
    fn default() -> Self {
        Self::new()
    }
}
