//! Observation - one validated production telemetry sample for a well.

use serde::{Deserialize, Serialize};

/// Well identifier as it appears in field 0 of a data record.
pub type WellId = String;

/// Per-well monotonic sample timestamp.
pub type Timestamp = i64;

/// A single validated (well, timestamp, oil, water, pressure) tuple.
///
/// Constructed only by the record parser, which guarantees `oil` and
/// `water` are finite and non-negative. `pressure` is unconstrained.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Observation {
    pub well_id: WellId,
    pub timestamp: Timestamp,
    /// Oil rate
    pub oil: f64,
    /// Water rate
    pub water: f64,
    /// Pressure reading (any real value)
    pub pressure: f64,
}

/// The fields of an observation that are carried while it sits in a
/// well's pending slot. The well id is the map key, so it is not repeated.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Reading {
    pub timestamp: Timestamp,
    pub oil: f64,
    pub water: f64,
    pub pressure: f64,
}

impl Observation {
    /// Split into the map key and the pending-slot payload.
    pub fn into_parts(self) -> (WellId, Reading) {
        (
            self.well_id,
            Reading {
                timestamp: self.timestamp,
                oil: self.oil,
                water: self.water,
                pressure: self.pressure,
            },
        )
    }
}
