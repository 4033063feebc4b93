//! Finalization Engine
//!
//! Per-well admission state machine that turns a raw, possibly duplicated,
//! possibly out-of-order record stream into exactly-once finalized
//! observations.
//!
//! ```text
//! Empty ──o──▶ Pending(o)
//! Pending(p) ──o, o.ts == p.ts──▶ Pending(o)            (last write wins)
//! Pending(p) ──o, o.ts >  p.ts──▶ finalize(p), Pending(o)
//! Pending(p) ──o, o.ts <  p.ts──▶ Pending(p)            (rejected)
//! ```
//!
//! Finalizing `p` appends its oil/water to the well's [`WellStats`] and then
//! feeds its pressure to every registered [`PressureDropTracker`] of that
//! well in ascending window order. [`FinalizationEngine::finish`] flushes all
//! pending records and hands back read-only [`Aggregates`].

use std::collections::{BTreeMap, BTreeSet, HashMap};

use crate::acquisition::parse_record;
use crate::analytics::{top_wells_by_oil, PressureDropTracker, WellStats};
use crate::types::{Observation, Reading, WellId};

use super::stats::IngestStats;

/// Pending slot of one well.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub enum PendingState {
    #[default]
    Empty,
    Pending(Reading),
}

/// What happened to an admitted observation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Admission {
    /// First record for the well; nothing finalized.
    Started,
    /// Same timestamp as the pending record; pending fields replaced.
    Replaced,
    /// Later timestamp; the previous pending record was finalized.
    Advanced,
    /// Earlier timestamp; dropped without touching any state.
    OutOfOrder,
}

/// Everything the engine owns for one well.
#[derive(Debug, Clone, Default)]
struct WellState {
    pending: PendingState,
    stats: WellStats,
    /// Sorted by ascending window, one per distinct window
    trackers: Vec<PressureDropTracker>,
}

impl WellState {
    fn finalize(&mut self, reading: &Reading) {
        self.stats.add(reading.oil, reading.water);
        for tracker in &mut self.trackers {
            tracker.push(reading.pressure);
        }
    }
}

/// Single writer of all per-well state during ingestion.
#[derive(Debug, Default)]
pub struct FinalizationEngine {
    wells: HashMap<WellId, WellState>,
    stats: IngestStats,
}

impl FinalizationEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an engine with trackers for every requested (well, window) pair.
    pub fn with_windows(requests: &BTreeMap<WellId, BTreeSet<usize>>) -> Self {
        let mut engine = Self::new();
        for (well_id, windows) in requests {
            for &window in windows {
                engine.register_window(well_id, window);
            }
        }
        engine
    }

    /// Register a pressure-drop tracker for `well_id`.
    ///
    /// Must happen before data for that well arrives. Zero windows and
    /// repeated registrations are ignored.
    pub fn register_window(&mut self, well_id: &str, window: usize) {
        if window == 0 {
            return;
        }
        let state = self.wells.entry(well_id.to_string()).or_default();
        match state
            .trackers
            .binary_search_by_key(&window, PressureDropTracker::window)
        {
            Ok(_) => {}
            Err(pos) => {
                tracing::debug!(well = %well_id, window, "Registered pressure-drop tracker");
                state.trackers.insert(pos, PressureDropTracker::new(window));
            }
        }
    }

    /// Parse one data line and admit it. Rejected lines only bump counters.
    pub fn ingest_line(&mut self, line: &str) -> Option<Admission> {
        self.stats.lines_read += 1;
        match parse_record(line) {
            Ok(observation) => Some(self.admit(observation)),
            Err(e) => {
                if e.is_malformed() {
                    self.stats.malformed += 1;
                } else {
                    self.stats.invalid += 1;
                }
                tracing::debug!(line = %line, error = %e, "Rejected record");
                None
            }
        }
    }

    /// Run one validated observation through its well's state machine.
    pub fn admit(&mut self, observation: Observation) -> Admission {
        let (well_id, reading) = observation.into_parts();
        let state = self.wells.entry(well_id).or_default();

        let admission = match state.pending {
            PendingState::Empty => {
                state.pending = PendingState::Pending(reading);
                Admission::Started
            }
            PendingState::Pending(pending) if reading.timestamp == pending.timestamp => {
                state.pending = PendingState::Pending(reading);
                Admission::Replaced
            }
            PendingState::Pending(pending) if reading.timestamp > pending.timestamp => {
                state.finalize(&pending);
                state.pending = PendingState::Pending(reading);
                Admission::Advanced
            }
            PendingState::Pending(pending) => {
                tracing::debug!(
                    timestamp = reading.timestamp,
                    pending = pending.timestamp,
                    "Dropped out-of-order record"
                );
                Admission::OutOfOrder
            }
        };

        match admission {
            Admission::Started => self.stats.accepted += 1,
            Admission::Replaced => self.stats.duplicates_replaced += 1,
            Admission::Advanced => {
                self.stats.accepted += 1;
                self.stats.finalized += 1;
            }
            Admission::OutOfOrder => self.stats.out_of_order += 1,
        }
        admission
    }

    /// Counters so far.
    pub fn stats(&self) -> &IngestStats {
        &self.stats
    }

    /// Pending slot of a well, `Empty` for unknown wells.
    pub fn pending(&self, well_id: &str) -> PendingState {
        self.wells
            .get(well_id)
            .map_or(PendingState::Empty, |state| state.pending)
    }

    /// Flush every pending record exactly once and freeze the aggregates.
    pub fn finish(mut self) -> Aggregates {
        let mut flushed = 0_u64;
        for state in self.wells.values_mut() {
            if let PendingState::Pending(pending) = std::mem::take(&mut state.pending) {
                state.finalize(&pending);
                flushed += 1;
            }
        }
        self.stats.flushed = flushed;
        self.stats.finalized += flushed;

        let wells = self
            .wells
            .into_iter()
            .map(|(well_id, state)| {
                (
                    well_id,
                    FinalizedWell {
                        stats: state.stats,
                        trackers: state.trackers,
                    },
                )
            })
            .collect();

        Aggregates {
            wells,
            stats: self.stats,
        }
    }
}

/// Read-only per-well results after the stream is exhausted.
#[derive(Debug, Clone)]
pub struct FinalizedWell {
    pub stats: WellStats,
    pub trackers: Vec<PressureDropTracker>,
}

/// Frozen aggregates handed to the query evaluator.
#[derive(Debug, Clone, Default)]
pub struct Aggregates {
    wells: HashMap<WellId, FinalizedWell>,
    stats: IngestStats,
}

impl Aggregates {
    /// Aggregates for a run that never saw a data section.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Statistics of a well with at least one finalized observation.
    pub fn well_stats(&self, well_id: &str) -> Option<&WellStats> {
        self.wells
            .get(well_id)
            .map(|well| &well.stats)
            .filter(|stats| stats.count > 0)
    }

    /// Tracker registered for exactly this (well, window) pair.
    pub fn tracker(&self, well_id: &str, window: usize) -> Option<&PressureDropTracker> {
        let trackers = &self.wells.get(well_id)?.trackers;
        trackers
            .binary_search_by_key(&window, PressureDropTracker::window)
            .ok()
            .map(|pos| &trackers[pos])
    }

    /// Up to `k` well ids by descending oil total, ties by ascending id.
    pub fn top_wells_by_oil(&self, k: usize) -> Vec<&str> {
        top_wells_by_oil(
            self.wells
                .iter()
                .map(|(well_id, well)| (well_id.as_str(), &well.stats)),
            k,
        )
    }

    /// Number of wells with at least one finalized observation.
    pub fn producing_wells(&self) -> usize {
        self.wells.values().filter(|w| w.stats.count > 0).count()
    }

    pub fn ingest_stats(&self) -> &IngestStats {
        &self.stats
    }
}
