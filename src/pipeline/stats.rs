//! Ingest counters for one run.

use serde::Serialize;

/// Counts every admission outcome seen by the finalization engine.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct IngestStats {
    /// Data lines pulled from the source (END excluded)
    pub lines_read: u64,
    /// Records that took a well's pending slot
    pub accepted: u64,
    /// Same-timestamp records that overwrote the pending slot
    pub duplicates_replaced: u64,
    /// Observations committed to the aggregates
    pub finalized: u64,
    /// Subset of `finalized` committed by the end-of-stream flush
    pub flushed: u64,
    /// Structurally invalid lines
    pub malformed: u64,
    /// Well-formed lines with out-of-range oil/water
    pub invalid: u64,
    /// Records older than the well's pending timestamp
    pub out_of_order: u64,
}

impl IngestStats {
    /// Lines that never reached the aggregates.
    pub fn rejected(&self) -> u64 {
        self.malformed + self.invalid + self.out_of_order
    }

    /// Emit the run summary at info level.
    pub fn log_summary(&self) {
        tracing::info!(
            lines_read = self.lines_read,
            accepted = self.accepted,
            duplicates_replaced = self.duplicates_replaced,
            finalized = self.finalized,
            flushed = self.flushed,
            malformed = self.malformed,
            invalid = self.invalid,
            out_of_order = self.out_of_order,
            "Ingest complete"
        );
    }
}
